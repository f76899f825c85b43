use thiserror::Error;

/// 字体清单错误类型
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("网络请求失败: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON解析失败: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("URL解析失败: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("服务器返回错误状态: {code}, 消息: {message}")]
    HttpStatus { code: u16, message: String },

    #[error("请求超时")]
    Timeout,

    #[error("服务不可用")]
    ServiceUnavailable,

    #[error("存储操作失败: {0}")]
    StorageError(String),

    #[error("字体缓存操作失败: {0}")]
    CacheError(String),
}

impl CatalogError {
    /// 面向用户的统一错误提示
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }
}

/// 清单获取失败时展示给用户的文本
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch font data.";

/// 字体清单结果类型
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_is_generic() {
        let status = CatalogError::HttpStatus { code: 404, message: "Not Found".to_string() };
        assert_eq!(status.user_message(), FETCH_FAILED_MESSAGE);

        assert_eq!(CatalogError::Timeout.user_message(), FETCH_FAILED_MESSAGE);
    }
}
