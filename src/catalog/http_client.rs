use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;
use crate::catalog::{CatalogError, CatalogResult};

/// HTTP客户端配置
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// 请求超时时间（None 表示沿用底层传输的默认值）
    pub timeout: Option<Duration>,
    /// 用户代理
    pub user_agent: String,
    /// 连接超时
    pub connect_timeout: Option<Duration>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: format!("font_editor/{}", env!("CARGO_PKG_VERSION")),
            connect_timeout: None,
        }
    }
}

/// HTTP客户端，单次请求，不做自动重试
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// 创建新的HTTP客户端
    pub fn new(config: HttpClientConfig) -> CatalogResult<Self> {
        let mut builder = Client::builder().user_agent(&config.user_agent);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        let client = builder.build().map_err(CatalogError::NetworkError)?;

        Ok(Self { client })
    }

    /// 发送GET请求，返回文本
    pub async fn get_text(&self, url: &Url) -> CatalogResult<String> {
        debug!("发送HTTP请求: {}", url);
        let response = self.execute_request(url).await?;
        let text = response.text().await.map_err(CatalogError::NetworkError)?;
        Ok(text)
    }

    /// 发送GET请求，返回原始字节
    pub async fn get_bytes(&self, url: &Url) -> CatalogResult<Vec<u8>> {
        debug!("下载资源: {}", url);
        let response = self.execute_request(url).await?;
        let bytes = response.bytes().await.map_err(CatalogError::NetworkError)?;
        Ok(bytes.to_vec())
    }

    /// 执行单次HTTP请求，非 2xx 状态视为错误
    async fn execute_request(&self, url: &Url) -> CatalogResult<reqwest::Response> {
        let response = self.client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            error!("请求已发出，但服务器返回状态: {}", status);
            error!("错误数据: {}", body);
            Err(CatalogError::HttpStatus {
                code: status.as_u16(),
                message: format!("HTTP错误: {}", status),
            })
        }
    }

    /// 分类网络错误
    fn classify_error(&self, error: reqwest::Error) -> CatalogError {
        if error.is_timeout() {
            CatalogError::Timeout
        } else if error.is_connect() {
            CatalogError::ServiceUnavailable
        } else {
            CatalogError::NetworkError(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_leaves_timeouts_to_transport() {
        let config = HttpClientConfig::default();
        assert!(config.timeout.is_none());
        assert!(config.connect_timeout.is_none());
        assert!(config.user_agent.starts_with("font_editor/"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_an_error() {
        let client = HttpClient::new(HttpClientConfig {
            connect_timeout: Some(Duration::from_millis(200)),
            ..Default::default()
        })
        .unwrap();

        let url = Url::parse("http://127.0.0.1:9/fonts.json").unwrap();
        assert!(client.get_text(&url).await.is_err());
    }
}
