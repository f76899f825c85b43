use tracing::{error, info};
use url::Url;

use crate::catalog::{
    CatalogError, CatalogResult, FontCatalog,
    http_client::{HttpClient, HttpClientConfig},
};

/// 清单在服务器上的固定路径
pub const MANIFEST_PATH: &str = "fonts.json";

/// 清单加载事件（通过 watch 通道发送给界面线程）
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEvent {
    /// 请求尚未完成
    Pending,
    /// 加载成功
    Loaded(FontCatalog),
    /// 加载失败，附带面向用户的提示
    Failed(String),
}

/// 根据基础地址拼出清单地址
pub fn manifest_url(base_url: &str) -> CatalogResult<Url> {
    let base = Url::parse(base_url)?;
    Ok(base.join(MANIFEST_PATH)?)
}

/// 字体清单加载器
pub struct CatalogLoader {
    http_client: HttpClient,
    manifest_url: Url,
}

impl CatalogLoader {
    pub fn new(http_config: HttpClientConfig, manifest_url: Url) -> CatalogResult<Self> {
        let http_client = HttpClient::new(http_config)?;
        Ok(Self { http_client, manifest_url })
    }

    pub fn manifest_url(&self) -> &Url {
        &self.manifest_url
    }

    /// 获取并解析清单，资源地址解析为绝对地址
    pub async fn fetch(&self) -> CatalogResult<FontCatalog> {
        let text = self.http_client.get_text(&self.manifest_url).await?;
        let catalog = FontCatalog::from_json(&text)?;
        Ok(catalog.resolve_against(&self.manifest_url))
    }

    /// 加载一次清单，错误记录日志后折叠为统一提示，不重试
    pub async fn load(&self) -> CatalogEvent {
        match self.fetch().await {
            Ok(catalog) => {
                info!("字体清单加载完成: {} 个字体族", catalog.len());
                CatalogEvent::Loaded(catalog)
            }
            Err(e) => {
                log_fetch_failure(&self.manifest_url, &e);
                CatalogEvent::Failed(e.user_message().to_string())
            }
        }
    }
}

/// 按错误类别输出诊断日志
fn log_fetch_failure(url: &Url, error: &CatalogError) {
    match error {
        CatalogError::HttpStatus { code, message } => {
            error!("清单请求已发出，但服务器返回状态 {}: {} ({})", code, message, url);
        }
        CatalogError::ServiceUnavailable | CatalogError::Timeout => {
            error!("清单请求已发出，但未收到有效响应: {} ({})", error, url);
        }
        CatalogError::JsonParseError(e) => {
            error!("清单内容无法解析: {} ({})", e, url);
        }
        CatalogError::UrlParseError(e) => {
            error!("清单请求构造失败: {}", e);
        }
        other => {
            error!("获取清单时发生意外错误: {} ({})", other, url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FETCH_FAILED_MESSAGE;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// 启动只响应一次的本地HTTP服务
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}/", addr)
    }

    fn loader_for(base: &str) -> CatalogLoader {
        CatalogLoader::new(HttpClientConfig::default(), manifest_url(base).unwrap()).unwrap()
    }

    #[test]
    fn test_manifest_url_joins_fixed_path() {
        let url = manifest_url("http://localhost:8080/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/fonts.json");

        let url = manifest_url("http://localhost:8080/static/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/static/fonts.json");

        assert!(manifest_url("not a url").is_err());
    }

    #[tokio::test]
    async fn test_load_success() {
        let base = serve_once("200 OK", r#"{"Roboto": {"regular": "/r.woff2", "italic": "/i.woff2"}}"#).await;
        let event = loader_for(&base).load().await;

        match event {
            CatalogEvent::Loaded(catalog) => {
                assert_eq!(catalog.variant_names("Roboto"), vec!["regular", "italic"]);
                assert_eq!(
                    catalog.asset_url("Roboto", "italic"),
                    Some(format!("{}i.woff2", base).as_str())
                );
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_non_success_status() {
        let base = serve_once("404 Not Found", "{}").await;
        let event = loader_for(&base).load().await;
        assert_eq!(event, CatalogEvent::Failed(FETCH_FAILED_MESSAGE.to_string()));
    }

    #[tokio::test]
    async fn test_server_error_keeps_status_code() {
        let base = serve_once("503 Service Unavailable", "{}").await;
        match loader_for(&base).fetch().await {
            Err(CatalogError::HttpStatus { code, .. }) => assert_eq!(code, 503),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_malformed_payload() {
        let base = serve_once("200 OK", "<html>oops</html>").await;
        let event = loader_for(&base).load().await;
        assert_eq!(event, CatalogEvent::Failed(FETCH_FAILED_MESSAGE.to_string()));
    }
}
