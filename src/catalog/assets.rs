use tracing::{debug, warn};
use url::Url;

use crate::catalog::{
    CatalogResult,
    asset_cache::{AssetCacheConfig, FontAssetCache},
    http_client::{HttpClient, HttpClientConfig},
};

/// 字体资源事件
#[derive(Debug, Clone, PartialEq)]
pub enum AssetEvent {
    /// 尚无资源
    Idle,
    /// 资源已就绪
    Ready { url: String, bytes: Vec<u8> },
    /// 资源获取失败
    Failed { url: String, error: String },
}

/// 字体文件加载器：先查磁盘缓存，未命中再下载
pub struct FontAssetLoader {
    http_client: HttpClient,
    cache: Option<FontAssetCache>,
}

impl FontAssetLoader {
    pub fn new(http_config: HttpClientConfig, cache_config: AssetCacheConfig) -> CatalogResult<Self> {
        let http_client = HttpClient::new(http_config)?;

        // 缓存目录不可用时仍可直接下载
        let cache = match FontAssetCache::new(cache_config) {
            Ok(cache) => {
                match cache.cleanup_expired() {
                    Ok(removed) => debug!("字体缓存目录: {} (清理过期 {} 项)", cache.cache_dir().display(), removed),
                    Err(e) => warn!("清理字体缓存失败: {}", e),
                }
                Some(cache)
            }
            Err(e) => {
                warn!("字体缓存不可用: {}", e);
                None
            }
        };

        Ok(Self { http_client, cache })
    }

    /// 获取字体文件字节
    pub async fn load(&self, url: &str) -> CatalogResult<Vec<u8>> {
        if let Some(bytes) = self.cache.as_ref().and_then(|cache| cache.get(url)) {
            return Ok(bytes);
        }

        let parsed = Url::parse(url)?;
        let bytes = self.http_client.get_bytes(&parsed).await?;
        debug!("字体下载完成: {} ({} 字节)", url, bytes.len());

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(url, &bytes) {
                warn!("缓存字体失败: {}", e);
            }
        }

        Ok(bytes)
    }

    /// 加载并折叠为事件
    pub async fn load_event(&self, url: &str) -> AssetEvent {
        match self.load(url).await {
            Ok(bytes) => AssetEvent::Ready { url: url.to_string(), bytes },
            Err(e) => {
                warn!("字体文件获取失败: {} - {}", url, e);
                AssetEvent::Failed { url: url.to_string(), error: e.to_string() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_cached_asset_skips_network() {
        let temp_dir = TempDir::new().unwrap();
        let cache_config = AssetCacheConfig {
            ttl: ChronoDuration::hours(1),
            cache_dir: temp_dir.path().to_path_buf(),
        };

        // 预先写入缓存，地址本身不可达
        let url = "http://127.0.0.1:9/cached.ttf";
        FontAssetCache::new(cache_config.clone()).unwrap().put(url, b"cached").unwrap();

        let loader = FontAssetLoader::new(HttpClientConfig::default(), cache_config).unwrap();
        assert_eq!(loader.load(url).await.unwrap(), b"cached".to_vec());
    }

    #[tokio::test]
    async fn test_invalid_url_fails() {
        let temp_dir = TempDir::new().unwrap();
        let loader = FontAssetLoader::new(
            HttpClientConfig::default(),
            AssetCacheConfig {
                ttl: ChronoDuration::hours(1),
                cache_dir: temp_dir.path().to_path_buf(),
            },
        )
        .unwrap();

        match loader.load_event("u1").await {
            AssetEvent::Failed { url, .. } => assert_eq!(url, "u1"),
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
