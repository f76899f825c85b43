use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{CatalogError, CatalogResult};

/// 缓存元数据，字体字节单独存放在同名 .bin 文件中
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    url: String,
    size: usize,
    expires_at: DateTime<Utc>,
}

impl CacheEntry {
    fn new(url: &str, size: usize, ttl: ChronoDuration) -> Self {
        Self {
            url: url.to_string(),
            size,
            expires_at: Utc::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// 字体缓存配置
#[derive(Debug, Clone)]
pub struct AssetCacheConfig {
    /// 缓存生存时间
    pub ttl: ChronoDuration,
    /// 磁盘缓存目录
    pub cache_dir: PathBuf,
}

impl Default for AssetCacheConfig {
    fn default() -> Self {
        let cache_dir = Self::get_default_cache_dir()
            .unwrap_or_else(|| PathBuf::from("cache/fonts"));

        Self {
            ttl: ChronoDuration::days(7),
            cache_dir,
        }
    }
}

impl AssetCacheConfig {
    /// 获取默认缓存目录
    fn get_default_cache_dir() -> Option<PathBuf> {
        dirs::cache_dir().map(|mut path| {
            path.push("font_editor");
            path.push("fonts");
            path
        })
    }
}

/// 由资源地址生成缓存键
pub fn cache_key(url: &str) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(url.trim().as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)
}

/// 已下载字体文件的磁盘缓存
pub struct FontAssetCache {
    config: AssetCacheConfig,
}

impl FontAssetCache {
    /// 创建新的字体缓存
    pub fn new(config: AssetCacheConfig) -> CatalogResult<Self> {
        fs::create_dir_all(&config.cache_dir)
            .map_err(|e| CatalogError::CacheError(format!("创建缓存目录失败: {}", e)))?;

        debug!("字体缓存目录: {:?}", config.cache_dir);

        Ok(Self { config })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.config.cache_dir
    }

    fn meta_path(&self, key: &str) -> PathBuf {
        self.config.cache_dir.join(format!("{}.json", key))
    }

    fn data_path(&self, key: &str) -> PathBuf {
        self.config.cache_dir.join(format!("{}.bin", key))
    }

    /// 获取缓存的字体字节，过期或损坏的条目会被删除
    pub fn get(&self, url: &str) -> Option<Vec<u8>> {
        let key = cache_key(url);

        match self.read_entry(&key) {
            Ok(Some(entry)) if !entry.is_expired() => match fs::read(self.data_path(&key)) {
                Ok(bytes) if bytes.len() == entry.size => {
                    debug!("从缓存获取字体: {}", url);
                    Some(bytes)
                }
                Ok(_) | Err(_) => {
                    warn!("字体缓存数据不完整，删除: {}", url);
                    self.remove(&key);
                    None
                }
            },
            Ok(Some(_)) => {
                debug!("字体缓存过期，删除: {}", url);
                self.remove(&key);
                None
            }
            Ok(None) => None,
            Err(e) => {
                warn!("读取字体缓存失败: {}", e);
                self.remove(&key);
                None
            }
        }
    }

    /// 存储字体字节
    pub fn put(&self, url: &str, bytes: &[u8]) -> CatalogResult<()> {
        let key = cache_key(url);
        let entry = CacheEntry::new(url, bytes.len(), self.config.ttl);

        fs::write(self.data_path(&key), bytes)
            .map_err(|e| CatalogError::CacheError(format!("写入字体文件失败: {}", e)))?;

        let content = serde_json::to_string_pretty(&entry)
            .map_err(|e| CatalogError::CacheError(format!("序列化缓存条目失败: {}", e)))?;
        fs::write(self.meta_path(&key), content)
            .map_err(|e| CatalogError::CacheError(format!("写入缓存元数据失败: {}", e)))?;

        debug!("缓存字体: {} ({} 字节)", url, bytes.len());
        Ok(())
    }

    /// 清理过期缓存，返回删除的条目数
    pub fn cleanup_expired(&self) -> CatalogResult<usize> {
        let entries = fs::read_dir(&self.config.cache_dir)
            .map_err(|e| CatalogError::CacheError(format!("读取缓存目录失败: {}", e)))?;

        let mut cleaned_count = 0;

        for entry in entries.filter_map(|entry| entry.ok()) {
            let path = entry.path();
            if !path.is_file() || path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let expired = match self.read_entry(key) {
                Ok(Some(cache_entry)) => cache_entry.is_expired(),
                Ok(None) => false,
                Err(e) => {
                    warn!("解析缓存文件失败，删除: {} - {}", path.display(), e);
                    true
                }
            };

            if expired {
                self.remove(key);
                cleaned_count += 1;
            }
        }

        debug!("清理过期字体缓存完成，删除 {} 个条目", cleaned_count);
        Ok(cleaned_count)
    }

    /// 缓存条目数
    pub fn len(&self) -> usize {
        fs::read_dir(&self.config.cache_dir)
            .map(|entries| {
                entries
                    .filter_map(|entry| entry.ok())
                    .filter(|entry| entry.path().extension().map_or(false, |ext| ext == "json"))
                    .count()
            })
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_entry(&self, key: &str) -> CatalogResult<Option<CacheEntry>> {
        let path = self.meta_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| CatalogError::CacheError(format!("读取缓存文件失败: {}", e)))?;
        let entry = serde_json::from_str(&content)
            .map_err(|e| CatalogError::CacheError(format!("解析缓存文件失败: {}", e)))?;

        Ok(Some(entry))
    }

    fn remove(&self, key: &str) {
        for path in [self.meta_path(key), self.data_path(key)] {
            if path.exists() {
                if let Err(e) = fs::remove_file(&path) {
                    warn!("删除缓存文件失败: {} - {}", path.display(), e);
                }
            }
        }
    }
}
