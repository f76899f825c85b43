use std::path::PathBuf;

use crate::catalog::{AssetCacheConfig, CatalogResult, http_client::HttpClientConfig, manifest_url};
use crate::storage::FileStore;

/// 覆盖清单基础地址的环境变量
pub const BASE_URL_ENV: &str = "FONT_EDITOR_BASE_URL";

/// 默认的清单基础地址
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// 编辑器配置
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// 清单基础地址，固定拼接 fonts.json
    pub base_url: String,
    /// HTTP客户端配置
    pub http_config: HttpClientConfig,
    /// 本地存储文件
    pub storage_path: PathBuf,
    /// 字体文件缓存配置
    pub asset_cache_config: AssetCacheConfig,
    /// 窗口宽度
    pub window_width: u32,
    /// 窗口高度
    pub window_height: u32,
    /// 编辑区字号
    pub font_size: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http_config: HttpClientConfig::default(),
            storage_path: FileStore::default_path(),
            asset_cache_config: AssetCacheConfig::default(),
            window_width: 720,
            window_height: 480,
            font_size: 22.0,
        }
    }
}

impl EditorConfig {
    /// 默认配置，环境变量可覆盖基础地址
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                config.base_url = base_url.trim().to_string();
            }
        }
        config
    }

    /// 清单完整地址
    pub fn manifest_url(&self) -> CatalogResult<url::Url> {
        manifest_url(&self.base_url)
    }
}

/// 编辑器配置构建器
pub struct EditorConfigBuilder {
    config: EditorConfig,
}

impl EditorConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: EditorConfig::default(),
        }
    }

    pub fn from_env() -> Self {
        Self {
            config: EditorConfig::from_env(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn with_http_config(mut self, config: HttpClientConfig) -> Self {
        self.config.http_config = config;
        self
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.storage_path = path.into();
        self
    }

    pub fn with_asset_cache_config(mut self, config: AssetCacheConfig) -> Self {
        self.config.asset_cache_config = config;
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.config.window_width = width.max(360);
        self.config.window_height = height.max(240);
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.config.font_size = font_size;
        self
    }

    pub fn build(self) -> EditorConfig {
        self.config
    }
}

impl Default for EditorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
