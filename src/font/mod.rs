mod loader;

pub use loader::*;

use crate::*;
use tracing::{info, warn};

/// 当前应用到编辑区的字体
struct ActiveFace {
    url: String,
    font: Font,
}

/// 字体管理器：界面字体 + 清单中选中的编辑区字体
pub struct FontManager {
    ui_font: Option<Font>,
    face: Option<ActiveFace>,
}

impl FontManager {
    pub fn new() -> Self {
        let ui_font = load_system_font();
        if ui_font.is_none() {
            warn!("未找到可用的系统字体，界面文字将无法显示");
        }
        Self { ui_font, face: None }
    }

    /// 界面字体
    pub fn ui_font(&self) -> Option<&Font> {
        self.ui_font.as_ref()
    }

    /// 编辑区字体：已加载的清单字体，否则退回界面字体
    pub fn editor_font(&self) -> Option<&Font> {
        self.face.as_ref().map(|face| &face.font).or(self.ui_font.as_ref())
    }

    /// 当前编辑区字体的来源地址
    pub fn face_url(&self) -> Option<&str> {
        self.face.as_ref().map(|face| face.url.as_str())
    }

    /// 从下载的字节应用编辑区字体
    pub fn apply_face(&mut self, url: &str, bytes: Vec<u8>) -> std::result::Result<(), String> {
        match font_from_bytes(bytes) {
            Ok(font) => {
                info!("应用字体: {}", url);
                self.face = Some(ActiveFace { url: url.to_string(), font });
                Ok(())
            }
            Err(e) => {
                // 无法解析时退回后备字体
                self.face = None;
                Err(e)
            }
        }
    }

    /// 移除编辑区字体
    pub fn clear_face(&mut self) {
        self.face = None;
    }

    /// 检查是否有可用字体
    pub fn has_font(&self) -> bool {
        self.ui_font.is_some()
    }
}

impl Default for FontManager {
    fn default() -> Self {
        Self::new()
    }
}
