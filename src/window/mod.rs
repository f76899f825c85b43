mod creation;

pub use creation::*;

use crate::*;

/// 窗口管理器，负责窗口的创建与尺寸查询
pub struct WindowManager {
    window: Option<Rc<Window>>,
}

impl WindowManager {
    pub fn new() -> Self {
        Self {
            window: None,
        }
    }

    /// 创建窗口
    pub fn create_window(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        title: &str,
        width: u32,
        height: u32,
    ) -> std::result::Result<(), String> {
        let window = create_editor_window(event_loop, title, width, height)?;
        self.window = Some(window);
        Ok(())
    }

    /// 获取窗口引用
    pub fn get_window(&self) -> Option<&Rc<Window>> {
        self.window.as_ref()
    }

    /// 当前窗口内部尺寸
    pub fn inner_size(&self) -> Option<PhysicalSize<u32>> {
        self.window.as_ref().map(|window| window.inner_size())
    }

    /// 请求重绘
    pub fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new()
    }
}
