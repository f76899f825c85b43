use crate::*;

/// 创建编辑器窗口
pub fn create_editor_window(
    event_loop: &winit::event_loop::ActiveEventLoop,
    title: &str,
    width: u32,
    height: u32,
) -> std::result::Result<Rc<Window>, String> {
    let window_attributes = Window::default_attributes()
        .with_title(title)
        .with_inner_size(PhysicalSize::new(width, height))
        .with_min_inner_size(PhysicalSize::new(360, 240))
        .with_resizable(true)
        .with_visible(true);

    let window = event_loop
        .create_window(window_attributes)
        .map_err(|e| format!("创建窗口失败: {}", e))?;

    Ok(Rc::new(window))
}
