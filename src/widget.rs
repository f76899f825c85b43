use crate::*;
use crate::catalog::{AssetEvent, CatalogEvent};
use crate::config::EditorConfig;
use crate::editor::FontEditor;
use crate::font::FontManager;
use crate::graphics::{Canvas, Dropdown, EditorLayout, HitTarget, Rect, Renderer};
use crate::storage::KeyValueStore;
use crate::window::WindowManager;

use tracing::{debug, warn};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{Key, NamedKey};

/// 字体族下拉框的占位项
pub const FAMILY_PLACEHOLDER: &str = "select font";
/// 未选字体族时变体下拉框的占位项
pub const VARIANT_PLACEHOLDER: &str = "select variant";

const BACKGROUND: u32 = 0xFAFAFA;
const TEXT: u32 = 0x212121;
const MUTED_TEXT: u32 = 0x9E9E9E;
const ERROR_TEXT: u32 = 0xC62828;
const BORDER: u32 = 0xBDBDBD;
const FOCUS_BORDER: u32 = 0x1976D2;
const FIELD: u32 = 0xFFFFFF;
const DISABLED_FIELD: u32 = 0xEEEEEE;
const HOVER: u32 = 0xE3F2FD;
const TOGGLE_ON: u32 = 0x4CAF50;
const TOGGLE_OFF: u32 = 0xBDBDBD;
const TOGGLE_DISABLED: u32 = 0xE6DFDF;
const BUTTON: u32 = 0xE0E0E0;

const LABEL_SIZE: f32 = 14.0;
const CONTROL_TEXT_SIZE: f32 = 16.0;
const HEADING_SIZE: f32 = 22.0;

/// 编辑器小组件：窗口、渲染与输入，状态全部委托给 FontEditor
pub struct EditorWidget<S> {
    pub window_manager: WindowManager,
    pub renderer: Renderer,
    pub font_manager: FontManager,
    pub editor: FontEditor<S>,
    pub layout: EditorLayout,
    pub window_width: u32,
    pub window_height: u32,
    pub font_size: f32,
    pub cursor_position: (f32, f32),
    pub open_dropdown: Option<Dropdown>,
    pub editor_focused: bool,
    pub content_changed: bool,
}

impl<S: KeyValueStore> EditorWidget<S> {
    pub fn new(editor: FontEditor<S>, config: &EditorConfig) -> Self {
        Self {
            window_manager: WindowManager::new(),
            renderer: Renderer::new(),
            font_manager: FontManager::new(),
            editor,
            layout: EditorLayout::compute(config.window_width, config.window_height),
            window_width: config.window_width,
            window_height: config.window_height,
            font_size: config.font_size,
            cursor_position: (0.0, 0.0),
            open_dropdown: None,
            editor_focused: true,
            content_changed: true,
        }
    }

    /// 初始化小组件
    pub fn initialize(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) -> std::result::Result<(), String> {
        self.window_manager.create_window(
            event_loop,
            "Text Editor",
            self.window_width,
            self.window_height,
        )?;

        if let Some(window) = self.window_manager.get_window() {
            self.renderer.initialize(window)?;
        }

        if let Some(size) = self.window_manager.inner_size() {
            self.handle_resize(size.width, size.height);
        }

        Ok(())
    }

    /// 处理清单加载结果
    pub fn apply_catalog_event(&mut self, event: CatalogEvent) {
        if self.editor.apply_catalog_event(event) {
            self.mark_content_changed();
        }
    }

    /// 当前选择需要的字体文件地址
    pub fn wanted_face_url(&self) -> Option<String> {
        self.editor.font_face_rule().map(|rule| rule.src)
    }

    /// 处理字体文件加载结果，只接受与当前选择一致的资源
    pub fn apply_asset_event(&mut self, event: AssetEvent) {
        let wanted = self.wanted_face_url();

        match event {
            AssetEvent::Idle => {}
            AssetEvent::Ready { url, bytes } => {
                if wanted.as_deref() != Some(url.as_str()) {
                    debug!("忽略过期的字体资源: {}", url);
                    return;
                }
                if let Err(e) = self.font_manager.apply_face(&url, bytes) {
                    warn!("字体文件无法用于渲染，使用系统字体: {} - {}", url, e);
                }
                self.mark_content_changed();
            }
            AssetEvent::Failed { url, error } => {
                if wanted.as_deref() == Some(url.as_str()) {
                    warn!("字体文件不可用，使用系统字体: {} - {}", url, error);
                    self.font_manager.clear_face();
                    self.mark_content_changed();
                }
            }
        }
    }

    /// 选择变化后同步编辑区字体：没有规则时立即移除旧字体
    fn sync_face(&mut self) {
        let wanted = self.wanted_face_url();
        if wanted.is_none() || self.font_manager.face_url() != wanted.as_deref() {
            self.font_manager.clear_face();
        }
    }

    pub fn handle_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.window_width = width;
        self.window_height = height;
        self.layout = EditorLayout::compute(width, height);
        self.mark_content_changed();
    }

    pub fn handle_cursor_moved(&mut self, x: f64, y: f64) {
        self.cursor_position = (x as f32, y as f32);
        if self.open_dropdown.is_some() {
            self.mark_content_changed();
        }
    }

    /// 下拉列表的选项文本
    fn dropdown_options(&self, dropdown: Dropdown) -> Vec<String> {
        match dropdown {
            Dropdown::Family => std::iter::once(FAMILY_PLACEHOLDER)
                .chain(self.editor.family_options())
                .map(str::to_string)
                .collect(),
            Dropdown::Variant => self.editor.variant_options().to_vec(),
        }
    }

    fn open_dropdown_state(&self) -> Option<(Dropdown, usize)> {
        self.open_dropdown
            .map(|dropdown| (dropdown, self.dropdown_options(dropdown).len()))
    }

    /// 处理鼠标左键点击
    pub fn handle_click(&mut self) {
        let (x, y) = self.cursor_position;
        let target = self.layout.hit_test(x, y, self.open_dropdown_state());
        debug!("点击: {:?}", target);

        match target {
            HitTarget::Dropdown(dropdown) => {
                let enabled = match dropdown {
                    Dropdown::Family => true,
                    Dropdown::Variant => self.editor.variant_picker_enabled(),
                };
                self.open_dropdown = if enabled && self.open_dropdown != Some(dropdown) {
                    Some(dropdown)
                } else {
                    None
                };
            }
            HitTarget::DropdownOption(dropdown, index) => {
                self.open_dropdown = None;
                self.choose_option(dropdown, index);
            }
            HitTarget::ItalicToggle => {
                self.open_dropdown = None;
                self.editor.toggle_italic();
                self.sync_face();
            }
            HitTarget::Editor => {
                self.open_dropdown = None;
                self.editor_focused = true;
            }
            HitTarget::Clear => {
                self.open_dropdown = None;
                self.editor.reset();
                self.sync_face();
            }
            HitTarget::Save => {
                self.open_dropdown = None;
                self.editor.save();
            }
            HitTarget::Nothing => {
                self.open_dropdown = None;
                self.editor_focused = false;
            }
        }

        self.mark_content_changed();
    }

    fn choose_option(&mut self, dropdown: Dropdown, index: usize) {
        match dropdown {
            Dropdown::Family => {
                // 第 0 项是占位项
                let family = if index == 0 {
                    String::new()
                } else {
                    self.editor.family_options().get(index - 1).map(|name| name.to_string()).unwrap_or_default()
                };
                self.editor.select_family(&family);
            }
            Dropdown::Variant => {
                if let Some(variant) = self.editor.variant_options().get(index).cloned() {
                    self.editor.select_variant(&variant);
                }
            }
        }
        self.sync_face();
    }

    /// 处理键盘输入
    pub fn handle_key(&mut self, event: &KeyEvent) {
        if event.state != ElementState::Pressed {
            return;
        }

        if let Key::Named(NamedKey::Escape) = event.logical_key {
            self.open_dropdown = None;
            self.mark_content_changed();
            return;
        }

        if !self.editor_focused {
            return;
        }

        match &event.logical_key {
            Key::Named(NamedKey::Backspace) => self.editor.delete_backward(),
            Key::Named(NamedKey::Enter) => self.editor.insert_text("\n"),
            Key::Named(NamedKey::Tab) => self.editor.insert_text("\t"),
            _ => {
                if let Some(text) = &event.text {
                    let printable: String = text.chars().filter(|c| !c.is_control()).collect();
                    self.editor.insert_text(&printable);
                }
            }
        }

        self.mark_content_changed();
    }

    /// 绘制内容
    pub fn draw_content(&mut self) -> std::result::Result<(), String> {
        if !self.font_manager.has_font() {
            // 避免每帧重复报错
            self.mark_redraw_complete();
            return Err("没有可用的界面字体".to_string());
        }
        let Some(ui_font) = self.font_manager.ui_font() else {
            return Ok(());
        };
        let editor_font = self.font_manager.editor_font().unwrap_or(ui_font);

        let layout = &self.layout;
        let editor = &self.editor;
        let open = self.open_dropdown;
        let options = open.map(|dropdown| self.dropdown_options(dropdown)).unwrap_or_default();
        let cursor = self.cursor_position;
        let focused = self.editor_focused;
        let font_size = self.font_size;

        let result = self.renderer.draw_frame(self.window_width, self.window_height, |canvas| {
            canvas.clear(BACKGROUND);

            if let Some(error) = editor.fetch_error() {
                canvas.draw_text(ui_font, &format!("Error: {}", error), LABEL_SIZE, ERROR_TEXT, layout.error_line, false);
            }
            canvas.draw_text(ui_font, "Text Editor", HEADING_SIZE, TEXT, layout.heading, false);

            canvas.draw_text(ui_font, "font family", LABEL_SIZE, MUTED_TEXT, layout.family_label, false);
            canvas.draw_text(ui_font, "variant", LABEL_SIZE, MUTED_TEXT, layout.variant_label, false);
            canvas.draw_text(ui_font, "italic", LABEL_SIZE, MUTED_TEXT, layout.italic_label, false);

            let family_text = if editor.family().is_empty() { FAMILY_PLACEHOLDER } else { editor.family() };
            draw_field(canvas, ui_font, layout.family_dropdown, family_text, true, open == Some(Dropdown::Family));

            let variant_enabled = editor.variant_picker_enabled();
            let variant_text = if !variant_enabled || editor.variant().is_empty() {
                VARIANT_PLACEHOLDER
            } else {
                editor.variant()
            };
            draw_field(canvas, ui_font, layout.variant_dropdown, variant_text, variant_enabled, open == Some(Dropdown::Variant));

            draw_toggle(canvas, layout.italic_toggle, editor.italic_on(), editor.italic_toggle_enabled());

            canvas.fill_rect(layout.editor, FIELD);
            canvas.stroke_rect(layout.editor, if focused { FOCUS_BORDER } else { BORDER });
            let text_area = layout.editor.inset(10.0);
            let (end_x, end_y) = canvas.draw_text(editor_font, editor.content(), font_size, TEXT, text_area, true);
            if focused {
                let caret = if editor.content().ends_with('\n') {
                    Rect::new(text_area.x, end_y + font_size * 0.25, 2.0, font_size)
                } else {
                    Rect::new(end_x + 1.0, end_y - font_size * 0.8, 2.0, font_size)
                };
                canvas.fill_rect(caret, FOCUS_BORDER);
            }

            draw_button(canvas, ui_font, layout.clear_button, "Clear");
            draw_button(canvas, ui_font, layout.save_button, "Save");

            // 展开的列表最后绘制，覆盖在编辑区之上
            if let Some(dropdown) = open {
                for (index, option) in options.iter().enumerate() {
                    let rect = layout.option_rect(dropdown, index);
                    let color = if rect.contains(cursor.0, cursor.1) { HOVER } else { FIELD };
                    canvas.fill_rect(rect, color);
                    canvas.stroke_rect(rect, BORDER);
                    canvas.draw_text(ui_font, option, CONTROL_TEXT_SIZE, TEXT, rect.inset(6.0), false);
                }
            }
        });

        if result.is_ok() {
            self.mark_redraw_complete();
        }

        result
    }

    /// 标记内容发生变化
    pub fn mark_content_changed(&mut self) {
        self.content_changed = true;
    }

    /// 标记重绘完成
    pub fn mark_redraw_complete(&mut self) {
        self.content_changed = false;
    }

    pub fn should_redraw(&self) -> bool {
        self.content_changed
    }

    /// 请求重绘
    pub fn request_redraw(&self) {
        self.window_manager.request_redraw();
    }
}

/// 绘制下拉框
fn draw_field(canvas: &mut Canvas<'_>, font: &Font, rect: Rect, text: &str, enabled: bool, open: bool) {
    canvas.fill_rect(rect, if enabled { FIELD } else { DISABLED_FIELD });
    canvas.stroke_rect(rect, if open { FOCUS_BORDER } else { BORDER });

    let text_area = Rect::new(rect.x + 8.0, rect.y + 7.0, (rect.width - 32.0).max(0.0), rect.height - 8.0);
    canvas.draw_text(font, text, CONTROL_TEXT_SIZE, if enabled { TEXT } else { MUTED_TEXT }, text_area, false);

    let arrow_area = Rect::new(rect.right() - 22.0, rect.y + 7.0, 16.0, rect.height - 8.0);
    canvas.draw_text(font, "v", CONTROL_TEXT_SIZE, MUTED_TEXT, arrow_area, false);
}

/// 绘制斜体开关
fn draw_toggle(canvas: &mut Canvas<'_>, rect: Rect, on: bool, enabled: bool) {
    let track = if !enabled {
        TOGGLE_DISABLED
    } else if on {
        TOGGLE_ON
    } else {
        TOGGLE_OFF
    };
    canvas.fill_rect(rect, track);

    let knob_size = rect.height - 6.0;
    let knob_x = if on { rect.right() - 3.0 - knob_size } else { rect.x + 3.0 };
    canvas.fill_rect(Rect::new(knob_x, rect.y + 3.0, knob_size, knob_size), FIELD);
}

/// 绘制按钮
fn draw_button(canvas: &mut Canvas<'_>, font: &Font, rect: Rect, label: &str) {
    canvas.fill_rect(rect, BUTTON);
    canvas.stroke_rect(rect, BORDER);

    let label_width = crate::font::get_layout_text_width(font, label, CONTROL_TEXT_SIZE);
    let label_x = rect.x + ((rect.width - label_width) / 2.0).max(4.0);
    canvas.draw_text(font, label, CONTROL_TEXT_SIZE, TEXT, Rect::new(label_x, rect.y + 9.0, rect.width, rect.height - 9.0), false);
}
