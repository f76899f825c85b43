use crate::*;

/// 加载系统字体，用于界面文字以及编辑区的后备字体
pub fn load_system_font() -> Option<Font> {
    let font_paths = [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/Library/Fonts/Arial.ttf",
        r"C:\Windows\Fonts\segoeui.ttf",
        r"C:\Windows\Fonts\arial.ttf",
    ];

    for path in &font_paths {
        if let Some(font) = try_load_font_from_path(path) {
            return Some(font);
        }
    }

    None
}

/// 尝试从指定路径加载字体
fn try_load_font_from_path(path: &str) -> Option<Font> {
    let font_data = std::fs::read(path).ok()?;
    font_from_bytes(font_data).ok()
}

const WOFF_SIGNATURE: &[u8; 4] = b"wOFF";
const WOFF2_SIGNATURE: &[u8; 4] = b"wOF2";

/// 将 WOFF/WOFF2 解压为 sfnt，其他数据原样返回
pub fn decompress_web_font(font_data: Vec<u8>) -> std::result::Result<Vec<u8>, String> {
    match font_data.get(..4) {
        Some(signature) if signature == WOFF2_SIGNATURE => {
            wuff::decompress_woff2(&font_data).map_err(|e| format!("WOFF2 解压失败: {:?}", e))
        }
        Some(signature) if signature == WOFF_SIGNATURE => {
            wuff::decompress_woff1(&font_data).map_err(|e| format!("WOFF 解压失败: {:?}", e))
        }
        _ => Ok(font_data),
    }
}

/// 从字节解析字体，web 字体先解压为 TrueType/OpenType
pub fn font_from_bytes(font_data: Vec<u8>) -> std::result::Result<Font, String> {
    let settings = FontSettings {
        collection_index: 0,
        scale: 40.0,
        load_substitutions: true,
    };

    let font_data = decompress_web_font(font_data)?;
    Font::from_bytes(font_data, settings).map_err(|e| e.to_string())
}

/// 使用 Layout API 排版文本，返回字符信息和整体宽高
pub fn layout_text(
    font: &Font,
    text: &str,
    font_size: f32,
    max_width: Option<f32>,
) -> (Vec<fontdue::layout::GlyphPosition>, f32, f32) {
    let fonts = &[font];
    let mut layout = fontdue::layout::Layout::new(fontdue::layout::CoordinateSystem::PositiveYDown);

    layout.reset(&fontdue::layout::LayoutSettings {
        x: 0.0,
        y: 0.0,
        max_width,
        max_height: None,
        horizontal_align: fontdue::layout::HorizontalAlign::Left,
        vertical_align: fontdue::layout::VerticalAlign::Top,
        line_height: 1.0,
        wrap_style: fontdue::layout::WrapStyle::Word,
        wrap_hard_breaks: true,
    });

    layout.append(fonts, &fontdue::layout::TextStyle::new(text, font_size, 0));

    let glyphs = layout.glyphs().to_vec();
    let height = layout.height();

    let width = glyphs.iter()
        .map(|g| g.x + g.width as f32)
        .fold(0.0, f32::max);

    (glyphs, width, height)
}

/// 使用 Layout API 计算文本宽度
pub fn get_layout_text_width(font: &Font, text: &str, font_size: f32) -> f32 {
    let (_, width, _) = layout_text(font, text, font_size, None);
    width
}
