use crate::*;
use crate::graphics::Rect;

/// 图形渲染器，负责窗口表面与帧缓冲
pub struct Renderer {
    surface: Option<Surface<Rc<Window>, Rc<Window>>>,
    context: Option<Context<Rc<Window>>>,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            surface: None,
            context: None,
        }
    }

    /// 初始化渲染器
    pub fn initialize(&mut self, window: &Rc<Window>) -> std::result::Result<(), String> {
        let context = Context::new(window.clone())
            .map_err(|e| format!("创建渲染上下文失败: {}", e))?;

        let surface = Surface::new(&context, window.clone())
            .map_err(|e| format!("创建渲染表面失败: {}", e))?;

        self.context = Some(context);
        self.surface = Some(surface);

        Ok(())
    }

    /// 绘制一帧内容
    pub fn draw_frame<F>(
        &mut self,
        window_width: u32,
        window_height: u32,
        paint: F,
    ) -> std::result::Result<(), String>
    where
        F: FnOnce(&mut Canvas<'_>),
    {
        let surface = self.surface.as_mut()
            .ok_or("渲染表面未初始化")?;

        let (Some(width), Some(height)) = (NonZeroU32::new(window_width), NonZeroU32::new(window_height)) else {
            // 最小化时尺寸为 0，跳过
            return Ok(());
        };

        surface.resize(width, height)
            .map_err(|e| format!("调整缓冲区失败: {}", e))?;

        let mut buffer = surface.buffer_mut()
            .map_err(|e| format!("获取缓冲区失败: {}", e))?;

        let mut canvas = Canvas::new(&mut buffer, window_width, window_height);
        paint(&mut canvas);

        buffer.present().map_err(|e| format!("呈现缓冲区失败: {}", e))?;

        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// 帧缓冲上的绘图接口，颜色为 0x00RRGGBB
pub struct Canvas<'a> {
    buffer: &'a mut [u32],
    width: u32,
    height: u32,
}

impl<'a> Canvas<'a> {
    pub fn new(buffer: &'a mut [u32], width: u32, height: u32) -> Self {
        Self { buffer, width, height }
    }

    pub fn clear(&mut self, color: u32) {
        self.buffer.fill(color);
    }

    /// 填充矩形
    pub fn fill_rect(&mut self, rect: Rect, color: u32) {
        let x0 = rect.x.max(0.0) as u32;
        let y0 = rect.y.max(0.0) as u32;
        let x1 = (rect.right().max(0.0) as u32).min(self.width);
        let y1 = (rect.bottom().max(0.0) as u32).min(self.height);

        for y in y0..y1 {
            let row = (y * self.width) as usize;
            for x in x0..x1 {
                if let Some(pixel) = self.buffer.get_mut(row + x as usize) {
                    *pixel = color;
                }
            }
        }
    }

    /// 描边矩形
    pub fn stroke_rect(&mut self, rect: Rect, color: u32) {
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, 1.0), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - 1.0, rect.width, 1.0), color);
        self.fill_rect(Rect::new(rect.x, rect.y, 1.0, rect.height), color);
        self.fill_rect(Rect::new(rect.right() - 1.0, rect.y, 1.0, rect.height), color);
    }

    /// 在区域内绘制文本，超出区域的部分被裁剪，返回最后一个字符的右下角
    pub fn draw_text(
        &mut self,
        font: &Font,
        text: &str,
        font_size: f32,
        color: u32,
        area: Rect,
        wrap: bool,
    ) -> (f32, f32) {
        use crate::font::layout_text;

        let max_width = wrap.then_some(area.width);
        let (glyphs, _, _) = layout_text(font, text, font_size, max_width);

        let mut end = (area.x, area.y + font_size);
        for glyph in glyphs {
            let char_x = area.x + glyph.x;
            let char_y = area.y + glyph.y;
            end = (char_x + glyph.width as f32, char_y + glyph.height as f32);

            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }

            let (metrics, bitmap) = font.rasterize_config(glyph.key);
            self.draw_character_bitmap(&bitmap, &metrics, char_x as i32, char_y as i32, color, area);
        }
        end
    }

    /// 绘制字符位图（按覆盖率混合）
    fn draw_character_bitmap(
        &mut self,
        bitmap: &[u8],
        metrics: &fontdue::Metrics,
        char_x: i32,
        char_y: i32,
        color: u32,
        clip: Rect,
    ) {
        for y in 0..metrics.height {
            for x in 0..metrics.width {
                let pixel_x = char_x + x as i32;
                let pixel_y = char_y + y as i32;

                if !clip.contains(pixel_x as f32, pixel_y as f32)
                    || pixel_x < 0 || pixel_x >= self.width as i32
                    || pixel_y < 0 || pixel_y >= self.height as i32
                {
                    continue;
                }

                let alpha = bitmap.get(y * metrics.width + x).copied().unwrap_or(0);
                if alpha == 0 {
                    continue;
                }

                let index = (pixel_y as u32 * self.width + pixel_x as u32) as usize;
                if let Some(pixel) = self.buffer.get_mut(index) {
                    *pixel = blend(*pixel, color, alpha);
                }
            }
        }
    }
}

/// 按 alpha 混合两个 0x00RRGGBB 颜色
pub fn blend(background: u32, foreground: u32, alpha: u8) -> u32 {
    let a = alpha as u32;
    let mix = |shift: u32| {
        let bg = (background >> shift) & 0xFF;
        let fg = (foreground >> shift) & 0xFF;
        ((fg * a + bg * (255 - a)) / 255) << shift
    };
    mix(16) | mix(8) | mix(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_extremes() {
        assert_eq!(blend(0xFFFFFF, 0x000000, 255), 0x000000);
        assert_eq!(blend(0xFFFFFF, 0x000000, 0), 0xFFFFFF);
        assert_eq!(blend(0x000000, 0xFF0000, 255), 0xFF0000);
    }

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut buffer = vec![0u32; 16];
        let mut canvas = Canvas::new(&mut buffer, 4, 4);
        canvas.fill_rect(Rect::new(2.0, 2.0, 10.0, 10.0), 7);

        assert_eq!(buffer.iter().filter(|&&p| p == 7).count(), 4);
        assert_eq!(buffer[2 * 4 + 2], 7);
        assert_eq!(buffer[0], 0);
    }

    #[test]
    fn test_stroke_rect_leaves_interior() {
        let mut buffer = vec![0u32; 25];
        let mut canvas = Canvas::new(&mut buffer, 5, 5);
        canvas.stroke_rect(Rect::new(0.0, 0.0, 5.0, 5.0), 1);

        assert_eq!(buffer[2 * 5 + 2], 0);
        assert_eq!(buffer[0], 1);
        assert_eq!(buffer[24], 1);
    }
}
