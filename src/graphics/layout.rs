/// 矩形区域（像素坐标）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// 向内收缩
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            (self.width - amount * 2.0).max(0.0),
            (self.height - amount * 2.0).max(0.0),
        )
    }
}

/// 下拉框
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dropdown {
    Family,
    Variant,
}

/// 点击命中的控件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Dropdown(Dropdown),
    /// 展开列表中的第 n 项
    DropdownOption(Dropdown, usize),
    ItalicToggle,
    Editor,
    Clear,
    Save,
    Nothing,
}

const MARGIN: f32 = 16.0;
const CONTROL_HEIGHT: f32 = 32.0;
const BUTTON_WIDTH: f32 = 96.0;
const BUTTON_HEIGHT: f32 = 36.0;

/// 下拉列表中每一项的高度
pub const OPTION_HEIGHT: f32 = 28.0;

/// 窗口内各控件的位置
#[derive(Debug, Clone, PartialEq)]
pub struct EditorLayout {
    pub error_line: Rect,
    pub heading: Rect,
    pub family_label: Rect,
    pub family_dropdown: Rect,
    pub variant_label: Rect,
    pub variant_dropdown: Rect,
    pub italic_label: Rect,
    pub italic_toggle: Rect,
    pub editor: Rect,
    pub clear_button: Rect,
    pub save_button: Rect,
}

impl EditorLayout {
    /// 按窗口尺寸计算布局
    pub fn compute(width: u32, height: u32) -> Self {
        let width = width as f32;
        let height = height as f32;

        let label_y = 64.0;
        let control_y = label_y + 20.0;

        let family_width = ((width - MARGIN * 2.0) * 0.38).max(120.0);
        let variant_width = ((width - MARGIN * 2.0) * 0.28).max(100.0);
        let family_dropdown = Rect::new(MARGIN, control_y, family_width, CONTROL_HEIGHT);
        let variant_dropdown = Rect::new(family_dropdown.right() + MARGIN, control_y, variant_width, CONTROL_HEIGHT);
        let italic_toggle = Rect::new(variant_dropdown.right() + MARGIN, control_y + 2.0, 56.0, CONTROL_HEIGHT - 4.0);

        let button_y = height - MARGIN - BUTTON_HEIGHT;
        let editor_y = control_y + CONTROL_HEIGHT + MARGIN;
        let editor_height = (button_y - MARGIN - editor_y).max(CONTROL_HEIGHT);

        Self {
            error_line: Rect::new(MARGIN, 6.0, width - MARGIN * 2.0, 22.0),
            heading: Rect::new(MARGIN, 30.0, width - MARGIN * 2.0, 28.0),
            family_label: Rect::new(family_dropdown.x, label_y, family_dropdown.width, 18.0),
            family_dropdown,
            variant_label: Rect::new(variant_dropdown.x, label_y, variant_dropdown.width, 18.0),
            variant_dropdown,
            italic_label: Rect::new(italic_toggle.x, label_y, 80.0, 18.0),
            italic_toggle,
            editor: Rect::new(MARGIN, editor_y, width - MARGIN * 2.0, editor_height),
            clear_button: Rect::new(width - MARGIN * 2.0 - BUTTON_WIDTH * 2.0, button_y, BUTTON_WIDTH, BUTTON_HEIGHT),
            save_button: Rect::new(width - MARGIN - BUTTON_WIDTH, button_y, BUTTON_WIDTH, BUTTON_HEIGHT),
        }
    }

    pub fn dropdown_rect(&self, dropdown: Dropdown) -> Rect {
        match dropdown {
            Dropdown::Family => self.family_dropdown,
            Dropdown::Variant => self.variant_dropdown,
        }
    }

    /// 展开列表中第 index 项的位置
    pub fn option_rect(&self, dropdown: Dropdown, index: usize) -> Rect {
        let anchor = self.dropdown_rect(dropdown);
        Rect::new(
            anchor.x,
            anchor.bottom() + index as f32 * OPTION_HEIGHT,
            anchor.width,
            OPTION_HEIGHT,
        )
    }

    /// 命中测试，展开的下拉列表覆盖在其它控件之上
    pub fn hit_test(&self, x: f32, y: f32, open: Option<(Dropdown, usize)>) -> HitTarget {
        if let Some((dropdown, count)) = open {
            for index in 0..count {
                if self.option_rect(dropdown, index).contains(x, y) {
                    return HitTarget::DropdownOption(dropdown, index);
                }
            }
        }

        if self.family_dropdown.contains(x, y) {
            HitTarget::Dropdown(Dropdown::Family)
        } else if self.variant_dropdown.contains(x, y) {
            HitTarget::Dropdown(Dropdown::Variant)
        } else if self.italic_toggle.contains(x, y) {
            HitTarget::ItalicToggle
        } else if self.editor.contains(x, y) {
            HitTarget::Editor
        } else if self.clear_button.contains(x, y) {
            HitTarget::Clear
        } else if self.save_button.contains(x, y) {
            HitTarget::Save
        } else {
            HitTarget::Nothing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center(rect: Rect) -> (f32, f32) {
        (rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
    }

    #[test]
    fn test_controls_do_not_overlap() {
        let layout = EditorLayout::compute(720, 480);
        let targets = [
            (layout.family_dropdown, HitTarget::Dropdown(Dropdown::Family)),
            (layout.variant_dropdown, HitTarget::Dropdown(Dropdown::Variant)),
            (layout.italic_toggle, HitTarget::ItalicToggle),
            (layout.editor, HitTarget::Editor),
            (layout.clear_button, HitTarget::Clear),
            (layout.save_button, HitTarget::Save),
        ];

        for (rect, expected) in targets {
            let (x, y) = center(rect);
            assert_eq!(layout.hit_test(x, y, None), expected);
        }
        assert_eq!(layout.hit_test(1.0, 1.0, None), HitTarget::Nothing);
    }

    #[test]
    fn test_open_dropdown_covers_editor() {
        let layout = EditorLayout::compute(720, 480);
        let (x, y) = center(layout.option_rect(Dropdown::Family, 2));

        assert_eq!(layout.hit_test(x, y, None), HitTarget::Editor);
        assert_eq!(
            layout.hit_test(x, y, Some((Dropdown::Family, 3))),
            HitTarget::DropdownOption(Dropdown::Family, 2)
        );
        // 超出选项数量的位置仍落到下层控件
        assert_eq!(layout.hit_test(x, y, Some((Dropdown::Family, 2))), HitTarget::Editor);
    }

    #[test]
    fn test_rect_inset_and_contains() {
        let rect = Rect::new(10.0, 10.0, 20.0, 10.0);
        assert!(rect.contains(10.0, 10.0));
        assert!(!rect.contains(30.0, 15.0));
        assert_eq!(rect.inset(2.0), Rect::new(12.0, 12.0, 16.0, 6.0));
        assert_eq!(rect.inset(20.0).width, 0.0);
    }
}
