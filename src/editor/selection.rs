use crate::catalog::{has_italic_variant, is_italic_variant};

/// 当前的字体选择
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// 字体族，空串表示未选择
    pub family: String,
    /// 变体，空串表示未选择
    pub variant: String,
    /// 当前变体是否为斜体
    pub italic_on: bool,
    /// 当前字体族是否存在斜体变体
    pub italic_available: bool,
}

impl Selection {
    /// 选中字体族，并由变体列表计算斜体可用性
    pub fn set_family(&mut self, family: &str, variants: &[String]) {
        self.family = family.to_string();
        self.italic_available = has_italic_variant(variants);
    }

    /// 选中变体，斜体状态随之派生
    pub fn set_variant(&mut self, variant: &str) {
        self.variant = variant.to_string();
        self.italic_on = is_italic_variant(variant);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_drives_italic_flag() {
        let mut selection = Selection::default();
        selection.set_variant("700italic");
        assert!(selection.italic_on);
        selection.set_variant("700");
        assert!(!selection.italic_on);
    }

    #[test]
    fn test_family_drives_availability() {
        let mut selection = Selection::default();
        selection.set_family("Roboto", &["regular".to_string(), "italic".to_string()]);
        assert!(selection.italic_available);
        selection.set_family("Abel", &["regular".to_string()]);
        assert!(!selection.italic_available);

        selection.set_variant("regular");
        assert_eq!(selection.variant, "regular");
        selection.clear();
        assert_eq!(selection, Selection::default());
    }
}
