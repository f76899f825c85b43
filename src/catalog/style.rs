use std::fmt;

use url::Url;

use crate::catalog::FontCatalog;

/// 字体文件格式（对应 @font-face 的 format() 提示）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFormat {
    Woff2,
    Woff,
    TrueType,
    OpenType,
}

impl FontFormat {
    /// 根据资源地址的扩展名推断格式，无法识别时按 woff2 处理
    pub fn from_url(url: &str) -> Self {
        let path = match Url::parse(url) {
            Ok(parsed) => parsed.path().to_string(),
            Err(_) => url.split(['?', '#']).next().unwrap_or(url).to_string(),
        };

        let extension = path
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "woff" => FontFormat::Woff,
            "ttf" => FontFormat::TrueType,
            "otf" => FontFormat::OpenType,
            _ => FontFormat::Woff2,
        }
    }

    pub fn as_css(&self) -> &'static str {
        match self {
            FontFormat::Woff2 => "woff2",
            FontFormat::Woff => "woff",
            FontFormat::TrueType => "truetype",
            FontFormat::OpenType => "opentype",
        }
    }
}

/// 由当前选择派生出的动态字体规则
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFaceRule {
    pub family: String,
    pub variant: String,
    pub src: String,
    pub format: FontFormat,
}

impl FontFaceRule {
    /// 生成 @font-face 样式文本
    pub fn to_css(&self) -> String {
        format!(
            "@font-face {{\n  font-family: '{}';\n  src: url({}) format('{}');\n  font-weight: normal;\n  font-style: normal;\n}}\n",
            self.family,
            self.src,
            self.format.as_css()
        )
    }
}

impl fmt::Display for FontFaceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// 纯函数：(清单, 字体族, 变体) -> 可选的字体规则
///
/// 任一为空或清单中查不到时返回 None，编辑区保持默认字体。
pub fn derive_font_face(catalog: &FontCatalog, family: &str, variant: &str) -> Option<FontFaceRule> {
    if catalog.is_empty() || family.is_empty() || variant.is_empty() {
        return None;
    }

    let src = catalog.asset_url(family, variant)?;

    Some(FontFaceRule {
        family: family.to_string(),
        variant: variant.to_string(),
        src: src.to_string(),
        format: FontFormat::from_url(src),
    })
}

/// 编辑区的 font-family 取值
pub fn font_family_css(family: &str) -> String {
    format!("{}, sans-serif", family)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roboto() -> FontCatalog {
        FontCatalog::new().with_family("Roboto", [("regular", "u1"), ("italic", "u2")])
    }

    #[test]
    fn test_rule_for_known_selection() {
        let rule = derive_font_face(&roboto(), "Roboto", "italic").unwrap();
        assert_eq!(rule.src, "u2");
        assert_eq!(rule.format, FontFormat::Woff2);

        let css = rule.to_css();
        assert!(css.contains("font-family: 'Roboto';"));
        assert!(css.contains("src: url(u2) format('woff2');"));
    }

    #[test]
    fn test_no_rule_for_incomplete_or_unknown_selection() {
        let catalog = roboto();
        assert_eq!(derive_font_face(&catalog, "", "regular"), None);
        assert_eq!(derive_font_face(&catalog, "Roboto", ""), None);
        assert_eq!(derive_font_face(&catalog, "Lato", "regular"), None);
        assert_eq!(derive_font_face(&catalog, "Roboto", "bold"), None);
        assert_eq!(derive_font_face(&FontCatalog::new(), "Roboto", "regular"), None);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(FontFormat::from_url("https://x.test/a.ttf"), FontFormat::TrueType);
        assert_eq!(FontFormat::from_url("https://x.test/a.OTF?v=2"), FontFormat::OpenType);
        assert_eq!(FontFormat::from_url("/fonts/a.woff#frag"), FontFormat::Woff);
        assert_eq!(FontFormat::from_url("https://x.test/a.woff2"), FontFormat::Woff2);
        assert_eq!(FontFormat::from_url("https://x.test/font"), FontFormat::Woff2);
    }

    #[test]
    fn test_font_family_css() {
        assert_eq!(font_family_css("Roboto"), "Roboto, sans-serif");
    }
}
