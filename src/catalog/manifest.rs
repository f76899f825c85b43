use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::catalog::CatalogResult;

/// 变体名后缀，以此判断是否为斜体
pub const ITALIC_SUFFIX: &str = "italic";

/// 单个字体族的变体表：变体名 -> 字体文件URL
pub type VariantMap = IndexMap<String, String>;

/// 字体清单
///
/// 字体族名 -> 变体名 -> 资源URL，保留清单文档中的键顺序，
/// 因此"第一个变体"即 JSON 对象中的第一个键。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontCatalog {
    families: IndexMap<String, VariantMap>,
}

impl FontCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从清单JSON解析
    ///
    /// 整体校验：任一字体族的变体表不是对象（例如 `null`）时整个清单视为无效，
    /// 按加载失败处理，不会只丢弃该字体族。
    pub fn from_json(text: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// 添加一个字体族（测试与程序化构建使用）
    pub fn with_family<I, K, V>(mut self, family: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let variants = variants
            .into_iter()
            .map(|(name, url)| (name.into(), url.into()))
            .collect();
        self.families.insert(family.into(), variants);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// 所有字体族名（清单顺序）
    pub fn family_names(&self) -> impl Iterator<Item = &str> {
        self.families.keys().map(String::as_str)
    }

    pub fn contains_family(&self, family: &str) -> bool {
        self.families.contains_key(family)
    }

    /// 获取字体族的变体表
    pub fn variants(&self, family: &str) -> Option<&VariantMap> {
        self.families.get(family)
    }

    /// 获取字体族的变体名列表，不存在时为空
    pub fn variant_names(&self, family: &str) -> Vec<String> {
        self.variants(family)
            .map(|variants| variants.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// 查找字体文件URL
    pub fn asset_url(&self, family: &str, variant: &str) -> Option<&str> {
        self.variants(family)
            .and_then(|variants| variants.get(variant))
            .map(String::as_str)
    }

    /// 将相对资源URL解析为基于清单地址的绝对URL
    pub fn resolve_against(mut self, base: &Url) -> Self {
        for (family, variants) in self.families.iter_mut() {
            for (variant, url) in variants.iter_mut() {
                match base.join(url) {
                    Ok(resolved) => *url = resolved.to_string(),
                    Err(e) => warn!("无法解析字体资源地址 {}/{}: {} - {}", family, variant, url, e),
                }
            }
        }
        self
    }
}

/// 变体名是否表示斜体
pub fn is_italic_variant(variant: &str) -> bool {
    variant.ends_with(ITALIC_SUFFIX)
}

/// 变体列表中是否存在斜体
pub fn has_italic_variant<S: AsRef<str>>(variants: &[S]) -> bool {
    variants.iter().any(|variant| is_italic_variant(variant.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_document_order() {
        let json = r#"{
            "Roboto": {"regular": "u1", "italic": "u2", "700": "u3"},
            "Lato": {"300italic": "l1"},
            "Abel": {"regular": "a1"}
        }"#;
        let catalog = FontCatalog::from_json(json).unwrap();

        let families: Vec<&str> = catalog.family_names().collect();
        assert_eq!(families, vec!["Roboto", "Lato", "Abel"]);
        assert_eq!(catalog.variant_names("Roboto"), vec!["regular", "italic", "700"]);
        assert_eq!(catalog.asset_url("Lato", "300italic"), Some("l1"));
    }

    #[test]
    fn test_missing_lookups_are_empty() {
        let catalog = FontCatalog::new().with_family("Roboto", [("regular", "u1")]);

        assert!(catalog.variant_names("Nope").is_empty());
        assert_eq!(catalog.asset_url("Roboto", "italic"), None);
        assert_eq!(catalog.asset_url("Nope", "regular"), None);
    }

    #[test]
    fn test_malformed_manifest_is_rejected() {
        assert!(FontCatalog::from_json("[1, 2, 3]").is_err());
        assert!(FontCatalog::from_json("{\"Roboto\": \"oops\"}").is_err());
        assert!(FontCatalog::from_json(r#"{"Roboto": {"regular": "u1"}, "Bad": null}"#).is_err());
        assert!(FontCatalog::from_json("not json").is_err());
    }

    #[test]
    fn test_italic_suffix_detection() {
        assert!(is_italic_variant("italic"));
        assert!(is_italic_variant("700italic"));
        assert!(!is_italic_variant("regular"));
        assert!(!is_italic_variant("Italic"));
        assert!(!is_italic_variant("italic-bold"));

        assert!(has_italic_variant(&["regular", "300italic"]));
        assert!(!has_italic_variant(&["regular", "700"]));
        assert!(!has_italic_variant::<&str>(&[]));
    }

    #[test]
    fn test_resolve_relative_urls() {
        let catalog = FontCatalog::new().with_family(
            "Roboto",
            [
                ("regular", "/fonts/roboto-regular.woff2"),
                ("italic", "https://cdn.example.com/roboto-italic.woff2"),
            ],
        );
        let base = Url::parse("http://localhost:8080/fonts.json").unwrap();
        let resolved = catalog.resolve_against(&base);

        assert_eq!(
            resolved.asset_url("Roboto", "regular"),
            Some("http://localhost:8080/fonts/roboto-regular.woff2")
        );
        assert_eq!(
            resolved.asset_url("Roboto", "italic"),
            Some("https://cdn.example.com/roboto-italic.woff2")
        );
    }
}
