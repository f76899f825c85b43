use tracing::{debug, info, warn};

use crate::catalog::{
    CatalogEvent, FontCatalog, FontFaceRule, derive_font_face, font_family_css, is_italic_variant,
};
use crate::editor::Selection;
use crate::storage::{KeyValueStore, PersistenceBridge};

/// 字体编辑器状态机
///
/// 持有字体清单、当前选择、编辑区文本和持久化桥。所有状态变更都在
/// 界面线程上按顺序发生。
pub struct FontEditor<S> {
    catalog: FontCatalog,
    variants: Vec<String>,
    selection: Selection,
    content: String,
    fetch_error: Option<String>,
    persistence: PersistenceBridge<S>,
}

impl<S: KeyValueStore> FontEditor<S> {
    /// 创建编辑器，并从本地存储恢复编辑区文本
    pub fn new(store: S) -> Self {
        let persistence = PersistenceBridge::new(store);
        let content = persistence.content();

        Self {
            catalog: FontCatalog::default(),
            variants: Vec::new(),
            selection: Selection::default(),
            content,
            fetch_error: None,
            persistence,
        }
    }

    /// 处理清单加载事件，返回状态是否变化
    pub fn apply_catalog_event(&mut self, event: CatalogEvent) -> bool {
        match event {
            CatalogEvent::Pending => false,
            CatalogEvent::Loaded(catalog) => {
                self.load_catalog(catalog);
                true
            }
            CatalogEvent::Failed(message) => {
                self.fail_catalog(message);
                true
            }
        }
    }

    /// 清单加载成功：替换清单、清除错误，然后恢复上次的选择
    pub fn load_catalog(&mut self, catalog: FontCatalog) {
        self.catalog = catalog;
        self.fetch_error = None;
        self.restore_family();
        self.restore_variant();
    }

    /// 清单加载失败：保留原清单，记录面向用户的提示
    pub fn fail_catalog(&mut self, message: impl Into<String>) {
        self.fetch_error = Some(message.into());
    }

    /// 第一步：保存的字体族仍在清单中时，派生变体列表与斜体可用性，不自动选变体
    fn restore_family(&mut self) {
        if !self.selection.family.is_empty() {
            return;
        }

        let stored_family = self.persistence.family();
        if stored_family.is_empty() || !self.catalog.contains_family(&stored_family) {
            return;
        }

        self.variants = self.catalog.variant_names(&stored_family);
        self.selection.set_family(&stored_family, &self.variants);
        debug!("恢复字体族: {}", stored_family);
    }

    /// 第二步：从本地存储恢复变体，而不是取清单中的第一个
    fn restore_variant(&mut self) {
        if self.selection.family.is_empty() || !self.selection.variant.is_empty() {
            return;
        }

        let stored_variant = self.persistence.variant();
        if self.variants.contains(&stored_variant) {
            self.selection.set_variant(&stored_variant);
            debug!("恢复变体: {}", stored_variant);
        } else if !stored_variant.is_empty() {
            warn!("保存的变体 {} 不属于字体族 {}，忽略", stored_variant, self.selection.family);
        }
    }

    /// 选择字体族
    pub fn select_family(&mut self, name: &str) {
        if name.is_empty() {
            self.variants.clear();
            self.selection.clear();
            return;
        }

        if !self.catalog.contains_family(name) {
            warn!("清单中没有字体族: {}", name);
            self.variants.clear();
            self.selection.clear();
            self.selection.family = name.to_string();
            return;
        }

        self.variants = self.catalog.variant_names(name);
        self.selection.set_family(name, &self.variants);

        let first_variant = self.variants.first().cloned().unwrap_or_default();
        self.selection.set_variant(&first_variant);

        self.persistence.set_family(name);
        self.persistence.set_variant(&first_variant);
        info!("选择字体: {} / {}", name, first_variant);
    }

    /// 选择变体
    pub fn select_variant(&mut self, name: &str) {
        self.selection.set_variant(name);
        self.persistence.set_variant(name);
        debug!("选择变体: {}", name);
    }

    /// 切换斜体
    ///
    /// 在变体列表中查找斜体状态相反的第一个变体并选中它；找不到时什么也不改，
    /// 斜体标志始终与所选变体一致。
    pub fn toggle_italic(&mut self) {
        if !self.selection.italic_available {
            return;
        }

        let want_italic = !self.selection.italic_on;
        let target = self
            .variants
            .iter()
            .find(|variant| is_italic_variant(variant) == want_italic)
            .cloned();

        match target {
            Some(variant) => self.select_variant(&variant),
            None => debug!("没有可切换的{}变体", if want_italic { "斜体" } else { "非斜体" }),
        }
    }

    /// 清空：文本、选择全部清除，并删除三个持久化键
    pub fn reset(&mut self) {
        self.content.clear();
        self.variants.clear();
        self.selection.clear();
        self.persistence.clear();
        info!("编辑器已清空");
    }

    /// 保存：原样写入当前字体族与变体，不包括文本
    pub fn save(&mut self) {
        self.persistence.set_family(&self.selection.family);
        self.persistence.set_variant(&self.selection.variant);
        info!("保存选择: {} / {}", self.selection.family, self.selection.variant);
    }

    /// 在末尾插入文本
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.content.push_str(text);
        self.persistence.set_content(&self.content);
    }

    /// 删除末尾一个字符
    pub fn delete_backward(&mut self) {
        if self.content.pop().is_some() {
            self.persistence.set_content(&self.content);
        }
    }

    /// 整体替换文本
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.persistence.set_content(&self.content);
    }

    pub fn catalog(&self) -> &FontCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn family(&self) -> &str {
        &self.selection.family
    }

    pub fn variant(&self) -> &str {
        &self.selection.variant
    }

    pub fn italic_on(&self) -> bool {
        self.selection.italic_on
    }

    pub fn italic_available(&self) -> bool {
        self.selection.italic_available
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_deref()
    }

    /// 字体族下拉选项（不含占位项）
    pub fn family_options(&self) -> Vec<&str> {
        self.catalog.family_names().collect()
    }

    /// 变体下拉选项
    pub fn variant_options(&self) -> &[String] {
        &self.variants
    }

    pub fn variant_picker_enabled(&self) -> bool {
        !self.selection.family.is_empty()
    }

    pub fn italic_toggle_enabled(&self) -> bool {
        self.selection.italic_available
    }

    /// 由当前选择派生的字体规则
    pub fn font_face_rule(&self) -> Option<FontFaceRule> {
        derive_font_face(&self.catalog, &self.selection.family, &self.selection.variant)
    }

    /// 编辑区的 font-family 取值
    pub fn editor_font_family(&self) -> String {
        if self.selection.family.is_empty() {
            "sans-serif".to_string()
        } else {
            font_family_css(&self.selection.family)
        }
    }

    pub fn store(&self) -> &S {
        self.persistence.store()
    }

    pub fn into_store(self) -> S {
        self.persistence.into_store()
    }
}
