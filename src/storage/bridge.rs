use tracing::debug;

use crate::storage::KeyValueStore;

/// 编辑区文本
pub const CONTENT_KEY: &str = "content";
/// 选中的字体族
pub const FAMILY_KEY: &str = "selectedFont";
/// 选中的变体
pub const VARIANT_KEY: &str = "selectedVariant";

/// 持久化桥：包装本地存储中的三个具名槽位
pub struct PersistenceBridge<S> {
    store: S,
}

impl<S: KeyValueStore> PersistenceBridge<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn family(&self) -> String {
        self.read(FAMILY_KEY)
    }

    pub fn variant(&self) -> String {
        self.read(VARIANT_KEY)
    }

    pub fn content(&self) -> String {
        self.read(CONTENT_KEY)
    }

    pub fn set_family(&mut self, family: &str) {
        self.store.set(FAMILY_KEY, family);
    }

    pub fn set_variant(&mut self, variant: &str) {
        self.store.set(VARIANT_KEY, variant);
    }

    pub fn set_content(&mut self, content: &str) {
        self.store.set(CONTENT_KEY, content);
    }

    /// 删除三个键（而不是写入空串）
    pub fn clear(&mut self) {
        debug!("清除本地保存的选择与文本");
        self.store.remove(CONTENT_KEY);
        self.store.remove(FAMILY_KEY);
        self.store.remove(VARIANT_KEY);
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn read(&self, key: &str) -> String {
        self.store.get(key).unwrap_or_default()
    }
}
