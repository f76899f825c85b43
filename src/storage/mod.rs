pub mod memory;
pub mod file;
pub mod bridge;

pub use memory::MemoryStore;
pub use file::FileStore;
pub use bridge::{PersistenceBridge, CONTENT_KEY, FAMILY_KEY, VARIANT_KEY};

/// 本地键值存储能力
///
/// 写入与删除为"发出即忘"：实现自行记录失败，不向调用方报告。
pub trait KeyValueStore {
    /// 读取键值，不存在时返回 None
    fn get(&self, key: &str) -> Option<String>;

    /// 写入键值（无条件覆盖）
    fn set(&mut self, key: &str, value: &str);

    /// 删除键
    fn remove(&mut self, key: &str);
}
