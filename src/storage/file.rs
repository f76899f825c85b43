use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::catalog::{CatalogError, CatalogResult};
use crate::storage::KeyValueStore;

/// 基于JSON文件的键值存储
///
/// 打开时读取一次，之后每次修改都同步重写整个文件。
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// 打开存储文件，文件不存在或已损坏时从空白开始
    pub fn open(path: impl Into<PathBuf>) -> CatalogResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| CatalogError::StorageError(format!("创建存储目录失败: {}", e)))?;
        }

        let entries = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(entries) => entries,
                    Err(e) => {
                        warn!("存储文件已损坏，忽略原有内容: {} - {}", path.display(), e);
                        BTreeMap::new()
                    }
                },
                Err(e) => {
                    warn!("读取存储文件失败: {} - {}", path.display(), e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        debug!("本地存储: {:?} ({} 个键)", path, entries.len());

        Ok(Self { path, entries })
    }

    /// 默认存储路径
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .map(|mut path| {
                path.push("font_editor");
                path.push("storage.json");
                path
            })
            .unwrap_or_else(|| PathBuf::from("font_editor_storage.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) {
        let content = match serde_json::to_string_pretty(&self.entries) {
            Ok(content) => content,
            Err(e) => {
                warn!("序列化存储内容失败: {}", e);
                return;
            }
        };

        if let Err(e) = fs::write(&self.path, content) {
            warn!("写入存储文件失败: {} - {}", self.path.display(), e);
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("storage.json");

        {
            let mut store = FileStore::open(&path).unwrap();
            store.set("selectedFont", "Roboto");
            store.set("content", "多行\n文本");
            store.set("gone", "x");
            store.remove("gone");
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("selectedFont"), Some("Roboto".to_string()));
        assert_eq!(store.get("content"), Some("多行\n文本".to_string()));
        assert_eq!(store.get("gone"), None);
    }

    #[test]
    fn test_corrupt_file_opens_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("content"), None);

        store.set("content", "hello");
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("content"), Some("hello".to_string()));
    }
}
