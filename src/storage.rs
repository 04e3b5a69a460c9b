//! 键值存储适配层
//!
//! 两个实现拥有相同的接口，启动时根据数据目录是否可用选定其一。

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use toml::{Table, Value};

use crate::config::Config;
use crate::errors::{Result, StorageError};

pub const DATA_KEY: &str = "promptOrganizerData";
pub const THEME_KEY: &str = "promptOrganizerTheme";

const STORE_FILE_NAME: &str = "storage.toml";

/// 异步宿主存储在此处表现为同步调用，调用顺序即完成顺序
pub trait KeyValueStore {
    /// 从未写入过的键返回 `Ok(None)`
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
}

/// 读取并反序列化为指定类型
pub fn load_value<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(value) => Ok(Some(value.try_into()?)),
        None => Ok(None),
    }
}

/// 序列化并整体覆盖写入
pub fn store_value<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let value = Value::try_from(value)?;
    store.set(key, value)
}

/// 单个 TOML 文件，每个键是一个顶层条目
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<Table> {
        if !self.path.exists() {
            return Ok(Table::new());
        }

        let content = fs::read_to_string(&self.path)?;
        Ok(content.parse::<Table>()?)
    }

    /// 损坏的文件移到 `<name>.corrupt`，之后的写入从空表开始
    fn quarantine(&self) -> Result<()> {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from(STORE_FILE_NAME));
        name.push(".corrupt");
        fs::rename(&self.path, self.path.with_file_name(name))?;
        Ok(())
    }

    /// 先写同目录临时文件再替换，原文件要么完整保留要么被完整替换
    fn write_atomic(&self, content: &str) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_table()?.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let mut table = match self.read_table() {
            Ok(table) => table,
            Err(StorageError::Decode(err)) => {
                tracing::warn!(
                    "{} is unreadable ({err}), moving it aside and starting fresh",
                    self.path.display()
                );
                self.quarantine()?;
                Table::new()
            }
            Err(err) => return Err(err),
        };
        table.insert(key.to_string(), value);

        let content = toml::to_string_pretty(&table)?;
        self.write_atomic(&content)
    }
}

/// 进程内存储，退出即丢失
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: Table,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.table.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.table.insert(key.to_string(), value);
        Ok(())
    }
}

/// 选择存储实现：数据目录可用时用文件，否则退回内存
///
/// 目录由 `Config::ensure_data_dir` 事先创建，创建失败时 data_dir 已被清空。
pub fn open_store(config: &Config) -> Box<dyn KeyValueStore> {
    let Some(dir) = &config.data_dir else {
        tracing::warn!("No data directory available, prompts will not be persisted");
        return Box::new(MemoryStore::new());
    };

    let store = FileStore::new(dir.join(STORE_FILE_NAME));
    tracing::debug!("Using file storage at {}", store.path().display());
    Box::new(store)
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// 可模拟读写失败的存储
    #[derive(Debug, Default)]
    pub struct FlakyStore {
        pub inner: MemoryStore,
        pub fail_reads: bool,
        pub fail_writes: bool,
        pub writes: usize,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<Value>> {
            if self.fail_reads {
                return Err(StorageError::Io(std::io::Error::other("read refused")));
            }
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: Value) -> Result<()> {
            if self.fail_writes {
                return Err(StorageError::Io(std::io::Error::other("write refused")));
            }
            self.writes += 1;
            self.inner.set(key, value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppData, Folder};

    #[test]
    fn test_file_store_missing_file_reads_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("storage.toml"));

        assert!(store.get(DATA_KEY).unwrap().is_none());
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested").join("storage.toml"));

        store_value(&mut store, THEME_KEY, &"dark").unwrap();
        store_value(&mut store, DATA_KEY, &AppData::default()).unwrap();

        let reopened = FileStore::new(store.path().to_path_buf());
        let theme: Option<String> = load_value(&reopened, THEME_KEY).unwrap();
        let data: Option<AppData> = load_value(&reopened, DATA_KEY).unwrap();

        assert_eq!(theme.as_deref(), Some("dark"));
        assert_eq!(data, Some(AppData::default()));
    }

    #[test]
    fn test_file_store_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.toml");
        fs::write(&path, "this is = = not toml").unwrap();

        let store = FileStore::new(path);
        assert!(store.get(DATA_KEY).is_err());
    }

    #[test]
    fn test_set_recovers_from_truncated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.toml");
        let mut store = FileStore::new(path.clone());
        store_value(&mut store, THEME_KEY, &"dark").unwrap();
        store_value(&mut store, DATA_KEY, &AppData::default()).unwrap();

        // 模拟写到一半中断
        let content = fs::read_to_string(&path).unwrap();
        let cut = content.find("Uncategorized").unwrap() + 5;
        fs::write(&path, &content[..cut]).unwrap();
        assert!(store.get(DATA_KEY).is_err());

        store_value(&mut store, THEME_KEY, &"light").unwrap();
        store_value(&mut store, DATA_KEY, &AppData::default()).unwrap();

        let theme: Option<String> = load_value(&store, THEME_KEY).unwrap();
        let data: Option<AppData> = load_value(&store, DATA_KEY).unwrap();
        assert_eq!(theme.as_deref(), Some("light"));
        assert_eq!(data, Some(AppData::default()));
        assert!(dir.path().join("storage.toml.corrupt").exists());
    }

    #[test]
    fn test_set_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("storage.toml"));
        store_value(&mut store, THEME_KEY, &"dark").unwrap();
        store_value(&mut store, THEME_KEY, &"light").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, [OsString::from("storage.toml")]);
    }

    #[test]
    fn test_memory_store_overwrites() {
        let mut store = MemoryStore::new();
        let mut data = AppData::default();
        store_value(&mut store, DATA_KEY, &data).unwrap();

        data.folders.push(Folder {
            id: 1,
            name: "Work".to_string(),
        });
        store_value(&mut store, DATA_KEY, &data).unwrap();

        let loaded: AppData = load_value(&store, DATA_KEY).unwrap().unwrap();
        assert_eq!(loaded.folders.len(), 2);
    }

    #[test]
    fn test_open_store_selects_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: Some(dir.path().join("po")),
            log_level: "info".to_string(),
        };

        let mut store = open_store(&config);
        store_value(store.as_mut(), THEME_KEY, &"light").unwrap();

        assert!(dir.path().join("po").join("storage.toml").exists());
    }

    #[test]
    fn test_open_store_without_dir_uses_memory() {
        let config = Config {
            data_dir: None,
            log_level: "info".to_string(),
        };

        let mut store = open_store(&config);
        store_value(store.as_mut(), THEME_KEY, &"dark").unwrap();
        let theme: Option<String> = load_value(store.as_ref(), THEME_KEY).unwrap();
        assert_eq!(theme.as_deref(), Some("dark"));
    }
}
