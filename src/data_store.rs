//! 内存数据与持久化之间的读写

use crate::errors::Result;
use crate::models::{AppData, PersistedAppData, Prompt};
use crate::storage::{DATA_KEY, KeyValueStore, load_value, store_value};

#[derive(Debug, Default)]
pub struct DataStore {
    data: AppData,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    /// 从存储加载；失败时记录日志并保持调用前的数据
    pub fn load(&mut self, store: &dyn KeyValueStore) {
        match self.read(store) {
            Ok(Some(data)) => {
                tracing::debug!(
                    folders = data.folders.len(),
                    prompts = data.prompts.len(),
                    "Data loaded"
                );
                self.data = data;
            }
            Ok(None) => tracing::debug!("No saved data, using defaults"),
            Err(err) => tracing::error!("Error loading data: {err}"),
        }
    }

    fn read(&self, store: &dyn KeyValueStore) -> Result<Option<AppData>> {
        let record: Option<PersistedAppData> = load_value(store, DATA_KEY)?;
        Ok(record.map(AppData::merge_persisted))
    }

    /// 整体覆盖写入；失败只记录日志，内存与存储可能不一致
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match store_value(store, DATA_KEY, &self.data) {
            Ok(()) => tracing::info!("Data saved successfully"),
            Err(err) => tracing::error!("Error saving data: {err}"),
        }
    }

    /// 追加到末尾，保持插入顺序
    pub fn add_prompt(&mut self, prompt: Prompt) {
        self.data.prompts.push(prompt);
    }

    pub fn folder_name(&self, folder_id: i64) -> Option<&str> {
        self.data
            .find_folder(folder_id)
            .map(|folder| folder.name.as_str())
    }
}
