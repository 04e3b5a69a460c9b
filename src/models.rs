use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// 默认文件夹 ID
pub const DEFAULT_FOLDER_ID: i64 = 0;
pub const DEFAULT_FOLDER_NAME: &str = "Uncategorized";

/// 文件夹
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: i64,
    pub name: String,
}

impl Folder {
    pub fn uncategorized() -> Self {
        Self {
            id: DEFAULT_FOLDER_ID,
            name: DEFAULT_FOLDER_NAME.to_string(),
        }
    }
}

/// 提示词
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    /// 创建时的毫秒时间戳，假定唯一
    pub id: i64,
    pub title: String,
    pub body: String,
    /// 不做校验，可能指向不存在的文件夹
    pub folder_id: i64,
    /// ISO-8601
    pub date_created: String,
}

impl Prompt {
    pub fn new(title: String, body: String, folder_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            id: now.timestamp_millis(),
            title,
            body,
            folder_id,
            date_created: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date_created)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// 持久化单元：全部文件夹与提示词
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    pub folders: Vec<Folder>,
    pub prompts: Vec<Prompt>,
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            folders: vec![Folder::uncategorized()],
            prompts: Vec::new(),
        }
    }
}

impl AppData {
    /// 合并持久化记录：文件夹为空时重置为默认文件夹
    pub fn merge_persisted(record: PersistedAppData) -> Self {
        let folders = if record.folders.is_empty() {
            vec![Folder::uncategorized()]
        } else {
            record.folders
        };

        Self {
            folders,
            prompts: record.prompts,
        }
    }

    pub fn find_folder(&self, folder_id: i64) -> Option<&Folder> {
        self.folders.iter().find(|folder| folder.id == folder_id)
    }
}

/// 从存储读出的原始记录，字段允许缺失
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersistedAppData {
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub prompts: Vec<Prompt>,
}

/// 主题
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// 只有 "dark" 是深色，其他任何值都按浅色处理
    pub fn from_stored(value: &str) -> Self {
        if value == "dark" { Theme::Dark } else { Theme::Light }
    }

    pub fn opposite(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_app_data() {
        let data = AppData::default();
        assert_eq!(data.folders, vec![Folder::uncategorized()]);
        assert!(data.prompts.is_empty());
    }

    #[test]
    fn test_merge_empty_folders_resets_default() {
        let record = PersistedAppData {
            folders: Vec::new(),
            prompts: Vec::new(),
        };
        let data = AppData::merge_persisted(record);
        assert_eq!(data.folders.len(), 1);
        assert_eq!(data.folders[0].id, DEFAULT_FOLDER_ID);
        assert_eq!(data.folders[0].name, "Uncategorized");
    }

    #[test]
    fn test_merge_keeps_folders_in_order() {
        let folders = vec![
            Folder {
                id: 7,
                name: "Work".to_string(),
            },
            Folder {
                id: 3,
                name: "Personal".to_string(),
            },
        ];
        let record = PersistedAppData {
            folders: folders.clone(),
            prompts: Vec::new(),
        };
        assert_eq!(AppData::merge_persisted(record).folders, folders);
    }

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let record: PersistedAppData = toml::from_str("").unwrap();
        assert!(record.folders.is_empty());
        assert!(record.prompts.is_empty());
    }

    #[test]
    fn test_prompt_uses_camel_case_keys() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let prompt = Prompt::new("T".to_string(), "B".to_string(), 0, now);
        let encoded = toml::to_string(&prompt).unwrap();

        assert!(encoded.contains("folderId = 0"));
        assert!(encoded.contains("dateCreated = \"2024-03-01T12:30:00.000Z\""));
        assert_eq!(prompt.id, now.timestamp_millis());
        assert_eq!(prompt.created_at(), Some(now));
    }

    #[test]
    fn test_theme_from_stored() {
        assert_eq!(Theme::from_stored("dark"), Theme::Dark);
        assert_eq!(Theme::from_stored("light"), Theme::Light);
        assert_eq!(Theme::from_stored("solarized"), Theme::Light);
        assert_eq!(Theme::Light.opposite().opposite(), Theme::Light);
    }
}
