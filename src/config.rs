//! 运行配置
//!
//! 全部来自环境变量，缺省时使用合理默认值。

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

pub const DATA_DIR_VAR: &str = "PROMPT_ORGANIZER_DATA_DIR";
pub const LOG_LEVEL_VAR: &str = "PROMPT_ORGANIZER_LOG";

const APP_DIR_NAME: &str = "prompt-organizer";
const LOG_FILE_NAME: &str = "prompt-organizer.log";

#[derive(Debug, Clone)]
pub struct Config {
    /// 数据目录；为 None 时只能使用内存存储
    pub data_dir: Option<PathBuf>,
    /// 日志级别过滤表达式 (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        let default_dir = dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME));
        Self::from_lookup(|key| env::var(key).ok(), default_dir)
    }

    /// 通过任意查找函数构造配置
    pub fn from_lookup<F>(lookup: F, default_data_dir: Option<PathBuf>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .or(default_data_dir);

        let log_level = lookup(LOG_LEVEL_VAR).unwrap_or_else(|| "info".to_string());

        Self {
            data_dir,
            log_level,
        }
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(|dir| dir.join(LOG_FILE_NAME))
    }

    /// 创建数据目录；失败时清空 data_dir，使存储退回内存且不写日志文件
    pub fn ensure_data_dir(&mut self) -> io::Result<()> {
        let Some(dir) = &self.data_dir else {
            return Ok(());
        };

        if let Err(err) = fs::create_dir_all(dir) {
            let err = io::Error::new(err.kind(), format!("{}: {err}", dir.display()));
            self.data_dir = None;
            return Err(err);
        }
        Ok(())
    }
}
