//! 渲染层：从 AppData 生成文件夹选项和提示词卡片
//!
//! 每次调用都从头重建，不保留上一次的结果。

use crate::models::AppData;

pub const PLACEHOLDER_MESSAGE: &str = "No prompts found. Press [a] to add a new prompt!";
pub const UNKNOWN_FOLDER: &str = "Unknown";

const PREVIEW_CHARS: usize = 120;

/// 文件夹下拉框中的一项
#[derive(Debug, Clone, PartialEq)]
pub struct FolderOption {
    /// 文件夹 ID 的文本形式
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromptCard {
    pub title: String,
    pub folder_name: String,
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PromptList {
    Placeholder(&'static str),
    Cards(Vec<PromptCard>),
}

impl PromptList {
    pub fn len(&self) -> usize {
        match self {
            PromptList::Placeholder(_) => 0,
            PromptList::Cards(cards) => cards.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn folder_options(data: &AppData) -> Vec<FolderOption> {
    data.folders
        .iter()
        .map(|folder| FolderOption {
            value: folder.id.to_string(),
            label: escape_display(&folder.name),
        })
        .collect()
}

pub fn prompt_list(data: &AppData) -> PromptList {
    if data.prompts.is_empty() {
        return PromptList::Placeholder(PLACEHOLDER_MESSAGE);
    }

    let cards = data
        .prompts
        .iter()
        .map(|prompt| {
            let folder_name = data
                .find_folder(prompt.folder_id)
                .map(|folder| folder.name.as_str())
                .unwrap_or(UNKNOWN_FOLDER);

            PromptCard {
                title: escape_display(&prompt.title),
                folder_name: escape_display(folder_name),
                preview: body_preview(&prompt.body),
            }
        })
        .collect();

    PromptList::Cards(cards)
}

/// 取前 120 个字符并总是追加省略号
pub fn body_preview(body: &str) -> String {
    let cut: String = body.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", escape_display(&cut))
}

/// 用户输入按纯文本显示，控制字符转义后再交给终端
pub fn escape_display(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            escaped.extend(c.escape_default());
        } else {
            escaped.push(c);
        }
    }
    escaped
}
