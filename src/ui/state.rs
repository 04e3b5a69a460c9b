//! App 状态定义 (Model)
//!
//! 弹窗会话内唯一的状态所有者：存储句柄、数据、主题、渲染结果和表单。

use crate::data_store::DataStore;
use crate::models::Prompt;
use crate::render::{self, FolderOption, PromptList};
use crate::storage::KeyValueStore;
use crate::theme::ThemeController;

/// 应用状态
pub struct App {
    pub store: Box<dyn KeyValueStore>,
    pub data: DataStore,
    pub theme: ThemeController,
    pub folder_options: Vec<FolderOption>,
    pub prompt_list: PromptList,
    pub selected_index: usize,
    pub mode: AppMode,
    pub form: PromptForm,
    pub message: Option<String>,
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    /// 添加对话框已打开
    AddingPrompt,
}

/// 表单中获得焦点的字段
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Title,
    Body,
    Folder,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Body,
            FormField::Body => FormField::Folder,
            FormField::Folder => FormField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::Folder,
            FormField::Body => FormField::Title,
            FormField::Folder => FormField::Body,
        }
    }
}

/// 添加对话框的字段值
#[derive(Debug, Clone, PartialEq)]
pub struct PromptForm {
    pub title: String,
    pub body: String,
    /// 在 folder_options 中的下标
    pub folder_index: usize,
    pub focus: FormField,
}

impl Default for PromptForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            folder_index: 0,
            focus: FormField::Title,
        }
    }
}

impl PromptForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn focused_buffer(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Body => Some(&mut self.body),
            FormField::Folder => None,
        }
    }
}

impl App {
    /// 创建新的应用实例；数据和主题需随后调用 load_data / load_theme
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        let data = DataStore::new();
        let folder_options = render::folder_options(data.data());
        let prompt_list = render::prompt_list(data.data());
        Self {
            store,
            data,
            theme: ThemeController::new(),
            folder_options,
            prompt_list,
            selected_index: 0,
            mode: AppMode::Normal,
            form: PromptForm::default(),
            message: None,
        }
    }

    /// 重建文件夹下拉框，选择回到第一项
    pub fn refresh_folder_dropdown(&mut self) {
        self.folder_options = render::folder_options(self.data.data());
        self.form.folder_index = 0;
    }

    /// 重建提示词列表
    pub fn render_prompts(&mut self) {
        self.prompt_list = render::prompt_list(self.data.data());

        // 确保选中索引有效
        if self.prompt_list.is_empty() {
            self.selected_index = 0;
        } else if self.selected_index >= self.prompt_list.len() {
            self.selected_index = self.prompt_list.len() - 1;
        }
    }

    /// 获取当前选中的提示词
    pub fn selected_prompt(&self) -> Option<&Prompt> {
        self.data.data().prompts.get(self.selected_index)
    }

    pub fn selected_folder_option(&self) -> Option<&FolderOption> {
        self.folder_options.get(self.form.folder_index)
    }
}
