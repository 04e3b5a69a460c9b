//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑、启动加载和添加对话框的处理

use chrono::{DateTime, Utc};

use super::actions::Action;
use super::state::{App, AppMode};
use crate::models::{DEFAULT_FOLDER_ID, Prompt};

impl App {
    /// 核心逻辑分发，返回 true 表示退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),

            Action::ToggleTheme => self.toggle_theme(),
            Action::StartAddPrompt => self.start_add_prompt(),

            Action::Cancel => self.cancel(),
            Action::Submit => {
                if self.mode == AppMode::AddingPrompt {
                    self.submit_prompt(Utc::now());
                }
            }

            Action::NextField => self.form.focus = self.form.focus.next(),
            Action::PrevField => self.form.focus = self.form.focus.prev(),
            Action::NextFolder => self.cycle_folder(true),
            Action::PrevFolder => self.cycle_folder(false),

            Action::Input(c) => {
                if let Some(buffer) = self.form.focused_buffer() {
                    buffer.push(c);
                }
            }
            Action::DeleteChar => {
                if let Some(buffer) = self.form.focused_buffer() {
                    buffer.pop();
                }
            }
        }
        false
    }

    // ============ 启动 ============

    /// 加载数据，无论成功与否都重绘下拉框和列表
    pub fn load_data(&mut self) {
        self.data.load(self.store.as_ref());
        self.refresh_folder_dropdown();
        self.render_prompts();
    }

    pub fn load_theme(&mut self) {
        self.theme.load(self.store.as_ref());
    }

    // ============ 主题 ============

    pub fn toggle_theme(&mut self) {
        let theme = self.theme.toggle(self.store.as_mut());
        tracing::debug!("Theme switched to {}", theme.as_str());
    }

    // ============ 导航 ============

    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.prompt_list.len() {
            self.selected_index += 1;
        }
    }

    // ============ 添加对话框 ============

    /// 打开对话框，先清空表单
    pub fn start_add_prompt(&mut self) {
        self.form.reset();
        self.mode = AppMode::AddingPrompt;
        self.message = None;
    }

    /// 关闭对话框，不修改任何数据
    pub fn cancel(&mut self) {
        self.mode = AppMode::Normal;
        self.message = None;
    }

    fn cycle_folder(&mut self, forward: bool) {
        let count = self.folder_options.len();
        if count == 0 {
            return;
        }
        self.form.folder_index = if forward {
            (self.form.folder_index + 1) % count
        } else {
            (self.form.folder_index + count - 1) % count
        };
    }

    /// 读取选中项的文件夹 ID
    fn selected_folder_id(&self) -> i64 {
        let Some(option) = self.selected_folder_option() else {
            return DEFAULT_FOLDER_ID;
        };
        option.value.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid folder value {:?}, using default folder", option.value);
            DEFAULT_FOLDER_ID
        })
    }

    /// 提交表单：追加、保存、重绘列表、关闭对话框
    pub fn submit_prompt(&mut self, now: DateTime<Utc>) {
        let title = self.form.title.trim().to_string();
        let body = self.form.body.trim().to_string();
        let folder_id = self.selected_folder_id();

        self.data.add_prompt(Prompt::new(title, body, folder_id, now));

        self.data.save(self.store.as_mut());
        self.render_prompts();
        self.mode = AppMode::Normal;
        self.message = Some("Prompt added".to_string());
    }
}
