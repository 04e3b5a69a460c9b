//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::{App, AppMode};

/// 根据当前模式和按键获取对应的 Action
pub fn get_action(mode: &AppMode, key: KeyCode) -> Option<Action> {
    match mode {
        AppMode::Normal => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
            KeyCode::Char('a') => Some(Action::StartAddPrompt),
            KeyCode::Char('t') => Some(Action::ToggleTheme),
            _ => None,
        },
        AppMode::AddingPrompt => match key {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Tab => Some(Action::NextField),
            KeyCode::BackTab => Some(Action::PrevField),
            KeyCode::Right => Some(Action::NextFolder),
            KeyCode::Left => Some(Action::PrevFolder),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
    }
}

/// 处理按键事件，返回 true 表示退出
pub fn handle_key_event(app: &mut App, key: KeyCode) -> bool {
    match get_action(&app.mode, key) {
        Some(action) => app.dispatch(action),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_mode_keys() {
        let mode = AppMode::Normal;
        assert_eq!(get_action(&mode, KeyCode::Char('t')), Some(Action::ToggleTheme));
        assert_eq!(get_action(&mode, KeyCode::Char('a')), Some(Action::StartAddPrompt));
        assert_eq!(get_action(&mode, KeyCode::Char('x')), None);
    }

    #[test]
    fn test_dialog_keys_capture_text() {
        let mode = AppMode::AddingPrompt;
        assert_eq!(get_action(&mode, KeyCode::Char('q')), Some(Action::Input('q')));
        assert_eq!(get_action(&mode, KeyCode::Esc), Some(Action::Cancel));
        assert_eq!(get_action(&mode, KeyCode::BackTab), Some(Action::PrevField));
    }
}
