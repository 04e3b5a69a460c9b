//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    MoveSelectionUp,
    MoveSelectionDown,

    ToggleTheme,
    StartAddPrompt,

    // 对话框交互
    Cancel,      // Esc
    Submit,      // Enter
    NextField,   // Tab
    PrevField,   // Shift+Tab
    NextFolder,  // →
    PrevFolder,  // ←
    Input(char), // 输入字符
    DeleteChar,  // Backspace
}
