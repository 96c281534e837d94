//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    MoveCursorUp,
    MoveCursorDown,

    // 触发特定功能
    ToggleAddFriend,
    SelectFriend,

    // 表单/通用交互
    NextField,
    PrevField,
    TogglePayer,
    Cancel,      // Esc
    Submit,      // Enter
    Input(char), // 输入字符
    DeleteChar,  // Backspace
}
