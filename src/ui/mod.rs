//! 分账 UI 模块
//!
//! 采用 MVI (Model-View-Intent) 架构：
//! - Model (state.rs): App 持有朋友账本和唯一的 AppMode（浏览 / 添加朋友 / 分账）
//! - Update (logic.rs): 添加、选中、分账等状态转换
//! - View (view/): 纯函数，把账本和表单画到终端
//! - Intent (actions.rs, input.rs): 按键转化为语义化 Action

pub mod actions;
pub mod input;
pub mod logic;
pub mod state;
pub mod view;

pub use input::handle_key_event;
pub use state::App;
pub use view::render;
