//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use crate::config::Config;
use crate::models::{Friend, FriendList};
use crate::split::SplitForm;

/// 应用状态
pub struct App {
    pub friends: FriendList,
    pub cursor: usize,
    pub mode: AppMode,
    pub message: Option<String>,
    pub default_image: String,
    pub currency: String,
}

/// 应用模式
///
/// "添加朋友" 与 "分账" 互斥，选中的朋友即分账表单对应的朋友
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    AddingFriend(FriendForm),
    SplittingBill(SplitForm),
}

/// 添加朋友表单
#[derive(Debug, Clone, PartialEq)]
pub struct FriendForm {
    pub name: String,
    pub image: String,
    pub focus: InputField,
}

/// 输入字段类型
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputField {
    Name,
    Image,
}

impl FriendForm {
    pub fn new(default_image: &str) -> Self {
        Self {
            name: String::new(),
            image: default_image.to_string(),
            focus: InputField::Name,
        }
    }

    pub fn focused_buffer(&mut self) -> &mut String {
        match self.focus {
            InputField::Name => &mut self.name,
            InputField::Image => &mut self.image,
        }
    }

    pub fn switch_field(&mut self) {
        self.focus = match self.focus {
            InputField::Name => InputField::Image,
            InputField::Image => InputField::Name,
        };
    }
}

impl App {
    /// 创建新的应用实例
    pub fn new(config: Config) -> Self {
        Self {
            friends: FriendList::from_seed(config.friends),
            cursor: 0,
            mode: AppMode::Normal,
            message: None,
            default_image: config.default_image,
            currency: config.currency,
        }
    }

    /// 光标所在的朋友
    pub fn friend_under_cursor(&self) -> Option<&Friend> {
        self.friends.at(self.cursor)
    }

    /// 当前选中的朋友 ID
    pub fn selected_id(&self) -> Option<&str> {
        match &self.mode {
            AppMode::SplittingBill(form) => Some(form.friend_id.as_str()),
            _ => None,
        }
    }

    /// 当前选中的朋友
    pub fn selected_friend(&self) -> Option<&Friend> {
        self.selected_id().and_then(|id| self.friends.get(id))
    }

    /// 添加朋友表单是否打开
    pub fn is_adding_friend(&self) -> bool {
        matches!(self.mode, AppMode::AddingFriend(_))
    }
}
