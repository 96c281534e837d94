//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑和账本的状态转换

use tracing::{debug, info};

use super::actions::Action;
use super::state::{App, AppMode, FriendForm};
use crate::error::LedgerError;
use crate::models::Friend;
use crate::split::SplitForm;

/// 选中切换：再次点击当前选中的朋友即取消选中
pub fn toggle_selection(current: Option<&str>, clicked: &str) -> Option<String> {
    if current == Some(clicked) {
        None
    } else {
        Some(clicked.to_string())
    }
}

impl App {
    /// 核心逻辑分发
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveCursorUp => self.move_up(),
            Action::MoveCursorDown => self.move_down(),

            Action::ToggleAddFriend => self.toggle_add_friend(),
            Action::SelectFriend => {
                if let Some(id) = self.friend_under_cursor().map(|f| f.id.clone()) {
                    let result = self.select_friend(&id);
                    self.log_rejection(result);
                }
            }

            Action::NextField => match &mut self.mode {
                AppMode::AddingFriend(form) => form.switch_field(),
                AppMode::SplittingBill(form) => form.focus = form.focus.next(),
                AppMode::Normal => {}
            },
            Action::PrevField => match &mut self.mode {
                AppMode::AddingFriend(form) => form.switch_field(),
                AppMode::SplittingBill(form) => form.focus = form.focus.prev(),
                AppMode::Normal => {}
            },
            Action::TogglePayer => {
                if let AppMode::SplittingBill(form) = &mut self.mode {
                    form.payer = form.payer.toggle();
                }
            }

            Action::Cancel => self.cancel(),

            Action::Submit => match &self.mode {
                AppMode::AddingFriend(form) => {
                    let (name, image) = (form.name.clone(), form.image.clone());
                    let result = self.add_friend(name, image).map(|_| ());
                    self.log_rejection(result);
                }
                AppMode::SplittingBill(form) => {
                    let delta = form.delta();
                    let result = delta.and_then(|delta| self.split_bill(delta)).map(|_| ());
                    self.log_rejection(result);
                }
                AppMode::Normal => {}
            },

            Action::Input(c) => match &mut self.mode {
                AppMode::AddingFriend(form) => form.focused_buffer().push(c),
                AppMode::SplittingBill(form) => {
                    if !form.input_char(c) {
                        debug!(input = %c, "input ignored");
                    }
                }
                AppMode::Normal => {}
            },

            Action::DeleteChar => match &mut self.mode {
                AppMode::AddingFriend(form) => {
                    form.focused_buffer().pop();
                }
                AppMode::SplittingBill(form) => form.delete_char(),
                AppMode::Normal => {}
            },
        }
        false
    }

    // ============ 导航相关 ============

    /// 向上移动光标
    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// 向下移动光标
    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.friends.len() {
            self.cursor += 1;
        }
    }

    // ============ 账本操作 ============

    /// 打开/关闭添加朋友表单，打开时清除选中
    pub fn toggle_add_friend(&mut self) {
        self.mode = if self.is_adding_friend() {
            AppMode::Normal
        } else {
            AppMode::AddingFriend(FriendForm::new(&self.default_image))
        };
        self.message = None;
    }

    /// 添加朋友，余额从 0 开始
    pub fn add_friend(&mut self, name: String, image: String) -> Result<Friend, LedgerError> {
        if name.is_empty() {
            return Err(LedgerError::EmptyName);
        }
        if image.is_empty() {
            return Err(LedgerError::EmptyImage);
        }

        let friend = Friend::new(name, image);
        self.friends.push(friend.clone())?;
        info!(id = %friend.id, name = %friend.name, "friend added");

        if self.is_adding_friend() {
            self.mode = AppMode::Normal;
        }
        self.message = Some(format!("已添加 {}", friend.name));
        Ok(friend)
    }

    /// 选中朋友（再次选中同一朋友则取消），并关闭添加朋友表单
    pub fn select_friend(&mut self, id: &str) -> Result<(), LedgerError> {
        let position = self
            .friends
            .position(id)
            .ok_or_else(|| LedgerError::UnknownFriend(id.to_string()))?;

        self.mode = match toggle_selection(self.selected_id(), id) {
            Some(id) => AppMode::SplittingBill(SplitForm::new(id)),
            None => AppMode::Normal,
        };
        self.cursor = position;
        self.message = None;
        Ok(())
    }

    /// 把增量记到选中朋友的余额上，然后清除选中
    pub fn split_bill(&mut self, delta: f64) -> Result<f64, LedgerError> {
        let id = self
            .selected_id()
            .ok_or(LedgerError::NoSelection)?
            .to_string();
        let balance = self.friends.apply_delta(&id, delta)?;
        info!(id = %id, delta, balance, "bill split");

        self.mode = AppMode::Normal;
        if let Some(friend) = self.friends.get(&id) {
            self.message = Some(format!(
                "{} 的余额已更新为 {}{}",
                friend.name, balance, self.currency
            ));
        }
        Ok(balance)
    }

    // ============ 通用操作 ============

    /// 取消当前操作
    pub fn cancel(&mut self) {
        self.mode = AppMode::Normal;
        self.message = None;
    }

    fn log_rejection(&self, result: Result<(), LedgerError>) {
        if let Err(e) = result {
            debug!(error = %e, "operation rejected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::split::Payer;

    const CLARK: &str = "118836";
    const SARAH: &str = "933372";

    fn app() -> App {
        App::new(Config::default())
    }

    fn split_form(app: &mut App) -> &mut SplitForm {
        match &mut app.mode {
            AppMode::SplittingBill(form) => form,
            other => panic!("not splitting: {:?}", other),
        }
    }

    #[test]
    fn test_toggle_selection() {
        assert_eq!(toggle_selection(None, "a"), Some("a".to_string()));
        assert_eq!(toggle_selection(Some("a"), "a"), None);
        assert_eq!(toggle_selection(Some("a"), "b"), Some("b".to_string()));
    }

    #[test]
    fn test_add_friend_appends() {
        let mut app = app();
        app.toggle_add_friend();
        let friend = app.add_friend("Mia".to_string(), "m.jpg".to_string()).unwrap();

        assert_eq!(app.friends.len(), 4);
        assert_eq!(app.friends.at(3).unwrap().id, friend.id);
        assert_eq!(friend.balance, 0.0);
        assert!(!app.is_adding_friend());
    }

    #[test]
    fn test_add_friend_requires_name_and_image() {
        let mut app = app();
        app.toggle_add_friend();
        assert_eq!(
            app.add_friend(String::new(), "m.jpg".to_string()),
            Err(LedgerError::EmptyName)
        );
        assert_eq!(
            app.add_friend("Mia".to_string(), String::new()),
            Err(LedgerError::EmptyImage)
        );
        assert_eq!(app.friends.len(), 3);
        assert!(app.is_adding_friend());
    }

    #[test]
    fn test_select_twice_clears() {
        let mut app = app();
        app.select_friend(CLARK).unwrap();
        assert_eq!(app.selected_id(), Some(CLARK));
        app.select_friend(CLARK).unwrap();
        assert_eq!(app.selected_id(), None);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_select_unknown_is_noop() {
        let mut app = app();
        app.select_friend(CLARK).unwrap();
        assert!(app.select_friend("missing").is_err());
        assert_eq!(app.selected_id(), Some(CLARK));
    }

    #[test]
    fn test_select_closes_add_form() {
        let mut app = app();
        app.toggle_add_friend();
        app.select_friend(SARAH).unwrap();
        assert!(!app.is_adding_friend());
        assert_eq!(app.selected_friend().unwrap().name, "Sarah");
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn test_open_add_form_clears_selection() {
        let mut app = app();
        app.select_friend(SARAH).unwrap();
        app.toggle_add_friend();
        assert!(app.is_adding_friend());
        assert_eq!(app.selected_id(), None);
        app.toggle_add_friend();
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_new_selection_resets_form() {
        let mut app = app();
        app.select_friend(CLARK).unwrap();
        split_form(&mut app).set_bill("100");
        app.select_friend(SARAH).unwrap();
        assert_eq!(split_form(&mut app).bill(), None);
    }

    #[test]
    fn test_split_without_selection_is_noop() {
        let mut app = app();
        assert_eq!(app.split_bill(10.0), Err(LedgerError::NoSelection));
        let balances: Vec<f64> = app.friends.iter().map(|f| f.balance).collect();
        assert_eq!(balances, vec![-7.0, 20.0, 0.0]);
    }

    #[test]
    fn test_split_owner_pays() {
        let mut app = app();
        app.select_friend(CLARK).unwrap();
        let form = split_form(&mut app);
        form.set_bill("100");
        form.set_paid_by_user("30");
        app.dispatch(Action::Submit);

        assert_eq!(app.friends.get(CLARK).unwrap().balance, 63.0);
        assert_eq!(app.friends.get(SARAH).unwrap().balance, 20.0);
        assert_eq!(app.selected_id(), None);
    }

    #[test]
    fn test_split_friend_pays() {
        let mut app = app();
        app.select_friend(CLARK).unwrap();
        let form = split_form(&mut app);
        form.set_bill("100");
        form.set_paid_by_user("30");
        form.payer = Payer::Friend;
        app.dispatch(Action::Submit);

        assert_eq!(app.friends.get(CLARK).unwrap().balance, -37.0);
        assert_eq!(app.selected_id(), None);
    }

    #[test]
    fn test_incomplete_split_keeps_form_open() {
        let mut app = app();
        app.select_friend(CLARK).unwrap();
        split_form(&mut app).set_bill("100");
        app.dispatch(Action::Submit);

        assert_eq!(app.friends.get(CLARK).unwrap().balance, -7.0);
        assert_eq!(app.selected_id(), Some(CLARK));
    }

    #[test]
    fn test_add_friend_via_form() {
        let mut app = app();
        app.dispatch(Action::ToggleAddFriend);
        for c in "Mia".chars() {
            app.dispatch(Action::Input(c));
        }
        app.dispatch(Action::Submit);

        let added = app.friends.at(3).unwrap();
        assert_eq!(added.name, "Mia");
        assert!(added.image.starts_with(&app.default_image));
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_cursor_bounds() {
        let mut app = app();
        app.move_up();
        assert_eq!(app.cursor, 0);
        for _ in 0..5 {
            app.move_down();
        }
        assert_eq!(app.cursor, 2);
    }
}
