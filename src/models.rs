use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::error::LedgerError;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// 朋友记录
///
/// `balance` 为正表示朋友欠你，为负表示你欠朋友，为零表示两清
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Friend {
    #[serde(default = "new_id")]
    pub id: String,
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub balance: f64,
}

/// 余额状态（用于显示）
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BalanceStatus {
    /// 朋友欠你
    Owes(f64),
    /// 你欠朋友
    Owed(f64),
    Even,
}

impl Friend {
    pub fn new(name: String, image: String) -> Self {
        let id = new_id();
        // 头像服务按查询串返回不同图片
        let image = format!("{}?{}", image, id);
        Self {
            id,
            name,
            image,
            balance: 0.0,
        }
    }

    pub fn status(&self) -> BalanceStatus {
        if self.balance > 0.0 {
            BalanceStatus::Owes(self.balance)
        } else if self.balance < 0.0 {
            BalanceStatus::Owed(self.balance.abs())
        } else {
            BalanceStatus::Even
        }
    }
}

/// 有序朋友列表，按插入顺序保存，id 唯一
#[derive(Debug, Clone, Default)]
pub struct FriendList {
    friends: Vec<Friend>,
}

impl FriendList {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从配置的初始列表构建，重复 id 会被跳过
    pub fn from_seed(seed: Vec<Friend>) -> Self {
        let mut list = Self::new();
        for friend in seed {
            if let Err(e) = list.push(friend) {
                warn!(error = %e, "skipping seed friend");
            }
        }
        list
    }

    /// 追加朋友到末尾
    pub fn push(&mut self, friend: Friend) -> Result<(), LedgerError> {
        if self.position(&friend.id).is_some() {
            return Err(LedgerError::DuplicateId(friend.id));
        }
        self.friends.push(friend);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Friend> {
        self.friends.iter().find(|f| f.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.friends.iter().position(|f| f.id == id)
    }

    pub fn at(&self, index: usize) -> Option<&Friend> {
        self.friends.get(index)
    }

    /// 调整某个朋友的余额，返回新余额；其他条目不变
    pub fn apply_delta(&mut self, id: &str, delta: f64) -> Result<f64, LedgerError> {
        let friend = self
            .friends
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| LedgerError::UnknownFriend(id.to_string()))?;
        friend.balance += delta;
        Ok(friend.balance)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Friend> {
        self.friends.iter()
    }

    pub fn len(&self) -> usize {
        self.friends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.friends.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use proptest::prelude::*;

    fn clark() -> Friend {
        Friend {
            id: "118836".to_string(),
            name: "Clark".to_string(),
            image: "3.jpg".to_string(),
            balance: -7.0,
        }
    }

    #[test]
    fn test_new_friend_starts_even() {
        let friend = Friend::new("Ann".to_string(), "https://i.pravatar.cc/48".to_string());
        assert_eq!(friend.balance, 0.0);
        assert_eq!(friend.status(), BalanceStatus::Even);
        assert_eq!(friend.image, format!("https://i.pravatar.cc/48?{}", friend.id));
    }

    #[test]
    fn test_image_always_gets_id_suffix() {
        let friend = Friend::new("Ann".to_string(), "https://i.pravatar.cc/48?u=1".to_string());
        assert_eq!(friend.image, format!("https://i.pravatar.cc/48?u=1?{}", friend.id));
    }

    #[test]
    fn test_status() {
        let mut friend = clark();
        assert_eq!(friend.status(), BalanceStatus::Owed(7.0));
        friend.balance = 20.0;
        assert_eq!(friend.status(), BalanceStatus::Owes(20.0));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut list = FriendList::new();
        list.push(clark()).unwrap();
        assert_eq!(
            list.push(clark()),
            Err(LedgerError::DuplicateId("118836".to_string()))
        );
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_from_seed_skips_duplicates() {
        let list = FriendList::from_seed(vec![clark(), clark()]);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_apply_delta_only_touches_target() {
        let mut list = FriendList::new();
        list.push(clark()).unwrap();
        let sarah = Friend::new("Sarah".to_string(), "1.jpg".to_string());
        let sarah_id = sarah.id.clone();
        list.push(sarah).unwrap();

        assert_eq!(list.apply_delta("118836", 70.0), Ok(63.0));
        assert_eq!(list.get(&sarah_id).unwrap().balance, 0.0);
        assert_eq!(list.position(&sarah_id), Some(1));
    }

    #[test]
    fn test_apply_delta_unknown() {
        let mut list = FriendList::new();
        assert!(matches!(
            list.apply_delta("nope", 1.0),
            Err(LedgerError::UnknownFriend(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_push_grows_by_one_and_ids_stay_unique(names in prop::collection::vec("[a-z]{1,8}", 0..20)) {
            let mut list = FriendList::new();
            for (i, name) in names.iter().enumerate() {
                list.push(Friend::new(name.clone(), "img".to_string())).unwrap();
                prop_assert_eq!(list.len(), i + 1);
            }
            let ids: HashSet<_> = list.iter().map(|f| f.id.clone()).collect();
            prop_assert_eq!(ids.len(), names.len());
        }
    }
}
