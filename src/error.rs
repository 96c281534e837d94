//! 领域错误定义
//!
//! 所有错误都只是"表单不前进"，由 UI 层吞掉并记录日志

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("friend name is empty")]
    EmptyName,
    #[error("image url is empty")]
    EmptyImage,
    #[error("duplicate friend id: {0}")]
    DuplicateId(String),
    #[error("unknown friend id: {0}")]
    UnknownFriend(String),
    #[error("no friend selected")]
    NoSelection,
    #[error("bill value is missing")]
    MissingBill,
    #[error("your expense is missing")]
    MissingExpense,
    #[error("expense {expense} exceeds bill {bill}")]
    ExpenseExceedsBill { bill: f64, expense: f64 },
}
