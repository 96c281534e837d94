//! 分账计算
//!
//! 账单表单的字段、派生值以及最终作用到朋友余额上的增量

use crate::error::LedgerError;

/// 谁付的账单
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Payer {
    #[default]
    Owner,
    Friend,
}

impl Payer {
    pub fn toggle(self) -> Self {
        match self {
            Payer::Owner => Payer::Friend,
            Payer::Friend => Payer::Owner,
        }
    }
}

/// 账单表单中的焦点字段
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SplitField {
    #[default]
    Bill,
    Expense,
    Payer,
}

impl SplitField {
    pub fn next(self) -> Self {
        match self {
            SplitField::Bill => SplitField::Expense,
            SplitField::Expense => SplitField::Payer,
            SplitField::Payer => SplitField::Bill,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            SplitField::Bill => SplitField::Payer,
            SplitField::Expense => SplitField::Bill,
            SplitField::Payer => SplitField::Expense,
        }
    }
}

/// 分账表单，每次选中朋友都会新建一个
#[derive(Debug, Clone, PartialEq)]
pub struct SplitForm {
    pub friend_id: String,
    pub bill_input: String,
    pub expense_input: String,
    pub payer: Payer,
    pub focus: SplitField,
}

/// 空输入或刚输入的小数点，视为尚无数值
fn is_blank(text: &str) -> bool {
    text.is_empty() || text == "."
}

fn parse_amount(text: &str) -> Option<f64> {
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

impl SplitForm {
    pub fn new(friend_id: String) -> Self {
        Self {
            friend_id,
            bill_input: String::new(),
            expense_input: String::new(),
            payer: Payer::default(),
            focus: SplitField::default(),
        }
    }

    pub fn bill(&self) -> Option<f64> {
        parse_amount(&self.bill_input)
    }

    pub fn paid_by_user(&self) -> Option<f64> {
        parse_amount(&self.expense_input)
    }

    /// 朋友承担的部分，只读；账单为空或为零时不存在
    pub fn paid_by_friend(&self) -> Option<f64> {
        self.bill()
            .filter(|bill| *bill != 0.0)
            .map(|bill| bill - self.paid_by_user().unwrap_or(0.0))
    }

    /// 设置账单金额，非法数字被忽略
    pub fn set_bill(&mut self, text: &str) -> bool {
        if !is_blank(text) && parse_amount(text).is_none() {
            return false;
        }
        self.bill_input = text.to_string();
        true
    }

    /// 设置自己承担的金额
    ///
    /// 超过当前账单（账单为空按 0 计）的输入被丢弃，保留上一个有效值
    pub fn set_paid_by_user(&mut self, text: &str) -> bool {
        if is_blank(text) {
            self.expense_input = text.to_string();
            return true;
        }
        match parse_amount(text) {
            Some(value) if value <= self.bill().unwrap_or(0.0) => {
                self.expense_input = text.to_string();
                true
            }
            _ => false,
        }
    }

    /// 向焦点字段输入一个字符
    pub fn input_char(&mut self, c: char) -> bool {
        match self.focus {
            SplitField::Bill | SplitField::Expense if c.is_ascii_digit() || c == '.' => {
                if self.focus == SplitField::Bill {
                    let candidate = format!("{}{}", self.bill_input, c);
                    self.set_bill(&candidate)
                } else {
                    let candidate = format!("{}{}", self.expense_input, c);
                    self.set_paid_by_user(&candidate)
                }
            }
            SplitField::Payer if c == ' ' => {
                self.payer = self.payer.toggle();
                true
            }
            _ => false,
        }
    }

    /// 删除焦点字段的最后一个字符（删除不受上限约束）
    pub fn delete_char(&mut self) {
        match self.focus {
            SplitField::Bill => {
                self.bill_input.pop();
            }
            SplitField::Expense => {
                self.expense_input.pop();
            }
            SplitField::Payer => {}
        }
    }

    /// 计算作用到朋友余额上的增量
    pub fn delta(&self) -> Result<f64, LedgerError> {
        let bill = self
            .bill()
            .filter(|bill| *bill != 0.0)
            .ok_or(LedgerError::MissingBill)?;
        let expense = self
            .paid_by_user()
            .filter(|expense| *expense != 0.0)
            .ok_or(LedgerError::MissingExpense)?;
        if expense > bill {
            return Err(LedgerError::ExpenseExceedsBill { bill, expense });
        }

        Ok(match self.payer {
            Payer::Owner => bill - expense,
            Payer::Friend => -expense,
        })
    }
}
