//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::state::{App, AppMode, FriendForm, InputField};
use crate::models::{BalanceStatus, Friend};
use crate::split::{Payer, SplitField, SplitForm};
use components::{render_dialog_framework, render_input_widget};
use layouts::centered_rect;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Min(10),   // 朋友列表 + 分账
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_title(frame, chunks[0]);
    render_friends(frame, app, main[0]);
    render_help(frame, app, chunks[2]);

    match &app.mode {
        AppMode::Normal => render_hint(frame, main[1]),
        AppMode::AddingFriend(form) => render_add_dialog(frame, form),
        AppMode::SplittingBill(form) => render_split_form(frame, app, form, main[1]),
    }
}

/// 余额描述文字
pub fn balance_text(friend: &Friend, currency: &str) -> String {
    match friend.status() {
        BalanceStatus::Owed(amount) => format!("你欠 {} {}{}", friend.name, amount, currency),
        BalanceStatus::Owes(amount) => format!("{} 欠你 {}{}", friend.name, amount, currency),
        BalanceStatus::Even => format!("你和 {} 两清", friend.name),
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("🍕 Eat-'n-Split 分账")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_friends(frame: &mut Frame, app: &App, area: Rect) {
    let selected = app.selected_id();
    let items: Vec<ListItem> = app
        .friends
        .iter()
        .enumerate()
        .map(|(i, friend)| {
            let is_selected = selected == Some(friend.id.as_str());
            let balance_color = match friend.status() {
                BalanceStatus::Owed(_) => Color::Red,
                BalanceStatus::Owes(_) => Color::Green,
                BalanceStatus::Even => Color::White,
            };

            let name_style = if i == app.cursor {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else if is_selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };

            let button = if is_selected { "[关闭]" } else { "[选择]" };

            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(friend.name.clone(), name_style),
                    Span::raw("  "),
                    Span::styled(button, Style::default().fg(Color::DarkGray)),
                ]),
                Line::from(Span::styled(
                    format!("  {}", balance_text(friend, &app.currency)),
                    Style::default().fg(balance_color),
                )),
            ])
        })
        .collect();

    let list = List::new(items).block(Block::default().title("朋友").borders(Borders::ALL));

    let mut state = ListState::default();
    if !app.friends.is_empty() {
        state.select(Some(app.cursor));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_hint(frame: &mut Frame, area: Rect) {
    let hint = Paragraph::new("选择一位朋友来分账，或按 'a' 添加朋友")
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().title("分账").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(hint, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match &app.mode {
        AppMode::Normal => "[Enter] 选择/关闭  [a] 添加朋友  [j/k] 导航  [q] 退出",
        AppMode::AddingFriend(_) => "[Tab] 切换字段  [Enter] 添加  [Esc] 取消",
        AppMode::SplittingBill(_) => "[Tab] 切换字段  [←/→] 切换付款人  [PgUp/PgDn] 移动  [F2] 选择/关闭  [Enter] 分账  [Esc] 关闭",
    };

    let message = app.message.as_deref().unwrap_or("");
    let text = if message.is_empty() {
        help_text.to_string()
    } else {
        format!("{}  |  {}", help_text, message)
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_add_dialog(frame: &mut Frame, form: &FriendForm) {
    let area = centered_rect(60, 40, frame.area());
    let inner = render_dialog_framework(frame, area, "添加朋友");

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(inner);

    render_input_widget(
        frame,
        chunks[0],
        "🧏 朋友名字",
        &form.name,
        form.focus == InputField::Name,
        Color::Yellow,
    );
    render_input_widget(
        frame,
        chunks[1],
        "🎬 头像地址",
        &form.image,
        form.focus == InputField::Image,
        Color::Yellow,
    );

    frame.render_widget(
        Paragraph::new("名字和头像地址都不能为空").style(Style::default().fg(Color::Gray)),
        chunks[2],
    );
}

fn render_split_form(frame: &mut Frame, app: &App, form: &SplitForm, area: Rect) {
    let name = app
        .selected_friend()
        .map(|f| f.name.as_str())
        .unwrap_or_default();
    let inner = render_dialog_framework(frame, area, &format!("和 {} 分账", name));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    render_input_widget(
        frame,
        chunks[0],
        "💰 账单金额",
        &form.bill_input,
        form.focus == SplitField::Bill,
        Color::Yellow,
    );
    render_input_widget(
        frame,
        chunks[1],
        "🙎 你的花费",
        &form.expense_input,
        form.focus == SplitField::Expense,
        Color::Yellow,
    );

    // 只读字段
    let friend_expense = form
        .paid_by_friend()
        .map(|v| v.to_string())
        .unwrap_or_default();
    render_input_widget(
        frame,
        chunks[2],
        &format!("🧏 {} 的花费", name),
        &friend_expense,
        false,
        Color::Yellow,
    );

    let payer = match form.payer {
        Payer::Owner => "你".to_string(),
        Payer::Friend => name.to_string(),
    };
    render_input_widget(
        frame,
        chunks[3],
        "🤑 谁付的账单",
        &format!("◀ {} ▶", payer),
        form.focus == SplitField::Payer,
        Color::Yellow,
    );
}
