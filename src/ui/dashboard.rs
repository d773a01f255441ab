//! Role dashboard: stat cards and what needs attention

use crate::app::App;
use crate::format;
use crate::session::Role;
use crate::state::records::{ApprovalStatus, LoanStatus};
use crate::state::{dashboard_cards, StatCard};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

const CARDS_PER_ROW: usize = 4;
const CARD_HEIGHT: u16 = 4;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(user) = app.current_user() else {
        return;
    };
    let cards = dashboard_cards(&app.state.records, user);
    let card_rows = cards.len().div_ceil(CARDS_PER_ROW) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(card_rows * CARD_HEIGHT),
            Constraint::Min(0),
        ])
        .split(area);

    let greeting = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" Welcome, {}", user.name),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  ({})", user.role.label()),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    frame.render_widget(greeting, chunks[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); card_rows as usize])
        .split(chunks[1]);
    for (row, row_cards) in rows.iter().zip(cards.chunks(CARDS_PER_ROW)) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, CARDS_PER_ROW as u32); CARDS_PER_ROW])
            .split(*row);
        for (column, card) in columns.iter().zip(row_cards) {
            draw_card(frame, *column, card, app.config.currency());
        }
    }

    if user.role == Role::Member {
        draw_my_loans(frame, chunks[2], app);
    } else {
        draw_pending(frame, chunks[2], app);
    }
}

fn draw_card(frame: &mut Frame, area: Rect, card: &StatCard, currency: &str) {
    let value = Paragraph::new(Line::from(Span::styled(
        card.value.render(currency),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .title(format!(" {} ", card.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(value, area);
}

fn draw_pending(frame: &mut Frame, area: Rect, app: &App) {
    let currency = app.config.currency();
    let items: Vec<ListItem> = app
        .state
        .approvals()
        .into_iter()
        .filter(|a| a.status == ApprovalStatus::Pending)
        .map(|a| {
            let amount = a
                .amount
                .map(|v| format::money(v, currency))
                .unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {:<12}", a.subject.label()), Style::default().fg(Color::Yellow)),
                Span::raw(format!("{:<22}", app.state.records.member_name(&a.member_id))),
                Span::raw(amount),
            ]))
        })
        .collect();

    let title = format!(" Pending Approvals ({}) ", items.len());
    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(list, area);
}

fn draw_my_loans(frame: &mut Frame, area: Rect, app: &App) {
    let currency = app.config.currency();
    let items: Vec<ListItem> = app
        .state
        .loans()
        .into_iter()
        .map(|loan| {
            let color = match loan.status {
                LoanStatus::Active => Color::Green,
                LoanStatus::Pending => Color::Yellow,
                LoanStatus::Defaulted | LoanStatus::Rejected => Color::Red,
                LoanStatus::Completed => Color::DarkGray,
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!(" {:<8}", loan.id)),
                Span::styled(format!("{:<11}", loan.status.label()), Style::default().fg(color)),
                Span::raw(format!("balance {}", format::money(loan.balance, currency))),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" My Loans ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(list, area);
}
