//! Generated account statement

use super::widgets::{amount_cell, cell, draw_table, Table};
use crate::app::App;
use crate::format;
use crate::state::records::TransactionKind;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(statement) = &app.state.statement else {
        return;
    };
    let currency = app.config.currency();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let label = Style::default().fg(Color::DarkGray);
    let header = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Member   ", label),
            Span::styled(
                format!("{} ({})", statement.member_name, statement.member_id),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Account  ", label),
            Span::raw(statement.account_type.label()),
            Span::styled("   Format ", label),
            Span::raw(statement.format.label()),
        ]),
        Line::from(vec![
            Span::styled("Period   ", label),
            Span::raw(format!(
                "{} to {}",
                format::date(statement.start),
                format::date(statement.end)
            )),
        ]),
    ])
    .block(
        Block::default()
            .title(" Account Statement ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(header, chunks[0]);

    let rows = statement
        .lines
        .iter()
        .map(|line| {
            let kind = match line.kind {
                TransactionKind::Deposit => "Deposit",
                TransactionKind::Withdrawal => "Withdrawal",
                TransactionKind::Interest => "Interest",
            };
            let credit = (line.credit > 0.0)
                .then(|| format::grouped(line.credit))
                .unwrap_or_default();
            let debit = (line.debit > 0.0)
                .then(|| format::grouped(line.debit))
                .unwrap_or_default();
            Line::from(vec![
                Span::raw(cell(format::date(line.date), 12)),
                Span::raw(cell(kind, 11)),
                Span::raw(cell(&line.reference, 14)),
                Span::styled(amount_cell(credit, 12), Style::default().fg(Color::Green)),
                Span::styled(amount_cell(debit, 12), Style::default().fg(Color::Red)),
                Span::raw(amount_cell(format::grouped(line.balance), 14)),
            ])
        })
        .collect();

    let table = Table {
        title: format!(
            "Opening balance {}",
            format::money(statement.opening_balance, currency)
        ),
        header: format!(
            "{}{}{}{}{}{}",
            cell("Date", 12),
            cell("Type", 11),
            cell("Reference", 14),
            amount_cell("Credit", 12),
            amount_cell("Debit", 12),
            amount_cell("Balance", 14)
        ),
        rows,
        empty_message: "No transactions in this period.",
        actions: "",
    };
    draw_table(frame, chunks[1], table, app.state.selected_index);

    let totals = Paragraph::new(Line::from(vec![
        Span::styled(" Credits ", label),
        Span::styled(
            format::money(statement.total_credits(), currency),
            Style::default().fg(Color::Green),
        ),
        Span::styled("   Debits ", label),
        Span::styled(
            format::money(statement.total_debits(), currency),
            Style::default().fg(Color::Red),
        ),
        Span::styled("   Closing balance ", label),
        Span::styled(
            format::money(statement.closing_balance(), currency),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(totals, chunks[2]);
}
