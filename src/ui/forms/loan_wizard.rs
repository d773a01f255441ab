//! Loan application wizard with its live repayment summary

use super::field_renderer::draw_fields;
use crate::app::App;
use crate::format;
use crate::state::fields::step_title;
use crate::state::{Affordability, Form, LoanSummary, LoanWizard, TOTAL_STEPS};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const SUMMARY_WIDTH: u16 = 38;

pub fn draw_loan_wizard(frame: &mut Frame, area: Rect, app: &App) {
    let Some(wizard) = &app.state.loan_wizard else {
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(SUMMARY_WIDTH)])
        .split(area);

    let block = Block::default()
        .title(" Loan Application ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(columns[0]);
    frame.render_widget(block, columns[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    frame.render_widget(step_indicator(wizard), rows[0]);
    draw_fields(
        frame,
        rows[1],
        wizard.current_fields(),
        wizard.state(),
        wizard.errors(),
        wizard.active_field(),
    );

    draw_summary(frame, columns[1], &wizard.summary(), app.config.currency());
}

/// "Step 2 of 4: Financial Information" over a row of dots
fn step_indicator(wizard: &LoanWizard) -> Paragraph<'static> {
    let step = wizard.step();
    let dots: Vec<Span> = (1..=TOTAL_STEPS)
        .map(|n| {
            let (symbol, color) = match n.cmp(&step) {
                std::cmp::Ordering::Less => ("● ", Color::Green),
                std::cmp::Ordering::Equal => ("● ", Color::Cyan),
                std::cmp::Ordering::Greater => ("○ ", Color::DarkGray),
            };
            Span::styled(symbol, Style::default().fg(color))
        })
        .collect();

    Paragraph::new(vec![
        Line::from(Span::styled(
            format!("Step {step} of {TOTAL_STEPS}: {}", step_title(step)),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(dots),
    ])
}

fn summary_row(label: &'static str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<18}"), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

fn draw_summary(frame: &mut Frame, area: Rect, summary: &LoanSummary, currency: &str) {
    let affordability_color = match summary.affordability {
        Affordability::Good => Color::Green,
        Affordability::Poor => Color::Red,
    };

    let mut lines = vec![
        summary_row(
            "Monthly payment",
            format::money(summary.monthly_payment, currency),
            Color::Cyan,
        ),
        summary_row(
            "Total repayment",
            format::money(summary.total_repayment, currency),
            Color::White,
        ),
        summary_row(
            "Total interest",
            format::money(summary.total_interest, currency),
            Color::White,
        ),
        Line::from(""),
        summary_row(
            "Net income",
            format::money(summary.net_income as f64, currency),
            Color::White,
        ),
        summary_row(
            "Debt-to-income",
            format!("{}%", summary.debt_to_income),
            Color::White,
        ),
        summary_row(
            "Affordability",
            summary.affordability.label().to_string(),
            affordability_color,
        ),
    ];
    if summary.exceeds_maximum {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Amount is above this loan type's maximum",
            Style::default().fg(Color::Yellow),
        )));
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(" Summary ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(panel, area);
}
