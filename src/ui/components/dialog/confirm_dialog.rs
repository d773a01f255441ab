//! Yes/no confirmation before submitting or deleting

use super::base::{key_hint, render_dialog, DialogConfig};
use crate::state::ConfirmAction;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

pub fn render_confirm_dialog(frame: &mut Frame, action: &ConfirmAction, selection: usize) {
    let accent = match action {
        ConfirmAction::DeleteEmployee(_) | ConfirmAction::DeleteOtherIncome(_) => Color::Red,
        ConfirmAction::SubmitLoanApplication => Color::Green,
        ConfirmAction::Logout => Color::Yellow,
    };
    let confirm_label = match action {
        ConfirmAction::SubmitLoanApplication => "Submit",
        ConfirmAction::DeleteEmployee(_) | ConfirmAction::DeleteOtherIncome(_) => "Delete",
        ConfirmAction::Logout => "Sign out",
    };

    let options = [(confirm_label, accent), ("Cancel", Color::White)]
        .into_iter()
        .enumerate()
        .map(|(i, (label, color))| {
            let selected = i == selection;
            let prefix = if selected { "▸ " } else { "  " };
            let style = if selected {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(format!("{prefix}{label}"), style))
        })
        .collect();

    let message = action.message();
    render_dialog(
        frame,
        DialogConfig {
            title: action.title(),
            accent,
            message: &message,
            body: options,
            hint: key_hint(&[("↑↓", "select"), ("Enter/y", "confirm"), ("Esc/n", "cancel")]),
            max_width: 56,
        },
    );
}
