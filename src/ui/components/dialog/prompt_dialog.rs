//! One-line text prompt (rejection reasons, pay period)

use super::base::{key_hint, render_dialog, DialogConfig};
use crate::state::{Prompt, PromptAction};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
    Frame,
};

pub fn render_prompt_dialog(frame: &mut Frame, prompt: &Prompt) {
    let message = match &prompt.action {
        PromptAction::RejectApproval(id) => format!("Why is request {id} being rejected?"),
        PromptAction::RejectIncome(id) => format!("Why is income {id} being rejected?"),
        PromptAction::GeneratePayroll => {
            "Payslips are created for every active employee.".to_string()
        }
    };
    let input = Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Cyan)),
        Span::raw(prompt.input.as_str()),
        Span::styled("▌", Style::default().fg(Color::Cyan)),
    ]);

    render_dialog(
        frame,
        DialogConfig {
            title: prompt.action.title(),
            accent: Color::Cyan,
            message: &message,
            body: vec![input],
            hint: key_hint(&[("Enter", "submit"), ("Esc", "cancel")]),
            max_width: 60,
        },
    );
}
