//! Single-step request and back-office forms

use super::field_renderer::draw_fields;
use crate::app::App;
use crate::state::{Form, FormKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const FORM_MAX_WIDTH: u16 = 72;

pub fn draw_request_form(frame: &mut Frame, area: Rect, app: &App) {
    let Some(form) = &app.state.request_form else {
        return;
    };

    let area = Rect {
        width: area.width.min(FORM_MAX_WIDTH),
        ..area
    };
    let title = match form.editing() {
        Some(id) => format!(" {} {id} ", form.title()),
        None => format!(" {} ", form.title()),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let note = match form.kind() {
        FormKind::Deposit | FormKind::Withdrawal => "Requests are queued for approval.",
        FormKind::Statement => "Statement covers the dates you choose.",
        FormKind::Expense | FormKind::OtherIncome | FormKind::Employee => "Fields with * are required.",
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            note,
            Style::default().fg(Color::DarkGray),
        ))),
        rows[0],
    );

    draw_fields(
        frame,
        rows[1],
        form.kind().fields(),
        form.state(),
        form.errors(),
        form.active_field(),
    );
}
