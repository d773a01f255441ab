//! Field rendering utilities for forms

use crate::state::{FieldKind, FieldSpec, FieldValue, FormState, ValidationErrors};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows a field takes, including its error line
pub fn field_height(spec: &FieldSpec, has_error: bool) -> u16 {
    let input = if spec.is_multiline() { 4 } else { 3 };
    input + u16::from(has_error)
}

/// Draw one input box, with the validation message under it when present
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    spec: &FieldSpec,
    value: &FieldValue,
    is_active: bool,
    error: Option<&str>,
) {
    let border_color = match (is_active, error.is_some()) {
        (true, _) => Color::Cyan,
        (false, true) => Color::Red,
        (false, false) => Color::DarkGray,
    };
    let value_style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };

    let display = value.display_value(spec.options());
    let placeholder = match spec.kind {
        FieldKind::Choice(_) if display.is_empty() => "← select →",
        FieldKind::File if display.is_empty() => "type a file path",
        _ if display.is_empty() && !is_active => "(empty)",
        _ => "",
    };

    let cursor = match spec.kind {
        FieldKind::Choice(_) | FieldKind::Boolean => "",
        _ if is_active => "▌",
        _ => "",
    };

    let mut lines: Vec<Line> = display
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), value_style)))
        .collect();
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            placeholder,
            Style::default().fg(Color::DarkGray),
        )));
    }
    if let Some(last) = lines.last_mut() {
        last.spans
            .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
    }

    let label = if spec.required {
        format!(" {} * ", spec.label)
    } else {
        format!(" {} ", spec.label)
    };
    let block = Block::default()
        .title(label)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let input_area = Rect {
        height: area.height.saturating_sub(u16::from(error.is_some())),
        ..area
    };
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        input_area,
    );

    if let Some(message) = error {
        let error_area = Rect {
            x: area.x + 1,
            y: input_area.y + input_area.height,
            width: area.width.saturating_sub(1),
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(Color::Red))),
            error_area,
        );
    }
}

/// Lay out a column of fields, scrolling so the active one stays visible
pub fn draw_fields(
    frame: &mut Frame,
    area: Rect,
    specs: &[FieldSpec],
    state: &FormState,
    errors: &ValidationErrors,
    active: usize,
) {
    let heights: Vec<u16> = specs
        .iter()
        .map(|spec| field_height(spec, errors.contains(spec.name)))
        .collect();
    let first = first_visible(&heights, active, area.height);

    let mut y = area.y;
    for (index, spec) in specs.iter().enumerate().skip(first) {
        let height = heights[index];
        if y + height > area.y + area.height {
            break;
        }
        let value = state
            .get(spec.name)
            .cloned()
            .unwrap_or_else(|| spec.blank_value());
        draw_field(
            frame,
            Rect {
                y,
                height,
                ..area
            },
            spec,
            &value,
            index == active,
            errors.get(spec.name),
        );
        y += height;
    }
}

/// Smallest starting index that keeps `active` on screen
fn first_visible(heights: &[u16], active: usize, available: u16) -> usize {
    let mut first = 0;
    while first < active {
        let used: u16 = heights[first..=active.min(heights.len().saturating_sub(1))]
            .iter()
            .sum();
        if used <= available {
            break;
        }
        first += 1;
    }
    first
}
