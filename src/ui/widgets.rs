//! Reusable UI widget helpers

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Render a scrollable list that keeps the selected item visible
pub fn render_scrollable_list(frame: &mut Frame, area: Rect, list: List, selected_index: usize) {
    let mut list_state = ListState::default().with_selected(Some(selected_index));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// A fixed-width text column
pub fn cell(text: impl AsRef<str>, width: usize) -> String {
    let text = text.as_ref();
    if text.chars().count() > width {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}… ")
    } else {
        format!("{text:<width$} ")
    }
}

/// Right-aligned column for amounts
pub fn amount_cell(text: impl AsRef<str>, width: usize) -> String {
    format!("{:>width$} ", text.as_ref())
}

/// Column layout for a table-like list
pub struct Table<'a> {
    pub title: String,
    pub header: String,
    pub rows: Vec<Line<'a>>,
    pub empty_message: &'a str,
    /// Shortcut hints shown under the header
    pub actions: &'a str,
}

/// Draw a bordered list with a header row and a ▸ marker on the selection
pub fn draw_table(frame: &mut Frame, area: Rect, table: Table, selected_index: usize) {
    let block = Block::default()
        .title(format!(" {} ", table.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if table.rows.is_empty() {
        let content = Paragraph::new(table.empty_message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header_rows = if table.actions.is_empty() { 1 } else { 2 };
    let mut header = vec![Line::from(Span::styled(
        format!("  {}", table.header),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))];
    if !table.actions.is_empty() {
        header.push(Line::from(Span::styled(
            format!("  {}", table.actions),
            Style::default().fg(Color::DarkGray),
        )));
    }
    let header_area = Rect {
        height: header_rows.min(inner.height),
        ..inner
    };
    frame.render_widget(Paragraph::new(header), header_area);

    let list_area = Rect {
        y: inner.y + header_area.height,
        height: inner.height.saturating_sub(header_area.height),
        ..inner
    };
    let items: Vec<ListItem> = table
        .rows
        .into_iter()
        .enumerate()
        .map(|(idx, row)| {
            let marker = if idx == selected_index { "▸ " } else { "  " };
            let mut spans = vec![Span::styled(marker, Style::default().fg(Color::Cyan))];
            spans.extend(row.spans);
            ListItem::new(Line::from(spans))
        })
        .collect();
    let list = List::new(items).highlight_style(Style::default().bg(Color::DarkGray));
    render_scrollable_list(frame, list_area, list, selected_index);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_pads_and_truncates() {
        assert_eq!(cell("M001", 6), "M001   ");
        assert_eq!(cell("Grace Nakato", 6), "Grace… ");
        assert_eq!(amount_cell("1,500", 8), "   1,500 ");
    }
}
