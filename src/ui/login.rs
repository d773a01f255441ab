//! Sign-in screen

use crate::app::App;
use crate::session::Role;
use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const FORM_WIDTH: u16 = 50;
const FORM_HEIGHT: u16 = 17;

fn centered(area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(FORM_HEIGHT)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(FORM_WIDTH)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

fn input<'a>(label: &'a str, value: String, is_active: bool) -> Paragraph<'a> {
    let color = if is_active { Color::Cyan } else { Color::DarkGray };
    let cursor = if is_active { "▌" } else { "" };
    Paragraph::new(Line::from(vec![
        Span::raw(value),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]))
    .block(
        Block::default()
            .title(format!(" {label} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    )
}

fn role_selector(selected: Role, is_active: bool) -> Paragraph<'static> {
    let spans: Vec<Span> = Role::ALL
        .iter()
        .flat_map(|role| {
            let style = if *role == selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            [Span::styled(format!(" {} ", role.label()), style), Span::raw(" ")]
        })
        .collect();
    let color = if is_active { Color::Cyan } else { Color::DarkGray };
    Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(" Sign in as ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    )
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let login = &app.state.login;
    let area = centered(area);

    let outer = Block::default()
        .title(format!(" {} ", app.config.organisation_name()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Email
            Constraint::Length(3), // Password
            Constraint::Length(3), // Role
            Constraint::Length(1),
            Constraint::Length(2), // Status
            Constraint::Min(0),
        ])
        .split(inner);

    let masked = "•".repeat(login.password.chars().count());
    frame.render_widget(
        input("Email", login.email.clone(), login.active_field == 0),
        chunks[0],
    );
    frame.render_widget(input("Password", masked, login.active_field == 1), chunks[1]);
    frame.render_widget(role_selector(login.role, login.active_field == 2), chunks[2]);

    let status = if login.busy {
        Line::from(Span::styled(
            "Signing in...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Cyan)),
            Span::styled(" to sign in", Style::default().fg(Color::DarkGray)),
        ])
    };
    frame.render_widget(Paragraph::new(status).centered(), chunks[4]);
}
