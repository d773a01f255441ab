//! Layout components (sidebar, status bar)

use super::components::{render_sidebar_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SIDEBAR_WIDTH: u16 = 22;

/// Create the main layout with sidebar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDEBAR_WIDTH), // Sidebar
            Constraint::Min(0),                // Main content
        ])
        .split(area);

    (reserve_status_line(chunks[0]), reserve_status_line(chunks[1]))
}

/// Full-width layout for the sign-in screen
pub fn create_layout_no_sidebar(area: Rect) -> Rect {
    reserve_status_line(area)
}

fn reserve_status_line(area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area)[0]
}

/// Menu entry to highlight; forms and statements keep the list they came from
fn menu_owner(menu: &[View], current: View, history: &[View]) -> Option<View> {
    std::iter::once(&current)
        .chain(history.iter().rev())
        .find(|view| menu.contains(view))
        .copied()
}

/// Draw the organisation name, signed-in user and the role's menu
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let Some(user) = app.current_user() else {
        return;
    };
    let menu = View::menu_for(user.role);

    let mut constraints = vec![Constraint::Length(3)];
    constraints.extend(menu.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            app.config.organisation_name(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::raw(user.name.as_str())),
        Line::from(Span::styled(
            user.role.label(),
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(header, chunks[0]);

    let active = menu_owner(menu, app.state.current_view, &app.state.view_history);
    for (idx, view) in menu.iter().enumerate() {
        let is_selected = match active {
            Some(active) => *view == active,
            None => idx == app.state.sidebar_index,
        };
        render_sidebar_button(frame, chunks[idx + 1], idx + 1, view.title(), is_selected);
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    let session = match app.current_user() {
        Some(user) => Span::styled(
            format!(" ● {} ", user.email),
            Style::default().fg(Color::Green),
        ),
        None => Span::styled(" ○ signed out ", Style::default().fg(Color::Red)),
    };
    spans.push(session);

    let hints = get_view_hints(app);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), Style::default().fg(Color::Green)));
    }

    let quit_hint = " ^C:quit ";
    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the current view
fn get_view_hints(app: &App) -> String {
    const NAV: &str = "j/k:nav  1-9/Tab:menu  F5:refresh  L:logout";
    match app.state.current_view {
        View::Login if app.state.login.busy => "Signing in...".to_string(),
        View::Login => "Tab:next field  ←/→:role  Enter:sign in".to_string(),
        View::Dashboard => format!("{NAV}  q:quit"),
        View::Members => format!("{NAV}  s:change status"),
        View::Loans => format!("{NAV}  n:apply for loan"),
        View::Savings => format!("{NAV}  d:deposit  w:withdraw  s:statement"),
        View::Approvals => format!("{NAV}  a:approve  r:reject"),
        View::Expenses => format!("{NAV}  n:new"),
        View::OtherIncome => format!("{NAV}  n:new  e:edit  x:delete  v:verify  r:reject"),
        View::Employees => format!("{NAV}  n:new  e:edit  x:delete"),
        View::Payroll => format!("{NAV}  g:generate"),
        View::LoanApplication => {
            "Tab:next field  ←/→:choose  Space:toggle  Enter:next step  PgUp:back  Esc:cancel"
                .to_string()
        }
        View::RequestForm => {
            "Tab:next field  ←/→:choose  Enter:submit  Esc:cancel".to_string()
        }
        View::Statement => "j/k:scroll  Esc:back".to_string(),
    }
}
