//! Error dialog component

use super::base::{key_hint, render_dialog, DialogConfig};
use ratatui::{style::Color, Frame};

/// Render the oldest queued error centered on the screen
pub fn render_error_dialog(frame: &mut Frame, error_message: &str, queued: usize) {
    let title = if queued > 1 {
        format!("Error (1 of {queued})")
    } else {
        "Error".to_string()
    };

    render_dialog(
        frame,
        DialogConfig {
            title: &title,
            accent: Color::Red,
            message: error_message,
            hint: key_hint(&[("Enter", "dismiss"), ("Esc", "dismiss")]),
            ..Default::default()
        },
    );
}
