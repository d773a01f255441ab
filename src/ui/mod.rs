//! UI module for rendering the TUI

mod components;
mod dashboard;
mod forms;
mod layout;
mod lists;
mod login;
mod statement;
mod widgets;

use crate::app::App;
use crate::state::View;
use components::{render_confirm_dialog, render_error_dialog, render_prompt_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if app.state.current_view == View::Login {
        login::draw(frame, layout::create_layout_no_sidebar(area), app);
    } else {
        let (sidebar_area, main_area) = layout::create_layout(area);
        layout::draw_sidebar(frame, sidebar_area, app);

        match app.state.current_view {
            View::Login => {}
            View::Dashboard => dashboard::draw(frame, main_area, app),
            View::Members => lists::draw_members(frame, main_area, app),
            View::Loans => lists::draw_loans(frame, main_area, app),
            View::Savings => lists::draw_savings(frame, main_area, app),
            View::Approvals => lists::draw_approvals(frame, main_area, app),
            View::Expenses => lists::draw_expenses(frame, main_area, app),
            View::OtherIncome => lists::draw_other_income(frame, main_area, app),
            View::Employees => lists::draw_employees(frame, main_area, app),
            View::Payroll => lists::draw_payroll(frame, main_area, app),
            View::LoanApplication => forms::draw_loan_wizard(frame, main_area, app),
            View::RequestForm => forms::draw_request_form(frame, main_area, app),
            View::Statement => statement::draw(frame, main_area, app),
        }
    }

    layout::draw_status_bar(frame, app);

    // Overlays, most urgent last so it ends up on top
    if let Some(prompt) = &app.state.prompt {
        render_prompt_dialog(frame, prompt);
    }
    if let Some(action) = &app.state.confirm_action {
        render_confirm_dialog(frame, action, app.state.confirm_selection);
    }
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error, app.state.error_count());
    }
}
