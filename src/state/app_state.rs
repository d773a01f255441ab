//! Application state definitions

use super::records::{
    Approval, ApprovalStatus, DataSnapshot, Employee, Expense, Loan, Member, OtherIncome,
    PayrollRecord, SavingsAccount,
};
use super::statement::Statement;
use super::{LoanWizard, SingleStepForm};
use crate::session::Role;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    Dashboard,
    Members,
    Loans,
    Savings,
    Approvals,
    Expenses,
    OtherIncome,
    Employees,
    Payroll,
    LoanApplication,
    /// One of the single-step forms
    RequestForm,
    Statement,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Sign In",
            Self::Dashboard => "Dashboard",
            Self::Members => "Members",
            Self::Loans => "Loans",
            Self::Savings => "Savings",
            Self::Approvals => "Approvals",
            Self::Expenses => "Expenses",
            Self::OtherIncome => "Other Income",
            Self::Employees => "Employees",
            Self::Payroll => "Payroll",
            Self::LoanApplication => "Loan Application",
            Self::RequestForm => "Request",
            Self::Statement => "Statement",
        }
    }

    /// Check if this is a form view that should be skipped when going back
    pub fn is_form_view(&self) -> bool {
        matches!(self, Self::LoanApplication | Self::RequestForm)
    }

    /// Sidebar entries for a role
    pub fn menu_for(role: Role) -> &'static [View] {
        match role {
            Role::Admin => &[
                View::Dashboard,
                View::Members,
                View::Loans,
                View::Savings,
                View::Approvals,
                View::Expenses,
                View::OtherIncome,
                View::Employees,
                View::Payroll,
            ],
            Role::LoanOfficer => &[
                View::Dashboard,
                View::Members,
                View::Loans,
                View::Approvals,
            ],
            Role::Accountant => &[
                View::Dashboard,
                View::Savings,
                View::Expenses,
                View::OtherIncome,
                View::Employees,
                View::Payroll,
            ],
            Role::Member => &[View::Dashboard, View::Loans, View::Savings],
        }
    }
}

/// Sign-in form
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub role: Role,
    /// 0 = email, 1 = password, 2 = role
    pub active_field: usize,
    pub busy: bool,
}

impl LoginForm {
    pub const FIELD_COUNT: usize = 3;

    pub fn new(role: Role) -> Self {
        Self {
            role,
            ..Default::default()
        }
    }

    pub fn next_field(&mut self) {
        self.active_field = (self.active_field + 1) % Self::FIELD_COUNT;
    }

    pub fn prev_field(&mut self) {
        self.active_field = (self.active_field + Self::FIELD_COUNT - 1) % Self::FIELD_COUNT;
    }

    pub fn input_char(&mut self, c: char) {
        match self.active_field {
            0 => self.email.push(c),
            1 => self.password.push(c),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.active_field {
            0 => {
                self.email.pop();
            }
            1 => {
                self.password.pop();
            }
            _ => {}
        }
    }
}

/// Actions that need a yes/no before running
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    SubmitLoanApplication,
    DeleteEmployee(String),
    DeleteOtherIncome(String),
    Logout,
}

impl ConfirmAction {
    pub fn title(&self) -> &'static str {
        match self {
            Self::SubmitLoanApplication => "Submit Application",
            Self::DeleteEmployee(_) => "Delete Employee",
            Self::DeleteOtherIncome(_) => "Delete Income",
            Self::Logout => "Sign Out",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::SubmitLoanApplication => {
                "Submit this loan application for approval?".to_string()
            }
            Self::DeleteEmployee(id) => format!("Delete employee {id}?"),
            Self::DeleteOtherIncome(id) => format!("Delete income record {id}?"),
            Self::Logout => "Sign out of this session?".to_string(),
        }
    }
}

/// Actions that need one line of text before running
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAction {
    RejectApproval(String),
    RejectIncome(String),
    GeneratePayroll,
}

impl PromptAction {
    pub fn title(&self) -> &'static str {
        match self {
            Self::RejectApproval(_) | Self::RejectIncome(_) => "Rejection Reason",
            Self::GeneratePayroll => "Pay Period (YYYY-MM)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub action: PromptAction,
    pub input: String,
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,
    pub sidebar_index: usize,

    // Data
    pub records: DataSnapshot,
    /// Member whose records a member login is limited to
    pub member_scope: Option<String>,

    // Selection
    pub selected_index: usize,

    // Forms
    pub login: LoginForm,
    pub loan_wizard: Option<LoanWizard>,
    pub request_form: Option<SingleStepForm>,
    pub statement: Option<Statement>,

    // Dialogs
    pub confirm_action: Option<ConfirmAction>,
    pub prompt: Option<Prompt>,
    /// 0 = confirm, 1 = cancel
    pub confirm_selection: usize,
    error_queue: VecDeque<String>,
    pub status_message: Option<String>,
}

impl AppState {
    /// Fresh state sitting on the sign-in screen
    pub fn with_login(login: LoginForm) -> Self {
        Self {
            login,
            ..Default::default()
        }
    }

    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Reset selection
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
    }

    /// Keep the selection inside a list that may have shrunk
    pub fn clamp_selection(&mut self, len: usize) {
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn push_error(&mut self, message: String) {
        tracing::warn!("{message}");
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn error_count(&self) -> usize {
        self.error_queue.len()
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    fn in_scope(&self, member_id: &str) -> bool {
        self.member_scope.as_deref().map_or(true, |scope| scope == member_id)
    }

    pub fn members(&self) -> Vec<&Member> {
        self.records.members.iter().collect()
    }

    /// Loans, newest application first
    pub fn loans(&self) -> Vec<&Loan> {
        let mut loans: Vec<_> = self
            .records
            .loans
            .iter()
            .filter(|l| self.in_scope(&l.member_id))
            .collect();
        loans.sort_by(|a, b| b.applied_on.cmp(&a.applied_on));
        loans
    }

    pub fn accounts(&self) -> Vec<&SavingsAccount> {
        self.records
            .savings
            .iter()
            .filter(|a| self.in_scope(&a.member_id))
            .collect()
    }

    /// Pending approvals first, then by submission date
    pub fn approvals(&self) -> Vec<&Approval> {
        let mut approvals: Vec<_> = self.records.approvals.iter().collect();
        approvals.sort_by(|a, b| {
            (b.status == ApprovalStatus::Pending)
                .cmp(&(a.status == ApprovalStatus::Pending))
                .then(b.submitted_on.cmp(&a.submitted_on))
        });
        approvals
    }

    pub fn expenses(&self) -> Vec<&Expense> {
        let mut expenses: Vec<_> = self.records.expenses.iter().collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        expenses
    }

    pub fn other_income(&self) -> Vec<&OtherIncome> {
        let mut income: Vec<_> = self.records.other_income.iter().collect();
        income.sort_by(|a, b| b.date.cmp(&a.date));
        income
    }

    pub fn employees(&self) -> Vec<&Employee> {
        self.records.employees.iter().collect()
    }

    /// Latest period first
    pub fn payroll(&self) -> Vec<&PayrollRecord> {
        let mut payroll: Vec<_> = self.records.payroll.iter().collect();
        payroll.sort_by(|a, b| {
            b.period
                .cmp(&a.period)
                .then(a.employee_name.cmp(&b.employee_name))
        });
        payroll
    }

    /// Number of rows in the current list view
    pub fn list_len(&self) -> usize {
        match self.current_view {
            View::Members => self.records.members.len(),
            View::Loans => self.loans().len(),
            View::Savings => self.accounts().len(),
            View::Approvals => self.records.approvals.len(),
            View::Expenses => self.records.expenses.len(),
            View::OtherIncome => self.records.other_income.len(),
            View::Employees => self.records.employees.len(),
            View::Payroll => self.records.payroll.len(),
            View::Statement => self.statement.as_ref().map_or(0, |s| s.lines.len()),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::demo_records;

    fn state_with_demo() -> AppState {
        AppState {
            records: demo_records(),
            ..Default::default()
        }
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut state = AppState::default();
        state.move_selection_up();
        assert_eq!(state.selected_index, 0);
        state.move_selection_down(2);
        state.move_selection_down(2);
        assert_eq!(state.selected_index, 1);
        state.clamp_selection(0);
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn test_with_login_starts_clean() {
        let state = AppState::with_login(LoginForm::new(Role::Accountant));
        assert_eq!(state.current_view, View::Login);
        assert_eq!(state.login.role, Role::Accountant);
        assert!(!state.has_errors());
        assert!(state.records.members.is_empty());
    }

    #[test]
    fn test_error_queue_is_fifo() {
        let mut state = AppState::default();
        state.push_error("first".to_string());
        state.push_error("second".to_string());
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(!state.has_errors());
    }

    #[test]
    fn test_member_scope_limits_loans_and_accounts() {
        let mut state = state_with_demo();
        let all = state.loans().len();
        state.member_scope = Some("M001".to_string());
        assert!(state.loans().len() < all);
        assert!(state.loans().iter().all(|l| l.member_id == "M001"));
        assert_eq!(state.accounts().len(), 2);
    }

    #[test]
    fn test_pending_approvals_listed_first() {
        let state = state_with_demo();
        let approvals = state.approvals();
        let first_decided = approvals
            .iter()
            .position(|a| a.status != ApprovalStatus::Pending)
            .unwrap();
        assert!(approvals[first_decided..]
            .iter()
            .all(|a| a.status != ApprovalStatus::Pending));
    }

    #[test]
    fn test_menus_by_role() {
        assert_eq!(View::menu_for(Role::Admin).len(), 9);
        assert!(!View::menu_for(Role::LoanOfficer).contains(&View::Payroll));
        assert!(!View::menu_for(Role::Accountant).contains(&View::Approvals));
        assert_eq!(View::menu_for(Role::Member)[0], View::Dashboard);
    }

    #[test]
    fn test_login_form_cycles_fields() {
        let mut login = LoginForm::new(Role::Member);
        login.input_char('a');
        login.next_field();
        login.input_char('p');
        login.next_field();
        login.input_char('x');
        login.next_field();
        assert_eq!(login.active_field, 0);
        login.prev_field();
        assert_eq!(login.active_field, 2);
        assert_eq!((login.email.as_str(), login.password.as_str()), ("a", "p"));
    }
}
