//! Application state and core logic

use crate::config::SaccoConfig;
use crate::data::SaccoData;
use crate::error::{AuthError, SubmissionError};
use crate::session::{AuthProvider, Role, Session, User};
use crate::state::fields;
use crate::state::records::{Loan, MemberUpdate};
use crate::state::{
    names, ConfirmAction, FieldKind, FieldValue, Form, FormKind, FormState, FormSubmission,
    LoanApplication, LoanWizard, LoginForm, Prompt, PromptAction, SingleStepForm, Statement,
    SubmissionHandler, SubmitOutcome, View, DATE_FORMAT,
};
use crate::state::AppState;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Point a request failure at the wizard step and label the user filled in
fn describe_submission_error(err: &SubmissionError) -> String {
    let SubmissionError::Request(request) = err else {
        return err.to_string();
    };
    match fields::locate(request.field()) {
        Some((step, spec)) => format!(
            "Step {step} ({}), {}: {}",
            fields::step_title(step),
            spec.label,
            request.reason()
        ),
        None => request.to_string(),
    }
}

/// Files a completed loan application with the record store
struct LoanSubmission<'a> {
    data: &'a mut dyn SaccoData,
    applicant: String,
    filed: Option<Loan>,
}

#[async_trait]
impl SubmissionHandler for LoanSubmission<'_> {
    async fn on_submit(&mut self, state: &FormState) -> Result<(), SubmissionError> {
        let application = LoanApplication::try_from(state)?;
        let loan = self
            .data
            .submit_loan_application(&self.applicant, application)
            .await?;
        self.filed = Some(loan);
        Ok(())
    }

    fn on_cancel(&mut self) {
        tracing::info!("Loan application for {} cancelled", self.applicant);
    }
}

/// Shared field editing for the wizard and the single-step forms.
/// Returns false when the key is not a field edit.
fn edit_form_field<F: Form>(form: &mut F, key: KeyEvent) -> bool {
    let Some(spec) = form.active_spec() else {
        return false;
    };
    let is_choice = matches!(spec.kind, FieldKind::Choice(_));
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Left | KeyCode::Right if is_choice => {
            let forward = key.code == KeyCode::Right;
            form.edit_active(|v| v.cycled(spec.options(), forward));
        }
        KeyCode::Char(' ') if is_choice => form.edit_active(|v| v.cycled(spec.options(), true)),
        KeyCode::Char(' ') if matches!(spec.kind, FieldKind::Boolean) => {
            form.edit_active(FieldValue::toggled)
        }
        KeyCode::Char(c) => form.edit_active(|v| v.with_char(c)),
        KeyCode::Backspace => form.edit_active(FieldValue::without_last_char),
        _ => return false,
    }
    true
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn date_value(date: NaiveDate) -> FieldValue {
    FieldValue::text(date.format(DATE_FORMAT).to_string())
}

fn amount_value(amount: f64) -> FieldValue {
    FieldValue::numeric(format!("{amount:.0}"))
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    pub session: Session,
    pub config: SaccoConfig,
    auth: Arc<dyn AuthProvider>,
    data: Box<dyn SaccoData>,
    /// Sign-in running in the background
    pending_login: Option<JoinHandle<Result<User, AuthError>>>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(
        config: SaccoConfig,
        session: Session,
        auth: Arc<dyn AuthProvider>,
        data: Box<dyn SaccoData>,
    ) -> Self {
        let state = AppState::with_login(LoginForm::new(config.default_role()));
        Self {
            state,
            session,
            config,
            auth,
            data,
            pending_login: None,
            quit: false,
        }
    }

    /// Open the dashboard straight away when a stored session was restored
    pub async fn start(&mut self) -> Result<()> {
        if let Some(user) = self.session.current().cloned() {
            self.enter_session(&user).await;
        }
        Ok(())
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether a sign-in is in flight
    pub fn is_busy(&self) -> bool {
        self.pending_login.is_some()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.current()
    }

    fn role(&self) -> Option<Role> {
        self.session.current().map(|u| u.role)
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Reload every collection from the record store
    pub async fn refresh(&mut self) {
        match self.data.snapshot().await {
            Ok(records) => self.state.records = records,
            Err(err) => self.push_error(format!("Failed to load records: {err}")),
        }
        let len = self.state.list_len();
        self.state.clamp_selection(len);
    }

    async fn enter_session(&mut self, user: &User) {
        self.state.member_scope = match user.role {
            Role::Member => user.member_id.clone(),
            _ => None,
        };
        self.refresh().await;
        self.state.view_history.clear();
        self.state.current_view = View::Dashboard;
        self.state.sidebar_index = 0;
        self.state.reset_selection();
    }

    /// Poll background work. Called once per event-loop iteration.
    pub async fn tick(&mut self) {
        let finished = self
            .pending_login
            .as_ref()
            .is_some_and(|handle| handle.is_finished());
        if !finished {
            return;
        }
        let Some(handle) = self.pending_login.take() else {
            return;
        };
        self.state.login.busy = false;

        let result = handle
            .await
            .unwrap_or_else(|err| Err(AuthError::Interrupted(err.to_string())));
        match result {
            Ok(user) => {
                self.state.login.password.clear();
                if let Err(err) = self.session.begin(user.clone()) {
                    self.push_error(format!("Signed in, but the session could not be saved: {err}"));
                }
                self.enter_session(&user).await;
            }
            Err(err) => self.push_error(err.to_string()),
        }
    }

    fn begin_login(&mut self) {
        if self.pending_login.is_some() {
            return;
        }
        let auth = Arc::clone(&self.auth);
        let email = self.state.login.email.clone();
        let password = self.state.login.password.clone();
        let role = self.state.login.role;

        tracing::debug!("Signing in {email} as {}", role.label());
        self.state.login.busy = true;
        self.pending_login = Some(tokio::spawn(async move {
            auth.login(&email, &password, role).await
        }));
    }

    async fn logout(&mut self) {
        let result = self.session.logout();
        self.state = AppState::with_login(LoginForm::new(self.config.default_role()));
        if let Err(err) = result {
            self.push_error(format!("Could not clear the stored session: {err}"));
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        if self.state.prompt.is_some() {
            return self.handle_prompt_key(key).await;
        }

        if self.state.confirm_action.is_some() {
            return self.handle_confirm_key(key).await;
        }

        if self.state.current_view != View::Login && !self.session.is_signed_in() {
            self.state.current_view = View::Login;
            return Ok(());
        }

        self.state.status_message = None;

        match self.state.current_view {
            View::Login => self.handle_login_key(key),
            View::LoanApplication => self.handle_loan_wizard_key(key).await,
            View::RequestForm => self.handle_request_form_key(key).await,
            _ => self.handle_list_key(key).await,
        }
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        self.state.view_history.push(self.state.current_view);
        self.state.current_view = view;
        self.state.reset_selection();
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        // Skip form views in history to go back to the last non-form view
        while let Some(view) = self.state.view_history.pop() {
            if view.is_form_view() {
                continue;
            }
            self.state.current_view = view;
            self.state.reset_selection();
            return;
        }
        self.state.current_view = View::Dashboard;
    }

    /// Switch to a sidebar entry
    fn open_menu_item(&mut self, index: usize) {
        let Some(role) = self.role() else {
            return;
        };
        if let Some(view) = View::menu_for(role).get(index) {
            self.state.sidebar_index = index;
            self.state.view_history.clear();
            self.state.current_view = *view;
            self.state.reset_selection();
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.login.busy {
            return Ok(());
        }
        let on_role = self.state.login.active_field == 2;
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.login.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.login.prev_field(),
            KeyCode::Left if on_role => self.state.login.role = self.state.login.role.prev(),
            KeyCode::Right | KeyCode::Char(' ') if on_role => {
                self.state.login.role = self.state.login.role.next()
            }
            KeyCode::Enter => self.begin_login(),
            KeyCode::Char(c) => self.state.login.input_char(c),
            KeyCode::Backspace => self.state.login.backspace(),
            _ => {}
        }
        Ok(())
    }

    /// Keys shared by every list-style view
    async fn handle_list_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(role) = self.role() else {
            self.state.current_view = View::Login;
            return Ok(());
        };
        let menu_len = View::menu_for(role).len();
        let list_len = self.state.list_len();

        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('L') => self.state.confirm_action = Some(ConfirmAction::Logout),
            KeyCode::Char('j') | KeyCode::Down => self.state.move_selection_down(list_len),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Tab | KeyCode::Char(']') => {
                self.open_menu_item((self.state.sidebar_index + 1) % menu_len)
            }
            KeyCode::BackTab | KeyCode::Char('[') => {
                self.open_menu_item((self.state.sidebar_index + menu_len - 1) % menu_len)
            }
            KeyCode::Char(c @ '1'..='9') => {
                self.open_menu_item(c as usize - '1' as usize);
            }
            KeyCode::F(5) => self.refresh().await,
            KeyCode::Esc if self.state.current_view == View::Statement => {
                self.state.statement = None;
                self.go_back();
            }
            _ => self.handle_view_action(role, key).await,
        }
        Ok(())
    }

    /// View-specific actions on the selected row
    async fn handle_view_action(&mut self, role: Role, key: KeyEvent) {
        let KeyCode::Char(c) = key.code else {
            return;
        };
        let index = self.state.selected_index;

        match (self.state.current_view, c) {
            (View::Loans, 'n') => self.open_loan_wizard(),
            (View::Savings, 'd' | 'w' | 's') => {
                let kind = match c {
                    'd' => FormKind::Deposit,
                    'w' => FormKind::Withdrawal,
                    _ => FormKind::Statement,
                };
                self.open_account_form(kind);
            }
            (View::Members, 's') if role == Role::Admin => {
                let Some(member) = self.state.members().get(index).map(|m| (*m).clone()) else {
                    return;
                };
                let update = MemberUpdate {
                    status: Some(member.status.next()),
                    ..Default::default()
                };
                match self.data.update_member(&member.id, update).await {
                    Ok(updated) => {
                        self.state.status_message = Some(format!(
                            "{} is now {}",
                            updated.name,
                            updated.status.label()
                        ));
                        self.refresh().await;
                    }
                    Err(err) => self.push_error(err.to_string()),
                }
            }
            (View::Approvals, 'a') => {
                let Some(id) = self.state.approvals().get(index).map(|a| a.id.clone()) else {
                    return;
                };
                match self.data.approve_item(&id).await {
                    Ok(approval) => {
                        self.state.status_message =
                            Some(format!("{} request {id} approved", approval.subject.label()));
                        self.refresh().await;
                    }
                    Err(err) => self.push_error(err.to_string()),
                }
            }
            (View::Approvals, 'r') => {
                if let Some(id) = self.state.approvals().get(index).map(|a| a.id.clone()) {
                    self.open_prompt(PromptAction::RejectApproval(id), String::new());
                }
            }
            (View::Expenses, 'n') => {
                let state = FormState::new().with(names::DATE, date_value(today()));
                self.open_form(SingleStepForm::prefilled(FormKind::Expense, state, None));
            }
            (View::OtherIncome, 'n') => {
                let state = FormState::new().with(names::DATE, date_value(today()));
                self.open_form(SingleStepForm::prefilled(FormKind::OtherIncome, state, None));
            }
            (View::OtherIncome, 'e') => {
                let Some(income) = self.state.other_income().get(index).map(|i| (*i).clone())
                else {
                    return;
                };
                let state = FormState::new()
                    .with(names::SOURCE, FieldValue::choice(income.source))
                    .with(names::DESCRIPTION, FieldValue::text(income.description))
                    .with(names::AMOUNT, amount_value(income.amount))
                    .with(names::DATE, date_value(income.date));
                self.open_form(SingleStepForm::prefilled(
                    FormKind::OtherIncome,
                    state,
                    Some(income.id),
                ));
            }
            (View::OtherIncome, 'x') => {
                if let Some(id) = self.state.other_income().get(index).map(|i| i.id.clone()) {
                    self.state.confirm_action = Some(ConfirmAction::DeleteOtherIncome(id));
                }
            }
            (View::OtherIncome, 'v') => {
                let Some(id) = self.state.other_income().get(index).map(|i| i.id.clone()) else {
                    return;
                };
                match self.data.verify_other_income(&id).await {
                    Ok(_) => {
                        self.state.status_message = Some(format!("Income {id} verified"));
                        self.refresh().await;
                    }
                    Err(err) => self.push_error(err.to_string()),
                }
            }
            (View::OtherIncome, 'r') => {
                if let Some(id) = self.state.other_income().get(index).map(|i| i.id.clone()) {
                    self.open_prompt(PromptAction::RejectIncome(id), String::new());
                }
            }
            (View::Employees, 'n') => self.open_form(SingleStepForm::new(FormKind::Employee)),
            (View::Employees, 'e') => {
                let Some(employee) = self.state.employees().get(index).map(|e| (*e).clone())
                else {
                    return;
                };
                let mut state = FormState::new()
                    .with(names::NAME, FieldValue::text(employee.name))
                    .with(names::POSITION, FieldValue::text(employee.position))
                    .with(names::DEPARTMENT, FieldValue::text(employee.department))
                    .with(names::SALARY, amount_value(employee.salary));
                if let Some(phone) = employee.phone {
                    state = state.with(names::PHONE, FieldValue::text(phone));
                }
                self.open_form(SingleStepForm::prefilled(
                    FormKind::Employee,
                    state,
                    Some(employee.id),
                ));
            }
            (View::Employees, 'x') => {
                if let Some(id) = self.state.employees().get(index).map(|e| e.id.clone()) {
                    self.state.confirm_action = Some(ConfirmAction::DeleteEmployee(id));
                }
            }
            (View::Payroll, 'g') => {
                let period = today().format("%Y-%m").to_string();
                self.open_prompt(PromptAction::GeneratePayroll, period);
            }
            _ => {}
        }
    }

    fn open_prompt(&mut self, action: PromptAction, input: String) {
        self.state.prompt = Some(Prompt { action, input });
    }

    fn open_loan_wizard(&mut self) {
        self.state.loan_wizard = Some(LoanWizard::new());
        self.navigate(View::LoanApplication);
    }

    fn open_form(&mut self, form: SingleStepForm) {
        self.state.request_form = Some(form);
        self.navigate(View::RequestForm);
    }

    /// Deposit, withdrawal or statement form for the selected account
    fn open_account_form(&mut self, kind: FormKind) {
        let selected = self
            .state
            .accounts()
            .get(self.state.selected_index)
            .map(|a| (a.member_id.clone(), a.account_type));

        let mut state = FormState::new();
        if let Some((member_id, account_type)) = selected {
            state = state
                .with(names::MEMBER_ID, FieldValue::text(member_id))
                .with(names::ACCOUNT_TYPE, FieldValue::choice(account_type.key()));
        } else if let Some(member_id) = self.state.member_scope.clone() {
            state = state.with(names::MEMBER_ID, FieldValue::text(member_id));
        }
        if kind == FormKind::Statement {
            let today = today();
            let year_start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
            state = state
                .with(names::START_DATE, date_value(year_start))
                .with(names::END_DATE, date_value(today))
                .with(names::FORMAT, FieldValue::choice("pdf"));
        }
        self.open_form(SingleStepForm::prefilled(kind, state, None));
    }

    fn close_loan_wizard(&mut self) {
        self.state.loan_wizard = None;
        self.go_back();
    }

    async fn handle_loan_wizard_key(&mut self, key: KeyEvent) -> Result<()> {
        let applicant = self.applicant();
        let Some(wizard) = self.state.loan_wizard.as_mut() else {
            self.go_back();
            return Ok(());
        };

        match key.code {
            KeyCode::Esc => {
                let mut handler = LoanSubmission {
                    data: self.data.as_mut(),
                    applicant,
                    filed: None,
                };
                wizard.cancel(&mut handler);
                self.close_loan_wizard();
            }
            KeyCode::Enter if wizard.is_last_step() => {
                // Validate before asking for confirmation
                if wizard.next().is_empty() {
                    self.state.confirm_action = Some(ConfirmAction::SubmitLoanApplication);
                    self.state.confirm_selection = 0;
                }
            }
            KeyCode::Enter => {
                wizard.next();
            }
            KeyCode::PageDown => {
                wizard.next();
            }
            KeyCode::PageUp if !wizard.is_first_step() => wizard.previous(),
            _ => {
                edit_form_field(wizard, key);
            }
        }
        Ok(())
    }

    /// Member the loan is filed for
    fn applicant(&self) -> String {
        self.session
            .current()
            .map(|u| u.member_id.clone().unwrap_or_else(|| u.id.clone()))
            .unwrap_or_default()
    }

    async fn submit_loan_application(&mut self) {
        let applicant = self.applicant();
        let Some(wizard) = self.state.loan_wizard.as_mut() else {
            return;
        };
        let mut handler = LoanSubmission {
            data: self.data.as_mut(),
            applicant,
            filed: None,
        };

        match wizard.submit(&mut handler).await {
            Ok(SubmitOutcome::Submitted) => {
                let id = handler.filed.map(|loan| loan.id).unwrap_or_default();
                self.state.status_message =
                    Some(format!("Loan application {id} submitted for approval"));
                self.close_loan_wizard();
                self.refresh().await;
            }
            // Errors are already on the wizard
            Ok(SubmitOutcome::Invalid(_))
            | Ok(SubmitOutcome::NotOnFinalStep)
            | Ok(SubmitOutcome::AlreadySubmitted) => {}
            Err(err) => self.push_error(format!(
                "Could not submit application: {}",
                describe_submission_error(&err)
            )),
        }
    }

    fn close_request_form(&mut self) {
        self.state.request_form = None;
        self.go_back();
    }

    async fn handle_request_form_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(form) = self.state.request_form.as_mut() else {
            self.go_back();
            return Ok(());
        };

        match key.code {
            KeyCode::Esc => self.close_request_form(),
            KeyCode::Enter => {
                if let Ok(submission) = form.submit(Some(&self.state.records)) {
                    self.dispatch_submission(submission).await;
                }
            }
            _ => {
                edit_form_field(form, key);
            }
        }
        Ok(())
    }

    /// Send a validated single-step form to the record store
    async fn dispatch_submission(&mut self, submission: FormSubmission) {
        if let FormSubmission::Statement(request) = submission {
            match Statement::build(&request, &self.state.records) {
                Ok(statement) => {
                    self.state.statement = Some(statement);
                    self.close_request_form();
                    self.navigate(View::Statement);
                }
                Err(err) => self.push_error(err.to_string()),
            }
            return;
        }

        let result = match submission {
            FormSubmission::Deposit(request) => self
                .data
                .submit_deposit(request)
                .await
                .map(|a| format!("Deposit request {} sent for approval", a.id)),
            FormSubmission::Withdrawal(request) => self
                .data
                .submit_withdrawal(request)
                .await
                .map(|a| format!("Withdrawal request {} sent for approval", a.id)),
            FormSubmission::Expense(expense) => self
                .data
                .add_expense(expense)
                .await
                .map(|e| format!("Expense {} recorded", e.id)),
            FormSubmission::OtherIncome { id: None, income } => self
                .data
                .add_other_income(income)
                .await
                .map(|i| format!("Income {} recorded", i.id)),
            FormSubmission::OtherIncome {
                id: Some(id),
                income,
            } => self
                .data
                .update_other_income(&id, income)
                .await
                .map(|i| format!("Income {} updated", i.id)),
            FormSubmission::Employee { id: None, employee } => self
                .data
                .add_employee(employee)
                .await
                .map(|e| format!("Employee {} added", e.name)),
            FormSubmission::Employee {
                id: Some(id),
                employee,
            } => self
                .data
                .update_employee(&id, employee)
                .await
                .map(|e| format!("Employee {} updated", e.name)),
            FormSubmission::Statement(_) => return,
        };

        match result {
            Ok(message) => {
                self.state.status_message = Some(message);
                self.close_request_form();
                self.refresh().await;
            }
            Err(err) => self.push_error(err.to_string()),
        }
    }

    async fn handle_confirm_key(&mut self, key: KeyEvent) -> Result<()> {
        let confirmed = match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down | KeyCode::Tab => {
                self.state.confirm_selection = 1 - self.state.confirm_selection.min(1);
                return Ok(());
            }
            KeyCode::Char('y') => true,
            KeyCode::Char('n') | KeyCode::Esc => false,
            KeyCode::Enter => self.state.confirm_selection == 0,
            _ => return Ok(()),
        };

        let Some(action) = self.state.confirm_action.take() else {
            return Ok(());
        };
        self.state.confirm_selection = 0;
        if !confirmed {
            return Ok(());
        }

        match action {
            ConfirmAction::SubmitLoanApplication => self.submit_loan_application().await,
            ConfirmAction::DeleteEmployee(id) => match self.data.delete_employee(&id).await {
                Ok(()) => {
                    self.state.status_message = Some(format!("Employee {id} deleted"));
                    self.refresh().await;
                }
                Err(err) => self.push_error(err.to_string()),
            },
            ConfirmAction::DeleteOtherIncome(id) => {
                match self.data.delete_other_income(&id).await {
                    Ok(()) => {
                        self.state.status_message = Some(format!("Income {id} deleted"));
                        self.refresh().await;
                    }
                    Err(err) => self.push_error(err.to_string()),
                }
            }
            ConfirmAction::Logout => self.logout().await,
        }
        Ok(())
    }

    async fn handle_prompt_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(prompt) = self.state.prompt.as_mut() else {
            return Ok(());
        };
        match key.code {
            KeyCode::Esc => self.state.prompt = None,
            KeyCode::Backspace => {
                prompt.input.pop();
            }
            KeyCode::Char(c) => prompt.input.push(c),
            KeyCode::Enter => {
                let input = prompt.input.trim().to_string();
                if input.is_empty() {
                    return Ok(());
                }
                if let Some(Prompt { action, .. }) = self.state.prompt.take() {
                    self.run_prompt_action(action, &input).await;
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn run_prompt_action(&mut self, action: PromptAction, input: &str) {
        let result = match action {
            PromptAction::RejectApproval(id) => self
                .data
                .reject_item(&id, input)
                .await
                .map(|a| format!("{} request {id} rejected", a.subject.label())),
            PromptAction::RejectIncome(id) => self
                .data
                .reject_other_income(&id, input)
                .await
                .map(|_| format!("Income {id} rejected")),
            PromptAction::GeneratePayroll => self
                .data
                .generate_payroll(input)
                .await
                .map(|records| format!("Generated {} payslips for {input}", records.len())),
        };
        match result {
            Ok(message) => {
                self.state.status_message = Some(message);
                self.refresh().await;
            }
            Err(err) => self.push_error(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{demo_records, InMemoryData, MockSaccoData};
    use crate::error::DataError;
    use crate::session::{MockAuthProvider, SessionStore, SimulatedAuth};
    use crate::state::records::{ApprovalStatus, LoanStatus};
    use chrono::Utc;
    use crossterm::event::KeyModifiers;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn demo_app() -> App {
        App::new(
            SaccoConfig::default(),
            Session::restore(SessionStore::ephemeral()),
            Arc::new(SimulatedAuth::new(Duration::ZERO)),
            Box::new(InMemoryData::demo()),
        )
    }

    fn user(role: Role) -> User {
        User {
            id: "u-1".to_string(),
            name: role.display_name().to_string(),
            email: "staff@sacco.test".to_string(),
            role,
            member_id: (role == Role::Member).then(|| "M001".to_string()),
            signed_in_at: Utc::now(),
        }
    }

    async fn signed_in(mut app: App, role: Role) -> App {
        app.session.begin(user(role)).unwrap();
        app.start().await.unwrap();
        app
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    async fn wait_for_login(app: &mut App) {
        while app.is_busy() {
            tokio::task::yield_now().await;
            app.tick().await;
        }
    }

    fn fill_loan_wizard(app: &mut App) {
        let wizard = app.state.loan_wizard.as_mut().unwrap();
        for (name, value) in [
            (fields::LOAN_TYPE, FieldValue::choice("personal")),
            (fields::AMOUNT, FieldValue::numeric("1000000")),
            (fields::PURPOSE, FieldValue::text("Stock for shop")),
            (fields::TERM, FieldValue::choice("12")),
            (fields::REPAYMENT_SOURCE, FieldValue::choice("salary")),
            (fields::MONTHLY_INCOME, FieldValue::numeric("900000")),
            (fields::MONTHLY_EXPENSES, FieldValue::numeric("300000")),
            (fields::GUARANTOR1_NAME, FieldValue::text("Sarah Namuli")),
            (fields::GUARANTOR1_PHONE, FieldValue::text("+256700100002")),
            (fields::AGREE_TO_TERMS, FieldValue::Boolean(true)),
        ] {
            wizard.set_field(name, value);
        }
    }

    #[tokio::test]
    async fn test_login_reaches_dashboard() {
        let mut app = demo_app();
        assert_eq!(app.state.current_view, View::Login);

        type_text(&mut app, "admin@sacco.test").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(&mut app, "secret").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert!(app.state.login.busy);

        wait_for_login(&mut app).await;
        assert_eq!(app.state.current_view, View::Dashboard);
        assert_eq!(app.current_user().unwrap().role, Role::Admin);
        assert!(!app.state.records.members.is_empty());
        assert!(app.state.login.password.is_empty());
    }

    #[tokio::test]
    async fn test_login_without_credentials_shows_error() {
        let mut app = demo_app();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        wait_for_login(&mut app).await;

        assert_eq!(app.state.current_view, View::Login);
        assert_eq!(
            app.state.current_error(),
            Some("Email and password are required")
        );
        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert!(!app.state.has_errors());
    }

    #[tokio::test]
    async fn test_login_uses_selected_role() {
        let mut auth = MockAuthProvider::new();
        auth.expect_login()
            .withf(|email, _, role| email.to_string() == "acc@sacco.test" && *role == Role::Accountant)
            .times(1)
            .returning(|_, _, role| Ok(user(role)));
        let mut app = App::new(
            SaccoConfig::default(),
            Session::restore(SessionStore::ephemeral()),
            Arc::new(auth),
            Box::new(InMemoryData::demo()),
        );

        type_text(&mut app, "acc@sacco.test").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(&mut app, "pw").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        wait_for_login(&mut app).await;

        assert_eq!(app.current_user().unwrap().role, Role::Accountant);
    }

    #[tokio::test]
    async fn test_restored_session_skips_login() {
        let app = signed_in(demo_app(), Role::LoanOfficer).await;
        assert_eq!(app.state.current_view, View::Dashboard);
    }

    #[tokio::test]
    async fn test_member_login_is_scoped() {
        let app = signed_in(demo_app(), Role::Member).await;
        assert_eq!(app.state.member_scope.as_deref(), Some("M001"));
        assert!(app.state.loans().iter().all(|l| l.member_id == "M001"));
    }

    #[tokio::test]
    async fn test_sidebar_follows_role_menu() {
        let mut app = signed_in(demo_app(), Role::Accountant).await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        assert_eq!(app.state.current_view, View::Savings);
        app.handle_key(key(KeyCode::Char('6'))).await.unwrap();
        assert_eq!(app.state.current_view, View::Payroll);
        // Out of range digit is ignored
        app.handle_key(key(KeyCode::Char('9'))).await.unwrap();
        assert_eq!(app.state.current_view, View::Payroll);
    }

    #[tokio::test]
    async fn test_loan_wizard_blocks_then_submits() {
        let mut app = signed_in(demo_app(), Role::Member).await;
        app.handle_key(key(KeyCode::Char('2'))).await.unwrap();
        let loans_before = app.state.records.loans.len();
        app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
        assert_eq!(app.state.current_view, View::LoanApplication);

        // Empty step 1 does not advance
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        let wizard = app.state.loan_wizard.as_ref().unwrap();
        assert_eq!(wizard.step(), 1);
        assert!(wizard.errors().contains(fields::AMOUNT));

        fill_loan_wizard(&mut app);
        for _ in 0..3 {
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
        }
        assert_eq!(app.state.loan_wizard.as_ref().unwrap().step(), 4);

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(
            app.state.confirm_action,
            Some(ConfirmAction::SubmitLoanApplication)
        );
        app.handle_key(key(KeyCode::Char('y'))).await.unwrap();

        assert!(app.state.loan_wizard.is_none());
        assert_eq!(app.state.current_view, View::Loans);
        assert_eq!(app.state.records.loans.len(), loans_before + 1);
        assert!(app.state.records.loans.iter().any(|l| {
            l.status == LoanStatus::Pending
                && l.member_id == "M001"
                && l.principal == 1_000_000.0
        }));
    }

    #[tokio::test]
    async fn test_loan_wizard_keeps_step_four_on_store_failure() {
        let mut data = MockSaccoData::new();
        data.expect_snapshot().returning(|| Ok(demo_records()));
        data.expect_submit_loan_application()
            .times(1)
            .returning(|_, _| Err(DataError::InvalidState("Lending is paused".into())));
        let app = App::new(
            SaccoConfig::default(),
            Session::restore(SessionStore::ephemeral()),
            Arc::new(SimulatedAuth::new(Duration::ZERO)),
            Box::new(data),
        );
        let mut app = signed_in(app, Role::Admin).await;
        app.open_loan_wizard();
        fill_loan_wizard(&mut app);
        for _ in 0..4 {
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
        }
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert_eq!(app.state.current_view, View::LoanApplication);
        assert_eq!(app.state.loan_wizard.as_ref().unwrap().step(), 4);
        assert!(app.state.current_error().unwrap().contains("Lending is paused"));
    }

    #[tokio::test]
    async fn test_submit_error_names_step_and_field() {
        let mut app = signed_in(demo_app(), Role::Admin).await;
        app.open_loan_wizard();
        fill_loan_wizard(&mut app);
        app.state
            .loan_wizard
            .as_mut()
            .unwrap()
            .set_field(fields::AMOUNT, FieldValue::numeric("."));
        for _ in 0..4 {
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
        }
        assert_eq!(app.state.loan_wizard.as_ref().unwrap().step(), 4);
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert_eq!(app.state.current_view, View::LoanApplication);
        assert_eq!(
            app.state.current_error(),
            Some(
                "Could not submit application: \
                 Step 1 (Loan Details), Amount (UGX): must be a positive number"
            )
        );
    }

    #[tokio::test]
    async fn test_cancel_wizard_discards_state() {
        let mut app = signed_in(demo_app(), Role::Admin).await;
        app.handle_key(key(KeyCode::Char('3'))).await.unwrap();
        app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
        type_text(&mut app, " ").await;
        app.handle_key(key(KeyCode::Esc)).await.unwrap();

        assert!(app.state.loan_wizard.is_none());
        assert_eq!(app.state.current_view, View::Loans);
    }

    #[tokio::test]
    async fn test_withdrawal_over_balance_never_reaches_store() {
        let mut data = MockSaccoData::new();
        data.expect_snapshot().returning(|| Ok(demo_records()));
        data.expect_submit_withdrawal().never();
        let app = App::new(
            SaccoConfig::default(),
            Session::restore(SessionStore::ephemeral()),
            Arc::new(SimulatedAuth::new(Duration::ZERO)),
            Box::new(data),
        );
        let mut app = signed_in(app, Role::Member).await;
        app.handle_key(key(KeyCode::Char('3'))).await.unwrap();
        app.handle_key(key(KeyCode::Char('w'))).await.unwrap();
        assert_eq!(app.state.current_view, View::RequestForm);

        // Member and account are prefilled, move to the amount field
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(&mut app, "999999999").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        let form = app.state.request_form.as_ref().unwrap();
        assert!(form.errors().contains(names::AMOUNT));
        assert!(form.errors().contains(names::REASON));
    }

    #[tokio::test]
    async fn test_statement_form_opens_statement_view() {
        let mut app = signed_in(demo_app(), Role::Member).await;
        app.handle_key(key(KeyCode::Char('3'))).await.unwrap();
        app.handle_key(key(KeyCode::Char('s'))).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert_eq!(app.state.current_view, View::Statement);
        let statement = app.state.statement.as_ref().unwrap();
        assert_eq!(statement.member_id, "M001");

        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.state.current_view, View::Savings);
        assert!(app.state.statement.is_none());
    }

    #[tokio::test]
    async fn test_approve_selected_request() {
        let mut app = signed_in(demo_app(), Role::LoanOfficer).await;
        app.handle_key(key(KeyCode::Char('4'))).await.unwrap();
        assert_eq!(app.state.current_view, View::Approvals);
        let id = app.state.approvals()[0].id.clone();

        app.handle_key(key(KeyCode::Char('a'))).await.unwrap();
        let approval = app.state.records.approvals.iter().find(|a| a.id == id).unwrap();
        assert_eq!(approval.status, ApprovalStatus::Approved);
        assert!(app.state.status_message.is_some());
    }

    #[tokio::test]
    async fn test_reject_needs_reason() {
        let mut app = signed_in(demo_app(), Role::Admin).await;
        app.handle_key(key(KeyCode::Char('5'))).await.unwrap();
        let id = app.state.approvals()[0].id.clone();

        app.handle_key(key(KeyCode::Char('r'))).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        // Empty reason keeps the prompt open
        assert!(app.state.prompt.is_some());

        type_text(&mut app, "Missing payslip").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert!(app.state.prompt.is_none());
        let approval = app.state.records.approvals.iter().find(|a| a.id == id).unwrap();
        assert_eq!(approval.status, ApprovalStatus::Rejected);
        assert_eq!(approval.note.as_deref(), Some("Missing payslip"));
    }

    #[tokio::test]
    async fn test_generate_payroll_twice_shows_error() {
        let mut app = signed_in(demo_app(), Role::Accountant).await;
        app.handle_key(key(KeyCode::Char('6'))).await.unwrap();
        let before = app.state.records.payroll.len();

        for _ in 0..2 {
            app.handle_key(key(KeyCode::Char('g'))).await.unwrap();
            let prompt = app.state.prompt.as_mut().unwrap();
            prompt.input = "2030-01".to_string();
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
        }

        assert_eq!(app.state.records.payroll.len(), before + 3);
        assert!(app
            .state
            .current_error()
            .unwrap()
            .contains("already been generated"));
    }

    #[tokio::test]
    async fn test_add_expense_through_form() {
        let mut app = signed_in(demo_app(), Role::Accountant).await;
        app.handle_key(key(KeyCode::Char('3'))).await.unwrap();
        assert_eq!(app.state.current_view, View::Expenses);
        let before = app.state.records.expenses.len();

        app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
        app.handle_key(key(KeyCode::Right)).await.unwrap(); // category
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(&mut app, "Stationery").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(&mut app, "45000").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert_eq!(app.state.current_view, View::Expenses);
        assert_eq!(app.state.records.expenses.len(), before + 1);
    }

    #[tokio::test]
    async fn test_edit_employee_updates_record() {
        let mut app = signed_in(demo_app(), Role::Admin).await;
        app.handle_key(key(KeyCode::Char('8'))).await.unwrap();
        assert_eq!(app.state.current_view, View::Employees);

        app.handle_key(key(KeyCode::Char('e'))).await.unwrap();
        let form = app.state.request_form.as_ref().unwrap();
        assert_eq!(form.editing(), Some("EMP001"));
        // Salary field: append a digit
        for _ in 0..3 {
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
        }
        type_text(&mut app, "0").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        let employee = app
            .state
            .records
            .employees
            .iter()
            .find(|e| e.id == "EMP001")
            .unwrap();
        assert_eq!(employee.salary, 35_000_000.0);
    }

    #[tokio::test]
    async fn test_delete_income_requires_confirmation() {
        let mut app = signed_in(demo_app(), Role::Admin).await;
        app.handle_key(key(KeyCode::Char('7'))).await.unwrap();
        let before = app.state.records.other_income.len();

        app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
        app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
        assert_eq!(app.state.records.other_income.len(), before);

        app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.records.other_income.len(), before - 1);
    }

    #[tokio::test]
    async fn test_logout_returns_to_login() {
        let mut app = signed_in(demo_app(), Role::Admin).await;
        app.handle_key(key(KeyCode::Char('L'))).await.unwrap();
        app.handle_key(key(KeyCode::Char('y'))).await.unwrap();

        assert_eq!(app.state.current_view, View::Login);
        assert!(app.current_user().is_none());
        assert!(app.state.records.members.is_empty());
    }

    #[tokio::test]
    async fn test_quit_from_list_view() {
        let mut app = signed_in(demo_app(), Role::Admin).await;
        assert!(!app.should_quit());
        app.handle_key(key(KeyCode::Char('q'))).await.unwrap();
        assert!(app.should_quit());
    }
}
