//! Record list views

use super::widgets::{amount_cell, cell, draw_table, Table};
use crate::app::App;
use crate::format;
use crate::session::Role;
use crate::state::catalog::{self, EXPENSE_CATEGORIES, INCOME_SOURCES};
use crate::state::records::{ApprovalStatus, IncomeStatus, LoanStatus, MemberStatus};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    Frame,
};

fn status_span(label: &'static str, color: Color) -> Span<'static> {
    Span::styled(label, Style::default().fg(color))
}

fn is_admin(app: &App) -> bool {
    app.current_user().is_some_and(|u| u.role == Role::Admin)
}

pub fn draw_members(frame: &mut Frame, area: Rect, app: &App) {
    let rows = app
        .state
        .members()
        .into_iter()
        .map(|m| {
            let color = match m.status {
                MemberStatus::Active => Color::Green,
                MemberStatus::Inactive => Color::DarkGray,
                MemberStatus::Suspended => Color::Red,
            };
            Line::from(vec![
                Span::raw(cell(&m.id, 6)),
                Span::raw(cell(&m.name, 20)),
                Span::raw(cell(&m.phone, 15)),
                Span::raw(cell(format::date(m.joined_on), 12)),
                status_span(m.status.label(), color),
            ])
        })
        .collect();

    let table = Table {
        title: format!("Members ({})", app.state.records.members.len()),
        header: format!(
            "{}{}{}{}Status",
            cell("ID", 6),
            cell("Name", 20),
            cell("Phone", 15),
            cell("Joined", 12)
        ),
        rows,
        empty_message: "No members found.",
        actions: if is_admin(app) { "[s] cycle status" } else { "" },
    };
    draw_table(frame, area, table, app.state.selected_index);
}

pub fn draw_loans(frame: &mut Frame, area: Rect, app: &App) {
    let loans = app.state.loans();
    let rows = loans
        .iter()
        .map(|l| {
            let color = match l.status {
                LoanStatus::Active => Color::Green,
                LoanStatus::Pending => Color::Yellow,
                LoanStatus::Completed => Color::DarkGray,
                LoanStatus::Defaulted | LoanStatus::Rejected => Color::Red,
            };
            let loan_type = catalog::loan_type(&l.loan_type).map_or(l.loan_type.as_str(), |t| t.label);
            Line::from(vec![
                Span::raw(cell(&l.id, 10)),
                Span::raw(cell(app.state.records.member_name(&l.member_id), 18)),
                Span::raw(cell(loan_type, 14)),
                Span::raw(amount_cell(format::grouped(l.principal), 12)),
                Span::raw(amount_cell(format::grouped(l.balance), 12)),
                Span::raw(cell(format!("{}m @ {}%", l.term_months, l.interest_rate), 12)),
                status_span(l.status.label(), color),
            ])
        })
        .collect();

    let table = Table {
        title: format!("Loans ({})", loans.len()),
        header: format!(
            "{}{}{}{}{}{}Status",
            cell("ID", 10),
            cell("Member", 18),
            cell("Type", 14),
            amount_cell("Principal", 12),
            amount_cell("Balance", 12),
            cell("Term", 12)
        ),
        rows,
        empty_message: "No loans yet.\nPress 'n' to apply for a loan.",
        actions: "[n] new application",
    };
    draw_table(frame, area, table, app.state.selected_index);
}

pub fn draw_savings(frame: &mut Frame, area: Rect, app: &App) {
    let accounts = app.state.accounts();
    let rows = accounts
        .iter()
        .map(|a| {
            let last = a
                .transactions
                .iter()
                .map(|t| t.date)
                .max()
                .map(format::date)
                .unwrap_or_default();
            Line::from(vec![
                Span::raw(cell(&a.id, 6)),
                Span::raw(cell(app.state.records.member_name(&a.member_id), 20)),
                Span::raw(cell(a.account_type.label(), 14)),
                Span::raw(amount_cell(format::grouped(a.balance), 14)),
                Span::raw(last),
            ])
        })
        .collect();

    let total: f64 = accounts.iter().map(|a| a.balance).sum();
    let table = Table {
        title: format!(
            "Savings: {}",
            format::money(total, app.config.currency())
        ),
        header: format!(
            "{}{}{}{}Last Activity",
            cell("ID", 6),
            cell("Member", 20),
            cell("Account", 14),
            amount_cell("Balance", 14)
        ),
        rows,
        empty_message: "No savings accounts.",
        actions: "[d] deposit  [w] withdraw  [s] statement",
    };
    draw_table(frame, area, table, app.state.selected_index);
}

pub fn draw_approvals(frame: &mut Frame, area: Rect, app: &App) {
    let approvals = app.state.approvals();
    let pending = approvals
        .iter()
        .filter(|a| a.status == ApprovalStatus::Pending)
        .count();
    let rows = approvals
        .iter()
        .map(|a| {
            let color = match a.status {
                ApprovalStatus::Pending => Color::Yellow,
                ApprovalStatus::Approved => Color::Green,
                ApprovalStatus::Rejected => Color::Red,
            };
            let amount = a.amount.map(format::grouped).unwrap_or_default();
            Line::from(vec![
                Span::raw(cell(&a.id, 10)),
                Span::raw(cell(a.subject.label(), 11)),
                Span::raw(cell(app.state.records.member_name(&a.member_id), 18)),
                Span::raw(amount_cell(amount, 12)),
                Span::raw(cell(format::date(a.submitted_on), 12)),
                status_span(a.status.label(), color),
                Span::styled(
                    a.note.as_deref().map(|n| format!("  {n}")).unwrap_or_default(),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let table = Table {
        title: format!("Approvals ({pending} pending)"),
        header: format!(
            "{}{}{}{}{}Status",
            cell("ID", 10),
            cell("Type", 11),
            cell("Member", 18),
            amount_cell("Amount", 12),
            cell("Submitted", 12)
        ),
        rows,
        empty_message: "Nothing waiting for approval.",
        actions: "[a] approve  [r] reject",
    };
    draw_table(frame, area, table, app.state.selected_index);
}

pub fn draw_expenses(frame: &mut Frame, area: Rect, app: &App) {
    let expenses = app.state.expenses();
    let rows = expenses
        .iter()
        .map(|e| {
            let category =
                catalog::option_label(EXPENSE_CATEGORIES, &e.category).unwrap_or(e.category.as_str());
            Line::from(vec![
                Span::raw(cell(&e.id, 10)),
                Span::raw(cell(format::date(e.date), 12)),
                Span::raw(cell(category, 16)),
                Span::raw(cell(&e.description, 26)),
                Span::raw(amount_cell(format::grouped(e.amount), 12)),
            ])
        })
        .collect();

    let total: f64 = expenses.iter().map(|e| e.amount).sum();
    let table = Table {
        title: format!("Expenses: {}", format::money(total, app.config.currency())),
        header: format!(
            "{}{}{}{}{}",
            cell("ID", 10),
            cell("Date", 12),
            cell("Category", 16),
            cell("Description", 26),
            amount_cell("Amount", 12)
        ),
        rows,
        empty_message: "No expenses recorded.\nPress 'n' to record one.",
        actions: "[n] new",
    };
    draw_table(frame, area, table, app.state.selected_index);
}

pub fn draw_other_income(frame: &mut Frame, area: Rect, app: &App) {
    let income = app.state.other_income();
    let rows = income
        .iter()
        .map(|i| {
            let color = match i.status {
                IncomeStatus::Pending => Color::Yellow,
                IncomeStatus::Verified => Color::Green,
                IncomeStatus::Rejected => Color::Red,
            };
            let source = catalog::option_label(INCOME_SOURCES, &i.source).unwrap_or(i.source.as_str());
            Line::from(vec![
                Span::raw(cell(&i.id, 10)),
                Span::raw(cell(format::date(i.date), 12)),
                Span::raw(cell(source, 16)),
                Span::raw(cell(&i.description, 22)),
                Span::raw(amount_cell(format::grouped(i.amount), 12)),
                status_span(i.status.label(), color),
            ])
        })
        .collect();

    let table = Table {
        title: format!("Other Income ({})", income.len()),
        header: format!(
            "{}{}{}{}{}Status",
            cell("ID", 10),
            cell("Date", 12),
            cell("Source", 16),
            cell("Description", 22),
            amount_cell("Amount", 12)
        ),
        rows,
        empty_message: "No other income recorded.\nPress 'n' to record some.",
        actions: "[n] new  [e] edit  [x] delete  [v] verify  [r] reject",
    };
    draw_table(frame, area, table, app.state.selected_index);
}

pub fn draw_employees(frame: &mut Frame, area: Rect, app: &App) {
    let employees = app.state.employees();
    let rows = employees
        .iter()
        .map(|e| {
            let (label, color) = if e.active {
                ("Active", Color::Green)
            } else {
                ("Inactive", Color::DarkGray)
            };
            Line::from(vec![
                Span::raw(cell(&e.id, 8)),
                Span::raw(cell(&e.name, 20)),
                Span::raw(cell(&e.position, 18)),
                Span::raw(cell(&e.department, 14)),
                Span::raw(amount_cell(format::grouped(e.salary), 12)),
                status_span(label, color),
            ])
        })
        .collect();

    let table = Table {
        title: format!("Employees ({})", employees.len()),
        header: format!(
            "{}{}{}{}{}Status",
            cell("ID", 8),
            cell("Name", 20),
            cell("Position", 18),
            cell("Department", 14),
            amount_cell("Salary", 12)
        ),
        rows,
        empty_message: "No employees.\nPress 'n' to add one.",
        actions: "[n] new  [e] edit  [x] delete",
    };
    draw_table(frame, area, table, app.state.selected_index);
}

pub fn draw_payroll(frame: &mut Frame, area: Rect, app: &App) {
    let payroll = app.state.payroll();
    let rows = payroll
        .iter()
        .map(|p| {
            Line::from(vec![
                Span::raw(cell(&p.period, 9)),
                Span::raw(cell(&p.employee_name, 20)),
                Span::raw(amount_cell(format::grouped(p.gross), 12)),
                Span::raw(amount_cell(format::grouped(p.tax), 10)),
                Span::raw(amount_cell(format::grouped(p.social_security), 10)),
                Span::raw(amount_cell(format::grouped(p.net), 12)),
                Span::raw(p.status.label()),
            ])
        })
        .collect();

    let table = Table {
        title: format!("Payroll ({} payslips)", payroll.len()),
        header: format!(
            "{}{}{}{}{}{}Status",
            cell("Period", 9),
            cell("Employee", 20),
            amount_cell("Gross", 12),
            amount_cell("PAYE", 10),
            amount_cell("NSSF", 10),
            amount_cell("Net", 12)
        ),
        rows,
        empty_message: "No payroll generated yet.\nPress 'g' to generate a pay period.",
        actions: "[g] generate",
    };
    draw_table(frame, area, table, app.state.selected_index);
}
