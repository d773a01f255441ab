//! Demo records loaded at startup

use crate::state::records::{
    AccountType, Approval, ApprovalStatus, ApprovalSubject, DataSnapshot, Employee, Expense,
    IncomeStatus, Loan, LoanStatus, Member, MemberStatus, OtherIncome, PayrollRecord,
    PayrollStatus, SavingsAccount, SavingsTransaction, TransactionKind,
};
use chrono::NaiveDate;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn member(id: &str, name: &str, phone: &str, joined_on: NaiveDate, status: MemberStatus) -> Member {
    let email = format!(
        "{}@example.com",
        name.to_lowercase().replace(' ', ".")
    );
    Member {
        id: id.to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
        email,
        joined_on,
        status,
    }
}

fn tx(date: NaiveDate, kind: TransactionKind, amount: f64, reference: &str) -> SavingsTransaction {
    SavingsTransaction {
        date,
        kind,
        amount,
        reference: reference.to_string(),
    }
}

fn account(
    id: &str,
    member_id: &str,
    account_type: AccountType,
    transactions: Vec<SavingsTransaction>,
) -> SavingsAccount {
    SavingsAccount {
        id: id.to_string(),
        member_id: member_id.to_string(),
        account_type,
        balance: transactions.iter().map(SavingsTransaction::signed_amount).sum(),
        transactions,
    }
}

#[allow(clippy::too_many_arguments)]
fn loan(
    id: &str,
    member_id: &str,
    loan_type: &str,
    principal: f64,
    interest_rate: f64,
    term_months: u32,
    amount_repaid: f64,
    status: LoanStatus,
    applied_on: NaiveDate,
    disbursed_on: Option<NaiveDate>,
) -> Loan {
    let total = principal * (1.0 + interest_rate / 100.0 * term_months as f64 / 12.0);
    Loan {
        id: id.to_string(),
        member_id: member_id.to_string(),
        loan_type: loan_type.to_string(),
        principal,
        interest_rate,
        term_months,
        amount_repaid,
        balance: match status {
            LoanStatus::Active | LoanStatus::Defaulted => (total - amount_repaid).max(0.0),
            _ => 0.0,
        },
        status,
        applied_on,
        disbursed_on,
    }
}

fn employee(id: &str, name: &str, position: &str, department: &str, salary: f64) -> Employee {
    Employee {
        id: id.to_string(),
        name: name.to_string(),
        position: position.to_string(),
        department: department.to_string(),
        salary,
        phone: None,
        active: true,
    }
}

fn payslip(id: &str, employee: &Employee, period: &str) -> PayrollRecord {
    let tax = employee.salary * 0.10;
    let social_security = employee.salary * 0.05;
    PayrollRecord {
        id: id.to_string(),
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        period: period.to_string(),
        gross: employee.salary,
        tax,
        social_security,
        net: employee.salary - tax - social_security,
        status: PayrollStatus::Paid,
    }
}

/// The demo cooperative
pub fn demo_records() -> DataSnapshot {
    use TransactionKind::{Deposit, Interest, Withdrawal};

    let members = vec![
        member("M001", "John Doe", "+256700100001", day(2022, 1, 15), MemberStatus::Active),
        member("M002", "Sarah Namuli", "+256700100002", day(2022, 3, 2), MemberStatus::Active),
        member("M003", "Peter Okello", "+256700100003", day(2023, 6, 20), MemberStatus::Active),
        member("M004", "Grace Atim", "+256700100004", day(2023, 9, 11), MemberStatus::Suspended),
        member("M005", "David Mugisha", "+256700100005", day(2024, 2, 5), MemberStatus::Active),
        member("M006", "Ruth Nakato", "+256700100006", day(2026, 9, 28), MemberStatus::Inactive),
    ];

    let savings = vec![
        account(
            "S001",
            "M001",
            AccountType::Savings,
            vec![
                tx(day(2026, 1, 5), Deposit, 1_500_000.0, "DEP-0101"),
                tx(day(2026, 3, 12), Deposit, 800_000.0, "DEP-0144"),
                tx(day(2026, 4, 30), Withdrawal, 300_000.0, "WDR-0031"),
                tx(day(2026, 6, 30), Interest, 46_000.0, "INT-2026H1"),
                tx(day(2026, 8, 18), Deposit, 650_000.0, "DEP-0212"),
            ],
        ),
        account(
            "S002",
            "M001",
            AccountType::Shares,
            vec![tx(day(2022, 1, 15), Deposit, 500_000.0, "SHR-0001")],
        ),
        account(
            "S003",
            "M002",
            AccountType::Savings,
            vec![
                tx(day(2026, 2, 1), Deposit, 2_400_000.0, "DEP-0120"),
                tx(day(2026, 7, 9), Withdrawal, 900_000.0, "WDR-0047"),
            ],
        ),
        account(
            "S004",
            "M003",
            AccountType::Savings,
            vec![tx(day(2026, 5, 3), Deposit, 720_000.0, "DEP-0170")],
        ),
        account(
            "S005",
            "M003",
            AccountType::FixedDeposit,
            vec![tx(day(2025, 12, 1), Deposit, 5_000_000.0, "FXD-0009")],
        ),
        account(
            "S006",
            "M005",
            AccountType::Savings,
            vec![
                tx(day(2026, 3, 22), Deposit, 350_000.0, "DEP-0150"),
                tx(day(2026, 9, 1), Deposit, 150_000.0, "DEP-0230"),
            ],
        ),
    ];

    let loans = vec![
        loan("L001", "M001", "personal", 3_000_000.0, 12.0, 12, 1_400_000.0, LoanStatus::Active, day(2026, 2, 10), Some(day(2026, 2, 14))),
        loan("L002", "M002", "business", 10_000_000.0, 15.0, 24, 4_000_000.0, LoanStatus::Active, day(2025, 11, 3), Some(day(2025, 11, 10))),
        loan("L003", "M003", "agricultural", 4_500_000.0, 13.0, 18, 5_377_500.0, LoanStatus::Completed, day(2024, 8, 1), Some(day(2024, 8, 6))),
        loan("L004", "M004", "emergency", 1_200_000.0, 10.0, 6, 200_000.0, LoanStatus::Defaulted, day(2025, 9, 14), Some(day(2025, 9, 15))),
        loan("L005", "M005", "education", 2_000_000.0, 11.0, 12, 0.0, LoanStatus::Pending, day(2026, 10, 8), None),
    ];

    let approvals = vec![
        Approval {
            id: "A001".to_string(),
            member_id: "M005".to_string(),
            subject: ApprovalSubject::Loan {
                loan_id: "L005".to_string(),
            },
            description: "Education loan for school fees".to_string(),
            amount: Some(2_000_000.0),
            submitted_on: day(2026, 10, 8),
            status: ApprovalStatus::Pending,
            note: None,
        },
        Approval {
            id: "A002".to_string(),
            member_id: "M002".to_string(),
            subject: ApprovalSubject::Deposit {
                account_type: AccountType::Savings,
                amount: 400_000.0,
                reference: "MM-88213".to_string(),
            },
            description: "Mobile money deposit".to_string(),
            amount: Some(400_000.0),
            submitted_on: day(2026, 10, 12),
            status: ApprovalStatus::Pending,
            note: None,
        },
        Approval {
            id: "A003".to_string(),
            member_id: "M001".to_string(),
            subject: ApprovalSubject::Withdrawal {
                account_type: AccountType::Savings,
                amount: 250_000.0,
                reason: "Medical bills".to_string(),
            },
            description: "Withdrawal: Medical bills".to_string(),
            amount: Some(250_000.0),
            submitted_on: day(2026, 10, 14),
            status: ApprovalStatus::Pending,
            note: None,
        },
        Approval {
            id: "A004".to_string(),
            member_id: "M006".to_string(),
            subject: ApprovalSubject::Membership,
            description: "New membership application".to_string(),
            amount: None,
            submitted_on: day(2026, 9, 28),
            status: ApprovalStatus::Pending,
            note: None,
        },
        Approval {
            id: "A005".to_string(),
            member_id: "M003".to_string(),
            subject: ApprovalSubject::Deposit {
                account_type: AccountType::Savings,
                amount: 720_000.0,
                reference: "DEP-0170".to_string(),
            },
            description: "Cash deposit".to_string(),
            amount: Some(720_000.0),
            submitted_on: day(2026, 5, 3),
            status: ApprovalStatus::Approved,
            note: None,
        },
    ];

    let expenses = vec![
        Expense {
            id: "E001".to_string(),
            category: "rent".to_string(),
            description: "Office rent, September".to_string(),
            amount: 1_200_000.0,
            date: day(2026, 9, 1),
        },
        Expense {
            id: "E002".to_string(),
            category: "utilities".to_string(),
            description: "Electricity and water".to_string(),
            amount: 185_000.0,
            date: day(2026, 9, 12),
        },
        Expense {
            id: "E003".to_string(),
            category: "supplies".to_string(),
            description: "Receipt books and toner".to_string(),
            amount: 96_000.0,
            date: day(2026, 10, 2),
        },
    ];

    let other_income = vec![
        OtherIncome {
            id: "I001".to_string(),
            source: "fees".to_string(),
            description: "Membership entrance fees".to_string(),
            amount: 150_000.0,
            date: day(2026, 9, 30),
            status: IncomeStatus::Verified,
            rejection_reason: None,
        },
        OtherIncome {
            id: "I002".to_string(),
            source: "investment".to_string(),
            description: "Treasury bill interest".to_string(),
            amount: 820_000.0,
            date: day(2026, 10, 1),
            status: IncomeStatus::Pending,
            rejection_reason: None,
        },
    ];

    let employees = vec![
        employee("EMP001", "Mary Achieng", "Manager", "Administration", 3_500_000.0),
        employee("EMP002", "Joseph Kato", "Loan Officer", "Credit", 2_200_000.0),
        employee("EMP003", "Alice Nambi", "Accountant", "Finance", 2_400_000.0),
        Employee {
            active: false,
            ..employee("EMP004", "Brian Ouma", "Teller", "Operations", 1_300_000.0)
        },
    ];

    let payroll = employees
        .iter()
        .filter(|e| e.active)
        .enumerate()
        .map(|(i, e)| payslip(&format!("P{:03}", i + 1), e, "2026-09"))
        .collect();

    DataSnapshot {
        members,
        loans,
        savings,
        approvals,
        expenses,
        other_income,
        employees,
        payroll,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balances_match_transactions() {
        let data = demo_records();
        for account in &data.savings {
            let sum: f64 = account.transactions.iter().map(|t| t.signed_amount()).sum();
            assert_eq!(account.balance, sum, "account {}", account.id);
        }
    }

    #[test]
    fn test_every_reference_points_at_a_member() {
        let data = demo_records();
        let refs = data
            .loans
            .iter()
            .map(|l| &l.member_id)
            .chain(data.savings.iter().map(|a| &a.member_id))
            .chain(data.approvals.iter().map(|a| &a.member_id));
        for id in refs {
            assert!(data.member(id).is_some(), "dangling member id {id}");
        }
    }
}
