//! In-memory record store with simulated latency

use super::seed::demo_records;
use super::SaccoData;
use crate::error::DataError;
use crate::state::records::{
    AccountType, Approval, ApprovalStatus, ApprovalSubject, DataSnapshot, Employee, Expense,
    IncomeStatus, Loan, LoanStatus, Member, MemberStatus, MemberUpdate, OtherIncome,
    PayrollRecord, PayrollStatus, SavingsAccount, SavingsTransaction, TransactionKind,
};
use crate::state::{
    DepositRequest, LoanApplication, NewEmployee, NewExpense, NewOtherIncome, WithdrawalRequest,
};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use std::time::Duration;
use uuid::Uuid;

const INCOME_TAX_RATE: f64 = 0.10;
const SOCIAL_SECURITY_RATE: f64 = 0.05;

fn new_id(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", &id[..8].to_uppercase())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `YYYY-MM` with a real month
fn valid_period(period: &str) -> bool {
    NaiveDate::parse_from_str(&format!("{period}-01"), "%Y-%m-%d").is_ok() && period.len() == 7
}

pub struct InMemoryData {
    records: DataSnapshot,
    delay: Duration,
}

impl InMemoryData {
    pub fn new(records: DataSnapshot) -> Self {
        Self {
            records,
            delay: Duration::ZERO,
        }
    }

    /// The demo cooperative
    pub fn demo() -> Self {
        Self::new(demo_records())
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    fn approval_mut(&mut self, id: &str) -> Result<&mut Approval, DataError> {
        self.records
            .approvals
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| DataError::not_found("Approval", id))
    }

    fn pending_approval(&mut self, id: &str) -> Result<Approval, DataError> {
        let approval = self.approval_mut(id)?;
        if approval.status != ApprovalStatus::Pending {
            return Err(DataError::InvalidState(format!(
                "Approval '{id}' is already {}",
                approval.status.label().to_lowercase()
            )));
        }
        Ok(approval.clone())
    }

    fn loan_mut(&mut self, id: &str) -> Result<&mut Loan, DataError> {
        self.records
            .loans
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| DataError::not_found("Loan", id))
    }

    fn account_mut(
        &mut self,
        member_id: &str,
        account_type: AccountType,
    ) -> Result<&mut SavingsAccount, DataError> {
        self.records
            .savings
            .iter_mut()
            .find(|a| a.member_id == member_id && a.account_type == account_type)
            .ok_or_else(|| {
                DataError::not_found("Account", format!("{member_id}/{}", account_type.key()))
            })
    }

    fn member_mut(&mut self, id: &str) -> Result<&mut Member, DataError> {
        self.records
            .members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| DataError::not_found("Member", id))
    }

    fn income_mut(&mut self, id: &str) -> Result<&mut OtherIncome, DataError> {
        self.records
            .other_income
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| DataError::not_found("Income", id))
    }

    fn pending_income_mut(&mut self, id: &str) -> Result<&mut OtherIncome, DataError> {
        let income = self.income_mut(id)?;
        if income.status != IncomeStatus::Pending {
            return Err(DataError::InvalidState(format!(
                "Income '{id}' is already {}",
                income.status.label().to_lowercase()
            )));
        }
        Ok(income)
    }

    fn employee_mut(&mut self, id: &str) -> Result<&mut Employee, DataError> {
        self.records
            .employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| DataError::not_found("Employee", id))
    }

    /// Move money for an approved deposit or withdrawal
    fn post_transaction(
        &mut self,
        member_id: &str,
        account_type: AccountType,
        kind: TransactionKind,
        amount: f64,
        reference: &str,
    ) -> Result<(), DataError> {
        let account = self.account_mut(member_id, account_type)?;
        let transaction = SavingsTransaction {
            date: today(),
            kind,
            amount,
            reference: reference.to_string(),
        };
        let balance = account.balance + transaction.signed_amount();
        if balance < 0.0 {
            return Err(DataError::InvalidState(format!(
                "Insufficient balance in {} account",
                account_type.label()
            )));
        }
        account.balance = balance;
        account.transactions.push(transaction);
        Ok(())
    }
}

#[async_trait]
impl SaccoData for InMemoryData {
    async fn snapshot(&self) -> Result<DataSnapshot, DataError> {
        self.pause().await;
        Ok(self.records.clone())
    }

    async fn approve_item(&mut self, id: &str) -> Result<Approval, DataError> {
        self.pause().await;
        let approval = self.pending_approval(id)?;

        match &approval.subject {
            ApprovalSubject::Loan { loan_id } => {
                let loan = self.loan_mut(loan_id)?;
                if loan.status != LoanStatus::Pending {
                    return Err(DataError::InvalidState(format!(
                        "Loan '{loan_id}' is {}",
                        loan.status.label().to_lowercase()
                    )));
                }
                loan.status = LoanStatus::Active;
                loan.disbursed_on = Some(today());
                loan.balance =
                    loan.principal * (1.0 + loan.interest_rate / 100.0 * loan.term_months as f64 / 12.0);
            }
            ApprovalSubject::Deposit {
                account_type,
                amount,
                reference,
            } => self.post_transaction(
                &approval.member_id,
                *account_type,
                TransactionKind::Deposit,
                *amount,
                reference,
            )?,
            ApprovalSubject::Withdrawal {
                account_type,
                amount,
                ..
            } => self.post_transaction(
                &approval.member_id,
                *account_type,
                TransactionKind::Withdrawal,
                *amount,
                &approval.id,
            )?,
            ApprovalSubject::Membership => {
                self.member_mut(&approval.member_id)?.status = MemberStatus::Active;
            }
        }

        let approval = self.approval_mut(id)?;
        approval.status = ApprovalStatus::Approved;
        tracing::info!("Approved {} request {id}", approval.subject.label());
        Ok(approval.clone())
    }

    async fn reject_item(&mut self, id: &str, reason: &str) -> Result<Approval, DataError> {
        self.pause().await;
        let approval = self.pending_approval(id)?;
        if let ApprovalSubject::Loan { loan_id } = &approval.subject {
            self.loan_mut(loan_id)?.status = LoanStatus::Rejected;
        }

        let approval = self.approval_mut(id)?;
        approval.status = ApprovalStatus::Rejected;
        approval.note = Some(reason.to_string());
        tracing::info!("Rejected {} request {id}", approval.subject.label());
        Ok(approval.clone())
    }

    async fn update_member(&mut self, id: &str, update: MemberUpdate) -> Result<Member, DataError> {
        self.pause().await;
        let member = self.member_mut(id)?;
        if let Some(name) = update.name {
            member.name = name;
        }
        if let Some(phone) = update.phone {
            member.phone = phone;
        }
        if let Some(email) = update.email {
            member.email = email;
        }
        if let Some(status) = update.status {
            member.status = status;
        }
        tracing::info!("Updated member {id}");
        Ok(member.clone())
    }

    async fn add_expense(&mut self, expense: NewExpense) -> Result<Expense, DataError> {
        self.pause().await;
        let expense = Expense {
            id: new_id("EXP"),
            category: expense.category,
            description: expense.description,
            amount: expense.amount,
            date: expense.date,
        };
        tracing::info!("Recorded expense {} ({})", expense.id, expense.category);
        self.records.expenses.push(expense.clone());
        Ok(expense)
    }

    async fn add_other_income(&mut self, income: NewOtherIncome) -> Result<OtherIncome, DataError> {
        self.pause().await;
        let income = OtherIncome {
            id: new_id("INC"),
            source: income.source,
            description: income.description,
            amount: income.amount,
            date: income.date,
            status: IncomeStatus::Pending,
            rejection_reason: None,
        };
        tracing::info!("Recorded other income {}", income.id);
        self.records.other_income.push(income.clone());
        Ok(income)
    }

    async fn update_other_income(
        &mut self,
        id: &str,
        update: NewOtherIncome,
    ) -> Result<OtherIncome, DataError> {
        self.pause().await;
        let income = self.income_mut(id)?;
        income.source = update.source;
        income.description = update.description;
        income.amount = update.amount;
        income.date = update.date;
        tracing::info!("Updated other income {id}");
        Ok(income.clone())
    }

    async fn delete_other_income(&mut self, id: &str) -> Result<(), DataError> {
        self.pause().await;
        let before = self.records.other_income.len();
        self.records.other_income.retain(|i| i.id != id);
        if self.records.other_income.len() == before {
            return Err(DataError::not_found("Income", id));
        }
        tracing::info!("Deleted other income {id}");
        Ok(())
    }

    async fn verify_other_income(&mut self, id: &str) -> Result<OtherIncome, DataError> {
        self.pause().await;
        let income = self.pending_income_mut(id)?;
        income.status = IncomeStatus::Verified;
        tracing::info!("Verified other income {id}");
        Ok(income.clone())
    }

    async fn reject_other_income(
        &mut self,
        id: &str,
        reason: &str,
    ) -> Result<OtherIncome, DataError> {
        self.pause().await;
        let income = self.pending_income_mut(id)?;
        income.status = IncomeStatus::Rejected;
        income.rejection_reason = Some(reason.to_string());
        tracing::info!("Rejected other income {id}");
        Ok(income.clone())
    }

    async fn add_employee(&mut self, employee: NewEmployee) -> Result<Employee, DataError> {
        self.pause().await;
        let employee = Employee {
            id: new_id("EMP"),
            name: employee.name,
            position: employee.position,
            department: employee.department,
            salary: employee.salary,
            phone: employee.phone,
            active: true,
        };
        tracing::info!("Added employee {}", employee.id);
        self.records.employees.push(employee.clone());
        Ok(employee)
    }

    async fn update_employee(
        &mut self,
        id: &str,
        update: NewEmployee,
    ) -> Result<Employee, DataError> {
        self.pause().await;
        let employee = self.employee_mut(id)?;
        employee.name = update.name;
        employee.position = update.position;
        employee.department = update.department;
        employee.salary = update.salary;
        employee.phone = update.phone;
        tracing::info!("Updated employee {id}");
        Ok(employee.clone())
    }

    async fn delete_employee(&mut self, id: &str) -> Result<(), DataError> {
        self.pause().await;
        let before = self.records.employees.len();
        self.records.employees.retain(|e| e.id != id);
        if self.records.employees.len() == before {
            return Err(DataError::not_found("Employee", id));
        }
        tracing::info!("Deleted employee {id}");
        Ok(())
    }

    async fn generate_payroll(&mut self, period: &str) -> Result<Vec<PayrollRecord>, DataError> {
        self.pause().await;
        if !valid_period(period) {
            return Err(DataError::InvalidInput(format!(
                "pay period '{period}' is not YYYY-MM"
            )));
        }
        if self.records.payroll.iter().any(|p| p.period == period) {
            return Err(DataError::InvalidState(format!(
                "Payroll for {period} has already been generated"
            )));
        }

        let generated: Vec<PayrollRecord> = self
            .records
            .employees
            .iter()
            .filter(|e| e.active)
            .map(|e| {
                let tax = e.salary * INCOME_TAX_RATE;
                let social_security = e.salary * SOCIAL_SECURITY_RATE;
                PayrollRecord {
                    id: new_id("PAY"),
                    employee_id: e.id.clone(),
                    employee_name: e.name.clone(),
                    period: period.to_string(),
                    gross: e.salary,
                    tax,
                    social_security,
                    net: e.salary - tax - social_security,
                    status: PayrollStatus::Generated,
                }
            })
            .collect();

        if generated.is_empty() {
            return Err(DataError::InvalidState(
                "No active employees to pay".to_string(),
            ));
        }

        tracing::info!("Generated payroll for {period}: {} records", generated.len());
        self.records.payroll.extend(generated.iter().cloned());
        Ok(generated)
    }

    async fn submit_loan_application(
        &mut self,
        applicant: &str,
        application: LoanApplication,
    ) -> Result<Loan, DataError> {
        self.pause().await;
        let loan = Loan {
            id: new_id("LN"),
            member_id: applicant.to_string(),
            loan_type: application.loan_type.clone(),
            principal: application.amount,
            interest_rate: application.interest_rate,
            term_months: application.term_months,
            amount_repaid: 0.0,
            balance: 0.0,
            status: LoanStatus::Pending,
            applied_on: today(),
            disbursed_on: None,
        };
        self.records.approvals.push(Approval {
            id: new_id("APR"),
            member_id: applicant.to_string(),
            subject: ApprovalSubject::Loan {
                loan_id: loan.id.clone(),
            },
            description: application.purpose,
            amount: Some(application.amount),
            submitted_on: today(),
            status: ApprovalStatus::Pending,
            note: None,
        });
        tracing::info!(
            "Loan application {} filed for {applicant}: {} {}",
            loan.id,
            loan.loan_type,
            loan.principal
        );
        self.records.loans.push(loan.clone());
        Ok(loan)
    }

    async fn submit_deposit(&mut self, request: DepositRequest) -> Result<Approval, DataError> {
        self.pause().await;
        if self.records.member(&request.member_id).is_none() {
            return Err(DataError::not_found("Member", request.member_id));
        }
        let reference = request
            .reference
            .unwrap_or_else(|| request.payment_method.clone());
        let approval = Approval {
            id: new_id("APR"),
            member_id: request.member_id,
            description: format!("{} deposit", request.account_type.label()),
            amount: Some(request.amount),
            subject: ApprovalSubject::Deposit {
                account_type: request.account_type,
                amount: request.amount,
                reference,
            },
            submitted_on: today(),
            status: ApprovalStatus::Pending,
            note: None,
        };
        tracing::info!("Deposit request {} submitted", approval.id);
        self.records.approvals.push(approval.clone());
        Ok(approval)
    }

    async fn submit_withdrawal(
        &mut self,
        request: WithdrawalRequest,
    ) -> Result<Approval, DataError> {
        self.pause().await;
        let balance = self
            .records
            .available_balance(&request.member_id, request.account_type)
            .ok_or_else(|| {
                DataError::not_found(
                    "Account",
                    format!("{}/{}", request.member_id, request.account_type.key()),
                )
            })?;
        if request.amount > balance {
            return Err(DataError::InvalidState(format!(
                "Insufficient balance in {} account",
                request.account_type.label()
            )));
        }
        let approval = Approval {
            id: new_id("APR"),
            member_id: request.member_id,
            description: format!("Withdrawal: {}", request.reason),
            amount: Some(request.amount),
            subject: ApprovalSubject::Withdrawal {
                account_type: request.account_type,
                amount: request.amount,
                reason: request.reason,
            },
            submitted_on: today(),
            status: ApprovalStatus::Pending,
            note: None,
        };
        tracing::info!("Withdrawal request {} submitted", approval.id);
        self.records.approvals.push(approval.clone());
        Ok(approval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn income() -> NewOtherIncome {
        NewOtherIncome {
            source: "grants".to_string(),
            description: "District grant".to_string(),
            amount: 500_000.0,
            date: date("2026-10-01"),
        }
    }

    fn employee() -> NewEmployee {
        NewEmployee {
            name: "Tom Wasswa".to_string(),
            position: "Teller".to_string(),
            department: "Operations".to_string(),
            salary: 1_000_000.0,
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_approve_loan_activates_it() {
        let mut data = InMemoryData::demo();
        let approval = data.approve_item("A001").await.unwrap();
        assert_eq!(approval.status, ApprovalStatus::Approved);

        let snapshot = data.snapshot().await.unwrap();
        let loan = snapshot.loans.iter().find(|l| l.id == "L005").unwrap();
        assert_eq!(loan.status, LoanStatus::Active);
        assert!(loan.disbursed_on.is_some());
        assert!(loan.balance > loan.principal);
    }

    #[tokio::test]
    async fn test_approve_twice_is_invalid_state() {
        let mut data = InMemoryData::demo();
        data.approve_item("A002").await.unwrap();
        assert!(matches!(
            data.approve_item("A002").await,
            Err(DataError::InvalidState(_))
        ));
        assert!(matches!(
            data.reject_item("A002", "late").await,
            Err(DataError::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let mut data = InMemoryData::demo();
        assert_eq!(
            data.approve_item("A999").await,
            Err(DataError::not_found("Approval", "A999"))
        );
        assert!(matches!(
            data.update_member("M999", MemberUpdate::default()).await,
            Err(DataError::NotFound { kind: "Member", .. })
        ));
        assert!(matches!(
            data.delete_employee("EMP999").await,
            Err(DataError::NotFound { .. })
        ));
        assert!(matches!(
            data.verify_other_income("I999").await,
            Err(DataError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_approved_deposit_credits_account() {
        let mut data = InMemoryData::demo();
        let before = data
            .snapshot()
            .await
            .unwrap()
            .available_balance("M002", AccountType::Savings)
            .unwrap();
        data.approve_item("A002").await.unwrap();
        let after = data
            .snapshot()
            .await
            .unwrap()
            .available_balance("M002", AccountType::Savings)
            .unwrap();
        assert_eq!(after - before, 400_000.0);
    }

    #[tokio::test]
    async fn test_rejected_loan_records_reason() {
        let mut data = InMemoryData::demo();
        let approval = data.reject_item("A001", "Insufficient guarantors").await.unwrap();
        assert_eq!(approval.note.as_deref(), Some("Insufficient guarantors"));
        let snapshot = data.snapshot().await.unwrap();
        let loan = snapshot.loans.iter().find(|l| l.id == "L005").unwrap();
        assert_eq!(loan.status, LoanStatus::Rejected);
    }

    #[tokio::test]
    async fn test_membership_approval_activates_member() {
        let mut data = InMemoryData::demo();
        data.approve_item("A004").await.unwrap();
        let snapshot = data.snapshot().await.unwrap();
        assert_eq!(snapshot.member("M006").unwrap().status, MemberStatus::Active);
    }

    #[tokio::test]
    async fn test_update_member_applies_only_given_fields() {
        let mut data = InMemoryData::demo();
        let member = data
            .update_member(
                "M002",
                MemberUpdate {
                    phone: Some("+256799000000".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(member.phone, "+256799000000");
        assert_eq!(member.name, "Sarah Namuli");
    }

    #[tokio::test]
    async fn test_other_income_lifecycle() {
        let mut data = InMemoryData::demo();
        let added = data.add_other_income(income()).await.unwrap();
        assert_eq!(added.status, IncomeStatus::Pending);

        let updated = data
            .update_other_income(
                &added.id,
                NewOtherIncome {
                    amount: 650_000.0,
                    ..income()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.amount, 650_000.0);

        let verified = data.verify_other_income(&added.id).await.unwrap();
        assert_eq!(verified.status, IncomeStatus::Verified);
        assert!(matches!(
            data.reject_other_income(&added.id, "dup").await,
            Err(DataError::InvalidState(_))
        ));

        data.delete_other_income(&added.id).await.unwrap();
        assert!(data.delete_other_income(&added.id).await.is_err());
    }

    #[tokio::test]
    async fn test_reject_other_income_keeps_reason() {
        let mut data = InMemoryData::demo();
        let rejected = data.reject_other_income("I002", "No receipt").await.unwrap();
        assert_eq!(rejected.status, IncomeStatus::Rejected);
        assert_eq!(rejected.rejection_reason.as_deref(), Some("No receipt"));
    }

    #[tokio::test]
    async fn test_employee_add_update_delete() {
        let mut data = InMemoryData::demo();
        let added = data.add_employee(employee()).await.unwrap();
        assert!(added.active);

        let updated = data
            .update_employee(
                &added.id,
                NewEmployee {
                    salary: 1_200_000.0,
                    ..employee()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.salary, 1_200_000.0);

        data.delete_employee(&added.id).await.unwrap();
        let snapshot = data.snapshot().await.unwrap();
        assert!(snapshot.employees.iter().all(|e| e.id != added.id));
    }

    #[tokio::test]
    async fn test_generate_payroll_deductions() {
        let mut data = InMemoryData::demo();
        let records = data.generate_payroll("2026-10").await.unwrap();
        // EMP004 is inactive
        assert_eq!(records.len(), 3);
        let manager = records.iter().find(|r| r.employee_id == "EMP001").unwrap();
        assert_eq!(manager.tax, 350_000.0);
        assert_eq!(manager.social_security, 175_000.0);
        assert_eq!(manager.net, 2_975_000.0);
        assert_eq!(manager.status, PayrollStatus::Generated);
    }

    #[tokio::test]
    async fn test_generate_payroll_twice_is_refused() {
        let mut data = InMemoryData::demo();
        data.generate_payroll("2026-10").await.unwrap();
        assert!(matches!(
            data.generate_payroll("2026-10").await,
            Err(DataError::InvalidState(_))
        ));
        // Seeded period
        assert!(matches!(
            data.generate_payroll("2026-09").await,
            Err(DataError::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_payroll_rejects_bad_period() {
        let mut data = InMemoryData::demo();
        for period in ["2026-13", "October", "2026-1"] {
            assert!(matches!(
                data.generate_payroll(period).await,
                Err(DataError::InvalidInput(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_withdrawal_request_checks_balance() {
        let mut data = InMemoryData::demo();
        let request = WithdrawalRequest {
            member_id: "M005".to_string(),
            account_type: AccountType::Savings,
            amount: 10_000_000.0,
            reason: "Car".to_string(),
        };
        assert!(matches!(
            data.submit_withdrawal(request.clone()).await,
            Err(DataError::InvalidState(_))
        ));

        let approval = data
            .submit_withdrawal(WithdrawalRequest {
                amount: 100_000.0,
                ..request
            })
            .await
            .unwrap();
        assert_eq!(approval.status, ApprovalStatus::Pending);
        assert_eq!(approval.subject.label(), "Withdrawal");
    }

    #[tokio::test]
    async fn test_deposit_request_for_unknown_member() {
        let mut data = InMemoryData::demo();
        let request = DepositRequest {
            member_id: "M404".to_string(),
            account_type: AccountType::Savings,
            amount: 1.0,
            payment_method: "cash".to_string(),
            reference: None,
        };
        assert!(matches!(
            data.submit_deposit(request).await,
            Err(DataError::NotFound { kind: "Member", .. })
        ));
    }

    #[tokio::test]
    async fn test_loan_application_creates_pending_loan_and_approval() {
        let mut data = InMemoryData::new(DataSnapshot::default());
        let application = LoanApplication {
            loan_type: "business".to_string(),
            amount: 5_000_000.0,
            purpose: "Stock".to_string(),
            term_months: 24,
            interest_rate: 15.0,
            collateral: None,
            repayment_source: "business".to_string(),
            employer_name: None,
            other_loans: None,
            monthly_income: 2_000_000,
            monthly_expenses: 500_000,
            monthly_payment: 242_433.0,
            guarantors: vec![],
            documents: vec![],
        };
        let loan = data.submit_loan_application("M001", application).await.unwrap();
        assert_eq!(loan.status, LoanStatus::Pending);

        let snapshot = data.snapshot().await.unwrap();
        assert_eq!(snapshot.loans.len(), 1);
        assert_eq!(
            snapshot.approvals[0].subject,
            ApprovalSubject::Loan { loan_id: loan.id }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_applies_to_reads() {
        let data = InMemoryData::new(DataSnapshot::default()).with_delay(Duration::from_millis(300));
        let start = tokio::time::Instant::now();
        data.snapshot().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(300));
    }
}
