//! Trait abstraction over the cooperative's records to enable mocking in tests

use crate::error::DataError;
use crate::state::records::{
    Approval, DataSnapshot, Employee, Expense, Loan, Member, MemberUpdate, OtherIncome,
    PayrollRecord,
};
use crate::state::{
    DepositRequest, LoanApplication, NewEmployee, NewExpense, NewOtherIncome, WithdrawalRequest,
};
use async_trait::async_trait;

/// Reads and mutations on the cooperative's records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SaccoData: Send + Sync {
    /// Copy of every collection
    async fn snapshot(&self) -> Result<DataSnapshot, DataError>;

    /// Approve a pending approval and apply its effect
    async fn approve_item(&mut self, id: &str) -> Result<Approval, DataError>;

    /// Reject a pending approval with a reason
    async fn reject_item(&mut self, id: &str, reason: &str) -> Result<Approval, DataError>;

    async fn update_member(&mut self, id: &str, update: MemberUpdate) -> Result<Member, DataError>;

    async fn add_expense(&mut self, expense: NewExpense) -> Result<Expense, DataError>;

    async fn add_other_income(&mut self, income: NewOtherIncome) -> Result<OtherIncome, DataError>;

    async fn update_other_income(
        &mut self,
        id: &str,
        income: NewOtherIncome,
    ) -> Result<OtherIncome, DataError>;

    async fn delete_other_income(&mut self, id: &str) -> Result<(), DataError>;

    async fn verify_other_income(&mut self, id: &str) -> Result<OtherIncome, DataError>;

    async fn reject_other_income(
        &mut self,
        id: &str,
        reason: &str,
    ) -> Result<OtherIncome, DataError>;

    async fn add_employee(&mut self, employee: NewEmployee) -> Result<Employee, DataError>;

    async fn update_employee(
        &mut self,
        id: &str,
        employee: NewEmployee,
    ) -> Result<Employee, DataError>;

    async fn delete_employee(&mut self, id: &str) -> Result<(), DataError>;

    /// Generate one payroll record per active employee for `period` (`YYYY-MM`)
    async fn generate_payroll(&mut self, period: &str) -> Result<Vec<PayrollRecord>, DataError>;

    /// File a loan application for `applicant` as a pending loan and approval
    async fn submit_loan_application(
        &mut self,
        applicant: &str,
        application: LoanApplication,
    ) -> Result<Loan, DataError>;

    async fn submit_deposit(&mut self, request: DepositRequest) -> Result<Approval, DataError>;

    async fn submit_withdrawal(
        &mut self,
        request: WithdrawalRequest,
    ) -> Result<Approval, DataError>;
}
