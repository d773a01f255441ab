//! Form rendering module
//!
//! - `field_renderer`: one labelled input with its inline error
//! - `loan_wizard`: the four-step loan application with its live summary
//! - `single_step`: deposit, withdrawal, statement and back-office forms

mod field_renderer;
mod loan_wizard;
mod single_step;

pub use loan_wizard::draw_loan_wizard;
pub use single_step::draw_request_form;
