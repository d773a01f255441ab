//! Application state module

mod app_state;
mod forms;
pub mod records;
mod statement;
mod stats;

pub use app_state::*;
pub use forms::*;
pub use statement::Statement;
pub use stats::{dashboard_cards, StatCard};
