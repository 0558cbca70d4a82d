pub mod application;
pub mod cli;
pub mod domain;

pub use application::BudgetService;
pub use domain::*;
