// Application layer - use cases and orchestration.
// The CLI talks to the ledger only through BudgetService.

pub mod error;
pub mod service;
pub mod view;

pub use error::*;
pub use service::*;
pub use view::*;
