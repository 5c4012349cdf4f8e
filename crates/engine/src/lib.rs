pub use budgets::Budget;
pub use categories::{Category, EntryKind};
pub use error::EngineError;
pub use ops::{Engine, EngineBuilder, Overview, TRANSACTIONS_PAGE_MAX};
pub use transactions::Transaction;

mod budgets;
mod categories;
mod error;
mod ops;
pub mod stats;
mod transactions;
mod users;

type ResultEngine<T> = Result<T, EngineError>;
