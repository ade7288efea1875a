//! Dated mission entries, the edit lock, and XP aggregation.

#![allow(unused_imports)]

pub mod file_store;
pub mod lock;
pub mod service;
pub mod store;
pub mod types;

pub use file_store::FileStore;
pub use lock::*;
pub use service::Ledger;
pub use store::*;
pub use types::*;
