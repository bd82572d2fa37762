pub mod config;
pub mod error;
pub mod msg;
pub mod session;
pub mod state;
pub mod storage;
pub mod table;

pub use crate::error::{StoreError, TableError};
pub use crate::storage::{FileStorage, MemoryStorage, Storage};
pub use crate::table::Table;
