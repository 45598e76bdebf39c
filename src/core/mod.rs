pub mod inventory;
pub mod persistence;

pub use crate::utils::error::Result;
pub use inventory::{Inventory, Removal, DEFAULT_LOW_STOCK_THRESHOLD};
pub use persistence::DEFAULT_DATA_FILE;
