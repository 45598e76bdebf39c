#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::app::CommandRunner;
#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::config::{Settings, TomlConfig};
pub use crate::core::{Inventory, Removal, DEFAULT_DATA_FILE, DEFAULT_LOW_STOCK_THRESHOLD};
pub use crate::utils::error::{InventoryError, Result};
