use crate::config::{Command, Settings};
use crate::core::{Inventory, Removal};
use crate::utils::error::{InventoryError, Result};
use crate::utils::validation::parse_quantity;
use std::fmt::Write as _;

/// Executes one command against the configured data file and returns the
/// text to show the user.
pub struct CommandRunner {
    settings: Settings,
}

impl CommandRunner {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn run(&self, command: &Command) -> Result<String> {
        match command {
            Command::Add { name, quantity } => {
                let quantity = parse_quantity("quantity", quantity)?;
                let mut inventory = self.open()?;
                let mut log = Vec::new();
                inventory.add_with_log(name, quantity, &mut log)?;
                inventory.save(&self.settings.data_file)?;
                Ok(log.join("\n"))
            }
            Command::Remove { name, quantity } => {
                let quantity = parse_quantity("quantity", quantity)?;
                let mut inventory = self.open()?;
                let message = match inventory.remove(name, quantity)? {
                    Removal::Remaining(left) => format!("{} -> {}", name, left),
                    Removal::Depleted => format!("{} depleted and removed", name),
                    Removal::NotFound => {
                        let missing = InventoryError::NotFound { name: name.clone() };
                        return Ok(format!("Warning: {}", missing));
                    }
                };
                inventory.save(&self.settings.data_file)?;
                Ok(message)
            }
            Command::Get { name } => {
                let inventory = self.open()?;
                Ok(inventory.get_quantity(name).to_string())
            }
            Command::Low { threshold } => {
                let threshold = match threshold {
                    Some(raw) => parse_quantity("threshold", raw)?,
                    None => self.settings.low_stock_threshold,
                };
                let inventory = self.open()?;
                Ok(inventory.list_low_stock(threshold).join("\n"))
            }
            Command::Report => Ok(self.open()?.render_report()),
            Command::Demo => self.demo(),
        }
    }

    /// Loads the data file, starting empty when it does not exist yet.
    fn open(&self) -> Result<Inventory> {
        let mut inventory = Inventory::new().with_atomic_writes(self.settings.atomic_writes);
        match inventory.load(&self.settings.data_file) {
            Ok(()) => Ok(inventory),
            Err(InventoryError::IoError { ref source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                tracing::info!(
                    "No data file at {}, starting with an empty inventory",
                    self.settings.data_file.display()
                );
                Ok(inventory)
            }
            Err(e) => Err(e),
        }
    }

    fn demo(&self) -> Result<String> {
        let mut inventory = Inventory::new().with_atomic_writes(self.settings.atomic_writes);
        let mut out = String::new();

        inventory.add("apple", 10)?;
        inventory.add("banana", -2)?;
        if let Err(e) = parse_quantity("quantity", "ten").and_then(|q| inventory.add("123", q)) {
            tracing::warn!("Rejected add: {}", e);
        }
        inventory.remove("apple", 3)?;
        inventory.remove("orange", 1)?;

        let _ = writeln!(out, "Apple stock: {}", inventory.get_quantity("apple"));
        let _ = writeln!(
            out,
            "Low items: {:?}",
            inventory.list_low_stock(self.settings.low_stock_threshold)
        );

        inventory.save(&self.settings.data_file)?;
        let mut reloaded = Inventory::new().with_atomic_writes(self.settings.atomic_writes);
        reloaded.load(&self.settings.data_file)?;
        out.push_str(&reloaded.render_report());

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn runner_in(dir: &TempDir) -> CommandRunner {
        CommandRunner::new(Settings {
            data_file: dir.path().join("inventory.json"),
            ..Settings::default()
        })
    }

    fn add(name: &str, quantity: &str) -> Command {
        Command::Add {
            name: name.to_string(),
            quantity: quantity.to_string(),
        }
    }

    #[test]
    fn test_add_then_get_persists_between_runs() {
        let dir = TempDir::new().unwrap();
        let runner = runner_in(&dir);

        let log = runner.run(&add("apple", "10")).unwrap();
        assert!(log.ends_with("Added 10 of apple"));
        runner.run(&add("apple", "5")).unwrap();

        let quantity = runner
            .run(&Command::Get {
                name: "apple".to_string(),
            })
            .unwrap();
        assert_eq!(quantity, "15");
    }

    #[test]
    fn test_non_numeric_quantity_is_invalid_argument() {
        let dir = TempDir::new().unwrap();
        let runner = runner_in(&dir);

        let err = runner.run(&add("apple", "ten")).unwrap_err();
        assert!(matches!(err, InventoryError::InvalidArgument { .. }));
        assert_eq!(err.exit_code(), 2);
        assert!(!dir.path().join("inventory.json").exists());
    }

    #[test]
    fn test_remove_missing_item_warns() {
        let dir = TempDir::new().unwrap();
        let runner = runner_in(&dir);

        let message = runner
            .run(&Command::Remove {
                name: "orange".to_string(),
                quantity: "1".to_string(),
            })
            .unwrap();
        assert!(message.starts_with("Warning:"));
        assert!(message.contains("orange"));
    }

    #[test]
    fn test_low_uses_configured_threshold() {
        let dir = TempDir::new().unwrap();
        let runner = CommandRunner::new(Settings {
            data_file: dir.path().join("inventory.json"),
            low_stock_threshold: 11,
            ..Settings::default()
        });
        runner.run(&add("apple", "10")).unwrap();
        runner.run(&add("melon", "20")).unwrap();

        let low = runner.run(&Command::Low { threshold: None }).unwrap();
        assert_eq!(low, "apple");

        let low = runner
            .run(&Command::Low {
                threshold: Some("25".to_string()),
            })
            .unwrap();
        assert_eq!(low, "apple\nmelon");
    }

    #[test]
    fn test_malformed_data_file_is_reported() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("inventory.json"), "[]").unwrap();
        let runner = runner_in(&dir);

        let err = runner.run(&Command::Report).unwrap_err();
        assert!(matches!(err, InventoryError::FormatError { .. }));
    }

    #[test]
    fn test_demo_output() {
        let dir = TempDir::new().unwrap();
        let output = runner_in(&dir).run(&Command::Demo).unwrap();

        assert_eq!(
            output,
            "Apple stock: 7\nLow items: [\"banana\"]\nItems Report\napple -> 7\nbanana -> -2\n"
        );
    }
}
