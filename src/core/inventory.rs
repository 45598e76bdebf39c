use crate::core::persistence;
use crate::utils::error::Result;
use crate::utils::validation::{checked_difference, checked_sum};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Outcome of [`Inventory::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The item is still stocked with this quantity.
    Remaining(i64),
    /// The quantity reached zero or below and the item was dropped.
    Depleted,
    /// The item was not stocked; nothing changed.
    NotFound,
}

/// In-memory stock mapping from item name to quantity.
///
/// Items are enumerated in ascending name order. Quantities are signed: an
/// `add` with a negative amount is accepted as is, while a `remove` that
/// brings an item to zero or below deletes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    stock: BTreeMap<String, i64>,
    atomic_writes: bool,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self {
            stock: BTreeMap::new(),
            atomic_writes: true,
        }
    }

    pub fn from_map(stock: BTreeMap<String, i64>) -> Self {
        Self {
            stock,
            ..Self::new()
        }
    }

    /// Controls whether `save` goes through a temporary file and rename.
    pub fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic_writes = atomic;
        self
    }

    pub fn add(&mut self, name: &str, quantity: i64) -> Result<()> {
        self.apply_add(name, quantity).map(|_| ())
    }

    /// Like [`Inventory::add`], also appending an audit line to `log` when
    /// the add takes effect.
    pub fn add_with_log(&mut self, name: &str, quantity: i64, log: &mut Vec<String>) -> Result<()> {
        if self.apply_add(name, quantity)? {
            log.push(format!(
                "{}: Added {} of {}",
                chrono::Local::now().to_rfc3339(),
                quantity,
                name
            ));
        }
        Ok(())
    }

    // Returns false for the empty-name no-op.
    fn apply_add(&mut self, name: &str, quantity: i64) -> Result<bool> {
        if name.is_empty() {
            tracing::debug!("Ignoring add of {} with an empty item name", quantity);
            return Ok(false);
        }

        let current = self.get_quantity(name);
        let updated = checked_sum("quantity", current, quantity)?;
        self.stock.insert(name.to_string(), updated);
        tracing::debug!("Added {} of {} (now {})", quantity, name, updated);
        Ok(true)
    }

    pub fn remove(&mut self, name: &str, quantity: i64) -> Result<Removal> {
        let Some(current) = self.stock.get(name).copied() else {
            tracing::warn!("Item '{}' not found in inventory", name);
            return Ok(Removal::NotFound);
        };

        let updated = checked_difference("quantity", current, quantity)?;
        if updated <= 0 {
            self.stock.remove(name);
            tracing::debug!("Removed {} of {}; item depleted", quantity, name);
            Ok(Removal::Depleted)
        } else {
            self.stock.insert(name.to_string(), updated);
            tracing::debug!("Removed {} of {} (now {})", quantity, name, updated);
            Ok(Removal::Remaining(updated))
        }
    }

    pub fn get_quantity(&self, name: &str) -> i64 {
        self.stock.get(name).copied().unwrap_or(0)
    }

    /// Names whose quantity is strictly below `threshold`.
    pub fn list_low_stock(&self, threshold: i64) -> Vec<String> {
        self.stock
            .iter()
            .filter(|&(_, &quantity)| quantity < threshold)
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn low_stock_default(&self) -> Vec<String> {
        self.list_low_stock(DEFAULT_LOW_STOCK_THRESHOLD)
    }

    /// Replaces the whole mapping with the contents of `path`. On any
    /// failure the current mapping is left untouched.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let stock = persistence::read_inventory(path)?;
        tracing::info!("Loaded {} items from {}", stock.len(), path.display());
        self.stock = stock;
        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        persistence::write_inventory(path, &self.stock, self.atomic_writes)?;
        tracing::info!("Saved {} items to {}", self.stock.len(), path.display());
        Ok(())
    }

    pub fn render_report(&self) -> String {
        let mut out = String::from("Items Report\n");
        for (name, quantity) in &self.stock {
            let _ = writeln!(out, "{} -> {}", name, quantity);
        }
        out
    }

    pub fn report(&self) {
        print!("{}", self.render_report());
    }

    pub fn len(&self) -> usize {
        self.stock.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.stock.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.stock.iter().map(|(name, &quantity)| (name.as_str(), quantity))
    }

    pub fn as_map(&self) -> &BTreeMap<String, i64> {
        &self.stock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::InventoryError;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_add_accumulates() {
        let mut inventory = Inventory::new();
        inventory.add("apple", 4).unwrap();
        inventory.add("apple", 6).unwrap();
        assert_eq!(inventory.get_quantity("apple"), 10);
    }

    #[test]
    fn test_add_empty_name_is_noop() {
        let mut inventory = Inventory::new();
        let mut log = Vec::new();
        inventory.add_with_log("", 3, &mut log).unwrap();
        assert!(inventory.is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn test_add_with_log_records_entry() {
        let mut inventory = Inventory::new();
        let mut log = Vec::new();
        inventory.add_with_log("apple", 10, &mut log).unwrap();
        assert_eq!(log.len(), 1);
        assert!(log[0].ends_with(": Added 10 of apple"));
    }

    #[test]
    fn test_add_overflow_leaves_mapping_unchanged() {
        let mut inventory = Inventory::new();
        inventory.add("apple", i64::MAX).unwrap();
        let err = inventory.add("apple", 1).unwrap_err();
        assert!(matches!(err, InventoryError::InvalidArgument { .. }));
        assert_eq!(inventory.get_quantity("apple"), i64::MAX);
    }

    #[test]
    fn test_negative_add_is_kept() {
        let mut inventory = Inventory::new();
        inventory.add("banana", -2).unwrap();
        assert_eq!(inventory.get_quantity("banana"), -2);
        assert!(inventory.contains("banana"));
    }

    #[test]
    fn test_remove_partial_and_depleted() {
        let mut inventory = Inventory::new();
        inventory.add("apple", 10).unwrap();
        assert_eq!(inventory.remove("apple", 3).unwrap(), Removal::Remaining(7));
        assert_eq!(inventory.remove("apple", 7).unwrap(), Removal::Depleted);
        assert!(!inventory.contains("apple"));
        assert_eq!(inventory.get_quantity("apple"), 0);
    }

    #[test]
    fn test_remove_past_zero_deletes() {
        let mut inventory = Inventory::new();
        inventory.add("apple", 2).unwrap();
        assert_eq!(inventory.remove("apple", 5).unwrap(), Removal::Depleted);
        assert!(!inventory.render_report().contains("apple"));
    }

    #[test]
    fn test_remove_missing_item() {
        let mut inventory = Inventory::new();
        inventory.add("apple", 1).unwrap();
        let before = inventory.clone();
        assert_eq!(inventory.remove("orange", 1).unwrap(), Removal::NotFound);
        assert_eq!(inventory, before);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_remove_missing_item_logs_warning() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let mut inventory = Inventory::new();
        let outcome =
            tracing::subscriber::with_default(subscriber, || inventory.remove("orange", 1));
        assert_eq!(outcome.unwrap(), Removal::NotFound);

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"), "{}", output);
        assert!(output.contains("Item 'orange' not found in inventory"));
    }

    #[test]
    fn test_list_low_stock() {
        let mut inventory = Inventory::new();
        inventory.add("apple", 10).unwrap();
        inventory.add("banana", -2).unwrap();
        inventory.add("orange", 3).unwrap();
        inventory.add("pear", 5).unwrap();

        assert_eq!(inventory.list_low_stock(5), vec!["banana", "orange"]);
        assert_eq!(inventory.low_stock_default(), vec!["banana", "orange"]);
        assert_eq!(inventory.list_low_stock(0), vec!["banana"]);
        assert!(Inventory::new().list_low_stock(100).is_empty());
    }

    #[test]
    fn test_render_report() {
        let mut inventory = Inventory::new();
        inventory.add("banana", 2).unwrap();
        inventory.add("apple", 7).unwrap();
        assert_eq!(
            inventory.render_report(),
            "Items Report\napple -> 7\nbanana -> 2\n"
        );
    }
}
