use crate::utils::error::{InventoryError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Parses a quantity given as text, e.g. from the command line.
pub fn parse_quantity(field_name: &str, raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|e| InventoryError::InvalidArgument {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: format!("Quantity must be a whole number: {}", e),
        })
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(InventoryError::InvalidArgument {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(InventoryError::InvalidArgument {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn checked_sum(field_name: &str, current: i64, delta: i64) -> Result<i64> {
    current
        .checked_add(delta)
        .ok_or_else(|| InventoryError::InvalidArgument {
            field: field_name.to_string(),
            value: delta.to_string(),
            reason: format!("Adding {} to {} overflows the quantity range", delta, current),
        })
}

pub fn checked_difference(field_name: &str, current: i64, delta: i64) -> Result<i64> {
    current
        .checked_sub(delta)
        .ok_or_else(|| InventoryError::InvalidArgument {
            field: field_name.to_string(),
            value: delta.to_string(),
            reason: format!(
                "Removing {} from {} overflows the quantity range",
                delta, current
            ),
        })
}
