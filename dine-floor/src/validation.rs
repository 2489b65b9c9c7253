//! Client-side validation
//!
//! Rules checked before anything is submitted. Failures never reach the
//! server.

use std::collections::HashSet;

use shared::models::{ItemId, ItemKind, LayoutItem, TableSpec};
use thiserror::Error;

/// Lower/upper bound of item coordinates, percent of canvas
pub const MIN_COORDINATE: f64 = 0.0;
pub const MAX_COORDINATE: f64 = 100.0;

/// Furniture name limit
pub const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Capacity must be a whole number, got '{0}'")]
    InvalidCapacity(String),

    #[error("Capacity must be at least 1")]
    ZeroCapacity,

    #[error("{field} must be a positive number, got '{value}'")]
    InvalidDimension { field: &'static str, value: String },

    #[error("{field} of item {id} is outside 0-100: {value}")]
    CoordinateOutOfRange {
        id: ItemId,
        field: &'static str,
        value: f64,
    },

    #[error("Table number {0} is used more than once")]
    DuplicateTableNumber(i32),

    #[error("Furniture name is too long ({len} chars, max {max})")]
    NameTooLong { len: usize, max: usize },

    #[error("Layout is empty")]
    EmptyLayout,

    #[error("Number of guests must be at least 1")]
    NoGuests,

    #[error("Table {table_number} seats {capacity}, {guests} guests requested")]
    TooManyGuests {
        table_number: i32,
        capacity: u32,
        guests: u32,
    },

    #[error("No table selected")]
    NoTableSelected,

    #[error("Invalid date '{0}', expected YYYY-MM-DDTHH:MM")]
    InvalidDate(String),

    #[error("No user ID found; please log in again.")]
    NotSignedIn,
}

impl From<shared::util::DateFormatError> for ValidationError {
    fn from(err: shared::util::DateFormatError) -> Self {
        Self::InvalidDate(err.0)
    }
}

/// Parse a capacity form field
pub fn parse_capacity(input: &str) -> Result<u32, ValidationError> {
    let capacity: u32 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidCapacity(input.to_string()))?;
    if capacity == 0 {
        return Err(ValidationError::ZeroCapacity);
    }
    Ok(capacity)
}

/// Parse a furniture width/height form field (percent of canvas)
pub fn parse_dimension(input: &str, field: &'static str) -> Result<f64, ValidationError> {
    let invalid = || ValidationError::InvalidDimension {
        field,
        value: input.to_string(),
    };
    let value: f64 = input.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value <= 0.0 || value > MAX_COORDINATE {
        return Err(invalid());
    }
    Ok(value)
}

fn validate_coordinate(id: ItemId, field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !(MIN_COORDINATE..=MAX_COORDINATE).contains(&value) {
        return Err(ValidationError::CoordinateOutOfRange { id, field, value });
    }
    Ok(())
}

/// Check a full layout before it is submitted as a replacement
pub fn validate_layout(items: &[LayoutItem]) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::EmptyLayout);
    }

    let mut numbers = HashSet::new();
    for item in items {
        validate_coordinate(item.id, "x_coordinate", item.x_coordinate)?;
        validate_coordinate(item.id, "y_coordinate", item.y_coordinate)?;

        match &item.kind {
            ItemKind::Table(table) => {
                if table.capacity == 0 {
                    return Err(ValidationError::ZeroCapacity);
                }
                if !numbers.insert(table.table_number) {
                    return Err(ValidationError::DuplicateTableNumber(table.table_number));
                }
            }
            ItemKind::Furniture(furniture) => {
                let len = furniture.name.chars().count();
                if len > MAX_NAME_LEN {
                    return Err(ValidationError::NameTooLong {
                        len,
                        max: MAX_NAME_LEN,
                    });
                }
                for (field, value) in [("width", furniture.width), ("height", furniture.height)] {
                    if !value.is_finite() || value <= 0.0 {
                        return Err(ValidationError::InvalidDimension {
                            field,
                            value: value.to_string(),
                        });
                    }
                }
            }
        }
    }
    Ok(())
}

/// Party size must fit the chosen table
pub fn validate_guests(guests: u32, table: &TableSpec) -> Result<(), ValidationError> {
    if guests == 0 {
        return Err(ValidationError::NoGuests);
    }
    if guests > table.capacity {
        return Err(ValidationError::TooManyGuests {
            table_number: table.table_number,
            capacity: table.capacity,
            guests,
        });
    }
    Ok(())
}
