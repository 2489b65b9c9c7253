//! Layout Item Model
//!
//! A placed table or furniture piece on a restaurant floor plan.
//! Coordinates are percentages of the canvas, `[0, 100]` on both axes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identity of a layout item
///
/// Items created in the editor carry a `Provisional` id until the layout
/// is saved and reloaded; the server then hands out `Persisted` ids.
/// Provisional ids never go over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemId {
    Provisional(i64),
    Persisted(i64),
}

impl ItemId {
    pub fn is_provisional(&self) -> bool {
        matches!(self, Self::Provisional(_))
    }

    /// Server id, if the item has been persisted
    pub fn persisted(&self) -> Option<i64> {
        match self {
            Self::Persisted(id) => Some(*id),
            Self::Provisional(_) => None,
        }
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provisional(id) => write!(f, "new-{}", id),
            Self::Persisted(id) => write!(f, "{}", id),
        }
    }
}

impl Serialize for ItemId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Persisted(id) => serializer.serialize_i64(*id),
            Self::Provisional(_) => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        i64::deserialize(deserializer).map(Self::Persisted)
    }
}

/// Table category shown on the table surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableType {
    #[default]
    Standard,
    Vip,
    Booth,
}

/// Table outline; also selects the seat ring radius
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableShape {
    #[default]
    Rectangle,
    Circle,
}

/// Table-specific fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub table_number: i32,
    #[serde(default, deserialize_with = "null_default")]
    pub table_type: TableType,
    pub capacity: u32,
    #[serde(default, deserialize_with = "null_default")]
    pub shape: TableShape,
}

/// Furniture-specific fields (bar, entrance, stage...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureSpec {
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    /// Width, percent of canvas width
    pub width: f64,
    /// Height, percent of canvas height
    pub height: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub color: String,
}

/// Discriminated item payload, tagged by `type` on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    Table(TableSpec),
    Furniture(FurnitureSpec),
}

/// Layout item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutItem {
    #[serde(skip_serializing_if = "ItemId::is_provisional")]
    pub id: ItemId,
    pub x_coordinate: f64,
    pub y_coordinate: f64,
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl LayoutItem {
    pub fn is_table(&self) -> bool {
        matches!(self.kind, ItemKind::Table(_))
    }

    pub fn as_table(&self) -> Option<&TableSpec> {
        match &self.kind {
            ItemKind::Table(table) => Some(table),
            ItemKind::Furniture(_) => None,
        }
    }

    pub fn as_furniture(&self) -> Option<&FurnitureSpec> {
        match &self.kind {
            ItemKind::Furniture(furniture) => Some(furniture),
            ItemKind::Table(_) => None,
        }
    }

    /// Wire discriminant: `"table"` or `"furniture"`
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            ItemKind::Table(_) => "table",
            ItemKind::Furniture(_) => "furniture",
        }
    }
}

/// The backend returns every column for every row, `null` where a column
/// does not apply to the item's type.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
