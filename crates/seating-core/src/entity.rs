//! Entities written to the layout artifact

use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::grid::Cell;

/// Kind of entity on the chart
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EntityType {
    Stage,
    HeadTable,
    Normal,
}

/// Rendered coordinate stored in half units, so staggered tables stay exact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HalfUnits(u32);

impl HalfUnits {
    #[must_use]
    pub const fn whole(value: u32) -> Self {
        Self(value * 2)
    }

    /// Shift by half a unit
    #[must_use]
    pub const fn plus_half(self) -> Self {
        Self(self.0 + 1)
    }

    #[must_use]
    pub const fn is_whole(self) -> bool {
        self.0 % 2 == 0
    }

    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 2.0
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_f64(value: f64) -> Option<Self> {
        let doubled = value * 2.0;
        if !doubled.is_finite() || doubled < 0.0 || doubled.fract() != 0.0 {
            return None;
        }
        if doubled > f64::from(u32::MAX) {
            return None;
        }
        Some(Self(doubled as u32))
    }
}

impl fmt::Display for HalfUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_whole() {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}.5", self.0 / 2)
        }
    }
}

impl Serialize for HalfUnits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_whole() {
            serializer.serialize_u32(self.0 / 2)
        } else {
            serializer.serialize_f64(self.as_f64())
        }
    }
}

impl<'de> Deserialize<'de> for HalfUnits {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::from_f64(value).ok_or_else(|| {
            de::Error::custom(format!(
                "position component {value} is not a non-negative half unit"
            ))
        })
    }
}

/// Rendered position, serialized as `[x, y]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: HalfUnits,
    pub y: HalfUnits,
}

impl Position {
    #[must_use]
    pub const fn of_cell(cell: Cell) -> Self {
        Self {
            x: HalfUnits::whole(cell.x),
            y: HalfUnits::whole(cell.y),
        }
    }

    /// `(x, y)` as floats, for renderers
    #[must_use]
    pub fn as_f64(&self) -> (f64, f64) {
        (self.x.as_f64(), self.y.as_f64())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.x)?;
        tuple.serialize_element(&self.y)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (x, y) = <(HalfUnits, HalfUnits)>::deserialize(deserializer)?;
        Ok(Self { x, y })
    }
}

/// One entry of the layout artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntity {
    #[serde(skip)]
    pub id: String,
    pub position: Position,
    #[serde(rename = "type")]
    pub kind: EntityType,
    #[serde(
        rename = "displayName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<String>,
}

impl TableEntity {
    /// Stage cell entity, id `Stage_<x>_<y>`
    #[must_use]
    pub fn stage(cell: Cell) -> Self {
        Self {
            id: format!("Stage_{}_{}", cell.x, cell.y),
            position: Position::of_cell(cell),
            kind: EntityType::Stage,
            display_name: None,
        }
    }

    /// Head-table cell entity, id `HeadTable_<x>_<y>`
    #[must_use]
    pub fn head_table(cell: Cell) -> Self {
        Self {
            id: format!("HeadTable_{}_{}", cell.x, cell.y),
            position: Position::of_cell(cell),
            kind: EntityType::HeadTable,
            display_name: None,
        }
    }

    /// Numbered guest table `T<n>` with an empty display name
    #[must_use]
    pub fn normal(number: u32, position: Position) -> Self {
        Self {
            id: table_id(number),
            position,
            kind: EntityType::Normal,
            display_name: Some(String::new()),
        }
    }
}

/// Artifact id for table number `n`
#[must_use]
pub fn table_id(number: u32) -> String {
    format!("T{number}")
}

/// Numeric part of a `T<n>` id
#[must_use]
pub fn table_number(id: &str) -> Option<u32> {
    id.strip_prefix('T').and_then(|n| n.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_positions_serialize_as_integers() -> serde_json::Result<()> {
        let entity = TableEntity::stage(Cell::new(3, 8));
        let json = serde_json::to_string(&entity)?;
        assert_eq!(json, r#"{"position":[3,8],"type":"stage"}"#);
        assert_eq!(entity.id, "Stage_3_8");
        Ok(())
    }

    #[test]
    fn test_half_positions_serialize_as_floats() -> serde_json::Result<()> {
        let position = Position {
            x: HalfUnits::whole(0),
            y: HalfUnits::whole(4).plus_half(),
        };
        let entity = TableEntity::normal(7, position);
        let json = serde_json::to_string(&entity)?;
        assert_eq!(
            json,
            r#"{"position":[0,4.5],"type":"normal","displayName":""}"#
        );
        assert_eq!(position.to_string(), "(0, 4.5)");
        Ok(())
    }

    #[test]
    fn test_position_rejects_negative_and_thirds() {
        assert!(serde_json::from_str::<Position>("[-1, 0]").is_err());
        assert!(serde_json::from_str::<Position>("[0.25, 0]").is_err());
        assert!(serde_json::from_str::<Position>("[1.5, 2.0]").is_ok());
    }

    #[test]
    fn test_table_number_parsing() {
        assert_eq!(table_number("T12"), Some(12));
        assert_eq!(table_number("Stage_0_1"), None);
        assert_eq!(table_number("Tx"), None);
    }
}
