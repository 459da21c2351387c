//! Layout request parameters
//!
//! `LayoutParameters` is assembled per request by the caller. Primitive typing
//! is the caller's job; [`LayoutParameters::validate`] re-checks the semantic
//! minimums before any grid is allocated.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

use crate::macros::string_enum_serde;
use crate::{Error, Result};

/// Grid edge the stage sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, VariantNames)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum StageLocation {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl StageLocation {
    /// True when the stage front runs along the x axis (TOP/BOTTOM)
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Cross-axis alignment shared by the stage and the head table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, VariantNames)]
#[strum(ascii_case_insensitive)]
pub enum Alignment {
    #[strum(to_string = "LEFT", serialize = "ALIGN_LEFT", serialize = "EDGE_TOP_OR_LEFT")]
    Left,
    #[strum(
        to_string = "RIGHT",
        serialize = "ALIGN_RIGHT",
        serialize = "EDGE_BOTTOM_OR_RIGHT"
    )]
    Right,
    #[default]
    #[strum(to_string = "CENTER_LEAN_LOW", serialize = "CENTER_LEAN_LEFT_BOTTOM")]
    CenterLeanLow,
    #[strum(to_string = "CENTER_LEAN_HIGH", serialize = "CENTER_LEAN_RIGHT_TOP")]
    CenterLeanHigh,
}

impl Alignment {
    /// Start offset of an item of length `item` inside a container of length
    /// `container`. The caller guarantees `item <= container`.
    #[must_use]
    pub const fn start_offset(self, container: u32, item: u32) -> u32 {
        let slack = container.saturating_sub(item);
        match self {
            Self::Left => 0,
            Self::Right => slack,
            Self::CenterLeanLow => slack / 2,
            Self::CenterLeanHigh => slack.div_ceil(2),
        }
    }
}

/// Axis along which consecutive table numbers advance between passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, VariantNames)]
#[strum(ascii_case_insensitive)]
pub enum NumberingAxis {
    #[default]
    #[strum(to_string = "TOWARDS_STAGE", serialize = "TOWARDS_STAGE_AXIS")]
    TowardsStage,
    #[strum(to_string = "PARALLEL_TO_STAGE", serialize = "PARALLEL_TO_STAGE_AXIS")]
    ParallelToStage,
}

/// Guest-area corner where numbering starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, VariantNames)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum StartCorner {
    FrontLeft,
    FrontRight,
    #[default]
    BackLeft,
    BackRight,
}

impl StartCorner {
    #[must_use]
    pub const fn is_front(self) -> bool {
        matches!(self, Self::FrontLeft | Self::FrontRight)
    }

    #[must_use]
    pub const fn is_left(self) -> bool {
        matches!(self, Self::FrontLeft | Self::BackLeft)
    }
}

string_enum_serde!(StageLocation);
string_enum_serde!(Alignment);
string_enum_serde!(NumberingAxis);
string_enum_serde!(StartCorner);

/// Parse one of the string-backed enums, reporting the accepted spellings
pub fn parse_choice<T>(field: &str, raw: &str) -> Result<T>
where
    T: FromStr + VariantNames,
{
    raw.trim().parse::<T>().map_err(|_| {
        Error::configuration(format!(
            "invalid {field} '{raw}', expected one of: {}",
            T::VARIANTS.join(", ")
        ))
    })
}

/// Head table request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadTableSpec {
    pub use_head_table: bool,
    /// Extent along the stage front
    pub width: u32,
    /// Extent away from the stage
    pub depth: u32,
    pub alignment: Alignment,
    pub gap_from_stage: u32,
    /// 0 is the first row after the gap; negative reaches back into the gap
    pub row_index_in_zone: i32,
    pub block_leading_space: bool,
    pub blocks_behind: bool,
}

impl Default for HeadTableSpec {
    fn default() -> Self {
        Self {
            use_head_table: true,
            width: 2,
            depth: 1,
            alignment: Alignment::CenterLeanLow,
            gap_from_stage: 0,
            row_index_in_zone: 0,
            block_leading_space: false,
            blocks_behind: false,
        }
    }
}

/// Everything one layout computation needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParameters {
    pub stage_location: StageLocation,
    pub stage_front_width: u32,
    pub stage_alignment: Alignment,
    pub guest_area_depth: u32,
    pub guest_area_width: u32,
    pub numbering_primary_axis: NumberingAxis,
    pub numbering_start_corner: StartCorner,
    pub head_table_spec: Option<HeadTableSpec>,
    /// Absolute `(x, y)` cells to reserve; may lie outside the grid
    pub manual_block_coords: BTreeSet<(i64, i64)>,
    /// 1-based visual cross-axis indices rendered half a unit deeper
    pub staggered_columns: BTreeSet<u32>,
}

impl Default for LayoutParameters {
    fn default() -> Self {
        Self {
            stage_location: StageLocation::Top,
            stage_front_width: 4,
            stage_alignment: Alignment::CenterLeanLow,
            guest_area_depth: 8,
            guest_area_width: 5,
            numbering_primary_axis: NumberingAxis::TowardsStage,
            numbering_start_corner: StartCorner::BackLeft,
            head_table_spec: None,
            manual_block_coords: BTreeSet::new(),
            staggered_columns: BTreeSet::new(),
        }
    }
}

impl LayoutParameters {
    /// Head table spec, only when it is switched on
    #[must_use]
    pub fn active_head_table(&self) -> Option<&HeadTableSpec> {
        self.head_table_spec
            .as_ref()
            .filter(|spec| spec.use_head_table)
    }

    /// Check the semantic minimums
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        require_positive("stage_front_width", self.stage_front_width)?;
        require_positive("guest_area_depth", self.guest_area_depth)?;
        require_positive("guest_area_width", self.guest_area_width)?;

        if let Some(spec) = self.active_head_table() {
            require_positive("head_table.width", spec.width)?;
            require_positive("head_table.depth", spec.depth)?;
        }
        Ok(())
    }
}

fn require_positive(field: &str, value: u32) -> Result<()> {
    if value == 0 {
        return Err(Error::configuration(format!(
            "{field} must be at least 1, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_offsets() {
        assert_eq!(Alignment::Left.start_offset(5, 2), 0);
        assert_eq!(Alignment::Right.start_offset(5, 2), 3);
        assert_eq!(Alignment::CenterLeanLow.start_offset(5, 2), 1);
        assert_eq!(Alignment::CenterLeanHigh.start_offset(5, 2), 2);
        assert_eq!(Alignment::CenterLeanHigh.start_offset(6, 2), 2);
        assert_eq!(Alignment::CenterLeanLow.start_offset(5, 4), 0);
    }

    #[test]
    fn test_legacy_aliases_parse() -> Result<()> {
        assert_eq!(
            parse_choice::<Alignment>("alignment", "CENTER_LEAN_LEFT_BOTTOM")?,
            Alignment::CenterLeanLow
        );
        assert_eq!(
            parse_choice::<Alignment>("alignment", "ALIGN_RIGHT")?,
            Alignment::Right
        );
        assert_eq!(
            parse_choice::<NumberingAxis>("axis", "PARALLEL_TO_STAGE_AXIS")?,
            NumberingAxis::ParallelToStage
        );
        assert_eq!(
            parse_choice::<StageLocation>("stage_location", "bottom")?,
            StageLocation::Bottom
        );
        Ok(())
    }

    #[test]
    fn test_display_uses_canonical_names() {
        assert_eq!(Alignment::CenterLeanHigh.to_string(), "CENTER_LEAN_HIGH");
        assert_eq!(StartCorner::BackLeft.to_string(), "BACK_LEFT");
        assert_eq!(NumberingAxis::TowardsStage.to_string(), "TOWARDS_STAGE");
    }

    #[test]
    fn test_unknown_enum_is_configuration_error() {
        let result = parse_choice::<StageLocation>("stage_location", "MIDDLE");
        assert!(matches!(result, Err(Error::Configuration(msg)) if msg.contains("MIDDLE")));
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        let params = LayoutParameters {
            guest_area_width: 0,
            ..LayoutParameters::default()
        };
        assert!(matches!(params.validate(), Err(Error::Configuration(_))));

        let params = LayoutParameters {
            head_table_spec: Some(HeadTableSpec {
                depth: 0,
                ..HeadTableSpec::default()
            }),
            ..LayoutParameters::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_disabled_head_table_is_not_validated() {
        let params = LayoutParameters {
            head_table_spec: Some(HeadTableSpec {
                use_head_table: false,
                width: 0,
                ..HeadTableSpec::default()
            }),
            ..LayoutParameters::default()
        };
        assert!(params.validate().is_ok());
        assert!(params.active_head_table().is_none());
    }

    #[test]
    fn test_parameters_deserialize_with_defaults() -> std::result::Result<(), serde_json::Error> {
        let params: LayoutParameters = serde_json::from_str(
            r#"{"stage_location": "LEFT", "stage_alignment": "CENTER_LEAN_RIGHT_TOP",
                "manual_block_coords": [[0, 1], [2, 3]], "staggered_columns": [1]}"#,
        )?;
        assert_eq!(params.stage_location, StageLocation::Left);
        assert_eq!(params.stage_alignment, Alignment::CenterLeanHigh);
        assert_eq!(params.guest_area_depth, 8);
        assert!(params.manual_block_coords.contains(&(2, 3)));
        assert!(params.staggered_columns.contains(&1));
        Ok(())
    }
}
