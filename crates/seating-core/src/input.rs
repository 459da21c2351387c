//! Lenient parsing for the list-valued form fields
//!
//! Forms hand over reservations and stagger indices as JSON text. Bad entries
//! are dropped with a warning instead of failing the whole request.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::warning::LayoutWarning;

const BLOCKS_FIELD: &str = "manual_block_coords";
const STAGGER_FIELD: &str = "staggered_columns";

/// Parse `[[x, y], ...]` into a coordinate set
pub fn parse_block_coords(raw: &str) -> (BTreeSet<(i64, i64)>, Vec<LayoutWarning>) {
    let mut coords = BTreeSet::new();
    let mut warnings = Vec::new();

    let Some(items) = parse_list(BLOCKS_FIELD, raw, &mut warnings) else {
        return (coords, warnings);
    };

    for item in items {
        match coordinate_pair(&item) {
            Some(pair) => {
                coords.insert(pair);
            }
            None => warnings.push(LayoutWarning::malformed(
                BLOCKS_FIELD,
                format!("expected [x, y] integer pair, got {item}"),
            )),
        }
    }
    (coords, warnings)
}

/// Parse `[1, 3, ...]` into 1-based stagger indices
pub fn parse_staggered_columns(raw: &str) -> (BTreeSet<u32>, Vec<LayoutWarning>) {
    let mut columns = BTreeSet::new();
    let mut warnings = Vec::new();

    let Some(items) = parse_list(STAGGER_FIELD, raw, &mut warnings) else {
        return (columns, warnings);
    };

    for item in items {
        match column_index(&item) {
            Some(index) => {
                columns.insert(index);
            }
            None => warnings.push(LayoutWarning::malformed(
                STAGGER_FIELD,
                format!("expected positive integer index, got {item}"),
            )),
        }
    }
    (columns, warnings)
}

fn parse_list(field: &str, raw: &str, warnings: &mut Vec<LayoutWarning>) -> Option<Vec<Value>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(items)) => Some(items),
        Ok(other) => {
            warnings.push(LayoutWarning::malformed(
                field,
                format!("expected a list, got {other}"),
            ));
            None
        }
        Err(e) => {
            warnings.push(LayoutWarning::malformed(
                field,
                format!("invalid JSON '{trimmed}': {e}"),
            ));
            None
        }
    }
}

fn coordinate_pair(item: &Value) -> Option<(i64, i64)> {
    match item.as_array()?.as_slice() {
        [x, y] => Some((x.as_i64()?, y.as_i64()?)),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn column_index(item: &Value) -> Option<u32> {
    let index = match item {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u64)
        })?,
        Value::String(s) if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) => {
            s.parse().ok()?
        }
        _ => return None,
    };
    u32::try_from(index).ok().filter(|i| *i > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_coords_valid() {
        let (coords, warnings) = parse_block_coords("[[0, 0], [2, -1]]");
        assert!(warnings.is_empty());
        assert_eq!(coords.len(), 2);
        assert!(coords.contains(&(2, -1)));
    }

    #[test]
    fn test_block_coords_drop_bad_shapes() {
        let (coords, warnings) = parse_block_coords(r#"[[1, 2], [3], "a", [1.5, 2], [4, 5, 6]]"#);
        assert_eq!(coords.len(), 1);
        assert_eq!(warnings.len(), 4);
        assert!(warnings
            .iter()
            .all(|w| matches!(w, LayoutWarning::MalformedInput { .. })));
    }

    #[test]
    fn test_block_coords_not_a_list() {
        let (coords, warnings) = parse_block_coords(r#"{"x": 1}"#);
        assert!(coords.is_empty());
        assert_eq!(warnings.len(), 1);

        let (_, warnings) = parse_block_coords("[[0,0]");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_empty_input_is_silent() {
        let (coords, warnings) = parse_block_coords("   ");
        assert!(coords.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_stagger_accepts_digit_strings() {
        let (columns, warnings) = parse_staggered_columns(r#"[1, "3", 2.0]"#);
        assert!(warnings.is_empty());
        assert_eq!(columns.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_stagger_drops_zero_negative_and_text() {
        let (columns, warnings) = parse_staggered_columns(r#"[0, -2, "x", 4]"#);
        assert_eq!(columns.into_iter().collect::<Vec<_>>(), vec![4]);
        assert_eq!(warnings.len(), 3);
    }
}
