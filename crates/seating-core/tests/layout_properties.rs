//! Property-based tests for layout invariants using proptest.
//!
//! # Invariants tested:
//! - Every cell ends in a terminal state; cells outside the guest area are
//!   stage or blocked
//! - Stage cell count equals the clamped footprint
//! - Numbering is a bijection onto `1..=K`
//! - Manual blocking is idempotent
//! - Stagger moves only the stage-normal rendered coordinate
//! - Computation is deterministic
//!
//! Reproducible: Set `PROPTEST_SEED` environment variable for deterministic runs

// Integration tests have relaxed clippy settings for test ergonomics.
// Production code (src/) must use strict zero-unwrap/panic patterns.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::too_many_lines,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::uninlined_format_args
)]

use std::collections::BTreeSet;

use proptest::prelude::*;
use seating_core::entity::table_number;
use seating_core::layout::overlay::apply_manual_blocks;
use seating_core::layout::stagger::visual_index;
use seating_core::{
    compute_layout, Alignment, Cell, CellState, EntityType, Error, HalfUnits, HeadTableSpec,
    LayoutParameters, NumberingAxis, StageLocation, StartCorner,
};

// ═══════════════════════════════════════════════════════════════════════════
// STRATEGIES
// ═══════════════════════════════════════════════════════════════════════════

fn location_strategy() -> impl Strategy<Value = StageLocation> {
    prop_oneof![
        Just(StageLocation::Top),
        Just(StageLocation::Bottom),
        Just(StageLocation::Left),
        Just(StageLocation::Right),
    ]
}

fn alignment_strategy() -> impl Strategy<Value = Alignment> {
    prop_oneof![
        Just(Alignment::Left),
        Just(Alignment::Right),
        Just(Alignment::CenterLeanLow),
        Just(Alignment::CenterLeanHigh),
    ]
}

fn axis_strategy() -> impl Strategy<Value = NumberingAxis> {
    prop_oneof![
        Just(NumberingAxis::TowardsStage),
        Just(NumberingAxis::ParallelToStage),
    ]
}

fn corner_strategy() -> impl Strategy<Value = StartCorner> {
    prop_oneof![
        Just(StartCorner::FrontLeft),
        Just(StartCorner::FrontRight),
        Just(StartCorner::BackLeft),
        Just(StartCorner::BackRight),
    ]
}

fn head_table_strategy() -> impl Strategy<Value = Option<HeadTableSpec>> {
    proptest::option::of(
        (
            1u32..4,
            1u32..3,
            alignment_strategy(),
            0u32..3,
            -3i32..4,
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(
                |(width, depth, alignment, gap, row, leading, behind)| HeadTableSpec {
                    use_head_table: true,
                    width,
                    depth,
                    alignment,
                    gap_from_stage: gap,
                    row_index_in_zone: row,
                    block_leading_space: leading,
                    blocks_behind: behind,
                },
            ),
    )
}

fn params_strategy() -> impl Strategy<Value = LayoutParameters> {
    (
        (
            location_strategy(),
            1u32..10,
            alignment_strategy(),
            1u32..9,
            1u32..9,
        ),
        (axis_strategy(), corner_strategy(), head_table_strategy()),
        proptest::collection::btree_set((-2i64..12, -2i64..12), 0..8),
        proptest::collection::btree_set(1u32..9, 0..4),
    )
        .prop_map(
            |(
                (location, stage_width, stage_alignment, depth, width),
                (axis, corner, head_table),
                blocks,
                stagger,
            )| LayoutParameters {
                stage_location: location,
                stage_front_width: stage_width,
                stage_alignment,
                guest_area_depth: depth,
                guest_area_width: width,
                numbering_primary_axis: axis,
                numbering_start_corner: corner,
                head_table_spec: head_table,
                manual_block_coords: blocks,
                staggered_columns: stagger,
            },
        )
}

// ═══════════════════════════════════════════════════════════════════════════
// PROPERTIES
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_every_cell_terminal(
        params in params_strategy(),
        stage_depth in 1u32..3,
    ) {
        let Ok(outcome) = compute_layout(&params, stage_depth) else {
            return Ok(());
        };
        for (cell, state) in outcome.grid.iter() {
            prop_assert_ne!(state, CellState::Empty, "cell {} left empty", cell);
            if outcome.geometry.in_guest_area(cell) {
                prop_assert_ne!(state, CellState::Stage, "stage inside guest area at {}", cell);
            } else {
                prop_assert!(
                    matches!(state, CellState::Stage | CellState::Blocked),
                    "cell {} outside guest area is {}", cell, state
                );
            }
        }
    }

    #[test]
    fn prop_stage_count_matches_clamped_footprint(
        params in params_strategy(),
        stage_depth in 1u32..3,
    ) {
        let Ok(outcome) = compute_layout(&params, stage_depth) else {
            return Ok(());
        };
        let expected = params.stage_front_width.min(params.guest_area_width) * stage_depth;
        prop_assert_eq!(outcome.grid.count(|s| s == CellState::Stage), expected as usize);
        prop_assert_eq!(outcome.result.of_kind(EntityType::Stage).count(), expected as usize);
    }

    #[test]
    fn prop_numbering_is_bijection(params in params_strategy()) {
        let Ok(outcome) = compute_layout(&params, 1) else {
            return Ok(());
        };
        let table_cells = outcome
            .grid
            .count(|s| matches!(s, CellState::Table(_)));
        let mut numbers: Vec<u32> = outcome
            .result
            .of_kind(EntityType::Normal)
            .filter_map(|e| table_number(&e.id))
            .collect();
        numbers.sort_unstable();

        let expected: Vec<u32> = (1..=table_cells as u32).collect();
        prop_assert_eq!(numbers, expected);
        prop_assert_eq!(outcome.table_count(), table_cells);
    }

    #[test]
    fn prop_head_table_is_whole_or_error(params in params_strategy()) {
        match compute_layout(&params, 1) {
            Ok(outcome) => {
                let expected = params
                    .active_head_table()
                    .map_or(0, |spec| (spec.width * spec.depth) as usize);
                prop_assert_eq!(outcome.grid.count(|s| s == CellState::HeadTable), expected);
            }
            Err(e) => {
                prop_assert!(params.head_table_spec.is_some());
                prop_assert!(matches!(e, Error::Configuration(_)));
            }
        }
    }

    #[test]
    fn prop_manual_blocks_idempotent(params in params_strategy()) {
        let Ok(outcome) = compute_layout(&params, 1) else {
            return Ok(());
        };
        let mut again = outcome.grid.clone();
        apply_manual_blocks(&mut again, &params.manual_block_coords);
        prop_assert_eq!(again, outcome.grid);
    }

    #[test]
    fn prop_stagger_moves_only_normal_axis(params in params_strategy()) {
        let Ok(outcome) = compute_layout(&params, 1) else {
            return Ok(());
        };
        let horizontal = outcome.geometry.stage_is_horizontal();
        for (cell, state) in outcome.grid.iter() {
            let CellState::Table(n) = state else { continue };
            let entity = outcome.result.get(&format!("T{n}")).unwrap();
            let shifted = visual_index(&outcome.geometry, cell)
                .is_some_and(|i| params.staggered_columns.contains(&i));

            let (expect_x, expect_y) = match (shifted, horizontal) {
                (false, _) => (HalfUnits::whole(cell.x), HalfUnits::whole(cell.y)),
                (true, true) => (HalfUnits::whole(cell.x), HalfUnits::whole(cell.y).plus_half()),
                (true, false) => (HalfUnits::whole(cell.x).plus_half(), HalfUnits::whole(cell.y)),
            };
            prop_assert_eq!(entity.position.x, expect_x);
            prop_assert_eq!(entity.position.y, expect_y);
        }
    }

    #[test]
    fn prop_deterministic(params in params_strategy()) {
        let first = compute_layout(&params, 1);
        let second = compute_layout(&params, 1);
        match (first, second) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.result, b.result);
                prop_assert_eq!(a.grid, b.grid);
            }
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "outcomes differ"),
        }
    }

    #[test]
    fn prop_manual_blocks_never_touch_permanent_cells(params in params_strategy()) {
        let without = LayoutParameters {
            manual_block_coords: BTreeSet::new(),
            ..params.clone()
        };
        let (Ok(with), Ok(base)) = (compute_layout(&params, 1), compute_layout(&without, 1)) else {
            return Ok(());
        };
        for (cell, state) in base.grid.iter() {
            if state.is_permanent() {
                prop_assert_eq!(with.grid.get(cell), Some(state));
            }
        }
        prop_assert!(with.table_count() <= base.table_count());
    }
}

#[test]
fn every_cell_of_scenario_grid_is_addressable() {
    let outcome = compute_layout(&LayoutParameters::default(), 1).unwrap();
    assert!(outcome.grid.get(Cell::new(4, 8)).is_some());
    assert!(outcome.grid.get(Cell::new(5, 8)).is_none());
}
