//! Plain-text rendering of a computed grid

use itertools::Itertools;

use crate::grid::{Cell, CellState, Grid};

fn token(state: CellState) -> String {
    match state {
        CellState::Empty => ".".to_string(),
        CellState::Stage => "STG".to_string(),
        CellState::HeadTable => "HT".to_string(),
        CellState::BlockedGap | CellState::Blocked => "##".to_string(),
        CellState::Table(n) => format!("T{n}"),
    }
}

/// Draw the grid with the highest row first, one right-aligned token per cell
#[must_use]
pub fn render_preview(grid: &Grid) -> String {
    let width = grid
        .iter()
        .map(|(_, state)| token(state).len())
        .max()
        .unwrap_or(1);

    (0..grid.rows())
        .rev()
        .map(|y| {
            (0..grid.cols())
                .map(|x| {
                    let state = grid.get(Cell::new(x, y)).unwrap_or_default();
                    format!("{:>width$}", token(state))
                })
                .join(" ")
        })
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_row_printed_first() {
        let mut grid = Grid::new(3, 2);
        grid.promote(Cell::new(0, 1), CellState::Stage);
        grid.promote(Cell::new(1, 1), CellState::Stage);
        grid.promote(Cell::new(2, 1), CellState::BlockedGap);
        grid.promote(Cell::new(0, 0), CellState::Table(1));
        grid.promote(Cell::new(1, 0), CellState::HeadTable);

        let text = render_preview(&grid);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["STG STG  ##", " T1  HT   ."]);
    }

    #[test]
    fn test_tokens_pad_to_widest() {
        let mut grid = Grid::new(2, 1);
        grid.promote(Cell::new(1, 0), CellState::Table(120));
        assert_eq!(render_preview(&grid), "   . T120");
    }
}
