//! Match detection.
//!
//! Scans every row left to right and every column top to bottom for maximal
//! runs of three or more same-colored tiles. Blocked cells and vacant cells
//! break a run. Horizontal and vertical runs that share a cell are merged into
//! a single cross-shaped group, since such a shape awards one special tile
//! rather than two.
//!
//! # Ordering
//!
//! Output order is stable: groups are ordered by their first run, and runs
//! are collected rows first (ascending row, then column), then columns
//! (ascending column, then row). Special-tile placement depends on it.

use std::collections::BTreeMap;

use cascade_grid::{Board, Color, Coord, Orientation};
use serde::{Deserialize, Serialize};

/// Minimum run length that counts as a match.
pub const MIN_MATCH: usize = 3;

/// Shape of a match group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchShape {
    /// A single straight run.
    Line(Orientation),
    /// Two or more runs of different orientation crossing (T, L or plus).
    Cross,
}

/// A set of same-colored cells cleared together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchGroup {
    color: Color,
    cells: Vec<Coord>,
    shape: MatchShape,
    span: usize,
    intersections: Vec<Coord>,
}

impl MatchGroup {
    /// The shared color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Cells in scan order, without duplicates.
    #[must_use]
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Shape tag.
    #[must_use]
    pub fn shape(&self) -> MatchShape {
        self.shape
    }

    /// Number of distinct cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a group has at least [`MIN_MATCH`] cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Length of the longest straight run in the group.
    #[must_use]
    pub fn span(&self) -> usize {
        self.span
    }

    /// Cells shared by a horizontal and a vertical run. Empty for lines.
    #[must_use]
    pub fn intersections(&self) -> &[Coord] {
        &self.intersections
    }

    /// Returns true if the group covers `at`.
    #[must_use]
    pub fn contains(&self, at: Coord) -> bool {
        self.cells.contains(&at)
    }

    /// The middle cell by index.
    #[must_use]
    pub fn middle(&self) -> Coord {
        self.cells[self.cells.len() / 2]
    }
}

#[derive(Debug, Clone)]
struct Run {
    color: Color,
    orientation: Orientation,
    cells: Vec<Coord>,
}

/// Finds every match group on the board.
///
/// # Example
///
/// ```
/// use cascade_core::matcher::{find_matches, MatchShape};
/// use cascade_grid::{Board, Color, Orientation};
///
/// let board = Board::from_pattern(
///     Color::standard(),
///     &["RRRG", "GBYB", "BYGY"],
/// ).unwrap();
///
/// let groups = find_matches(&board);
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].shape(), MatchShape::Line(Orientation::Horizontal));
/// assert_eq!(groups[0].len(), 3);
/// ```
#[must_use]
pub fn find_matches(board: &Board) -> Vec<MatchGroup> {
    let mut runs = scan_runs(board, Orientation::Horizontal);
    runs.extend(scan_runs(board, Orientation::Vertical));
    if runs.is_empty() {
        return Vec::new();
    }
    merge_runs(&runs)
}

/// Collects maximal runs of at least [`MIN_MATCH`] along one orientation.
///
/// A blocked cell ends the current run; a vacant cell discards it.
fn scan_runs(board: &Board, orientation: Orientation) -> Vec<Run> {
    let lines = match orientation {
        Orientation::Horizontal => board.rows(),
        Orientation::Vertical => board.cols(),
    };

    let mut runs = Vec::new();
    for index in 0..lines {
        let mut current: Vec<Coord> = Vec::new();
        let mut current_color: Option<Color> = None;

        for at in board.line(orientation, index) {
            let blocked = board.is_blocked(at);
            let color = if blocked { None } else { board.color_at(at) };

            if !blocked && color.is_none() {
                // A vacant cell drops the run it interrupts.
                current.clear();
                current_color = None;
                continue;
            }
            if color.is_some() && color == current_color {
                current.push(at);
                continue;
            }
            if let Some(run_color) = current_color {
                flush_run(&mut runs, run_color, orientation, std::mem::take(&mut current));
            }
            current.clear();
            if color.is_some() {
                current.push(at);
            }
            current_color = color;
        }
        if let Some(run_color) = current_color {
            flush_run(&mut runs, run_color, orientation, current);
        }
    }
    runs
}

fn flush_run(runs: &mut Vec<Run>, color: Color, orientation: Orientation, cells: Vec<Coord>) {
    if cells.len() >= MIN_MATCH {
        runs.push(Run {
            color,
            orientation,
            cells,
        });
    }
}

/// Merges runs that share a cell into cross groups.
fn merge_runs(runs: &[Run]) -> Vec<MatchGroup> {
    let mut parent: Vec<usize> = (0..runs.len()).collect();

    let mut owners: BTreeMap<Coord, Vec<usize>> = BTreeMap::new();
    for (idx, run) in runs.iter().enumerate() {
        for &at in &run.cells {
            owners.entry(at).or_default().push(idx);
        }
    }
    for indices in owners.values() {
        for pair in indices.windows(2) {
            union(&mut parent, pair[0], pair[1]);
        }
    }

    // Components keyed by root, ordered by their first run.
    let mut order: Vec<usize> = Vec::new();
    let mut members: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for idx in 0..runs.len() {
        let root = find(&mut parent, idx);
        let entry = members.entry(root).or_default();
        if entry.is_empty() {
            order.push(root);
        }
        entry.push(idx);
    }

    order
        .into_iter()
        .map(|root| build_group(runs, &members[&root], &owners))
        .collect()
}

fn build_group(runs: &[Run], member_runs: &[usize], owners: &BTreeMap<Coord, Vec<usize>>) -> MatchGroup {
    let first = &runs[member_runs[0]];
    let mut cells: Vec<Coord> = Vec::new();
    for &idx in member_runs {
        for &at in &runs[idx].cells {
            if !cells.contains(&at) {
                cells.push(at);
            }
        }
    }

    let intersections: Vec<Coord> = if member_runs.len() > 1 {
        cells
            .iter()
            .copied()
            .filter(|at| owners.get(at).is_some_and(|o| o.len() > 1))
            .collect()
    } else {
        Vec::new()
    };

    let shape = if member_runs.len() == 1 {
        MatchShape::Line(first.orientation)
    } else {
        MatchShape::Cross
    };
    let span = member_runs
        .iter()
        .map(|&idx| runs[idx].cells.len())
        .max()
        .unwrap_or(0);

    MatchGroup {
        color: first.color,
        cells,
        shape,
        span,
        intersections,
    }
}

fn find(parent: &mut [usize], mut idx: usize) -> usize {
    while parent[idx] != idx {
        parent[idx] = parent[parent[idx]];
        idx = parent[idx];
    }
    idx
}

fn union(parent: &mut [usize], a: usize, b: usize) {
    let (ra, rb) = (find(parent, a), find(parent, b));
    if ra != rb {
        let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[hi] = lo;
    }
}
