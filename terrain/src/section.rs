//! Cross sections along grid lines, named and stacked for drawing.

use crate::{
    math::{arange, snap_down},
    Diagnostic, HeightField, TerrainError,
};
use log::{debug, warn};
use serde::Serialize;
use std::fmt;

/// Direction of a section cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Fixed x, runs south to north. Named `a`, `b`, ...
    Vertical,

    /// Fixed y, runs west to east. Named `1`, `2`, ...
    Horizontal,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertical => f.write_str("vertical"),
            Self::Horizontal => f.write_str("horizontal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionLine {
    pub axis: Axis,

    /// Column (vertical) or row (horizontal) of the grid.
    pub grid_index: usize,

    pub name: String,

    /// `(distance, elevation)` for each defined node along the cut,
    /// where distance is the node's coordinate along the cut.
    pub profile: Vec<(f64, f64)>,

    /// Drawing y of this section's zero elevation.
    pub stack_offset: f64,
}

impl SectionLine {
    /// Profile vertices translated to drawing space, starting at `x0`.
    pub fn drawing_coords(&self, x0: f64, start: f64) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.profile
            .iter()
            .map(move |(d, z)| (x0 + d - start, self.stack_offset + z))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sections {
    /// Vertical sections first, then horizontal, top to bottom.
    pub lines: Vec<SectionLine>,

    pub diagnostics: Vec<Diagnostic>,
}

impl Sections {
    /// Cuts `field` every `spacing` units along both axes.
    ///
    /// `spacing` is snapped down to a multiple of the cell size (at
    /// least one cell). Sections are stacked below the grid with
    /// `gap` between bands; every band is as tall as the whole field's
    /// relief, so no two profiles can overlap.
    pub fn cut(field: &HeightField, spacing: f64, gap: f64) -> Result<Self, TerrainError> {
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(TerrainError::InvalidParameter {
                name: "section spacing",
                value: spacing,
            });
        }
        if !(gap.is_finite() && gap >= 0.0) {
            return Err(TerrainError::InvalidParameter {
                name: "section gap",
                value: gap,
            });
        }

        let grid = *field.grid();
        let step = snap_down(spacing, grid.cell_size).max(grid.cell_size);
        if step != spacing {
            debug!("section spacing {spacing} snapped to {step}");
        }

        let mut lines = Vec::new();
        let mut diagnostics = Vec::new();
        let mut report = |diagnostic: Diagnostic| {
            warn!("{diagnostic}");
            diagnostics.push(diagnostic);
        };

        for axis in [Axis::Vertical, Axis::Horizontal] {
            let (origin, count, max) = match axis {
                Axis::Vertical => (grid.origin_x, grid.nx, grid.max_x()),
                Axis::Horizontal => (grid.origin_y, grid.ny, grid.max_y()),
            };
            let stop = max + step * 1e-6;
            for (ordinal, position) in arange(origin, stop, step).enumerate() {
                let name = match axis {
                    Axis::Vertical => letter_name(ordinal + 1),
                    Axis::Horizontal => (ordinal + 1).to_string(),
                };
                let Some(grid_index) = grid.line_index(origin, count, position) else {
                    report(Diagnostic::UnmatchedCut { axis, position });
                    continue;
                };
                let profile: Vec<(f64, f64)> = match axis {
                    Axis::Vertical => field
                        .column(grid_index)
                        .enumerate()
                        .filter_map(|(j, z)| z.map(|z| (grid.y(j), z)))
                        .collect(),
                    Axis::Horizontal => field
                        .row(grid_index)
                        .enumerate()
                        .filter_map(|(i, z)| z.map(|z| (grid.x(i), z)))
                        .collect(),
                };
                if profile.is_empty() {
                    report(Diagnostic::EmptySection { axis, name });
                    continue;
                }
                lines.push(SectionLine {
                    axis,
                    grid_index,
                    name,
                    profile,
                    stack_offset: 0.0,
                });
            }
        }

        if let (Some(max), Some(relief)) = (field.max(), field.relief()) {
            let first = grid.origin_y - gap - max;
            let pitch = gap + relief;
            for (k, line) in lines.iter_mut().enumerate() {
                #[allow(clippy::cast_precision_loss)]
                let k = k as f64;
                line.stack_offset = first - k * pitch;
            }
        }

        debug!(
            "sections; cut: {}, skipped: {}, step: {step}",
            lines.len(),
            diagnostics.len()
        );

        Ok(Self { lines, diagnostics })
    }
}

/// Returns the bijective base-26 name of `n`: 1 → `a`, 26 → `z`,
/// 27 → `aa`, 52 → `az`, 53 → `ba`.
///
/// `0` has no name and gives an empty string.
pub fn letter_name(mut n: usize) -> String {
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        #[allow(clippy::cast_possible_truncation)]
        letters.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    letters.iter().rev().map(|b| char::from(*b)).collect()
}

#[cfg(test)]
mod tests {
    use super::{letter_name, Axis, Sections};
    use crate::{Diagnostic, Grid, HeightField, TerrainError};
    use approx::assert_relative_eq;
    use std::collections::HashSet;

    fn grid(nx: usize, ny: usize, cell_size: f64) -> Grid {
        Grid {
            origin_x: 0.0,
            origin_y: 0.0,
            cell_size,
            nx,
            ny,
        }
    }

    #[test]
    fn test_letter_names() {
        assert_eq!(letter_name(1), "a");
        assert_eq!(letter_name(26), "z");
        assert_eq!(letter_name(27), "aa");
        assert_eq!(letter_name(52), "az");
        assert_eq!(letter_name(53), "ba");
        assert_eq!(letter_name(702), "zz");
        assert_eq!(letter_name(703), "aaa");
        assert_eq!(letter_name(0), "");
    }

    #[test]
    fn test_letter_names_are_ordered_and_unique() {
        let names: Vec<String> = (1..=2000).map(letter_name).collect();
        let unique: HashSet<&String> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
        for pair in names.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.len() < b.len() || (a.len() == b.len() && a < b), "{a} !< {b}");
        }
    }

    #[test]
    fn test_cuts_and_names() {
        let g = grid(5, 3, 1.0);
        let values = g.nodes().map(|c| Some(c.x + c.y)).collect();
        let field = HeightField::from_values(g, values);
        let sections = Sections::cut(&field, 2.0, 1.0).unwrap();
        let summary: Vec<(Axis, usize, &str)> = sections
            .lines
            .iter()
            .map(|s| (s.axis, s.grid_index, s.name.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Axis::Vertical, 0, "a"),
                (Axis::Vertical, 2, "b"),
                (Axis::Vertical, 4, "c"),
                (Axis::Horizontal, 0, "1"),
                (Axis::Horizontal, 2, "2"),
            ]
        );
        assert_eq!(
            sections.lines[1].profile,
            vec![(0.0, 2.0), (1.0, 3.0), (2.0, 4.0)]
        );
        assert_eq!(
            sections.lines[4].profile,
            vec![(0.0, 2.0), (1.0, 3.0), (2.0, 4.0), (3.0, 5.0), (4.0, 6.0)]
        );
        assert!(sections.diagnostics.is_empty());
    }

    #[test]
    fn test_spacing_is_snapped_to_cells() {
        let g = grid(7, 2, 0.5);
        let values = g.nodes().map(|_| Some(1.0)).collect();
        let field = HeightField::from_values(g, values);
        let sections = Sections::cut(&field, 1.2, 0.0).unwrap();
        let columns: Vec<usize> = sections
            .lines
            .iter()
            .filter(|s| s.axis == Axis::Vertical)
            .map(|s| s.grid_index)
            .collect();
        assert_eq!(columns, vec![0, 2, 4, 6]);

        let sections = Sections::cut(&field, 0.1, 0.0).unwrap();
        assert_eq!(
            sections
                .lines
                .iter()
                .filter(|s| s.axis == Axis::Vertical)
                .count(),
            7
        );
    }

    fn vertical_columns(sections: &Sections) -> Vec<usize> {
        sections
            .lines
            .iter()
            .filter(|s| s.axis == Axis::Vertical)
            .map(|s| s.grid_index)
            .collect()
    }

    #[test]
    fn test_decimal_spacing_keeps_whole_cells() {
        let g = grid(10, 2, 0.1);
        let values = g.nodes().map(|_| Some(1.0)).collect();
        let field = HeightField::from_values(g, values);

        let sections = Sections::cut(&field, 0.3, 0.0).unwrap();
        assert_eq!(vertical_columns(&sections), vec![0, 3, 6, 9]);
        assert!(sections.diagnostics.is_empty());

        let sections = Sections::cut(&field, 0.7, 0.0).unwrap();
        assert_eq!(vertical_columns(&sections), vec![0, 7]);
    }

    #[test]
    fn test_unmatched_cuts_are_reported() {
        // At 1e15 an f64 only resolves steps of 0.125, so cuts every 0.3
        // fall between grid lines.
        let g = Grid {
            origin_x: 1e15,
            origin_y: 0.0,
            cell_size: 0.1,
            nx: 10,
            ny: 2,
        };
        let values = g.nodes().map(|_| Some(1.0)).collect();
        let field = HeightField::from_values(g, values);
        let sections = Sections::cut(&field, 0.3, 0.0).unwrap();

        let vertical: Vec<(usize, &str)> = sections
            .lines
            .iter()
            .filter(|s| s.axis == Axis::Vertical)
            .map(|s| (s.grid_index, s.name.as_str()))
            .collect();
        assert_eq!(vertical, vec![(0, "a")]);
        assert!(!sections.diagnostics.is_empty());
        assert!(sections.diagnostics.iter().all(|d| matches!(
            d,
            Diagnostic::UnmatchedCut {
                axis: Axis::Vertical,
                ..
            }
        )));
    }

    #[test]
    fn test_gaps_are_not_bridged() {
        let g = grid(3, 3, 1.0);
        let values = vec![
            Some(1.0),
            None,
            Some(3.0),
            None,
            None,
            None,
            Some(7.0),
            None,
            Some(9.0),
        ];
        let field = HeightField::from_values(g, values);
        let sections = Sections::cut(&field, 1.0, 0.0).unwrap();
        let a = &sections.lines[0];
        assert_eq!(a.name, "a");
        assert_eq!(a.profile, vec![(0.0, 1.0), (2.0, 7.0)]);
        // Column 1 and row 1 are entirely undefined.
        let empty: Vec<&Diagnostic> = sections
            .diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::EmptySection { .. }))
            .collect();
        assert_eq!(empty.len(), 2);
        let names: Vec<&str> = sections.lines.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c", "1", "3"]);
    }

    #[test]
    fn test_stacked_sections_never_overlap() {
        // Column 0 holds the global maximum, column 2 the global minimum,
        // every other node is flat.
        let g = grid(3, 3, 1.0);
        let values = g
            .nodes()
            .map(|c| match c.x as usize {
                0 => Some(50.0),
                2 => Some(-30.0),
                _ => Some(0.0),
            })
            .collect();
        let field = HeightField::from_values(g, values);
        let gap = 2.0;
        let sections = Sections::cut(&field, 1.0, gap).unwrap();
        let relief = 80.0;

        let top = &sections.lines[0];
        assert_relative_eq!(top.stack_offset + 50.0, g.origin_y - gap);

        for pair in sections.lines.windows(2) {
            let (upper, lower) = (&pair[0], &pair[1]);
            assert!(upper.stack_offset - lower.stack_offset >= gap + relief - 1e-9);
            let upper_low = upper
                .profile
                .iter()
                .map(|(_, z)| upper.stack_offset + z)
                .fold(f64::INFINITY, f64::min);
            let lower_high = lower
                .profile
                .iter()
                .map(|(_, z)| lower.stack_offset + z)
                .fold(f64::NEG_INFINITY, f64::max);
            assert!(upper_low - lower_high >= gap - 1e-9);
        }
    }

    #[test]
    fn test_stacking_keeps_elevations() {
        let g = grid(2, 2, 1.0);
        let field = HeightField::from_values(g, vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]);
        let sections = Sections::cut(&field, 1.0, 1.0).unwrap();
        assert_eq!(sections.lines[0].profile, vec![(0.0, 1.0), (1.0, 3.0)]);
        let drawn: Vec<(f64, f64)> = sections.lines[0].drawing_coords(10.0, 0.0).collect();
        let offset = sections.lines[0].stack_offset;
        assert_eq!(drawn, vec![(10.0, offset + 1.0), (11.0, offset + 3.0)]);
    }

    #[test]
    fn test_invalid_spacing() {
        let g = grid(2, 2, 1.0);
        let field = HeightField::from_values(g, vec![Some(0.0); 4]);
        assert!(matches!(
            Sections::cut(&field, 0.0, 1.0),
            Err(TerrainError::InvalidParameter { .. })
        ));
        assert!(matches!(
            Sections::cut(&field, 1.0, -1.0),
            Err(TerrainError::InvalidParameter { .. })
        ));
    }
}
