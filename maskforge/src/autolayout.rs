//! Size-aware auto-layout of heterogeneous component groups.
//!
//! A topology is an ordered sequence of rows, each an ordered sequence of
//! pre-built groups: row order is vertical stacking order (top to bottom),
//! within-row order is left to right. Spacing is supplied separately as one
//! vertical gap per adjacent row pair and one horizontal gap per row.

use planegeom::point::Point;
use planegeom::transform::TranslateMut;

use crate::element::Group;
use crate::error::{Error, Result};

/// Spacing vectors consumed by [`auto_layout`].
#[derive(Debug, Clone, Default)]
pub struct Spacing {
    /// Vertical gaps between adjacent rows, top to bottom. Must hold exactly
    /// `rows - 1` entries.
    pub vertical: Vec<f64>,
    /// Horizontal gap per row. Must hold exactly `rows` entries; the entry is
    /// consulted only for rows with more than one item.
    pub horizontal: Vec<f64>,
}

/// Positions every group of `rows` and returns them as one flattened,
/// order-preserving list.
///
/// For row `i`, item `j`, row length `k`:
///
/// - horizontal offset: `(horizontal[i] + item_width) * (j - (k - 1) / 2)`
///   for multi-item rows; single items center on the row's reference line;
/// - vertical offset: the cumulative vertical gaps and first-item heights of
///   all prior rows, plus half the item's own height, measured downward from
///   the top reference line.
///
/// Using the *first* item's height as each prior row's representative height
/// is a simplifying assumption that holds when all items in a row share a
/// height; rows of mixed heights will not stack as expected.
pub fn auto_layout(rows: Vec<Vec<Group>>, spacing: &Spacing) -> Result<Vec<Group>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    if spacing.vertical.len() + 1 != rows.len() {
        return Err(Error::config(
            "spacing.vertical",
            format!(
                "expected {} entries for {} rows, got {}",
                rows.len() - 1,
                rows.len(),
                spacing.vertical.len()
            ),
        ));
    }
    if spacing.horizontal.len() != rows.len() {
        return Err(Error::config(
            "spacing.horizontal",
            format!(
                "expected {} entries for {} rows, got {}",
                rows.len(),
                rows.len(),
                spacing.horizontal.len()
            ),
        ));
    }

    let row_heights: Vec<f64> = rows
        .iter()
        .map(|row| row.first().map(Group::height).unwrap_or_default())
        .collect();

    let mut placed = Vec::with_capacity(rows.iter().map(Vec::len).sum());
    let mut stacked = 0.0;
    for (i, row) in rows.into_iter().enumerate() {
        let k = row.len();
        for (j, mut group) in row.into_iter().enumerate() {
            let dx = if k > 1 {
                (spacing.horizontal[i] + group.width()) * (j as f64 - (k - 1) as f64 / 2.0)
            } else {
                0.0
            };
            let dy = -(stacked + group.height() / 2.0);
            group.translate_mut(Point::new(dx, dy));
            placed.push(group);
        }
        stacked += row_heights[i];
        if let Some(gap) = spacing.vertical.get(i) {
            stacked += gap;
        }
    }
    Ok(placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Layer;
    use crate::shape::Shape;
    use approx::assert_relative_eq;
    use planegeom::bbox::Bbox;
    use planegeom::rect::Rect;

    fn block(width: f64, height: f64) -> Group {
        Group::from_elements([Shape::from_rect(
            Layer(1),
            Rect::from_center(Point::zero(), width, height),
        )
        .into()])
    }

    fn center_x(group: &Group) -> f64 {
        group.bbox_rect().center().x
    }

    #[test]
    fn row_of_identical_items_centers_about_zero() {
        let rows = vec![vec![block(10.0, 5.0), block(10.0, 5.0), block(10.0, 5.0)]];
        let spacing = Spacing {
            vertical: vec![],
            horizontal: vec![4.0],
        };
        let placed = auto_layout(rows, &spacing).unwrap();
        let offsets: Vec<f64> = placed.iter().map(center_x).collect();
        // Symmetric about zero, evenly spaced by gap + width.
        assert_relative_eq!(offsets[0], -14.0, epsilon = 1e-9);
        assert_relative_eq!(offsets[1], 0.0, epsilon = 1e-9);
        assert_relative_eq!(offsets[2], 14.0, epsilon = 1e-9);
    }

    #[test]
    fn rows_stack_downward_using_first_item_heights() {
        // Two marker blocks above one qubit block; gaps and sizes chosen to
        // pin the cumulative offset arithmetic.
        let rows = vec![
            vec![block(200.0, 200.0), block(200.0, 200.0)],
            vec![block(300.0, 800.0)],
        ];
        let spacing = Spacing {
            vertical: vec![500.0],
            horizontal: vec![3000.0, 0.0],
        };
        let placed = auto_layout(rows, &spacing).unwrap();
        // Markers: +/- (gap + width) / 2.
        assert_relative_eq!(center_x(&placed[0]), -1600.0, epsilon = 1e-9);
        assert_relative_eq!(center_x(&placed[1]), 1600.0, epsilon = 1e-9);
        assert_relative_eq!(placed[0].bbox_rect().center().y, -100.0, epsilon = 1e-9);
        // Qubit: below the full marker height plus the gap, centered on its
        // own half-height.
        assert_relative_eq!(
            placed[2].bbox_rect().center().y,
            -(500.0 + 200.0 + 400.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn single_item_rows_center_on_the_reference_line() {
        let rows = vec![vec![block(10.0, 10.0)], vec![block(40.0, 10.0)]];
        let spacing = Spacing {
            vertical: vec![5.0],
            horizontal: vec![999.0, 999.0],
        };
        let placed = auto_layout(rows, &spacing).unwrap();
        assert_relative_eq!(center_x(&placed[0]), 0.0, epsilon = 1e-9);
        assert_relative_eq!(center_x(&placed[1]), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn vertical_gap_count_mismatch_names_the_field() {
        let rows = vec![vec![block(1.0, 1.0)], vec![block(1.0, 1.0)]];
        let spacing = Spacing {
            vertical: vec![],
            horizontal: vec![0.0, 0.0],
        };
        let err = auto_layout(rows, &spacing).unwrap_err();
        assert!(err.to_string().contains("spacing.vertical"));
    }

    #[test]
    fn horizontal_gap_coverage_is_required() {
        let rows = vec![vec![block(1.0, 1.0), block(1.0, 1.0)]];
        let spacing = Spacing {
            vertical: vec![],
            horizontal: vec![],
        };
        let err = auto_layout(rows, &spacing).unwrap_err();
        assert!(err.to_string().contains("spacing.horizontal"));
    }

    #[test]
    fn output_preserves_topology_order() {
        let rows = vec![
            vec![block(1.0, 1.0), block(2.0, 1.0)],
            vec![block(3.0, 1.0)],
        ];
        let spacing = Spacing {
            vertical: vec![1.0],
            horizontal: vec![0.5, 0.0],
        };
        let placed = auto_layout(rows, &spacing).unwrap();
        let widths: Vec<f64> = placed.iter().map(|g| g.bbox_rect().width()).collect();
        assert_eq!(widths, vec![1.0, 2.0, 3.0]);
    }
}
