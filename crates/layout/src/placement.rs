//! Element placement.
//!
//! Walks elements in insertion order, picks a column for each one and
//! computes its offset from the accumulated column heights.

use crate::columns::ColumnPlan;
use crate::config::{Direction, LayoutConfig};
use common::geometry::Point;
use smallvec::{smallvec, SmallVec};

/// Outcome of placing every element of a pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    /// Rounded offsets, index-aligned with the input heights.
    pub positions: Vec<Point>,
    /// Column chosen for each element.
    pub assignments: Vec<usize>,
    /// Accumulated height per column, trailing margins included. Columns
    /// past the element count never receive one and are left out.
    pub columns: SmallVec<[f32; 8]>,
    /// Height to apply to the container.
    pub container_height: f32,
}

/// Place elements of the given heights according to `plan`.
pub fn place(config: &LayoutConfig, plan: &ColumnPlan, sizes: &[f32]) -> Placement {
    let column_count = plan.column_count.max(1);
    let tracked = column_count.min(sizes.len().max(1));
    let mut columns: SmallVec<[f32; 8]> = smallvec![0.0; tracked];
    let mut positions = Vec::with_capacity(sizes.len());
    let mut assignments = Vec::with_capacity(sizes.len());

    let start_x = start_x(config, plan, sizes.len());
    // x never spans the trailing gutter, so every column uses the same stride.
    let stride = plan.column_width + plan.gutter_x;
    let trailing = config.trailing_gutter(column_count);

    for (index, &height) in sizes.iter().enumerate() {
        let column = if config.minify {
            shortest_column(&columns)
        } else {
            index % column_count
        };

        let x = match config.direction {
            Direction::Ltr => start_x + stride * column as f32,
            Direction::Rtl => start_x - stride * column as f32 - plan.column_width,
        };
        let y = columns[column];

        positions.push(Point::new(x, y).round());
        assignments.push(column);
        columns[column] += height + trailing;
    }

    let container_height = if sizes.is_empty() {
        0.0
    } else {
        (columns[longest_column(&columns)] - config.gutter_y).max(0.0)
    };

    Placement {
        positions,
        assignments,
        columns,
        container_height,
    }
}

/// Horizontal offset of the leading column edge.
///
/// A row with fewer elements than columns is centered unless `wedge` is set.
/// A wedged rtl row always starts one gutter in from the right edge.
pub fn start_x(config: &LayoutConfig, plan: &ColumnPlan, element_count: usize) -> f32 {
    let edge = if config.surrounding_gutter { plan.gutter_x } else { 0.0 };
    let leading = match config.direction {
        Direction::Ltr => edge,
        Direction::Rtl => plan.width - edge,
    };

    if plan.column_count <= element_count {
        return leading;
    }
    if config.wedge {
        return match config.direction {
            Direction::Ltr => leading,
            Direction::Rtl => plan.width - plan.gutter_x,
        };
    }

    let occupied = element_count as f32 * (plan.column_width + plan.gutter_x) - plan.gutter_x;
    let margin = (plan.width - occupied) / 2.0;
    match config.direction {
        Direction::Ltr => margin,
        Direction::Rtl => plan.width - margin,
    }
}

/// Index of the shortest column; the lowest index wins ties.
pub fn shortest_column(columns: &[f32]) -> usize {
    let mut shortest = 0;
    for (index, &height) in columns.iter().enumerate() {
        if height < columns[shortest] {
            shortest = index;
        }
    }
    shortest
}

/// Index of the tallest column; the lowest index wins ties.
pub fn longest_column(columns: &[f32]) -> usize {
    let mut longest = 0;
    for (index, &height) in columns.iter().enumerate() {
        if height > columns[longest] {
            longest = index;
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::plan_columns;
    use crate::config::MasonryOptions;

    fn page_options() -> MasonryOptions {
        MasonryOptions::new()
            .with_base_width(128.0)
            .with_gutter(24.0)
            .with_surrounding_gutter(false)
            .with_ultimate_gutter(16.0)
    }

    fn run(options: MasonryOptions, width: f32, sizes: &[f32]) -> (ColumnPlan, Placement) {
        let config = options.resolve();
        let plan = plan_columns(&config, width);
        let placement = place(&config, &plan, sizes);
        (plan, placement)
    }

    #[test]
    fn test_equal_heights_fill_lowest_columns_first() {
        let (plan, placement) = run(page_options(), 1000.0, &[100.0; 14]);
        assert_eq!(plan.column_count, 6);
        assert_eq!(
            placement.assignments,
            vec![0, 1, 2, 3, 4, 5, 0, 1, 2, 3, 4, 5, 0, 1]
        );
        assert_eq!(placement.positions[6].y, 124.0);
        assert_eq!(placement.positions[12].y, 248.0);
    }

    #[test]
    fn test_minify_prefers_shortest_column() {
        let options = MasonryOptions::new()
            .with_base_width(100.0)
            .with_gutter(10.0)
            .with_surrounding_gutter(false);
        let (plan, placement) = run(options, 320.0, &[300.0, 100.0, 100.0, 50.0, 10.0]);
        assert_eq!(plan.column_count, 3);
        // Columns 1 and 2 tie at 110 after the first row.
        assert_eq!(placement.assignments, vec![0, 1, 2, 1, 2]);
        assert_eq!(placement.positions[3].y, 110.0);
        assert_eq!(placement.positions[4].y, 110.0);
    }

    #[test]
    fn test_round_robin_keeps_order() {
        let options = MasonryOptions::new()
            .with_base_width(100.0)
            .with_gutter(10.0)
            .with_surrounding_gutter(false)
            .with_minify(false);
        let (_, placement) = run(options, 320.0, &[300.0, 10.0, 10.0, 10.0]);
        assert_eq!(placement.assignments, vec![0, 1, 2, 0]);
        assert_eq!(placement.positions[3].y, 310.0);
        assert_eq!(placement.positions[3].x, 0.0);
    }

    #[test]
    fn test_full_row_offsets() {
        let options = MasonryOptions::new()
            .with_base_width(100.0)
            .with_gutter(10.0)
            .with_surrounding_gutter(false);
        let (plan, placement) = run(options, 320.0, &[50.0, 50.0, 50.0]);
        assert_eq!(plan.column_width, 100.0);
        let xs: Vec<f32> = placement.positions.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 110.0, 220.0]);
    }

    #[test]
    fn test_surrounding_gutter_offsets() {
        let options = MasonryOptions::new().with_base_width(100.0).with_gutter(10.0);
        let (plan, placement) = run(options, 340.0, &[50.0, 50.0, 50.0]);
        assert_eq!(plan.column_count, 3);
        assert_eq!(plan.column_width, 100.0);
        let xs: Vec<f32> = placement.positions.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![10.0, 120.0, 230.0]);
    }

    #[test]
    fn test_partial_row_is_centered() {
        for count in 1..=5 {
            let sizes = vec![80.0; count];
            let (plan, placement) = run(page_options(), 1000.0, &sizes);
            let first = placement.positions[0].x;
            let last = placement.positions[count - 1].x + plan.column_width;
            let left_space = first;
            let right_space = plan.width - last;
            assert!(
                (left_space - right_space).abs() <= 1.0,
                "{count} elements: {left_space} vs {right_space}"
            );
        }
    }

    #[test]
    fn test_wedge_anchors_partial_row() {
        let (_, placement) = run(page_options().with_wedge(true), 1000.0, &[80.0, 80.0]);
        assert_eq!(placement.positions[0].x, 0.0);
        assert_eq!(placement.positions[1].x, 171.0);

        let rtl = page_options().with_wedge(true).with_direction(Direction::Rtl);
        let (plan, placement) = run(rtl, 1000.0, &[80.0]);
        // 1000 - 24 - 146.67
        assert_eq!(placement.positions[0].x, 829.0);
        assert_eq!(
            placement.positions[0].x,
            (1000.0 - plan.gutter_x - plan.column_width).round()
        );
    }

    #[test]
    fn test_rtl_mirrors_ltr() {
        let sizes = [120.0, 40.0, 90.0, 60.0, 200.0, 30.0, 75.0, 10.0];
        let (plan, ltr) = run(page_options(), 1000.0, &sizes);
        let (_, rtl) = run(page_options().with_direction(Direction::Rtl), 1000.0, &sizes);

        assert_eq!(ltr.assignments, rtl.assignments);
        for (l, r) in ltr.positions.iter().zip(&rtl.positions) {
            let mirrored = plan.width - l.x - plan.column_width;
            assert!((mirrored - r.x).abs() <= 1.0, "{l:?} vs {r:?}");
            assert_eq!(l.y, r.y);
        }
    }

    #[test]
    fn test_container_height_drops_trailing_gutter() {
        let options = MasonryOptions::new()
            .with_base_width(100.0)
            .with_gutter(24.0)
            .with_surrounding_gutter(false);
        let (plan, placement) = run(options, 224.0, &[100.0, 200.0]);
        assert_eq!(plan.column_count, 2);
        assert_eq!(placement.columns.as_slice(), &[124.0, 224.0]);
        assert_eq!(placement.container_height, 200.0);
    }

    #[test]
    fn test_single_column_uses_ultimate_gutter() {
        let (plan, placement) = run(page_options(), 100.0, &[100.0, 50.0]);
        assert_eq!(plan.column_count, 1);
        assert_eq!(placement.positions[1].y, 116.0);
        assert_eq!(placement.columns.as_slice(), &[182.0]);
        // The container drops gutter_y even with a single column.
        assert_eq!(placement.container_height, 158.0);
    }

    #[test]
    fn test_single_column_height_clamped_at_zero() {
        let (_, placement) = run(page_options().with_ultimate_gutter(2.0), 100.0, &[10.0]);
        assert_eq!(placement.container_height, 0.0);
    }

    #[test]
    fn test_huge_column_count_does_not_allocate_per_column() {
        let options = MasonryOptions::new().with_base_width(1e-30).with_gutter(0.0);
        let (plan, placement) = run(options, 1000.0, &[40.0, 60.0, 20.0]);
        assert_eq!(plan.column_count, 1000);
        assert_eq!(placement.columns.len(), 3);
        assert_eq!(placement.assignments, vec![0, 1, 2]);
        assert_eq!(placement.container_height, 60.0);

        let options = MasonryOptions::new()
            .with_base_width(128.0)
            .with_gutter(-127.99)
            .with_surrounding_gutter(false);
        let (_, placement) = run(options, 1000.0, &[40.0, 60.0]);
        assert_eq!(placement.positions.len(), 2);
        assert_eq!(placement.columns.len(), 2);
    }

    #[test]
    fn test_empty_container() {
        let (_, placement) = run(page_options().with_gutter_y(-30.0), 1000.0, &[]);
        assert!(placement.positions.is_empty());
        assert_eq!(placement.container_height, 0.0);
    }

    #[test]
    fn test_column_helpers() {
        assert_eq!(shortest_column(&[5.0, 3.0, 3.0, 9.0]), 1);
        assert_eq!(longest_column(&[5.0, 9.0, 3.0, 9.0]), 1);
        assert_eq!(shortest_column(&[0.0, 0.0]), 0);
    }

    #[test]
    fn test_placement_is_deterministic() {
        let sizes = [33.0, 71.0, 12.0, 98.0, 45.0, 45.0, 60.0];
        let (_, first) = run(page_options(), 777.0, &sizes);
        let (_, second) = run(page_options(), 777.0, &sizes);
        assert_eq!(first, second);
    }
}
