//! Hand-authored maze layouts
//!
//! `#` wall, `.` path, `x` blocked. Row 11 is the tunnel row and is open
//! at both edges in every layout.

use crate::consts::{COLS, ROWS};

pub type Layout = [&'static str; ROWS];

pub static LAYOUT_1: Layout = [
    "#######################",
    "#...#.............#...#",
    "#.#.#.#####.#####.#.#.#",
    "#.......#.....#.......#",
    "###.#.#.#.###.#.#.#.###",
    "#...#.#.#.#x#.#.#.#...#",
    "#.#.#.#.#.###.#.#.#.#.#",
    "#...#.#.........#.#...#",
    "#####.#.#######.#.#####",
    "#.....#.........#.....#",
    "#.#####.###.###.#####.#",
    "........#.....#........",
    "#.#####.#######.#####.#",
    "#.....#.........#.....#",
    "#####.#.#######.#.#####",
    "#...#.#.........#.#...#",
    "#.#.#.#.#.###.#.#.#.#.#",
    "#...#.#.#.#x#.#.#.#...#",
    "###.#.#.#.###.#.#.#.###",
    "#.......#.....#.......#",
    "#.#.#.#####.#####.#.#.#",
    "#...#.............#...#",
    "#######################",
];

pub static LAYOUT_2: Layout = [
    "#######################",
    "#..........#..........#",
    "#.###.####.#.#####.##.#",
    "#...#............#.#..#",
    "###.###.########.#.##.#",
    "#.....#........#......#",
    "#.###.####.#.#.######.#",
    "#.#......#.#.#......#.#",
    "#.#.####.#.#.######.#.#",
    "#......#.....#....#...#",
    "######.####.###.#.#####",
    ".......................",
    "######.####.###.#.#####",
    "#......#.....#....#...#",
    "#.#.####.#.#.######.#.#",
    "#.#......#.#.#......#.#",
    "#.###.####.#.#.######.#",
    "#...#..........#......#",
    "###.###.########.#.##.#",
    "#...#......#.....#.#..#",
    "#.###.####.#.#####.##.#",
    "#..........#..........#",
    "#######################",
];

pub static LAYOUT_3: Layout = [
    "#######################",
    "#.#...#...#.#...#...#.#",
    "#.#.#.#.#.#.#.#...#.#.#",
    "#...#...#.#.#.###.#...#",
    "#.#####.#.#.#...#.###.#",
    "#...#...#...###.#...#.#",
    "###.#.###.#...#.###.#.#",
    "#...#.....#.#.#.....#.#",
    "#.#######.#.#.#####.#.#",
    "#.#.....#.#.#...#...#.#",
    "#.#.###.#.#.###.#.###.#",
    "....#.........#........",
    "#.#.###.#.#.###.#.###.#",
    "#.#.....#.#.#...#...#.#",
    "#.#######.#.#.#####.#.#",
    "#...#.....#.#.#.....#.#",
    "###.#.###.#...#.###.#.#",
    "#...#...#...###.#...#.#",
    "#.#####.#.#.#...#.###.#",
    "#...#...#.#.#.###.#...#",
    "#.#.#.#.#.#.#.#...#.#.#",
    "#.#...#...#.#...#...#.#",
    "#######################",
];

/// All authored layouts, indexed by level - 1
pub static LAYOUTS: [&Layout; 3] = [&LAYOUT_1, &LAYOUT_2, &LAYOUT_3];

/// Layout for a 1-based level number. Levels past the last layout reuse it,
/// level 0 falls back to the first.
pub fn layout_for_level(level: u32) -> &'static Layout {
    let index = (level.max(1) as usize - 1).min(LAYOUTS.len() - 1);
    LAYOUTS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_dimensions() {
        for layout in LAYOUTS.iter() {
            assert_eq!(layout.len(), ROWS);
            for row in layout.iter() {
                assert_eq!(row.len(), COLS);
                assert!(row.chars().all(|c| matches!(c, '#' | '.' | 'x')));
            }
        }
    }

    #[test]
    fn test_layout_selection_clamps() {
        assert!(std::ptr::eq(layout_for_level(0), &LAYOUT_1));
        assert!(std::ptr::eq(layout_for_level(1), &LAYOUT_1));
        assert!(std::ptr::eq(layout_for_level(2), &LAYOUT_2));
        assert!(std::ptr::eq(layout_for_level(3), &LAYOUT_3));
        assert!(std::ptr::eq(layout_for_level(9), &LAYOUT_3));
    }
}
