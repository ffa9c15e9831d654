//! Tests for line enumeration.

use open_lines::{CellIndex, Direction, EngineError, LineIndex};
use strum::IntoEnumIterator;

fn cells(raw: &[usize]) -> Vec<CellIndex> {
    raw.iter().copied().map(CellIndex::new).collect()
}

#[test]
fn test_four_by_four_has_ten_lines() {
    let index = LineIndex::build(4, 4).expect("valid dimensions");

    assert_eq!(index.len(), 10);
    assert_eq!(index.count_in(Direction::Horizontal), 4);
    assert_eq!(index.count_in(Direction::Vertical), 4);
    assert_eq!(index.count_in(Direction::Diagonal), 1);
    assert_eq!(index.count_in(Direction::AntiDiagonal), 1);
}

#[test]
fn test_segment_counts_follow_board_slack() {
    for (size, line_length) in [(4, 4), (5, 4), (6, 4), (7, 5), (9, 4)] {
        let index = LineIndex::build(size, line_length).expect("valid dimensions");
        let slack = size - line_length + 1;

        assert_eq!(index.count_in(Direction::Horizontal), size * slack);
        assert_eq!(index.count_in(Direction::Vertical), size * slack);
        assert_eq!(index.count_in(Direction::Diagonal), slack * slack);
        assert_eq!(index.count_in(Direction::AntiDiagonal), slack * slack);
        assert_eq!(index.len(), 2 * size * slack + 2 * slack * slack);
    }
}

#[test]
fn test_diagonal_tracks() {
    let index = LineIndex::build(5, 4).expect("valid dimensions");

    assert_eq!(index.tracks_in(Direction::Horizontal), 5);
    assert_eq!(index.tracks_in(Direction::Vertical), 5);
    assert_eq!(index.tracks_in(Direction::Diagonal), 3);
    assert_eq!(index.tracks_in(Direction::AntiDiagonal), 3);
}

#[test]
fn test_every_line_has_line_length_cells() {
    let index = LineIndex::build(6, 5).expect("valid dimensions");
    for line in index.lines() {
        assert_eq!(line.cells().len(), 5, "{:?}", line);
    }
}

#[test]
fn test_known_lines_on_five_by_five() {
    let index = LineIndex::build(5, 4).expect("valid dimensions");
    let expected = [
        (Direction::Horizontal, cells(&[2, 3, 4, 5])),
        (Direction::Vertical, cells(&[6, 11, 16, 21])),
        (Direction::Diagonal, cells(&[7, 13, 19, 25])),
        (Direction::AntiDiagonal, cells(&[5, 9, 13, 17])),
        (Direction::AntiDiagonal, cells(&[10, 14, 18, 22])),
    ];

    for (direction, wanted) in expected {
        assert!(
            index
                .lines()
                .iter()
                .any(|line| line.direction() == direction && line.cells() == wanted.as_slice()),
            "missing {} line {:?}",
            direction,
            wanted
        );
    }
}

#[test]
fn test_lines_through_is_consistent_with_lines() {
    let index = LineIndex::build(6, 4).expect("valid dimensions");
    for cell in (1..=36).map(CellIndex::new) {
        for id in index.lines_through(cell) {
            assert!(index.line(*id).contains(cell));
        }
        let owning = index.lines().iter().filter(|l| l.contains(cell)).count();
        assert_eq!(index.lines_through(cell).len(), owning);
    }
}

#[test]
fn test_lines_through_off_board_is_empty() {
    let index = LineIndex::build(4, 4).expect("valid dimensions");
    assert!(index.lines_through(CellIndex::new(0)).is_empty());
    assert!(index.lines_through(CellIndex::new(17)).is_empty());
}

#[test]
fn test_rejects_unsupported_dimensions() {
    for (size, line_length) in [(2, 4), (3, 4), (5, 3), (5, 6), (0, 0)] {
        let result = LineIndex::build(size, line_length);
        assert!(
            matches!(result, Err(EngineError::InvalidConfiguration(_))),
            "{}x{} with K={} should be rejected",
            size,
            size,
            line_length
        );
    }
}

#[test]
fn test_directions_are_all_populated() {
    let index = LineIndex::build(4, 4).expect("valid dimensions");
    for direction in Direction::iter() {
        assert!(index.count_in(direction) > 0, "{}", direction);
    }
}

#[test]
fn test_lines_are_straight_and_distinct() {
    for (size, line_length) in [(5, 4), (6, 5), (8, 4)] {
        let index = LineIndex::build(size, line_length).expect("valid dimensions");
        for line in index.lines() {
            let steps: Vec<(isize, isize)> = line
                .cells()
                .windows(2)
                .map(|pair| {
                    let (r0, c0) = pair[0].row_col(size);
                    let (r1, c1) = pair[1].row_col(size);
                    (r1 as isize - r0 as isize, c1 as isize - c0 as isize)
                })
                .collect();
            let expected = match line.direction() {
                Direction::Horizontal => (0, 1),
                Direction::Vertical => (1, 0),
                Direction::Diagonal => (1, 1),
                Direction::AntiDiagonal => (1, -1),
            };
            assert!(steps.iter().all(|step| *step == expected), "{:?}", line);
        }
    }
}
