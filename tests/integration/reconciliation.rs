//! Reconciliation properties over a spread of value pairs.

use odometer::digits::{self, format_grouped, reconcile, settled_text, Direction, Status};

use super::fixtures::settled;

const VALUES: [i64; 14] = [
    0, 1, 9, 10, 99, 100, 150, 999, 1000, 12345, 90000, -1, -9999, -10,
];

#[test]
fn test_every_target_position_is_entering() {
    for &a in &VALUES {
        for &b in &VALUES {
            let out = reconcile(&settled(a), a, b, ',', 0);
            let target: Vec<char> = format_grouped(b, ',').chars().collect();
            for (i, c) in target.iter().enumerate() {
                let entering: Vec<_> = out
                    .iter()
                    .filter(|e| e.position == i && e.status == Status::Entering)
                    .collect();
                assert_eq!(entering.len(), 1, "{} -> {} at {}", a, b, i);
                assert_eq!(entering[0].value, *c, "{} -> {} at {}", a, b, i);
            }
        }
    }
}

#[test]
fn test_settled_length_matches_target() {
    for &a in &VALUES {
        for &b in &VALUES {
            let mut out = reconcile(&settled(a), a, b, ',', 0);
            let before = format_grouped(a, ',').len();
            let after = format_grouped(b, ',').len();
            assert!(out.len() >= before.max(after));
            digits::prune_exiting(&mut out);
            assert_eq!(out.len(), after, "{} -> {}", a, b);
        }
    }
}

#[test]
fn test_round_trip_restores_characters() {
    for &a in &VALUES {
        for &b in &VALUES {
            let mut there = reconcile(&settled(a), a, b, ',', 0);
            digits::prune_exiting(&mut there);
            let mut back = reconcile(&there, b, a, ',', 0);
            digits::prune_exiting(&mut back);
            assert_eq!(settled_text(&back), format_grouped(a, ','));
        }
    }
}

#[test]
fn test_new_glyphs_carry_the_pair_direction() {
    for &a in &VALUES {
        for &b in &VALUES {
            let expected = if a <= b { Direction::Up } else { Direction::Down };
            let before = settled(a);
            for e in reconcile(&before, a, b, ',', 1) {
                if !before.contains(&e) {
                    assert_eq!(e.direction, expected, "{} -> {}", a, b);
                    assert_eq!(e.cycle, 1, "{} -> {}", a, b);
                }
            }
        }
    }
}

#[test]
fn test_same_value_changes_nothing() {
    for &a in &VALUES {
        let before = settled(a);
        assert_eq!(reconcile(&before, a, a, ',', 0), before);
    }
}

#[test]
fn test_shrinking_number_exits_trailing_glyphs() {
    // "12,345" -> "7": everything past position 0 exits
    let out = reconcile(&settled(12345), 12345, 7, ',', 0);
    let trailing: Vec<_> = out.iter().filter(|e| e.position >= 1).collect();
    assert_eq!(trailing.len(), 5);
    assert!(trailing
        .iter()
        .all(|e| e.status == Status::Exiting && e.direction == Direction::Down));
}
