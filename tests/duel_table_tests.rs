//! Exhaustive verification of the duel ranking.
//!
//! The resolver must match the rule precedence exactly for all 100
//! ordered digit pairs, and be symmetric under argument swap up to
//! owner identity.

use digit_duel::core::{Digit, PlayerId};
use digit_duel::duel::{resolve, surviving_side, Side};

const P1: PlayerId = PlayerId::new(1);
const P2: PlayerId = PlayerId::new(2);

/// Expected survivor for `(x, y)`, spelled out independently of the
/// implementation: `None` means both are eliminated.
fn expected_survivor(x: u8, y: u8) -> Option<u8> {
    // Precedence 1: equal digits annihilate.
    if x == y {
        return None;
    }
    // Precedence 2: 0 meeting 6 or 9 annihilates.
    let pair = |a, b| (x == a && y == b) || (x == b && y == a);
    if pair(0, 6) || pair(0, 9) {
        return None;
    }
    // Precedence 3: 8 beats 0.
    if pair(8, 0) {
        return Some(8);
    }
    // Precedence 4: the smaller digit wins.
    Some(x.min(y))
}

#[test]
fn test_all_100_ordered_pairs() {
    for x in 0..=9u8 {
        for y in 0..=9u8 {
            let out = resolve(Digit::new(x), P1, Digit::new(y), P2);
            match expected_survivor(x, y) {
                None => {
                    assert_eq!(out.winner, None, "({}, {}) should annihilate", x, y);
                    assert_eq!(out.eliminated.as_slice(), &[P1, P2]);
                }
                Some(survivor) => {
                    let (expected_winner, expected_loser) =
                        if survivor == x { (P1, P2) } else { (P2, P1) };
                    assert_eq!(
                        out.winner,
                        Some(expected_winner),
                        "({}, {}) should be won by {}",
                        x,
                        y,
                        survivor
                    );
                    assert_eq!(out.eliminated.as_slice(), &[expected_loser]);
                }
            }
        }
    }
}

/// Exactly one of {first wins, second wins, both eliminated} holds for
/// every ordered pair.
#[test]
fn test_outcome_is_total_and_exclusive() {
    for x in 0..=9u8 {
        for y in 0..=9u8 {
            let out = resolve(Digit::new(x), P1, Digit::new(y), P2);
            match out.winner {
                Some(winner) => {
                    assert_eq!(out.eliminated.len(), 1);
                    assert_ne!(out.eliminated[0], winner);
                }
                None => {
                    assert_eq!(out.eliminated.len(), 2);
                }
            }
        }
    }
}

/// Swapping arguments swaps sides but eliminates the same digit-owner set.
#[test]
fn test_swap_symmetry() {
    for x in 0..=9u8 {
        for y in 0..=9u8 {
            let forward = resolve(Digit::new(x), P1, Digit::new(y), P2);
            let swapped = resolve(Digit::new(y), P2, Digit::new(x), P1);

            assert_eq!(forward.winner, swapped.winner, "({}, {})", x, y);
            let mut a: Vec<_> = forward.eliminated.to_vec();
            let mut b: Vec<_> = swapped.eliminated.to_vec();
            a.sort();
            b.sort();
            assert_eq!(a, b, "({}, {})", x, y);
        }
    }
}

#[test]
fn test_surviving_side_matches_resolve() {
    for x in 0..=9u8 {
        for y in 0..=9u8 {
            let side = surviving_side(Digit::new(x), Digit::new(y));
            let out = resolve(Digit::new(x), P1, Digit::new(y), P2);
            match side {
                None => assert_eq!(out.winner, None),
                Some(Side::First) => assert_eq!(out.winner, Some(P1)),
                Some(Side::Second) => assert_eq!(out.winner, Some(P2)),
            }
        }
    }
}

/// The headline special cases, spelled out.
#[test]
fn test_special_case_table() {
    let cases = [
        // (a, b, survivor digit or None)
        (0u8, 6u8, None),
        (6, 0, None),
        (0, 9, None),
        (9, 0, None),
        (8, 0, Some(8u8)),
        (0, 8, Some(8)),
        (0, 1, Some(0)),
        (0, 7, Some(0)),
        (1, 9, Some(1)),
        (6, 9, Some(6)),
        (8, 9, Some(8)),
    ];
    for (a, b, survivor) in cases {
        let out = resolve(Digit::new(a), P1, Digit::new(b), P2);
        let got = out.winner.map(|w| if w == P1 { a } else { b });
        assert_eq!(got, survivor, "({}, {})", a, b);
    }
}
