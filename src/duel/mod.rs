//! Pairwise duel resolution.
//!
//! Two pieces meeting in the public area resolve through a non-transitive
//! ranking: smaller digits beat larger ones, except for the special cases
//! around 0. Rule precedence, evaluated in this exact order:
//!
//! 1. Equal digits: both eliminated.
//! 2. 0 against 6 or 9: both eliminated.
//! 3. 8 against 0: the 8 wins.
//! 4. Otherwise the strictly smaller digit wins.
//!
//! So 0 dominates every digit except 6, 8, and 9; the result is a
//! rock-paper-scissors-like cycle rather than a numeric order.

use smallvec::SmallVec;

use crate::core::{Digit, PlayerId};

/// Outcome of a duel between two pieces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuelOutcome {
    /// The surviving piece's owner, or `None` when both were eliminated.
    pub winner: Option<PlayerId>,
    /// Owners of the eliminated pieces, in argument order.
    pub eliminated: SmallVec<[PlayerId; 2]>,
}

impl DuelOutcome {
    fn winner(winner: PlayerId, loser: PlayerId) -> Self {
        Self {
            winner: Some(winner),
            eliminated: SmallVec::from_slice(&[loser]),
        }
    }

    fn both_eliminated(a: PlayerId, b: PlayerId) -> Self {
        Self {
            winner: None,
            eliminated: SmallVec::from_slice(&[a, b]),
        }
    }
}

/// The side of a duel that survived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// The first argument's piece.
    First,
    /// The second argument's piece.
    Second,
}

/// Which side of a duel survives, or `None` when both are eliminated.
///
/// This is the positional primitive underneath [`resolve`]; the settlement
/// engine uses it to attribute the outcome to a specific piece even when
/// both pieces share an owner.
#[must_use]
pub fn surviving_side(a: Digit, b: Digit) -> Option<Side> {
    let (x, y) = (a.value(), b.value());

    if x == y {
        return None;
    }

    if (x == 0 && (y == 6 || y == 9)) || (y == 0 && (x == 6 || x == 9)) {
        return None;
    }

    if x == 8 && y == 0 {
        return Some(Side::First);
    }
    if y == 8 && x == 0 {
        return Some(Side::Second);
    }

    if x < y {
        Some(Side::First)
    } else {
        Some(Side::Second)
    }
}

/// Resolve a duel between two digits.
///
/// Deterministic and total over all digit pairs; no side effects. Owners
/// are carried through so the caller can apply eliminations.
///
/// ```
/// use digit_duel::core::{Digit, PlayerId};
/// use digit_duel::duel::resolve;
///
/// let (p1, p2) = (PlayerId::new(1), PlayerId::new(2));
///
/// // Smaller digit wins.
/// let out = resolve(Digit::new(3), p1, Digit::new(5), p2);
/// assert_eq!(out.winner, Some(p1));
///
/// // 0 against 9 takes both out.
/// let out = resolve(Digit::new(0), p1, Digit::new(9), p2);
/// assert_eq!(out.winner, None);
/// ```
#[must_use]
pub fn resolve(a: Digit, owner_a: PlayerId, b: Digit, owner_b: PlayerId) -> DuelOutcome {
    match surviving_side(a, b) {
        None => DuelOutcome::both_eliminated(owner_a, owner_b),
        Some(Side::First) => DuelOutcome::winner(owner_a, owner_b),
        Some(Side::Second) => DuelOutcome::winner(owner_b, owner_a),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P1: PlayerId = PlayerId::new(1);
    const P2: PlayerId = PlayerId::new(2);

    fn duel(a: u8, b: u8) -> DuelOutcome {
        resolve(Digit::new(a), P1, Digit::new(b), P2)
    }

    #[test]
    fn test_equal_digits_eliminate_both() {
        for v in 0..=9 {
            let out = duel(v, v);
            assert_eq!(out.winner, None);
            assert_eq!(out.eliminated.as_slice(), &[P1, P2]);
        }
    }

    #[test]
    fn test_zero_against_six_and_nine() {
        for v in [6, 9] {
            assert_eq!(duel(0, v).winner, None);
            assert_eq!(duel(v, 0).winner, None);
        }
    }

    #[test]
    fn test_eight_beats_zero() {
        let out = duel(8, 0);
        assert_eq!(out.winner, Some(P1));
        assert_eq!(out.eliminated.as_slice(), &[P2]);

        let out = duel(0, 8);
        assert_eq!(out.winner, Some(P2));
        assert_eq!(out.eliminated.as_slice(), &[P1]);
    }

    #[test]
    fn test_smaller_digit_wins_otherwise() {
        assert_eq!(duel(3, 5).winner, Some(P1));
        assert_eq!(duel(5, 3).winner, Some(P2));
        // 0 dominates digits outside the special cases.
        for v in [1, 2, 3, 4, 5, 7] {
            assert_eq!(duel(0, v).winner, Some(P1));
        }
    }

    #[test]
    fn test_exactly_one_loser_when_there_is_a_winner() {
        for a in 0..=9 {
            for b in 0..=9 {
                let out = duel(a, b);
                match out.winner {
                    Some(w) => {
                        assert_eq!(out.eliminated.len(), 1);
                        assert_ne!(out.eliminated[0], w);
                    }
                    None => assert_eq!(out.eliminated.as_slice(), &[P1, P2]),
                }
            }
        }
    }
}
