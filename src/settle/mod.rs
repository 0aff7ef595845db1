//! Public-area settlement: the cascading duel resolver.
//!
//! When pieces from several players sit in the public area, duels cascade
//! until no pair from distinct owners remains. Turn order is the only
//! deterministic, game-visible ordering available when multiple pieces
//! arrive in the same round, so it is the tie-break: the two pieces whose
//! owners rank earliest duel first, and a surviving winner re-enters the
//! working set.
//!
//! Termination: every duel removes two pieces and re-adds at most one, so
//! the working set strictly shrinks each iteration.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Digit, PlayerId};
use crate::duel::{self, Side};

/// A piece in the public area: a digit and its owner.
///
/// On a board a piece is identified by its cell; in the public area it is
/// an element of an owner-tagged multiset with no position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    /// The digit value.
    pub digit: Digit,
    /// The contributing player.
    pub owner: PlayerId,
}

impl Piece {
    /// Create a piece.
    #[must_use]
    pub fn new(digit: Digit, owner: PlayerId) -> Self {
        Self { digit, owner }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.digit, self.owner)
    }
}

/// Result of one settlement pass over the public area.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Pieces that found no opponent to duel. Zero or more, possibly all
    /// from a single owner.
    pub leftover: Vec<Piece>,
    /// Newly eliminated pieces, in resolution order.
    pub eliminated: Vec<Piece>,
    /// Set when the area held exactly one piece: that piece's owner is
    /// eligible for a bonus action. Recorded only; sequencing is unchanged.
    pub sole_survivor: Option<PlayerId>,
}

/// Resolve all possible duels among `pieces`.
///
/// - Empty input: nothing to do.
/// - A single piece is returned unresolved with its owner flagged as the
///   sole survivor.
/// - Otherwise pieces duel pairwise, earliest-ranked owners first, until
///   fewer than two distinct owners remain among the working set.
///
/// Pieces whose owner is absent from `turn_order` rank last. That is
/// defensive only; it cannot occur when the caller passes the room's own
/// turn order.
#[must_use]
pub fn settle(pieces: &[Piece], turn_order: &[PlayerId]) -> Settlement {
    match pieces {
        [] => Settlement::default(),
        [single] => Settlement {
            leftover: vec![*single],
            eliminated: Vec::new(),
            sole_survivor: Some(single.owner),
        },
        _ => cascade(pieces.to_vec(), turn_order),
    }
}

fn cascade(mut working: Vec<Piece>, turn_order: &[PlayerId]) -> Settlement {
    let rank: FxHashMap<PlayerId, usize> = turn_order
        .iter()
        .enumerate()
        .map(|(i, &p)| (p, i))
        .collect();
    let rank_of = |piece: &Piece| rank.get(&piece.owner).copied().unwrap_or(usize::MAX);

    let mut eliminated = Vec::new();

    while working.len() >= 2 && distinct_owners(&working) >= 2 {
        // Stable sort keeps arrival order among one owner's pieces.
        working.sort_by_key(rank_of);

        let first = working.remove(0);
        let second = working.remove(0);

        // Side-based attribution: owners can coincide when one player's
        // pieces are both lowest-ranked, so the outcome must name pieces,
        // not just owners.
        match duel::surviving_side(first.digit, second.digit) {
            None => {
                eliminated.push(first);
                eliminated.push(second);
            }
            Some(Side::First) => {
                eliminated.push(second);
                working.push(first);
            }
            Some(Side::Second) => {
                eliminated.push(first);
                working.push(second);
            }
        }
    }

    Settlement {
        leftover: working,
        eliminated,
        sole_survivor: None,
    }
}

fn distinct_owners(pieces: &[Piece]) -> usize {
    let mut owners: Vec<PlayerId> = pieces.iter().map(|p| p.owner).collect();
    owners.sort_unstable();
    owners.dedup();
    owners.len()
}
