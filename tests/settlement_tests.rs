//! Settlement cascade properties and the specified scenarios.

use digit_duel::core::{Digit, PlayerId};
use digit_duel::settle::{settle, Piece};
use proptest::prelude::*;

fn piece(digit: u8, owner: u32) -> Piece {
    Piece::new(Digit::new(digit), PlayerId::new(owner))
}

fn order(ids: &[u32]) -> Vec<PlayerId> {
    ids.iter().copied().map(PlayerId::new).collect()
}

#[test]
fn test_empty_area() {
    let result = settle(&[], &order(&[1, 2]));
    assert!(result.leftover.is_empty());
    assert!(result.eliminated.is_empty());
    assert_eq!(result.sole_survivor, None);
}

/// A lone piece is returned unresolved, its owner flagged for the bonus
/// action, with no eliminations.
#[test]
fn test_single_piece_unresolved() {
    let lone = piece(7, 3);
    let result = settle(&[lone], &order(&[1, 2, 3]));
    assert_eq!(result.leftover, vec![lone]);
    assert!(result.eliminated.is_empty());
    assert_eq!(result.sole_survivor, Some(PlayerId::new(3)));
}

/// Scenario B: rank picks owner 1's piece first, but 3 < 5 means owner
/// 2's piece wins the duel.
#[test]
fn test_scenario_b_rank_selects_digits_decide() {
    let result = settle(&[piece(5, 1), piece(3, 2)], &order(&[1, 2]));
    assert_eq!(result.eliminated, vec![piece(5, 1)]);
    assert_eq!(result.leftover, vec![piece(3, 2)]);
    assert_eq!(result.sole_survivor, None);
}

/// Scenario C: 0 against 9 eliminates both.
#[test]
fn test_scenario_c_zero_nine_annihilation() {
    let result = settle(&[piece(0, 1), piece(9, 2)], &order(&[1, 2]));
    assert_eq!(result.eliminated.len(), 2);
    assert!(result.leftover.is_empty());
}

/// A winner re-enters the working set and may duel repeatedly.
#[test]
fn test_cascade_chains_across_owners() {
    // Order [3, 1, 2]: 1@3 beats 8@1, then beats 9@2.
    let result = settle(
        &[piece(9, 2), piece(8, 1), piece(1, 3)],
        &order(&[3, 1, 2]),
    );
    assert_eq!(result.eliminated, vec![piece(8, 1), piece(9, 2)]);
    assert_eq!(result.leftover, vec![piece(1, 3)]);
}

/// Five-player pileup: settlement still terminates with at most one
/// owner's pieces left standing.
#[test]
fn test_five_owner_pileup() {
    let pieces = [
        piece(4, 1),
        piece(4, 2),
        piece(2, 3),
        piece(9, 4),
        piece(0, 5),
    ];
    let result = settle(&pieces, &order(&[1, 2, 3, 4, 5]));
    assert_eq!(result.eliminated.len() + result.leftover.len(), 5);

    let mut owners: Vec<_> = result.leftover.iter().map(|p| p.owner).collect();
    owners.sort();
    owners.dedup();
    assert!(owners.len() <= 1);
}

proptest! {
    /// Any finite multiset from >=2 owners settles to at most one owner's
    /// pieces, conserving every piece as either leftover or eliminated.
    #[test]
    fn prop_settlement_terminates_and_conserves(
        raw in prop::collection::vec((0u8..=9, 1u32..=4), 2..16)
    ) {
        let pieces: Vec<Piece> = raw.iter().map(|&(d, o)| piece(d, o)).collect();
        let turn_order = order(&[1, 2, 3, 4]);

        let result = settle(&pieces, &turn_order);

        // Conservation: every input piece ends up exactly once in
        // leftover or eliminated.
        let mut output: Vec<Piece> = result
            .leftover
            .iter()
            .chain(result.eliminated.iter())
            .copied()
            .collect();
        let mut input = pieces.clone();
        let key = |p: &Piece| (p.owner, p.digit);
        output.sort_by_key(key);
        input.sort_by_key(key);
        prop_assert_eq!(output, input);

        // At most one owner's pieces remain when the input had >=2 owners.
        let mut owners: Vec<_> = pieces.iter().map(|p| p.owner).collect();
        owners.sort();
        owners.dedup();
        if owners.len() >= 2 {
            let mut left: Vec<_> = result.leftover.iter().map(|p| p.owner).collect();
            left.sort();
            left.dedup();
            prop_assert!(left.len() <= 1);
        }
    }

    /// Settlement is a pure function: same input, same output.
    #[test]
    fn prop_settlement_deterministic(
        raw in prop::collection::vec((0u8..=9, 1u32..=4), 0..12)
    ) {
        let pieces: Vec<Piece> = raw.iter().map(|&(d, o)| piece(d, o)).collect();
        let turn_order = order(&[4, 2, 3, 1]);
        prop_assert_eq!(
            settle(&pieces, &turn_order),
            settle(&pieces, &turn_order)
        );
    }
}
