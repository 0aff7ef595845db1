//! Win detection.

use crate::board::Board;
use crate::core::PlayerId;

/// Scan all players' boards and report a winner.
///
/// A player is active iff their board has at least one occupied cell.
/// Exactly one active player wins; zero or several active players means
/// the game continues.
#[must_use]
pub fn detect_winner<'a>(
    players: impl IntoIterator<Item = (PlayerId, &'a Board)>,
) -> Option<PlayerId> {
    let mut active = players
        .into_iter()
        .filter(|(_, board)| !board.is_empty())
        .map(|(player, _)| player);

    let candidate = active.next()?;
    if active.next().is_some() {
        None
    } else {
        Some(candidate)
    }
}
