//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the pseudo-legal move tree to a given
//! depth. A state where a king has been captured is a leaf.

use crate::GameState;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(state: &GameState, depth: u32) -> u64 {
    if depth == 0 || state.is_over() {
        return 1;
    }

    let moves = state.moves();

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|&m| perft(&state.apply(m), depth - 1))
        .sum()
}

/// Perft with divide: the node count below each root move, sorted by the
/// move's coordinate notation.
pub fn perft_divide(state: &GameState, depth: u32) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = state
        .moves()
        .iter()
        .map(|&m| {
            let nodes = if depth > 1 {
                perft(&state.apply(m), depth - 1)
            } else {
                1
            };
            (m.to_uci(), nodes)
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
