//! Swiss pairing: greedy matching by standing with repeat avoidance

use std::collections::VecDeque;
use tracing::debug;

use crate::types::{Competitor, PairingResult, RoundPairings};

/// Order in which competitors are offered opponents.
///
/// Descending score, then descending tiebreak. The sort is stable, so full
/// ties keep registration order.
pub fn pairing_order(roster: &[Competitor]) -> Vec<&Competitor> {
    let mut order: Vec<&Competitor> = roster.iter().collect();
    order.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.tiebreak.total_cmp(&a.tiebreak))
    });
    order
}

/// Pair the roster for `round`.
///
/// Returns exactly `roster.len() / 2` games. With an odd roster the
/// competitor receiving the bye is left out; see [`pair_round`].
pub fn generate_pairings(roster: &[Competitor], round: u32) -> Vec<PairingResult> {
    pair_round(roster, round).pairings
}

/// Pair the roster for `round` and report who sits out.
///
/// With an odd roster the lowest-placed competitor who has not had a bye yet
/// is removed before matching (the lowest-placed overall once everyone has
/// had one). Each remaining competitor, taken from the front of the queue, is
/// matched with the first later competitor they have not played. If every
/// remaining competitor is a previous opponent, the next one in the queue is
/// taken anyway.
pub fn pair_round(roster: &[Competitor], round: u32) -> RoundPairings {
    let mut queue: VecDeque<&Competitor> = pairing_order(roster).into();

    let bye = bye_index(&queue)
        .and_then(|index| queue.remove(index))
        .map(|competitor| {
            debug!(round, competitor = %competitor.id, "bye assigned");
            competitor.id.clone()
        });

    let mut pairings = Vec::with_capacity(queue.len() / 2);
    while queue.len() >= 2 {
        let Some(p1) = queue.pop_front() else {
            break;
        };

        let index = match queue.iter().position(|p2| !p1.has_played(&p2.id)) {
            Some(index) => index,
            None => {
                debug!(round, competitor = %p1.id, "no unplayed opponent left, forcing a repeat");
                0
            }
        };

        if let Some(p2) = queue.remove(index) {
            pairings.push(determine_colors(p1, p2));
        }
    }

    RoundPairings { pairings, bye }
}

fn bye_index(queue: &VecDeque<&Competitor>) -> Option<usize> {
    if queue.len() % 2 == 0 {
        return None;
    }
    queue
        .iter()
        .rposition(|competitor| !competitor.had_bye())
        .or(Some(queue.len() - 1))
}

/// Decide who plays white.
///
/// The competitor with the lower colour balance (more black games) gets
/// white; on equal balance the higher rating gets white; on equal rating `p1`
/// gets white.
pub fn determine_colors(p1: &Competitor, p2: &Competitor) -> PairingResult {
    let p1_white = match p1.color_balance().cmp(&p2.color_balance()) {
        std::cmp::Ordering::Less => true,
        std::cmp::Ordering::Greater => false,
        std::cmp::Ordering::Equal => p1.rating >= p2.rating,
    };

    let (white, black) = if p1_white { (p1, p2) } else { (p2, p1) };
    PairingResult {
        white: white.id.clone(),
        black: black.id.clone(),
    }
}

#[cfg(test)]
#[path = "pairing_tests.rs"]
mod pairing_tests;
