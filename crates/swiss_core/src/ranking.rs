//! Buchholz tiebreaks and the standings order

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::types::{Competitor, CompetitorId};

/// Buchholz value: the sum of the current scores of every opponent faced.
///
/// Opponents missing from `roster` count as zero. An opponent met twice
/// counts twice.
pub fn calculate_tiebreak(competitor: &Competitor, roster: &[Competitor]) -> f64 {
    competitor
        .opponents
        .iter()
        .filter_map(|opponent| roster.iter().find(|c| &c.id == opponent))
        .map(|opponent| opponent.score)
        .sum()
}

/// Tiebreak of every competitor, in roster order.
///
/// All values are computed against the same scores, so the caller can write
/// them back in a single step.
pub fn recompute_tiebreaks(roster: &[Competitor]) -> Vec<f64> {
    let scores: HashMap<&CompetitorId, f64> = roster.iter().map(|c| (&c.id, c.score)).collect();

    roster
        .iter()
        .map(|competitor| {
            competitor
                .opponents
                .iter()
                .filter_map(|opponent| scores.get(opponent))
                .sum()
        })
        .collect()
}

/// Standings comparison: score, then tiebreak, then rating, all descending
pub fn compare_standings(a: &Competitor, b: &Competitor) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.tiebreak.total_cmp(&a.tiebreak))
        .then_with(|| b.rating.cmp(&a.rating))
}

/// Roster in standings order. Full ties keep their roster order.
pub fn standings(roster: &[Competitor]) -> Vec<&Competitor> {
    let mut table: Vec<&Competitor> = roster.iter().collect();
    table.sort_by(|a, b| compare_standings(a, b));
    table
}

#[cfg(test)]
#[path = "ranking_tests.rs"]
mod ranking_tests;
