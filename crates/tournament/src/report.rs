//! Text reports: round pairings and standings

use chrono::NaiveDate;
use std::path::Path;
use swiss_core::{Competitor, CompetitorId};

use crate::tournament::{Tournament, TournamentStatus};

fn describe(tournament: &Tournament, id: &CompetitorId) -> String {
    match tournament.competitor(id) {
        Some(c) => format!("{} ({})", c.name, c.rating),
        None => "(withdrawn)".to_string(),
    }
}

/// Pairings of the current round, one line per board
pub fn render_pairings(tournament: &Tournament) -> String {
    if tournament.status == TournamentStatus::Setup {
        return "Tournament has not started.\n".to_string();
    }

    let round = tournament.current_round;
    let mut report = format!("Round {} of {}\n\n", round, tournament.total_rounds);

    for (index, game) in tournament.round_games(round).iter().enumerate() {
        let result = game.result.map_or("*", |outcome| outcome.notation());
        report.push_str(&format!(
            "Board {:>2}: {:<28} vs {:<28} {}\n",
            index + 1,
            describe(tournament, &game.white),
            describe(tournament, &game.black),
            result
        ));
    }

    for competitor in tournament.byes_in_round(round) {
        report.push_str(&format!(
            "Bye:      {} ({})\n",
            competitor.name, competitor.rating
        ));
    }

    report
}

fn standings_row(rank: usize, c: &Competitor) -> String {
    format!(
        "{:>4}  {:<24} {:>5.1} {:>8.1} {:>6}  {}-{}-{}\n",
        rank, c.name, c.score, c.tiebreak, c.rating, c.wins, c.draws, c.losses
    )
}

/// Standings table, best first
pub fn render_standings(tournament: &Tournament) -> String {
    let mut report = String::from("Current Standings\n");
    report.push_str(&format!(
        "{:>4}  {:<24} {:>5} {:>8} {:>6}  {}\n",
        "Rank", "Name", "Score", "Buchholz", "Rating", "W-D-L"
    ));
    report.push_str(&"-".repeat(62));
    report.push('\n');

    for (index, competitor) in tournament.standings().into_iter().enumerate() {
        report.push_str(&standings_row(index + 1, competitor));
    }
    report
}

/// Full printable report. Standings are included once play has begun.
pub fn render_report(tournament: &Tournament, generated_on: NaiveDate) -> String {
    let mut report = format!("=== {} ===\n", tournament.name);
    report.push_str(&format!("Generated on {}\n", generated_on.format("%Y-%m-%d")));
    if tournament.status == TournamentStatus::Completed {
        report.push_str("Tournament complete\n");
    }
    report.push('\n');
    report.push_str(&render_pairings(tournament));

    if tournament.status != TournamentStatus::Setup && !tournament.competitors.is_empty() {
        report.push('\n');
        report.push_str(&render_standings(tournament));
    }
    report
}

/// Write the full report to `path`
pub fn write_report(path: &Path, tournament: &Tournament, generated_on: NaiveDate) -> std::io::Result<()> {
    std::fs::write(path, render_report(tournament, generated_on))
}

/// Default file name for an exported report
pub fn report_file_name(tournament: &Tournament) -> String {
    format!("{}_round_{}.txt", tournament.id, tournament.current_round)
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
