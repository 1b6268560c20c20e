use super::*;
use swiss_core::GameOutcome;

fn three_player_tournament() -> Tournament {
    let mut t = Tournament::new("report", "Report Cup", 3);
    for (name, rating) in [("Alice", 1900), ("Bob", 1700), ("Carol", 1600)] {
        t.add_competitor(name, rating).unwrap();
    }
    t.start().unwrap();
    t
}

#[test]
fn test_pairings_before_start() {
    let t = Tournament::new("report", "Report Cup", 3);
    assert_eq!(render_pairings(&t), "Tournament has not started.\n");
}

#[test]
fn test_pairings_list_boards_and_bye() {
    let mut t = three_player_tournament();

    let text = render_pairings(&t);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Round 1 of 3");
    assert!(lines[2].starts_with("Board  1: Alice (1900)"));
    assert!(lines[2].contains("vs Bob (1700)"));
    assert!(lines[2].ends_with(" *"));
    assert_eq!(lines[3], "Bye:      Carol (1600)");

    let game = t.game_for_board(1).unwrap().id.clone();
    t.record_result(&game, GameOutcome::WhiteWins).unwrap();
    assert!(render_pairings(&t).lines().nth(2).unwrap().ends_with(" 1-0"));
}

#[test]
fn test_standings_in_ranking_order() {
    let mut t = three_player_tournament();
    let game = t.game_for_board(1).unwrap().id.clone();
    t.record_result(&game, GameOutcome::WhiteWins).unwrap();

    let text = render_standings(&t);
    let rows: Vec<&str> = text.lines().skip(3).collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].trim_start().starts_with("1  Alice"));
    assert!(rows[1].trim_start().starts_with("2  Carol"));
    assert!(rows[2].trim_start().starts_with("3  Bob"));
    assert!(rows[0].ends_with("1-0-0"));
    assert!(rows[2].ends_with("0-0-1"));
}

#[test]
fn test_full_report_sections() {
    let t = three_player_tournament();
    let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

    let text = render_report(&t, date);

    assert!(text.starts_with("=== Report Cup ===\nGenerated on 2024-03-09\n"));
    assert!(text.contains("Round 1 of 3"));
    assert!(text.contains("Current Standings"));

    let setup = Tournament::new("report", "Report Cup", 3);
    assert!(!render_report(&setup, date).contains("Current Standings"));
}

#[test]
fn test_write_report_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let t = three_player_tournament();
    let path = dir.path().join(report_file_name(&t));
    let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

    write_report(&path, &t, date).unwrap();

    assert_eq!(report_file_name(&t), "report_round_1.txt");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), render_report(&t, date));
}
