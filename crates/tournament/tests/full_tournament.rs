//! End-to-end run of a small Swiss tournament, saved and reloaded between
//! every step the way the CLI does it.

use std::collections::HashSet;
use swiss_core::{calculate_tiebreak, GameOutcome};
use tournament::{
    parse_roster, RoundAdvance, SnapshotStore, Tournament, TournamentConfig, TournamentStatus,
};

const ROSTER: &str = "\
Magnus, 2830
Hikaru, 2790
Fabiano, 2760
Ding, 2720
Ian, 2700
Anish, 2680
Wesley, 2660
";

fn check_invariants(t: &Tournament) {
    assert_eq!(t.validate(), Ok(()));
    for c in &t.competitors {
        assert!(c.history_is_consistent(), "{} has a broken history", c.name);
        assert_eq!(c.tiebreak, calculate_tiebreak(c, &t.competitors));
    }

    let games = t.round_games(t.current_round);
    assert_eq!(games.len(), t.competitors.len() / 2);
    let mut seated = HashSet::new();
    for game in &games {
        assert_ne!(game.white, game.black);
        assert!(seated.insert(game.white.clone()));
        assert!(seated.insert(game.black.clone()));
    }
    for bye in t.byes_in_round(t.current_round) {
        assert!(!seated.contains(&bye.id));
    }
}

/// Higher rating wins, equal ratings draw
fn predicted(t: &Tournament, white: &swiss_core::CompetitorId, black: &swiss_core::CompetitorId) -> GameOutcome {
    let white = t.competitor(white).unwrap().rating;
    let black = t.competitor(black).unwrap().rating;
    match white.cmp(&black) {
        std::cmp::Ordering::Greater => GameOutcome::WhiteWins,
        std::cmp::Ordering::Less => GameOutcome::BlackWins,
        std::cmp::Ordering::Equal => GameOutcome::Draw,
    }
}

#[test]
fn test_five_round_tournament_with_saves() {
    let dir = tempfile::tempdir().unwrap();
    let config = TournamentConfig {
        name: "Candidates".to_string(),
        total_rounds: 5,
        data_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let store = SnapshotStore::new(&config.data_dir);
    let reload = |t: &Tournament| -> Tournament {
        store.save(t).unwrap();
        store.load(&t.id).unwrap().unwrap()
    };

    let mut t = store.load_or_fresh("candidates", || Tournament::from_config("candidates", &config));
    assert_eq!(t.status, TournamentStatus::Setup);

    let imported = parse_roster(ROSTER).unwrap();
    t.add_imported(&imported.competitors).unwrap();
    t.start().unwrap();
    t = reload(&t);

    loop {
        check_invariants(&t);

        let pending: Vec<_> = t
            .pending_games()
            .iter()
            .map(|g| (g.id.clone(), predicted(&t, &g.white, &g.black)))
            .collect();
        for (game, outcome) in pending {
            t.record_result(&game, outcome).unwrap();
            t = reload(&t);
        }

        match t.start_next_round().unwrap() {
            RoundAdvance::Started(round) => assert_eq!(round, t.current_round),
            RoundAdvance::Finished => break,
        }
        t = reload(&t);
    }
    t = reload(&t);

    assert_eq!(t.status, TournamentStatus::Completed);
    assert_eq!(t.current_round, 5);
    assert_eq!(t.games.len(), 5 * 3);

    // Seven players over five rounds: five different players sit out once each
    let bye_holders: Vec<_> = t.competitors.iter().filter(|c| c.had_bye()).collect();
    assert_eq!(bye_holders.len(), 5);
    assert!(bye_holders.iter().all(|c| c.byes.len() == 1));

    let total_points: f64 = t.competitors.iter().map(|c| c.score).sum();
    assert_eq!(total_points, 15.0 + 5.0);

    // The top seed wins every game it plays
    let magnus = t.competitors.iter().find(|c| c.name == "Magnus").unwrap();
    assert_eq!(magnus.score, 5.0);

    let table = t.standings();
    assert_eq!(table[0].score, 5.0);
    for pair in table.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }

    let final_state = store.load("candidates").unwrap().unwrap();
    assert_eq!(final_state, t);
}

#[test]
fn test_corrupted_save_starts_over() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    std::fs::write(dir.path().join("club.json"), "garbage").unwrap();

    let t = store.load_or_fresh("club", || Tournament::new("club", "Club", 5));

    assert_eq!(t.status, TournamentStatus::Setup);
    assert!(t.competitors.is_empty());
    store.save(&t).unwrap();
    assert_eq!(store.load("club").unwrap(), Some(t));
}
