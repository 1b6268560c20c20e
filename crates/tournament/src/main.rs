//! Tournament CLI
//!
//! Manage a Swiss tournament from the command line. Progress is saved after
//! every command that changes it.

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use swiss_core::{CompetitorId, GameOutcome};
use tournament::{
    import_file, render_pairings, render_standings, report_file_name, write_report, RoundAdvance,
    SnapshotStore, Tournament, TournamentConfig,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Swiss tournament manager")]
struct Cli {
    /// Tournament to work on
    #[arg(short, long, default_value = "default", global = true)]
    tournament: String,

    /// Configuration file (defaults apply when it does not exist)
    #[arg(short, long, default_value = "tournament.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a competitor
    Add {
        name: String,
        #[arg(short, long)]
        rating: Option<u32>,
    },
    /// Remove a competitor by id
    Remove { id: String },
    /// Import competitors from a file with one `name[,rating]` per line
    Import { file: PathBuf },
    /// List registered competitors
    List,
    /// Close registration and pair round one
    Start,
    /// Record the result of a board in the current round
    Result { board: usize, outcome: Outcome },
    /// Pair the next round, or finish the tournament after the last one
    Next,
    /// Show the pairings of the current round
    Pairings,
    /// Show the current standings
    Standings,
    /// Write pairings and standings to a text file
    Export {
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Show tournament progress
    Status,
    /// Delete the saved tournament and start over
    Reset,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Outcome {
    White,
    Black,
    Draw,
}

impl From<Outcome> for GameOutcome {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::White => GameOutcome::WhiteWins,
            Outcome::Black => GameOutcome::BlackWins,
            Outcome::Draw => GameOutcome::Draw,
        }
    }
}

fn main() {
    setup_logging();
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = TournamentConfig::load(&cli.config)?;
    let store = SnapshotStore::new(&config.data_dir);
    store.path_for(&cli.tournament)?;

    if let Command::Reset = cli.command {
        if store.clear(&cli.tournament)? {
            println!("Tournament '{}' cleared.", cli.tournament);
        } else {
            println!("Nothing saved for '{}'.", cli.tournament);
        }
        return Ok(());
    }

    let mut tournament = store.load_or_fresh(&cli.tournament, || {
        Tournament::from_config(&cli.tournament, &config)
    });
    let revision = tournament.revision;

    execute(&cli.command, &mut tournament, &config)?;

    if tournament.revision != revision {
        store
            .save(&tournament)
            .with_context(|| format!("saving tournament '{}'", tournament.id))?;
    }
    Ok(())
}

fn execute(command: &Command, tournament: &mut Tournament, config: &TournamentConfig) -> Result<()> {
    match command {
        Command::Add { name, rating } => {
            let rating = rating.unwrap_or(config.default_rating);
            let id = tournament.add_competitor(name, rating)?;
            println!("Added {} ({}) as {}", name.trim(), rating, id);
        }
        Command::Remove { id } => {
            let removed = tournament.remove_competitor(&CompetitorId::from(id.as_str()))?;
            println!("Removed {}", removed.name);
        }
        Command::Import { file } => run_import(file, tournament)?,
        Command::List => {
            println!("{:<38} {:<24} {:>6}", "Id", "Name", "Rating");
            println!("{}", "-".repeat(70));
            for c in &tournament.competitors {
                println!("{:<38} {:<24} {:>6}", c.id, c.name, c.rating);
            }
        }
        Command::Start => {
            tournament.start()?;
            print!("{}", render_pairings(tournament));
        }
        Command::Result { board, outcome } => {
            let game = tournament.game_for_board(*board)?.id.clone();
            let outcome = GameOutcome::from(*outcome);
            tournament.record_result(&game, outcome)?;
            println!("Board {}: {}", board, outcome.notation());
            let pending = tournament.pending_games().len();
            if pending == 0 {
                println!("All results of round {} are in.", tournament.current_round);
            }
        }
        Command::Next => match tournament.start_next_round()? {
            RoundAdvance::Started(_) => print!("{}", render_pairings(tournament)),
            RoundAdvance::Finished => {
                println!("Tournament complete.\n");
                print!("{}", render_standings(tournament));
            }
        },
        Command::Pairings => print!("{}", render_pairings(tournament)),
        Command::Standings => print!("{}", render_standings(tournament)),
        Command::Export { out } => {
            let path = out
                .clone()
                .unwrap_or_else(|| PathBuf::from(report_file_name(tournament)));
            write_report(&path, tournament, Local::now().date_naive())
                .with_context(|| format!("writing report to {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        Command::Status => print_status(tournament),
        Command::Reset => {}
    }
    Ok(())
}

fn run_import(file: &Path, tournament: &mut Tournament) -> Result<()> {
    let outcome = import_file(file)?;
    for rejected in &outcome.rejected {
        eprintln!(
            "Skipped line {}: {} ({})",
            rejected.line_number, rejected.content, rejected.reason
        );
    }
    let ids = tournament.add_imported(&outcome.competitors)?;
    println!("Imported {} competitor(s)", ids.len());
    Ok(())
}

fn print_status(tournament: &Tournament) {
    println!("=== {} ===", tournament.name);
    println!("Status: {:?}", tournament.status);
    println!("Round: {} of {}", tournament.current_round, tournament.total_rounds);
    println!("Competitors: {}", tournament.competitors.len());
    println!("Games awaiting a result: {}", tournament.pending_games().len());
    if tournament.can_start_next_round() {
        println!("Ready for the next round.");
    }
}
