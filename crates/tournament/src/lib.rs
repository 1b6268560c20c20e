//! Swiss tournament manager
//!
//! This crate provides everything around the pairing core:
//! - Tournament state: roster, game log, rounds and results
//! - Saving and restoring progress between sessions
//! - Importing a roster from a text file
//! - Printable pairings and standings
//!
//! # Usage
//!
//! ```bash
//! # Seed the roster and play the first round
//! cargo run -p tournament -- import players.txt
//! cargo run -p tournament -- start
//! cargo run -p tournament -- result 1 white
//! cargo run -p tournament -- next
//! cargo run -p tournament -- standings
//! ```

pub mod config;
pub mod import;
pub mod report;
pub mod store;
mod tournament;

pub use config::*;
pub use import::*;
pub use report::*;
pub use store::*;
pub use tournament::*;
