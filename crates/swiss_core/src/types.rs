//! Tournament data model: competitors, games and pairing output

use serde::{Deserialize, Serialize};
use std::fmt;

/// Points awarded to a competitor sitting out a round
pub const BYE_SCORE: f64 = 1.0;

/// Stable identity of a competitor within one tournament
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompetitorId(String);

impl CompetitorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompetitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for CompetitorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CompetitorId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identity of a single game record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for GameId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// A participant and everything the pairing rules need to know about them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub id: CompetitorId,
    pub name: String,
    pub rating: u32,
    /// 1 per win, 0.5 per draw, plus `BYE_SCORE` per bye
    pub score: f64,
    /// Buchholz value, derived from opponents' current scores
    pub tiebreak: f64,
    pub games_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    /// Opponents in play order; repeats only after a forced pairing
    pub opponents: Vec<CompetitorId>,
    /// Side played in each game, aligned with `opponents`
    pub colors: Vec<Color>,
    /// Rounds in which this competitor received a bye
    #[serde(default)]
    pub byes: Vec<u32>,
}

impl Competitor {
    /// A fresh competitor with no games behind them
    pub fn new(id: impl Into<CompetitorId>, name: &str, rating: u32) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            rating,
            score: 0.0,
            tiebreak: 0.0,
            games_played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            opponents: Vec::new(),
            colors: Vec::new(),
            byes: Vec::new(),
        }
    }

    /// Games as white minus games as black
    pub fn color_balance(&self) -> i32 {
        self.colors.iter().fold(0, |balance, color| match color {
            Color::White => balance + 1,
            Color::Black => balance - 1,
        })
    }

    pub fn has_played(&self, opponent: &CompetitorId) -> bool {
        self.opponents.contains(opponent)
    }

    pub fn had_bye(&self) -> bool {
        !self.byes.is_empty()
    }

    /// Score implied by the win/draw/bye counters
    pub fn expected_score(&self) -> f64 {
        self.wins as f64 + 0.5 * self.draws as f64 + BYE_SCORE * self.byes.len() as f64
    }

    /// Whether the history vectors and counters agree with each other
    pub fn history_is_consistent(&self) -> bool {
        let played = self.games_played as usize;
        self.opponents.len() == played
            && self.colors.len() == played
            && self.wins + self.draws + self.losses == self.games_played
            && (self.score - self.expected_score()).abs() < 1e-9
    }
}

/// Result of a finished game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameOutcome {
    /// Side that won, `None` for a draw
    pub fn winner(self) -> Option<Color> {
        match self {
            GameOutcome::WhiteWins => Some(Color::White),
            GameOutcome::BlackWins => Some(Color::Black),
            GameOutcome::Draw => None,
        }
    }

    /// Points earned by the side playing `color`
    pub fn points_for(self, color: Color) -> f64 {
        match (self, color) {
            (GameOutcome::Draw, _) => 0.5,
            (GameOutcome::WhiteWins, Color::White) | (GameOutcome::BlackWins, Color::Black) => 1.0,
            _ => 0.0,
        }
    }

    /// Conventional score notation ("1-0", "0-1", "½-½")
    pub fn notation(self) -> &'static str {
        match self {
            GameOutcome::WhiteWins => "1-0",
            GameOutcome::BlackWins => "0-1",
            GameOutcome::Draw => "½-½",
        }
    }
}

/// One matchup of one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub round: u32,
    pub white: CompetitorId,
    pub black: CompetitorId,
    pub result: Option<GameOutcome>,
    pub completed: bool,
}

impl Game {
    pub fn new(id: impl Into<GameId>, round: u32, pairing: PairingResult) -> Self {
        Self {
            id: id.into(),
            round,
            white: pairing.white,
            black: pairing.black,
            result: None,
            completed: false,
        }
    }

    pub fn involves(&self, competitor: &CompetitorId) -> bool {
        &self.white == competitor || &self.black == competitor
    }

    pub fn color_of(&self, competitor: &CompetitorId) -> Option<Color> {
        if &self.white == competitor {
            Some(Color::White)
        } else if &self.black == competitor {
            Some(Color::Black)
        } else {
            None
        }
    }

    pub fn opponent_of(&self, competitor: &CompetitorId) -> Option<&CompetitorId> {
        match self.color_of(competitor)? {
            Color::White => Some(&self.black),
            Color::Black => Some(&self.white),
        }
    }
}

/// A proposed game produced by the pairing engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingResult {
    pub white: CompetitorId,
    pub black: CompetitorId,
}

/// Everything the pairing engine decided for one round
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundPairings {
    pub pairings: Vec<PairingResult>,
    pub bye: Option<CompetitorId>,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
