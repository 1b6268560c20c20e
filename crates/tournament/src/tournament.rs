//! Tournament state and the transitions between rounds

use serde::{Deserialize, Serialize};
use swiss_core::{
    pair_round, recompute_tiebreaks, standings, Competitor, CompetitorId, Game, GameId,
    GameOutcome, RoundPairings, BYE_SCORE,
};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::TournamentConfig;
use crate::import::ImportedCompetitor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    Setup,
    Ongoing,
    Completed,
}

/// What `start_next_round` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundAdvance {
    Started(u32),
    Finished,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TournamentError {
    #[error("competitor name must not be empty")]
    EmptyName,
    #[error("tournament is already completed")]
    Completed,
    #[error("tournament has already started")]
    AlreadyStarted,
    #[error("tournament is not in progress")]
    NotInProgress,
    #[error("at least two competitors are needed, found {0}")]
    NotEnoughCompetitors(usize),
    #[error("round {round} still has {pending} game(s) without a result")]
    RoundInProgress { round: u32, pending: usize },
    #[error("unknown game {0}")]
    UnknownGame(GameId),
    #[error("game {0} already has a result")]
    GameAlreadyCompleted(GameId),
    #[error("no board {board} in round {round}")]
    UnknownBoard { board: usize, round: u32 },
    #[error("unknown competitor {0}")]
    UnknownCompetitor(CompetitorId),
    #[error("competitor {0} has an inconsistent game history")]
    InconsistentHistory(CompetitorId),
    #[error("game {0} is malformed")]
    MalformedGame(GameId),
}

/// Complete state of one tournament: roster, game log and progress.
///
/// Every operation computes the next roster and game log first and commits
/// them together, so a failed call leaves the tournament untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: String,
    pub name: String,
    /// Registration order
    pub competitors: Vec<Competitor>,
    /// Creation order, append-only
    pub games: Vec<Game>,
    pub current_round: u32,
    pub total_rounds: u32,
    pub status: TournamentStatus,
    /// Bumped by every committed change
    #[serde(default)]
    pub revision: u64,
}

impl Tournament {
    pub fn new(id: &str, name: &str, total_rounds: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            competitors: Vec::new(),
            games: Vec::new(),
            current_round: 0,
            total_rounds,
            status: TournamentStatus::Setup,
            revision: 0,
        }
    }

    pub fn from_config(id: &str, config: &TournamentConfig) -> Self {
        Self::new(id, &config.name, config.total_rounds)
    }

    fn commit(&mut self, competitors: Vec<Competitor>, games: Vec<Game>) {
        self.competitors = competitors;
        self.games = games;
        self.revision += 1;
    }

    /// Register a competitor with no games behind them
    pub fn add_competitor(&mut self, name: &str, rating: u32) -> Result<CompetitorId, TournamentError> {
        if self.status == TournamentStatus::Completed {
            return Err(TournamentError::Completed);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }

        let id = CompetitorId::new(Uuid::new_v4().to_string());
        let mut competitors = self.competitors.clone();
        competitors.push(Competitor::new(id.clone(), name, rating));
        let games = self.games.clone();
        self.commit(competitors, games);

        info!(%id, name, rating, "competitor added");
        Ok(id)
    }

    /// Seed the roster from an import. Only allowed before the first round.
    pub fn add_imported(
        &mut self,
        imported: &[ImportedCompetitor],
    ) -> Result<Vec<CompetitorId>, TournamentError> {
        match self.status {
            TournamentStatus::Setup => {}
            TournamentStatus::Ongoing => return Err(TournamentError::AlreadyStarted),
            TournamentStatus::Completed => return Err(TournamentError::Completed),
        }
        if imported.iter().any(|c| c.name.trim().is_empty()) {
            return Err(TournamentError::EmptyName);
        }

        let mut competitors = self.competitors.clone();
        let ids: Vec<CompetitorId> = imported
            .iter()
            .map(|entry| {
                let id = CompetitorId::new(Uuid::new_v4().to_string());
                competitors.push(Competitor::new(id.clone(), entry.name.trim(), entry.rating));
                id
            })
            .collect();
        let games = self.games.clone();
        self.commit(competitors, games);

        info!(count = ids.len(), "competitors imported");
        Ok(ids)
    }

    /// Remove a competitor. Past opponents keep the id in their history; it
    /// simply stops contributing to their tiebreak.
    pub fn remove_competitor(&mut self, id: &CompetitorId) -> Result<Competitor, TournamentError> {
        let index = self
            .competitors
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| TournamentError::UnknownCompetitor(id.clone()))?;

        if self.status != TournamentStatus::Setup {
            warn!(%id, round = self.current_round, "removing a competitor from a running tournament");
        }

        let mut competitors = self.competitors.clone();
        let removed = competitors.remove(index);
        refresh_tiebreaks(&mut competitors);
        let games = self.games.clone();
        self.commit(competitors, games);

        info!(%id, name = %removed.name, "competitor removed");
        Ok(removed)
    }

    /// Close registration and pair round one
    pub fn start(&mut self) -> Result<(), TournamentError> {
        match self.status {
            TournamentStatus::Setup => {}
            TournamentStatus::Ongoing => return Err(TournamentError::AlreadyStarted),
            TournamentStatus::Completed => return Err(TournamentError::Completed),
        }
        if self.competitors.len() < 2 {
            return Err(TournamentError::NotEnoughCompetitors(self.competitors.len()));
        }

        let (competitors, games) = self.plan_round(1);
        self.commit(competitors, games);
        self.status = TournamentStatus::Ongoing;
        self.current_round = 1;
        Ok(())
    }

    /// Record the result of one game.
    ///
    /// Completes the game, updates both players' score, counters and
    /// histories, then recomputes every tiebreak.
    pub fn record_result(&mut self, game_id: &GameId, outcome: GameOutcome) -> Result<(), TournamentError> {
        let index = self
            .games
            .iter()
            .position(|g| &g.id == game_id)
            .ok_or_else(|| TournamentError::UnknownGame(game_id.clone()))?;
        if self.games[index].completed {
            return Err(TournamentError::GameAlreadyCompleted(game_id.clone()));
        }

        let mut games = self.games.clone();
        let game = &mut games[index];
        game.result = Some(outcome);
        game.completed = true;
        let game = game.clone();

        let mut competitors = self.competitors.clone();
        for side in [&game.white, &game.black] {
            let Some(competitor) = competitors.iter_mut().find(|c| &c.id == side) else {
                warn!(game = %game.id, competitor = %side, "result recorded for a removed competitor");
                continue;
            };
            let (Some(color), Some(opponent)) = (game.color_of(side), game.opponent_of(side)) else {
                continue;
            };

            match outcome.winner() {
                None => competitor.draws += 1,
                Some(winner) if winner == color => competitor.wins += 1,
                Some(_) => competitor.losses += 1,
            }
            competitor.score += outcome.points_for(color);
            competitor.opponents.push(opponent.clone());
            competitor.colors.push(color);
            competitor.games_played += 1;
        }
        refresh_tiebreaks(&mut competitors);
        self.commit(competitors, games);

        info!(game = %game_id, round = game.round, result = outcome.notation(), "result recorded");
        Ok(())
    }

    /// Whether every game of the current round has a result and another
    /// round remains to be played
    pub fn can_start_next_round(&self) -> bool {
        self.status == TournamentStatus::Ongoing
            && self.pending_games().is_empty()
            && self.current_round < self.total_rounds
    }

    /// Pair the next round, or close the tournament after the last one
    pub fn start_next_round(&mut self) -> Result<RoundAdvance, TournamentError> {
        match self.status {
            TournamentStatus::Ongoing => {}
            TournamentStatus::Setup => return Err(TournamentError::NotInProgress),
            TournamentStatus::Completed => return Err(TournamentError::Completed),
        }
        let pending = self.pending_games().len();
        if pending > 0 {
            return Err(TournamentError::RoundInProgress {
                round: self.current_round,
                pending,
            });
        }

        if self.current_round >= self.total_rounds {
            self.status = TournamentStatus::Completed;
            self.revision += 1;
            info!(rounds = self.current_round, "tournament completed");
            return Ok(RoundAdvance::Finished);
        }

        let round = self.current_round + 1;
        let (competitors, games) = self.plan_round(round);
        self.commit(competitors, games);
        self.current_round = round;
        Ok(RoundAdvance::Started(round))
    }

    /// Roster and game log after pairing `round`, byes applied
    fn plan_round(&self, round: u32) -> (Vec<Competitor>, Vec<Game>) {
        let RoundPairings { pairings, bye } = pair_round(&self.competitors, round);

        let mut competitors = self.competitors.clone();
        if let Some(bye) = &bye {
            if let Some(competitor) = competitors.iter_mut().find(|c| &c.id == bye) {
                competitor.byes.push(round);
                competitor.score += BYE_SCORE;
                info!(round, competitor = %bye, name = %competitor.name, "bye awarded");
            }
            refresh_tiebreaks(&mut competitors);
        }

        let mut games = self.games.clone();
        let board_count = pairings.len();
        games.extend(
            pairings
                .into_iter()
                .map(|pairing| Game::new(Uuid::new_v4().to_string(), round, pairing)),
        );

        info!(round, boards = board_count, "round paired");
        (competitors, games)
    }

    /// Games of the current round still waiting for a result
    pub fn pending_games(&self) -> Vec<&Game> {
        self.games
            .iter()
            .filter(|g| g.round == self.current_round && !g.completed)
            .collect()
    }

    /// Games of `round`, in board order
    pub fn round_games(&self, round: u32) -> Vec<&Game> {
        self.games.iter().filter(|g| g.round == round).collect()
    }

    /// Game on a 1-based board of the current round
    pub fn game_for_board(&self, board: usize) -> Result<&Game, TournamentError> {
        board
            .checked_sub(1)
            .and_then(|index| self.round_games(self.current_round).get(index).copied())
            .ok_or(TournamentError::UnknownBoard {
                board,
                round: self.current_round,
            })
    }

    pub fn competitor(&self, id: &CompetitorId) -> Option<&Competitor> {
        self.competitors.iter().find(|c| &c.id == id)
    }

    /// Competitors who sat out `round`
    pub fn byes_in_round(&self, round: u32) -> Vec<&Competitor> {
        self.competitors
            .iter()
            .filter(|c| c.byes.contains(&round))
            .collect()
    }

    /// Roster in standings order, computed fresh on every call
    pub fn standings(&self) -> Vec<&Competitor> {
        standings(&self.competitors)
    }

    /// Check the invariants a saved tournament must satisfy
    pub fn validate(&self) -> Result<(), TournamentError> {
        if let Some(c) = self.competitors.iter().find(|c| !c.history_is_consistent()) {
            return Err(TournamentError::InconsistentHistory(c.id.clone()));
        }
        if let Some(g) = self
            .games
            .iter()
            .find(|g| g.white == g.black || g.completed != g.result.is_some() || g.round > self.current_round)
        {
            return Err(TournamentError::MalformedGame(g.id.clone()));
        }
        Ok(())
    }
}

fn refresh_tiebreaks(competitors: &mut [Competitor]) {
    let tiebreaks = recompute_tiebreaks(competitors);
    for (competitor, tiebreak) in competitors.iter_mut().zip(tiebreaks) {
        competitor.tiebreak = tiebreak;
    }
}

#[cfg(test)]
#[path = "tournament_tests.rs"]
mod tournament_tests;
