//! Match execution engine

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{EngineError, Result};
use crate::moves::{moves_list, Move};
use crate::opponent::Opponent;
use crate::rules::{RoundOutcome, RuleTable};

/// Rounds in a standard match
pub const DEFAULT_MAX_ROUNDS: u32 = 10;

/// Match configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub max_rounds: u32,
}

impl MatchConfig {
    /// Ten rounds
    pub fn standard() -> Self {
        Self { max_rounds: DEFAULT_MAX_ROUNDS }
    }

    pub fn with_max_rounds(max_rounds: u32) -> Self {
        Self { max_rounds }
    }

    /// Parse from JSON, e.g. `{"max_rounds": 5}`. Missing fields use defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_rounds == 0 {
            return Err(EngineError::InvalidConfig(
                "max_rounds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Lifecycle phase of a match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    InProgress,
    Complete,
}

/// Final result of a completed match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchVerdict {
    PlayerWonMatch,
    ComputerWonMatch,
    MatchDrawn,
}

impl fmt::Display for MatchVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MatchVerdict::PlayerWonMatch => "You won the game!",
            MatchVerdict::ComputerWonMatch => "Computer won the game!",
            MatchVerdict::MatchDrawn => "It's a draw!",
        })
    }
}

/// What the status line shows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    InProgress { round: u32, max_rounds: u32 },
    Complete(MatchVerdict),
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStatus::InProgress { round, max_rounds } => {
                write!(f, "Round {} of {}", round, max_rounds)
            }
            MatchStatus::Complete(verdict) => write!(f, "{}", verdict),
        }
    }
}

/// Scores and round counter of one match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// 1-based number of the next round to play
    pub current_round: u32,
    pub max_rounds: u32,
    pub player_score: u32,
    pub computer_score: u32,
    pub tie_count: u32,
    pub is_over: bool,
}

impl MatchState {
    pub fn new(max_rounds: u32) -> Self {
        Self {
            current_round: 1,
            max_rounds,
            player_score: 0,
            computer_score: 0,
            tie_count: 0,
            is_over: false,
        }
    }

    /// Rounds resolved so far
    pub fn rounds_played(&self) -> u32 {
        self.current_round.saturating_sub(1)
    }

    pub fn phase(&self) -> MatchPhase {
        if self.is_over {
            MatchPhase::Complete
        } else {
            MatchPhase::InProgress
        }
    }

    pub fn status(&self) -> MatchStatus {
        if !self.is_over {
            return MatchStatus::InProgress {
                round: self.current_round,
                max_rounds: self.max_rounds,
            };
        }

        let verdict = match self.player_score.cmp(&self.computer_score) {
            std::cmp::Ordering::Greater => MatchVerdict::PlayerWonMatch,
            std::cmp::Ordering::Less => MatchVerdict::ComputerWonMatch,
            std::cmp::Ordering::Equal => MatchVerdict::MatchDrawn,
        };
        MatchStatus::Complete(verdict)
    }

    fn record(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::PlayerWins => self.player_score += 1,
            RoundOutcome::ComputerWins => self.computer_score += 1,
            RoundOutcome::Tie => self.tie_count += 1,
        }

        let resolved = self.current_round;
        self.current_round += 1;
        if resolved == self.max_rounds {
            self.is_over = true;
        }
    }
}

/// Result of a single round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// 1-based number of the round this result resolved
    pub round: u32,
    pub player_move: Move,
    pub computer_move: Move,
    pub outcome: RoundOutcome,
    /// State after the round was scored
    pub state: MatchState,
}

/// Owns the match state and resolves rounds against an opponent
#[derive(Clone, Debug)]
pub struct MatchEngine<O> {
    config: MatchConfig,
    rules: RuleTable,
    state: MatchState,
    history: Vec<RoundResult>,
    opponent: O,
}

impl<O: Opponent> MatchEngine<O> {
    /// Ten rounds, standard rule table
    pub fn standard(opponent: O) -> Self {
        let config = MatchConfig::standard();
        Self {
            state: MatchState::new(config.max_rounds),
            history: Vec::with_capacity(config.max_rounds as usize),
            config,
            rules: RuleTable::standard(),
            opponent,
        }
    }

    /// Engine using the standard rule table
    pub fn new(config: MatchConfig, opponent: O) -> Result<Self> {
        Self::with_rules(config, RuleTable::standard(), opponent)
    }

    pub fn with_rules(config: MatchConfig, rules: RuleTable, opponent: O) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            state: MatchState::new(config.max_rounds),
            history: Vec::with_capacity(config.max_rounds as usize),
            config,
            rules,
            opponent,
        })
    }

    /// Resolve one round.
    ///
    /// The state is only touched once the outcome is known, so any error
    /// leaves the match exactly as it was.
    pub fn play_round(&mut self, player_move: Move) -> Result<RoundResult> {
        if self.state.is_over {
            warn!(%player_move, "round rejected, match already over");
            return Err(EngineError::MatchAlreadyOver);
        }

        let computer_move = self.opponent.choose(moves_list());
        let outcome = self.rules.relation(player_move, computer_move)?;

        let round = self.state.current_round;
        self.state.record(outcome);

        let result = RoundResult {
            round,
            player_move,
            computer_move,
            outcome,
            state: self.state,
        };
        self.history.push(result);

        debug!(
            round,
            %player_move,
            %computer_move,
            ?outcome,
            player = self.state.player_score,
            computer = self.state.computer_score,
            ties = self.state.tie_count,
            "round resolved"
        );
        if self.state.is_over {
            info!(
                verdict = %self.state.status(),
                player = self.state.player_score,
                computer = self.state.computer_score,
                ties = self.state.tie_count,
                "match complete"
            );
        }

        Ok(result)
    }

    /// Parse a move name and play it. Unknown names fail before anything
    /// else happens.
    pub fn play_named(&mut self, name: &str) -> Result<RoundResult> {
        let player_move: Move = name.parse()?;
        self.play_round(player_move)
    }
}

impl<O> MatchEngine<O> {
    /// Start a fresh match with the same config, rules and opponent
    pub fn reset(&mut self) {
        info!(rounds_played = self.state.rounds_played(), "match reset");
        self.state = MatchState::new(self.config.max_rounds);
        self.history.clear();
    }

    pub fn status(&self) -> MatchStatus {
        self.state.status()
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over
    }

    /// Rounds played since the last reset, oldest first
    pub fn history(&self) -> &[RoundResult] {
        &self.history
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opponent::{RandomOpponent, ScriptedOpponent};
    use crate::rules::RuleEntry;
    use proptest::prelude::*;
    use Move::*;
    use RoundOutcome::*;

    fn scripted(script: &[Move]) -> MatchEngine<ScriptedOpponent> {
        MatchEngine::new(
            MatchConfig::standard(),
            ScriptedOpponent::new(script.to_vec()).unwrap(),
        )
        .unwrap()
    }

    fn assert_score_invariant(state: &MatchState) {
        assert_eq!(
            state.player_score + state.computer_score + state.tie_count,
            state.current_round - 1
        );
    }

    #[test]
    fn test_fresh_match() {
        let engine = scripted(&[Rock]);
        let state = engine.state();

        assert_eq!(state, MatchState::new(10));
        assert_eq!(state.phase(), MatchPhase::InProgress);
        assert_eq!(
            engine.status(),
            MatchStatus::InProgress { round: 1, max_rounds: 10 }
        );
        assert_eq!(engine.status().to_string(), "Round 1 of 10");
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_always_rock_scenario() {
        let computer = [Scissors, Paper, Rock, Glue, Wood, Nails, Hammer, Scissors, Paper, Rock];
        let mut engine = scripted(&computer);

        let outcomes: Vec<_> = (0..10)
            .map(|_| engine.play_round(Rock).unwrap().outcome)
            .collect();

        // Round 6 is rock vs nails: rock's entry does not list nails, so it scores as a tie
        assert_eq!(
            outcomes,
            [PlayerWins, ComputerWins, Tie, ComputerWins, PlayerWins, Tie, ComputerWins, PlayerWins, ComputerWins, Tie]
        );

        let state = engine.state();
        assert_eq!(state.player_score, 3);
        assert_eq!(state.computer_score, 4);
        assert_eq!(state.tie_count, 3);
        assert!(state.is_over);
        assert_eq!(
            engine.status(),
            MatchStatus::Complete(MatchVerdict::ComputerWonMatch)
        );
        assert_eq!(engine.status().to_string(), "Computer won the game!");
    }

    #[test]
    fn test_round_result_contents() {
        let mut engine = scripted(&[Glue]);
        let result = engine.play_round(Hammer).unwrap();

        assert_eq!(result.round, 1);
        assert_eq!(result.player_move, Hammer);
        assert_eq!(result.computer_move, Glue);
        assert_eq!(result.outcome, ComputerWins);
        assert_eq!(result.state.current_round, 2);
        assert_eq!(result.state.computer_score, 1);
        assert_eq!(engine.history(), &[result]);
    }

    #[test]
    fn test_over_exactly_after_max_rounds() {
        let mut engine = scripted(&[Paper, Wood, Glue]);

        for round in 1..=10 {
            assert!(!engine.is_over(), "over before round {}", round);
            let result = engine.play_round(Scissors).unwrap();
            assert_eq!(result.round, round);
            assert_eq!(result.state.is_over, round == 10);
        }

        assert!(engine.is_over());
        assert_eq!(engine.state().phase(), MatchPhase::Complete);
        assert_eq!(engine.state().current_round, 11);
        assert_eq!(engine.history().len(), 10);
    }

    #[test]
    fn test_play_after_over_rejected() {
        let mut engine = MatchEngine::new(
            MatchConfig::with_max_rounds(1),
            ScriptedOpponent::new(vec![Rock]).unwrap(),
        )
        .unwrap();

        engine.play_round(Paper).unwrap();
        let before = engine.state();

        assert_eq!(engine.play_round(Paper), Err(EngineError::MatchAlreadyOver));
        assert_eq!(engine.state(), before);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_invalid_name_does_not_mutate() {
        let mut engine = scripted(&[Rock, Paper]);
        engine.play_round(Wood).unwrap();
        let before = engine.state();

        assert_eq!(
            engine.play_named("lava"),
            Err(EngineError::InvalidMove("lava".to_string()))
        );
        assert_eq!(engine.state(), before);
        assert_eq!(engine.history().len(), 1);

        // Opponent was not consulted, so the script continues with paper
        assert_eq!(engine.play_named("scissors").unwrap().computer_move, Paper);
    }

    #[test]
    fn test_missing_rule_entry_does_not_mutate() {
        let rules = RuleTable::from_entries([(Rock, RuleEntry::new(&[Scissors], &[Paper]))]);
        let mut engine = MatchEngine::with_rules(
            MatchConfig::standard(),
            rules,
            ScriptedOpponent::new(vec![Scissors]).unwrap(),
        )
        .unwrap();

        assert_eq!(
            engine.play_round(Glue),
            Err(EngineError::InvalidMove("glue".to_string()))
        );
        assert_eq!(engine.state(), MatchState::new(10));
        assert_eq!(engine.play_round(Rock).unwrap().outcome, PlayerWins);
    }

    #[test]
    fn test_reset_after_complete() {
        let mut engine = scripted(&[Scissors, Rock]);
        for _ in 0..10 {
            engine.play_round(Rock).unwrap();
        }
        assert!(engine.is_over());
        assert!(engine.state().tie_count > 0);

        engine.reset();

        assert_eq!(engine.state(), MatchState::new(10));
        assert!(engine.history().is_empty());
        assert_eq!(engine.status().to_string(), "Round 1 of 10");
        assert!(engine.play_round(Rock).is_ok());
    }

    #[test]
    fn test_reset_mid_match() {
        let mut engine = scripted(&[Paper]);
        engine.play_round(Rock).unwrap();
        engine.play_round(Rock).unwrap();

        engine.reset();
        assert_eq!(engine.state(), MatchState::new(10));
    }

    #[test]
    fn test_rounds_played_on_zero_round_state() {
        let state: MatchState = serde_json::from_str(
            r#"{"current_round":0,"max_rounds":10,"player_score":0,"computer_score":0,"tie_count":0,"is_over":false}"#,
        )
        .unwrap();
        assert_eq!(state.rounds_played(), 0);
    }

    #[test]
    fn test_verdicts() {
        let mut state = MatchState::new(2);
        state.record(PlayerWins);
        state.record(Tie);
        assert_eq!(state.status(), MatchStatus::Complete(MatchVerdict::PlayerWonMatch));
        assert_eq!(state.status().to_string(), "You won the game!");

        let mut state = MatchState::new(2);
        state.record(PlayerWins);
        state.record(ComputerWins);
        assert_eq!(state.status(), MatchStatus::Complete(MatchVerdict::MatchDrawn));
        assert_eq!(state.status().to_string(), "It's a draw!");

        let mut state = MatchState::new(1);
        state.record(Tie);
        assert_eq!(state.status(), MatchStatus::Complete(MatchVerdict::MatchDrawn));
    }

    #[test]
    fn test_config_validation() {
        assert_eq!(MatchConfig::default().max_rounds, 10);
        assert!(matches!(
            MatchEngine::new(MatchConfig::with_max_rounds(0), RandomOpponent::from_seed(&[1; 32])),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_from_json() {
        assert_eq!(MatchConfig::from_json(r#"{"max_rounds": 5}"#).unwrap().max_rounds, 5);
        assert_eq!(MatchConfig::from_json("{}").unwrap(), MatchConfig::standard());
        assert!(matches!(
            MatchConfig::from_json(r#"{"max_rounds": 0}"#),
            Err(EngineError::InvalidConfig(_))
        ));
        assert!(matches!(
            MatchConfig::from_json("not json"),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_seeded_match_is_reproducible() {
        let play = || {
            let mut engine =
                MatchEngine::new(MatchConfig::standard(), RandomOpponent::from_seed(&[9; 32])).unwrap();
            (0..10)
                .map(|_| engine.play_round(Hammer).unwrap().computer_move)
                .collect::<Vec<_>>()
        };
        assert_eq!(play(), play());
    }

    #[test]
    fn test_round_result_json() {
        let mut engine = scripted(&[Rock]);
        let json = serde_json::to_value(engine.play_round(Paper).unwrap()).unwrap();
        assert_eq!(json["player_move"], "paper");
        assert_eq!(json["computer_move"], "rock");
        assert_eq!(json["outcome"], "PlayerWins");
        assert_eq!(json["state"]["player_score"], 1);
    }

    fn any_move() -> impl Strategy<Value = Move> {
        proptest::sample::select(moves_list().to_vec())
    }

    proptest! {
        #[test]
        fn prop_score_invariant_holds(
            seed in any::<[u8; 32]>(),
            max_rounds in 1u32..20,
            picks in proptest::collection::vec(any_move(), 0..40),
        ) {
            let mut engine =
                MatchEngine::new(MatchConfig::with_max_rounds(max_rounds), RandomOpponent::from_seed(&seed)).unwrap();

            for pick in picks {
                let was_over = engine.is_over();
                match engine.play_round(pick) {
                    Ok(result) => {
                        prop_assert!(!was_over);
                        prop_assert_eq!(result.state, engine.state());
                    }
                    Err(e) => {
                        prop_assert!(was_over);
                        prop_assert_eq!(e, EngineError::MatchAlreadyOver);
                    }
                }
                assert_score_invariant(&engine.state());
                prop_assert!(engine.state().rounds_played() <= max_rounds);
                prop_assert_eq!(engine.is_over(), engine.state().rounds_played() == max_rounds);
            }
        }

        #[test]
        fn prop_reset_restores_initial_state(
            seed in any::<[u8; 32]>(),
            rounds in 0usize..15,
        ) {
            let mut engine =
                MatchEngine::new(MatchConfig::standard(), RandomOpponent::from_seed(&seed)).unwrap();
            for _ in 0..rounds {
                let _ = engine.play_round(Rock);
            }
            engine.reset();
            prop_assert_eq!(engine.state(), MatchState::new(10));
            prop_assert!(engine.history().is_empty());
        }
    }
}
