//! # Game State Module
//!
//! A single play session: the current board, the move budget, item charges,
//! score and statistics.
//!
//! Every action follows the same shape: check the session can act, hand the
//! board to the engine, resolve cascades to a settled board, score the steps,
//! then check for deadlock and the end of the budget. Only a settled board is
//! ever stored on the session, and an action that fails leaves the session
//! exactly as it was.

use crate::{
    Board, CascadeOutcome, CellFactory, CrushError, CrushResult, EngineConfig, GameEvent,
    GameMode, ItemKind, MatchEngine, Move, Position,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Statistics tracking player progress within a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Swaps that matched and cost a move
    pub swaps_made: u32,
    /// Swaps refused because nothing would match
    pub swaps_rejected: u32,
    /// Cells removed by matches and items
    pub cells_cleared: u64,
    /// Cascade steps resolved
    pub cascade_steps: u32,
    /// Longest cascade for a single action
    pub best_combo: usize,
    /// Items spent
    pub items_used: u32,
    /// Deadlocked boards replaced
    pub reshuffles: u32,
}

impl GameStatistics {
    /// Creates new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics based on a game event.
    pub fn update_from_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::SwapApplied { .. } => self.swaps_made += 1,
            GameEvent::SwapRejected { .. } => self.swaps_rejected += 1,
            GameEvent::ItemUsed { .. } => self.items_used += 1,
            GameEvent::MatchesCleared { cells, .. } => {
                self.cells_cleared += *cells as u64;
                self.cascade_steps += 1;
            }
            GameEvent::CascadeFinished { combo, .. } => {
                self.best_combo = self.best_combo.max(*combo);
            }
            GameEvent::Reshuffled => self.reshuffles += 1,
            GameEvent::GameOver { .. } => {}
        }
    }
}

/// Whether the session can still be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameCompletionState {
    /// Moves remain
    Playing,
    /// The move budget is spent
    OutOfMoves,
}

/// One play session.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Session flavour
    pub mode: GameMode,
    /// Current settled board
    pub board: Board,
    /// Moves left in the budget
    pub moves_remaining: u32,
    /// Accumulated score
    pub score: u64,
    /// Number of actions taken (swaps and items)
    pub turn: u32,
    /// Charges left per item
    pub items: BTreeMap<ItemKind, u32>,
    /// Progress counters
    pub statistics: GameStatistics,
    /// Whether the session is over
    pub completion_state: GameCompletionState,
    engine: MatchEngine,
}

/// Serializable form of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub config: EngineConfig,
    pub mode: GameMode,
    pub board: Board,
    pub moves_remaining: u32,
    pub score: u64,
    pub turn: u32,
    pub items: BTreeMap<ItemKind, u32>,
    pub statistics: GameStatistics,
    pub completion_state: GameCompletionState,
    pub factory: CellFactory,
}

/// Result of an action that resolved without error, not yet applied.
struct SettledAction {
    board: Board,
    points: u64,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Starts a session with a freshly generated board.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilecrush::{EngineConfig, GameMode, GameSession};
    ///
    /// let session = GameSession::new(EngineConfig::new(12345), GameMode::Challenge).unwrap();
    /// assert_eq!(session.moves_remaining, 20);
    /// assert_eq!(session.score, 0);
    /// ```
    pub fn new(config: EngineConfig, mode: GameMode) -> CrushResult<Self> {
        let mut engine = MatchEngine::new(config)?;
        let board = engine.generate()?;
        Ok(Self::start(engine, mode, board))
    }

    /// Starts a session on a caller-supplied board instead of a generated one.
    ///
    /// The board must fit the configuration and hold no match yet.
    pub fn with_board(config: EngineConfig, mode: GameMode, board: Board) -> CrushResult<Self> {
        let engine = MatchEngine::new(config)?;
        board.validate_for(engine.config())?;
        if !engine.detect_matches(&board).is_empty() {
            return Err(CrushError::InvalidBoard(
                "board already contains a match".to_string(),
            ));
        }
        Ok(Self::start(engine, mode, board))
    }

    fn start(engine: MatchEngine, mode: GameMode, board: Board) -> Self {
        let moves_remaining = mode.move_budget(engine.config());
        let items = ItemKind::ALL
            .iter()
            .map(|item| (*item, mode.item_charges()))
            .collect();

        info!(
            "new {:?} session: seed {}, {} moves",
            mode,
            engine.config().seed,
            moves_remaining
        );

        Self {
            mode,
            board,
            moves_remaining,
            score: 0,
            turn: 0,
            items,
            statistics: GameStatistics::new(),
            completion_state: GameCompletionState::Playing,
            engine,
        }
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        self.engine.config()
    }

    /// Whether the session still accepts actions.
    pub fn is_playing(&self) -> bool {
        self.completion_state == GameCompletionState::Playing
    }

    /// First legal swap on the current board.
    pub fn hint(&self) -> Option<Move> {
        self.engine.hint(&self.board)
    }

    /// Every legal swap on the current board.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.engine.enumerate_legal_moves(&self.board)
    }

    /// Charges left for an item.
    pub fn item_charges(&self, item: ItemKind) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    /// Attempts a swap.
    ///
    /// Out-of-range or non-adjacent pairs are errors. A swap that would not
    /// match is refused with a `SwapRejected` event and costs no move.
    pub fn try_swap(&mut self, from: Position, to: Position) -> CrushResult<Vec<GameEvent>> {
        self.ensure_playing()?;
        if !Move::new(from, to).is_valid_on(&self.board) {
            return Err(CrushError::InvalidMove(format!(
                "{} and {} are not adjacent cells on the board",
                from, to
            )));
        }

        if !self.engine.would_match(&self.board, from, to) {
            let events = vec![GameEvent::SwapRejected { from, to }];
            self.record(&events);
            return Ok(events);
        }

        let mut engine = self.begin_action();
        let swapped = engine.apply_swap(&self.board, from, to)?;
        let outcome = engine.resolve_cascades(&swapped)?;
        let settled = self.settle(&mut engine, outcome, GameEvent::SwapApplied { from, to })?;

        self.moves_remaining = self.moves_remaining.saturating_sub(1);
        Ok(self.commit(engine, settled))
    }

    /// Spends one charge of an item on a target cell.
    ///
    /// Items cost no move. The target must be on the board.
    pub fn use_item(&mut self, item: ItemKind, target: Position) -> CrushResult<Vec<GameEvent>> {
        self.ensure_playing()?;
        if !self.board.in_bounds(target) {
            return Err(CrushError::InvalidMove(format!(
                "target {} is off the board",
                target
            )));
        }
        if self.item_charges(item) == 0 {
            return Err(CrushError::InvalidMove(format!(
                "no {:?} charges left",
                item
            )));
        }

        let mut engine = self.begin_action();
        let marked = engine.apply_area_effect(&self.board, item.effect(), target);
        let outcome = engine.resolve_cascades(&marked)?;
        let settled = self.settle(&mut engine, outcome, GameEvent::ItemUsed { item, target })?;

        if let Some(charges) = self.items.get_mut(&item) {
            *charges -= 1;
        }
        Ok(self.commit(engine, settled))
    }

    /// Saves the session to JSON.
    pub fn save_to_json(&self) -> CrushResult<String> {
        serde_json::to_string_pretty(&self.snapshot()).map_err(CrushError::from)
    }

    /// Loads a session from JSON.
    ///
    /// The random stream restarts from the seed mixed with the turn, so a
    /// reloaded session does not replay refills it has already produced.
    pub fn load_from_json(json: &str) -> CrushResult<Self> {
        let snapshot: SessionSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }

    /// Captures the session in serializable form.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            config: self.engine.config().clone(),
            mode: self.mode,
            board: self.board.clone(),
            moves_remaining: self.moves_remaining,
            score: self.score,
            turn: self.turn,
            items: self.items.clone(),
            statistics: self.statistics.clone(),
            completion_state: self.completion_state,
            factory: self.engine.factory().clone(),
        }
    }

    /// Rebuilds a session from a snapshot.
    ///
    /// The board must fit the configuration and the refill factory must draw
    /// from the configured palette.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> CrushResult<Self> {
        if snapshot.factory.tile_kinds != snapshot.config.tile_kinds {
            return Err(CrushError::InvalidConfig(format!(
                "refill draws {} tile kinds, configuration has {}",
                snapshot.factory.tile_kinds, snapshot.config.tile_kinds
            )));
        }
        let seed = snapshot.config.seed ^ ((snapshot.turn as u64) << 32);
        let mut engine = MatchEngine::with_factory(snapshot.config, snapshot.factory)?;
        snapshot.board.validate_for(engine.config())?;
        engine.reseed(seed);
        Ok(Self {
            mode: snapshot.mode,
            board: snapshot.board,
            moves_remaining: snapshot.moves_remaining,
            score: snapshot.score,
            turn: snapshot.turn,
            items: snapshot.items,
            statistics: snapshot.statistics,
            completion_state: snapshot.completion_state,
            engine,
        })
    }

    fn ensure_playing(&self) -> CrushResult<()> {
        if self.is_playing() {
            Ok(())
        } else {
            Err(CrushError::GameOver)
        }
    }

    /// Working copy of the engine for the next turn. The session only adopts
    /// it once the action has fully resolved.
    fn begin_action(&self) -> MatchEngine {
        let mut engine = self.engine.clone();
        engine.set_turn(self.turn + 1);
        engine
    }

    /// Scores a resolved action and replaces a deadlocked result.
    fn settle(
        &self,
        engine: &mut MatchEngine,
        outcome: CascadeOutcome,
        action: GameEvent,
    ) -> CrushResult<SettledAction> {
        let points_per_cell = engine.config().points_per_cell;
        let mut events = vec![action];
        let mut points = 0;

        for step in &outcome.steps {
            let base: u64 = step
                .cleared
                .iter()
                .map(|cell| points_per_cell * cell.tier as u64)
                .sum();
            let step_points = base * step.depth as u64;
            points += step_points;
            events.push(GameEvent::MatchesCleared {
                depth: step.depth,
                cells: step.cleared.len(),
                points: step_points,
            });
        }
        events.push(GameEvent::CascadeFinished {
            combo: outcome.combo(),
            points,
        });

        let mut board = outcome.board;
        if engine.hint(&board).is_none() {
            warn!("turn {}: board deadlocked, reshuffling", self.turn + 1);
            board = engine.generate()?;
            events.push(GameEvent::Reshuffled);
        }

        Ok(SettledAction {
            board,
            points,
            events,
        })
    }

    /// Applies a settled action and runs the end-of-budget check.
    fn commit(&mut self, engine: MatchEngine, settled: SettledAction) -> Vec<GameEvent> {
        let SettledAction {
            board,
            points,
            mut events,
        } = settled;

        self.engine = engine;
        self.turn += 1;
        self.score += points;
        self.board = board;

        if self.moves_remaining == 0 {
            self.completion_state = GameCompletionState::OutOfMoves;
            info!("session over with score {}", self.score);
            events.push(GameEvent::GameOver {
                final_score: self.score,
            });
        }

        self.record(&events);
        events
    }

    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            self.statistics.update_from_event(event);
        }
    }
}
