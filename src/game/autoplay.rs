//! # Autoplay Module
//!
//! A greedy player used by the headless CLI, soak tests and benchmarks.

use crate::{find_matches, CrushResult, GameEvent, GameSession, Move};
use log::debug;

/// Greedy autoplayer state.
#[derive(Debug, Clone, Default)]
pub struct AutoPlayer {
    /// Turns this player has taken
    pub turns_played: u32,
    /// Most recent move chosen
    pub last_move: Option<Move>,
}

impl AutoPlayer {
    /// Creates a new autoplayer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks the legal swap that clears the most cells immediately.
    ///
    /// Ties go to the first move in enumeration order.
    pub fn choose_move(&self, session: &GameSession) -> Option<Move> {
        let min_match = session.config().min_match_count;
        let mut scratch = session.board.clone();
        let mut best: Option<(Move, usize)> = None;

        for candidate in session.legal_moves() {
            scratch.swap(candidate.from, candidate.to);
            let cleared = find_matches(&scratch, min_match).len();
            scratch.swap(candidate.from, candidate.to);

            if best.map_or(true, |(_, most)| cleared > most) {
                best = Some((candidate, cleared));
            }
        }

        best.map(|(chosen, _)| chosen)
    }

    /// Plays one swap. Returns `None` once the session is over or stuck.
    pub fn play_turn(&mut self, session: &mut GameSession) -> CrushResult<Option<Vec<GameEvent>>> {
        if !session.is_playing() {
            return Ok(None);
        }
        let Some(chosen) = self.choose_move(session) else {
            return Ok(None);
        };

        debug!("autoplay turn {}: {} -> {}", self.turns_played + 1, chosen.from, chosen.to);
        let events = session.try_swap(chosen.from, chosen.to)?;
        self.turns_played += 1;
        self.last_move = Some(chosen);
        Ok(Some(events))
    }

    /// Plays until the session ends or `max_turns` swaps have been made.
    ///
    /// Returns every event produced, in order.
    pub fn play_to_end(
        &mut self,
        session: &mut GameSession,
        max_turns: u32,
    ) -> CrushResult<Vec<GameEvent>> {
        let mut all_events = Vec::new();
        for _ in 0..max_turns {
            match self.play_turn(session)? {
                Some(events) => all_events.extend(events),
                None => break,
            }
        }
        Ok(all_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, EngineConfig, GameCompletionState, GameMode, Position};

    #[test]
    fn test_choose_move_prefers_biggest_clear() {
        // (1,2)<->(2,2) lines up five reds in row 1 and clears the most.
        let board = Board::from_pattern(&[
            "GBYGBY", "RRGRRB", "BYRGGY", "YGBYBG", "GBYGYB", "BYGBGY",
        ])
        .unwrap();
        let session =
            GameSession::with_board(EngineConfig::for_testing(3), GameMode::Casual, board)
                .unwrap();
        let chosen = AutoPlayer::new().choose_move(&session).unwrap();
        assert_eq!(chosen, Move::new(Position::new(1, 2), Position::new(2, 2)));
    }

    #[test]
    fn test_play_to_end_exhausts_budget() {
        let mut session =
            GameSession::new(EngineConfig::for_testing(2024), GameMode::Challenge).unwrap();
        let mut player = AutoPlayer::new();
        let events = player.play_to_end(&mut session, 100).unwrap();

        assert_eq!(session.completion_state, GameCompletionState::OutOfMoves);
        assert_eq!(session.moves_remaining, 0);
        assert_eq!(player.turns_played, 5);
        assert!(session.score > 0);
        assert!(matches!(events.last(), Some(GameEvent::GameOver { .. })));
        assert!(player.play_turn(&mut session).unwrap().is_none());
    }

    #[test]
    fn test_max_turns_limits_play() {
        let mut session =
            GameSession::new(EngineConfig::for_testing(7), GameMode::Casual).unwrap();
        let mut player = AutoPlayer::new();
        player.play_to_end(&mut session, 3).unwrap();
        assert_eq!(player.turns_played, 3);
        assert_eq!(session.moves_remaining, 7);
        assert!(session.is_playing());
    }
}
