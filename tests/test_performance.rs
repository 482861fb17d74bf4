//! Frame-budget performance tests for the engine

use std::time::{Duration, Instant};
use tilecrush::{
    AutoPlayer, CrushResult, EngineConfig, GameMode, GameSession, MatchEngine,
};

/// One frame at 60 Hz.
const FRAME_BUDGET: Duration = Duration::from_millis(16);

#[test]
fn test_generation_fits_in_a_frame() -> CrushResult<()> {
    let mut engine = MatchEngine::new(EngineConfig::new(12345))?;

    let start = Instant::now();
    let iterations = 50;
    for _ in 0..iterations {
        let _board = engine.generate()?;
    }
    let avg = start.elapsed() / iterations;

    println!("Average generation time: {:?}", avg);
    assert!(avg < FRAME_BUDGET, "generation took {:?} per board", avg);
    Ok(())
}

#[test]
fn test_move_enumeration_performance() -> CrushResult<()> {
    let mut engine = MatchEngine::new(EngineConfig::new(777))?;
    let board = engine.generate()?;

    let start = Instant::now();
    let iterations = 200;
    for _ in 0..iterations {
        let _moves = engine.enumerate_legal_moves(&board);
    }
    let avg = start.elapsed() / iterations;

    println!("Average legal move enumeration time: {:?}", avg);
    assert!(avg < FRAME_BUDGET / 4);
    Ok(())
}

#[test]
fn test_session_turn_performance() -> CrushResult<()> {
    let mut session = GameSession::new(EngineConfig::new(2048), GameMode::Casual)?;
    let mut player = AutoPlayer::new();

    let start = Instant::now();
    player.play_to_end(&mut session, 30)?;
    let turns = player.turns_played.max(1);
    let avg = start.elapsed() / turns;

    println!("Average turn time over {} turns: {:?}", turns, avg);
    assert!(avg < FRAME_BUDGET);
    Ok(())
}
