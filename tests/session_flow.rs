//! Session, bridge and configuration integration tests

use std::io::Write;
use tilecrush::{
    AutoPlayer, BridgeHost, CrushError, CrushResult, EngineConfig, GameCompletionState,
    GameEvent, GameMode, GameSession, ItemKind, Position,
};

#[test]
fn test_full_casual_session() -> CrushResult<()> {
    let mut session = GameSession::new(EngineConfig::for_testing(8080), GameMode::Casual)?;
    let mut player = AutoPlayer::new();
    let events = player.play_to_end(&mut session, 1000)?;

    assert_eq!(session.completion_state, GameCompletionState::OutOfMoves);
    assert_eq!(session.statistics.swaps_made, 10);
    assert_eq!(session.statistics.swaps_rejected, 0);

    let scored: u64 = events
        .iter()
        .filter_map(|event| match event {
            GameEvent::CascadeFinished { points, .. } => Some(*points),
            _ => None,
        })
        .sum();
    assert_eq!(scored, session.score);

    let cleared: u64 = events
        .iter()
        .filter_map(|event| match event {
            GameEvent::MatchesCleared { cells, .. } => Some(*cells as u64),
            _ => None,
        })
        .sum();
    assert_eq!(cleared, session.statistics.cells_cleared);
    Ok(())
}

#[test]
fn test_items_then_swaps() -> CrushResult<()> {
    let mut session = GameSession::new(EngineConfig::for_testing(4), GameMode::Challenge)?;
    for item in ItemKind::ALL {
        session.use_item(item, Position::new(2, 2))?;
        assert_eq!(session.item_charges(item), 0);
    }
    assert_eq!(session.moves_remaining, 5);
    assert_eq!(session.turn, 3);
    assert!(session.score > 0);

    let hint = session.hint().ok_or_else(|| {
        CrushError::InvalidBoard("settled board has no legal move".to_string())
    })?;
    session.try_swap(hint.from, hint.to)?;
    assert_eq!(session.moves_remaining, 4);
    Ok(())
}

#[test]
fn test_session_survives_save_and_load() -> CrushResult<()> {
    let mut session = GameSession::new(EngineConfig::for_testing(77), GameMode::Casual)?;
    AutoPlayer::new().play_to_end(&mut session, 4)?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("session.json");
    std::fs::write(&path, session.save_to_json()?)?;

    let mut loaded = GameSession::load_from_json(&std::fs::read_to_string(&path)?)?;
    assert_eq!(loaded.board, session.board);
    assert_eq!(loaded.turn, 4);
    assert_eq!(loaded.moves_remaining, 6);

    AutoPlayer::new().play_to_end(&mut loaded, 1000)?;
    assert!(!loaded.is_playing());
    assert!(loaded.score >= session.score);
    Ok(())
}

#[test]
fn test_config_file_drives_the_engine() -> CrushResult<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"{{"seed": 5, "grid_size": 7, "tile_kinds": 5, "casual_moves": 12}}"#
    )?;

    let config = EngineConfig::load_from_path(file.path())?;
    assert_eq!(config.grid_size, 7);
    assert_eq!(config.min_match_count, 3);

    let session = GameSession::new(config, GameMode::Casual)?;
    assert_eq!(session.board.size(), 7);
    assert_eq!(session.moves_remaining, 12);
    Ok(())
}

#[test]
fn test_invalid_config_file_is_rejected() -> CrushResult<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(file, r#"{{"grid_size": 2}}"#)?;
    assert!(matches!(
        EngineConfig::load_from_path(file.path()),
        Err(CrushError::InvalidConfig(_))
    ));

    assert!(matches!(
        EngineConfig::load_from_path(file.path().with_extension("missing")),
        Err(CrushError::Io(_))
    ));
    Ok(())
}

#[test]
fn test_bridge_json_round() {
    let mut host = BridgeHost::new(EngineConfig::for_testing(21));

    let reply = host.handle_json(r#"{"type":"Snapshot"}"#);
    assert!(reply.contains(r#""type":"Error""#));

    let reply = host.handle_json(r#"{"type":"NewGame","mode":"Casual","seed":3}"#);
    assert!(reply.contains(r#""type":"Board""#));
    assert!(reply.contains(r#""moves_remaining":10"#));

    let reply = host.handle_json(
        r#"{"type":"UseItem","item":"Hammer","target":{"row":0,"col":0}}"#,
    );
    assert!(reply.contains(r#""type":"Events""#));
    assert!(reply.contains(r#""type":"ItemUsed""#));

    let reply = host.handle_json(r#"{"type":"Hint"}"#);
    let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(value["type"], "Hint");
    assert!(value["hint"]["from"]["row"].is_number());

    let reply = host.handle_json(r#"{"type":"Swap","from":{"row":0,"col":0}}"#);
    assert!(reply.contains("malformed request"));
}
