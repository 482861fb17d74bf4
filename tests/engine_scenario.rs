//! End-to-end engine scenario on a fixed 8x8 board

use tilecrush::generation::utils;
use tilecrush::{
    collapse_and_refill, find_matches, find_runs, mark_matches, would_match, Axis, Board,
    CellFactory, CrushResult, EngineConfig, MatchEngine, MatchRun, Position,
};

fn scenario_board() -> CrushResult<Board> {
    Board::from_pattern(&[
        "RGBYRGBY", "GBYRGBYR", "BYRGBYRG", "YRRORYGB", "RGBYRGBY", "GBYRGBYR", "BYRGBYRG",
        "YRGBYRGB",
    ])
}

#[test]
fn test_swap_scenario_settles() -> CrushResult<()> {
    let config = EngineConfig::new(12345);
    let board = scenario_board()?;
    let from = Position::new(3, 3);
    let to = Position::new(3, 4);

    assert!(find_matches(&board, config.min_match_count).is_empty());
    assert!(would_match(&board, from, to, config.min_match_count));

    let mut swapped = board.clone();
    assert!(swapped.swap(from, to));

    let runs = find_runs(&swapped, config.min_match_count);
    assert_eq!(
        runs,
        vec![MatchRun {
            axis: Axis::Horizontal,
            start: Position::new(3, 1),
            length: 3,
        }]
    );

    let mut rng = utils::create_rng(&config);
    let mut factory = CellFactory::new(&config);
    let mut current = swapped;
    let mut iterations = 0;
    loop {
        let matches = find_matches(&current, config.min_match_count);
        if matches.is_empty() {
            break;
        }
        current = collapse_and_refill(&mark_matches(&current, &matches), &mut factory, &mut rng);
        iterations += 1;
        assert!(iterations <= 5, "cascade did not settle in 5 iterations");
    }
    assert!(iterations >= 1);
    Ok(())
}

#[test]
fn test_engine_facade_scenario() -> CrushResult<()> {
    let mut engine = MatchEngine::new(EngineConfig::new(12345))?;
    let board = scenario_board()?;

    let swapped = engine.apply_swap(&board, Position::new(3, 3), Position::new(3, 4))?;
    let expected: Vec<Position> = (1..=3).map(|col| Position::new(3, col)).collect();
    assert_eq!(
        engine.detect_matches(&swapped).into_iter().collect::<Vec<_>>(),
        expected
    );

    let outcome = engine.resolve_cascades(&swapped)?;
    assert!(engine.detect_matches(&outcome.board).is_empty());
    assert_eq!(outcome.steps[0].cleared.len(), 3);
    assert!(board.render_eq(&scenario_board()?));
    Ok(())
}

#[test]
fn test_gravity_after_scenario_swap() -> CrushResult<()> {
    let config = EngineConfig::new(1);
    let mut swapped = scenario_board()?;
    swapped.swap(Position::new(3, 3), Position::new(3, 4));
    let matches = find_matches(&swapped, config.min_match_count);

    let mut rng = utils::create_rng(&config);
    let mut factory = CellFactory::new(&config);
    let collapsed = collapse_and_refill(&mark_matches(&swapped, &matches), &mut factory, &mut rng);

    // Columns 1..=3 each drop by one; rows 0..=2 shift down into rows 1..=3.
    for col in 1..=3 {
        for row in 0..3 {
            let above = swapped.get(Position::new(row, col)).map(|c| c.id);
            let below = collapsed.get(Position::new(row + 1, col)).map(|c| c.id);
            assert_eq!(above, below);
        }
        let refill = collapsed.get(Position::new(0, col)).map(|c| c.created_index);
        assert_eq!(refill, Some(1));
    }
    for row in 4..8 {
        for col in 0..8 {
            let pos = Position::new(row, col);
            assert_eq!(swapped.get(pos).map(|c| c.id), collapsed.get(pos).map(|c| c.id));
        }
    }
    Ok(())
}
