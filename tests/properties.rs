//! Property tests for generation, validation and cascades

use proptest::prelude::*;
use tilecrush::generation::utils;
use tilecrush::{
    collapse_and_refill, enumerate_legal_moves, find_matches, has_legal_moves, resolve_cascades,
    satisfies_raster_rule, would_match, Board, BoardGenerator, Cell, CellFactory, EngineConfig,
    Generator, Position, TileKind,
};

/// Square board of `size` with kinds drawn from the first `kinds` tile kinds.
fn board_strategy(size: usize, kinds: usize) -> impl Strategy<Value = Board> {
    prop::collection::vec(0..kinds, size * size).prop_map(move |indices| {
        let rows = indices
            .chunks(size)
            .map(|chunk| {
                chunk
                    .iter()
                    .map(|index| Cell::new(TileKind::ALL[*index], 1))
                    .collect()
            })
            .collect();
        Board::from_rows(rows)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_boards_are_settled_and_playable(
        seed in any::<u64>(),
        size in 5usize..=8,
        kinds in 4u8..=6,
    ) {
        let config = EngineConfig {
            seed,
            grid_size: size,
            tile_kinds: kinds,
            ..EngineConfig::default()
        };
        let mut rng = utils::create_rng(&config);
        let board = BoardGenerator::new().generate(&config, &mut rng).unwrap();

        prop_assert_eq!(board.size(), size);
        prop_assert!(find_matches(&board, 3).is_empty());
        prop_assert!(satisfies_raster_rule(&board, 3));
        prop_assert!(has_legal_moves(&board, 3));
        prop_assert!(board.cells().all(|(_, cell)| (cell.kind as u8) < kinds));
    }

    #[test]
    fn move_validation_leaves_board_untouched(
        board in board_strategy(6, 4),
        row in 0i32..6,
        col in 0i32..5,
    ) {
        let before = board.clone();
        let _ = would_match(&board, Position::new(row, col), Position::new(row, col + 1), 3);
        let moves = enumerate_legal_moves(&board, 3);
        prop_assert_eq!(&board, &before);

        for candidate in moves {
            let mut swapped = board.clone();
            swapped.swap(candidate.from, candidate.to);
            prop_assert!(!find_matches(&swapped, 3).is_empty());
        }
    }

    #[test]
    fn cascades_always_settle(board in board_strategy(7, 4), seed in any::<u64>()) {
        let config = EngineConfig::new(seed);
        let mut rng = utils::create_rng(&config);
        let mut factory = CellFactory::new(&EngineConfig { tile_kinds: 4, ..config });

        let outcome = resolve_cascades(&board, 3, 64, &mut factory, &mut rng).unwrap();
        prop_assert!(find_matches(&outcome.board, 3).is_empty());
        prop_assert_eq!(outcome.board.matched_count(), 0);
        prop_assert_eq!(outcome.combo() == 0, find_matches(&board, 3).is_empty());
    }

    #[test]
    fn gravity_keeps_survivor_order(
        board in board_strategy(6, 5),
        flags in prop::collection::vec(any::<bool>(), 36),
        seed in any::<u64>(),
    ) {
        let mut marked = board.clone();
        for (index, flagged) in flags.iter().enumerate() {
            if *flagged {
                marked.mark_matched(Position::new(index as i32 / 6, index as i32 % 6));
            }
        }

        let config = EngineConfig::new(seed);
        let mut rng = utils::create_rng(&config);
        let mut factory = CellFactory::new(&config);
        let collapsed = collapse_and_refill(&marked, &mut factory, &mut rng);

        prop_assert_eq!(collapsed.matched_count(), 0);
        for col in 0..6 {
            let survivors: Vec<_> = (0..6)
                .filter_map(|row| marked.get(Position::new(row, col)))
                .filter(|cell| !cell.is_matched)
                .map(|cell| cell.id)
                .collect();
            let vacancies = 6 - survivors.len();

            let bottom: Vec<_> = (vacancies as i32..6)
                .filter_map(|row| collapsed.get(Position::new(row, col)))
                .map(|cell| cell.id)
                .collect();
            prop_assert_eq!(bottom, survivors);

            for row in 0..vacancies as i32 {
                let cell = collapsed.get(Position::new(row, col)).unwrap();
                prop_assert_eq!(cell.created_index, factory.pass);
            }
        }
    }
}
