#[cfg(test)]
mod tests {
    use std::num::NonZero;
    use std::str::FromStr;

    use itertools::Itertools;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use strum::VariantArray;

    use crate::builder::{BoardBuilder, BuilderInvalidReason};
    use crate::{Board, Direction, EngineError, Location, Path, PieceType, Rotation, Session, Settings, SolverFailure, TestOutcome, Traversal, TraversalState, TraversalStep};

    fn corridor() -> Board {
        BoardBuilder::with_size(NonZero::new(6).unwrap())
            .fill_row(3, PieceType::StraightH, Rotation::ZERO)
            .build()
            .unwrap()
    }

    fn corridor_path() -> Vec<Location> {
        (0..6).map(|col| Location(3, col)).collect_vec()
    }

    #[test]
    fn rotation_has_order_four() {
        for piece in PieceType::VARIANTS {
            let mask = piece.connections();
            assert_eq!(mask.rotated(0), mask);
            assert_eq!(mask.rotated(4), mask);
            assert_eq!(mask.rotated(1).rotated(3), mask);
            assert_eq!(crate::rotate(crate::rotate(mask, 2), 2), mask);

            for turns in 0..12 {
                assert_eq!(mask.rotated(turns), mask.rotated_stepwise(turns), "{} by {}", piece, turns);
                assert_eq!(mask.rotated(turns).count(), mask.count(), "{} by {}", piece, turns);
            }
        }
    }

    #[test]
    fn quarter_turn_is_clockwise() {
        let turn = |piece: PieceType| piece.connections().rotated(1);

        assert_eq!(turn(PieceType::StraightH), PieceType::StraightV.connections());
        assert_eq!(turn(PieceType::StraightV), PieceType::StraightH.connections());
        assert_eq!(turn(PieceType::CornerNe), PieceType::CornerSe.connections());
        assert_eq!(turn(PieceType::CornerSe), PieceType::CornerSw.connections());
        assert_eq!(turn(PieceType::CornerSw), PieceType::CornerNw.connections());
        assert_eq!(turn(PieceType::CornerNw), PieceType::CornerNe.connections());
        assert_eq!(turn(PieceType::TShapeN), PieceType::TShapeE.connections());
        assert_eq!(turn(PieceType::TShapeE), PieceType::TShapeS.connections());
        assert_eq!(turn(PieceType::TShapeS), PieceType::TShapeW.connections());
        assert_eq!(turn(PieceType::TShapeW), PieceType::TShapeN.connections());
        assert_eq!(turn(PieceType::Cross), PieceType::Cross.connections());
    }

    #[test]
    fn catalog() {
        assert_eq!(PieceType::VARIANTS.len(), 11);
        assert_eq!(PieceType::VARIANTS.iter().map(|p| p.connections().count()).collect_vec(), vec![2, 2, 2, 2, 2, 2, 4, 3, 3, 3, 3]);

        assert_eq!(PieceType::StraightH.connections().as_array(), [false, true, false, true]);
        assert_eq!(crate::connections_of(PieceType::CornerNw).as_array(), [true, false, false, true]);
        assert_eq!(PieceType::TShapeS.connections().as_array(), [false, true, true, true]);

        assert_eq!(PieceType::StraightH.name(), "straight_h");
        assert_eq!(PieceType::TShapeW.to_string(), "t_shape_w");
        assert_eq!(PieceType::from_str("corner_se").unwrap(), PieceType::CornerSe);
        assert!(PieceType::from_str("elbow").is_err());
    }

    #[test]
    fn glyphs_and_bits() {
        assert_eq!(PieceType::VARIANTS.iter().map(|p| p.connections().glyph()).collect::<String>(), "─│└┌┐┘┼┴├┬┤");
        assert_eq!(PieceType::StraightH.connections().bits(), 0b1010);
        assert_eq!(PieceType::Cross.connections().bits(), 0b1111);
        assert_eq!(PieceType::CornerNe.connections().bits(), 0b0011);

        let corner = PieceType::CornerNe.connections();
        assert!(corner[Direction::North] && corner[Direction::East]);
        assert_eq!(corner.wired().collect_vec(), vec![Direction::North, Direction::East]);
    }

    #[test]
    fn generated_terminals_are_fixed() {
        for size in 1..=9 {
            for seed in 0..20 {
                let board = Board::generate(NonZero::new(size).unwrap(), &mut StdRng::seed_from_u64(seed));
                assert_eq!(board.entry(), Location(size / 2, 0));
                assert_eq!(board.exit(), Location(size / 2, size - 1));

                for terminal in [board.entry(), board.exit()] {
                    let cell = board.get(terminal).unwrap();
                    assert_eq!(cell.piece(), PieceType::StraightH);
                    assert_eq!(cell.rotation(), Rotation::ZERO);
                    assert_eq!(board.connections_at(terminal).unwrap().as_array(), [false, true, false, true]);
                }
            }
        }
    }

    #[test]
    fn generation_is_repeatable() {
        let size = NonZero::new(6).unwrap();
        let a = Board::generate(size, &mut StdRng::seed_from_u64(42));
        let b = Board::generate(size, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_eq!(format!("{}", a), format!("{}", b));

        let boards = (0..10).map(|seed| Board::generate(size, &mut StdRng::seed_from_u64(seed)).to_string()).unique().count();
        assert!(boards > 1);
    }

    #[test]
    fn four_rotations_are_identity() {
        let mut board = Board::generate(NonZero::new(6).unwrap(), &mut StdRng::seed_from_u64(7));
        let location = Location(0, 0);
        let before = *board.get(location).unwrap();

        board.rotate_cell(location).unwrap();
        let once = *board.get(location).unwrap();
        assert_eq!(once.piece(), before.piece());
        assert_eq!(once.rotation(), before.rotation().turned());
        assert_eq!(once.connections(), before.connections().rotated(1));

        for _ in 0..3 {
            board.rotate_cell(location).unwrap();
        }
        assert_eq!(*board.get(location).unwrap(), before);
    }

    #[test]
    fn rejected_rotations_change_nothing() {
        let mut board = corridor();
        let before = board.clone();

        assert_eq!(board.rotate_cell(Location(6, 0)), Err(EngineError::OutOfRange { location: Location(6, 0), size: 6 }));
        assert_eq!(board.rotate_cell(Location(0, 17)), Err(EngineError::OutOfRange { location: Location(0, 17), size: 6 }));
        assert_eq!(board.rotate_cell(Location(3, 0)), Err(EngineError::FixedCell(Location(3, 0))));
        assert_eq!(board.rotate_cell(Location(3, 5)), Err(EngineError::FixedCell(Location(3, 5))));
        assert_eq!(board.connections_at(Location(2, 6)), Err(EngineError::OutOfRange { location: Location(2, 6), size: 6 }));
        assert_eq!(board, before);

        assert_eq!(EngineError::OutOfRange { location: Location(6, 0), size: 6 }.to_string(), "location (6, 0) is outside the 6x6 board");
    }

    #[test]
    fn builder_layout() {
        let board = corridor();
        assert_eq!(format!("{}", board), "││││││
││││││
││││││
──────
││││││
││││││
");
    }

    #[test]
    fn builder_invalid() {
        let mut builder = BoardBuilder::with_size(NonZero::new(4).unwrap());
        builder.place(Location(2, 0), PieceType::Cross, Rotation::ZERO);
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::FixedCell]));

        // once invalid, nothing more is recorded
        builder.place(Location(9, 9), PieceType::Cross, Rotation::ZERO);
        assert_eq!(builder.build().unwrap_err(), &vec![BuilderInvalidReason::FixedCell]);

        let mut builder = BoardBuilder::with_size(NonZero::new(4).unwrap());
        builder.place(Location(0, 4), PieceType::Cross, Rotation::ZERO);
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::OutOfBounds]));

        let mut builder = BoardBuilder::with_size(NonZero::new(4).unwrap());
        builder.fill_row(4, PieceType::Cross, Rotation::ZERO);
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::OutOfBounds]));
    }

    #[test]
    fn builder_randomize_matches_generate() {
        let size = NonZero::new(5).unwrap();
        let built = BoardBuilder::with_size(size)
            .randomize(&mut StdRng::seed_from_u64(3))
            .place(Location(0, 0), PieceType::Cross, Rotation::new(5))
            .build()
            .unwrap();

        let generated = Board::generate(size, &mut StdRng::seed_from_u64(3));
        assert_eq!(built.cells().skip(1).collect_vec(), generated.cells().skip(1).collect_vec());
        assert_eq!(built.get(Location(0, 0)).unwrap().piece(), PieceType::Cross);
        assert_eq!(built.get(Location(0, 0)).unwrap().rotation(), Rotation::new(1));
    }

    #[test]
    fn straight_corridor() {
        let board = corridor();
        assert_eq!(board.find_path().unwrap().locations(), corridor_path().as_slice());
    }

    #[test]
    fn blocked_corridor() {
        let board = BoardBuilder::with_size(NonZero::new(6).unwrap())
            .fill_row(3, PieceType::StraightH, Rotation::ZERO)
            .place(Location(3, 2), PieceType::StraightV, Rotation::ZERO)
            .build()
            .unwrap();

        assert_eq!(board.find_path(), Err(SolverFailure::NotFound));

        // the same piece turned once more conducts again
        let mut board = board;
        board.rotate_cell(Location(3, 2)).unwrap();
        assert_eq!(board.find_path().unwrap().len(), 6);
    }

    #[test]
    fn nothing_accepts_the_entry() {
        let board = BoardBuilder::with_size(NonZero::new(6).unwrap()).build().unwrap();
        assert_eq!(board.find_path(), Err(SolverFailure::NotFound));
        assert_eq!(SolverFailure::NotFound.to_string(), "no wired path leads from the entry to the exit");
    }

    #[test]
    fn follows_a_bend() {
        let board = BoardBuilder::with_size(NonZero::new(5).unwrap())
            .place(Location(2, 1), PieceType::CornerNw, Rotation::ZERO)
            .place(Location(1, 1), PieceType::CornerSe, Rotation::ZERO)
            .place(Location(1, 2), PieceType::StraightH, Rotation::ZERO)
            // a corner_ne turned twice is a corner_sw
            .place(Location(1, 3), PieceType::CornerNe, Rotation::new(2))
            .place(Location(2, 3), PieceType::CornerNe, Rotation::ZERO)
            .build()
            .unwrap();

        assert_eq!(format!("{}", board), "│││││
│┌─┐│
─┘│└─
│││││
│││││
");

        let path = board.find_path().unwrap();
        assert_eq!(path.locations(), &[
            Location(2, 0), Location(2, 1), Location(1, 1), Location(1, 2), Location(1, 3), Location(2, 3), Location(2, 4),
        ]);
        assert_eq!(path.to_string(), "(2, 0) -> (2, 1) -> (1, 1) -> (1, 2) -> (1, 3) -> (2, 3) -> (2, 4)");
    }

    #[test]
    fn prefers_the_shortest_route() {
        // two routes around the blocked middle; the upper one is two cells shorter
        let board = BoardBuilder::with_size(NonZero::new(5).unwrap())
            .place(Location(2, 1), PieceType::TShapeW, Rotation::ZERO)
            .place(Location(1, 1), PieceType::CornerSe, Rotation::ZERO)
            .place(Location(1, 2), PieceType::StraightH, Rotation::ZERO)
            .place(Location(1, 3), PieceType::CornerSw, Rotation::ZERO)
            .place(Location(2, 3), PieceType::TShapeE, Rotation::ZERO)
            .place(Location(3, 1), PieceType::StraightV, Rotation::ZERO)
            .place(Location(4, 1), PieceType::CornerNe, Rotation::ZERO)
            .place(Location(4, 2), PieceType::StraightH, Rotation::ZERO)
            .place(Location(4, 3), PieceType::CornerNw, Rotation::ZERO)
            .place(Location(3, 3), PieceType::StraightV, Rotation::ZERO)
            .build()
            .unwrap();

        assert_eq!(format!("{}", board), "│││││
│┌─┐│
─┤│├─
│││││
│└─┘│
");

        let path = board.find_path().unwrap();
        assert_eq!(path.len(), 7);
        assert_eq!(path.get(2), Some(Location(1, 1)));
    }

    #[test]
    fn exit_reached_from_above() {
        // the exit has no wire on top, but reaching it is enough
        let board = BoardBuilder::with_size(NonZero::new(3).unwrap())
            .place(Location(1, 1), PieceType::CornerNw, Rotation::ZERO)
            .place(Location(0, 1), PieceType::CornerSe, Rotation::ZERO)
            .place(Location(0, 2), PieceType::CornerSw, Rotation::ZERO)
            .build()
            .unwrap();

        assert_eq!(format!("{}", board), "│┌┐
─┘─
│││
");
        let path = board.find_path().unwrap();
        assert_eq!(path.locations(), &[Location(1, 0), Location(1, 1), Location(0, 1), Location(0, 2), Location(1, 2)]);
        assert!(!board.connections_at(board.exit()).unwrap().has(Direction::North));
    }

    #[test]
    fn single_cell_board() {
        let board = Board::generate(NonZero::new(1).unwrap(), &mut StdRng::seed_from_u64(0));
        assert_eq!(board.entry(), board.exit());
        assert_eq!(board.find_path().unwrap().locations(), &[Location(0, 0)]);
    }

    #[test]
    fn found_paths_are_wired_throughout() {
        let size = NonZero::new(6).unwrap();
        let mut found = 0;

        for seed in 0..300 {
            let board = Board::generate(size, &mut StdRng::seed_from_u64(seed));
            let Ok(path) = board.find_path() else { continue };
            found += 1;

            assert_eq!(path.first(), Some(board.entry()));
            assert_eq!(path.last(), Some(board.exit()));

            for (a, b) in path.iter().tuple_windows() {
                assert!(a.is_adjacent(b), "{} and {} on {}", a, b, path);
                let direction = Direction::direction_to(a, b).unwrap();
                assert!(board.connections_at(a).unwrap().has(direction));
                // the exit takes current from any side
                if b != board.exit() {
                    assert!(board.connections_at(b).unwrap().has(direction.invert()));
                }
            }
        }

        // with the exit row fixed the odds are poor, but not that poor
        assert!(found > 0);
    }

    #[test]
    fn wiring_graph() {
        let board = corridor();
        let graph = board.wiring();

        assert_eq!(graph.node_count(), 36);
        // five links along row 3 and three per column between the straight_v runs
        assert_eq!(graph.edge_count(), 5 + 3 * 6);
        assert_eq!(graph.edge_weight(Location(3, 0), Location(3, 1)), Some(&Direction::East));
        assert_eq!(graph.edge_weight(Location(0, 2), Location(1, 2)), Some(&Direction::South));
        assert!(!graph.contains_edge(Location(2, 2), Location(3, 2)));

        assert_eq!(board.energized().into_iter().sorted().collect_vec(), corridor_path());

        let blank = BoardBuilder::with_size(NonZero::new(6).unwrap()).build().unwrap();
        assert_eq!(blank.energized().into_iter().collect_vec(), vec![Location(3, 0)]);
    }

    #[test]
    fn traversal_steps() {
        let mut traversal = Traversal::new();
        assert_eq!(traversal.advance(), TraversalStep::Idle);
        assert_eq!(traversal.cancel(), Err(EngineError::InvalidState));

        traversal.start(Path::from(corridor_path()));
        assert_eq!(traversal.frames().count(), 6);

        for index in 0..4 {
            assert_eq!(traversal.advance(), TraversalStep::Frame { index, location: Location(3, index) });
        }
        assert_eq!(traversal.cursor(), Some(Location(3, 3)));
        assert_eq!(traversal.frames().collect_vec(), vec![Location(3, 4), Location(3, 5)]);

        assert_eq!(traversal.advance(), TraversalStep::Frame { index: 4, location: Location(3, 4) });
        assert!(traversal.is_running());
        assert_eq!(traversal.advance(), TraversalStep::Delivered { location: Location(3, 5) });
        assert!(traversal.is_delivered());
        assert_eq!(traversal.advance(), TraversalStep::Delivered { location: Location(3, 5) });
        assert_eq!(traversal.frames().count(), 0);

        traversal.restart().unwrap();
        assert_eq!(traversal.cursor(), None);
        assert_eq!(traversal.advance(), TraversalStep::Frame { index: 0, location: Location(3, 0) });

        assert_eq!(traversal.cancel(), Ok(()));
        assert_eq!(traversal.state(), &TraversalState::Idle);
        assert_eq!(traversal.cursor(), None);
        assert_eq!(traversal.restart(), Err(EngineError::InvalidState));
        assert_eq!(traversal.advance(), TraversalStep::Idle);
    }

    #[test]
    fn traversal_of_a_single_cell() {
        let mut traversal = Traversal::new();
        traversal.start(Path::from(vec![Location(0, 0)]));
        assert_eq!(traversal.advance(), TraversalStep::Delivered { location: Location(0, 0) });

        traversal.start(Path::from(vec![]));
        assert_eq!(traversal.state(), &TraversalState::Idle);
    }

    #[test]
    fn session_round() {
        let mut session = Session::with_board(Settings::default().seeded(11), corridor());
        assert_eq!(session.entry(), Location(3, 0));
        assert_eq!(session.exit(), Location(3, 5));

        let outcome = session.test_circuit();
        assert_eq!(outcome, TestOutcome::PathFound(Path::from(corridor_path())));
        assert_eq!(outcome.to_string(), "Circuit complete! Data flowing...");

        for index in 0..4 {
            assert_eq!(session.advance_traversal(), TraversalStep::Frame { index, location: Location(3, index) });
        }
        assert_eq!(session.advance_traversal(), TraversalStep::Frame { index: 4, location: Location(3, 4) });
        let done = session.advance_traversal();
        assert_eq!(done, TraversalStep::Delivered { location: Location(3, 5) });
        assert_eq!(done.to_string(), "Data packet delivered successfully!");

        // a failed command leaves the delivered packet alone
        assert_eq!(session.rotate_cell(Location(3, 5)).unwrap_err(), EngineError::FixedCell(Location(3, 5)));
        assert!(session.traversal().is_delivered());

        session.rotate_cell(Location(3, 2)).unwrap();
        assert_eq!(session.traversal().state(), &TraversalState::Idle);
        assert_eq!(session.advance_traversal(), TraversalStep::Idle);
        assert_eq!(session.cancel_traversal(), Err(EngineError::InvalidState));

        let outcome = session.test_circuit();
        assert_eq!(outcome, TestOutcome::PathNotFound);
        assert_eq!(outcome.to_string(), "Circuit incomplete! Rotate pieces to connect.");
        assert_eq!(session.advance_traversal(), TraversalStep::Idle);
    }

    #[test]
    fn session_commands_cancel_the_packet() {
        let mut session = Session::with_board(Settings::default(), corridor());
        session.test_circuit();
        session.advance_traversal();
        assert!(session.traversal().is_running());

        // retesting starts over
        session.test_circuit();
        assert_eq!(session.advance_traversal(), TraversalStep::Frame { index: 0, location: Location(3, 0) });

        session.generate(Some(5));
        assert_eq!(session.traversal().state(), &TraversalState::Idle);

        session.test_circuit();
        session.rotate_cell(Location(0, 0)).unwrap();
        assert_eq!(session.traversal().state(), &TraversalState::Idle);

        session.test_circuit();
        assert_eq!(session.cancel_traversal().is_ok(), session.board().find_path().is_ok());
        assert_eq!(session.traversal().state(), &TraversalState::Idle);
    }

    #[test]
    fn session_generation() {
        let mut a = Session::new(Settings::with_size(NonZero::new(7).unwrap()).seeded(99));
        let mut b = Session::new(Settings::with_size(NonZero::new(7).unwrap()).seeded(99));
        assert_eq!(a.snapshot(), b.snapshot());

        // continuing the stream stays in lockstep
        assert_eq!(a.generate(None), b.generate(None));
        assert_eq!(a.generate(Some(4)).clone(), Board::generate(NonZero::new(7).unwrap(), &mut StdRng::seed_from_u64(4)));
        assert_eq!(a.board().size().get(), 7);
        assert_eq!(a.settings().seed, Some(99));
    }

    #[test]
    fn prepared_board_keeps_the_random_stream() {
        let settings = Settings::default().seeded(11);
        let mut prepared = Session::with_board(settings, corridor());
        assert_eq!(prepared.board(), &corridor());

        // nothing is drawn until the first new board
        let first = Session::new(settings);
        assert_eq!(prepared.generate(None), first.board());
    }

    #[cfg(feature = "wasm")]
    #[test]
    fn game_energized_follows_rotations() {
        let mut game = crate::wasm::Game::from_session(Session::with_board(Settings::default(), corridor()));
        assert_eq!(game.energized_cells(), &[3, 0, 3, 1, 3, 2, 3, 3, 3, 4, 3, 5]);

        assert!(game.rotate(3, 2).is_ok());
        assert_eq!(game.energized_cells(), &[3, 0, 3, 1]);

        game.generate(Some(3));
        let expected = Board::generate(NonZero::new(6).unwrap(), &mut StdRng::seed_from_u64(3))
            .energized()
            .into_iter()
            .sorted()
            .flat_map(|l| [l.row() as u32, l.col() as u32])
            .collect_vec();
        assert_eq!(game.energized_cells(), expected.as_slice());
    }

    #[test]
    fn snapshot_contents() {
        let session = Session::with_board(Settings::default(), corridor());
        let snapshot = session.snapshot();

        assert_eq!(snapshot.size.get(), 6);
        assert_eq!(snapshot.cells.len(), 36);
        assert_eq!(snapshot.entry, Location(3, 0));
        assert_eq!(snapshot.exit, Location(3, 5));
        assert!(snapshot.cells.iter().map(|view| view.location).tuple_windows().all(|(a, b)| a < b));

        let entry = snapshot.cells[3 * 6];
        assert_eq!(entry.location, Location(3, 0));
        assert_eq!(entry.piece, PieceType::StraightH);
        assert_eq!(entry.rotation, Rotation::ZERO);
        assert_eq!(entry.connections.bits(), 0b1010);

        let other = snapshot.cells[0];
        assert_eq!(other.piece, PieceType::StraightV);
        assert_eq!(other.connections.bits(), 0b0101);
    }
}
