//! Bot tests - search results, tie-breaks and engine integration

use tetrecs::core::bot::{best_placement, fitness, think};
use tetrecs::core::{GameEngine, Grid, Piece};
use tetrecs::types::{GameAction, PieceKind, PieceSlot};

#[test]
fn test_bot_completes_row() {
    let mut grid = Grid::new(5, 5);
    for x in 0..5 {
        if x != 3 {
            grid.set(x, 2, 1);
        }
    }
    let mv = think(&grid, &Piece::new(PieceKind::Dot), &Piece::new(PieceKind::Dot)).unwrap();
    assert_eq!((mv.x, mv.y), (3, 2));
    assert_eq!(mv.slot, PieceSlot::Current);
}

#[test]
fn test_bot_swaps_when_next_is_better() {
    let mut grid = Grid::new(5, 5);
    // Leave a single hole at (0, 0) in an otherwise full first row.
    for x in 1..5 {
        grid.set(x, 0, 1);
    }
    // Block every spot a plus could use.
    for y in 1..5 {
        for x in 0..5 {
            if (x + y) % 2 == 0 {
                grid.set(x, y, 1);
            }
        }
    }
    assert!(best_placement(&grid, &Piece::new(PieceKind::Plus)).is_none());

    let mv = think(&grid, &Piece::new(PieceKind::Plus), &Piece::new(PieceKind::Dot)).unwrap();
    assert_eq!(mv.slot, PieceSlot::Next);
}

#[test]
fn test_last_found_wins_ties() {
    // Equal fitness replaces the best so far: nothing scanned after the
    // winner (x, then y, then rotation) may reach its fitness.
    let grid = Grid::new(5, 5);
    for kind in [PieceKind::Dot, PieceKind::Line, PieceKind::Square, PieceKind::Double] {
        let piece = Piece::new(kind);
        let best = best_placement(&grid, &piece).unwrap();

        for x in 0..5 {
            for y in 0..5 {
                for r in 0..4u8 {
                    let rotated = piece.rotated(r);
                    if !grid.can_place(&rotated, x, y) {
                        continue;
                    }
                    let f = fitness(&grid, &rotated, x, y);
                    assert!(f <= best.fitness);
                    if (x, y, r) > (best.x, best.y, best.rotations) {
                        assert!(f < best.fitness, "{:?} ({}, {}, {}) ties but was scanned later", kind, x, y, r);
                    }
                }
            }
        }
    }

    // All four dot orientations are identical, so the last one wins.
    let dot = best_placement(&grid, &Piece::new(PieceKind::Dot)).unwrap();
    assert_eq!((dot.x, dot.y, dot.rotations), (3, 3, 3));
}

#[test]
fn test_bot_move_uses_rotation() {
    let mut grid = Grid::new(3, 3);
    // Only the middle column is free.
    for y in 0..3 {
        grid.set(0, y, 1);
        grid.set(2, y, 1);
    }
    let line = Piece::new(PieceKind::Line);
    let best = best_placement(&grid, &line).unwrap();
    assert_eq!((best.x, best.y), (1, 1));
    assert_eq!(best.rotations % 2, 1);
}

#[test]
fn test_engine_applies_bot_move() {
    let mut engine = GameEngine::new(3, 3, 1);
    engine.start();
    for y in 0..3 {
        engine.grid_mut().set(0, y, 1);
        engine.grid_mut().set(2, y, 1);
    }
    engine.set_piece(PieceSlot::Current, Piece::new(PieceKind::Line));
    engine.set_piece(PieceSlot::Next, Piece::new(PieceKind::X));

    assert!(engine.apply_action(GameAction::InvokeBot));
    // The vertical line filled the middle column, which cleared everything.
    assert_eq!(engine.moves(), 1);
    assert_eq!(engine.grid().filled_count(), 0);
    assert!(engine.score() > 0);
}

#[test]
fn test_bot_gives_up_when_nothing_fits() {
    let mut engine = GameEngine::new(3, 3, 1);
    engine.start();
    for y in 0..3 {
        for x in 0..3 {
            engine.grid_mut().set(x, y, 1);
        }
    }
    let before = engine.snapshot();
    assert!(!engine.play_bot());
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn test_bot_game_is_reproducible() {
    let play = || {
        let mut engine = GameEngine::new(5, 5, 2024);
        engine.start();
        for _ in 0..40 {
            if !engine.play_bot() {
                break;
            }
        }
        (engine.score(), engine.moves(), engine.grid().cells().to_vec())
    };
    assert_eq!(play(), play());
}
