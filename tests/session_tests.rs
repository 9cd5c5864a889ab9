//! Game session tests - state machine scenarios through the public API

use blockfall::core::pieces::spawn_anchor;
use blockfall::core::{GameSession, ScriptedSource, SessionEvent};
use blockfall::types::{Command, PieceKind, SessionState, BOARD_HEIGHT};

fn scripted(kinds: &[PieceKind]) -> GameSession {
    GameSession::with_source(Box::new(ScriptedSource::new(kinds.to_vec())))
}

#[test]
fn test_lifecycle_idle_to_running() {
    let mut session = GameSession::new(12345);
    assert_eq!(session.state(), SessionState::Idle);

    session.start();
    assert_eq!(session.state(), SessionState::Running);
    assert!(session.active().is_some());
    assert_eq!(session.lines_cleared(), 0);
}

#[test]
fn test_flat_piece_falls_nineteen_rows_and_locks_on_the_twentieth_tick() {
    let mut session = scripted(&[PieceKind::I]);
    session.start();

    let spawn = session.active().unwrap();
    assert_eq!(spawn.y, BOARD_HEIGHT as i8 - 1);

    for tick in 1..=19 {
        session.gravity_tick();
        let active = session.active().unwrap();
        assert_eq!(active.y, spawn.y - tick, "after tick {}", tick);
        assert!(session.grid().cells().iter().all(|cell| cell.is_none()));
    }

    session.gravity_tick();
    for (dx, _) in spawn.shape() {
        assert!(session.grid().is_occupied(spawn.x + dx, 0));
    }
    // The next piece is already falling
    assert_eq!(session.active().unwrap().y, spawn.y);
}

#[test]
fn test_lock_commits_every_cell_of_the_piece() {
    let mut session = scripted(&[PieceKind::J, PieceKind::T]);
    session.start();
    let piece = session.active().unwrap();

    session.command(Command::HardDrop);

    // The J fell straight down; each of its 4 cells must be committed at
    // the same column, shifted to the floor
    let drop = piece.shape().iter().map(|&(_, dy)| piece.y + dy).min().unwrap();
    for (dx, dy) in piece.shape() {
        let x = piece.x + dx;
        let y = piece.y + dy - drop;
        assert_eq!(session.grid().get(x, y), Ok(Some(PieceKind::J)));
    }
    assert_eq!(session.active().unwrap().kind, PieceKind::T);
}

#[test]
fn test_three_flat_pieces_clear_the_bottom_row() {
    let mut session = scripted(&[PieceKind::I]);
    session.start();

    // Row 0 is 12 wide; three flat I pieces dropped at anchors 1, 5 and 9
    // tile it exactly
    for target_x in [1i8, 5, 9] {
        let active = session.active().unwrap();
        let moves = target_x - active.x;
        for _ in 0..moves.abs() {
            session.command(if moves < 0 {
                Command::MoveLeft
            } else {
                Command::MoveRight
            });
        }
        assert_eq!(session.active().unwrap().x, target_x);
        session.command(Command::HardDrop);
    }

    assert_eq!(session.lines_cleared(), 1);
    assert!(session
        .take_events()
        .contains(&SessionEvent::ScoreChanged(1)));

    // The cleared row left the grid empty before the next piece spawned
    assert!(session.grid().cells().iter().all(|cell| cell.is_none()));
    assert_eq!(session.state(), SessionState::Running);
}

#[test]
fn test_double_pause_toggle_preserves_piece_exactly() {
    let mut session = scripted(&[PieceKind::L]);
    session.start();
    session.command(Command::RotateCw);
    session.command(Command::MoveLeft);
    let before = session.active().unwrap();

    session.command(Command::TogglePause);
    assert_eq!(session.state(), SessionState::Paused);

    // Rejected while paused, never queued
    session.command(Command::MoveRight);
    session.command(Command::RotateCw);
    session.command(Command::SoftDrop);
    session.gravity_tick();

    session.command(Command::TogglePause);
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(session.active().unwrap(), before);
}

#[test]
fn test_pause_is_a_no_op_before_start_and_after_game_over() {
    let mut session = scripted(&[PieceKind::O]);
    session.command(Command::TogglePause);
    assert_eq!(session.state(), SessionState::Idle);

    session.start();
    for _ in 0..9 {
        session.command(Command::HardDrop);
    }
    assert_eq!(session.state(), SessionState::GameOver);

    session.command(Command::TogglePause);
    assert_eq!(session.state(), SessionState::GameOver);
}

#[test]
fn test_stacking_to_the_top_ends_the_game() {
    let mut session = scripted(&[PieceKind::O]);
    session.start();
    session.take_events();

    // O pieces dropped in place stack two rows per drop in columns 7-8;
    // the ninth leaves no room for the next spawn
    for drop in 1..=8 {
        session.command(Command::HardDrop);
        assert_eq!(session.state(), SessionState::Running, "drop {}", drop);
    }
    session.command(Command::HardDrop);

    assert_eq!(session.state(), SessionState::GameOver);
    assert!(session.active().is_none());

    let events = session.take_events();
    assert!(events.contains(&SessionEvent::GameOver));
    assert!(!events
        .iter()
        .any(|event| matches!(event, SessionEvent::ScoreChanged(_))));
}

#[test]
fn test_start_leaves_game_over_and_resets() {
    let mut session = scripted(&[PieceKind::O]);
    session.start();
    for _ in 0..9 {
        session.command(Command::HardDrop);
    }
    assert_eq!(session.state(), SessionState::GameOver);

    session.start();
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(session.lines_cleared(), 0);
    let (x, y) = spawn_anchor(PieceKind::O);
    let active = session.active().unwrap();
    assert_eq!((active.x, active.y), (x, y));

    // Only the fresh spawn exists; the old stack is gone
    assert!(session.grid().cells().iter().all(|cell| cell.is_none()));
}

#[test]
fn test_hard_drop_skips_remaining_ticks() {
    let mut session = scripted(&[PieceKind::S, PieceKind::Z]);
    session.start();

    session.command(Command::HardDrop);

    // One command both locked the S and spawned the Z
    let active = session.active().unwrap();
    assert_eq!(active.kind, PieceKind::Z);
    assert_eq!((active.x, active.y), spawn_anchor(PieceKind::Z));
    assert!(session.grid().cells().iter().any(|cell| cell.is_some()));
}

#[test]
fn test_snapshot_separates_grid_and_active_piece() {
    let mut session = scripted(&[PieceKind::T, PieceKind::I]);
    session.start();
    session.command(Command::HardDrop);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.state, SessionState::Running);
    assert_eq!(snapshot.lines_cleared, 0);

    // Committed T cells carry its palette index
    let t_cells: usize = snapshot
        .cells
        .iter()
        .map(|row| {
            row.iter()
                .filter(|&&cell| cell == PieceKind::T.color_index())
                .count()
        })
        .sum();
    assert_eq!(t_cells, 4);

    // The falling I is reported separately, not painted into the grid
    let active = snapshot.active.unwrap();
    assert_eq!(active.kind, PieceKind::I);
    let i_cells: usize = snapshot
        .cells
        .iter()
        .map(|row| {
            row.iter()
                .filter(|&&cell| cell == PieceKind::I.color_index())
                .count()
        })
        .sum();
    assert_eq!(i_cells, 0);
}
