//! Session module - the step-driven game state machine
//!
//! A [`Session`] owns the board, the active and next pieces, score and level. The
//! front-end calls [`Session::step`] once per input/tick cycle; everything that
//! happens in a step (move, rollback, landing, line clears, respawn, game over)
//! completes before it returns, so callers never observe a half-applied step.

use log::{debug, info, trace};
use thiserror::Error;

use crate::board::Board;
use crate::geometry::{Coord, CATALOG};
use crate::piece::Piece;
use crate::progression::{force_level_up, level_after_score, tick_interval};
use crate::rng::{RandomSource, SimpleRng};
use crate::snapshot::GameSnapshot;
use crate::types::{Color, InputEvent, ShapeKind, MAX_BOARD_SIDE, SPAWN_POSITION};

/// Reasons a session cannot be built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("board size {columns}x{rows} is outside 1..={max} on some side")]
    InvalidDimensions { columns: u16, rows: u16, max: u16 },

    #[error("spawn point ({x}, {y}) lies outside a {columns}x{rows} board")]
    SpawnOutOfBounds {
        x: i16,
        y: i16,
        columns: u16,
        rows: u16,
    },

    #[error("{kind:?} piece spawned at ({x}, {y}) does not fit on a {columns}x{rows} board")]
    SpawnDoesNotFit {
        kind: ShapeKind,
        x: i16,
        y: i16,
        columns: u16,
        rows: u16,
    },
}

/// What a single step did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    /// The step handled a real event; the renderer should redraw
    pub redraw: bool,
    /// The active piece was stamped into the board this step
    pub landed: bool,
    /// Rows removed by the landing (0 when nothing landed)
    pub lines_cleared: u32,
    /// The session is over; no further step changes anything
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Session<R = SimpleRng> {
    board: Board,
    active: Piece,
    next: Piece,
    spawn: Coord,
    rng: R,
    score: u32,
    level: u32,
    lines: u32,
    idle_ticks: u32,
    steps: u64,
    game_over: bool,
}

impl Session<SimpleRng> {
    /// The 10x20 reference game with spawn at (5, 2), seeded LCG
    pub fn standard(seed: u32) -> Self {
        let (x, y) = SPAWN_POSITION;
        Self::assemble(Board::standard(), Coord::new(x, y), SimpleRng::new(seed))
    }
}

impl<R: RandomSource> Session<R> {
    /// Create a session on an empty `columns x rows` board
    ///
    /// Every catalog shape must fit at `spawn` in its spawn orientation, otherwise
    /// the very first piece could be born colliding.
    pub fn new(columns: u16, rows: u16, spawn: Coord, rng: R) -> Result<Self, SessionError> {
        let side_ok = |v: u16| (1..=MAX_BOARD_SIDE).contains(&v);
        if !side_ok(columns) || !side_ok(rows) {
            return Err(SessionError::InvalidDimensions {
                columns,
                rows,
                max: MAX_BOARD_SIDE,
            });
        }

        // Catalog offsets stay within two cells of the origin, so an in-bounds
        // origin keeps every probe cell far from i16 overflow.
        let board = Board::new(columns, rows);
        if board.is_out_of_bounds(spawn.x, spawn.y) {
            return Err(SessionError::SpawnOutOfBounds {
                x: spawn.x,
                y: spawn.y,
                columns,
                rows,
            });
        }

        for shape in CATALOG.iter() {
            let probe = Piece::new(shape.kind, spawn, Color::from_index(0));
            if board.is_colliding(&probe) {
                return Err(SessionError::SpawnDoesNotFit {
                    kind: shape.kind,
                    x: spawn.x,
                    y: spawn.y,
                    columns,
                    rows,
                });
            }
        }

        Ok(Self::assemble(board, spawn, rng))
    }

    fn assemble(mut board: Board, spawn: Coord, mut rng: R) -> Self {
        board.clear();
        let active = Piece::spawn(&mut rng, spawn);
        let next = Piece::spawn(&mut rng, spawn);
        debug!(
            "session start: {}x{} board, first {:?}, next {:?}",
            board.width(),
            board.height(),
            active.kind,
            next.kind
        );

        Self {
            board,
            active,
            next,
            spawn,
            rng,
            score: 0,
            level: 0,
            lines: 0,
            idle_ticks: 0,
            steps: 0,
            game_over: false,
        }
    }

    /// Advance the game by one step
    ///
    /// An idle step (`InputEvent::None`) turns into a soft drop once the idle
    /// counter passes the current level's tick interval. Blocked moves and
    /// rotations are dropped silently; a blocked soft drop lands the piece.
    pub fn step(&mut self, event: InputEvent) -> StepOutcome {
        if self.game_over {
            return StepOutcome {
                game_over: true,
                ..StepOutcome::default()
            };
        }

        let mut event = event;
        if event.is_none() && self.idle_ticks > tick_interval(self.level) {
            trace!("gravity after {} idle steps", self.idle_ticks);
            self.idle_ticks = 0;
            event = InputEvent::SoftDrop;
        }

        // Work on a copy; the untouched `self.active` is the rollback state.
        let mut working = self.active;
        match event {
            InputEvent::Rotate => working.rotate_clockwise(),
            InputEvent::RotateCounterclockwise => working.rotate_counterclockwise(),
            InputEvent::SoftDrop => working = working.shifted(0, 1),
            InputEvent::MoveLeft => working = working.shifted(-1, 0),
            InputEvent::MoveRight => working = working.shifted(1, 0),
            InputEvent::ForceLevelUp => self.raise_level_by_command(),
            InputEvent::None | InputEvent::Quit => {}
        }

        let mut outcome = StepOutcome::default();
        if !self.board.is_colliding(&working) {
            self.active = working;
        } else if event == InputEvent::SoftDrop {
            outcome.landed = true;
            outcome.lines_cleared = self.land();
        }

        outcome.redraw = !event.is_none();
        outcome.game_over = self.game_over;
        self.idle_ticks = self.idle_ticks.saturating_add(1);
        self.steps += 1;
        outcome
    }

    /// Stamp the active piece, clear rows, score, and bring in the next piece
    fn land(&mut self) -> u32 {
        self.board.stamp(&self.active);
        let cleared = self.board.clear_full_rows();

        self.lines += cleared;
        self.score = self.score.saturating_add(cleared);
        let level = level_after_score(self.level, self.score);
        if level != self.level {
            info!("level {} reached at score {}", level, self.score);
            self.level = level;
        }

        debug!(
            "{:?} landed at ({}, {}), {} rows cleared, score {}",
            self.active.kind, self.active.origin.x, self.active.origin.y, cleared, self.score
        );

        let incoming = Piece::spawn(&mut self.rng, self.spawn);
        self.active = std::mem::replace(&mut self.next, incoming).placed_at(self.spawn);

        if self.board.is_colliding(&self.active) {
            self.game_over = true;
            info!(
                "game over: score {}, level {}, {} lines",
                self.score, self.level, self.lines
            );
        }

        cleared
    }

    fn raise_level_by_command(&mut self) {
        let level = force_level_up(self.level);
        if level != self.level {
            info!("level {} forced", level);
            self.level = level;
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn spawn(&self) -> Coord {
        self.spawn
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn idle_ticks(&self) -> u32 {
        self.idle_ticks
    }

    /// Steps processed so far (steps after game over are not counted)
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        self.board.write_cells(&mut out.board);
        out.active = self.active;
        out.next = self.next;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn set_active(&mut self, piece: Piece) {
        self.active = piece;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, LEVEL_THRESHOLDS, MAX_LEVEL};

    /// Replays a fixed list of draws, cycling
    struct Script(Vec<u32>, usize);

    impl RandomSource for Script {
        fn next_range(&mut self, max: u32) -> u32 {
            let v = self.0[self.1 % self.0.len()];
            self.1 += 1;
            v % max
        }
    }

    fn squares() -> Session<Script> {
        // color index 0, shape index 0 (O) forever
        Session::new(BOARD_WIDTH, BOARD_HEIGHT, Coord::new(5, 2), Script(vec![0], 0)).unwrap()
    }

    fn color(v: u8) -> Color {
        Color::new(v).unwrap()
    }

    fn fill_row_except(board: &mut Board, y: i16, skip: &[i16]) {
        for x in 0..board.width() as i16 {
            if !skip.contains(&x) {
                board.set(x, y, Some(color(6)));
            }
        }
    }

    #[test]
    fn test_new_session() {
        let s = Session::standard(12345);
        assert_eq!(s.score(), 0);
        assert_eq!(s.level(), 0);
        assert_eq!(s.lines(), 0);
        assert!(!s.game_over());
        assert_eq!(s.board().filled_count(), 0);
        assert_eq!(s.active().origin, Coord::new(5, 2));
        assert_eq!(s.next().origin, Coord::new(5, 2));
    }

    #[test]
    fn test_new_rejects_bad_dimensions() {
        let err = Session::new(0, 20, Coord::new(5, 2), SimpleRng::new(1)).unwrap_err();
        assert!(matches!(err, SessionError::InvalidDimensions { columns: 0, .. }));

        let err = Session::new(10, MAX_BOARD_SIDE + 1, Coord::new(5, 2), SimpleRng::new(1));
        assert!(err.is_err());
    }

    #[test]
    fn test_new_rejects_spawn_that_does_not_fit() {
        // The straight piece needs a row above the origin.
        let err = Session::new(10, 20, Coord::new(5, 0), SimpleRng::new(1)).unwrap_err();
        assert!(matches!(err, SessionError::SpawnDoesNotFit { .. }));

        // Too close to the right wall for the square.
        let err = Session::new(10, 20, Coord::new(9, 2), SimpleRng::new(1)).unwrap_err();
        assert!(matches!(err, SessionError::SpawnDoesNotFit { x: 9, .. }));
    }

    #[test]
    fn test_new_rejects_spawn_outside_board() {
        for (x, y) in [(i16::MAX, 2), (5, i16::MAX), (i16::MIN, 2), (5, -1), (10, 2)] {
            let err = Session::new(10, 20, Coord::new(x, y), SimpleRng::new(1)).unwrap_err();
            assert_eq!(
                err,
                SessionError::SpawnOutOfBounds {
                    x,
                    y,
                    columns: 10,
                    rows: 20
                }
            );
        }
    }

    #[test]
    fn test_moves_and_rotation() {
        let mut s = Session::standard(1);
        let start = *s.active();

        let out = s.step(InputEvent::MoveLeft);
        assert!(out.redraw);
        assert_eq!(s.active().origin, start.origin.offset(-1, 0));

        s.step(InputEvent::MoveRight);
        s.step(InputEvent::MoveRight);
        assert_eq!(s.active().origin, start.origin.offset(1, 0));

        s.step(InputEvent::SoftDrop);
        assert_eq!(s.active().origin, start.origin.offset(1, 1));

        s.step(InputEvent::Rotate);
        let mut expected = start;
        expected.rotate_clockwise();
        assert_eq!(s.active().relative, expected.relative);

        s.step(InputEvent::RotateCounterclockwise);
        assert_eq!(s.active().relative, start.relative);
    }

    #[test]
    fn test_blocked_move_is_silently_rejected() {
        let mut s = squares();
        for _ in 0..20 {
            s.step(InputEvent::MoveLeft);
        }
        assert_eq!(s.active().origin.x, 0);

        let before = *s.active();
        let out = s.step(InputEvent::MoveLeft);
        assert!(out.redraw);
        assert!(!out.landed);
        assert_eq!(*s.active(), before);
        assert_eq!(s.score(), 0);
        assert_eq!(s.board().filled_count(), 0);
    }

    #[test]
    fn test_blocked_rotation_is_rejected() {
        let mut s = squares();
        let bar = Piece::new(ShapeKind::I, Coord::new(0, 5), color(1));
        s.set_active(bar);
        // Clockwise would swing cells to x = -1 and x = -2.
        s.step(InputEvent::Rotate);
        assert_eq!(*s.active(), bar);
    }

    #[test]
    fn test_idle_steps_trigger_gravity() {
        let mut s = Session::standard(3);
        let y0 = s.active().origin.y;

        // tick_interval(0) = 33: the counter must exceed it.
        for _ in 0..34 {
            let out = s.step(InputEvent::None);
            assert!(!out.redraw);
        }
        assert_eq!(s.active().origin.y, y0);
        assert_eq!(s.idle_ticks(), 34);

        let out = s.step(InputEvent::None);
        assert!(out.redraw);
        assert_eq!(s.active().origin.y, y0 + 1);
        // Reset to 0, then incremented for this step.
        assert_eq!(s.idle_ticks(), 1);
    }

    #[test]
    fn test_input_does_not_reset_idle_counter() {
        let mut s = Session::standard(3);
        for _ in 0..10 {
            s.step(InputEvent::MoveLeft);
        }
        assert_eq!(s.idle_ticks(), 10);
    }

    #[test]
    fn test_soft_drop_lands_and_promotes_next() {
        let mut s = Session::standard(42);
        let expected_next = *s.next();

        let mut landed = false;
        let mut last_cells = s.active().cells();
        let mut last_color = s.active().color;
        for _ in 0..40 {
            let out = s.step(InputEvent::SoftDrop);
            if out.landed {
                landed = true;
                break;
            }
            last_cells = s.active().cells();
            last_color = s.active().color;
        }

        assert!(landed);
        for c in last_cells {
            assert_eq!(s.board().get(c.x, c.y), Some(Some(last_color)));
        }
        assert_eq!(s.board().filled_count(), 4);
        assert_eq!(s.active().kind, expected_next.kind);
        assert_eq!(s.active().relative, expected_next.relative);
        assert_eq!(s.active().origin, s.spawn());
    }

    #[test]
    fn test_score_crossing_threshold_raises_level_once() {
        let mut s = squares();
        s.score = 28;

        // Rows 17..=19 full except column 0; row 16 holds a single cell.
        let board = s.board_mut();
        for y in 17..=19 {
            fill_row_except(board, y, &[0]);
        }
        board.set(5, 16, Some(color(2)));

        // Vertical bar in column 0 covering rows 16..=19.
        s.set_active(Piece::new(ShapeKind::I, Coord::new(0, 17), color(3)));
        let out = s.step(InputEvent::SoftDrop);

        assert!(out.landed);
        assert_eq!(out.lines_cleared, 3);
        assert_eq!(s.score(), 31);
        assert_eq!(s.level(), 1);
        assert_eq!(s.lines(), 3);
        // Row 16 content moved to row 19: the bar's top cell and the lone cell.
        assert_eq!(s.board().get(0, 19), Some(Some(color(3))));
        assert_eq!(s.board().get(5, 19), Some(Some(color(2))));
        assert_eq!(s.board().filled_count(), 2);
        assert!(!s.game_over());
    }

    #[test]
    fn test_force_level_up_is_independent_of_score() {
        let mut s = Session::standard(5);
        let before = *s.active();
        let out = s.step(InputEvent::ForceLevelUp);
        assert!(out.redraw);
        assert_eq!(s.level(), 1);
        assert_eq!(s.score(), 0);
        assert_eq!(*s.active(), before);

        for _ in 0..20 {
            s.step(InputEvent::ForceLevelUp);
        }
        assert_eq!(s.level(), MAX_LEVEL);
    }

    #[test]
    fn test_level_never_passes_last_table_entry() {
        let mut s = squares();
        s.level = MAX_LEVEL;
        s.score = LEVEL_THRESHOLDS[MAX_LEVEL as usize] + 10;
        s.set_active(Piece::new(ShapeKind::O, Coord::new(0, 18), color(1)));
        let out = s.step(InputEvent::SoftDrop);
        assert!(out.landed);
        assert_eq!(s.level(), MAX_LEVEL);
    }

    #[test]
    fn test_game_over_when_spawn_blocked() {
        let mut s = squares();
        {
            let board = s.board_mut();
            for y in 0..=4 {
                fill_row_except(board, y, &[9]);
            }
        }
        s.set_active(Piece::new(ShapeKind::O, Coord::new(0, 18), color(1)));

        let out = s.step(InputEvent::SoftDrop);
        assert!(out.landed);
        assert!(out.game_over);
        assert!(s.game_over());

        let board = s.board().clone();
        let active = *s.active();
        let next = *s.next();
        let steps = s.steps();
        for ev in [
            InputEvent::SoftDrop,
            InputEvent::MoveLeft,
            InputEvent::None,
            InputEvent::ForceLevelUp,
        ] {
            let out = s.step(ev);
            assert_eq!(
                out,
                StepOutcome {
                    game_over: true,
                    ..StepOutcome::default()
                }
            );
        }
        assert_eq!(*s.board(), board);
        assert_eq!(*s.active(), active);
        assert_eq!(*s.next(), next);
        assert_eq!(s.steps(), steps);
        assert_eq!(s.level(), 0);
    }

    #[test]
    fn test_quit_is_a_no_op_with_redraw() {
        let mut s = Session::standard(9);
        let before = *s.active();
        let out = s.step(InputEvent::Quit);
        assert!(out.redraw);
        assert_eq!(*s.active(), before);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut s = Session::standard(11);
        s.step(InputEvent::MoveLeft);
        let snap = s.snapshot();
        assert_eq!(snap.width, BOARD_WIDTH);
        assert_eq!(snap.height, BOARD_HEIGHT);
        assert_eq!(snap.board.len(), (BOARD_WIDTH * BOARD_HEIGHT) as usize);
        assert_eq!(snap.active, *s.active());
        assert_eq!(snap.next, *s.next());
        assert!(!snap.game_over);
    }
}
