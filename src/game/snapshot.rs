use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::direction::Direction;
use super::state::{Position, RunState};

/// What occupies a single field cell, for drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Empty,
    Head,
    Body,
    Food,
}

/// Read-only copy of everything a renderer needs after a mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub field_size: usize,
    /// Head first
    pub snake: Vec<Position>,
    pub food: Position,
    pub heading: Direction,
    pub score: u32,
    pub run_state: RunState,
    pub difficulty: Difficulty,
    /// Score held when the most recent run collided; the live score is
    /// already zero by then.
    pub last_score: Option<u32>,
}

impl Snapshot {
    /// Classify one cell. Head wins over body, body over food.
    pub fn cell_at(&self, pos: Position) -> CellKind {
        match self.snake.iter().position(|&cell| cell == pos) {
            Some(0) => CellKind::Head,
            Some(_) => CellKind::Body,
            None if pos == self.food => CellKind::Food,
            None => CellKind::Empty,
        }
    }

    /// The whole field in row-major order, `rows()[y][x]`
    pub fn rows(&self) -> Vec<Vec<CellKind>> {
        let size = self.field_size as i32;
        (0..size)
            .map(|y| (0..size).map(|x| self.cell_at(Position::new(x, y))).collect())
            .collect()
    }

    /// A run ended by collision and no new one has started yet
    pub fn is_game_over(&self) -> bool {
        self.run_state == RunState::NotRunning && self.last_score.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot {
            field_size: 4,
            snake: vec![Position::new(1, 1), Position::new(0, 1)],
            food: Position::new(3, 2),
            heading: Direction::Right,
            score: 0,
            run_state: RunState::Running,
            difficulty: Difficulty::Easy,
            last_score: None,
        }
    }

    #[test]
    fn test_cell_classification() {
        let snap = snapshot();
        assert_eq!(snap.cell_at(Position::new(1, 1)), CellKind::Head);
        assert_eq!(snap.cell_at(Position::new(0, 1)), CellKind::Body);
        assert_eq!(snap.cell_at(Position::new(3, 2)), CellKind::Food);
        assert_eq!(snap.cell_at(Position::new(2, 2)), CellKind::Empty);
    }

    #[test]
    fn test_head_hides_food_underneath() {
        let mut snap = snapshot();
        snap.food = snap.snake[0];
        assert_eq!(snap.cell_at(snap.food), CellKind::Head);
    }

    #[test]
    fn test_rows_are_row_major() {
        let rows = snapshot().rows();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|row| row.len() == 4));
        assert_eq!(rows[1][1], CellKind::Head);
        assert_eq!(rows[1][0], CellKind::Body);
        assert_eq!(rows[2][3], CellKind::Food);

        let occupied = rows
            .iter()
            .flatten()
            .filter(|&&kind| kind != CellKind::Empty)
            .count();
        assert_eq!(occupied, 3);
    }

    #[test]
    fn test_game_over_needs_a_finished_run() {
        let mut snap = snapshot();
        assert!(!snap.is_game_over());

        snap.run_state = RunState::NotRunning;
        assert!(!snap.is_game_over());

        snap.last_score = Some(0);
        assert!(snap.is_game_over());
    }
}
