//! End-to-end checks of the simulation through the public API only.

use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::HashSet;
use torus_snake::game::{
    CellKind, Difficulty, Direction, GameConfig, GameEngine, Layout, Position, RunState,
    TickOutcome,
};

fn layout(size: usize, snake: Vec<Position>, heading: Direction, food: Position) -> GameEngine {
    GameEngine::from_layout(
        GameConfig::new(size),
        Layout {
            snake,
            heading,
            food,
        },
    )
    .expect("valid layout")
}

#[test]
fn start_centres_a_two_cell_snake() {
    for size in [3, 10, 20, 21] {
        let mut engine = GameEngine::with_seed(GameConfig::new(size), 0).unwrap();
        engine.start();

        let n = size as i32;
        let snapshot = engine.snapshot();
        assert_eq!(
            snapshot.snake,
            vec![Position::new(n / 2, n / 2), Position::new(n / 2 - 1, n / 2)]
        );
        assert_eq!(snapshot.heading, Direction::Right);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.run_state, RunState::Running);
        assert!(!snapshot.snake.contains(&snapshot.food));
    }
}

#[test]
fn eating_grows_the_snake_and_scores() {
    let mut engine = layout(
        20,
        vec![Position::new(10, 10), Position::new(9, 10)],
        Direction::Right,
        Position::new(11, 10),
    );

    assert_eq!(engine.tick(), TickOutcome::Ate { score: 1 });

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.score, 1);
    assert_eq!(
        snapshot.snake,
        vec![
            Position::new(11, 10),
            Position::new(10, 10),
            Position::new(9, 10)
        ]
    );
    assert!(!snapshot.snake.contains(&snapshot.food));
}

#[test]
fn reverse_request_keeps_heading() {
    let mut engine = GameEngine::with_seed(GameConfig::default(), 4).unwrap();
    engine.start();

    engine.request_direction(Direction::Left);
    engine.tick();

    assert_eq!(engine.heading(), Direction::Right);
    assert_eq!(engine.snake().head(), Position::new(11, 10));
}

#[test]
fn leaving_an_edge_wraps_around() {
    let cases = [
        (Position::new(0, 4), Position::new(1, 4), Direction::Left, Position::new(19, 4)),
        (Position::new(19, 4), Position::new(18, 4), Direction::Right, Position::new(0, 4)),
        (Position::new(4, 0), Position::new(4, 1), Direction::Up, Position::new(4, 19)),
        (Position::new(4, 19), Position::new(4, 18), Direction::Down, Position::new(4, 0)),
    ];

    for (head, neck, heading, expected) in cases {
        let mut engine = layout(20, vec![head, neck], heading, Position::new(10, 10));
        assert_eq!(engine.tick(), TickOutcome::Moved);
        assert_eq!(engine.snake().head(), expected);
    }
}

#[test]
fn self_collision_ends_the_run_and_zeroes_the_score() {
    // Head at (2,2) with the body curling round to its left
    let mut engine = layout(
        20,
        vec![
            Position::new(2, 2),
            Position::new(2, 3),
            Position::new(1, 3),
            Position::new(0, 3),
            Position::new(0, 2),
            Position::new(0, 1),
        ],
        Direction::Up,
        Position::new(1, 2),
    );

    // Eat at (1,2): body is now (1,2) (2,2) (2,3) (1,3) (0,3) (0,2) (0,1)
    engine.request_direction(Direction::Left);
    assert_eq!(engine.tick(), TickOutcome::Ate { score: 1 });
    let before = engine.snapshot();

    // Down from (1,2) is (1,3), body index 3
    engine.request_direction(Direction::Down);
    assert_eq!(engine.tick(), TickOutcome::Collided { final_score: 1 });

    let after = engine.snapshot();
    assert_eq!(after.run_state, RunState::NotRunning);
    assert_eq!(after.score, 0);
    assert_eq!(after.snake, before.snake);
    assert_eq!(after.food, before.food);
}

#[test]
fn wrapping_head_hits_body_index_two() {
    // Three cells fill a row of a 3x3 field; one step right wraps onto (0,1)
    let mut engine = layout(
        3,
        vec![Position::new(2, 1), Position::new(1, 1), Position::new(0, 1)],
        Direction::Right,
        Position::new(1, 0),
    );
    let before = engine.snapshot();
    assert_eq!(before.snake[2], Position::new(0, 1));

    assert_eq!(engine.tick(), TickOutcome::Collided { final_score: 0 });

    let after = engine.snapshot();
    assert_eq!(after.run_state, RunState::NotRunning);
    assert_eq!(after.score, 0);
    assert_eq!(after.snake, before.snake);
    assert_eq!(after.food, before.food);
}

#[test]
fn collided_game_stays_still_until_restarted() {
    let mut engine = layout(
        10,
        vec![
            Position::new(5, 5),
            Position::new(5, 4),
            Position::new(4, 4),
            Position::new(4, 5),
        ],
        Direction::Down,
        Position::new(9, 9),
    );
    engine.request_direction(Direction::Left);
    assert!(matches!(engine.tick(), TickOutcome::Collided { .. }));

    let frozen = engine.snapshot();
    for _ in 0..3 {
        assert_eq!(engine.tick(), TickOutcome::Idle);
    }
    assert_eq!(engine.snapshot(), frozen);

    assert!(engine.set_difficulty(Difficulty::Medium));
    engine.start();
    assert_eq!(engine.run_state(), RunState::Running);
    assert_eq!(engine.snake().len(), 2);
    assert_eq!(engine.snapshot().last_score, None);
}

/// Random play on a tiny field, where food and collisions come quickly
#[test]
fn random_play_keeps_every_invariant() {
    let mut engine = GameEngine::with_seed(GameConfig::new(4), 99).unwrap();
    let mut driver = StdRng::seed_from_u64(1234);
    engine.start();

    let mut meals = 0;
    let mut crashes = 0;

    for _ in 0..5_000 {
        if engine.run_state() == RunState::NotRunning {
            engine.start();
        }

        let turn = Direction::ALL[driver.gen_range(0..4)];
        engine.request_direction(turn);

        let before = engine.snapshot();
        let outcome = engine.tick();
        let after = engine.snapshot();

        match outcome {
            TickOutcome::Moved => {
                assert_eq!(after.snake.len(), before.snake.len());
                assert_eq!(after.score, before.score);
                assert_eq!(after.food, before.food);
            }
            TickOutcome::Ate { score } => {
                meals += 1;
                assert_eq!(after.snake.len(), before.snake.len() + 1);
                assert_eq!(score, before.score + 1);
                assert_eq!(after.score, score);
            }
            TickOutcome::Collided { final_score } => {
                crashes += 1;
                assert_eq!(final_score, before.score);
                assert_eq!(after.score, 0);
                assert_eq!(after.snake, before.snake);
                continue;
            }
            TickOutcome::Idle => panic!("running engine returned Idle"),
        }

        assert!(after.snake.len() >= 2);
        assert!(after.snake.iter().all(|cell| cell.is_within(4)));
        let distinct: HashSet<_> = after.snake.iter().collect();
        assert_eq!(distinct.len(), after.snake.len());
        // The only time food may share a cell is a completely full field
        if after.snake.len() < 16 {
            assert!(!after.snake.contains(&after.food));
        }
        assert_ne!(after.heading, before.heading.opposite());
    }

    assert!(meals > 0);
    assert!(crashes > 0);
}

#[test]
fn snapshot_maps_to_renderable_cells() {
    let engine = layout(
        5,
        vec![Position::new(2, 2), Position::new(1, 2), Position::new(0, 2)],
        Direction::Right,
        Position::new(4, 0),
    );
    let rows = engine.snapshot().rows();

    assert_eq!(rows[2][2], CellKind::Head);
    assert_eq!(rows[2][1], CellKind::Body);
    assert_eq!(rows[2][0], CellKind::Body);
    assert_eq!(rows[0][4], CellKind::Food);
    assert_eq!(rows[4][4], CellKind::Empty);
}

#[test]
fn snapshot_serializes_for_external_renderers() {
    let engine = layout(
        5,
        vec![Position::new(2, 2), Position::new(1, 2)],
        Direction::Right,
        Position::new(4, 0),
    );

    let json = serde_json::to_value(engine.snapshot()).unwrap();
    assert_eq!(json["run_state"], "running");
    assert_eq!(json["heading"], "right");
    assert_eq!(json["difficulty"], "easy");
    assert_eq!(json["snake"][0]["x"], 2);
    assert_eq!(json["food"]["y"], 0);
    assert_eq!(json["last_score"], serde_json::Value::Null);
}
