use criterion::{criterion_group, criterion_main, Criterion, SamplingMode};
use std::hint::black_box;
use std::time::Duration;
use snake_common::games::SessionRng;
use snake_common::games::snake::{
    Board, Difficulty, Direction, GameSession, Point, Rival, RivalController,
    SelfCollisionRule, Snake, SnakeGameState, SnakeSessionSettings,
};

fn long_snake_state() -> (SnakeSessionSettings, SnakeGameState) {
    let settings = SnakeSessionSettings::for_difficulty(Board::new(40, 40), Difficulty::Hard);

    // Serpentine body over the top ten rows, head at (39, 9).
    let mut body = Vec::new();
    for y in 0..10 {
        let row: Vec<usize> = if y % 2 == 0 {
            (0..40).rev().collect()
        } else {
            (0..40).collect()
        };
        for x in row {
            body.push(Point::new(x, y));
        }
    }
    body.reverse();

    let player = Snake::from_body(body, Direction::Right).expect("serpentine body is well formed");
    let state = SnakeGameState::from_parts(&settings, player, Point::new(20, 30))
        .with_rival(Rival::new(Rival::spawn_point(&settings.board)));
    (settings, state)
}

fn bench_step_long_snake(state: &SnakeGameState, rng: &mut SessionRng) {
    black_box(state.step(Direction::Down, rng));
}

fn bench_session_100_ticks() {
    let settings = SnakeSessionSettings::for_difficulty(Board::new(20, 20), Difficulty::Hard);
    let mut session = GameSession::new(settings, 0, SessionRng::new(7));
    let turns = [Direction::Down, Direction::Left, Direction::Up, Direction::Right];

    for tick in 0..100 {
        session.request_direction(turns[(tick / 5) % turns.len()]);
        session.on_tick();
    }
    black_box(session.score());
}

fn step_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("snake_step");

    group
        .sampling_mode(SamplingMode::Flat)
        .sample_size(50)
        .measurement_time(Duration::from_secs(10));

    let (_, state) = long_snake_state();
    let mut rng = SessionRng::new(42);
    group.bench_function("step_long_snake", |b| {
        b.iter(|| bench_step_long_snake(&state, &mut rng))
    });

    let rival = Snake::new(Point::new(38, 38), Direction::Left);
    let board = Board::new(40, 40);
    group.bench_function("rival_choose_direction", |b| {
        b.iter(|| {
            RivalController::choose_direction(
                black_box(&rival),
                black_box(Point::new(3, 3)),
                &board,
                SelfCollisionRule::IncludeTail,
            )
        })
    });

    group.bench_function("session_100_ticks", |b| {
        b.iter(bench_session_100_ticks)
    });

    group.finish();
}

criterion_group!(benches, step_bench);
criterion_main!(benches);
