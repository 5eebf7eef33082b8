use std::fmt::Write;

use snake_common::games::snake::{GameSession, GameStatus};

const EMPTY: char = '.';
const FOOD: char = '*';
const HEAD: char = '@';
const BODY: char = 'o';
const RIVAL_HEAD: char = 'X';
const RIVAL_BODY: char = 'x';

/// Plain text snapshot: one status line followed by the board rows.
pub fn render_frame(session: &GameSession) -> String {
    let state = session.state();
    let board = state.board;
    let mut grid = vec![vec![EMPTY; board.width]; board.height];

    grid[state.food.y][state.food.x] = FOOD;

    if let Some(rival) = &state.rival {
        for (i, cell) in rival.snake().body().enumerate() {
            grid[cell.y][cell.x] = if i == 0 { RIVAL_HEAD } else { RIVAL_BODY };
        }
    }

    for (i, cell) in state.player.body().enumerate() {
        grid[cell.y][cell.x] = if i == 0 { HEAD } else { BODY };
    }

    let status = match session.status() {
        GameStatus::Active => "playing".to_string(),
        GameStatus::Paused => "paused".to_string(),
        GameStatus::Over => match session.death_reason() {
            Some(reason) => format!("game over, snake {}", reason),
            None => "game over".to_string(),
        },
    };

    let mut frame = String::new();
    let _ = writeln!(
        frame,
        "score {} | best {} | {}ms | {}",
        session.score(),
        session.best_score(),
        session.tick_interval().as_millis(),
        status
    );
    for row in grid {
        frame.extend(row);
        frame.push('\n');
    }
    frame
}
