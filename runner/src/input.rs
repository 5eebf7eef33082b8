use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use snake_common::Direction;
use snake_common::log;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverCommand {
    Turn(Direction),
    TogglePause,
    Restart,
    Quit,
}

fn parse_token(token: &str) -> Option<DriverCommand> {
    let command = match token.to_ascii_lowercase().as_str() {
        "w" | "k" | "up" => DriverCommand::Turn(Direction::Up),
        "s" | "j" | "down" => DriverCommand::Turn(Direction::Down),
        "a" | "h" | "left" => DriverCommand::Turn(Direction::Left),
        "d" | "l" | "right" => DriverCommand::Turn(Direction::Right),
        "p" | "pause" => DriverCommand::TogglePause,
        "r" | "restart" => DriverCommand::Restart,
        "q" | "quit" | "exit" => DriverCommand::Quit,
        _ => return None,
    };
    Some(command)
}

/// Whitespace separated commands, unknown tokens skipped.
pub fn parse_line(line: &str) -> Vec<DriverCommand> {
    line.split_whitespace().filter_map(parse_token).collect()
}

/// Forwards stdin commands until EOF or until the receiver is gone.
pub fn spawn_stdin_reader(command_tx: mpsc::UnboundedSender<DriverCommand>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    for command in parse_line(&line) {
                        if command_tx.send(command).is_err() {
                            return;
                        }
                    }
                }
                Ok(None) => return,
                Err(e) => {
                    log!("Failed to read input: {}", e);
                    return;
                }
            }
        }
    });
}
