use std::io::{self, BufRead, Write};
use std::sync::mpsc::channel;
use std::thread;
use std::time::Duration;

use rowan_chess::engine::engine_loop::{engine_main, EngineReply, EngineTask, SearchTask};
use rowan_chess::game_state::game_state::GameState;
use rowan_chess::utils::render_game_state::render_game_state;

/// Line-oriented driver around the engine thread:
///
/// ```text
/// search <depth> <seconds|-> [fen...]
/// move <e2e4>
/// show [fen...]
/// quit
/// ```
fn main() {
    let (task_tx, task_rx) = channel::<EngineTask>();
    let (user_move_tx, user_move_rx) = channel::<String>();
    let (reply_tx, reply_rx) = channel::<EngineReply>();

    // Engine thread: blocks on the task channel, searches, replies.
    let engine_thread = thread::spawn(move || {
        engine_main(task_rx, user_move_rx, reply_tx);
    });

    // Printer thread: surfaces results as soon as they arrive.
    thread::spawn(move || loop {
        while let Ok(reply) = reply_rx.try_recv() {
            match reply {
                EngineReply::Result { from, to, score } => {
                    if from.is_empty() {
                        println!("result none");
                    } else {
                        let score = score.map_or_else(|| "-".to_owned(), |s| s.to_string());
                        println!("result {from}{to} score {score}");
                    }
                }
            }
            io::stdout().flush().ok();
        }
        thread::sleep(Duration::from_millis(10));
    });

    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();
    let mut input = String::new();

    loop {
        input.clear();
        let Ok(n) = stdin_lock.read_line(&mut input) else {
            break;
        };
        if n == 0 {
            break;
        }
        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        let mut words = line.split_whitespace();
        match words.next() {
            Some("search") => match parse_search_command(words) {
                Ok(task) => {
                    if task_tx.send(EngineTask::Search(task)).is_err() {
                        eprintln!("engine thread is gone");
                        break;
                    }
                }
                Err(message) => eprintln!("bad search command: {message}"),
            },
            Some("move") => {
                if let Some(user_move) = line.strip_prefix("move") {
                    let _ = user_move_tx.send(user_move.trim().to_owned());
                }
            }
            Some("show") => match parse_fen_tail(words) {
                Ok(game) => print!("{}", render_game_state(&game)),
                Err(message) => eprintln!("bad show command: {message}"),
            },
            Some("quit") => break,
            Some(other) => eprintln!("unknown command: {other}"),
            None => {}
        }
    }

    let _ = task_tx.send(EngineTask::Quit);
    let _ = engine_thread.join();
}

fn parse_search_command<'a, I>(mut words: I) -> Result<SearchTask, String>
where
    I: Iterator<Item = &'a str>,
{
    let depth: u8 = words
        .next()
        .ok_or("missing depth")?
        .parse()
        .map_err(|_| "depth must be a small integer".to_owned())?;

    let time_limit = match words.next().ok_or("missing time limit")? {
        "-" => None,
        seconds => Some(Duration::from_secs_f64(
            seconds
                .parse::<f64>()
                .map_err(|_| "time limit must be seconds or '-'".to_owned())?,
        )),
    };

    let game = parse_fen_tail(words)?;
    Ok(SearchTask {
        board: game.board,
        side: game.side_to_move,
        depth,
        time_limit,
        castling_rights: Some(game.castling_rights),
        en_passant_square: game.en_passant_square,
    })
}

fn parse_fen_tail<'a, I>(words: I) -> Result<GameState, String>
where
    I: Iterator<Item = &'a str>,
{
    let fen = words.collect::<Vec<_>>().join(" ");
    if fen.is_empty() {
        return Ok(GameState::new_game());
    }
    GameState::from_fen(&fen)
}
