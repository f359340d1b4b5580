//! Long-running engine mode.
//!
//! The engine runs on its own thread and communicates over three mpsc
//! channels: a task channel (`Search`/`Quit`), a user-move channel the
//! caller may push announced moves onto mid-search, and a reply channel
//! carrying one `Result` per completed search. The loop owns no state
//! between tasks beyond the channels themselves.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::game_state::chess_types::{CastlingRights, Color, Piece, Square};
use crate::game_state::game_state::GameState;
use crate::search::root_search::{search_best_move, SearchOptions};
use crate::utils::algebraic::move_key;

#[derive(Debug, Clone)]
pub struct SearchTask {
    pub board: [Piece; 64],
    pub side: Color,
    pub depth: u8,
    /// `None` is unbounded.
    pub time_limit: Option<Duration>,
    /// `None` infers rights from king/rook home squares.
    pub castling_rights: Option<CastlingRights>,
    pub en_passant_square: Option<Square>,
}

#[derive(Debug, Clone)]
pub enum EngineTask {
    Search(SearchTask),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineReply {
    /// Empty coordinates and an absent score signal "no move" (game over or
    /// fully cancelled search).
    Result {
        from: String,
        to: String,
        score: Option<i32>,
    },
}

/// Blocking engine loop; returns when it sees `Quit` or the task channel
/// disconnects.
pub fn engine_main(
    task_rx: Receiver<EngineTask>,
    user_moves: Receiver<String>,
    reply_tx: Sender<EngineReply>,
) {
    while let Ok(task) = task_rx.recv() {
        match task {
            EngineTask::Search(search_task) => {
                // Announcements from before this search are stale.
                while user_moves.try_recv().is_ok() {}

                let reply = run_search_task(&search_task, &user_moves);
                if reply_tx.send(reply).is_err() {
                    return;
                }
            }
            EngineTask::Quit => return,
        }
    }
}

fn run_search_task(task: &SearchTask, user_moves: &Receiver<String>) -> EngineReply {
    let mut game_state = GameState::from_board(task.board, task.side);
    if let Some(rights) = task.castling_rights {
        game_state.castling_rights = rights;
    }
    game_state.en_passant_square = task.en_passant_square;

    let options = SearchOptions {
        depth: task.depth,
        time_limit: task.time_limit,
        ..SearchOptions::default()
    };

    let outcome = search_best_move(&game_state, &options, Some(user_moves));
    match outcome.best_move {
        Some(move_description) => {
            // The to-field keeps the promotion letter, e.g. "E8Q".
            let key = move_key(move_description);
            EngineReply::Result {
                from: key[..2].to_owned(),
                to: key[2..].to_owned(),
                score: outcome.score,
            }
        }
        None => EngineReply::Result {
            from: String::new(),
            to: String::new(),
            score: None,
        },
    }
}

/// A spawned engine thread plus the channel endpoints to drive it.
pub struct EngineHandle {
    task_tx: Sender<EngineTask>,
    user_move_tx: Sender<String>,
    reply_rx: Receiver<EngineReply>,
    join: Option<JoinHandle<()>>,
}

impl EngineHandle {
    pub fn spawn() -> Self {
        let (task_tx, task_rx) = channel::<EngineTask>();
        let (user_move_tx, user_move_rx) = channel::<String>();
        let (reply_tx, reply_rx) = channel::<EngineReply>();

        let join = thread::Builder::new()
            .name("engine-loop".to_owned())
            .spawn(move || engine_main(task_rx, user_move_rx, reply_tx))
            .expect("spawning the engine thread should succeed");

        Self {
            task_tx,
            user_move_tx,
            reply_rx,
            join: Some(join),
        }
    }

    pub fn submit(&self, task: SearchTask) -> Result<(), String> {
        self.task_tx
            .send(EngineTask::Search(task))
            .map_err(|_| "engine thread is gone".to_owned())
    }

    /// Announce the human's move to a search in flight.
    pub fn announce_user_move(&self, user_move: &str) -> Result<(), String> {
        self.user_move_tx
            .send(user_move.to_owned())
            .map_err(|_| "engine thread is gone".to_owned())
    }

    pub fn replies(&self) -> &Receiver<EngineReply> {
        &self.reply_rx
    }

    /// Ask the loop to exit and wait for the thread.
    pub fn quit(mut self) {
        let _ = self.task_tx.send(EngineTask::Quit);
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        let _ = self.task_tx.send(EngineTask::Quit);
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}
