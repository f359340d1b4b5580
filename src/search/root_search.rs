//! Parallel root dispatcher.
//!
//! One task per legal root move, drained by a bounded worker pool; every
//! task owns a stop flag and a private transposition table. The calling
//! thread polls a deadline and an optional user-move channel: an announced
//! move matching a root key cancels every *other* task so the engine keeps
//! deepening the committed subtree, while a non-matching announcement
//! obsoletes the whole search. Workers publish scores into a mutex-guarded
//! map, and never after observing a stop.

use std::collections::{HashMap, VecDeque};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::{LegalMoveGenerator, MoveGenerator};
use crate::move_generation::move_descriptions::MoveDescription;
use crate::search::board_scoring::{BoardScorer, MaterialMobilityScorer};
use crate::search::minimax::minimax;
use crate::search::threading::{resolve_worker_count, SearchControl, StopFlag};
use crate::search::transposition_table::{TranspositionTable, DEFAULT_LOG2_ENTRIES};
use crate::utils::algebraic::{move_key, normalize_user_move};

/// Monitor poll interval; deadline overshoot is bounded by roughly one poll
/// plus worker reaction time.
pub const POLL_INTERVAL: Duration = Duration::from_millis(30);

/// Published when a worker dies; loses to every legitimate score.
pub const CRASH_SCORE: i32 = -10_000_000;

#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Search depth in plies; root moves search `depth - 1` below them.
    pub depth: u8,
    /// Soft wall-clock ceiling; `None` is unbounded.
    pub time_limit: Option<Duration>,
    /// Worker thread cap; 0 resolves to hardware parallelism.
    pub max_workers: usize,
    /// Per-task transposition table size.
    pub tt_log2_entries: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            depth: 4,
            time_limit: None,
            max_workers: 0,
            tt_log2_entries: DEFAULT_LOG2_ENTRIES,
        }
    }
}

impl SearchOptions {
    pub fn with_depth(depth: u8) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }
}

/// Best root move and its score; both absent when there is no legal move or
/// every worker was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchOutcome {
    pub best_move: Option<MoveDescription>,
    pub score: Option<i32>,
}

impl SearchOutcome {
    pub fn best_move_key(&self) -> Option<String> {
        self.best_move.map(move_key)
    }
}

struct RootTask {
    key: String,
    move_description: MoveDescription,
    game_after_move: GameState,
    stop: Arc<StopFlag>,
}

/// Search with the default generator and scorer.
pub fn search_best_move(
    game_state: &GameState,
    options: &SearchOptions,
    user_moves: Option<&Receiver<String>>,
) -> SearchOutcome {
    search_best_move_with(
        game_state,
        options,
        user_moves,
        Arc::new(LegalMoveGenerator),
        Arc::new(MaterialMobilityScorer),
    )
}

/// Full dispatcher. Never returns an error: internal failures degrade to an
/// empty outcome or a sentinel score.
pub fn search_best_move_with<G, S>(
    game_state: &GameState,
    options: &SearchOptions,
    user_moves: Option<&Receiver<String>>,
    generator: Arc<G>,
    scorer: Arc<S>,
) -> SearchOutcome
where
    G: MoveGenerator + 'static,
    S: BoardScorer + 'static,
{
    let Ok(root_moves) = generator.generate_legal_moves(game_state) else {
        return SearchOutcome::default();
    };
    if root_moves.is_empty() {
        return SearchOutcome::default();
    }

    let maximizing_color = game_state.side_to_move;
    let ordered_keys: Vec<String> = root_moves
        .iter()
        .map(|mv| move_key(mv.move_description))
        .collect();

    let tasks: Vec<RootTask> = root_moves
        .into_iter()
        .map(|mv| RootTask {
            key: move_key(mv.move_description),
            move_description: mv.move_description,
            game_after_move: mv.game_after_move,
            stop: StopFlag::new(),
        })
        .collect();
    let move_by_key: HashMap<String, MoveDescription> = tasks
        .iter()
        .map(|task| (task.key.clone(), task.move_description))
        .collect();
    let flags_by_key: HashMap<String, Arc<StopFlag>> = tasks
        .iter()
        .map(|task| (task.key.clone(), task.stop.clone()))
        .collect();

    let worker_count = resolve_worker_count(options.max_workers, tasks.len());
    let task_count = tasks.len();

    let global_stop = StopFlag::new();
    let queue = Arc::new(Mutex::new(VecDeque::from(tasks)));
    let results: Arc<Mutex<HashMap<String, i32>>> = Arc::new(Mutex::new(HashMap::new()));
    let remaining = Arc::new(Mutex::new(task_count));

    let mut handles = Vec::with_capacity(worker_count);
    for worker_index in 0..worker_count {
        let queue = Arc::clone(&queue);
        let results = Arc::clone(&results);
        let remaining = Arc::clone(&remaining);
        let global_stop = Arc::clone(&global_stop);
        let generator = Arc::clone(&generator);
        let scorer = Arc::clone(&scorer);
        let depth = options.depth;
        let tt_log2_entries = options.tt_log2_entries;

        let handle = thread::Builder::new()
            .name(format!("search-worker-{worker_index}"))
            .spawn(move || loop {
                let Some(task) = queue.lock().expect("queue lock poisoned").pop_front() else {
                    break;
                };

                run_root_task(
                    &task,
                    maximizing_color,
                    depth,
                    tt_log2_entries,
                    &global_stop,
                    &results,
                    generator.as_ref(),
                    scorer.as_ref(),
                );

                *remaining.lock().expect("remaining lock poisoned") -= 1;
            })
            .expect("spawning a search worker should succeed");
        handles.push(handle);
    }

    monitor_workers(
        options.time_limit,
        user_moves,
        &flags_by_key,
        &global_stop,
        &remaining,
    );

    for handle in handles {
        let _ = handle.join();
    }

    let results = results.lock().expect("results lock poisoned");
    let mut best: Option<(&str, i32)> = None;
    for key in &ordered_keys {
        let Some(&score) = results.get(key.as_str()) else {
            continue;
        };
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((key, score));
        }
    }

    match best {
        Some((key, score)) => SearchOutcome {
            best_move: move_by_key.get(key).copied(),
            score: Some(score),
        },
        None => SearchOutcome::default(),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_root_task<G: MoveGenerator, S: BoardScorer>(
    task: &RootTask,
    maximizing_color: Color,
    depth: u8,
    tt_log2_entries: u32,
    global_stop: &Arc<StopFlag>,
    results: &Arc<Mutex<HashMap<String, i32>>>,
    generator: &G,
    scorer: &S,
) {
    let control = SearchControl::new(task.stop.clone(), global_stop.clone());
    if control.should_stop() {
        return;
    }

    let searched = catch_unwind(AssertUnwindSafe(|| {
        let mut table = TranspositionTable::with_log2_entries(tt_log2_entries);
        minimax(
            &task.game_after_move,
            maximizing_color,
            depth.saturating_sub(1),
            -i32::MAX,
            i32::MAX,
            1,
            &control,
            &mut table,
            generator,
            scorer,
        )
    }));

    match searched {
        Ok(Ok(score)) => {
            // The flags may have fired while the subtree was running; a
            // stopped worker must not publish.
            if !control.should_stop() {
                results
                    .lock()
                    .expect("results lock poisoned")
                    .insert(task.key.clone(), score);
            }
        }
        Ok(Err(_)) | Err(_) => {
            results
                .lock()
                .expect("results lock poisoned")
                .insert(task.key.clone(), CRASH_SCORE);
        }
    }
}

fn monitor_workers(
    time_limit: Option<Duration>,
    user_moves: Option<&Receiver<String>>,
    flags_by_key: &HashMap<String, Arc<StopFlag>>,
    global_stop: &Arc<StopFlag>,
    remaining: &Arc<Mutex<usize>>,
) {
    let start = Instant::now();

    loop {
        if *remaining.lock().expect("remaining lock poisoned") == 0 {
            return;
        }

        if let Some(limit) = time_limit {
            if start.elapsed() > limit {
                global_stop.request_stop();
                return;
            }
        }

        if let Some(channel) = user_moves {
            while let Ok(raw) = channel.try_recv() {
                let announced = normalize_user_move(&raw);
                if announced.is_empty() {
                    continue;
                }
                if flags_by_key.contains_key(&announced) {
                    // Selective cancel: the matching subtree is the one the
                    // engine must keep evaluating.
                    for (key, flag) in flags_by_key {
                        if key != &announced {
                            flag.request_stop();
                        }
                    }
                } else {
                    // The committed move is outside the searched tree; the
                    // whole computation is obsolete.
                    global_stop.request_stop();
                }
            }
        }

        thread::sleep(POLL_INTERVAL);
    }
}
