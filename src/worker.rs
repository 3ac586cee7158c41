//! # Worker Module
//!
//! Runs an agent on its own thread so a front-end loop never blocks on a
//! search. Requests carry an independent copy of the game and a request id;
//! the worker writes its answer into a shared latest-reply slot, and the
//! consumer discards replies whose id no longer matches (a search that was
//! overtaken by an undo or a new request). Dropping the worker raises the
//! stop flag and joins the thread.

use crate::agents::{create_agent, SearchStatistics};
use crate::board::Point;
use crate::config::EngineConfig;
use crate::game::{AgentKind, GameType};
use crate::game_wrapper::GameWrapper;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

enum WorkerRequest {
    Search { id: u64, game: GameWrapper },
    Shutdown,
}

/// Answer to one search request.
#[derive(Debug, Clone)]
pub struct SearchReply {
    pub id: u64,
    /// The chosen placement, or `None` for "no move" (pass or resign,
    /// decided by the consumer).
    pub choice: Option<Point>,
    pub statistics: Option<SearchStatistics>,
}

/// One agent running on a dedicated thread.
pub struct AgentWorker {
    handle: Option<JoinHandle<()>>,
    tx: Sender<WorkerRequest>,
    reply: Arc<Mutex<Option<SearchReply>>>,
    stop_flag: Arc<AtomicBool>,
}

impl AgentWorker {
    /// Spawns the worker with its own agent instance. An `AgentKind::None`
    /// worker answers every request with no move.
    pub fn new(
        kind: AgentKind,
        game_type: GameType,
        config: &EngineConfig,
        seed: Option<u64>,
    ) -> Self {
        let (tx, rx) = mpsc::channel::<WorkerRequest>();
        let reply = Arc::new(Mutex::new(None));
        let stop_flag = Arc::new(AtomicBool::new(false));

        let slot = reply.clone();
        let flag = stop_flag.clone();
        let mut agent = create_agent(kind, game_type, config, seed);
        if let Some(agent) = agent.as_mut() {
            agent.set_stop_flag(flag.clone());
        }

        let handle = thread::spawn(move || {
            for request in rx {
                match request {
                    WorkerRequest::Search { id, game } => {
                        let (choice, statistics) = match agent.as_mut() {
                            Some(agent) => {
                                let choice = agent.choose(&game);
                                (choice, agent.statistics())
                            }
                            None => (None, None),
                        };
                        if flag.load(Ordering::Relaxed) {
                            // An interrupted search answers a question the
                            // consumer no longer asks.
                            continue;
                        }
                        *slot.lock() = Some(SearchReply {
                            id,
                            choice,
                            statistics,
                        });
                    }
                    WorkerRequest::Shutdown => break,
                }
            }
        });

        AgentWorker {
            handle: Some(handle),
            tx,
            reply,
            stop_flag,
        }
    }

    /// Queues a search over `game` (an independent copy). Clears any
    /// pending interrupt first.
    pub fn request(&self, id: u64, game: GameWrapper) {
        self.stop_flag.store(false, Ordering::Relaxed);
        self.tx.send(WorkerRequest::Search { id, game }).ok();
    }

    /// Takes the reply for `id` if one has arrived. A reply for any other
    /// id is stale and dropped.
    pub fn take_reply(&self, id: u64) -> Option<SearchReply> {
        let mut slot = self.reply.lock();
        match slot.take() {
            Some(reply) if reply.id == id => Some(reply),
            _ => None,
        }
    }

    /// Asks a running search to stop as soon as it can.
    pub fn interrupt(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }

    /// Blocks until the reply for `id` arrives, polling the slot.
    pub fn wait_for_reply(&self, id: u64, poll: Duration) -> SearchReply {
        loop {
            if let Some(reply) = self.take_reply(id) {
                return reply;
            }
            thread::sleep(poll);
        }
    }
}

impl Drop for AgentWorker {
    fn drop(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        self.tx.send(WorkerRequest::Shutdown).ok();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
