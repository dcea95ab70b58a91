//! Tokio driver for `TodoSession`.
//!
//! # Design
//! The session is single-owner state; only the task that owns the
//! `Controller` touches it. Requests and banner timers run as tasks in a
//! `JoinSet` and report back through an unbounded channel, so completions
//! are applied one at a time in arrival order. Dropping the controller (or
//! calling `shutdown`) aborts every outstanding request and timer.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use todolist_core::{Action, BannerId, ClientState, Effect, HttpResponse, RequestId, TodoSession, TransportError};
use tracing::debug;

use crate::transport::Transport;

#[derive(Debug)]
enum Completion {
    Request {
        request: RequestId,
        outcome: Result<HttpResponse, TransportError>,
    },
    BannerElapsed(BannerId),
}

pub struct Controller<T> {
    session: TodoSession,
    transport: Arc<T>,
    tasks: JoinSet<()>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl<T: Transport> Controller<T> {
    pub fn new(session: TodoSession, transport: T) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            session,
            transport: Arc::new(transport),
            tasks: JoinSet::new(),
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &ClientState {
        self.session.state()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn in_flight(&self) -> usize {
        self.session.in_flight()
    }

    /// Outstanding request and timer tasks.
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn dispatch(&mut self, action: Action) {
        let effects = self.session.dispatch(action);
        self.run(effects);
    }

    fn run(&mut self, effects: Vec<Effect>) {
        while self.tasks.try_join_next().is_some() {}

        for effect in effects {
            let tx = self.tx.clone();
            match effect {
                Effect::Send { request, http } => {
                    let transport = Arc::clone(&self.transport);
                    self.tasks.spawn(async move {
                        let outcome = transport.execute(http).await;
                        let _ = tx.send(Completion::Request { request, outcome });
                    });
                }
                Effect::ClearBannerAfter { banner, delay } => {
                    self.tasks.spawn(async move {
                        tokio::time::sleep(delay).await;
                        let _ = tx.send(Completion::BannerElapsed(banner));
                    });
                }
            }
        }
    }

    /// Wait for the next request or timer completion and apply it.
    ///
    /// Cancel-safe: a completion is either applied or left in the channel.
    /// Never resolves while nothing is outstanding.
    pub async fn next_completion(&mut self) {
        let Some(completion) = self.rx.recv().await else {
            return;
        };
        let action = match completion {
            Completion::Request { request, outcome } => Action::RequestCompleted { request, outcome },
            Completion::BannerElapsed(banner) => Action::BannerExpired(banner),
        };
        self.dispatch(action);
    }

    /// Apply completions until no request is in flight, including the
    /// resynchronizing list requests that successful mutations trigger.
    pub async fn settle(&mut self) {
        while self.session.in_flight() > 0 {
            self.next_completion().await;
        }
    }

    /// Abort every outstanding request and timer. Nothing reaches the
    /// session afterwards, and `settle` returns immediately.
    pub async fn shutdown(&mut self) {
        debug!(tasks = self.tasks.len(), "controller shutting down");
        self.tasks.shutdown().await;
        while self.rx.try_recv().is_ok() {}
        self.session.abandon_requests();
    }
}
