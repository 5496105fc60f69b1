//! Event serialization point
//!
//! The session owns the current [`AppState`] and the [`Host`]. Every event,
//! from the controller or from the host, goes through [`Session::submit`]:
//!
//! ```text
//! submit ─► queue ─► (drainer) reduce ─► commit state ─► dispatch ─► Host
//!   ▲                                                               │
//!   └──────────────── HostObserver (synchronous callback) ◄─────────┘
//! ```
//!
//! Exactly one thread drains the queue at a time, so events are reduced one
//! by one in arrival order. State is committed before the dispatcher runs.
//!
//! # Reentrancy hazard
//!
//! A host may answer a command with a synchronous callback (e.g. scrolling
//! the bank immediately reports the new position). That callback re-enters
//! `submit` on the draining thread. Such events are queued behind the
//! current one instead of recursing, and are bounded: each externally
//! submitted event may cause at most `max_chained_events` reentrant events
//! before further reentrant events are dropped with a warning.

use crate::dispatch::dispatch;
use crate::event::{ButtonAction, ControllerId, InputEvent};
use crate::host::Host;
use crate::model::AppState;
use crate::observer::{EventSink, HostObserver};
use crate::reduce::reduce;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::thread::{self, ThreadId};

/// Session tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Reentrant events allowed per externally submitted event
    pub max_chained_events: usize,
    /// Show a host notification when a command targets a missing track
    pub notify_missing_tracks: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_chained_events: 256,
            notify_missing_tracks: true,
        }
    }
}

/// Chained events still allowed for one externally submitted event
///
/// Shared by the external event and everything its dispatch chains, so a
/// chain keeps its budget no matter what else is queued in between.
type ChainBudget = Arc<AtomicUsize>;

#[derive(Debug)]
struct Queued {
    event: InputEvent,
    budget: ChainBudget,
}

#[derive(Debug, Default)]
struct EventQueue {
    pending: VecDeque<Queued>,
    /// Thread currently draining, if any
    drainer: Option<ThreadId>,
    /// Budget of the event being processed by the drainer
    current: Option<ChainBudget>,
    /// Chained events dropped since the session started
    dropped: u64,
}

impl EventQueue {
    fn push_external(&mut self, event: InputEvent, max_chained: usize) {
        let budget = Arc::new(AtomicUsize::new(max_chained));
        self.pending.push_back(Queued { event, budget });
    }
}

struct SessionInner<H> {
    config: SessionConfig,
    state: Mutex<AppState>,
    host: Mutex<H>,
    queue: Mutex<EventQueue>,
}

/// Owner of the current state and the host
///
/// Cheap to clone; clones share the same state.
pub struct Session<H> {
    inner: Arc<SessionInner<H>>,
}

impl<H> Clone for Session<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Lock, recovering from poisoning
///
/// State is committed whole and the drainer role is released on unwind, so a
/// panicking host leaves nothing half-written behind.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<H: Host + Send + 'static> Session<H> {
    /// Create a session around a host that never calls back
    pub fn new(host: H, config: SessionConfig) -> Self {
        Self::with_observer(config, |_| host)
    }

    /// Create a session, handing the host an observer bound to it
    ///
    /// The observer is wired before the host exists, so the host can keep it
    /// and report changes from its own callbacks.
    pub fn with_observer(config: SessionConfig, make_host: impl FnOnce(HostObserver) -> H) -> Self {
        let inner = Arc::new_cyclic(|weak: &Weak<SessionInner<H>>| {
            let sink: Weak<dyn EventSink> = weak.clone();
            let host = make_host(HostObserver::new(sink));
            SessionInner {
                config,
                state: Mutex::new(AppState::initial()),
                host: Mutex::new(host),
                queue: Mutex::new(EventQueue::default()),
            }
        });
        log::info!(
            "session: started (max chained events: {})",
            config.max_chained_events
        );
        Self { inner }
    }

    /// Observer bound to this session
    pub fn observer(&self) -> HostObserver {
        let weak = Arc::downgrade(&self.inner);
        let sink: Weak<dyn EventSink> = weak;
        HostObserver::new(sink)
    }

    /// Feed one event; returns once it (and anything it chained) is processed,
    /// or immediately if another thread is draining
    pub fn submit(&self, event: impl Into<InputEvent>) {
        self.inner.submit(event.into());
    }

    /// Snapshot of the committed state
    pub fn state(&self) -> AppState {
        lock(&self.inner.state).clone()
    }

    /// Reentrant events dropped so far
    pub fn dropped_events(&self) -> u64 {
        lock(&self.inner.queue).dropped
    }
}

impl<H: Host + Send> EventSink for SessionInner<H> {
    fn submit(&self, event: InputEvent) {
        let current = thread::current().id();
        let max_chained = self.config.max_chained_events;
        {
            let mut queue = lock(&self.queue);
            match queue.drainer {
                Some(drainer) if drainer == current => {
                    let Some(budget) = queue.current.clone() else {
                        queue.push_external(event, max_chained);
                        return;
                    };
                    // Only read and written under the queue lock
                    let remaining = budget.load(Ordering::Relaxed);
                    if remaining == 0 {
                        queue.dropped += 1;
                        log::warn!(
                            "session: dropping chained event {:?} (more than {} chained events)",
                            event,
                            max_chained
                        );
                        return;
                    }
                    budget.store(remaining - 1, Ordering::Relaxed);
                    queue.pending.push_back(Queued { event, budget });
                    return;
                }
                Some(_) => {
                    // Another thread is draining; it will pick this up
                    queue.push_external(event, max_chained);
                    return;
                }
                None => {
                    queue.push_external(event, max_chained);
                    queue.drainer = Some(current);
                }
            }
        }
        let _guard = DrainGuard { queue: &self.queue };
        self.drain();
    }
}

/// Releases the drainer role if a dispatch panics
///
/// Events still queued are picked up by the next submitter.
struct DrainGuard<'a> {
    queue: &'a Mutex<EventQueue>,
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        if !thread::panicking() {
            return;
        }
        let mut queue = lock(self.queue);
        if queue.drainer == Some(thread::current().id()) {
            log::warn!(
                "session: dispatch panicked, {} queued events left for the next submitter",
                queue.pending.len()
            );
            queue.drainer = None;
            queue.current = None;
        }
    }
}

impl<H: Host + Send> SessionInner<H> {
    /// Process queued events until the queue is empty
    fn drain(&self) {
        loop {
            let event = {
                let mut queue = lock(&self.queue);
                match queue.pending.pop_front() {
                    Some(Queued { event, budget }) => {
                        queue.current = Some(budget);
                        event
                    }
                    None => {
                        queue.drainer = None;
                        queue.current = None;
                        return;
                    }
                }
            };
            self.process(event);
        }
    }

    fn process(&self, event: InputEvent) {
        let command = {
            let mut state = lock(&self.state);
            let (next, command) = reduce(&state, &event);
            log_latch_changes(&state, &next, &event);
            *state = next;
            command
        };

        // State is committed; host callbacks from here on see it
        let Some(command) = command else {
            return;
        };
        log::debug!("[CMD] {:?} <- {:?}", command, event);

        let mut host = lock(&self.host);
        if let Err(e) = dispatch(&mut *host, &command) {
            log::warn!("session: {} ({:?} skipped)", e, command);
            if self.config.notify_missing_tracks {
                host.notify(&e.to_string());
            }
        }
    }
}

fn log_latch_changes(before: &AppState, after: &AppState, event: &InputEvent) {
    if let InputEvent::Controller(e) = event {
        if matches!(e.control, ControllerId::F1 | ControllerId::F2) {
            let on = e.action == ButtonAction::On;
            let name = if e.control == ControllerId::F1 { "Shift" } else { "Ctrl" };
            log::debug!("{} {}", name, if on { "On" } else { "Off" });
        }
    }
    if before.mode != after.mode {
        log::info!("session: mode {:?} -> {:?}", before.mode, after.mode);
    }
    if before.current_track_bank != after.current_track_bank {
        log::info!(
            "session: track bank {} -> {}",
            before.current_track_bank,
            after.current_track_bank
        );
    }
}
