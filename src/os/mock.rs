//! Fake driver used by unit tests.
//!
//! The real backends need a live display server and GL driver, so unit
//! tests run against this stand-in instead. It models the pieces of driver
//! behavior the crate relies on: a per-thread "current context", handle
//! lifetimes, and per-context proc-address resolution with an injectable
//! mismatch.
//!
//! State is process-global, like a real driver's; tests serialize through
//! [`lock_driver`], which also resets the injectable faults.

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{Error, Result};

const ONSCREEN_ID: usize = 1;
const PROBE_ADDR: usize = 0x1000;
const PROBE_ADDR_UNSTABLE: usize = 0x2000;

static NEXT_ID: AtomicUsize = AtomicUsize::new(2);
static LIVE_CONTEXTS: AtomicUsize = AtomicUsize::new(0);
static UNSTABLE_PROBE: AtomicBool = AtomicBool::new(false);
static EVENTS: Mutex<Vec<Event>> = Mutex::new(Vec::new());
static DRIVER_LOCK: Mutex<()> = Mutex::new(());

thread_local! {
    // 0 = nothing current on this thread.
    static CURRENT: Cell<usize> = Cell::new(0);
}

/// What the fake driver was asked to do, in order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    MadeCurrent(usize),
    ClearedCurrent,
    /// Pushed by tests themselves, to observe ordering around their callbacks.
    Marker(&'static str),
}

#[derive(Debug)]
pub(crate) struct OsOffscreenContext {
    id: usize,
}

impl OsOffscreenContext {
    pub(crate) fn create() -> Result<Self> {
        if CURRENT.with(|c| c.get()) == 0 {
            return Err(Error::no_current_context("no context is current on the calling thread"));
        }
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        LIVE_CONTEXTS.fetch_add(1, Ordering::SeqCst);
        Ok(Self { id })
    }

    pub(crate) fn make_current(&self) -> Result<()> {
        CURRENT.with(|c| c.set(self.id));
        push_event(Event::MadeCurrent(self.id));
        Ok(())
    }

    pub(crate) fn make_not_current(&self) -> Result<()> {
        CURRENT.with(|c| c.set(0));
        push_event(Event::ClearedCurrent);
        Ok(())
    }
}

impl Drop for OsOffscreenContext {
    fn drop(&mut self) {
        LIVE_CONTEXTS.fetch_sub(1, Ordering::SeqCst);
    }
}

pub(crate) fn probe_proc_address() -> usize {
    // An "unstable" driver places the entry point somewhere else in every
    // offscreen context; the onscreen context keeps the baseline address.
    let current = CURRENT.with(|c| c.get());
    if current != ONSCREEN_ID && UNSTABLE_PROBE.load(Ordering::SeqCst) {
        PROBE_ADDR_UNSTABLE
    } else {
        PROBE_ADDR
    }
}

/// Serializes tests against the fake driver and resets its injectable state.
pub(crate) fn lock_driver() -> MutexGuard<'static, ()> {
    let guard = DRIVER_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    UNSTABLE_PROBE.store(false, Ordering::SeqCst);
    take_events();
    guard
}

/// Makes a pretend onscreen context current on this thread, as the embedding
/// application would have; cleared again when the guard drops.
pub(crate) fn bind_onscreen() -> OnscreenGuard {
    CURRENT.with(|c| c.set(ONSCREEN_ID));
    OnscreenGuard
}

pub(crate) struct OnscreenGuard;

impl Drop for OnscreenGuard {
    fn drop(&mut self) {
        CURRENT.with(|c| c.set(0));
    }
}

pub(crate) fn set_unstable_probe(unstable: bool) {
    UNSTABLE_PROBE.store(unstable, Ordering::SeqCst);
}

pub(crate) fn current_context_id() -> usize {
    CURRENT.with(|c| c.get())
}

pub(crate) fn live_contexts() -> usize {
    LIVE_CONTEXTS.load(Ordering::SeqCst)
}

pub(crate) fn push_event(e: Event) {
    EVENTS.lock().unwrap_or_else(PoisonError::into_inner).push(e);
}

pub(crate) fn take_events() -> Vec<Event> {
    std::mem::take(&mut *EVENTS.lock().unwrap_or_else(PoisonError::into_inner))
}
