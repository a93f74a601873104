//! Ownership of the live effect and cancellation of its frame loop
//!
//! - CancelToken: shared flag a frame loop checks before rescheduling
//! - Teardown: releasing an instance's loop, listeners and surface
//! - EffectSlot: owner handle holding at most one live instance
//! - Rollback: undo for a partially built instance, unless committed

use std::cell::Cell;
use std::rc::Rc;

use tracing::info;

/// Cancellation flag shared between a frame loop and its owner.
///
/// Single-threaded: clones share one `Rc<Cell<bool>>`.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Release everything an instance holds. Calling it again must be a no-op.
pub trait Teardown {
    fn teardown(&mut self);

    fn is_released(&self) -> bool;
}

/// Holds at most one live instance. Replacing tears the old one down
/// before the new one is built.
pub struct EffectSlot<T: Teardown> {
    live: Option<T>,
}

impl<T: Teardown> Default for EffectSlot<T> {
    fn default() -> Self {
        Self { live: None }
    }
}

impl<T: Teardown> EffectSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tear down the current instance (if any), then build and store a new one.
    ///
    /// If `build` fails the slot is left empty.
    pub fn replace<E, F>(&mut self, build: F) -> Result<&mut T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(mut previous) = self.live.take() {
            info!("Replacing live grid effect");
            previous.teardown();
        }
        let instance = build()?;
        Ok(self.live.insert(instance))
    }

    /// Tear down and forget the current instance
    pub fn clear(&mut self) {
        if let Some(mut previous) = self.live.take() {
            previous.teardown();
        }
    }

    pub fn current(&self) -> Option<&T> {
        self.live.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.live.as_mut()
    }

    pub fn is_live(&self) -> bool {
        self.live.as_ref().is_some_and(|t| !t.is_released())
    }
}

impl<T: Teardown> Drop for EffectSlot<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Runs `undo` on the held value when dropped, unless `commit` ran first.
///
/// Anything attached before a fallible step (e.g. a canvas put into the page)
/// goes into a `Rollback`, so an early `?` return undoes it.
pub struct Rollback<T, F: FnOnce(&T)> {
    value: T,
    undo: Option<F>,
}

impl<T, F: FnOnce(&T)> Rollback<T, F> {
    pub fn new(value: T, undo: F) -> Self {
        Self {
            value,
            undo: Some(undo),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Keep the value; `undo` will not run
    pub fn commit(&mut self) {
        self.undo = None;
    }
}

impl<T, F: FnOnce(&T)> Drop for Rollback<T, F> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            info!("Rolling back partially mounted grid effect");
            undo(&self.value);
        }
    }
}
