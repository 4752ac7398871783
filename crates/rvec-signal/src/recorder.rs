#![forbid(unsafe_code)]

//! A bus that records every emitted event in order.
//!
//! Useful as the trivial collaborator in tests: wire an emitter to a
//! `RecordingBus`, keep a clone, and assert on the captured log.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::bus::EventBus;

/// Captures emitted events in emission order.
///
/// Cloning a `RecordingBus` creates a new handle to the **same** log.
pub struct RecordingBus<E> {
    log: Rc<RefCell<Vec<E>>>,
}

impl<E> Clone for RecordingBus<E> {
    fn clone(&self) -> Self {
        Self {
            log: Rc::clone(&self.log),
        }
    }
}

impl<E> Default for RecordingBus<E> {
    fn default() -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for RecordingBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingBus")
            .field("events", &self.log.borrow())
            .finish()
    }
}

impl<E> RecordingBus<E> {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<E> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    /// Discard the recorded log.
    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    /// Access the recorded log by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&[E]) -> R) -> R {
        f(&self.log.borrow())
    }
}

impl<E: Clone> RecordingBus<E> {
    /// A copy of the recorded log.
    #[must_use]
    pub fn events(&self) -> Vec<E> {
        self.log.borrow().clone()
    }

    /// The most recent event, if any.
    #[must_use]
    pub fn last(&self) -> Option<E> {
        self.log.borrow().last().cloned()
    }
}

impl<E> EventBus<E> for RecordingBus<E> {
    fn emit(&self, event: E) {
        self.log.borrow_mut().push(event);
    }
}
