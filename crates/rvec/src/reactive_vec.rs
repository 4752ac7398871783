#![forbid(unsafe_code)]

//! Observable `Vec<T>` wrapper that emits a [`VecEvent`] per mutation.
//!
//! # Design
//!
//! [`ReactiveVec<T, B>`] owns a plain `Vec<T>` and an event bus `B`. Each
//! named mutating operation changes the storage first, then emits exactly
//! one event through [`EventBus::emit`], then returns. Operations that leave
//! the state unchanged emit nothing.
//!
//! Payloads are owned clones of the affected values, which is why the
//! notifying operations require `T: Clone`.
//!
//! # Performance
//!
//! | Operation           | Complexity                          |
//! |---------------------|-------------------------------------|
//! | `push()`            | O(1) amortized + clone + emit       |
//! | `pop()`             | O(1) + clone + emit                 |
//! | `remove()`          | O(n) shift + clone + emit           |
//! | `update_if_exists()`| O(1) + clone + emit                 |
//! | `resize()`          | O(|new - old|) + emit               |
//! | Indexed read/write  | O(1), no emit                       |
//!
//! # Failure Modes
//!
//! - **Out-of-range checked access**: `at()` / `at_mut()` return
//!   [`VecError::OutOfRange`].
//! - **Out-of-range unchecked access**: `Index`, `IndexMut` and `remove()`
//!   panic. Callers must verify the index.
//! - **Oversized capacity**: `reserve()` and the config constructors fall
//!   back to the current capacity and log a warning instead of aborting on
//!   capacity overflow or allocation failure.
//! - **Re-entrant mutation**: a handler cannot reach the vector mutably
//!   while it is emitting, since the emitting call holds `&mut self`. Sharing
//!   the vector through `Rc<RefCell<..>>` and mutating from a handler panics
//!   on the borrow.

use std::fmt;
use std::ops::{Index, IndexMut};

use rvec_signal::{EventBus, SignalBus, Subscription};

use crate::config::ReactiveVecConfig;
use crate::error::VecError;
use crate::event::{VecEvent, VecEventKind};

/// Reservations at or above this many elements are logged at debug level.
const LARGE_RESERVE: usize = 1 << 20;

/// A dynamic array that notifies its bus about every structural change.
///
/// # Invariants
///
/// 1. `capacity() >= len()`.
/// 2. Each named mutation emits at most one event, after the state change
///    and before returning.
/// 3. A no-op (pop/clear on empty, resize to the same length, reserve that
///    does not grow, update out of range) emits nothing.
/// 4. Construction and drop never emit.
pub struct ReactiveVec<T, B = SignalBus<VecEvent<T>>> {
    items: Vec<T>,
    bus: B,
    trace_events: bool,
}

impl<T: fmt::Debug, B> fmt::Debug for ReactiveVec<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactiveVec")
            .field("items", &self.items)
            .field("len", &self.items.len())
            .field("capacity", &self.items.capacity())
            .finish_non_exhaustive()
    }
}

impl<T, B: Default> Default for ReactiveVec<T, B> {
    fn default() -> Self {
        Self::with_bus(B::default())
    }
}

// ---------------------------------------------------------------------------
// Construction with the default SignalBus
// ---------------------------------------------------------------------------

impl<T: 'static> ReactiveVec<T> {
    /// Create an empty vector with its own [`SignalBus`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_bus(SignalBus::new())
    }

    /// Create a vector holding `n` clones of `value`.
    #[must_use]
    pub fn from_elem(n: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_elem_with_bus(n, value, SignalBus::new())
    }

    /// Create a vector holding `values`, in order.
    #[must_use]
    pub fn from_vec(values: Vec<T>) -> Self {
        Self::from_vec_with_bus(values, SignalBus::new())
    }

    /// Create an empty vector configured by `config`.
    #[must_use]
    pub fn with_config(config: &ReactiveVecConfig) -> Self {
        Self::with_config_and_bus(config, SignalBus::new())
    }

    /// Register `handler` for events of exactly `kind`.
    ///
    /// Equivalent to `self.bus().register(kind, handler)`.
    pub fn on(
        &self,
        kind: VecEventKind,
        handler: impl Fn(&VecEvent<T>) + 'static,
    ) -> Subscription {
        self.bus.register(kind, handler)
    }

    /// Register `handler` for every event.
    pub fn on_any(&self, handler: impl Fn(&VecEvent<T>) + 'static) -> Subscription {
        self.bus.register_all(handler)
    }
}

impl<T: 'static> From<Vec<T>> for ReactiveVec<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }
}

impl<T: 'static> FromIterator<T> for ReactiveVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Construction with any bus, reads and silent access
// ---------------------------------------------------------------------------

impl<T, B> ReactiveVec<T, B> {
    /// Create an empty vector emitting into `bus`.
    #[must_use]
    pub fn with_bus(bus: B) -> Self {
        Self::from_vec_with_bus(Vec::new(), bus)
    }

    /// Create a vector holding `n` clones of `value`, emitting into `bus`.
    #[must_use]
    pub fn from_elem_with_bus(n: usize, value: T, bus: B) -> Self
    where
        T: Clone,
    {
        Self::from_vec_with_bus(vec![value; n], bus)
    }

    /// Create a vector holding `values`, emitting into `bus`.
    #[must_use]
    pub fn from_vec_with_bus(values: Vec<T>, bus: B) -> Self {
        Self {
            items: values,
            bus,
            trace_events: false,
        }
    }

    /// Create an empty vector configured by `config`, emitting into `bus`.
    ///
    /// The initial capacity is reserved silently. A capacity rejected by
    /// [`ReactiveVecConfig::validate`], or one the allocator refuses, is
    /// logged and the vector starts with the default capacity instead.
    #[must_use]
    pub fn with_config_and_bus(config: &ReactiveVecConfig, bus: B) -> Self {
        let mut items = Vec::new();
        match config.validate() {
            Ok(()) => {
                if let Err(err) = items.try_reserve_exact(config.initial_capacity) {
                    tracing::warn!(
                        initial_capacity = config.initial_capacity,
                        error = %err,
                        "reactive vec initial reserve failed"
                    );
                }
            }
            Err(errors) => {
                for error in &errors {
                    tracing::warn!(field = error.field, value = %error.value, "{}", error.message);
                }
            }
        }
        Self {
            items,
            bus,
            trace_events: config.trace_events,
        }
    }

    /// Whether the vector holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Reserved storage, always `>= len()`.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Bounds-checked read.
    pub fn at(&self, index: usize) -> Result<&T, VecError> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(VecError::OutOfRange { index, len })
    }

    /// Bounds-checked in-place write access. Writes through the returned
    /// reference do not notify.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, VecError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(VecError::OutOfRange { index, len })
    }

    /// Read access returning `None` when out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Write access returning `None` when out of range. Does not notify.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// The elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Mutable iteration. Writes do not notify.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// The bus this vector emits into.
    #[must_use]
    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Drop the bus and return the storage. Emits nothing.
    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }

    /// Split into storage and bus. Emits nothing.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, B) {
        (self.items, self.bus)
    }
}

// ---------------------------------------------------------------------------
// Notifying mutations
// ---------------------------------------------------------------------------

impl<T: Clone, B: EventBus<VecEvent<T>>> ReactiveVec<T, B> {
    /// Append `value`.
    ///
    /// Emits `Inserted { index: len - 1, value }`.
    pub fn push(&mut self, value: T) {
        let event_value = value.clone();
        self.items.push(value);
        let index = self.items.len() - 1;
        self.emit(VecEvent::Inserted {
            index,
            value: event_value,
        });
    }

    /// Append the value built by `make` and return a reference to it.
    ///
    /// Emits `Inserted { index: len - 1, value }` before returning.
    pub fn push_with(&mut self, make: impl FnOnce() -> T) -> &mut T {
        self.items.push(make());
        let index = self.items.len() - 1;
        let value = self.items[index].clone();
        self.emit(VecEvent::Inserted { index, value });
        &mut self.items[index]
    }

    /// Remove and return the last element.
    ///
    /// Emits `Erased { index: old_len - 1, old_value }`; emits nothing and
    /// returns `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        let removed = self.items.pop()?;
        let index = self.items.len();
        self.emit(VecEvent::Erased {
            index,
            old_value: removed.clone(),
        });
        Some(removed)
    }

    /// Remove and return the element at `index`, shifting later elements
    /// down by one.
    ///
    /// Emits `Erased { index, old_value }`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> T {
        let removed = self.items.remove(index);
        self.emit(VecEvent::Erased {
            index,
            old_value: removed.clone(),
        });
        removed
    }

    /// Remove every element. Emits `Cleared` unless already empty.
    ///
    /// Capacity is retained.
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.emit(VecEvent::Cleared);
    }

    /// Ensure `capacity() >= capacity`. Never shrinks.
    ///
    /// Emits `Reserved { new_capacity }` only when the capacity actually
    /// changed; the exact new capacity is allocator-defined.
    ///
    /// A request that overflows `isize::MAX` bytes or that the allocator
    /// refuses is logged at `warn` and leaves the vector untouched, with no
    /// event.
    pub fn reserve(&mut self, capacity: usize) {
        let old_capacity = self.items.capacity();
        if capacity <= old_capacity {
            return;
        }
        if capacity >= LARGE_RESERVE {
            tracing::debug!(requested = capacity, old_capacity, "reactive vec large reserve");
        }
        if let Err(err) = self.items.try_reserve(capacity - self.items.len()) {
            tracing::warn!(
                requested = capacity,
                old_capacity,
                error = %err,
                "reactive vec reserve failed"
            );
            return;
        }
        let new_capacity = self.items.capacity();
        if new_capacity != old_capacity {
            self.emit(VecEvent::Reserved { new_capacity });
        }
    }

    /// Grow (filling with clones of `fill`) or truncate to exactly
    /// `new_len` elements.
    ///
    /// Emits `Resized { old_size, new_size }` unless the length is unchanged.
    /// Growth never emits `Inserted`.
    pub fn resize(&mut self, new_len: usize, fill: T) {
        let old_size = self.items.len();
        if new_len == old_size {
            return;
        }
        self.items.resize(new_len, fill);
        self.emit(VecEvent::Resized {
            old_size,
            new_size: new_len,
        });
    }

    /// Like [`resize`](Self::resize), with new slots filled by calling `fill`.
    pub fn resize_with(&mut self, new_len: usize, fill: impl FnMut() -> T) {
        let old_size = self.items.len();
        if new_len == old_size {
            return;
        }
        self.items.resize_with(new_len, fill);
        self.emit(VecEvent::Resized {
            old_size,
            new_size: new_len,
        });
    }

    /// Replace the element at `index` if it exists.
    ///
    /// Returns `true` and emits `Updated { index, old_value, new_value }` when
    /// `index < len()`; returns `false` and emits nothing otherwise.
    pub fn update_if_exists(&mut self, index: usize, value: T) -> bool {
        let Some(slot) = self.items.get_mut(index) else {
            return false;
        };
        let new_value = value.clone();
        let old_value = std::mem::replace(slot, value);
        self.emit(VecEvent::Updated {
            index,
            old_value,
            new_value,
        });
        true
    }

    fn emit(&self, event: VecEvent<T>) {
        if self.trace_events {
            tracing::trace!(
                kind = %event.kind(),
                len = self.items.len(),
                capacity = self.items.capacity(),
                "reactive vec event"
            );
        }
        self.bus.emit(event);
    }
}

// ---------------------------------------------------------------------------
// Indexing and iteration (silent)
// ---------------------------------------------------------------------------

impl<T, B> Index<usize> for ReactiveVec<T, B> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= len()`.
    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T, B> IndexMut<usize> for ReactiveVec<T, B> {
    /// Writes through the returned reference do not notify.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<'a, T, B> IntoIterator for &'a ReactiveVec<T, B> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, T, B> IntoIterator for &'a mut ReactiveVec<T, B> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
