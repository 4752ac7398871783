#![forbid(unsafe_code)]

//! Event bus trait and the kind-routed handler registry.
//!
//! # Design
//!
//! Emitters depend only on [`EventBus<E>`], a single `emit` capability, so a
//! container can be wired to a [`SignalBus`], a [`RecordingBus`], a
//! [`NullBus`] or any caller-provided dispatcher.
//!
//! [`SignalBus<E>`] keeps its handler list in shared, reference-counted
//! storage (`Rc<RefCell<..>>`). Each entry carries an optional kind filter:
//! an entry registered with [`SignalBus::register`] only sees events whose
//! [`Signal::kind`] matches; an entry registered with
//! [`SignalBus::register_all`] sees everything. Both kinds of entry share one
//! list, so delivery order is global registration order.
//!
//! # Performance
//!
//! | Operation        | Complexity                 |
//! |------------------|----------------------------|
//! | `register()`     | O(1) amortized             |
//! | `emit()`         | O(H) where H = handlers    |
//! | `handler_count()`| O(1)                       |
//!
//! # Failure Modes
//!
//! - **Handler panic**: propagates to the caller of `emit()`. Handlers after
//!   the panicking one are not invoked for that event.
//! - **Re-entrant emit**: a handler may emit on the same bus; the nested
//!   emission completes before the outer one resumes with its next handler.
//! - **Subscription leak**: handlers stay registered for as long as their
//!   [`Subscription`] guard lives. Dead entries are pruned lazily on emit.
//!
//! [`RecordingBus`]: crate::RecordingBus

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::subscription::Subscription;

/// An event value that knows which kind it is.
///
/// The kind is the routing key: handlers registered for a kind receive only
/// events of exactly that kind.
pub trait Signal {
    /// Discriminant type, usually a fieldless enum.
    type Kind: Copy + Eq + fmt::Debug;

    /// The kind of this event.
    fn kind(&self) -> Self::Kind;
}

/// The emission capability an observable container depends on.
///
/// Implementations must deliver (or record, or drop) the event before
/// returning; emitters assume no callback runs after `emit` returns.
pub trait EventBus<E> {
    /// Deliver `event` to this bus.
    fn emit(&self, event: E);
}

impl<E, B: EventBus<E> + ?Sized> EventBus<E> for &B {
    fn emit(&self, event: E) {
        (**self).emit(event);
    }
}

impl<E, B: EventBus<E> + ?Sized> EventBus<E> for Rc<B> {
    fn emit(&self, event: E) {
        (**self).emit(event);
    }
}

impl<E, B: EventBus<E> + ?Sized> EventBus<E> for Box<B> {
    fn emit(&self, event: E) {
        (**self).emit(event);
    }
}

/// A bus that discards every event.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NullBus;

impl<E> EventBus<E> for NullBus {
    fn emit(&self, _event: E) {}
}

/// A handler stored as a strong `Rc` by its [`Subscription`], handed out as
/// `Weak` to the bus.
type HandlerRc<E> = Rc<dyn Fn(&E)>;
type HandlerWeak<E> = Weak<dyn Fn(&E)>;

struct HandlerSlot<E: Signal> {
    /// `None` means the handler receives every kind.
    filter: Option<E::Kind>,
    handler: HandlerWeak<E>,
}

impl<E: Signal> HandlerSlot<E> {
    fn accepts(&self, kind: E::Kind) -> bool {
        self.filter.is_none_or(|k| k == kind)
    }
}

/// Shared interior for [`SignalBus<E>`].
struct BusInner<E: Signal> {
    /// Handlers in registration order. Dead entries are pruned on emit.
    slots: Vec<HandlerSlot<E>>,
    /// Number of events passed to `emit`, delivered or not.
    emitted: u64,
}

/// A shared registry of kind-filtered handlers with synchronous delivery.
///
/// Cloning a `SignalBus` creates a new handle to the **same** registry.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use rvec_signal::{Signal, SignalBus};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Door { Opened, Closed }
///
/// impl Signal for Door {
///     type Kind = Door;
///     fn kind(&self) -> Door { *self }
/// }
///
/// let bus = SignalBus::<Door>::new();
/// let opened = Rc::new(Cell::new(0));
/// let o = Rc::clone(&opened);
/// let _sub = bus.register(Door::Opened, move |_| o.set(o.get() + 1));
///
/// bus.emit(Door::Opened);
/// bus.emit(Door::Closed);
/// assert_eq!(opened.get(), 1);
/// ```
pub struct SignalBus<E: Signal> {
    inner: Rc<RefCell<BusInner<E>>>,
}

impl<E: Signal> Clone for SignalBus<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E: Signal> Default for SignalBus<E> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(BusInner {
                slots: Vec::new(),
                emitted: 0,
            })),
        }
    }
}

impl<E: Signal> fmt::Debug for SignalBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SignalBus")
            .field("handler_count", &inner.slots.len())
            .field("emitted", &inner.emitted)
            .finish()
    }
}

impl<E: Signal + 'static> SignalBus<E> {
    /// Create a bus with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events of exactly `kind`.
    ///
    /// The handler stays registered until the returned [`Subscription`] is
    /// dropped.
    pub fn register(&self, kind: E::Kind, handler: impl Fn(&E) + 'static) -> Subscription {
        self.insert(Some(kind), handler)
    }

    /// Register `handler` for every event regardless of kind.
    pub fn register_all(&self, handler: impl Fn(&E) + 'static) -> Subscription {
        self.insert(None, handler)
    }

    fn insert(&self, filter: Option<E::Kind>, handler: impl Fn(&E) + 'static) -> Subscription {
        let strong: HandlerRc<E> = Rc::new(handler);
        self.inner.borrow_mut().slots.push(HandlerSlot {
            filter,
            handler: Rc::downgrade(&strong),
        });
        // `Rc<dyn Fn(&E)>` cannot coerce to `dyn Any` directly, so box the Rc.
        Subscription::new(Box::new(strong))
    }

    /// Deliver `event` to every live handler accepting its kind, in
    /// registration order, before returning.
    ///
    /// The handler list is snapshotted up front: handlers added during
    /// delivery wait for the next emission, and a handler whose
    /// subscription is dropped mid-delivery may still see this event.
    pub fn emit(&self, event: E) {
        let kind = event.kind();
        let handlers: Vec<HandlerRc<E>> = {
            let mut inner = self.inner.borrow_mut();
            inner.emitted += 1;
            inner.slots.retain(|slot| slot.handler.strong_count() > 0);
            inner
                .slots
                .iter()
                .filter(|slot| slot.accepts(kind))
                .filter_map(|slot| slot.handler.upgrade())
                .collect()
        };

        tracing::trace!(kind = ?kind, handlers = handlers.len(), "signal emitted");

        for handler in &handlers {
            handler(&event);
        }
    }

    /// Number of registered handlers, including dead ones not yet pruned.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.inner.borrow().slots.len()
    }

    /// Total number of events emitted through this bus.
    #[must_use]
    pub fn emitted(&self) -> u64 {
        self.inner.borrow().emitted
    }
}

impl<E: Signal + 'static> EventBus<E> for SignalBus<E> {
    fn emit(&self, event: E) {
        SignalBus::emit(self, event);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
