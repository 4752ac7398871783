#![forbid(unsafe_code)]

//! Synchronous, typed event delivery for rvec.
//!
//! This crate is the event-bus collaborator that observable containers call
//! into after every state change:
//!
//! - [`EventBus`]: the one capability an emitter depends on (`emit`).
//! - [`Signal`]: an event value that can report its kind, used for routing.
//! - [`SignalBus`]: a shared handler registry that delivers each event to
//!   every live handler registered for its exact kind.
//! - [`Subscription`]: RAII guard that keeps a handler registered.
//! - [`SubscriptionGroup`]: holds many subscriptions for one owner.
//! - [`RecordingBus`]: captures emitted events in order.
//! - [`NullBus`]: discards every event.
//!
//! # Architecture
//!
//! `SignalBus<E>` uses `Rc<RefCell<..>>` for single-threaded shared
//! ownership. Handlers are stored as `Weak` function pointers and pruned
//! lazily during emission.
//!
//! # Invariants
//!
//! 1. Handlers are invoked in registration order.
//! 2. Every handler registered for an event's kind is invoked before
//!    `emit` returns.
//! 3. Dropping a [`Subscription`] removes the handler before the next
//!    emission.
//! 4. A handler registered while an emission is in flight first sees the
//!    next emission.

pub mod bus;
pub mod recorder;
pub mod subscription;

pub use bus::{EventBus, NullBus, Signal, SignalBus};
pub use recorder::RecordingBus;
pub use subscription::{Subscription, SubscriptionGroup};
