#![forbid(unsafe_code)]

//! Observable dynamic array for rvec.
//!
//! [`ReactiveVec<T, B>`] behaves like a `Vec<T>` but, after every
//! state-changing operation, emits exactly one [`VecEvent`] through an
//! [`EventBus`] (or none, when the operation changed nothing).
//!
//! # Example
//!
//! ```
//! use rvec::{ReactiveVec, VecEvent, VecEventKind};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let mut items = ReactiveVec::<i32>::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let log = Rc::clone(&seen);
//! let _sub = items.on(VecEventKind::Inserted, move |event| {
//!     if let VecEvent::Inserted { index, value } = event {
//!         log.borrow_mut().push((*index, *value));
//!     }
//! });
//!
//! items.push(42);
//! assert_eq!(*seen.borrow(), vec![(0, 42)]);
//! ```
//!
//! # Event contract
//!
//! | Operation           | Event                                   | No-op when            |
//! |---------------------|-----------------------------------------|-----------------------|
//! | `push`, `push_with` | `Inserted { index, value }`             | never                 |
//! | `pop`               | `Erased { index, old_value }`           | empty                 |
//! | `remove`            | `Erased { index, old_value }`           | never (panics if OOB) |
//! | `clear`             | `Cleared`                               | empty                 |
//! | `reserve`           | `Reserved { new_capacity }`             | capacity unchanged    |
//! | `resize`            | `Resized { old_size, new_size }`        | same length           |
//! | `update_if_exists`  | `Updated { index, old_value, new_value }` | index out of range  |
//!
//! Indexed writes (`IndexMut`, `at_mut`, `get_mut`, `iter_mut`) never
//! notify; `update_if_exists` is the notifying write.

pub mod config;
pub mod error;
pub mod event;
pub mod reactive_vec;

pub use config::{ConfigError, ConfigParse, ReactiveVecConfig};
pub use error::VecError;
pub use event::{VecEvent, VecEventKind};
pub use reactive_vec::ReactiveVec;
pub use rvec_signal::{
    EventBus, NullBus, RecordingBus, Signal, SignalBus, Subscription, SubscriptionGroup,
};
