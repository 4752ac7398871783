#![forbid(unsafe_code)]

//! Change events emitted by [`ReactiveVec`](crate::ReactiveVec).
//!
//! Every payload is an owned copy, so an event stays valid however long a
//! bus holds on to it, even after later mutations move or overwrite the
//! underlying storage.

use std::fmt;

use rvec_signal::Signal;

/// Discriminant of a [`VecEvent`]; the routing key for
/// [`SignalBus::register`](rvec_signal::SignalBus::register).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VecEventKind {
    Inserted,
    Updated,
    Erased,
    Cleared,
    Reserved,
    Resized,
}

impl VecEventKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Inserted,
        Self::Updated,
        Self::Erased,
        Self::Cleared,
        Self::Reserved,
        Self::Resized,
    ];

    /// Stable lowercase name, used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inserted => "inserted",
            Self::Updated => "updated",
            Self::Erased => "erased",
            Self::Cleared => "cleared",
            Self::Reserved => "reserved",
            Self::Resized => "resized",
        }
    }
}

impl fmt::Display for VecEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single change to a [`ReactiveVec`](crate::ReactiveVec).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VecEvent<T> {
    /// An element was appended at `index`.
    Inserted { index: usize, value: T },
    /// The element at `index` was replaced.
    Updated {
        index: usize,
        old_value: T,
        new_value: T,
    },
    /// The element formerly at `index` was removed; later elements shifted
    /// down by one.
    Erased { index: usize, old_value: T },
    /// A non-empty vector was emptied.
    Cleared,
    /// Reserved capacity grew to `new_capacity`.
    Reserved { new_capacity: usize },
    /// Length changed from `old_size` to `new_size` via resize.
    Resized { old_size: usize, new_size: usize },
}

impl<T> VecEvent<T> {
    /// The kind of this event.
    #[must_use]
    pub fn kind(&self) -> VecEventKind {
        match self {
            Self::Inserted { .. } => VecEventKind::Inserted,
            Self::Updated { .. } => VecEventKind::Updated,
            Self::Erased { .. } => VecEventKind::Erased,
            Self::Cleared => VecEventKind::Cleared,
            Self::Reserved { .. } => VecEventKind::Reserved,
            Self::Resized { .. } => VecEventKind::Resized,
        }
    }

    /// The element index this event refers to, for element-level events.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Inserted { index, .. }
            | Self::Updated { index, .. }
            | Self::Erased { index, .. } => Some(*index),
            Self::Cleared | Self::Reserved { .. } | Self::Resized { .. } => None,
        }
    }

    /// Map the payload values, keeping indices and sizes.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> VecEvent<U> {
        match self {
            Self::Inserted { index, value } => VecEvent::Inserted {
                index,
                value: f(value),
            },
            Self::Updated {
                index,
                old_value,
                new_value,
            } => VecEvent::Updated {
                index,
                old_value: f(old_value),
                new_value: f(new_value),
            },
            Self::Erased { index, old_value } => VecEvent::Erased {
                index,
                old_value: f(old_value),
            },
            Self::Cleared => VecEvent::Cleared,
            Self::Reserved { new_capacity } => VecEvent::Reserved { new_capacity },
            Self::Resized { old_size, new_size } => VecEvent::Resized { old_size, new_size },
        }
    }
}

impl<T> Signal for VecEvent<T> {
    type Kind = VecEventKind;

    fn kind(&self) -> VecEventKind {
        VecEvent::kind(self)
    }
}
