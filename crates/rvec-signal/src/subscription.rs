#![forbid(unsafe_code)]

//! Subscription guards and their lifecycle management.
//!
//! # Invariants
//!
//! 1. A handler stays registered exactly as long as its [`Subscription`]
//!    is alive.
//! 2. [`SubscriptionGroup`] releases its subscriptions in registration
//!    order on drop or [`SubscriptionGroup::clear`].
//! 3. After release, no handler owned by the group fires again.

use std::any::Any;

/// RAII guard for a registered handler.
///
/// Dropping the `Subscription` drops the only strong reference to the
/// handler, so the `Weak` entry in the bus fails to upgrade on the next
/// emission and is pruned.
#[must_use = "dropping a Subscription unregisters its handler"]
pub struct Subscription {
    /// Type-erased strong reference keeping the handler `Rc` alive.
    _guard: Box<dyn Any>,
}

impl Subscription {
    pub(crate) fn new(guard: Box<dyn Any>) -> Self {
        Self { _guard: guard }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

/// Collects subscriptions for a logical owner (e.g. a list view).
///
/// When the group is dropped, every held subscription is released.
///
/// # Usage
///
/// ```
/// use rvec_signal::{Signal, SignalBus, SubscriptionGroup};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct Ping;
///
/// impl Signal for Ping {
///     type Kind = ();
///     fn kind(&self) -> Self::Kind {}
/// }
///
/// let bus = SignalBus::<Ping>::new();
/// let mut group = SubscriptionGroup::new();
/// group.hold(bus.register((), |_| {}));
/// assert_eq!(group.len(), 1);
///
/// drop(group);
/// ```
#[derive(Default)]
pub struct SubscriptionGroup {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionGroup {
    /// Create an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `sub` alive until the group is dropped or cleared.
    pub fn hold(&mut self, sub: Subscription) -> &mut Self {
        self.subscriptions.push(sub);
        self
    }

    /// Number of held subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Whether the group holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Release every held subscription now. The group stays usable.
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }
}

impl Extend<Subscription> for SubscriptionGroup {
    fn extend<I: IntoIterator<Item = Subscription>>(&mut self, iter: I) {
        self.subscriptions.extend(iter);
    }
}

impl std::fmt::Debug for SubscriptionGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionGroup")
            .field("len", &self.subscriptions.len())
            .finish()
    }
}
