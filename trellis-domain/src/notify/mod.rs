//! Change notification for bindable business objects.
//!
//! This module provides the engine that entities use to mutate named
//! properties and announce those mutations to binding consumers:
//!
//! - [`ChangeNotifier`]: stores nothing about the values themselves; it
//!   mediates mutation of caller-owned storage and raises "changing" /
//!   "changed" events for named properties.
//! - [`Subscription`]: RAII guard returned by the subscribe methods;
//!   dropping it unsubscribes the callback.
//! - [`SuspendGuard`]: RAII guard that suppresses all notifications while
//!   any guard is alive; suppressed notifications are dropped, not queued.
//!
//! # Invariants
//!
//! 1. Setting a property to a value equal to the current one is a no-op:
//!    no events, storage untouched.
//! 2. A "changing" event is raised strictly before the corresponding
//!    "changed" event for the same mutation, when both are enabled.
//! 3. While the suspension depth is greater than zero, no events are
//!    raised for any property, regardless of the enablement flags, and
//!    nothing is replayed when suspension ends.
//! 4. Batch notification honors the configured [`BindingMode`]: one event
//!    for the first name under `Coalesced`, one event per name in order
//!    under `PerProperty`.
//! 5. Subscribers are notified in registration order; dropping a
//!    [`Subscription`] removes its callback before the next notification
//!    cycle.
//!
//! [`BindingMode`]: trellis_core::types::BindingMode

pub mod notifier;


pub use notifier::{ChangeNotifier, Subscription, SuspendGuard};
