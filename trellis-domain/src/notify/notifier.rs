//! The change-notification engine.

use log::trace;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use trellis_core::types::BindingMode;

type ChangeCallback = dyn Fn(&str);

/// RAII guard for a registered change callback.
///
/// The callback stays registered for as long as the subscription is held;
/// dropping it unsubscribes before the next notification cycle.
pub struct Subscription {
    _callback: Rc<ChangeCallback>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish()
    }
}

/// Subscriber callbacks held weakly; dead entries are purged lazily on the
/// next notification.
#[derive(Default)]
struct SubscriberList {
    entries: Vec<Weak<ChangeCallback>>,
}

impl SubscriberList {
    fn subscribe(&mut self, callback: &Rc<ChangeCallback>) {
        self.entries.push(Rc::downgrade(callback));
    }

    fn collect_live(&mut self) -> Vec<Rc<ChangeCallback>> {
        self.entries.retain(|weak| weak.strong_count() > 0);
        self.entries.iter().filter_map(Weak::upgrade).collect()
    }
}

struct NotifierInner {
    binding_mode: BindingMode,
    changed_enabled: bool,
    changing_enabled: bool,
    suspend_depth: u32,
    changing: SubscriberList,
    changed: SubscriberList,
}

/// Mediates property mutation and change notification for one entity.
///
/// The notifier owns no property values. An entity keeps its fields as
/// ordinary typed storage and routes every mutation through
/// [`ChangeNotifier::set_property`], which performs the equality check,
/// raises "changing" before the write and "changed" after it, and reports
/// whether an effective change happened.
///
/// Cloning produces another handle to the same shared state, so a notifier
/// can be handed to binding consumers while the entity keeps mutating
/// through its own handle.
pub struct ChangeNotifier {
    inner: Rc<RefCell<NotifierInner>>,
}

impl ChangeNotifier {
    /// Creates a notifier with the given batching policy, notifications
    /// enabled, and no suspension.
    pub fn new(binding_mode: BindingMode) -> Self {
        Self {
            inner: Rc::new(RefCell::new(NotifierInner {
                binding_mode,
                changed_enabled: true,
                changing_enabled: true,
                suspend_depth: 0,
                changing: SubscriberList::default(),
                changed: SubscriberList::default(),
            })),
        }
    }

    /// Mutates `slot` to `value` and raises change events for `name`.
    ///
    /// When `value` equals the current content of `slot` nothing happens
    /// and `false` is returned. Otherwise a "changing" event is raised
    /// (subject to its enablement flag and suspension), the value is
    /// written, a "changed" event is raised likewise, and `true` is
    /// returned so the caller can trigger revalidation.
    pub fn set_property<T: PartialEq>(&self, name: &str, slot: &mut T, value: T) -> bool {
        if *slot == value {
            return false;
        }
        self.raise_changing(name);
        *slot = value;
        trace!("property '{}' changed", name);
        self.raise_changed(name);
        true
    }

    /// Raises "changed" notifications for a batch of properties that have
    /// already been mutated.
    ///
    /// Under [`BindingMode::Coalesced`] only the first name raises an
    /// event; under [`BindingMode::PerProperty`] one event is raised per
    /// name, in the given order. Disabled or suspended notifications are
    /// dropped entirely.
    pub fn notify_properties_changed(&self, names: &[&str]) {
        let (deliver, mode) = {
            let inner = self.inner.borrow();
            (
                inner.changed_enabled && inner.suspend_depth == 0,
                inner.binding_mode,
            )
        };
        if !deliver || names.is_empty() {
            return;
        }
        match mode {
            BindingMode::Coalesced => self.raise_changed(names[0]),
            BindingMode::PerProperty => {
                for name in names {
                    self.raise_changed(name);
                }
            }
        }
    }

    /// Registers a callback for "changing" events (raised before the new
    /// value is written).
    pub fn on_changing(&self, callback: impl Fn(&str) + 'static) -> Subscription {
        let callback: Rc<ChangeCallback> = Rc::new(callback);
        self.inner.borrow_mut().changing.subscribe(&callback);
        Subscription { _callback: callback }
    }

    /// Registers a callback for "changed" events (raised after the new
    /// value is written).
    pub fn on_changed(&self, callback: impl Fn(&str) + 'static) -> Subscription {
        let callback: Rc<ChangeCallback> = Rc::new(callback);
        self.inner.borrow_mut().changed.subscribe(&callback);
        Subscription { _callback: callback }
    }

    /// Suspends all notification delivery until the returned guard (and
    /// every other outstanding guard) is dropped.
    ///
    /// Notifications raised while suspended are dropped, not queued; the
    /// outermost release resumes delivery without replaying anything.
    #[must_use = "notifications resume as soon as the guard is dropped"]
    pub fn suspend(&self) -> SuspendGuard {
        let mut inner = self.inner.borrow_mut();
        inner.suspend_depth += 1;
        trace!("notifications suspended (depth {})", inner.suspend_depth);
        SuspendGuard {
            inner: Rc::clone(&self.inner),
        }
    }

    /// Returns whether any suspension guard is outstanding.
    pub fn is_suspended(&self) -> bool {
        self.inner.borrow().suspend_depth > 0
    }

    /// Returns the current batching policy.
    pub fn binding_mode(&self) -> BindingMode {
        self.inner.borrow().binding_mode
    }

    /// Sets the batching policy for subsequent batch notifications.
    pub fn set_binding_mode(&self, mode: BindingMode) {
        self.inner.borrow_mut().binding_mode = mode;
    }

    /// Returns whether "changed" events are enabled.
    pub fn changed_enabled(&self) -> bool {
        self.inner.borrow().changed_enabled
    }

    /// Enables or disables "changed" events. The toggle has no retroactive
    /// effect on events already raised or dropped.
    pub fn set_changed_enabled(&self, enabled: bool) {
        self.inner.borrow_mut().changed_enabled = enabled;
    }

    /// Returns whether "changing" events are enabled.
    pub fn changing_enabled(&self) -> bool {
        self.inner.borrow().changing_enabled
    }

    /// Enables or disables "changing" events.
    pub fn set_changing_enabled(&self, enabled: bool) {
        self.inner.borrow_mut().changing_enabled = enabled;
    }

    fn raise_changing(&self, name: &str) {
        let callbacks = {
            let mut inner = self.inner.borrow_mut();
            if !inner.changing_enabled || inner.suspend_depth > 0 {
                return;
            }
            inner.changing.collect_live()
        };
        // Invoke outside the borrow so callbacks may call back into the
        // notifier.
        for callback in callbacks {
            callback(name);
        }
    }

    fn raise_changed(&self, name: &str) {
        let callbacks = {
            let mut inner = self.inner.borrow_mut();
            if !inner.changed_enabled || inner.suspend_depth > 0 {
                return;
            }
            inner.changed.collect_live()
        };
        for callback in callbacks {
            callback(name);
        }
    }
}

impl Clone for ChangeNotifier {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new(BindingMode::default())
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ChangeNotifier")
            .field("binding_mode", &inner.binding_mode)
            .field("changed_enabled", &inner.changed_enabled)
            .field("changing_enabled", &inner.changing_enabled)
            .field("suspend_depth", &inner.suspend_depth)
            .finish()
    }
}

/// RAII guard for a suspension scope.
///
/// Each guard decrements the suspension depth exactly once when dropped,
/// so suspension is released on every exit path of the scope that acquired
/// it and over-release is unrepresentable. Guards from the same notifier
/// nest; delivery resumes when the last one is dropped.
pub struct SuspendGuard {
    inner: Rc<RefCell<NotifierInner>>,
}

impl Drop for SuspendGuard {
    fn drop(&mut self) {
        let mut inner = self.inner.borrow_mut();
        debug_assert!(inner.suspend_depth > 0, "suspension depth underflow");
        inner.suspend_depth = inner.suspend_depth.saturating_sub(1);
        trace!("notifications resumed at depth {}", inner.suspend_depth);
    }
}

impl fmt::Debug for SuspendGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuspendGuard")
            .field("depth", &self.inner.borrow().suspend_depth)
            .finish()
    }
}
