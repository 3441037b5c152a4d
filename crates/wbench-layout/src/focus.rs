//! Focus-change feed and the per-perspective active-part tracker.
//!
//! # Design
//!
//! [`FocusFeed`] is a single-threaded publish/subscribe source shared through
//! `Rc<RefCell<..>>`. Subscribers are held as weak references; the strong
//! end lives in the [`FocusSubscription`] guard returned by
//! [`FocusFeed::subscribe`], so dropping the guard unsubscribes.
//!
//! [`ActivePartTracker`] subscribes once and only ever writes its own slot.
//! Each notification overwrites the slot (last writer wins).
//!
//! # Failure Modes
//!
//! - **Re-entrant publish**: publishing from inside a subscriber callback is
//!   allowed; the callback list is collected before any callback runs.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::part::PartHandle;

type CallbackRc = Rc<dyn Fn(&PartHandle)>;
type CallbackWeak = Weak<dyn Fn(&PartHandle)>;

struct FeedInner {
    current: Option<PartHandle>,
    version: u64,
    /// Dead entries are pruned on publish.
    subscribers: Vec<CallbackWeak>,
}

/// Announces "active part changed" to every live subscriber.
///
/// Cloning creates another handle to the same feed.
#[derive(Clone)]
pub struct FocusFeed {
    inner: Rc<RefCell<FeedInner>>,
}

impl FocusFeed {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(FeedInner {
                current: None,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Most recently published part.
    #[must_use]
    pub fn current(&self) -> Option<PartHandle> {
        self.inner.borrow().current.clone()
    }

    /// Number of publishes so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of registered subscribers, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Announce that `part` is now focused. Subscribers run in registration order.
    pub fn publish(&self, part: PartHandle) {
        let callbacks: Vec<CallbackRc> = {
            let mut inner = self.inner.borrow_mut();
            inner.current = Some(part.clone());
            inner.version += 1;
            inner.subscribers.retain(|weak| weak.strong_count() > 0);
            inner
                .subscribers
                .iter()
                .filter_map(Weak::upgrade)
                .collect()
        };
        tracing::trace!(part = part.id(), subscribers = callbacks.len(), "Active part changed");
        for callback in &callbacks {
            callback(&part);
        }
    }

    /// Register `callback` for every future publish.
    pub fn subscribe(&self, callback: impl Fn(&PartHandle) + 'static) -> FocusSubscription {
        let strong: CallbackRc = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&strong));
        FocusSubscription {
            _guard: Box::new(strong),
        }
    }
}

impl Default for FocusFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FocusFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("FocusFeed")
            .field("current", &inner.current)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

/// RAII guard for a [`FocusFeed`] subscriber.
///
/// Dropping it makes the callback unreachable; the feed prunes the dead entry
/// on its next publish.
pub struct FocusSubscription {
    _guard: Box<dyn Any>,
}

impl fmt::Debug for FocusSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusSubscription").finish_non_exhaustive()
    }
}

/// Perspective-scoped record of the focused part.
#[derive(Debug)]
pub struct ActivePartTracker {
    active: Rc<RefCell<Option<PartHandle>>>,
    before_switch: Option<PartHandle>,
    subscription: Option<FocusSubscription>,
}

impl ActivePartTracker {
    /// Create a tracker fed by `feed`.
    #[must_use]
    pub fn attach(feed: &FocusFeed) -> Self {
        let active = Rc::new(RefCell::new(None));
        let slot = Rc::downgrade(&active);
        let subscription = feed.subscribe(move |part: &PartHandle| {
            if let Some(slot) = slot.upgrade() {
                *slot.borrow_mut() = Some(part.clone());
            }
        });
        Self {
            active,
            before_switch: None,
            subscription: Some(subscription),
        }
    }

    #[must_use]
    pub fn active_part(&self) -> Option<PartHandle> {
        self.active.borrow().clone()
    }

    /// Part that was focused when [`store`](Self::store) last ran.
    #[must_use]
    pub fn before_switch(&self) -> Option<&PartHandle> {
        self.before_switch.as_ref()
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    pub(crate) fn set_active_part(&self, part: PartHandle) {
        *self.active.borrow_mut() = Some(part);
    }

    /// Copy the focused part into the pre-switch slot.
    pub(crate) fn store(&mut self) -> Option<PartHandle> {
        self.before_switch = self.active_part();
        self.before_switch.clone()
    }

    /// Release the feed subscription. Later publishes no longer reach this tracker.
    pub(crate) fn detach(&mut self) {
        self.subscription = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::Part;
    use std::cell::Cell;

    struct Stub(&'static str);

    impl Part for Stub {
        fn id(&self) -> &str {
            self.0
        }
    }

    fn part(id: &'static str) -> PartHandle {
        PartHandle::new(Stub(id))
    }

    #[test]
    fn last_publish_wins() {
        let feed = FocusFeed::new();
        let tracker = ActivePartTracker::attach(&feed);
        feed.publish(part("a"));
        feed.publish(part("b"));
        assert_eq!(tracker.active_part().as_ref().map(PartHandle::id), Some("b"));
        assert_eq!(feed.version(), 2);
    }

    #[test]
    fn dropped_subscription_stops_delivery() {
        let feed = FocusFeed::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let guard = feed.subscribe(move |_| counter.set(counter.get() + 1));
        feed.publish(part("a"));
        drop(guard);
        feed.publish(part("b"));
        assert_eq!(hits.get(), 1);
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[test]
    fn detached_tracker_ignores_feed() {
        let feed = FocusFeed::new();
        let mut tracker = ActivePartTracker::attach(&feed);
        feed.publish(part("a"));
        tracker.detach();
        assert!(!tracker.is_attached());
        feed.publish(part("b"));
        assert_eq!(tracker.active_part().as_ref().map(PartHandle::id), Some("a"));
    }

    #[test]
    fn store_copies_active_part() {
        let feed = FocusFeed::new();
        let mut tracker = ActivePartTracker::attach(&feed);
        assert!(tracker.store().is_none());
        feed.publish(part("a"));
        assert_eq!(tracker.store().as_ref().map(PartHandle::id), Some("a"));
        feed.publish(part("b"));
        assert_eq!(tracker.before_switch().map(PartHandle::id), Some("a"));
    }

    #[test]
    fn reentrant_publish_is_delivered() {
        let feed = FocusFeed::new();
        let tracker = ActivePartTracker::attach(&feed);
        let relay = feed.clone();
        let _guard = feed.subscribe(move |published| {
            if published.id() == "a" {
                relay.publish(part("b"));
            }
        });
        feed.publish(part("a"));
        assert_eq!(tracker.active_part().as_ref().map(PartHandle::id), Some("b"));
    }
}
