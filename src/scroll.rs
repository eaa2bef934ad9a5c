//! Debounced scroll coordination across registered counters.
//!
//! A single [`ScrollCoordinator`] holds weak references to every live
//! counter. Scroll events arm one shared [`Debouncer`]; when it fires, a
//! visibility pass asks each counter's bounds source where its element
//! sits and starts or resets the counter accordingly. Dead registry
//! entries are pruned on every pass.
//!
//! The coordinator is deliberately clock-driven (`Instant` passed in by
//! the caller) so passes are deterministic under test. The DOM driver in
//! [`crate::render::web`] uses the browser timer queue instead, since
//! monotonic clocks are unavailable there.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use crate::counter::Counter;
use crate::visibility::{Bounds, Viewport};

/// Delay a scroll burst must quiesce for before visibility is re-checked.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(50);

/// Produces the current document bounds of a counter's element, or `None`
/// once the element is detached.
pub type BoundsSource = Rc<dyn Fn() -> Option<Bounds>>;

/// Cancel-and-reschedule timer for reacting to a rapid event stream only
/// once it quiesces.
#[derive(Clone, Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Create a debouncer with the given quiescence delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Cancel any pending deadline and schedule a new one `delay` from `now`.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Drop the pending deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is pending.
    #[inline]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it has elapsed.
    ///
    /// Returns true exactly once per armed deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

struct Entry {
    counter: Weak<RefCell<Counter>>,
    bounds: BoundsSource,
}

/// Process-wide scroll listener state: one debounce timer and a weak
/// registry of all live counters.
///
/// ## Example
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use std::time::Instant;
/// use countup_view::{Bounds, Counter, CounterConfig, ScrollCoordinator, Viewport};
///
/// let mut coordinator = ScrollCoordinator::new();
/// let counter = Rc::new(RefCell::new(Counter::new(CounterConfig::default())));
/// counter.borrow_mut().setup("42").unwrap();
/// coordinator.register(&counter, Rc::new(|| Some(Bounds::with_height(100.0, 20.0))));
///
/// // Element is fully inside the viewport, so the initial check starts it
/// let started = coordinator.check_now(Viewport::with_height(0.0, 600.0));
/// assert_eq!(started.len(), 1);
/// assert!(counter.borrow().is_running());
/// ```
pub struct ScrollCoordinator {
    debounce: Debouncer,
    entries: Vec<Entry>,
}

impl Default for ScrollCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollCoordinator {
    /// Create a coordinator with the standard 50 ms debounce delay.
    pub fn new() -> Self {
        Self::with_delay(DEBOUNCE_DELAY)
    }

    /// Create a coordinator with a custom debounce delay.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            debounce: Debouncer::new(delay),
            entries: Vec::new(),
        }
    }

    /// Register a counter and the source of its element's bounds.
    ///
    /// The registry holds only a weak reference; dropping the counter
    /// elsewhere unregisters it on the next pass.
    pub fn register(&mut self, counter: &Rc<RefCell<Counter>>, bounds: BoundsSource) {
        self.entries.push(Entry {
            counter: Rc::downgrade(counter),
            bounds,
        });
    }

    /// Number of registered entries, including any not yet pruned.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Note a scroll event: cancel and re-arm the shared debounce timer.
    pub fn on_scroll(&mut self, now: Instant) {
        self.debounce.arm(now);
    }

    /// Run a visibility pass if the debounce delay has elapsed.
    ///
    /// Returns the counters that just transitioned to running; the caller
    /// owns driving their step chains. Returns an empty list while the
    /// debounce is still pending or was never armed.
    pub fn poll(&mut self, now: Instant, viewport: Viewport) -> Vec<Rc<RefCell<Counter>>> {
        if self.debounce.fire(now) {
            self.check_now(viewport)
        } else {
            Vec::new()
        }
    }

    /// Run a visibility pass immediately, bypassing the debounce.
    ///
    /// Used at page load so counters already in view start without waiting
    /// for a scroll event. For each live counter that is not running:
    /// starts it when `auto_run` is set and its element is fully in view,
    /// resets it otherwise.
    pub fn check_now(&mut self, viewport: Viewport) -> Vec<Rc<RefCell<Counter>>> {
        self.entries
            .retain(|entry| entry.counter.strong_count() > 0);

        let mut started = Vec::new();
        for entry in &self.entries {
            let Some(counter) = entry.counter.upgrade() else {
                continue;
            };
            let mut state = counter.borrow_mut();
            if state.is_running() {
                continue;
            }
            let visible = (entry.bounds)()
                .map(|bounds| viewport.contains(bounds))
                .unwrap_or(false);
            if state.config().auto_run && visible {
                if state.run() {
                    drop(state);
                    started.push(counter);
                }
            } else {
                state.reset();
            }
        }
        tracing::trace!(
            registered = self.entries.len(),
            started = started.len(),
            "visibility pass"
        );
        started
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CounterConfig;

    fn counter(auto_run: bool) -> Rc<RefCell<Counter>> {
        let mut inner = Counter::new(CounterConfig {
            end: 100.0,
            duration: 4,
            easing: "linearTween".into(),
            auto_run,
            ..Default::default()
        });
        inner.setup("100").unwrap();
        Rc::new(RefCell::new(inner))
    }

    fn fixed_bounds(top: f64, height: f64) -> BoundsSource {
        Rc::new(move || Some(Bounds::with_height(top, height)))
    }

    #[test]
    fn test_debounce_rearm_and_fire() {
        let mut debounce = Debouncer::new(Duration::from_millis(50));
        let t0 = Instant::now();

        debounce.arm(t0);
        assert!(!debounce.fire(t0 + Duration::from_millis(49)));
        assert!(debounce.is_armed());

        // A new event re-arms; the original deadline no longer counts
        debounce.arm(t0 + Duration::from_millis(40));
        assert!(!debounce.fire(t0 + Duration::from_millis(60)));
        assert!(debounce.fire(t0 + Duration::from_millis(90)));

        // Fires only once per arm
        assert!(!debounce.fire(t0 + Duration::from_millis(200)));
    }

    #[test]
    fn test_debounce_cancel() {
        let mut debounce = Debouncer::new(Duration::from_millis(50));
        let t0 = Instant::now();
        debounce.arm(t0);
        debounce.cancel();
        assert!(!debounce.fire(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn test_visible_counter_starts() {
        let mut coordinator = ScrollCoordinator::new();
        let c = counter(true);
        coordinator.register(&c, fixed_bounds(100.0, 50.0));

        let started = coordinator.check_now(Viewport::with_height(0.0, 600.0));
        assert_eq!(started.len(), 1);
        assert!(c.borrow().is_running());
    }

    #[test]
    fn test_out_of_view_counter_resets() {
        let mut coordinator = ScrollCoordinator::new();
        let c = counter(true);
        c.borrow_mut().run();
        while c.borrow_mut().tick().is_some() {}
        assert_eq!(c.borrow().displayed(), 100);

        // Completed counter whose element has scrolled out of view
        coordinator.register(&c, fixed_bounds(5000.0, 50.0));
        let started = coordinator.check_now(Viewport::with_height(0.0, 600.0));
        assert!(started.is_empty());
        assert_eq!(c.borrow().step(), 0);
        assert_eq!(c.borrow().displayed(), 0);
    }

    #[test]
    fn test_running_counter_untouched_by_pass() {
        let mut coordinator = ScrollCoordinator::new();
        let c = counter(true);
        coordinator.register(&c, fixed_bounds(5000.0, 50.0));
        c.borrow_mut().run();
        c.borrow_mut().tick();

        // Out of view but running: the pass leaves it alone
        let started = coordinator.check_now(Viewport::with_height(0.0, 600.0));
        assert!(started.is_empty());
        assert_eq!(c.borrow().step(), 1);
        assert!(c.borrow().is_running());
    }

    #[test]
    fn test_auto_run_disabled_never_starts() {
        let mut coordinator = ScrollCoordinator::new();
        let c = counter(false);
        coordinator.register(&c, fixed_bounds(100.0, 50.0));

        let started = coordinator.check_now(Viewport::with_height(0.0, 600.0));
        assert!(started.is_empty());
        assert!(!c.borrow().is_running());
    }

    #[test]
    fn test_detached_bounds_treated_as_out_of_view() {
        let mut coordinator = ScrollCoordinator::new();
        let c = counter(true);
        coordinator.register(&c, Rc::new(|| None));

        let started = coordinator.check_now(Viewport::with_height(0.0, 600.0));
        assert!(started.is_empty());
        assert!(!c.borrow().is_running());
    }

    #[test]
    fn test_dropped_counters_are_pruned() {
        let mut coordinator = ScrollCoordinator::new();
        let keep = counter(true);
        coordinator.register(&keep, fixed_bounds(100.0, 50.0));
        {
            let gone = counter(true);
            coordinator.register(&gone, fixed_bounds(200.0, 50.0));
            assert_eq!(coordinator.len(), 2);
        }

        coordinator.check_now(Viewport::with_height(0.0, 600.0));
        assert_eq!(coordinator.len(), 1);
    }

    #[test]
    fn test_poll_respects_debounce() {
        let mut coordinator = ScrollCoordinator::new();
        let c = counter(true);
        coordinator.register(&c, fixed_bounds(100.0, 50.0));
        let viewport = Viewport::with_height(0.0, 600.0);

        let t0 = Instant::now();
        coordinator.on_scroll(t0);
        assert!(coordinator
            .poll(t0 + Duration::from_millis(10), viewport)
            .is_empty());
        assert!(!c.borrow().is_running());

        let started = coordinator.poll(t0 + Duration::from_millis(50), viewport);
        assert_eq!(started.len(), 1);
        assert!(c.borrow().is_running());
    }

    #[test]
    fn test_scroll_burst_coalesces_into_one_pass() {
        let mut coordinator = ScrollCoordinator::new();
        let c = counter(true);
        coordinator.register(&c, fixed_bounds(100.0, 50.0));
        let viewport = Viewport::with_height(0.0, 600.0);

        let t0 = Instant::now();
        for i in 0..10 {
            coordinator.on_scroll(t0 + Duration::from_millis(i * 5));
            assert!(coordinator
                .poll(t0 + Duration::from_millis(i * 5 + 1), viewport)
                .is_empty());
        }
        // Quiesces after the last event
        let started = coordinator.poll(t0 + Duration::from_millis(45 + 50), viewport);
        assert_eq!(started.len(), 1);
    }
}
