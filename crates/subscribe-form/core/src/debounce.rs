//! Debounce: run a function only after a quiet period.
//!
//! Each call cancels the pending one and schedules a fresh call after
//! the delay, so a burst of calls ends in exactly one execution carrying
//! the arguments of the last call. Nothing runs if the host tears the
//! timer down first.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Timer facility of the host event loop (`setTimeout`/`clearTimeout`)
pub trait Scheduler: Clone + 'static {
    type Handle: Copy + 'static;

    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Self::Handle;

    fn clear_timeout(&self, handle: Self::Handle);
}

/// A debounced wrapper around `Fn(A)`
pub struct Debounced<A: 'static, S: Scheduler> {
    func: Rc<dyn Fn(A)>,
    scheduler: S,
    delay: Duration,
    pending: Rc<Cell<Option<S::Handle>>>,
}

impl<A: 'static, S: Scheduler> Clone for Debounced<A, S> {
    fn clone(&self) -> Self {
        Self {
            func: Rc::clone(&self.func),
            scheduler: self.scheduler.clone(),
            delay: self.delay,
            pending: Rc::clone(&self.pending),
        }
    }
}

/// Wrap `func` so it only runs `delay` after the last call
pub fn debounce<A, S, F>(scheduler: S, delay: Duration, func: F) -> Debounced<A, S>
where
    A: 'static,
    S: Scheduler,
    F: Fn(A) + 'static,
{
    Debounced {
        func: Rc::new(func),
        scheduler,
        delay,
        pending: Rc::new(Cell::new(None)),
    }
}

impl<A: 'static, S: Scheduler> Debounced<A, S> {
    /// Supersede any pending call and schedule `args`
    pub fn call(&self, args: A) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.clear_timeout(handle);
        }

        let func = Rc::clone(&self.func);
        let pending = Rc::clone(&self.pending);
        let handle = self.scheduler.set_timeout(
            self.delay,
            Box::new(move || {
                pending.set(None);
                func(args);
            }),
        );
        self.pending.set(Some(handle));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::ManualClock;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    fn recorder() -> (Rc<RefCell<Vec<u32>>>, impl Fn(u32) + 'static) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        (calls, move |n| sink.borrow_mut().push(n))
    }

    #[test]
    fn test_burst_runs_once_with_last_args() {
        let clock = ManualClock::new();
        let (calls, record) = recorder();
        let debounced = debounce(clock.clone(), Duration::from_millis(1000), record);

        for n in 1..=5 {
            debounced.call(n);
            clock.advance(Duration::from_millis(200));
        }
        assert!(calls.borrow().is_empty());
        assert!(debounced.is_pending());

        clock.advance(Duration::from_millis(800));
        assert_eq!(*calls.borrow(), vec![5]);
        assert!(!debounced.is_pending());
        assert_eq!(clock.pending_timers(), 0);
    }

    #[test]
    fn test_nothing_runs_before_delay() {
        let clock = ManualClock::new();
        let (calls, record) = recorder();
        let debounced = debounce(clock.clone(), Duration::from_millis(1000), record);

        debounced.call(1);
        clock.advance(Duration::from_millis(999));
        assert!(calls.borrow().is_empty());

        clock.advance(Duration::from_millis(1));
        assert_eq!(*calls.borrow(), vec![1]);
    }

    #[test]
    fn test_separate_windows_each_run() {
        let clock = ManualClock::new();
        let (calls, record) = recorder();
        let debounced = debounce(clock.clone(), Duration::from_millis(100), record);

        debounced.call(1);
        clock.advance(Duration::from_millis(150));
        debounced.call(2);
        clock.advance(Duration::from_millis(150));

        assert_eq!(*calls.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_clones_share_pending_call() {
        let clock = ManualClock::new();
        let (calls, record) = recorder();
        let first = debounce(clock.clone(), Duration::from_millis(100), record);
        let second = first.clone();

        first.call(1);
        second.call(2);
        clock.advance(Duration::from_millis(100));

        assert_eq!(*calls.borrow(), vec![2]);
    }
}
