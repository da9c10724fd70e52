use std::rc::Rc;
use std::time::Duration;

use atdigital_chat_core::Scheduler;
use gloo_timers::callback::{Interval, Timeout};

/// Drives the typewriter from browser intervals.
pub struct IntervalScheduler {
    on_tick: Rc<dyn Fn()>,
}

impl IntervalScheduler {
    pub fn new(on_tick: impl Fn() + 'static) -> Self {
        Self { on_tick: Rc::new(on_tick) }
    }
}

impl Scheduler for IntervalScheduler {
    type Handle = TickTimer;

    fn every(&mut self, period: Duration) -> TickTimer {
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX).max(1);
        let on_tick = Rc::clone(&self.on_tick);
        TickTimer(Some(Interval::new(millis, move || on_tick())))
    }
}

/// Clears its interval on drop.
///
/// The last tick of a message drops its own timer from inside the interval
/// callback, so the callback closure is released on a later turn of the
/// event loop instead of while it is still running.
pub struct TickTimer(Option<Interval>);

impl Drop for TickTimer {
    fn drop(&mut self) {
        if let Some(interval) = self.0.take() {
            let callback = interval.cancel();
            Timeout::new(0, move || drop(callback)).forget();
        }
    }
}
