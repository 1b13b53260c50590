//! Virtual-time timers standing in for interval and timeout callbacks.
//!
//! Timers carry a payload event instead of a closure, so whoever drives the
//! scheduler handles each event with full `&mut` access to its own state.
//! Every timer belongs to a [`CancelToken`]; cancelling the token retires
//! all of its timers at once.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[derive(Debug)]
struct Timer<E> {
    id: TimerId,
    due: Duration,
    period: Option<Duration>,
    token: CancelToken,
    event: E,
}

#[derive(Debug)]
pub struct Scheduler<E> {
    now: Duration,
    next_id: u64,
    timers: Vec<Timer<E>>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            timers: Vec::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Live timers whose token has not been cancelled.
    pub fn pending(&self) -> usize {
        self.timers
            .iter()
            .filter(|timer| !timer.token.is_cancelled())
            .count()
    }

    pub fn set_timeout(&mut self, delay: Duration, token: &CancelToken, event: E) -> TimerId {
        self.push(delay, None, token, event)
    }

    /// Fires every `period`, first after one full period. A zero period is
    /// bumped to one millisecond so the timer cannot starve the loop.
    pub fn set_interval(&mut self, period: Duration, token: &CancelToken, event: E) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        self.push(period, Some(period), token, event)
    }

    pub fn cancel(&mut self, id: TimerId) {
        self.timers.retain(|timer| timer.id != id);
    }

    fn push(
        &mut self,
        delay: Duration,
        period: Option<Duration>,
        token: &CancelToken,
        event: E,
    ) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            due: self.now + delay,
            period,
            token: token.clone(),
            event,
        });
        id
    }

    fn prune_cancelled(&mut self) {
        self.timers.retain(|timer| !timer.token.is_cancelled());
    }

    /// Move virtual time forward without firing anything past `deadline`.
    pub fn advance_to(&mut self, deadline: Duration) {
        self.prune_cancelled();
        if deadline > self.now {
            self.now = deadline;
        }
    }
}

impl<E: Clone> Scheduler<E> {
    /// Pop the earliest timer due at or before `deadline`, moving `now` to its
    /// due time. Ties go to the timer created first. Intervals are re-armed.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<E> {
        self.prune_cancelled();

        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= deadline)
            .min_by_key(|(_, timer)| (timer.due, timer.id))
            .map(|(index, _)| index)?;

        let due = self.timers[index].due;
        if due > self.now {
            self.now = due;
        }

        match self.timers[index].period {
            Some(period) => {
                let timer = &mut self.timers[index];
                timer.due += period;
                Some(timer.event.clone())
            }
            None => Some(self.timers.swap_remove(index).event),
        }
    }
}
