use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

/// Injected timer capability.
///
/// Time is measured as elapsed time since the clock was created. Tasks due at the same instant
/// are returned in the order they were scheduled.
pub trait Scheduler<T> {
    /// Elapsed time on this clock.
    fn now(&self) -> Duration;

    /// Run `task` once, `delay` from now.
    fn schedule(&mut self, delay: Duration, task: T);

    /// Number of tasks waiting to fire.
    fn pending(&self) -> usize;

    /// Wait for the earliest task and return it with its due time.
    ///
    /// Returns `None` when nothing is pending or the earliest task is due after `deadline`; in the
    /// latter case the clock still advances to `deadline`.
    fn next_due(&mut self, deadline: Option<Duration>) -> Option<(Duration, T)>;
}

struct Entry<T> {
    due: Duration,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// Min-heap of pending tasks keyed by `(due, seq)`.
pub(crate) struct TimerQueue<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    next_seq: u64,
}

impl<T> TimerQueue<T> {
    pub(crate) fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub(crate) fn push(&mut self, due: Duration, task: T) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.heap.push(Reverse(Entry { due, seq, task }));
    }

    pub(crate) fn peek_due(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse(e)| e.due)
    }

    pub(crate) fn pop(&mut self) -> Option<(Duration, T)> {
        let Reverse(e) = self.heap.pop()?;
        Some((e.due, e.task))
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (Duration, &T)> {
        self.heap.iter().map(|Reverse(e)| (e.due, &e.task))
    }
}

/// Manually advanced clock. Firing a task jumps time straight to its due instant.
pub struct VirtualClock<T> {
    now: Duration,
    queue: TimerQueue<T>,
}

impl<T> VirtualClock<T> {
    /// Clock at time zero with nothing pending.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            queue: TimerQueue::new(),
        }
    }

    /// Pending tasks with their due times, in no particular order.
    pub fn pending_tasks(&self) -> impl Iterator<Item = (Duration, &T)> {
        self.queue.iter()
    }
}

impl<T> Default for VirtualClock<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> for VirtualClock<T> {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule(&mut self, delay: Duration, task: T) {
        self.queue.push(self.now + delay, task);
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }

    fn next_due(&mut self, deadline: Option<Duration>) -> Option<(Duration, T)> {
        let due = self.queue.peek_due()?;
        if let Some(limit) = deadline
            && due > limit
        {
            self.now = self.now.max(limit);
            return None;
        }
        let (due, task) = self.queue.pop()?;
        self.now = self.now.max(due);
        Some((due, task))
    }
}

/// Wall-clock scheduler: blocks the calling thread until the next task is due.
pub struct RealtimeClock<T> {
    origin: Instant,
    queue: TimerQueue<T>,
}

impl<T> RealtimeClock<T> {
    /// Clock starting now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            queue: TimerQueue::new(),
        }
    }

    fn sleep_until(&self, at: Duration) {
        let now = self.origin.elapsed();
        if at > now {
            std::thread::sleep(at - now);
        }
    }
}

impl<T> Default for RealtimeClock<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> for RealtimeClock<T> {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn schedule(&mut self, delay: Duration, task: T) {
        let due = self.origin.elapsed() + delay;
        self.queue.push(due, task);
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }

    fn next_due(&mut self, deadline: Option<Duration>) -> Option<(Duration, T)> {
        let due = self.queue.peek_due()?;
        if let Some(limit) = deadline
            && due > limit
        {
            self.sleep_until(limit);
            return None;
        }
        self.sleep_until(due);
        self.queue.pop()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/timer.rs"]
mod tests;
