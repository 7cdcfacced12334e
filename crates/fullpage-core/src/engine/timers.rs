//! One-shot timers on the session clock
//!
//! Timers fire in deadline order; timers sharing a deadline fire in the order
//! they were scheduled. Individual timers cannot be cancelled, only the whole
//! queue.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer<T> {
    id: TimerId,
    deadline: Duration,
    task: T,
}

#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    timers: Vec<Timer<T>>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn schedule(&mut self, deadline: Duration, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer { id, deadline, task });
        id
    }

    /// Remove and return the earliest timer due at or before `now`
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, T)> {
        let position = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.deadline <= now)
            .min_by_key(|(_, timer)| (timer.deadline, timer.id))
            .map(|(position, _)| position)?;
        let timer = self.timers.swap_remove(position);
        Some((timer.deadline, timer.task))
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|timer| timer.deadline).min()
    }

    /// Drop every pending timer, returning how many were dropped
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.timers.len();
        self.timers.clear();
        dropped
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(30), "c");
        queue.schedule(ms(10), "a");
        queue.schedule(ms(20), "b");

        assert_eq!(queue.next_deadline(), Some(ms(10)));
        assert_eq!(queue.pop_due(ms(5)), None);
        assert_eq!(queue.pop_due(ms(25)), Some((ms(10), "a")));
        assert_eq!(queue.pop_due(ms(25)), Some((ms(20), "b")));
        assert_eq!(queue.pop_due(ms(25)), None);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(10), 1);
        queue.schedule(ms(10), 2);
        queue.schedule(ms(10), 3);
        let fired: Vec<i32> = std::iter::from_fn(|| queue.pop_due(ms(10)).map(|(_, t)| t)).collect();
        assert_eq!(fired, vec![1, 2, 3]);
    }

    #[test]
    fn test_cancel_all() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(1), ());
        queue.schedule(ms(2), ());
        assert_eq!(queue.cancel_all(), 2);
        assert!(queue.is_empty());
        assert_eq!(queue.pop_due(ms(100)), None);
    }
}
