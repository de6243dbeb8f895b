//! Cancellable one-shot timers driven by an external clock.
//!
//! The scheduler never sleeps or spawns anything. Whoever owns it asks for
//! due tasks with [`Scheduler::pop_due`] whenever time has advanced, which
//! keeps every completion delay deterministic under a fixed or manual clock.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};

/// Handle identifying a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

/// A task whose deadline has passed.
#[derive(Debug, Clone, PartialEq)]
pub struct DueTask<T> {
    /// Handle the task was scheduled under.
    pub id: TaskId,
    /// When the task was due. Handlers should treat this as "now".
    pub due_at: DateTime<Utc>,
    /// The scheduled payload.
    pub payload: T,
}

/// Deadline-ordered queue of one-shot tasks.
///
/// Tasks with the same deadline fire in the order they were scheduled.
#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    queue: BTreeMap<(DateTime<Utc>, TaskId), T>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            queue: BTreeMap::new(),
        }
    }

    /// Schedules `payload` to become due at `due_at`.
    pub fn schedule_at(&mut self, due_at: DateTime<Utc>, payload: T) -> TaskId {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        self.queue.insert((due_at, id), payload);
        id
    }

    /// Schedules `payload` to become due `delay` after `now`.
    ///
    /// Negative delays are treated as zero.
    pub fn schedule_after(&mut self, now: DateTime<Utc>, delay: TimeDelta, payload: T) -> TaskId {
        let delay = delay.max(TimeDelta::zero());
        let due_at = now.checked_add_signed(delay).unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.schedule_at(due_at, payload)
    }

    /// Cancels every pending task whose payload matches `predicate`.
    ///
    /// Returns the number of tasks cancelled.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let doomed: Vec<(DateTime<Utc>, TaskId)> = self
            .queue
            .iter()
            .filter(|(_, payload)| predicate(payload))
            .map(|(key, _)| *key)
            .collect();
        for key in &doomed {
            self.queue.remove(key);
        }
        doomed.len()
    }

    /// Removes and returns the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: DateTime<Utc>) -> Option<DueTask<T>> {
        let (&(due_at, _), _) = self.queue.first_key_value()?;
        if due_at > now {
            return None;
        }
        let ((due_at, id), payload) = self.queue.pop_first()?;
        Some(DueTask {
            id,
            due_at,
            payload,
        })
    }

    /// The earliest pending deadline, if any.
    #[must_use]
    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.queue.keys().next().map(|(due_at, _)| *due_at)
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no tasks are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_pop_due_returns_nothing_before_deadline() {
        // Arrange
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(t0(), TimeDelta::milliseconds(800), "complete");

        // Act
        let early = scheduler.pop_due(t0() + TimeDelta::milliseconds(799));

        // Assert
        assert!(early.is_none());
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn test_pop_due_fires_in_deadline_then_schedule_order() {
        // Arrange
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(t0(), TimeDelta::milliseconds(500), "b");
        scheduler.schedule_after(t0(), TimeDelta::milliseconds(100), "a");
        scheduler.schedule_after(t0(), TimeDelta::milliseconds(500), "c");
        let now = t0() + TimeDelta::seconds(1);

        // Act
        let mut fired = Vec::new();
        while let Some(task) = scheduler.pop_due(now) {
            fired.push((task.payload, task.due_at));
        }

        // Assert
        assert_eq!(
            fired,
            vec![
                ("a", t0() + TimeDelta::milliseconds(100)),
                ("b", t0() + TimeDelta::milliseconds(500)),
                ("c", t0() + TimeDelta::milliseconds(500)),
            ]
        );
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_cancel_where_removes_matching_payloads_only() {
        // Arrange
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(t0(), TimeDelta::milliseconds(100), (1, "resolve"));
        scheduler.schedule_after(t0(), TimeDelta::milliseconds(200), (2, "resolve"));
        scheduler.schedule_after(t0(), TimeDelta::milliseconds(300), (1, "complete"));

        // Act
        let removed = scheduler.cancel_where(|(instance, _)| *instance == 1);

        // Assert
        assert_eq!(removed, 2);
        assert_eq!(scheduler.len(), 1);
        assert_eq!(
            scheduler.next_due(),
            Some(t0() + TimeDelta::milliseconds(200))
        );
    }

    #[test]
    fn test_schedule_after_clamps_negative_delay() {
        // Arrange
        let mut scheduler = Scheduler::new();

        // Act
        scheduler.schedule_after(t0(), TimeDelta::milliseconds(-50), ());

        // Assert
        assert_eq!(scheduler.next_due(), Some(t0()));
    }
}
