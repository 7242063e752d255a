/// Timers on a simulated millisecond clock.
///
/// Nothing here reads the wall clock.  Callers pass `now_ms` in and pull due
/// firings out one at a time with [`Scheduler::pop_due`], which keeps tests
/// deterministic and lets a timer armed during a firing still go off within
/// the same advance.

#[derive(Clone, Debug)]
struct Timer<T> {
    task: T,
    due_ms: u64,
    /// `None` for one-shots.
    period_ms: Option<u64>,
    /// Arming order, breaks ties between timers due at the same instant.
    seq: u64,
}

/// A timer that went off, with the simulated instant it was due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fired<T> {
    pub task: T,
    pub at_ms: u64,
}

#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    timers: Vec<Timer<T>>,
    next_seq: u64,
}

impl<T: Copy + PartialEq> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + PartialEq> Scheduler<T> {
    pub fn new() -> Self {
        Scheduler { timers: Vec::new(), next_seq: 0 }
    }

    /// Fire `task` every `period_ms`, first one full period after `now_ms`.
    /// Re-arming a task replaces its previous timer.
    pub fn start_periodic(&mut self, task: T, now_ms: u64, period_ms: u64) {
        let period_ms = period_ms.max(1);
        self.arm(task, now_ms + period_ms, Some(period_ms));
    }

    /// Fire `task` once, `delay_ms` after `now_ms`.  Replaces a pending one.
    pub fn start_once(&mut self, task: T, now_ms: u64, delay_ms: u64) {
        self.arm(task, now_ms + delay_ms, None);
    }

    pub fn cancel(&mut self, task: T) {
        self.timers.retain(|t| t.task != task);
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_scheduled(&self, task: T) -> bool {
        self.timers.iter().any(|t| t.task == task)
    }

    /// Remove and return the earliest timer due at or before `now_ms`.
    /// Periodic timers are re-armed one period later.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Fired<T>> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(i, _)| i)?;

        let fired = Fired {
            task: self.timers[idx].task,
            at_ms: self.timers[idx].due_ms,
        };

        match self.timers[idx].period_ms {
            Some(period) => {
                let seq = self.bump_seq();
                let timer = &mut self.timers[idx];
                timer.due_ms += period;
                timer.seq = seq;
            }
            None => {
                self.timers.remove(idx);
            }
        }
        Some(fired)
    }

    fn arm(&mut self, task: T, due_ms: u64, period_ms: Option<u64>) {
        self.cancel(task);
        let seq = self.bump_seq();
        self.timers.push(Timer { task, due_ms, period_ms, seq });
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}
