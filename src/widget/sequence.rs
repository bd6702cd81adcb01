use std::time::Duration;

use crate::foundation::error::{LessonError, LessonResult};

/// A small timed state machine that steps through named stages on a fixed delay.
///
/// The machine rests in `idle`. [`StagedSequence::start`] enters the first stage, each elapsed
/// `delay` moves one stage forward, and leaving the last stage returns to `idle`. Time is fed in
/// explicitly through [`StagedSequence::advance`], so the host decides the clock.
///
/// [`StagedSequence::cancel`] is terminal: no transition fires afterwards. Widgets call it on
/// unmount.
#[derive(Clone, Debug)]
pub struct StagedSequence<P> {
    idle: P,
    stages: Vec<P>,
    delay: Duration,
    position: Option<usize>,
    elapsed: Duration,
    cancelled: bool,
}

impl<P> StagedSequence<P>
where
    P: Copy + std::fmt::Debug,
{
    /// Create a sequence. `stages` must be non-empty and `delay` non-zero.
    pub fn new(idle: P, stages: Vec<P>, delay: Duration) -> LessonResult<Self> {
        if stages.is_empty() {
            return Err(LessonError::sequence("stage list must be non-empty"));
        }
        if delay.is_zero() {
            return Err(LessonError::sequence("stage delay must be > 0"));
        }
        Ok(Self {
            idle,
            stages,
            delay,
            position: None,
            elapsed: Duration::ZERO,
            cancelled: false,
        })
    }

    /// Phase currently shown.
    pub fn current(&self) -> P {
        match self.position {
            Some(i) => self.stages[i],
            None => self.idle,
        }
    }

    /// Zero-based index of the running stage, `None` while idle.
    pub fn stage_index(&self) -> Option<usize> {
        self.position
    }

    /// Number of stages in one cycle.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Whether a cycle is in progress.
    pub fn is_running(&self) -> bool {
        self.position.is_some() && !self.cancelled
    }

    /// Whether the sequence was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Begin a cycle at the first stage, restarting if one is already running.
    ///
    /// Returns `false` once cancelled.
    pub fn start(&mut self) -> bool {
        if self.cancelled {
            return false;
        }
        self.position = Some(0);
        self.elapsed = Duration::ZERO;
        tracing::debug!(phase = ?self.stages[0], "sequence started");
        true
    }

    /// Feed elapsed time, returning every phase entered, in order.
    pub fn advance(&mut self, dt: Duration) -> Vec<P> {
        let mut entered = Vec::new();
        if self.cancelled {
            return entered;
        }
        let Some(mut i) = self.position else {
            return entered;
        };

        self.elapsed = self.elapsed.saturating_add(dt);
        while self.elapsed >= self.delay {
            self.elapsed -= self.delay;
            i += 1;
            if i < self.stages.len() {
                self.position = Some(i);
                entered.push(self.stages[i]);
            } else {
                self.position = None;
                self.elapsed = Duration::ZERO;
                entered.push(self.idle);
                break;
            }
        }
        if !entered.is_empty() {
            tracing::debug!(entered = ?entered, "sequence advanced");
        }
        entered
    }

    /// Return to idle and drop the pending transition.
    pub fn reset(&mut self) {
        self.position = None;
        self.elapsed = Duration::ZERO;
    }

    /// Stop all future transitions. The current phase is kept as-is.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Time until the next transition, if one is scheduled.
    pub fn pending(&self) -> Option<Duration> {
        if self.cancelled {
            return None;
        }
        self.position.map(|_| self.delay - self.elapsed)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widget/sequence.rs"]
mod tests;
