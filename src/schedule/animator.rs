use std::time::Duration;

use crate::config::{TickMode, WobbleConfig};
use crate::document::drawing::Drawing;
use crate::foundation::core::PathId;
use crate::foundation::error::{WobbleError, WobbleResult};
use crate::foundation::rng::RandomSource;
use crate::schedule::timer::Scheduler;
use crate::wobble::wobbler::Wobbler;

/// Synchronized-mode delay is `period * (SYNC_BASE + SYNC_SPREAD * random())`.
const SYNC_BASE: f64 = 0.9;
const SYNC_SPREAD: f64 = 0.2;

/// Independent-mode re-arm delay is a flat `period * INDEPENDENT_SCALE`.
// The random term here carries a zero weight, so no sample is drawn for it.
const INDEPENDENT_SCALE: f64 = 0.9;

/// Timer payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskId {
    /// The shared timer of synchronized mode.
    Shared,
    /// The timer of one path in independent mode.
    Path(PathId),
}

/// A task that ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fired {
    /// What ran.
    pub task: TaskId,
    /// Clock time it was due at.
    pub at: Duration,
}

/// Drives a [`Wobbler`] on a [`Scheduler`] and copies its output into a [`Drawing`].
pub struct Animator<R, S, D> {
    wobbler: Wobbler<R>,
    scheduler: S,
    drawing: D,
    started: bool,
    fired: u64,
}

impl<R, S, D> Animator<R, S, D>
where
    R: RandomSource,
    S: Scheduler<TaskId>,
    D: Drawing,
{
    /// Capture every shape of `drawing` as an immutable base shape.
    pub fn new(drawing: D, config: WobbleConfig, rng: R, scheduler: S) -> WobbleResult<Self> {
        let wobbler = Wobbler::initialize(drawing.geometries(), config, rng)?;
        Ok(Self {
            wobbler,
            scheduler,
            drawing,
            started: false,
            fired: 0,
        })
    }

    /// Arm the timers.
    ///
    /// Synchronized mode ticks every path right away and arms the shared timer. Independent mode
    /// arms one timer per path at a random fraction of the period.
    #[tracing::instrument(skip(self))]
    pub fn start(&mut self) -> WobbleResult<()> {
        if self.started {
            return Err(WobbleError::schedule("animator already started"));
        }
        self.started = true;

        let period = self.wobbler.config().period();
        match self.wobbler.config().mode {
            TickMode::Synchronized => {
                let stepped = self.step_all();
                self.arm_shared(period);
                stepped?;
            }
            TickMode::Independent => {
                for i in 0..self.wobbler.len() {
                    let delay = period.mul_f64(self.wobbler.draw_unit());
                    self.scheduler.schedule(delay, TaskId::Path(PathId(i)));
                }
            }
        }
        tracing::debug!(
            mode = ?self.wobbler.config().mode,
            pending = self.scheduler.pending(),
            "timers armed"
        );
        Ok(())
    }

    /// Tick every path once and copy the result into the drawing.
    pub fn step_all(&mut self) -> WobbleResult<()> {
        self.wobbler.tick();
        for i in 0..self.wobbler.len() {
            self.apply(PathId(i))?;
        }
        Ok(())
    }

    /// Tick one path and copy the result into the drawing.
    pub fn step_path(&mut self, id: PathId) -> WobbleResult<()> {
        self.wobbler.tick_path(id)?;
        self.apply(id)
    }

    fn apply(&mut self, id: PathId) -> WobbleResult<()> {
        let d = self
            .wobbler
            .geometry(id)
            .ok_or_else(|| WobbleError::schedule(format!("unknown {id}")))?;
        self.drawing.set_geometry(id.0, d)
    }

    fn arm_shared(&mut self, period: Duration) {
        let scale = SYNC_BASE + SYNC_SPREAD * self.wobbler.draw_unit();
        self.scheduler.schedule(period.mul_f64(scale), TaskId::Shared);
    }

    /// Run the next due task, if it is due no later than `deadline`.
    pub fn run_next(&mut self, deadline: Option<Duration>) -> WobbleResult<Option<Fired>> {
        if !self.started {
            self.start()?;
        }
        let Some((at, task)) = self.scheduler.next_due(deadline) else {
            return Ok(None);
        };

        // The timer is re-armed even when the drawing rejects a write, so every task stays
        // pending exactly once.
        let period = self.wobbler.config().period();
        let stepped = match task {
            TaskId::Shared => {
                let stepped = self.step_all();
                self.arm_shared(period);
                stepped
            }
            TaskId::Path(id) => {
                let stepped = self.step_path(id);
                self.scheduler
                    .schedule(period.mul_f64(INDEPENDENT_SCALE), TaskId::Path(id));
                stepped
            }
        };
        self.fired += 1;
        stepped?;
        tracing::trace!(?task, at_ms = at.as_millis() as u64, "task fired");
        Ok(Some(Fired { task, at }))
    }

    /// Run every task due up to `until`, calling `on_fire` after each one.
    #[tracing::instrument(skip(self, on_fire))]
    pub fn run_until(
        &mut self,
        until: Duration,
        mut on_fire: impl FnMut(&Fired, &D) -> WobbleResult<()>,
    ) -> WobbleResult<u64> {
        let mut count = 0;
        while let Some(fired) = self.run_next(Some(until))? {
            on_fire(&fired, &self.drawing)?;
            count += 1;
        }
        tracing::debug!(count, "run finished");
        Ok(count)
    }

    /// Run for `duration` past the current clock time.
    pub fn run_for(
        &mut self,
        duration: Duration,
        on_fire: impl FnMut(&Fired, &D) -> WobbleResult<()>,
    ) -> WobbleResult<u64> {
        let until = self.scheduler.now() + duration;
        self.run_until(until, on_fire)
    }

    /// Whether [`Animator::start`] has run.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Tasks fired so far (not counting the immediate synchronized tick in `start`).
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// The wobbler being driven.
    pub fn wobbler(&self) -> &Wobbler<R> {
        &self.wobbler
    }

    /// The injected scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// The driven drawing.
    pub fn drawing(&self) -> &D {
        &self.drawing
    }

    /// Mutable access to the driven drawing, e.g. for one-off stylesheet edits.
    pub fn drawing_mut(&mut self) -> &mut D {
        &mut self.drawing
    }

    /// Stop animating and hand the drawing back.
    pub fn into_drawing(self) -> D {
        self.drawing
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/animator.rs"]
mod tests;
