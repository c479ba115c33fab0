use crate::config::{JitterCarry, WobbleConfig};
use crate::foundation::core::PathId;
use crate::foundation::error::{WobbleError, WobbleResult};
use crate::foundation::rng::RandomSource;
use crate::geometry::descriptor::{PathDescriptor, push_point};
use crate::geometry::resample::split_segment;
use crate::wobble::jitter::SegmentJitterState;

/// Everything tracked for one path.
#[derive(Clone, Debug)]
pub struct PathState {
    base: PathDescriptor,
    jitter: SegmentJitterState,
    rendered: String,
}

impl PathState {
    /// Parsed original description.
    pub fn base(&self) -> &PathDescriptor {
        &self.base
    }

    /// Jitter state as left by the last tick.
    pub fn jitter(&self) -> &SegmentJitterState {
        &self.jitter
    }

    /// Most recently rendered description (the original text before the first tick).
    pub fn rendered(&self) -> &str {
        &self.rendered
    }
}

/// Controller owning every tracked path, its jitter state and the random source.
#[derive(Debug)]
pub struct Wobbler<R> {
    config: WobbleConfig,
    rng: R,
    paths: Vec<PathState>,
}

impl<R: RandomSource> Wobbler<R> {
    /// Parse every path description and seed its jitter state.
    #[tracing::instrument(skip_all, fields(paths = tracing::field::Empty))]
    pub fn initialize<I, S>(paths: I, config: WobbleConfig, mut rng: R) -> WobbleResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        config.validate()?;
        let paths: Vec<PathState> = paths
            .into_iter()
            .map(|d| {
                let base = PathDescriptor::parse(d);
                let jitter = SegmentJitterState::seeded(&mut rng, config.amplitude, config.interval);
                PathState {
                    rendered: base.source().to_string(),
                    base,
                    jitter,
                }
            })
            .collect();

        tracing::Span::current().record("paths", paths.len());
        tracing::debug!(
            points = paths.iter().map(|p| p.base.len()).sum::<usize>(),
            "wobbler initialized"
        );

        Ok(Self { config, rng, paths })
    }

    /// Advance every path by one step.
    pub fn tick(&mut self) {
        for i in 0..self.paths.len() {
            self.tick_index(i);
        }
    }

    /// Advance a single path by one step and return its new description.
    pub fn tick_path(&mut self, id: PathId) -> WobbleResult<&str> {
        if id.0 >= self.paths.len() {
            return Err(WobbleError::schedule(format!("unknown {id}")));
        }
        self.tick_index(id.0);
        Ok(&self.paths[id.0].rendered)
    }

    fn tick_index(&mut self, index: usize) {
        let WobbleConfig {
            amplitude,
            interval,
            carry,
            ..
        } = self.config;
        let rng = &mut self.rng;
        let state = &mut self.paths[index];

        match carry {
            JitterCarry::Persist => state.jitter.begin_walk(),
            JitterCarry::Reseed => {
                state.jitter = SegmentJitterState::seeded(rng, amplitude, interval);
            }
        }

        let jitter = &mut state.jitter;
        let half = interval * 0.5;
        state.rendered = state.base.render_with(|_, p, out| {
            let emitted = match jitter.prev() {
                Some(prev) => split_segment(prev, p, half),
                None => vec![p],
            };
            for q in emitted {
                let step = jitter.advance(q, amplitude, interval, rng);
                push_point(out, step.output);
            }
        });
        tracing::trace!(path = index, len = state.rendered.len(), "path ticked");
    }

    /// Fixed configuration.
    pub fn config(&self) -> &WobbleConfig {
        &self.config
    }

    /// Number of tracked paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True when no path is tracked.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// State of one path.
    pub fn path(&self, id: PathId) -> Option<&PathState> {
        self.paths.get(id.0)
    }

    /// All path states, in initialization order.
    pub fn paths(&self) -> &[PathState] {
        &self.paths
    }

    /// Current description of one path.
    pub fn geometry(&self, id: PathId) -> Option<&str> {
        self.path(id).map(PathState::rendered)
    }

    /// One sample from the shared random source.
    pub(crate) fn draw_unit(&mut self) -> f64 {
        self.rng.next_unit()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/wobble/wobbler.rs"]
mod tests;
