use crate::foundation::core::{Offset, Point};
use crate::foundation::rng::RandomSource;

/// One random offset component in `[-amplitude/2, amplitude/2)`.
pub(crate) fn draw_component(rng: &mut impl RandomSource, amplitude: f64) -> f64 {
    (rng.next_unit() - 0.5) * amplitude
}

/// Result of feeding one point through a [`SegmentJitterState`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JitterStep {
    /// Displaced point.
    pub output: Point,
    /// Offset that was added to the input point.
    pub offset: Offset,
    /// Whether this point crossed the interval and started a new segment.
    pub rolled: bool,
}

/// Per-path interpolation state: distance counter, active offset pair, previous point.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentJitterState {
    counter: f64,
    from: Offset,
    to: Offset,
    prev: Option<Point>,
}

impl SegmentJitterState {
    /// Fresh state: counter somewhere inside the first interval, random offset pair.
    ///
    /// Draw order is counter, `from.x`, `to.x`, `from.y`, `to.y`.
    pub fn seeded(rng: &mut impl RandomSource, amplitude: f64, interval: f64) -> Self {
        let counter = rng.next_unit() * interval;
        let from_x = draw_component(rng, amplitude);
        let to_x = draw_component(rng, amplitude);
        let from_y = draw_component(rng, amplitude);
        let to_y = draw_component(rng, amplitude);
        Self {
            counter,
            from: Offset::new(from_x, from_y),
            to: Offset::new(to_x, to_y),
            prev: None,
        }
    }

    /// Forget the previous point so the next walk starts a new polyline.
    pub fn begin_walk(&mut self) {
        self.prev = None;
    }

    /// Distance accumulated inside the active segment.
    pub fn counter(&self) -> f64 {
        self.counter
    }

    /// Offset at the start of the active segment.
    pub fn from(&self) -> Offset {
        self.from
    }

    /// Offset the active segment is heading to.
    pub fn to(&self) -> Offset {
        self.to
    }

    /// Last point fed in during the current walk.
    pub fn prev(&self) -> Option<Point> {
        self.prev
    }

    /// Interpolated offset for the current counter value.
    pub fn offset(&self, interval: f64) -> Offset {
        self.from.lerp(self.to, self.counter / interval)
    }

    /// Feed the next point of the walk.
    ///
    /// The caller is expected to have split long steps already, so each step adds at most half
    /// an interval to the counter.
    pub fn advance(
        &mut self,
        p: Point,
        amplitude: f64,
        interval: f64,
        rng: &mut impl RandomSource,
    ) -> JitterStep {
        let mut rolled = false;
        if let Some(prev) = self.prev {
            self.counter += prev.distance(p);
            if self.counter > interval {
                self.counter = 0.0;
                self.from = self.to;
                let x = draw_component(rng, amplitude);
                let y = draw_component(rng, amplitude);
                self.to = Offset::new(x, y);
                rolled = true;
            }
        }
        self.prev = Some(p);

        let offset = self.offset(interval);
        JitterStep {
            output: offset.apply(p),
            offset,
            rolled,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/wobble/jitter.rs"]
mod tests;
