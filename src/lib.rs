//! Wobble gives vector line drawings a hand-drawn look by jittering their points over time.
//!
//! Every `<number> <number>` pair of a path description is walked in order. Long steps are split
//! at their midpoints, the travelled distance drives a random offset that changes once per
//! `interval`, and the offset is interpolated between its old and new value along the way. The
//! distorted description is re-emitted on a timer.
//!
//! # Pieces
//!
//! - [`Wobbler`]: owns the base shapes and jitter state; [`Wobbler::tick`] re-renders them.
//! - [`Animator`]: drives a wobbler on an injected [`Scheduler`], in
//!   [`TickMode::Synchronized`] or [`TickMode::Independent`] mode, writing into a [`Drawing`].
//! - [`SvgDocument`]: a [`Drawing`] over SVG/HTML text, plus the one-time [`StylePatch`].
//!
//! Randomness ([`RandomSource`]) and time ([`Scheduler`]) are injected, so a [`Rng64`] or
//! [`FixedSequence`] on a [`VirtualClock`] reproduces a run exactly.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod document;
mod foundation;
mod geometry;
mod schedule;
mod wobble;

pub use config::{JitterCarry, TickMode, WobbleConfig};
pub use document::drawing::{Drawing, InMemoryDrawing};
pub use document::style::{FontRule, StylePatch};
pub use document::svg::SvgDocument;
pub use foundation::core::{Offset, PathId, Point, Vec2};
pub use foundation::error::{WobbleError, WobbleResult};
pub use foundation::rng::{FixedSequence, RandSource, RandomSource, Rng64, ThreadRandom};
pub use geometry::descriptor::{PathDescriptor, parse_leading_float, push_point};
pub use geometry::resample::{resample, split_segment};
pub use schedule::animator::{Animator, Fired, TaskId};
pub use schedule::timer::{RealtimeClock, Scheduler, VirtualClock};
pub use wobble::jitter::{JitterStep, SegmentJitterState};
pub use wobble::wobbler::{PathState, Wobbler};
