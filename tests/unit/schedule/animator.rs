use super::*;
use crate::config::TickMode;
use crate::document::drawing::InMemoryDrawing;
use crate::foundation::rng::{FixedSequence, Rng64};
use crate::schedule::timer::VirtualClock;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn drawing() -> InMemoryDrawing {
    InMemoryDrawing::new(["M 0 0 L 100 0", "M 0 10 L 100 10", "M Z"])
}

/// Drawing whose writes can be switched off.
struct FlakyDrawing {
    inner: InMemoryDrawing,
    reject: bool,
}

impl FlakyDrawing {
    fn new() -> Self {
        Self {
            inner: drawing(),
            reject: false,
        }
    }
}

impl Drawing for FlakyDrawing {
    fn shape_count(&self) -> usize {
        self.inner.shape_count()
    }

    fn geometry(&self, index: usize) -> Option<&str> {
        self.inner.geometry(index)
    }

    fn set_geometry(&mut self, index: usize, d: &str) -> WobbleResult<()> {
        if self.reject {
            return Err(WobbleError::document("read-only"));
        }
        self.inner.set_geometry(index, d)
    }
}

fn config(mode: TickMode) -> WobbleConfig {
    WobbleConfig {
        mode,
        ..WobbleConfig::default()
    }
}

fn pending_of(clock: &VirtualClock<TaskId>) -> Vec<TaskId> {
    let mut tasks: Vec<TaskId> = clock.pending_tasks().map(|(_, t)| *t).collect();
    tasks.sort_by_key(|t| match t {
        TaskId::Shared => 0,
        TaskId::Path(id) => id.0 + 1,
    });
    tasks
}

#[test]
fn synchronized_start_ticks_immediately() {
    let mut a = Animator::new(
        drawing(),
        config(TickMode::Synchronized),
        Rng64::new(1),
        VirtualClock::new(),
    )
    .unwrap();
    a.start().unwrap();

    for i in 0..3 {
        assert_eq!(a.drawing().writes(i), 1);
    }
    assert_ne!(a.drawing().geometry(0), Some("M 0 0 L 100 0"));
    assert_eq!(a.drawing().geometry(2), Some("M Z"));
    assert_eq!(pending_of(a.scheduler()), vec![TaskId::Shared]);
}

#[test]
fn synchronized_keeps_one_shared_timer() {
    let mut a = Animator::new(
        drawing(),
        config(TickMode::Synchronized),
        Rng64::new(2),
        VirtualClock::new(),
    )
    .unwrap();

    let mut times = Vec::new();
    let count = a
        .run_until(ms(5_000), |fired, _| {
            assert_eq!(fired.task, TaskId::Shared);
            times.push(fired.at);
            Ok(())
        })
        .unwrap();

    assert!(count >= 18);
    assert_eq!(pending_of(a.scheduler()), vec![TaskId::Shared]);
    assert_eq!(a.drawing().writes(0), count + 1);

    let mut prev = Duration::ZERO;
    for t in times {
        let gap = t - prev;
        assert!(gap >= ms(216) && gap <= ms(264), "gap {gap:?}");
        prev = t;
    }
}

#[test]
fn synchronized_delay_uses_random_spread() {
    // Five seeding draws; the short path never rolls, so the sixth sample drives the delay.
    let mut values = vec![0.5; 5];
    values.push(1.0 - f64::EPSILON);
    let mut a = Animator::new(
        InMemoryDrawing::new(["M 0 0 L 1 0"]),
        config(TickMode::Synchronized),
        FixedSequence::new(values),
        VirtualClock::new(),
    )
    .unwrap();
    a.start().unwrap();
    let (due, _) = a.scheduler().pending_tasks().next().unwrap();
    assert!(due > ms(263) && due <= ms(264));
}

#[test]
fn independent_keeps_one_timer_per_path() {
    let mut a = Animator::new(
        drawing(),
        config(TickMode::Independent),
        Rng64::new(3),
        VirtualClock::new(),
    )
    .unwrap();
    a.start().unwrap();

    let expected: Vec<TaskId> = (0..3).map(|i| TaskId::Path(PathId(i))).collect();
    assert_eq!(pending_of(a.scheduler()), expected);
    for i in 0..3 {
        assert_eq!(a.drawing().writes(i), 0);
    }

    for _ in 0..40 {
        a.run_next(None).unwrap().unwrap();
        assert_eq!(pending_of(a.scheduler()), expected);
    }
}

#[test]
fn independent_rearm_is_a_flat_ninety_percent() {
    let mut a = Animator::new(
        InMemoryDrawing::new(["M 0 0 L 10 0"]),
        config(TickMode::Independent),
        Rng64::new(4),
        VirtualClock::new(),
    )
    .unwrap();

    let mut times = Vec::new();
    a.run_until(ms(2_000), |fired, drawing| {
        assert_eq!(fired.task, TaskId::Path(PathId(0)));
        assert_eq!(drawing.writes(0), times.len() as u64 + 1);
        times.push(fired.at);
        Ok(())
    })
    .unwrap();

    assert!(times.len() >= 8);
    for pair in times.windows(2) {
        let gap = pair[1] - pair[0];
        let err = gap.abs_diff(ms(216));
        assert!(err <= Duration::from_micros(1), "gap {gap:?}");
    }
}

#[test]
fn independent_initial_delay_is_random_fraction() {
    // 5 seeding draws, then the initial delay sample.
    let rng = FixedSequence::new(vec![0.5, 0.5, 0.5, 0.5, 0.5, 0.25]);
    let mut a = Animator::new(
        InMemoryDrawing::new(["M 0 0 L 10 0"]),
        config(TickMode::Independent),
        rng,
        VirtualClock::new(),
    )
    .unwrap();
    a.start().unwrap();
    let (due, task) = a.scheduler().pending_tasks().next().unwrap();
    assert_eq!(*task, TaskId::Path(PathId(0)));
    assert!(due.abs_diff(ms(60)) <= Duration::from_micros(1));
}

#[test]
fn double_start_is_rejected() {
    let mut a = Animator::new(
        drawing(),
        WobbleConfig::default(),
        Rng64::new(5),
        VirtualClock::new(),
    )
    .unwrap();
    a.start().unwrap();
    assert!(matches!(a.start(), Err(WobbleError::Schedule(_))));
}

#[test]
fn run_next_starts_lazily_and_respects_deadline() {
    let mut a = Animator::new(
        drawing(),
        WobbleConfig::default(),
        Rng64::new(6),
        VirtualClock::new(),
    )
    .unwrap();
    assert!(!a.is_started());
    assert!(a.run_next(Some(ms(10))).unwrap().is_none());
    assert!(a.is_started());
    assert_eq!(a.fired(), 0);
    assert_eq!(a.scheduler().now(), ms(10));

    let n = a.run_for(ms(1_000), |_, _| Ok(())).unwrap();
    assert_eq!(a.fired(), n);
    assert!(a.scheduler().now() >= ms(1_000));
}

#[test]
fn callback_errors_stop_the_run() {
    let mut a = Animator::new(
        drawing(),
        WobbleConfig::default(),
        Rng64::new(7),
        VirtualClock::new(),
    )
    .unwrap();
    let err = a
        .run_until(ms(10_000), |_, _| Err(WobbleError::document("sink full")))
        .unwrap_err();
    assert!(err.to_string().contains("sink full"));
    assert_eq!(a.fired(), 1);
}

#[test]
fn zero_amplitude_animation_keeps_base_points() {
    let cfg = WobbleConfig {
        amplitude: 0.0,
        ..WobbleConfig::default()
    };
    let mut a = Animator::new(
        InMemoryDrawing::new(["M 5 5 L 15 5"]),
        cfg,
        Rng64::new(8),
        VirtualClock::new(),
    )
    .unwrap();
    a.run_until(ms(3_000), |_, d| {
        assert_eq!(d.geometry(0), Some("M  5 5 L  15 5"));
        Ok(())
    })
    .unwrap();
    assert_eq!(a.into_drawing().geometry(0), Some("M  5 5 L  15 5"));
}

#[test]
fn synchronized_timer_survives_a_failed_write() {
    let mut a = Animator::new(
        FlakyDrawing::new(),
        config(TickMode::Synchronized),
        Rng64::new(10),
        VirtualClock::new(),
    )
    .unwrap();
    a.start().unwrap();

    a.drawing_mut().reject = true;
    assert!(matches!(a.run_next(None), Err(WobbleError::Document(_))));
    assert_eq!(pending_of(a.scheduler()), vec![TaskId::Shared]);

    a.drawing_mut().reject = false;
    let fired = a.run_next(None).unwrap().unwrap();
    assert_eq!(fired.task, TaskId::Shared);
    assert_eq!(pending_of(a.scheduler()), vec![TaskId::Shared]);
}

#[test]
fn synchronized_start_arms_timer_even_if_first_write_fails() {
    let mut drawing = FlakyDrawing::new();
    drawing.reject = true;
    let mut a = Animator::new(
        drawing,
        config(TickMode::Synchronized),
        Rng64::new(11),
        VirtualClock::new(),
    )
    .unwrap();
    assert!(a.start().is_err());
    assert_eq!(pending_of(a.scheduler()), vec![TaskId::Shared]);
}

#[test]
fn independent_timers_survive_failed_writes() {
    let mut a = Animator::new(
        FlakyDrawing::new(),
        config(TickMode::Independent),
        Rng64::new(12),
        VirtualClock::new(),
    )
    .unwrap();
    a.start().unwrap();
    let expected: Vec<TaskId> = (0..3).map(|i| TaskId::Path(PathId(i))).collect();

    a.drawing_mut().reject = true;
    for _ in 0..6 {
        assert!(a.run_next(None).is_err());
        assert_eq!(pending_of(a.scheduler()), expected);
    }

    a.drawing_mut().reject = false;
    assert!(a.run_next(None).unwrap().is_some());
    assert_eq!(pending_of(a.scheduler()), expected);
}
