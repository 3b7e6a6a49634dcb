//! Pointer-motion and frontmost-app change detection.
//!
//! Queries compare the latest observation against a committed baseline and
//! never move the baseline themselves; the caller commits once per tick
//! after every decision that depends on the queries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::compare::Point;
use crate::{Error, Result};

/// Identity of the frontmost application (bundle id or similar)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(pub String);

impl AppId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of the gate's answers for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotionSignals {
    pub pointer_moved: bool,
    pub app_changed: bool,
}

impl MotionSignals {
    pub const QUIET: Self = Self {
        pointer_moved: false,
        app_changed: false,
    };

    /// Either signal cuts an ongoing gesture
    #[inline]
    pub fn interrupted(&self) -> bool {
        self.pointer_moved || self.app_changed
    }
}

#[derive(Debug, Clone)]
struct Tracked<T> {
    current: Option<T>,
    baseline: Option<T>,
    /// Observations since the last commit
    uncommitted: u32,
}

impl<T> Default for Tracked<T> {
    fn default() -> Self {
        Self {
            current: None,
            baseline: None,
            uncommitted: 0,
        }
    }
}

impl<T: Clone> Tracked<T> {
    fn observe(&mut self, value: T) {
        self.current = Some(value);
        self.uncommitted = self.uncommitted.saturating_add(1);
    }

    fn commit(&mut self) {
        self.baseline = self.current.clone();
        self.uncommitted = 0;
    }

    /// The previous tick observed a value and never committed it
    fn is_stale(&self) -> bool {
        self.uncommitted > 1
    }
}

/// Per-device motion gate
#[derive(Debug, Clone)]
pub struct MotionGate {
    threshold: f64,
    pointer: Tracked<Point>,
    app: Tracked<AppId>,
}

impl MotionGate {
    /// Create a gate; pointer travel up to `threshold` pixels counts as stationary
    pub fn new(threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(Error::Config(format!(
                "gate.proximity_threshold must be >= 0, got {}",
                threshold
            )));
        }
        Ok(Self {
            threshold,
            pointer: Tracked::default(),
            app: Tracked::default(),
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Record this tick's pointer position and frontmost application
    pub fn observe(&mut self, pointer: Point, app: AppId) {
        self.pointer.observe(pointer);
        self.app.observe(app);
    }

    /// Did the pointer leave the neighbourhood of the committed baseline?
    ///
    /// Without a baseline or an observation there is nothing to compare
    /// against and the answer is `false`.
    pub fn pointer_moved(&self) -> bool {
        if self.pointer.is_stale() {
            tracing::warn!(
                uncommitted = self.pointer.uncommitted,
                "Pointer baseline queried without a commit since the previous tick"
            );
        }
        match (&self.pointer.current, &self.pointer.baseline) {
            (Some(current), Some(baseline)) => {
                !current.is_about_the_same_as(*baseline, self.threshold)
            }
            _ => false,
        }
    }

    /// Move the pointer baseline to the latest observation
    pub fn commit_pointer_baseline(&mut self) {
        self.pointer.commit();
    }

    /// Did the frontmost application change since the committed baseline?
    pub fn frontmost_app_changed(&self) -> bool {
        if self.app.is_stale() {
            tracing::warn!(
                uncommitted = self.app.uncommitted,
                "Frontmost app baseline queried without a commit since the previous tick"
            );
        }
        match (&self.app.current, &self.app.baseline) {
            (Some(current), Some(baseline)) => current != baseline,
            _ => false,
        }
    }

    /// Move the frontmost-app baseline to the latest observation
    pub fn commit_frontmost_app_baseline(&mut self) {
        self.app.commit();
    }

    /// Query both signals at once
    pub fn signals(&self) -> MotionSignals {
        MotionSignals {
            pointer_moved: self.pointer_moved(),
            app_changed: self.frontmost_app_changed(),
        }
    }

    /// Forget all observations and baselines
    pub fn reset(&mut self) {
        self.pointer = Tracked::default();
        self.app = Tracked::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    fn app(id: &str) -> AppId {
        AppId::new(id)
    }

    /// Counts WARN events seen while it is the default subscriber
    #[derive(Clone, Default)]
    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn warnings_during(f: impl FnOnce()) -> usize {
        let counter = WarnCounter::default();
        let subscriber = tracing_subscriber::registry().with(counter.clone());
        tracing::subscriber::with_default(subscriber, f);
        counter.0.load(Ordering::SeqCst)
    }

    #[test]
    fn test_rejects_negative_threshold() {
        assert!(matches!(MotionGate::new(-1.0), Err(Error::Config(_))));
        assert!(matches!(MotionGate::new(f64::NAN), Err(Error::Config(_))));
        assert!(MotionGate::new(0.0).is_ok());
    }

    #[test]
    fn test_query_without_commit_warns() {
        let warnings = warnings_during(|| {
            let mut gate = MotionGate::new(1.0).unwrap();
            gate.observe(Point::default(), app("a"));
            gate.commit_pointer_baseline();
            gate.commit_frontmost_app_baseline();

            gate.observe(Point::new(3.0, 0.0), app("a"));
            gate.signals();
            // no commit for this tick
            gate.observe(Point::new(6.0, 0.0), app("a"));
            gate.signals();
        });
        // one per signal
        assert_eq!(warnings, 2);
    }

    #[test]
    fn test_commit_every_tick_is_silent() {
        let warnings = warnings_during(|| {
            let mut gate = MotionGate::new(1.0).unwrap();
            for step in 0..20 {
                gate.observe(Point::new(step as f64, 0.0), app("a"));
                gate.signals();
                gate.commit_pointer_baseline();
                gate.commit_frontmost_app_baseline();
            }
        });
        assert_eq!(warnings, 0);
    }

    #[test]
    fn test_no_baseline_means_no_motion() {
        let mut gate = MotionGate::new(5.0).unwrap();
        assert!(!gate.pointer_moved());
        gate.observe(Point::new(10.0, 10.0), app("a"));
        assert!(!gate.pointer_moved());
        assert!(!gate.frontmost_app_changed());
    }

    #[test]
    fn test_pointer_moved_after_commit_across_thresholds() {
        for threshold in [0.0, 0.5, 5.0, 40.0] {
            let mut gate = MotionGate::new(threshold).unwrap();
            let origin = Point::new(200.0, 300.0);
            gate.observe(origin, app("a"));
            gate.commit_pointer_baseline();
            assert!(!gate.pointer_moved(), "threshold {}", threshold);

            gate.observe(Point::new(origin.x + threshold, origin.y), app("a"));
            assert!(!gate.pointer_moved(), "threshold {}", threshold);

            gate.observe(Point::new(origin.x, origin.y - threshold - 1.0), app("a"));
            assert!(gate.pointer_moved(), "threshold {}", threshold);
        }
    }

    #[test]
    fn test_queries_do_not_move_baseline() {
        let mut gate = MotionGate::new(1.0).unwrap();
        gate.observe(Point::new(0.0, 0.0), app("a"));
        gate.commit_pointer_baseline();
        gate.observe(Point::new(50.0, 0.0), app("a"));

        assert!(gate.pointer_moved());
        assert!(gate.pointer_moved());
        assert!(gate.signals().pointer_moved);

        gate.commit_pointer_baseline();
        assert!(!gate.pointer_moved());
    }

    #[test]
    fn test_frontmost_app_changed() {
        let mut gate = MotionGate::new(1.0).unwrap();
        gate.observe(Point::default(), app("com.example.editor"));
        gate.commit_frontmost_app_baseline();
        assert!(!gate.frontmost_app_changed());

        gate.observe(Point::default(), app("com.example.browser"));
        assert!(gate.frontmost_app_changed());
        assert!(gate.frontmost_app_changed());

        gate.commit_frontmost_app_baseline();
        assert!(!gate.frontmost_app_changed());
    }

    #[test]
    fn test_pointer_and_app_commit_independently() {
        let mut gate = MotionGate::new(1.0).unwrap();
        gate.observe(Point::new(0.0, 0.0), app("a"));
        gate.commit_pointer_baseline();
        gate.commit_frontmost_app_baseline();

        gate.observe(Point::new(9.0, 9.0), app("b"));
        gate.commit_pointer_baseline();
        assert!(!gate.pointer_moved());
        assert!(gate.frontmost_app_changed());
    }

    #[test]
    fn test_stale_detection() {
        let mut gate = MotionGate::new(1.0).unwrap();
        gate.observe(Point::default(), app("a"));
        assert!(!gate.pointer.is_stale());
        gate.observe(Point::default(), app("a"));
        assert!(gate.pointer.is_stale());
        gate.commit_pointer_baseline();
        assert!(!gate.pointer.is_stale());
        assert!(gate.app.is_stale());
    }

    #[test]
    fn test_reset() {
        let mut gate = MotionGate::new(1.0).unwrap();
        gate.observe(Point::new(0.0, 0.0), app("a"));
        gate.commit_pointer_baseline();
        gate.commit_frontmost_app_baseline();
        gate.reset();
        gate.observe(Point::new(100.0, 0.0), app("b"));
        assert!(!gate.signals().interrupted());
    }
}
