//! Wall-clock section timers.
//!
//! A [`Timings`] value is passed explicitly to whatever should report into it.
//! When disabled, guards are inert and nothing is recorded.

use std::fmt::Write as _;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::Serialize;

const ACTIVITY_COUNT: usize = 6;

/// A timed section of the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    /// Reading and parsing the graph file.
    LoadGraph,
    /// Writing the distance matrix.
    PrintGraph,
    /// Potentials and reweighting.
    BellmanFord,
    /// The all-pairs Dijkstra sweep.
    Dijkstra,
    /// The whole computation; encloses `BellmanFord` and `Dijkstra`.
    Johnson,
    /// Setup work such as building the worker pool.
    Overhead,
}

impl Activity {
    /// Every activity, in report order.
    pub const ALL: [Activity; ACTIVITY_COUNT] = [
        Activity::LoadGraph,
        Activity::PrintGraph,
        Activity::BellmanFord,
        Activity::Dijkstra,
        Activity::Johnson,
        Activity::Overhead,
    ];

    /// Report label.
    pub fn name(self) -> &'static str {
        match self {
            Activity::LoadGraph => "load_graph",
            Activity::PrintGraph => "print_graph",
            Activity::BellmanFord => "bellman_ford",
            Activity::Dijkstra => "dijkstra",
            Activity::Johnson => "johnson",
            Activity::Overhead => "overhead",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    // Enclosing sections are not subtracted again when computing `unknown`.
    fn encloses_others(self) -> bool {
        matches!(self, Activity::Johnson)
    }
}

/// Accumulated time per [`Activity`].
#[derive(Debug)]
pub struct Timings {
    enabled: bool,
    start: Instant,
    accum: Mutex<[Duration; ACTIVITY_COUNT]>,
}

impl Timings {
    /// Creates a tracker; `enabled == false` turns every guard into a no-op.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            start: Instant::now(),
            accum: Mutex::new([Duration::ZERO; ACTIVITY_COUNT]),
        }
    }

    /// A tracker that records nothing.
    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Whether time is being recorded.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Starts timing `activity`; the time is added when the guard drops.
    pub fn track(&self, activity: Activity) -> ActivityGuard<'_> {
        ActivityGuard {
            timings: self,
            activity,
            started: self.enabled.then(Instant::now),
        }
    }

    /// Adds `elapsed` to `activity`.
    pub fn add(&self, activity: Activity, elapsed: Duration) {
        if !self.enabled {
            return;
        }
        let mut accum = self.accum.lock().unwrap_or_else(|e| e.into_inner());
        accum[activity.index()] += elapsed;
    }

    /// Total time recorded for `activity`.
    pub fn get(&self, activity: Activity) -> Duration {
        self.accum.lock().unwrap_or_else(|e| e.into_inner())[activity.index()]
    }

    /// Snapshot of every non-zero activity plus the unaccounted remainder.
    pub fn report(&self) -> TimingReport {
        let elapsed = self.start.elapsed();
        let accum = *self.accum.lock().unwrap_or_else(|e| e.into_inner());
        let pct = |d: Duration| {
            if elapsed.is_zero() {
                0.0
            } else {
                d.as_secs_f64() / elapsed.as_secs_f64() * 100.0
            }
        };

        let mut unknown = elapsed;
        let mut activities = Vec::new();
        for activity in Activity::ALL {
            let spent = accum[activity.index()];
            if spent.is_zero() {
                continue;
            }
            if !activity.encloses_others() {
                unknown = unknown.saturating_sub(spent);
            }
            activities.push(ActivityTime {
                activity,
                ms: spent.as_secs_f64() * 1000.0,
                percent: pct(spent),
            });
        }

        TimingReport {
            activities,
            unknown_ms: unknown.as_secs_f64() * 1000.0,
            unknown_percent: pct(unknown),
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        }
    }
}

/// Adds the time since its creation to an activity when dropped.
#[must_use = "the activity is timed until the guard is dropped"]
pub struct ActivityGuard<'a> {
    timings: &'a Timings,
    activity: Activity,
    started: Option<Instant>,
}

impl Drop for ActivityGuard<'_> {
    fn drop(&mut self) {
        if let Some(started) = self.started {
            self.timings.add(self.activity, started.elapsed());
        }
    }
}

/// One row of a [`TimingReport`].
#[derive(Debug, Clone, Serialize)]
pub struct ActivityTime {
    /// Section.
    pub activity: Activity,
    /// Milliseconds spent.
    pub ms: f64,
    /// Share of total elapsed time.
    pub percent: f64,
}

/// Serializable summary of a [`Timings`] tracker.
#[derive(Debug, Clone, Serialize)]
pub struct TimingReport {
    /// Non-zero activities in report order.
    pub activities: Vec<ActivityTime>,
    /// Elapsed time not covered by any leaf activity.
    pub unknown_ms: f64,
    /// `unknown_ms` as a share of elapsed time.
    pub unknown_percent: f64,
    /// Time since the tracker was created.
    pub elapsed_ms: f64,
}

impl TimingReport {
    /// Renders the report as an aligned text table.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in &self.activities {
            let _ = writeln!(
                out,
                "    {:8.2} ms    {:5.1} %    {}",
                row.ms,
                row.percent,
                row.activity.name()
            );
        }
        let _ = writeln!(
            out,
            "    {:8.2} ms    {:5.1} %    unknown",
            self.unknown_ms, self.unknown_percent
        );
        let _ = writeln!(out, "    {:8.2} ms    {:5.1} %    elapsed", self.elapsed_ms, 100.0);
        out
    }
}
