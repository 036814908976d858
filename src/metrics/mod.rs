//! Metrics sink contract and flock statistics
//!
//! The sink is a pure consumer: it receives discrete capture events and
//! never influences simulation behavior. Periodic samplers read the
//! world's agent list and compute the statistics here.

use glam::Vec3;

/// Consumer of discrete capture events
///
/// Infallible by signature: a sink doing fallible I/O must swallow its own
/// errors so the tick loop never stops on an observer problem.
pub trait MetricsSink {
    /// Fired exactly once per capture with the predator's visible-agent
    /// count at the instant of capture
    fn on_capture(&mut self, visible_count: usize);
}

/// Sink that discards everything
#[derive(Debug, Default)]
pub struct NullMetrics;

impl MetricsSink for NullMetrics {
    fn on_capture(&mut self, _visible_count: usize) {}
}

/// In-memory sink recording the visible count of every capture
#[derive(Debug, Default)]
pub struct CaptureLog {
    pub visible_counts: Vec<usize>,
}

impl CaptureLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture_count(&self) -> usize {
        self.visible_counts.len()
    }
}

impl MetricsSink for CaptureLog {
    fn on_capture(&mut self, visible_count: usize) {
        self.visible_counts.push(visible_count);
    }
}

/// Periodic flock statistics snapshot
#[derive(Debug, Clone, Copy)]
pub struct FlockSample {
    pub live_count: usize,
    /// Magnitude of the mean heading vector: 1.0 = perfectly aligned,
    /// near 0 = disordered
    pub polarization: f32,
    pub avg_nearest_neighbor_distance: f32,
}

/// Flock polarization over a set of unit headings
pub fn polarization(headings: &[Vec3]) -> f32 {
    if headings.is_empty() {
        return 0.0;
    }
    let sum: Vec3 = headings.iter().copied().sum();
    (sum / headings.len() as f32).length()
}

/// Mean distance from each agent to its nearest neighbor
///
/// Fewer than two agents yields 0.0.
pub fn average_nearest_neighbor_distance(positions: &[Vec3]) -> f32 {
    if positions.len() < 2 {
        return 0.0;
    }

    let mut total = 0.0;
    for (i, a) in positions.iter().enumerate() {
        let mut nearest = f32::INFINITY;
        for (j, b) in positions.iter().enumerate() {
            if i != j {
                nearest = nearest.min(a.distance_squared(*b));
            }
        }
        total += nearest.sqrt();
    }
    total / positions.len() as f32
}
