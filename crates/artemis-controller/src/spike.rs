//! Pointer spike rejection.
//!
//! While the pointer is locked some hosts occasionally report a single absurd
//! movement delta, which would otherwise snap the camera for one frame. Each
//! axis compares the new raw delta against a multiple of the previous raw
//! delta and, when it is too large, repeats the previous raw delta instead.

/// Ratio above which a horizontal delta counts as a spike.
pub const X_SPIKE_RATIO: f32 = 1.5;
/// Ratio above which a vertical delta counts as a spike.
pub const Y_SPIKE_RATIO: f32 = 1.2;

/// Raw deltas beyond this magnitude get a debug log line.
const LARGE_DELTA: f32 = 100.0;

/// Spike rejection for a single axis.
#[derive(Clone, Copy, Debug)]
pub struct AxisFilter {
    ratio: f32,
    /// Last raw delta seen. Starts unbounded so the first sample always passes.
    previous_raw: f32,
}

impl AxisFilter {
    /// Create a filter that rejects deltas larger than `ratio` times the last one.
    pub fn new(ratio: f32) -> Self {
        Self {
            ratio,
            previous_raw: f32::INFINITY,
        }
    }

    /// Filter one raw delta.
    ///
    /// Non-finite input is always treated as a spike and is not recorded.
    pub fn filter(&mut self, raw: f32) -> f32 {
        if !raw.is_finite() {
            return self.held();
        }

        let output = if raw.abs() > self.previous_raw.abs() * self.ratio {
            self.held()
        } else {
            raw
        };
        // History tracks raw input so one spike cannot poison the threshold.
        self.previous_raw = raw;
        output
    }

    /// Last raw delta, as long as it is a usable number.
    fn held(&self) -> f32 {
        if self.previous_raw.is_finite() {
            self.previous_raw
        } else {
            0.0
        }
    }
}

/// Spike rejection for both pointer axes.
#[derive(Clone, Copy, Debug)]
pub struct MouseSpikeFilter {
    x: AxisFilter,
    y: AxisFilter,
}

impl Default for MouseSpikeFilter {
    fn default() -> Self {
        Self {
            x: AxisFilter::new(X_SPIKE_RATIO),
            y: AxisFilter::new(Y_SPIKE_RATIO),
        }
    }
}

impl MouseSpikeFilter {
    /// Create a filter with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter one pointer event, returning the deltas to feed into orientation.
    pub fn filter(&mut self, dx: f32, dy: f32) -> (f32, f32) {
        if dx.abs() > LARGE_DELTA {
            tracing::debug!("large pointer delta x: {dx}");
        }
        if dy.abs() > LARGE_DELTA {
            tracing::debug!("large pointer delta y: {dy}");
        }

        let filtered = (self.x.filter(dx), self.y.filter(dy));
        if filtered != (dx, dy) {
            tracing::trace!(
                "pointer spike held: ({dx}, {dy}) -> ({}, {})",
                filtered.0,
                filtered.1
            );
        }
        filtered
    }
}
