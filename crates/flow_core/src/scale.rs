//! Square-root scale mapping traffic counts to marker radii.

/// Radius range used when no time filter is active.
pub const UNFILTERED_RADIUS_RANGE: (f64, f64) = (0.0, 25.0);

/// Radius range used for a concrete time; the floor keeps quiet stations visible.
pub const FILTERED_RADIUS_RANGE: (f64, f64) = (3.0, 50.0);

/// Maps `sqrt(value)` linearly from `sqrt(domain)` onto `range`, unclamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn set_domain(&mut self, domain: (f64, f64)) {
        self.domain = domain;
    }

    pub fn set_range(&mut self, range: (f64, f64)) {
        self.range = range;
    }

    /// A degenerate domain maps every input to the middle of the range.
    pub fn apply(&self, value: f64) -> f64 {
        let d0 = signed_sqrt(self.domain.0);
        let d1 = signed_sqrt(self.domain.1);
        let span = d1 - d0;
        let t = if span == 0.0 || span.is_nan() {
            0.5
        } else {
            (signed_sqrt(value) - d0) / span
        };
        self.range.0 + (self.range.1 - self.range.0) * t
    }
}

fn signed_sqrt(value: f64) -> f64 {
    if value < 0.0 {
        -(-value).sqrt()
    } else {
        value.sqrt()
    }
}
