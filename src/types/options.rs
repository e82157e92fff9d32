/// Parameters for a single position request to the platform location service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    /// Give up after this many milliseconds
    pub timeout_ms: u32,
    /// Accept a cached fix no older than this many milliseconds
    pub max_age_ms: u32,
}

impl PositionOptions {
    /// Options used for the high-accuracy fix: 20 s timeout, 1 s max age
    pub const HIGH_ACCURACY: Self = Self {
        high_accuracy: true,
        timeout_ms: 20_000,
        max_age_ms: 1_000,
    };
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self::HIGH_ACCURACY
    }
}
