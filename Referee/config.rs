use std::time::Duration;

/// Tunable knobs for a single game run. All defaults match the values named throughout the
/// referee's specification.
#[derive(Debug, Clone)]
pub struct Config {
    /// A round with no movement, repeated this many times, ends the game.
    pub max_rounds: u32,
    /// Deadline for a single `takeTurn`/`proposeBoard0` call.
    pub per_call_timeout: Duration,
    /// Deadline for the whole setup broadcast to resolve.
    pub setup_timeout: Duration,
    /// Deadline for the whole win broadcast to resolve.
    pub win_timeout: Duration,
    /// Carried over from the distillation source: whether a player must reach more than one
    /// goal (their assigned treasure, then home) before winning.
    pub multiple_goals: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_rounds: 1000,
            per_call_timeout: Duration::from_secs(4),
            setup_timeout: Duration::from_secs(4),
            win_timeout: Duration::from_secs(4),
            multiple_goals: true,
        }
    }
}

/// Tunable knobs for the signup server's admission policy.
#[derive(Debug, Clone)]
pub struct SignupConfig {
    pub waiting_period: Duration,
    pub min_to_start: usize,
    pub max_to_start: usize,
    pub n_periods: u32,
    pub handshake_timeout: Duration,
}

impl Default for SignupConfig {
    fn default() -> Self {
        Self {
            waiting_period: Duration::from_secs(20),
            min_to_start: 2,
            max_to_start: 6,
            n_periods: 2,
            handshake_timeout: Duration::from_secs(2),
        }
    }
}
