use hoops_shared::config::ClockConfig;

/// Round clock, advanced once per frame.
///
/// Elapsed time is counted in clock ticks: `tick_scale` ticks per second of
/// frame time, `ticks_per_second` ticks per displayed second. With the
/// defaults (20 and 120) a displayed second takes six seconds of frame time.
#[derive(Debug, Clone)]
pub struct GameClock {
    config: ClockConfig,
    elapsed_ticks: f64,
    elapsed_seconds: u32,
}

impl GameClock {
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            elapsed_ticks: 0.0,
            elapsed_seconds: 0,
        }
    }

    pub fn tick(&mut self, dt: f64) {
        if dt <= 0.0 || !dt.is_finite() {
            return;
        }
        self.elapsed_ticks += dt * self.config.tick_scale;
        let seconds = (self.elapsed_ticks / self.config.ticks_per_second).floor();
        self.elapsed_seconds = seconds.min(u32::MAX as f64) as u32;
    }

    pub fn elapsed_ticks(&self) -> f64 {
        self.elapsed_ticks
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn duration_seconds(&self) -> u32 {
        self.config.duration_seconds
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.config
            .duration_seconds
            .saturating_sub(self.elapsed_seconds)
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_seconds() == 0
    }

    /// Remaining time as `MM:SS`.
    pub fn remaining_time_text(&self) -> String {
        let remaining = self.remaining_seconds();
        format!("{:02}:{:02}", remaining / 60, remaining % 60)
    }

    pub fn reset(&mut self) {
        self.elapsed_ticks = 0.0;
        self.elapsed_seconds = 0;
    }
}
