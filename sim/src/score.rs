/// Current round score and best score seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreState {
    current: u32,
    high: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn high(&self) -> u32 {
        self.high
    }

    /// Add points to the round. Keeps `high >= current`.
    pub fn record(&mut self, points: u32) {
        self.current = self.current.saturating_add(points);
        if self.current > self.high {
            self.high = self.current;
        }
    }

    /// New round: clear the score, keep the high score.
    pub fn reset_round(&mut self) {
        self.current = 0;
    }
}

/// Scoreboard digits: at least two, zero-padded.
pub fn score_text(value: u32) -> String {
    format!("{:02}", value)
}
