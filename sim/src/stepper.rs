use hoops_shared::config::StepperConfig;

/// Result of feeding one frame into the accumulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepPlan {
    /// Fixed steps to run this frame
    pub steps: u32,
    /// Leftover fraction of a step, for blending the drawn pose
    pub alpha: f64,
}

/// Fixed-step accumulator.
#[derive(Debug, Clone)]
pub struct Stepper {
    config: StepperConfig,
    accumulator: f64,
}

impl Stepper {
    pub fn new(config: StepperConfig) -> Self {
        Self {
            config,
            accumulator: 0.0,
        }
    }

    pub fn step_seconds(&self) -> f64 {
        self.config.step_seconds
    }

    /// Add a frame's elapsed time and plan the steps it pays for.
    pub fn advance(&mut self, frame_dt: f64) -> StepPlan {
        let scaled = (frame_dt * self.config.simulation_speed).max(0.0);
        self.accumulator += scaled.min(self.config.max_frame_seconds);

        let step = self.config.step_seconds;
        let mut steps = 0;
        // Small tolerance so frames that are exact multiples of the step do
        // not lose a step to rounding.
        while self.accumulator + 1e-9 >= step {
            self.accumulator = (self.accumulator - step).max(0.0);
            steps += 1;
        }

        StepPlan {
            steps,
            alpha: self.alpha(),
        }
    }

    pub fn alpha(&self) -> f64 {
        (self.accumulator / self.config.step_seconds).clamp(0.0, 1.0)
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
