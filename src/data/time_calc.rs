use std::time::Duration;

/// Accumulated timings for the numbered stages of repeated runs.
#[derive(Debug, Default, Clone)]
pub struct TimeCalc {
    runs: usize,
    stages: Vec<Duration>,
}

impl TimeCalc {
    pub fn total(&self) -> Duration {
        self.stages.iter().sum::<Duration>()
    }

    /// Number of completed runs.
    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn avg(&self) -> Duration {
        match self.runs {
            0 => Duration::ZERO,
            n => self.total() / n as u32,
        }
    }

    pub fn avg_stage(&self, i: usize) -> Option<Duration> {
        let stage = self.stages.get(i)?;
        match self.runs {
            0 => Some(Duration::ZERO),
            n => Some(*stage / n as u32),
        }
    }

    pub fn stages(&self) -> &[Duration] {
        &self.stages
    }

    pub fn add_or_push(&mut self, i: usize, x: Duration) {
        match self.stages.get_mut(i) {
            Some(elem) => *elem += x,
            None => {
                self.stages.resize(i, Duration::ZERO);
                self.stages.push(x)
            }
        }
    }

    /// Marks one full run as finished.
    pub fn finish_run(&mut self) {
        self.runs += 1;
    }

    pub fn clear(&mut self) {
        self.runs = Default::default();
        self.stages = Default::default();
    }
}
