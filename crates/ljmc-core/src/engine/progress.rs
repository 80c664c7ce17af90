#[derive(Debug, Clone)]
pub enum Progress {
    /// The step loop is about to start.
    RunStart { step_count: usize },

    /// One trial move finished (accepted or rejected).
    StepComplete,

    /// Periodic coordinator-side sample of the running observables.
    Sample {
        step: usize,
        reduced_energy: f64,
        acceptance_rate: f64,
        max_displacement: f64,
    },

    /// The step loop finished.
    RunFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
