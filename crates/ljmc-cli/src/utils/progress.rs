use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use ljmc::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Renders the engine's progress events as a step-count bar on stderr, with
/// the latest trajectory sample in the message slot.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0)
            .with_style(bar_style())
            .with_message("Waiting to start...");
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::RunStart { step_count } => {
                    pb.reset();
                    pb.set_length(step_count as u64);
                    pb.set_position(0);
                    pb.set_style(bar_style());
                    pb.set_message("equilibrating");
                }
                Progress::StepComplete => {
                    pb.inc(1);
                }
                Progress::Sample {
                    reduced_energy,
                    acceptance_rate,
                    ..
                } => {
                    pb.set_message(format!(
                        "E* = {:.4}  acc = {:.0}%",
                        reduced_energy,
                        acceptance_rate * 100.0
                    ));
                }
                Progress::RunFinish => {
                    if pb.position() < pb.length().unwrap_or(0) {
                        pb.set_position(pb.length().unwrap_or(0));
                    }
                    pb.finish();
                }
                Progress::Message(msg) => {
                    pb.println(format!("  {}", msg));
                }
            }
        })
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg:<24} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        .expect("Failed to create bar style template")
        .with_key(
            "eta",
            |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                write!(w, "{:.1}s", state.eta().as_secs_f64()).unwrap()
            },
        )
        .progress_chars("##-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = CliProgressHandler::new();
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.length(), Some(0));
        assert!(pb.is_finished());
    }

    #[test]
    fn callback_tracks_the_step_loop() {
        let handler = CliProgressHandler::new();
        let callback = handler.callback();

        callback(Progress::RunStart { step_count: 100 });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.length(), Some(100));
            assert_eq!(pb.position(), 0);
            assert!(!pb.is_finished());
        }

        callback(Progress::StepComplete);
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.position(), 1);
        }

        callback(Progress::Sample {
            step: 50,
            reduced_energy: -5.5,
            acceptance_rate: 0.40,
            max_displacement: 0.1,
        });
        {
            let pb = handler.pb.lock().unwrap();
            assert!(pb.message().contains("-5.5"));
        }

        callback(Progress::RunFinish);
        {
            let pb = handler.pb.lock().unwrap();
            assert!(pb.is_finished());
            assert_eq!(pb.position(), 100);
        }
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = CliProgressHandler::new();
        let callback = handler.callback();

        thread::spawn(move || {
            callback(Progress::RunStart { step_count: 10 });
            callback(Progress::StepComplete);
            callback(Progress::RunFinish);
        })
        .join()
        .unwrap();

        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
    }
}
