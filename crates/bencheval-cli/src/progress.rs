use bencheval::core::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const SPINNER_TICK_MS: u64 = 80;

/// Renders core progress events as an indicatif spinner/bar on stderr.
///
/// `ProgressBar` is internally reference-counted, so the callback shares the
/// bar with the handler by cloning it.
pub struct CliProgressHandler {
    pb: ProgressBar,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0)
            .with_style(spinner_style())
            .with_message("Initializing...");
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.finish_and_clear();
        Self { pb }
    }

    pub fn callback(&self) -> ProgressCallback<'static> {
        let pb = self.pb.clone();

        Box::new(move |progress: Progress| match progress {
            Progress::PhaseStart { name } => {
                pb.reset();
                pb.set_length(0);
                pb.set_style(spinner_style());
                pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                pb.set_message(name.to_string());
            }
            Progress::PhaseFinish => {
                pb.disable_steady_tick();
                pb.finish_and_clear();
            }
            Progress::TaskStart { total_steps } => {
                pb.disable_steady_tick();
                pb.reset();
                pb.set_length(total_steps);
                pb.set_position(0);
                pb.set_style(bar_style());
            }
            Progress::TaskIncrement => {
                pb.inc(1);
            }
            Progress::TaskFinish => {
                if pb.position() < pb.length().unwrap_or(0) {
                    pb.set_position(pb.length().unwrap_or(0));
                }
                pb.finish();
            }
            Progress::Message(msg) => {
                if !pb.is_finished() {
                    pb.println(format!("  {}", msg));
                } else {
                    pb.set_message(msg);
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

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .expect("Failed to create spinner style template")
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg:<22} [{bar:40.cyan/blue}] {pos}/{len}")
        .expect("Failed to create bar style template")
        .progress_chars("##-")
}
