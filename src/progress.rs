//! Phase reporting for the assignment pipeline.
//!
//! Each phase gets a spinner (or a bar when the row count is known). In
//! log-only mode the bars are hidden and phases are logged to stderr as
//! `[phase] message` lines.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Global flag for log-only mode (set from args in main)
pub static LOG_ONLY: AtomicBool = AtomicBool::new(false);

pub fn set_log_only(value: bool) {
    LOG_ONLY.store(value, Ordering::Relaxed);
}

pub fn is_log_only() -> bool {
    LOG_ONLY.load(Ordering::Relaxed)
}

/// Pipeline phases, in execution order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Observations,
    Master,
    Assign,
    Write,
}

impl Phase {
    /// Short tag used in log-only lines
    pub fn tag(self) -> &'static str {
        match self {
            Phase::Observations => "observations",
            Phase::Master => "master",
            Phase::Assign => "assign",
            Phase::Write => "write",
        }
    }

    /// "Phase N: <label>" as shown next to the spinner
    pub fn title(self, label: &str) -> String {
        let n = match self {
            Phase::Observations => 1,
            Phase::Master => 2,
            Phase::Assign => 3,
            Phase::Write => 4,
        };
        format!("Phase {}: {}", n, label)
    }
}

/// Format duration in human-readable format
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.1}m", secs / 60.0)
    }
}

/// Log a phase result to stderr. Only prints in log-only mode.
pub fn log_phase(phase: Phase, msg: &str) {
    if is_log_only() {
        eprintln!("[{}] {}", phase.tag(), msg);
    }
}

fn styled(pb: ProgressBar, template: &str) -> ProgressBar {
    if is_log_only() {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    } else if let Ok(style) = ProgressStyle::default_bar().template(template) {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

/// Spinner for phases without a known length (file reads, writes).
pub fn phase_spinner(phase: Phase, label: &str) -> ProgressBar {
    let pb = styled(ProgressBar::new_spinner(), "{msg} {spinner} [{elapsed_precise}]");
    if !is_log_only() {
        pb.enable_steady_tick(Duration::from_millis(100));
    }
    pb.set_message(phase.title(label));
    pb
}

/// Bar over `rows` observation rows.
pub fn phase_bar(phase: Phase, label: &str, rows: usize) -> ProgressBar {
    let pb = styled(
        ProgressBar::new(rows as u64),
        "{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows",
    );
    pb.set_message(phase.title(label));
    pb
}

/// Finish a phase: final spinner message plus the log-only line.
pub fn finish_phase(pb: &ProgressBar, phase: Phase, msg: String) {
    log_phase(phase, &msg);
    pb.finish_with_message(phase.title(&msg));
}
