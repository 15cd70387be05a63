use std::collections::HashMap;
use std::time::Instant;

use crate::pipeline::job_control::JobState;

/// Event sink for transcription jobs.
///
/// Replaces process-wide output capture: the job reports progress, echoed
/// recognizer lines and status through this port, and each front-end
/// decides how to display them.
pub trait JobObserver: Send {
    /// Percentage of the selected range recognized so far. Values are not
    /// guaranteed to be monotonic.
    fn progress(&mut self, percent: u8, message: &str);

    /// One line of recognizer stdout. Default: ignored.
    fn output_line(&mut self, _line: &str) {}

    /// Default: ignored.
    fn state_changed(&mut self, _state: JobState) {}

    /// Record how long a named job stage took.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-job summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent observer that discards all events.
pub struct NullJobObserver;

impl JobObserver for NullJobObserver {
    fn progress(&mut self, _percent: u8, _message: &str) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Forwards progress to a `(percent, message)` callback and drops
/// everything else.
pub struct CallbackJobObserver<F>
where
    F: FnMut(u8, &str) + Send,
{
    on_progress: F,
}

impl<F> CallbackJobObserver<F>
where
    F: FnMut(u8, &str) + Send,
{
    pub fn new(on_progress: F) -> Self {
        Self { on_progress }
    }
}

impl<F> JobObserver for CallbackJobObserver<F>
where
    F: FnMut(u8, &str) + Send,
{
    fn progress(&mut self, percent: u8, message: &str) {
        (self.on_progress)(percent, message);
    }

    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}

    fn info(&mut self, _message: &str) {}
}

/// Observer that reports through the `log` crate, tracks per-stage timing
/// and prints a summary when the job ends.
///
/// Progress is only logged when it moves by at least `throttle_percent`
/// from the last reported value.
pub struct LogJobObserver {
    throttle_percent: u8,
    last_reported: Option<u8>,
    timings: HashMap<String, Vec<f64>>,
    start_time: Instant,
    lines_seen: usize,
    final_state: Option<JobState>,
    messages: Vec<String>,
}

impl LogJobObserver {
    pub fn new(throttle_percent: u8) -> Self {
        Self {
            throttle_percent: throttle_percent.max(1),
            last_reported: None,
            timings: HashMap::new(),
            start_time: Instant::now(),
            lines_seen: 0,
            final_state: None,
            messages: Vec::new(),
        }
    }

    /// Returns the formatted summary string, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.final_state.is_none() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Transcription summary ({} lines, {:.1}s total):",
            self.lines_seen,
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let total_ms: f64 = self.timings[stage].iter().sum();
            let pct = if elapsed_ms > 0.0 {
                total_ms / elapsed_ms * 100.0
            } else {
                0.0
            };
            lines.push(format!("  {stage:10}: {total_ms:8.0}ms  ({pct:4.1}%)"));
        }

        if let Some(state) = self.final_state {
            lines.push(format!("  Outcome: {state}"));
        }

        Some(lines.join("\n"))
    }

    /// Returns the timing data for a given stage.
    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    fn should_report(&self, percent: u8) -> bool {
        match self.last_reported {
            None => true,
            Some(last) => {
                percent.abs_diff(last) >= self.throttle_percent || (percent == 100 && last != 100)
            }
        }
    }
}

impl Default for LogJobObserver {
    fn default() -> Self {
        Self::new(10)
    }
}

impl JobObserver for LogJobObserver {
    fn progress(&mut self, percent: u8, message: &str) {
        if self.should_report(percent) {
            self.last_reported = Some(percent);
            log::info!("{message}");
        }
    }

    fn output_line(&mut self, line: &str) {
        self.lines_seen += 1;
        log::debug!("whisper: {line}");
    }

    fn state_changed(&mut self, state: JobState) {
        if state.is_terminal() {
            self.final_state = Some(state);
        }
        log::debug!("Transcription job {state}");
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- NullJobObserver ---

    #[test]
    fn test_null_observer_all_methods_are_noop() {
        let mut observer = NullJobObserver;
        observer.progress(10, "Transcribing: 10%");
        observer.output_line("[00:00:00.000 --> 00:00:01.000] hi");
        observer.state_changed(JobState::Running);
        observer.timing("recognize", 5.0);
        observer.info("hello");
        observer.summary();
    }

    // --- CallbackJobObserver ---

    #[test]
    fn test_callback_receives_progress() {
        let mut seen = Vec::new();
        {
            let mut observer = CallbackJobObserver::new(|p: u8, m: &str| seen.push((p, m.to_string())));
            observer.progress(42, "Transcribing: 42%");
            observer.info("ignored");
        }
        assert_eq!(seen, vec![(42, "Transcribing: 42%".to_string())]);
    }

    // --- LogJobObserver ---

    #[test]
    fn test_progress_throttled() {
        let mut observer = LogJobObserver::new(10);
        observer.progress(3, "Transcribing: 3%");
        assert_eq!(observer.last_reported, Some(3));
        observer.progress(9, "Transcribing: 9%");
        assert_eq!(observer.last_reported, Some(3));
        observer.progress(13, "Transcribing: 13%");
        assert_eq!(observer.last_reported, Some(13));
    }

    #[test]
    fn test_progress_always_reports_completion() {
        let mut observer = LogJobObserver::new(10);
        observer.progress(95, "Transcribing: 95%");
        observer.progress(100, "Transcribing: 100%");
        assert_eq!(observer.last_reported, Some(100));
    }

    #[test]
    fn test_progress_going_backwards_is_reported_after_threshold() {
        let mut observer = LogJobObserver::new(10);
        observer.progress(50, "Transcribing: 50%");
        observer.progress(30, "Transcribing: 30%");
        assert_eq!(observer.last_reported, Some(30));
    }

    #[test]
    fn test_timing_records_values() {
        let mut observer = LogJobObserver::new(10);
        observer.timing("prepare", 20.0);
        observer.timing("recognize", 300.0);
        observer.timing("prepare", 5.0);

        let prepare = observer.timings_for("prepare").unwrap();
        assert_eq!(prepare.len(), 2);
        assert!((prepare[0] - 20.0).abs() < f64::EPSILON);
        assert!(observer.timings_for("parse").is_none());
    }

    #[test]
    fn test_summary_includes_stages_and_outcome() {
        let mut observer = LogJobObserver::new(10);
        observer.output_line("line one");
        observer.output_line("line two");
        observer.timing("recognize", 120.0);
        observer.state_changed(JobState::Completed);

        let summary = observer.summary_string().unwrap();
        assert!(summary.contains("Transcription summary (2 lines"));
        assert!(summary.contains("recognize"));
        assert!(summary.contains("Outcome: completed"));
    }

    #[test]
    fn test_non_terminal_state_is_not_outcome() {
        let mut observer = LogJobObserver::new(10);
        observer.state_changed(JobState::Running);
        assert!(observer.summary_string().is_none());
    }

    #[test]
    fn test_empty_summary_returns_none() {
        assert!(LogJobObserver::new(10).summary_string().is_none());
    }

    #[test]
    fn test_info_stores_messages() {
        let mut observer = LogJobObserver::new(10);
        observer.info("hello world");
        assert_eq!(observer.messages, vec!["hello world".to_string()]);
    }

    #[test]
    fn test_default_throttle() {
        assert_eq!(LogJobObserver::default().throttle_percent, 10);
    }
}
