use std::fs;
use std::path::Path;
use std::process::Child;
use std::time::Instant;

use crate::audio::domain::audio_trimmer::AudioTrimmer;
use crate::pipeline::infrastructure::recognizer_streams::{NextLine, RecognizerStreams};
use crate::pipeline::infrastructure::temp_audio::TempAudio;
use crate::pipeline::job_control::{JobControl, JobState};
use crate::pipeline::job_observer::JobObserver;
use crate::pipeline::transcription_error::TranscriptionError;
use crate::recognizer::domain::progress_tracker::ProgressTracker;
use crate::recognizer::domain::transcription_options::TranscriptionOptions;
use crate::recognizer::infrastructure::whisper_cli_command::{
    resolve_executable, resolve_model_path, WhisperCliCommand,
};
use crate::shared::constants::{DIAGNOSTIC_GRACE_PERIOD, OUTPUT_POLL_INTERVAL};
use crate::shared::paths::absolute_path;
use crate::transcript::domain::segment_parser::{ParsedTranscript, SegmentParser};
use crate::transcript::domain::transcription_result::TranscriptionResult;

/// What the recognizer process left behind.
struct RecognizerRun {
    stdout: String,
    diagnostics: String,
    exit_code: Option<i32>,
    cancelled: bool,
}

/// One whisper.cpp run over one input file.
///
/// A job runs at most once: `Idle → Preparing → Running → {Completed,
/// Cancelled, Failed}`. The trimmed audio lives in a job-owned temporary
/// directory that is removed on every exit path.
pub struct TranscriptionJob {
    options: TranscriptionOptions,
    trimmer: Box<dyn AudioTrimmer>,
    state: JobState,
}

impl TranscriptionJob {
    pub fn new(options: TranscriptionOptions, trimmer: Box<dyn AudioTrimmer>) -> Self {
        Self {
            options,
            trimmer,
            state: JobState::Idle,
        }
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn options(&self) -> &TranscriptionOptions {
        &self.options
    }

    /// Transcribes `input`. Cancellation through `control` is not an error:
    /// the result comes back with `cancelled` set and whatever output was
    /// read before the process was killed.
    pub fn run(
        &mut self,
        input: &Path,
        control: &JobControl,
        observer: &mut dyn JobObserver,
    ) -> Result<TranscriptionResult, TranscriptionError> {
        if self.state != JobState::Idle {
            return Err(TranscriptionError::AlreadyRun(self.state));
        }
        self.transition(JobState::Preparing, observer);

        let outcome = self.execute(input, control, observer);
        let final_state = match &outcome {
            Ok(result) if result.cancelled => JobState::Cancelled,
            Ok(_) => JobState::Completed,
            Err(e) => {
                log::error!("Transcription failed: {e}");
                JobState::Failed
            }
        };
        self.transition(final_state, observer);
        observer.summary();
        outcome
    }

    fn transition(&mut self, state: JobState, observer: &mut dyn JobObserver) {
        log::debug!("Transcription job: {} -> {}", self.state, state);
        self.state = state;
        observer.state_changed(state);
    }

    fn execute(
        &mut self,
        input: &Path,
        control: &JobControl,
        observer: &mut dyn JobObserver,
    ) -> Result<TranscriptionResult, TranscriptionError> {
        let t = Instant::now();
        let input = absolute_path(input).map_err(TranscriptionError::WorkingDirectory)?;
        if !input.is_file() {
            return Err(TranscriptionError::InputNotFound(input));
        }
        let executable = resolve_executable(self.options.executable_path())
            .map_err(TranscriptionError::WorkingDirectory)?;
        let model = resolve_model_path(&self.options).map_err(TranscriptionError::WorkingDirectory)?;
        if !model.is_file() {
            return Err(TranscriptionError::ModelNotFound(model));
        }

        let audio_duration = self
            .trimmer
            .duration(&input)
            .map_err(TranscriptionError::AudioPreparation)?;
        let (start, end) = self.options.time_range().resolve(audio_duration)?;

        let temp = TempAudio::create().map_err(TranscriptionError::TempAudio)?;
        observer.info(&format!("Preparing audio {:.3}s to {:.3}s", start, end));
        self.trimmer
            .trim(&input, temp.audio_path(), start, end)
            .map_err(TranscriptionError::AudioPreparation)?;
        observer.timing("prepare", t.elapsed().as_secs_f64() * 1000.0);

        if control.is_cancelled() {
            observer.info("Transcription cancelled before the recognizer started");
            return Ok(TranscriptionResult {
                audio_duration,
                cancelled: true,
                ..Default::default()
            });
        }

        let command = WhisperCliCommand::new(&executable, &model, temp.audio_path(), &self.options);
        log::info!("Running: {command}");
        self.transition(JobState::Running, observer);

        let t = Instant::now();
        // Trimmed audio starts at zero, so progress is measured against its length.
        let tracker = ProgressTracker::new(0.0, end - start);
        let run = recognize(&command, tracker, control, observer)?;
        observer.timing("recognize", t.elapsed().as_secs_f64() * 1000.0);

        let t = Instant::now();
        let parsed = if run.cancelled {
            parse_stdout(&run.stdout)
        } else {
            parse_output(&run.stdout, &temp.sidecar_path())
        };
        observer.timing("parse", t.elapsed().as_secs_f64() * 1000.0);

        Ok(TranscriptionResult {
            raw_output: run.stdout.trim().to_string(),
            plain_text: parsed.plain_text,
            segments: parsed.segments,
            audio_duration,
            diagnostic_output: run.diagnostics,
            cancelled: run.cancelled,
            exit_code: run.exit_code,
        })
    }
}

fn recognize(
    command: &WhisperCliCommand,
    tracker: ProgressTracker,
    control: &JobControl,
    observer: &mut dyn JobObserver,
) -> Result<RecognizerRun, TranscriptionError> {
    let mut child = command
        .to_command()
        .spawn()
        .map_err(|source| TranscriptionError::Launch {
            path: command.executable().to_path_buf(),
            source,
        })?;
    let streams = match RecognizerStreams::attach(&mut child) {
        Ok(streams) => streams,
        Err(source) => {
            kill_and_reap(&mut child);
            return Err(TranscriptionError::Stream {
                source,
                diagnostics: String::new(),
            });
        }
    };

    let mut stdout = String::new();
    let mut stdout_open = true;
    loop {
        if control.is_cancelled() {
            kill_and_reap(&mut child);
            for line in streams.drain_buffered() {
                push_line(&mut stdout, &line);
            }
            observer.info("Transcription cancelled");
            return Ok(RecognizerRun {
                stdout,
                diagnostics: streams.abandon(DIAGNOSTIC_GRACE_PERIOD),
                exit_code: None,
                cancelled: true,
            });
        }

        if stdout_open {
            match streams.next_line(OUTPUT_POLL_INTERVAL) {
                NextLine::Line(line) => consume_line(&mut stdout, &line, &tracker, observer),
                NextLine::Pending => {}
                NextLine::Closed => stdout_open = false,
                NextLine::Failed(source) => {
                    kill_and_reap(&mut child);
                    return Err(TranscriptionError::Stream {
                        source,
                        diagnostics: streams.abandon(DIAGNOSTIC_GRACE_PERIOD),
                    });
                }
            }
        } else {
            std::thread::sleep(OUTPUT_POLL_INTERVAL);
        }

        // Exit of the recognizer itself ends the run, even while a
        // descendant still holds the pipes.
        match child.try_wait() {
            Ok(Some(status)) => {
                let settled = streams.settle(DIAGNOSTIC_GRACE_PERIOD)?;
                for line in &settled.lines {
                    consume_line(&mut stdout, line, &tracker, observer);
                }
                if !status.success() {
                    log::warn!("Recognizer exited with {status}");
                }
                return Ok(RecognizerRun {
                    stdout,
                    diagnostics: settled.diagnostics,
                    exit_code: status.code(),
                    cancelled: false,
                });
            }
            Ok(None) => {}
            Err(e) => {
                kill_and_reap(&mut child);
                return Err(TranscriptionError::Wait(e));
            }
        }
    }
}

fn consume_line(
    stdout: &mut String,
    line: &str,
    tracker: &ProgressTracker,
    observer: &mut dyn JobObserver,
) {
    push_line(stdout, line);
    observer.output_line(line);
    if let Some(progress) = tracker.update(line) {
        observer.progress(progress.percent, &progress.message);
    }
}

fn push_line(buffer: &mut String, line: &str) {
    buffer.push_str(line);
    buffer.push('\n');
}

fn kill_and_reap(child: &mut Child) {
    if let Err(e) = child.kill() {
        log::debug!("Recognizer kill failed (already exited?): {e}");
    }
    if let Err(e) = child.wait() {
        log::warn!("Failed to reap recognizer process: {e}");
    }
}

/// Prefers the `-oj` sidecar document when it holds segments, then stdout.
fn parse_output(stdout: &str, sidecar: &Path) -> ParsedTranscript {
    match fs::read_to_string(sidecar) {
        Ok(document) => {
            let parsed = SegmentParser::parse(&document);
            if !parsed.segments.is_empty() {
                return parsed;
            }
            log::debug!("Sidecar {} holds no segments, using stdout", sidecar.display());
        }
        Err(e) => log::debug!("No sidecar at {}: {e}", sidecar.display()),
    }
    parse_stdout(stdout)
}

fn parse_stdout(stdout: &str) -> ParsedTranscript {
    let mut parsed = SegmentParser::parse(stdout);
    if parsed.segments.is_empty() {
        parsed.segments = SegmentParser::parse_timestamped_lines(stdout);
    }
    parsed
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::pipeline::job_observer::CallbackJobObserver;
    use crate::shared::time_range::{TimeRange, TimeRangeError};
    use crate::subtitles::domain::srt_formatter::SrtFormatter;
    use crate::test_support::{lock_spawn, write_script};
    use approx::assert_relative_eq;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tempfile::TempDir;

    const TWO_LINES: &str = r#"echo "[00:00:00.000 --> 00:00:05.000]   Hello there."
echo "[00:00:05.000 --> 00:00:10.000]   General Kenobi.""#;

    type TrimCalls = Arc<Mutex<Vec<(PathBuf, f64, f64)>>>;

    struct StubTrimmer {
        duration: f64,
        calls: TrimCalls,
    }

    impl StubTrimmer {
        fn new(duration: f64) -> (Self, TrimCalls) {
            let calls = TrimCalls::default();
            (
                Self {
                    duration,
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    impl AudioTrimmer for StubTrimmer {
        fn duration(&self, _: &Path) -> Result<f64, Box<dyn std::error::Error + Send + Sync>> {
            Ok(self.duration)
        }

        fn trim(
            &self,
            _: &Path,
            output: &Path,
            start: f64,
            end: f64,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            fs::write(output, b"RIFF")?;
            self.calls
                .lock()
                .unwrap()
                .push((output.to_path_buf(), start, end));
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        progress: Vec<u8>,
        lines: Vec<String>,
        states: Vec<JobState>,
        stages: Vec<String>,
    }

    impl JobObserver for RecordingObserver {
        fn progress(&mut self, percent: u8, _message: &str) {
            self.progress.push(percent);
        }
        fn output_line(&mut self, line: &str) {
            self.lines.push(line.to_string());
        }
        fn state_changed(&mut self, state: JobState) {
            self.states.push(state);
        }
        fn timing(&mut self, stage: &str, _duration_ms: f64) {
            self.stages.push(stage.to_string());
        }
        fn info(&mut self, _message: &str) {}
    }

    struct Fixture {
        dir: TempDir,
        input: PathBuf,
        model: PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.wav");
        fs::write(&input, b"RIFF").unwrap();
        let model = dir.path().join("ggml-test.bin");
        fs::write(&model, b"ggml").unwrap();
        Fixture { dir, input, model }
    }

    fn options(executable: &Path, model: &Path) -> TranscriptionOptions {
        TranscriptionOptions::new(executable, model.to_string_lossy())
    }

    fn trimmed_dir(calls: &TrimCalls) -> PathBuf {
        let calls = calls.lock().unwrap();
        calls[0].0.parent().unwrap().to_path_buf()
    }

    #[test]
    fn test_two_line_run_produces_segments_and_subtitles() {
        let _guard = lock_spawn();
        let fx = fixture();
        let script = write_script(fx.dir.path(), "whisper-cli", TWO_LINES);
        let (trimmer, calls) = StubTrimmer::new(10.0);
        let mut job = TranscriptionJob::new(options(&script, &fx.model), Box::new(trimmer));
        let mut observer = RecordingObserver::default();

        let result = job.run(&fx.input, &JobControl::new(), &mut observer).unwrap();

        assert!(!result.cancelled);
        assert_eq!(result.exit_code, Some(0));
        assert_eq!(result.segments.len(), 2);
        assert_eq!(result.segments[0].text, "Hello there.");
        assert_relative_eq!(result.segments[1].start, 5.0);
        assert_relative_eq!(result.segments[1].end, 10.0);
        assert_eq!(result.plain_text, "Hello there. General Kenobi.");
        assert_relative_eq!(result.audio_duration, 10.0);

        let srt = SrtFormatter::whisper_output_to_srt(&result.raw_output);
        assert_eq!(
            srt,
            "1\n00:00:00,000 --> 00:00:05,000\nHello there.\n\n\
             2\n00:00:05,000 --> 00:00:10,000\nGeneral Kenobi.\n"
        );

        assert_eq!(observer.progress, vec![0, 50]);
        assert_eq!(observer.lines.len(), 2);
        assert_eq!(
            observer.states,
            vec![JobState::Preparing, JobState::Running, JobState::Completed]
        );
        assert_eq!(observer.stages, vec!["prepare", "recognize", "parse"]);
        assert_eq!(job.state(), JobState::Completed);
        assert!(!trimmed_dir(&calls).exists());
    }

    #[test]
    fn test_invocation_arguments_reach_the_recognizer() {
        let _guard = lock_spawn();
        let fx = fixture();
        let script = write_script(fx.dir.path(), "whisper-cli", r#"echo "$@""#);
        let (trimmer, calls) = StubTrimmer::new(10.0);
        let opts = options(&script, &fx.model)
            .with_beam_size(12)
            .with_language("de");
        let mut job = TranscriptionJob::new(opts, Box::new(trimmer));

        let result = job
            .run(&fx.input, &JobControl::new(), &mut RecordingObserver::default())
            .unwrap();

        let audio = calls.lock().unwrap()[0].0.clone();
        let expected = format!(
            "-m {} -f {} -bs 8 -pp -l de -oj --prompt Always use punctuation.",
            fx.model.display(),
            audio.display()
        );
        assert!(
            result.raw_output.starts_with(&expected),
            "{}",
            result.raw_output
        );
    }

    #[test]
    fn test_range_is_trimmed_and_progress_is_relative_to_it() {
        let _guard = lock_spawn();
        let fx = fixture();
        let script = write_script(
            fx.dir.path(),
            "whisper-cli",
            r#"echo "[00:00:03.000 --> 00:00:06.000]   Middle.""#,
        );
        let (trimmer, calls) = StubTrimmer::new(10.0);
        let opts = options(&script, &fx.model).with_time_range(TimeRange::new(2.0, Some(8.0)));
        let mut job = TranscriptionJob::new(opts, Box::new(trimmer));
        let mut observer = RecordingObserver::default();

        job.run(&fx.input, &JobControl::new(), &mut observer).unwrap();

        let (_, start, end) = calls.lock().unwrap()[0].clone();
        assert_relative_eq!(start, 2.0);
        assert_relative_eq!(end, 8.0);
        assert_eq!(observer.progress, vec![50]);
    }

    #[test]
    fn test_cancel_kills_recognizer_and_removes_temp_audio() {
        let _guard = lock_spawn();
        let fx = fixture();
        let script = write_script(
            fx.dir.path(),
            "whisper-cli",
            "echo \"[00:00:00.000 --> 00:00:05.000]   Partial line.\"\nexec sleep 30",
        );
        let (trimmer, calls) = StubTrimmer::new(60.0);
        let mut job = TranscriptionJob::new(options(&script, &fx.model), Box::new(trimmer));
        let control = JobControl::new();
        let trigger = control.clone();
        let mut observer = CallbackJobObserver::new(move |_: u8, _: &str| trigger.cancel());

        let started = Instant::now();
        let result = job.run(&fx.input, &control, &mut observer).unwrap();

        assert!(started.elapsed() < Duration::from_secs(10));
        assert!(result.cancelled);
        assert_eq!(result.exit_code, None);
        assert!(result.raw_output.contains("Partial line."));
        assert_eq!(job.state(), JobState::Cancelled);
        assert!(!trimmed_dir(&calls).exists());
    }

    #[test]
    fn test_cancel_before_launch_never_spawns() {
        let _guard = lock_spawn();
        let fx = fixture();
        let marker = fx.dir.path().join("spawned");
        let script = write_script(
            fx.dir.path(),
            "whisper-cli",
            &format!("touch '{}'", marker.display()),
        );
        let (trimmer, _calls) = StubTrimmer::new(10.0);
        let mut job = TranscriptionJob::new(options(&script, &fx.model), Box::new(trimmer));
        let control = JobControl::new();
        control.cancel();

        let result = job
            .run(&fx.input, &control, &mut RecordingObserver::default())
            .unwrap();

        assert!(result.cancelled);
        assert!(result.raw_output.is_empty());
        assert!(!marker.exists());
        assert_eq!(job.state(), JobState::Cancelled);
    }

    #[test]
    fn test_sidecar_document_is_preferred() {
        let _guard = lock_spawn();
        let fx = fixture();
        let script = write_script(
            fx.dir.path(),
            "whisper-cli",
            r#"printf '%s' '{"transcription":[{"offsets":{"from":0,"to":1500},"text":" From sidecar."}]}' > "$4.json"
echo "[00:00:00.000 --> 00:00:01.500]   From stdout.""#,
        );
        let (trimmer, _calls) = StubTrimmer::new(10.0);
        let mut job = TranscriptionJob::new(options(&script, &fx.model), Box::new(trimmer));

        let result = job
            .run(&fx.input, &JobControl::new(), &mut RecordingObserver::default())
            .unwrap();

        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.segments[0].text, "From sidecar.");
        assert_relative_eq!(result.segments[0].end, 1.5);
        assert_eq!(result.plain_text, "From sidecar.");
        assert!(result.raw_output.contains("From stdout."));
    }

    #[test]
    fn test_structured_stdout_is_parsed() {
        let _guard = lock_spawn();
        let fx = fixture();
        let script = write_script(
            fx.dir.path(),
            "whisper-cli",
            r#"echo '{"segments":[{"start":0.5,"end":1.0,"text":" Json. "}]}'"#,
        );
        let (trimmer, _calls) = StubTrimmer::new(10.0);
        let mut job = TranscriptionJob::new(options(&script, &fx.model), Box::new(trimmer));

        let result = job
            .run(&fx.input, &JobControl::new(), &mut RecordingObserver::default())
            .unwrap();

        assert_eq!(result.segments.len(), 1);
        assert_relative_eq!(result.segments[0].start, 0.5);
        assert_eq!(result.plain_text, "Json.");
    }

    #[test]
    fn test_diagnostics_and_exit_code_are_recorded() {
        let _guard = lock_spawn();
        let fx = fixture();
        let script = write_script(
            fx.dir.path(),
            "whisper-cli",
            r#"echo "whisper_init_from_file: loading model" >&2
echo "[00:00:00.000 --> 00:00:01.000]   Hi."
exit 3"#,
        );
        let (trimmer, _calls) = StubTrimmer::new(10.0);
        let mut job = TranscriptionJob::new(options(&script, &fx.model), Box::new(trimmer));

        let result = job
            .run(&fx.input, &JobControl::new(), &mut RecordingObserver::default())
            .unwrap();

        assert_eq!(result.exit_code, Some(3));
        assert_eq!(
            result.diagnostic_output,
            "whisper_init_from_file: loading model\n"
        );
        assert_eq!(result.plain_text, "Hi.");
        assert_eq!(job.state(), JobState::Completed);
    }

    #[test]
    fn test_run_ends_when_recognizer_exits_despite_inherited_pipes() {
        let _guard = lock_spawn();
        let fx = fixture();
        let script = write_script(
            fx.dir.path(),
            "whisper-cli",
            "echo \"[00:00:00.000 --> 00:00:05.000]   Hi.\"\nsleep 6 &\nexit 0",
        );
        let (trimmer, calls) = StubTrimmer::new(10.0);
        let mut job = TranscriptionJob::new(options(&script, &fx.model), Box::new(trimmer));
        let mut observer = RecordingObserver::default();

        let started = Instant::now();
        let result = job.run(&fx.input, &JobControl::new(), &mut observer).unwrap();

        assert!(
            started.elapsed() < Duration::from_secs(4),
            "run took {:?}",
            started.elapsed()
        );
        assert_eq!(result.exit_code, Some(0));
        assert_eq!(result.plain_text, "Hi.");
        assert_eq!(observer.progress, vec![0]);
        assert_eq!(job.state(), JobState::Completed);
        assert!(!trimmed_dir(&calls).exists());
    }

    #[test]
    fn test_launch_failure_fails_job_and_removes_temp_audio() {
        let _guard = lock_spawn();
        let fx = fixture();
        let missing = fx.dir.path().join("no-such-cli");
        let (trimmer, calls) = StubTrimmer::new(10.0);
        let mut job = TranscriptionJob::new(options(&missing, &fx.model), Box::new(trimmer));
        let mut observer = RecordingObserver::default();

        let err = job
            .run(&fx.input, &JobControl::new(), &mut observer)
            .unwrap_err();

        assert!(matches!(err, TranscriptionError::Launch { ref path, .. } if *path == missing));
        assert_eq!(job.state(), JobState::Failed);
        assert_eq!(observer.states.last(), Some(&JobState::Failed));
        assert!(!trimmed_dir(&calls).exists());
    }

    #[test]
    fn test_missing_model_is_reported_before_launch() {
        let fx = fixture();
        let (trimmer, calls) = StubTrimmer::new(10.0);
        let opts = TranscriptionOptions::new(fx.dir.path(), "missing")
            .with_models_dir(fx.dir.path());
        let mut job = TranscriptionJob::new(opts, Box::new(trimmer));

        let err = job
            .run(&fx.input, &JobControl::new(), &mut RecordingObserver::default())
            .unwrap_err();

        match err {
            TranscriptionError::ModelNotFound(path) => {
                assert_eq!(path, fx.dir.path().join("ggml-missing.bin"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_missing_input_is_reported() {
        let fx = fixture();
        let (trimmer, _calls) = StubTrimmer::new(10.0);
        let mut job = TranscriptionJob::new(options(fx.dir.path(), &fx.model), Box::new(trimmer));

        let err = job
            .run(
                &fx.dir.path().join("absent.wav"),
                &JobControl::new(),
                &mut RecordingObserver::default(),
            )
            .unwrap_err();

        assert!(matches!(err, TranscriptionError::InputNotFound(_)));
    }

    #[test]
    fn test_empty_time_range_is_rejected() {
        let fx = fixture();
        let (trimmer, calls) = StubTrimmer::new(10.0);
        let opts = options(fx.dir.path(), &fx.model).with_time_range(TimeRange::new(20.0, None));
        let mut job = TranscriptionJob::new(opts, Box::new(trimmer));

        let err = job
            .run(&fx.input, &JobControl::new(), &mut RecordingObserver::default())
            .unwrap_err();

        assert!(matches!(
            err,
            TranscriptionError::TimeRange(TimeRangeError::Empty { .. })
        ));
        assert_eq!(job.state(), JobState::Failed);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_job_runs_only_once() {
        let _guard = lock_spawn();
        let fx = fixture();
        let script = write_script(fx.dir.path(), "whisper-cli", TWO_LINES);
        let (trimmer, _calls) = StubTrimmer::new(10.0);
        let mut job = TranscriptionJob::new(options(&script, &fx.model), Box::new(trimmer));
        let control = JobControl::new();

        job.run(&fx.input, &control, &mut RecordingObserver::default())
            .unwrap();
        let err = job
            .run(&fx.input, &control, &mut RecordingObserver::default())
            .unwrap_err();

        assert!(matches!(
            err,
            TranscriptionError::AlreadyRun(JobState::Completed)
        ));
    }
}
