mod settings;

use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::Parser;

use scribe_core::audio::infrastructure::wav_trimmer::WavTrimmer;
use scribe_core::diarization::domain::diarizer::Diarizer;
use scribe_core::diarization::infrastructure::command_diarizer::CommandDiarizer;
use scribe_core::pipeline::job_control::{JobControl, JobState};
use scribe_core::pipeline::job_observer::{JobObserver, LogJobObserver};
use scribe_core::pipeline::render_transcript_use_case::RenderTranscriptUseCase;
use scribe_core::pipeline::transcription_job::TranscriptionJob;
use scribe_core::recognizer::domain::transcription_options::{
    clamp_beam_size, Task, TranscriptionOptions,
};
use scribe_core::shared::constants::{DEFAULT_MODELS_DIR, MAX_BEAM_SIZE, MIN_BEAM_SIZE};
use scribe_core::shared::paths::absolute_path;
use scribe_core::shared::time_range::TimeRange;

use settings::Settings;

/// Transcribe audio with whisper.cpp and produce plain text or subtitles.
#[derive(Parser, Debug)]
#[command(name = "scribe")]
struct Cli {
    /// Input WAV file.
    input: PathBuf,

    /// Write the transcript here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Model name (resolved to ggml-<NAME>.bin) or path to a model file.
    #[arg(long)]
    model: Option<String>,

    /// Directory holding ggml model files.
    #[arg(long, default_value = DEFAULT_MODELS_DIR)]
    models_dir: PathBuf,

    /// whisper-cli executable, or the directory containing it.
    #[arg(long)]
    whisper_path: Option<PathBuf>,

    /// Spoken language code, or "auto" to detect.
    #[arg(long)]
    language: Option<String>,

    /// Beam search width (1-8).
    #[arg(long)]
    beam_size: Option<u32>,

    /// Translate to English instead of transcribing.
    #[arg(long)]
    translate: bool,

    /// Start offset: HH:MM:SS, MM:SS or seconds.
    #[arg(long, default_value = "0")]
    start: String,

    /// End offset: HH:MM:SS, MM:SS, seconds or "end".
    #[arg(long, default_value = "end")]
    end: String,

    /// Emit SRT subtitles instead of plain text.
    #[arg(long)]
    srt: bool,

    /// Diarization program run as `<PROGRAM> <audio> <srt> [--remove-timestamps]`.
    #[arg(long)]
    diarize_command: Option<PathBuf>,

    /// Cancel the transcription after this many seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Persist whisper path, model, beam size and language as defaults.
    #[arg(long)]
    save_settings: bool,
}

/// Prints progress on stderr and forwards everything else to the log.
struct ConsoleObserver {
    log: LogJobObserver,
}

impl JobObserver for ConsoleObserver {
    fn progress(&mut self, _percent: u8, message: &str) {
        eprint!("\r{message}");
    }

    fn output_line(&mut self, line: &str) {
        self.log.output_line(line);
    }

    fn state_changed(&mut self, state: JobState) {
        self.log.state_changed(state);
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.log.timing(stage, duration_ms);
    }

    fn info(&mut self, message: &str) {
        self.log.info(message);
    }

    fn summary(&self) {
        self.log.summary();
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut settings = Settings::load();
    let input = resolve_input(&cli.input, settings.last_dir.as_deref());
    validate(&cli, &input)?;

    apply_overrides(&cli, &mut settings);
    if cli.save_settings {
        settings.last_dir = absolute_path(&input)?.parent().map(Path::to_path_buf);
        let path = settings.save()?;
        log::info!("Settings saved to {}", path.display());
    }

    let options = build_options(&cli, &settings)?;
    let control = JobControl::new();
    if let Some(secs) = cli.timeout {
        arm_watchdog(control.clone(), secs);
    }

    let mut observer = ConsoleObserver {
        log: LogJobObserver::default(),
    };
    let mut job = TranscriptionJob::new(options, Box::new(WavTrimmer::new()));
    let result = job.run(&input, &control, &mut observer)?;
    eprintln!();
    if result.cancelled {
        return Err("Transcription cancelled".into());
    }
    if result.exit_code != Some(0) {
        log::warn!("whisper.cpp reported: {}", result.diagnostic_output.trim());
    }
    if !result.has_text() {
        log::warn!("No speech recognized in {}", input.display());
    }

    let diarizer = cli
        .diarize_command
        .as_ref()
        .map(|program| Box::new(CommandDiarizer::new(program)) as Box<dyn Diarizer>);
    let text = RenderTranscriptUseCase::new(diarizer)
        .render(&input, &result, job.options(), &mut |_: u8, message: &str| {
            eprintln!("{message}")
        })
        .map_err(|e| e as Box<dyn std::error::Error>)?;

    match cli.output {
        Some(ref path) => {
            std::fs::write(path, &text)?;
            log::info!("Output written to {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// A relative input missing from the working directory is looked up in the
/// directory of the last saved input.
fn resolve_input(input: &Path, last_dir: Option<&Path>) -> PathBuf {
    if input.is_file() || input.is_absolute() {
        return input.to_path_buf();
    }
    match last_dir.map(|dir| dir.join(input)) {
        Some(candidate) if candidate.is_file() => {
            log::info!("Using {} from the last directory", candidate.display());
            candidate
        }
        _ => input.to_path_buf(),
    }
}

fn validate(cli: &Cli, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !input.is_file() {
        return Err(format!("Input file not found: {}", input.display()).into());
    }
    if let Some(beam) = cli.beam_size {
        if !(u32::from(MIN_BEAM_SIZE)..=u32::from(MAX_BEAM_SIZE)).contains(&beam) {
            log::warn!("Beam size {beam} is outside {MIN_BEAM_SIZE}-{MAX_BEAM_SIZE}, clamping");
        }
    }
    if cli.timeout == Some(0) {
        return Err("Timeout must be at least one second".into());
    }
    if let Some(ref program) = cli.diarize_command {
        if program.components().count() > 1 && !program.is_file() {
            return Err(format!("Diarization program not found: {}", program.display()).into());
        }
    }
    Ok(())
}

/// Command-line values win over stored settings.
fn apply_overrides(cli: &Cli, settings: &mut Settings) {
    if let Some(ref path) = cli.whisper_path {
        settings.whisper_path = path.clone();
    }
    if let Some(ref model) = cli.model {
        settings.model = model.clone();
    }
    if let Some(beam) = cli.beam_size {
        settings.beam_size = clamp_beam_size(beam);
    }
    if let Some(ref language) = cli.language {
        settings.language = language.clone();
    }
}

fn build_options(
    cli: &Cli,
    settings: &Settings,
) -> Result<TranscriptionOptions, Box<dyn std::error::Error>> {
    let range = TimeRange::parse(&cli.start, &cli.end)?;
    let task = if cli.translate {
        Task::Translate
    } else {
        Task::Transcribe
    };
    Ok(
        TranscriptionOptions::new(&settings.whisper_path, settings.model.as_str())
            .with_models_dir(&cli.models_dir)
            .with_language(&settings.language)
            .with_beam_size(u32::from(settings.beam_size))
            .with_task(task)
            .with_time_range(range)
            .with_subtitles(cli.srt),
    )
}

fn arm_watchdog(control: JobControl, secs: u64) {
    std::thread::spawn(move || {
        std::thread::sleep(Duration::from_secs(secs));
        log::warn!("Timeout of {secs}s reached, cancelling transcription");
        control.cancel();
    });
}
