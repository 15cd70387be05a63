use std::io::{self, BufRead, BufReader, Read};
use std::process::Child;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use crate::pipeline::transcription_error::TranscriptionError;

type LineResult = io::Result<String>;

/// Outcome of waiting for the next stdout line.
#[derive(Debug)]
pub enum NextLine {
    Line(String),
    /// Nothing arrived within the timeout.
    Pending,
    /// stdout reached end of file.
    Closed,
    Failed(io::Error),
}

/// Output left over when the recognizer exits.
#[derive(Debug, Default)]
pub struct Settled {
    /// stdout lines not yet consumed through `next_line`.
    pub lines: Vec<String>,
    /// Full stderr, or empty when the pipe stayed open.
    pub diagnostics: String,
}

/// Drains a recognizer's stdout and stderr on dedicated threads.
///
/// Layout: `stdout reader → line channel → controlling thread` and
/// `stderr drain → diagnostics channel (one message at EOF)`.
/// Each thread owns its own buffer; nothing is shared.
pub struct RecognizerStreams {
    lines: Receiver<LineResult>,
    stdout_handle: JoinHandle<()>,
    diagnostics: Receiver<String>,
    stderr_handle: JoinHandle<()>,
}

impl RecognizerStreams {
    pub fn attach(child: &mut Child) -> io::Result<Self> {
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "recognizer stdout not captured"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "recognizer stderr not captured"))?;

        Ok(Self::from_readers(stdout, stderr))
    }

    fn from_readers(
        stdout: impl Read + Send + 'static,
        stderr: impl Read + Send + 'static,
    ) -> Self {
        let (line_tx, lines) = crossbeam_channel::unbounded::<LineResult>();
        let (diag_tx, diagnostics) = crossbeam_channel::bounded::<String>(1);

        Self {
            lines,
            stdout_handle: spawn_stdout_reader(stdout, line_tx),
            diagnostics,
            stderr_handle: spawn_stderr_drain(stderr, diag_tx),
        }
    }

    /// Waits at most `timeout` for the next stdout line.
    pub fn next_line(&self, timeout: Duration) -> NextLine {
        match self.lines.recv_timeout(timeout) {
            Ok(Ok(line)) => NextLine::Line(line),
            Ok(Err(e)) => NextLine::Failed(e),
            Err(RecvTimeoutError::Timeout) => NextLine::Pending,
            Err(RecvTimeoutError::Disconnected) => NextLine::Closed,
        }
    }

    /// Lines already read but not yet consumed.
    pub fn drain_buffered(&self) -> Vec<String> {
        self.lines.try_iter().filter_map(Result::ok).collect()
    }

    /// Collects what is left once the process has exited, waiting at most
    /// `grace` for both pipes to close.
    ///
    /// A descendant that inherited the pipes can keep them open after the
    /// recognizer exits. Threads still blocked on such a pipe are detached.
    pub fn settle(self, grace: Duration) -> Result<Settled, TranscriptionError> {
        let deadline = Instant::now() + grace;
        let mut lines = Vec::new();
        let mut failure = None;
        let stdout_closed = loop {
            match self.lines.recv_deadline(deadline) {
                Ok(Ok(line)) => lines.push(line),
                Ok(Err(e)) => {
                    failure = Some(e);
                    break true;
                }
                Err(RecvTimeoutError::Disconnected) => break true,
                Err(RecvTimeoutError::Timeout) => break false,
            }
        };
        let diagnostics = self.diagnostics.recv_deadline(deadline).ok();
        if !stdout_closed || diagnostics.is_none() {
            log::warn!("Recognizer pipes still open after exit; a child process may hold them");
        }

        if stdout_closed && self.stdout_handle.join().is_err() {
            return Err(TranscriptionError::WorkerPanicked("Recognizer stdout"));
        }
        if diagnostics.is_some() && self.stderr_handle.join().is_err() {
            return Err(TranscriptionError::WorkerPanicked("Recognizer stderr"));
        }

        let diagnostics = diagnostics.unwrap_or_default();
        match failure {
            Some(source) => Err(TranscriptionError::Stream {
                source,
                diagnostics,
            }),
            None => Ok(Settled { lines, diagnostics }),
        }
    }

    /// Collects stderr after the process was killed, waiting at most `grace`.
    ///
    /// The drain threads are detached: a descendant of the killed process may
    /// still hold the pipes open.
    pub fn abandon(self, grace: Duration) -> String {
        match self.diagnostics.recv_timeout(grace) {
            Ok(text) => text,
            Err(_) => {
                log::warn!("Recognizer stderr still open after termination; diagnostics dropped");
                String::new()
            }
        }
    }
}

fn spawn_stdout_reader(stdout: impl Read + Send + 'static, tx: Sender<LineResult>) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let mut reader = BufReader::new(stdout);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    let line = line.trim_end_matches(['\r', '\n']).to_string();
                    if tx.send(Ok(line)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.send(Err(e));
                    break;
                }
            }
        }
    })
}

fn spawn_stderr_drain(stderr: impl Read + Send + 'static, tx: Sender<String>) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let mut reader = BufReader::new(stderr);
        let mut collected = Vec::new();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    log::debug!("whisper stderr: {}", String::from_utf8_lossy(&buf).trim_end());
                    collected.extend_from_slice(&buf);
                }
                Err(e) => {
                    log::warn!("Failed to read recognizer stderr: {e}");
                    break;
                }
            }
        }
        let _ = tx.send(String::from_utf8_lossy(&collected).into_owned());
    })
}
