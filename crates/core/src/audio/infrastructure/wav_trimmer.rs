use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use hound::{Sample, SampleFormat, WavReader, WavWriter};
use thiserror::Error;

use crate::audio::domain::audio_trimmer::AudioTrimmer;

#[derive(Error, Debug)]
pub enum WavTrimError {
    #[error("failed to open WAV file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
    #[error("failed to copy audio to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
    #[error("WAV file {0} has a sample rate of zero")]
    ZeroSampleRate(PathBuf),
}

/// Trims PCM/float WAV files with hound, keeping the source format.
///
/// whisper.cpp reads WAV directly, so no resampling happens here.
#[derive(Debug, Default, Clone, Copy)]
pub struct WavTrimmer;

impl WavTrimmer {
    pub fn new() -> Self {
        Self
    }

    fn open(path: &Path) -> Result<WavReader<BufReader<File>>, WavTrimError> {
        WavReader::open(path).map_err(|source| WavTrimError::Open {
            path: path.to_path_buf(),
            source,
        })
    }

    fn copy_range(
        &self,
        input: &Path,
        output: &Path,
        start: f64,
        end: f64,
    ) -> Result<(), WavTrimError> {
        let mut reader = Self::open(input)?;
        let spec = reader.spec();
        if spec.sample_rate == 0 {
            return Err(WavTrimError::ZeroSampleRate(input.to_path_buf()));
        }

        let total_frames = reader.duration();
        let rate = spec.sample_rate as f64;
        let start_frame = ((start.max(0.0) * rate).round() as u32).min(total_frames);
        let end_frame = ((end.max(0.0) * rate).round() as u32).clamp(start_frame, total_frames);
        let sample_count = (end_frame - start_frame) as usize * spec.channels as usize;

        let write_err = |source: hound::Error| WavTrimError::Write {
            path: output.to_path_buf(),
            source,
        };

        reader.seek(start_frame).map_err(|e| write_err(e.into()))?;
        let mut writer = WavWriter::create(output, spec).map_err(write_err)?;

        let copied = match (spec.sample_format, spec.bits_per_sample) {
            (SampleFormat::Float, _) => copy_samples::<f32>(&mut reader, &mut writer, sample_count),
            (SampleFormat::Int, bits) if bits <= 16 => {
                copy_samples::<i16>(&mut reader, &mut writer, sample_count)
            }
            (SampleFormat::Int, _) => copy_samples::<i32>(&mut reader, &mut writer, sample_count),
        };
        copied.map_err(write_err)?;

        writer.finalize().map_err(write_err)?;
        Ok(())
    }
}

fn copy_samples<S: Sample>(
    reader: &mut WavReader<BufReader<File>>,
    writer: &mut WavWriter<BufWriter<File>>,
    count: usize,
) -> Result<(), hound::Error> {
    for sample in reader.samples::<S>().take(count) {
        writer.write_sample(sample?)?;
    }
    Ok(())
}

impl AudioTrimmer for WavTrimmer {
    fn duration(&self, path: &Path) -> Result<f64, Box<dyn std::error::Error + Send + Sync>> {
        let reader = Self::open(path)?;
        let spec = reader.spec();
        if spec.sample_rate == 0 {
            return Err(WavTrimError::ZeroSampleRate(path.to_path_buf()).into());
        }
        Ok(reader.duration() as f64 / spec.sample_rate as f64)
    }

    fn trim(
        &self,
        input: &Path,
        output: &Path,
        start: f64,
        end: f64,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.copy_range(input, output, start, end)?;
        Ok(())
    }
}
