pub mod shared {
    pub mod constants;
    pub mod paths;
    pub mod time_range;
    pub mod timestamp;
}

pub mod transcript {
    pub mod domain {
        pub mod segment;
        pub mod segment_parser;
        pub mod timestamped_line;
        pub mod transcription_result;
    }
}

pub mod subtitles {
    pub mod domain {
        pub mod srt_formatter;
    }
}

pub mod recognizer {
    pub mod domain {
        pub mod progress_tracker;
        pub mod transcription_options;
    }
    pub mod infrastructure {
        pub mod whisper_cli_command;
    }
}

pub mod audio {
    pub mod domain {
        pub mod audio_trimmer;
    }
    pub mod infrastructure {
        pub mod wav_trimmer;
    }
}

pub mod diarization {
    pub mod domain {
        pub mod diarizer;
    }
    pub mod infrastructure {
        pub mod command_diarizer;
    }
}

pub mod pipeline {
    pub mod job_control;
    pub mod job_observer;
    pub mod render_transcript_use_case;
    pub mod transcription_error;
    pub mod transcription_job;
    pub mod infrastructure {
        pub mod recognizer_streams;
        pub mod temp_audio;
    }
}

#[cfg(test)]
mod test_support;
