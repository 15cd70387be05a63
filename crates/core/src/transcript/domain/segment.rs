use serde::{Deserialize, Serialize};

/// One timestamped unit of recognized speech.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Segment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_fields() {
        let s = Segment::new(1.0, 2.5, "hello");
        assert_eq!(s.text, "hello");
        assert_eq!(s.start, 1.0);
        assert_eq!(s.end, 2.5);
    }
}
