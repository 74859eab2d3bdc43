use std::fmt;

/// Where a session's samples come from.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum SourceMode {
    Live,
    Simulated,
}

/// Commands the GUI sends to the engine.
#[derive(Clone, Debug)]
pub enum ScopeCommand {
    /// Fetch a fresh recording, then begin animating once it lands.
    Start,
    /// Stop animating. Does not cancel an in-flight fetch.
    Stop,
    SetMode(SourceMode),
}

/// Messages the engine sends back to the GUI.
#[derive(Clone, Debug)]
pub enum ScopeMessage {
    Status(StatusKind),
    /// Current window contents, one per tick.
    Frame(Vec<f32>),
    Rate(Option<RateReading>),
}

/// States of the user-facing status line.
#[derive(Clone, Debug, PartialEq)]
pub enum StatusKind {
    Ready,
    Loaded,
    Error(String),
    Stopped,
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusKind::Ready => write!(f, "Ready"),
            StatusKind::Loaded => write!(f, "ECG Data Loaded"),
            StatusKind::Error(message) => write!(f, "Error: {message}"),
            StatusKind::Stopped => write!(f, "Animation Stopped"),
        }
    }
}

/// Heart rate for the readout; `estimated` tells a value derived from
/// peak spacing apart from one the device reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateReading {
    pub bpm: u32,
    pub estimated: bool,
}

impl fmt::Display for RateReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.estimated {
            write!(f, "Est. BPM: {}", self.bpm)
        } else {
            write!(f, "BPM: {}", self.bpm)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_strings() {
        assert_eq!(StatusKind::Ready.to_string(), "Ready");
        assert_eq!(StatusKind::Loaded.to_string(), "ECG Data Loaded");
        assert_eq!(
            StatusKind::Error("server returned HTTP 500".into()).to_string(),
            "Error: server returned HTTP 500"
        );
        assert_eq!(StatusKind::Stopped.to_string(), "Animation Stopped");
    }

    #[test]
    fn rate_readout_strings() {
        let reported = RateReading { bpm: 72, estimated: false };
        let estimated = RateReading { bpm: 75, estimated: true };
        assert_eq!(reported.to_string(), "BPM: 72");
        assert_eq!(estimated.to_string(), "Est. BPM: 75");
    }
}
