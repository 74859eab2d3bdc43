use std::time::Duration;

use once_cell::sync::Lazy;
use rand::Rng;
use serde::Deserialize;

use super::error::SignalError;

/// One fetched ECG session: the raw series plus an optional
/// device-reported heart rate. Missing fields decode to their empty
/// defaults rather than failing the whole body.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EcgRecording {
    pub ecg_values: Vec<f32>,
    pub bpm: Option<f32>,
}

/// Something that can produce a full recording on demand.
pub trait SampleSource {
    fn fetch(&self) -> Result<EcgRecording, SignalError>;
}

/// Fetches a recording from the configured HTTP endpoint.
pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl SampleSource for HttpSource {
    fn fetch(&self) -> Result<EcgRecording, SignalError> {
        log::info!("fetching recording from {}", self.url);
        let response = ureq::get(&self.url).timeout(self.timeout).call()?;
        response
            .into_json::<EcgRecording>()
            .map_err(|err| SignalError::MalformedBody(err.to_string()))
    }
}

/// Samples in one synthetic beat; 200 samples at the assumed 250 Hz
/// cadence put the synthetic rate at 75 beats per minute.
const BEAT_SAMPLES: usize = 200;

// Stylized single beat: flat baseline, a P bump, a sharp QRS excursion,
// a rounded T bump. Amplitudes are normalized so the R spike sits at 1.
static BEAT_TEMPLATE: Lazy<Vec<f32>> = Lazy::new(|| {
    let mut beat = vec![0.0f32; BEAT_SAMPLES];
    for i in 0..20 {
        beat[30 + i] = 0.15 * half_sine(i as f32 / 19.0);
    }
    beat[70] = -0.12;
    beat[71] = 0.35;
    beat[72] = 1.0;
    beat[73] = 0.3;
    beat[74] = -0.2;
    for i in 0..30 {
        beat[110 + i] = 0.25 * half_sine(i as f32 / 29.0);
    }
    beat
});

fn half_sine(x: f32) -> f32 {
    (x * std::f32::consts::PI).sin()
}

/// Generates a synthetic recording so the scope can run with no server.
pub struct SimulatedSource {
    beats: usize,
    noise: f32,
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self {
            beats: 8,
            noise: 0.02,
        }
    }
}

impl SampleSource for SimulatedSource {
    fn fetch(&self) -> Result<EcgRecording, SignalError> {
        let mut rng = rand::thread_rng();
        let mut values = Vec::with_capacity(self.beats * BEAT_SAMPLES);
        for _ in 0..self.beats {
            for &value in BEAT_TEMPLATE.iter() {
                values.push(value + rng.gen_range(-self.noise..=self.noise));
            }
        }
        // No device-reported rate; the estimator supplies one.
        Ok(EcgRecording {
            ecg_values: values,
            bpm: None,
        })
    }
}

/// In-memory source useful for tests and deterministic playback.
pub struct ManualSource {
    recording: EcgRecording,
}

impl ManualSource {
    pub fn new(recording: EcgRecording) -> Self {
        Self { recording }
    }
}

impl SampleSource for ManualSource {
    fn fetch(&self) -> Result<EcgRecording, SignalError> {
        Ok(self.recording.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;
    use crate::signal::{detect_peaks, estimate_rate};

    #[test]
    fn recording_decodes_optional_fields() {
        let full: EcgRecording = serde_json::from_str(r#"{"ecgValues":[0,1,0],"bpm":72}"#).unwrap();
        assert_eq!(full.ecg_values, vec![0.0, 1.0, 0.0]);
        assert_eq!(full.bpm, Some(72.0));

        let no_rate: EcgRecording = serde_json::from_str(r#"{"ecgValues":[2.5]}"#).unwrap();
        assert_eq!(no_rate.ecg_values, vec![2.5]);
        assert_eq!(no_rate.bpm, None);

        let empty: EcgRecording = serde_json::from_str("{}").unwrap();
        assert!(empty.ecg_values.is_empty());
        assert_eq!(empty.bpm, None);
    }

    #[test]
    fn manual_source_replays_its_recording() {
        let source = ManualSource::new(EcgRecording {
            ecg_values: vec![1.0, 2.0],
            bpm: Some(60.0),
        });
        let recording = source.fetch().unwrap();
        assert_eq!(recording.ecg_values, vec![1.0, 2.0]);
        assert_eq!(recording.bpm, Some(60.0));
    }

    #[test]
    fn simulated_recording_estimates_the_template_rate() {
        let source = SimulatedSource::default();
        let recording = source.fetch().unwrap();
        assert_eq!(recording.ecg_values.len(), 8 * BEAT_SAMPLES);
        assert!(recording.ecg_values.iter().all(|v| v.is_finite()));
        let peaks = detect_peaks(&recording.ecg_values);
        // One R spike per beat, spaced exactly one beat apart.
        assert_eq!(peaks.len(), 8);
        assert_eq!(estimate_rate(&peaks, 250.0), 75);
    }

    fn one_shot_server(response: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = [0u8; 1024];
                let _ = stream.read(&mut request);
                let _ = stream.write_all(&response);
            }
        });
        format!("http://{addr}/ecg")
    }

    fn json_response(body: &str) -> Vec<u8> {
        format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            body.len(),
            body
        )
        .into_bytes()
    }

    #[test]
    fn http_source_decodes_a_recording() {
        let url = one_shot_server(json_response(r#"{"ecgValues":[0,1,0],"bpm":72}"#));
        let recording = HttpSource::new(url).fetch().unwrap();
        assert_eq!(recording.ecg_values, vec![0.0, 1.0, 0.0]);
        assert_eq!(recording.bpm, Some(72.0));
    }

    #[test]
    fn http_source_surfaces_status_failures() {
        let url = one_shot_server(
            b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
                .to_vec(),
        );
        match HttpSource::new(url).fetch() {
            Err(SignalError::Http { status }) => assert_eq!(status, 500),
            other => panic!("expected an HTTP status error, got {other:?}"),
        }
    }

    #[test]
    fn http_source_rejects_malformed_bodies() {
        let url = one_shot_server(json_response("not a recording"));
        assert!(matches!(
            HttpSource::new(url).fetch(),
            Err(SignalError::MalformedBody(_))
        ));
    }
}
