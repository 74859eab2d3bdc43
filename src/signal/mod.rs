// Signal core: everything between a fetched recording and a drawn frame.
pub mod detect;
pub mod error;
pub mod rate;
pub mod scheduler;
pub mod snapshot;
pub mod source;
pub mod trace;
pub mod window;

pub use detect::{detect_peaks, PEAK_THRESHOLD_RATIO};
pub use error::SignalError;
pub use rate::estimate_rate;
pub use scheduler::UpdateScheduler;
pub use snapshot::{render_frame_png, SnapshotStyle};
pub use source::{EcgRecording, HttpSource, ManualSource, SampleSource, SimulatedSource};
pub use trace::{grid_offsets, trace_points, AMPLITUDE_RATIO, GRID_PITCH};
pub use window::WindowBuffer;
