use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::ScopeConfig;
use crate::signal::{
    detect_peaks, estimate_rate, EcgRecording, HttpSource, SampleSource, SignalError,
    SimulatedSource, UpdateScheduler,
};
use crate::types::{RateReading, ScopeCommand, ScopeMessage, SourceMode, StatusKind};

/// Loop sleep while animating or waiting on a fetch; the tick deadline
/// decides whether a frame is actually produced.
const ACTIVE_LOOP_SLEEP: Duration = Duration::from_millis(2);
/// Loop sleep while idle with nothing in flight.
const IDLE_LOOP_SLEEP: Duration = Duration::from_millis(50);
/// Commands drained per iteration, so a burst can never starve ticking.
const COMMAND_BATCH: usize = 10;

/// Spawns the background engine that owns all mutable pipeline state.
pub fn spawn_thread(tx: Sender<ScopeMessage>, rx_cmd: Receiver<ScopeCommand>, config: ScopeConfig) {
    thread::spawn(move || run(tx, rx_cmd, config));
}

fn run(tx: Sender<ScopeMessage>, rx_cmd: Receiver<ScopeCommand>, config: ScopeConfig) {
    let mut scheduler = UpdateScheduler::new(config.points_to_show, config.tick_delay());
    let mut samples: Vec<f32> = Vec::new();
    let mut mode = if config.simulate {
        SourceMode::Simulated
    } else {
        SourceMode::Live
    };
    let mut fetch_in_flight = false;
    // Armed by Start, cleared by Stop: a fetch landing after Stop still
    // updates the session but never resumes ticking on its own.
    let mut autostart_armed = false;

    let (tx_fetch, rx_fetch) = channel::<Result<EcgRecording, SignalError>>();

    tx.send(ScopeMessage::Status(StatusKind::Ready)).ok();
    log::info!("engine ready");

    loop {
        for _ in 0..COMMAND_BATCH {
            match rx_cmd.try_recv() {
                Ok(ScopeCommand::Start) => {
                    autostart_armed = true;
                    if !fetch_in_flight {
                        fetch_in_flight = true;
                        spawn_fetch(mode, &config, tx_fetch.clone());
                    }
                }
                Ok(ScopeCommand::Stop) => {
                    autostart_armed = false;
                    scheduler.stop();
                    tx.send(ScopeMessage::Status(StatusKind::Stopped)).ok();
                }
                Ok(ScopeCommand::SetMode(new_mode)) => mode = new_mode,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return,
            }
        }

        // Completed fetches land here, between ticks, so a tick only ever
        // sees a whole session: either the old sequence or the new one.
        while let Ok(outcome) = rx_fetch.try_recv() {
            fetch_in_flight = false;
            match outcome {
                Ok(recording) => {
                    let rate = session_rate(&recording, config.sampling_rate_hz);
                    samples = recording.ecg_values;
                    scheduler.reset_session();
                    log::info!("recording loaded: {} samples", samples.len());
                    tx.send(ScopeMessage::Status(StatusKind::Loaded)).ok();
                    tx.send(ScopeMessage::Rate(rate)).ok();
                    if autostart_armed {
                        autostart_armed = false;
                        scheduler.start(Instant::now());
                    }
                }
                Err(err) => {
                    // Recovered locally: report it and leave the scheduler
                    // in whatever state it was in.
                    autostart_armed = false;
                    log::warn!("fetch failed: {err}");
                    tx.send(ScopeMessage::Status(StatusKind::Error(err.to_string())))
                        .ok();
                }
            }
        }

        let mut gui_gone = false;
        scheduler.poll(Instant::now(), &samples, &mut |window| {
            if tx.send(ScopeMessage::Frame(window.to_vec())).is_err() {
                gui_gone = true;
            }
        });
        if gui_gone {
            return;
        }

        thread::sleep(if scheduler.is_running() || fetch_in_flight {
            ACTIVE_LOOP_SLEEP
        } else {
            IDLE_LOOP_SLEEP
        });
    }
}

fn session_rate(recording: &EcgRecording, sampling_rate_hz: f32) -> Option<RateReading> {
    if let Some(bpm) = recording.bpm {
        return Some(RateReading {
            bpm: bpm.round() as u32,
            estimated: false,
        });
    }
    let peaks = detect_peaks(&recording.ecg_values);
    let bpm = estimate_rate(&peaks, sampling_rate_hz);
    (bpm > 0).then_some(RateReading {
        bpm,
        estimated: true,
    })
}

fn spawn_fetch(
    mode: SourceMode,
    config: &ScopeConfig,
    tx_fetch: Sender<Result<EcgRecording, SignalError>>,
) {
    let source: Box<dyn SampleSource + Send> = match mode {
        SourceMode::Live => Box::new(HttpSource::new(config.api_url.clone())),
        SourceMode::Simulated => Box::new(SimulatedSource::default()),
    };
    thread::spawn(move || {
        tx_fetch.send(source.fetch()).ok();
    });
}
