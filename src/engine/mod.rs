//! The metronome core: transport, look-ahead scheduler and derived state.
//!
//! [`Metronome`] owns the configuration, the output device and the runtime
//! state of the current epoch. Callers drive it with [`Metronome::tick`] at UI
//! rate (~60 Hz) while it runs; each tick dispatches the clicks that fall
//! inside the look-ahead window and refreshes beat index and phase.

pub mod event;
pub mod scheduler;
pub mod tap;
pub mod transport;

pub use event::{ClickEvent, ClickStream, MetronomeEvent};
pub use scheduler::{Scheduler, LOOKAHEAD, MAX_STEPS_PER_PASS, START_OFFSET};
pub use tap::TapTempo;
pub use transport::{Transport, TransportState};

use rtrb::{Consumer, Producer, RingBuffer};
use tracing::{debug, info, warn};

use crate::{
    config::{ConfigPatch, ConfigSnapshot, MetronomeConfig},
    error::{DeviceError, ImportError},
    io::OutputDevice,
};

/// Minimum phase movement (percent) worth publishing
const PHASE_THRESHOLD: f32 = 0.1;

pub struct Metronome<D: OutputDevice> {
    config: MetronomeConfig,
    device: D,
    transport: Transport,
    scheduler: Option<Scheduler>,
    taps: TapTempo,
    beat_index: usize,
    phase: f32,
    events: Option<Producer<MetronomeEvent>>,
    clicks: Vec<ClickEvent>,
    beats: Vec<usize>,
}

impl<D: OutputDevice> Metronome<D> {
    pub fn new(device: D) -> Self {
        Self::with_config(device, MetronomeConfig::default())
    }

    pub fn with_config(device: D, config: MetronomeConfig) -> Self {
        Self {
            config,
            device,
            transport: Transport::default(),
            scheduler: None,
            taps: TapTempo::default(),
            beat_index: 0,
            phase: 0.0,
            events: None,
            clicks: Vec::with_capacity(2 * MAX_STEPS_PER_PASS),
            beats: Vec::with_capacity(MAX_STEPS_PER_PASS),
        }
    }

    // ---- transport ----

    /// Start the transport. A no-op while running.
    ///
    /// The first click sounds `START_OFFSET` after the device clock reads at
    /// the moment of starting. On device failure the transport stays stopped.
    pub fn start(&mut self) -> Result<(), DeviceError> {
        if self.transport.is_running() {
            debug!("Start ignored, already running");
            return Ok(());
        }

        if let Err(err) = self.device.resume() {
            warn!(%err, "Could not start audio output");
            return Err(err);
        }
        self.device.set_master_level(self.config.master_level());

        let epoch = self.device.now() + START_OFFSET;
        self.scheduler = Some(Scheduler::new(epoch));
        self.transport.begin();
        info!(
            epoch,
            run = self.transport.epoch(),
            bpm = self.config.bpm(),
            "Transport started"
        );
        self.emit(MetronomeEvent::RunningChanged(true));

        self.tick();
        Ok(())
    }

    /// Stop the transport. Clicks already handed to the device still sound.
    pub fn stop(&mut self) {
        if !self.transport.end() {
            return;
        }
        self.scheduler = None;
        info!(run = self.transport.epoch(), "Transport stopped");

        self.beat_index = 0;
        self.phase = 0.0;
        self.emit(MetronomeEvent::Beat(0));
        self.emit(MetronomeEvent::PhaseChanged(0.0));
        self.emit(MetronomeEvent::RunningChanged(false));
    }

    /// Stop, restore default settings and forget tap history.
    pub fn reset(&mut self) {
        self.stop();

        let previous_bpm = self.config.bpm();
        self.config = MetronomeConfig::default();
        self.taps.clear();
        self.device.set_master_level(self.config.master_level());

        if self.config.bpm() != previous_bpm {
            self.emit(MetronomeEvent::BpmChanged(self.config.bpm()));
        }
        info!("Settings reset to defaults");
    }

    /// Run one scheduler pass. Returns whether the caller should keep ticking.
    pub fn tick(&mut self) -> bool {
        if !self.transport.is_running() {
            return false;
        }
        let Some(scheduler) = self.scheduler.as_mut() else {
            return false;
        };

        let now = self.device.now();
        self.clicks.clear();
        let report = scheduler.pass(&self.config, now, &mut self.clicks);
        let phase = scheduler.phase_at(now, report.measure_duration);
        self.beats.clear();
        self.beats.extend_from_slice(scheduler.beat_starts());

        for click in &self.clicks {
            self.device.schedule(click);
        }

        if report.training_bumps > 0 {
            self.apply_training(report.training_bumps);
        }

        // one event per beat start, even when a pass covers several
        let beats = std::mem::take(&mut self.beats);
        for &beat in &beats {
            self.beat_index = beat;
            self.emit(MetronomeEvent::Beat(beat));
        }
        self.beats = beats;

        self.update_phase(if self.config.visual_pulse() { phase } else { 0.0 });
        true
    }

    fn apply_training(&mut self, bumps: u32) {
        let previous = self.config.bpm();
        let step = i64::from(self.config.training().step) * i64::from(bumps);

        if self.config.set_bpm_unlocked(i64::from(previous) + step) && self.config.bpm() != previous {
            info!(from = previous, to = self.config.bpm(), "Training tempo increase");
            self.emit(MetronomeEvent::BpmChanged(self.config.bpm()));
        }
    }

    fn update_phase(&mut self, phase: f32) {
        let moved = (phase - self.phase).abs() > PHASE_THRESHOLD;
        if moved || (phase == 0.0 && self.phase != 0.0) {
            self.phase = phase;
            self.emit(MetronomeEvent::PhaseChanged(phase));
        }
    }

    // ---- configuration ----

    /// Apply a partial update. Every field is validated on its own.
    pub fn set_configuration(&mut self, patch: &ConfigPatch) {
        let previous_bpm = self.config.bpm();
        let previous_volume = self.config.volume();

        self.config.apply(patch);

        if self.config.bpm() != previous_bpm {
            self.emit(MetronomeEvent::BpmChanged(self.config.bpm()));
        }
        if self.config.volume() != previous_volume {
            self.device.set_master_level(self.config.master_level());
        }
        if !self.config.visual_pulse() {
            self.update_phase(0.0);
        }
    }

    /// Register a tap (milliseconds). Ignored while locked or running.
    pub fn tap_tempo(&mut self, timestamp_ms: f64) {
        if self.config.tempo_locked() || self.transport.is_running() {
            debug!("Tap ignored");
            return;
        }

        if let Some(bpm) = self.taps.tap(timestamp_ms) {
            self.change_bpm(i64::from(bpm));
        }
    }

    pub fn increment_bpm(&mut self) {
        self.change_bpm(i64::from(self.config.bpm()) + 1);
    }

    pub fn decrement_bpm(&mut self) {
        self.change_bpm(i64::from(self.config.bpm()) - 1);
    }

    fn change_bpm(&mut self, bpm: i64) {
        let previous = self.config.bpm();
        if self.config.set_bpm_unlocked(bpm) && self.config.bpm() != previous {
            self.emit(MetronomeEvent::BpmChanged(self.config.bpm()));
        }
    }

    pub fn toggle_accent(&mut self, beat: usize) {
        self.config.toggle_accent(beat);
    }

    pub fn set_tempo_lock(&mut self, locked: bool) {
        self.set_configuration(&ConfigPatch {
            tempo_lock: Some(locked),
            ..Default::default()
        });
    }

    pub fn export_snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot::from(&self.config)
    }

    /// Merge a stored snapshot. A rejected payload leaves settings untouched.
    pub fn import_snapshot(&mut self, json: &str) -> Result<(), ImportError> {
        let patch = ConfigSnapshot::parse_patch(json).inspect_err(|err| {
            warn!(%err, "Snapshot rejected");
        })?;
        self.set_configuration(&patch);
        info!("Snapshot imported");
        Ok(())
    }

    // ---- observers ----

    /// Receive state changes over a ring buffer. Replaces any earlier subscriber.
    ///
    /// Events are dropped when the ring is full.
    pub fn subscribe(&mut self, capacity: usize) -> Consumer<MetronomeEvent> {
        let (tx, rx) = RingBuffer::new(capacity.max(1));
        self.events = Some(tx);
        rx
    }

    fn emit(&mut self, event: MetronomeEvent) {
        if let Some(tx) = self.events.as_mut() {
            let _ = tx.push(event);
        }
    }

    pub fn config(&self) -> &MetronomeConfig {
        &self.config
    }

    pub fn bpm(&self) -> u16 {
        self.config.bpm()
    }

    pub fn beat_index(&self) -> usize {
        self.beat_index
    }

    /// Measure progress in percent (0-100)
    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.transport.is_running()
    }

    pub fn state(&self) -> TransportState {
        self.transport.state()
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Stop and release the output device.
    pub fn shutdown(&mut self) {
        self.stop();
        self.device.close();
    }
}
