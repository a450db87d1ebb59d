//! Key handling and the main loop

use std::{
    fs,
    time::{Duration, Instant},
};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use rtrb::Consumer;
use tracing::{info, warn};

use clicktrack::{
    config::{MAX_POLY_BEATS, MIN_POLY_BEATS},
    sequencing::TimeSignature,
    ConfigPatch, CpalOutput, Metronome, MetronomeEvent,
};

use crate::ui::{self, View};

const EVENT_QUEUE_SIZE: usize = 256;
const SWING_STEP: i64 = 5;
const VOLUME_STEP: i64 = 5;
/// How long a beat box stays lit
const BEAT_FLASH: Duration = Duration::from_millis(90);
/// Written by [S], readable as the first command-line argument
const SNAPSHOT_FILE: &str = "clicktrack-settings.json";

const METERS: [TimeSignature; 6] = [
    TimeSignature::FOUR_FOUR,
    TimeSignature::THREE_FOUR,
    TimeSignature { numerator: 2, denominator: 4 },
    TimeSignature { numerator: 5, denominator: 4 },
    TimeSignature::SIX_EIGHT,
    TimeSignature::SEVEN_EIGHT,
];

pub struct App {
    metronome: Metronome<CpalOutput>,
    events: Consumer<MetronomeEvent>,
    /// Origin for tap timestamps
    clock: Instant,
    last_beat: Option<Instant>,
    status: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(mut metronome: Metronome<CpalOutput>) -> Self {
        let events = metronome.subscribe(EVENT_QUEUE_SIZE);
        Self {
            metronome,
            events,
            clock: Instant::now(),
            last_beat: None,
            status: None,
            should_quit: false,
        }
    }

    pub fn run(mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.metronome.tick();
            self.poll_events();

            let view = View {
                config: self.metronome.config(),
                running: self.metronome.is_running(),
                beat_index: self.metronome.beat_index(),
                phase: self.metronome.phase(),
                flash: self.last_beat.is_some_and(|t| t.elapsed() < BEAT_FLASH),
                status: self.status.as_deref(),
            };
            terminal.draw(|frame| ui::render(frame, &view))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        self.metronome.shutdown();
        Ok(())
    }

    fn poll_events(&mut self) {
        while let Ok(event) = self.events.pop() {
            match event {
                MetronomeEvent::Beat(_) if self.metronome.is_running() => {
                    self.last_beat = Some(Instant::now());
                }
                MetronomeEvent::RunningChanged(false) => self.last_beat = None,
                _ => {}
            }
        }
    }

    fn patch(&mut self, patch: ConfigPatch) {
        self.metronome.set_configuration(&patch);
    }

    fn save_snapshot(&mut self) {
        let json = self.metronome.export_snapshot().to_json();
        match fs::write(SNAPSHOT_FILE, json) {
            Ok(()) => {
                info!(path = SNAPSHOT_FILE, "Settings saved");
                self.status = Some(format!("Saved to {SNAPSHOT_FILE}"));
            }
            Err(err) => {
                warn!(%err, "Could not save settings");
                self.status = Some(format!("Save failed: {err}"));
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        let config = self.metronome.config().clone();
        self.status = None;

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                if self.metronome.is_running() {
                    self.metronome.stop();
                } else if let Err(err) = self.metronome.start() {
                    self.status = Some(format!("Audio unavailable: {err}"));
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => self.metronome.increment_bpm(),
            KeyCode::Char('-') | KeyCode::Down => self.metronome.decrement_bpm(),
            KeyCode::Char('t') => {
                let ms = self.clock.elapsed().as_secs_f64() * 1000.0;
                self.metronome.tap_tempo(ms);
            }
            KeyCode::Char('[') => self.patch(ConfigPatch {
                swing: Some(i64::from(config.swing()) - SWING_STEP),
                ..Default::default()
            }),
            KeyCode::Char(']') => self.patch(ConfigPatch {
                swing: Some(i64::from(config.swing()) + SWING_STEP),
                ..Default::default()
            }),
            KeyCode::Char('m') => {
                let current = METERS.iter().position(|m| *m == config.meter());
                let next = current.map_or(0, |i| (i + 1) % METERS.len());
                self.patch(ConfigPatch {
                    time_signature: Some(METERS[next].to_string()),
                    ..Default::default()
                });
            }
            KeyCode::Char('d') => self.patch(ConfigPatch {
                subdivision: Some(config.subdivision().next().label().to_owned()),
                ..Default::default()
            }),
            KeyCode::Char('p') => self.patch(ConfigPatch {
                poly_enabled: Some(!config.poly().enabled),
                ..Default::default()
            }),
            KeyCode::Char(',') => self.patch(ConfigPatch {
                poly_beats: Some(i64::from(config.poly().beats.max(MIN_POLY_BEATS + 1)) - 1),
                ..Default::default()
            }),
            KeyCode::Char('.') => self.patch(ConfigPatch {
                poly_beats: Some(i64::from(config.poly().beats.min(MAX_POLY_BEATS - 1)) + 1),
                ..Default::default()
            }),
            KeyCode::Char('o') => self.patch(ConfigPatch {
                poly_subdivision: Some(config.poly().subdivision.next().label().to_owned()),
                ..Default::default()
            }),
            KeyCode::Char('(') => self.patch(ConfigPatch {
                poly_volume: Some(i64::from(config.poly().volume) - VOLUME_STEP),
                ..Default::default()
            }),
            KeyCode::Char(')') => self.patch(ConfigPatch {
                poly_volume: Some(i64::from(config.poly().volume) + VOLUME_STEP),
                ..Default::default()
            }),
            KeyCode::Char('{') => self.patch(ConfigPatch {
                volume: Some(i64::from(config.volume()) - VOLUME_STEP),
                ..Default::default()
            }),
            KeyCode::Char('}') => self.patch(ConfigPatch {
                volume: Some(i64::from(config.volume()) + VOLUME_STEP),
                ..Default::default()
            }),
            KeyCode::Char('<') => self.patch(ConfigPatch {
                training_step: Some(i64::from(config.training().step) - 1),
                ..Default::default()
            }),
            KeyCode::Char('>') => self.patch(ConfigPatch {
                training_step: Some(i64::from(config.training().step) + 1),
                ..Default::default()
            }),
            KeyCode::Char('g') => self.patch(ConfigPatch {
                training_every: Some(i64::from(config.training().every) - 1),
                ..Default::default()
            }),
            KeyCode::Char('h') => self.patch(ConfigPatch {
                training_every: Some(i64::from(config.training().every) + 1),
                ..Default::default()
            }),
            KeyCode::Char('v') => self.patch(ConfigPatch {
                visual_pulse: Some(!config.visual_pulse()),
                ..Default::default()
            }),
            KeyCode::Char('l') => self.metronome.set_tempo_lock(!config.tempo_locked()),
            KeyCode::Char('n') => self.patch(ConfigPatch {
                training_mode: Some(!config.training().enabled),
                ..Default::default()
            }),
            KeyCode::Char(c @ '1'..='9') => {
                let beat = c as usize - '1' as usize;
                if beat < config.meter().beats_per_measure() {
                    self.metronome.toggle_accent(beat);
                }
            }
            KeyCode::Char('s') => self.save_snapshot(),
            KeyCode::Char('r') => self.metronome.reset(),
            _ => {}
        }
    }
}
