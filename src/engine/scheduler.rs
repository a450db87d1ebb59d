use crate::{config::MetronomeConfig, sequencing::TimingSnapshot};

use super::event::ClickEvent;

/*
Look-Ahead Scheduling
=====================

The tick that drives the scheduler runs at UI rate (~60 Hz) and jitters by
several milliseconds. Clicks must land on exact samples. The two are
decoupled by scheduling ahead:

    now                      now + LOOKAHEAD
     │                             │
     ▼                             ▼
  ───┼──────●──────●──────●────────┼──●──────●───→ output clock
            ▲      ▲      ▲           ▲
            dispatched this pass      next pass

Every pass walks each stream forward, dispatching every step whose time
falls before the horizon. Dispatched clicks carry absolute output-clock
times, so the audio thread places them on the right sample no matter when
the pass ran. A late pass only shrinks the margin; it never moves a click.

Each pass recomputes the timing from the live configuration. The time of the
next step is fixed when the step before it goes out, so a tempo change first
shows in the gap after the next pending step.


Two Streams
-----------

  main   beats_per_measure × steps_per_beat steps per measure. Step starts
         of accented beats are accented. Swing stretches even steps and
         shrinks odd ones.

  poly   poly_beats × poly_steps_per_beat steps spread evenly over one main
         measure. At every main measure boundary the poly stream snaps back
         to step 0 at the boundary time, so the two never drift apart.

When the poly stream has fallen more than LOOKAHEAD behind (it was just
enabled, or the tick stalled) it restarts just after `now` instead of
replaying every missed click at once.
*/

/// How far ahead of the output clock clicks are dispatched (seconds)
pub const LOOKAHEAD: f64 = 0.12;
/// Delay between `start` and the first click (seconds)
pub const START_OFFSET: f64 = 0.05;
/// Upper bound of steps one stream may dispatch in a single pass
pub const MAX_STEPS_PER_PASS: usize = 512;
/// Gap left after `now` when a lagging poly stream is restarted
pub const POLY_RESYNC_OFFSET: f64 = 0.01;

/// What a single pass did, for the caller to turn into derived state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassReport {
    pub main_clicks: usize,
    pub poly_clicks: usize,
    /// Measure boundaries that earned a training-mode tempo bump
    pub training_bumps: u32,
    pub measure_duration: f64,
}

/// Runtime state of one transport epoch
#[derive(Debug, Clone)]
pub struct Scheduler {
    next_main_time: f64,
    main_step: usize,
    measure_start: f64,
    measure_count: u64,
    next_poly_time: f64,
    poly_step: usize,
    /// Beat starts dispatched by the latest pass, in order
    beat_starts: Vec<usize>,
}

impl Scheduler {
    /// Fresh state whose first step sounds at `epoch`
    pub fn new(epoch: f64) -> Self {
        Self {
            next_main_time: epoch,
            main_step: 0,
            measure_start: epoch,
            measure_count: 0,
            next_poly_time: epoch,
            poly_step: 0,
            beat_starts: Vec::with_capacity(MAX_STEPS_PER_PASS),
        }
    }

    pub fn next_main_time(&self) -> f64 {
        self.next_main_time
    }

    pub fn next_poly_time(&self) -> f64 {
        self.next_poly_time
    }

    pub fn measure_start(&self) -> f64 {
        self.measure_start
    }

    pub fn measure_count(&self) -> u64 {
        self.measure_count
    }

    /// Beat index of every beat start the latest pass dispatched
    pub fn beat_starts(&self) -> &[usize] {
        &self.beat_starts
    }

    /// Dispatch every step due before `now + LOOKAHEAD` into `out`.
    pub fn pass(
        &mut self,
        config: &MetronomeConfig,
        now: f64,
        out: &mut Vec<ClickEvent>,
    ) -> PassReport {
        let timing = TimingSnapshot::new(
            config.bpm(),
            config.meter(),
            config.subdivision(),
            config.swing(),
        );
        let horizon = now + LOOKAHEAD;
        self.beat_starts.clear();

        let mut report = PassReport {
            measure_duration: timing.measure_duration,
            ..Default::default()
        };

        self.fill_main(config, &timing, horizon, out, &mut report);
        if config.poly().enabled {
            self.fill_poly(config, &timing, now, horizon, out, &mut report);
        }

        report
    }

    fn fill_main(
        &mut self,
        config: &MetronomeConfig,
        timing: &TimingSnapshot,
        horizon: f64,
        out: &mut Vec<ClickEvent>,
        report: &mut PassReport,
    ) {
        let total_steps = timing.total_steps();
        let steps_per_beat = timing.steps_per_beat.max(1);

        while self.next_main_time < horizon && report.main_clicks < MAX_STEPS_PER_PASS {
            let step_index = self.main_step % total_steps;
            let beat_index = step_index / steps_per_beat;
            let sub_index = step_index % steps_per_beat;
            let time = self.next_main_time;

            let accented = sub_index == 0 && config.accents().is_accented(beat_index);
            out.push(ClickEvent::main(time, accented));
            report.main_clicks += 1;

            if sub_index == 0 {
                self.beat_starts.push(beat_index);
            }

            if step_index == 0 {
                self.begin_measure(config, time, report);
            }

            let duration = timing.step_duration(step_index);
            if !(duration.is_finite() && duration > 0.0) {
                break;
            }
            self.next_main_time += duration;
            self.main_step = step_index + 1;
        }
    }

    fn begin_measure(&mut self, config: &MetronomeConfig, time: f64, report: &mut PassReport) {
        self.measure_start = time;
        self.measure_count += 1;

        if config.poly().enabled {
            self.poly_step = 0;
            self.next_poly_time = time;
        }

        let training = config.training();
        if training.enabled
            && !config.tempo_locked()
            && self.measure_count % u64::from(training.every.max(1)) == 0
        {
            report.training_bumps += 1;
        }
    }

    fn fill_poly(
        &mut self,
        config: &MetronomeConfig,
        timing: &TimingSnapshot,
        now: f64,
        horizon: f64,
        out: &mut Vec<ClickEvent>,
        report: &mut PassReport,
    ) {
        let poly = config.poly();
        let duration = timing.poly_step_duration(poly.beats as usize, poly.subdivision);
        if !(duration.is_finite() && duration > 0.0) {
            return;
        }

        if now - self.next_poly_time > LOOKAHEAD {
            self.next_poly_time = now + POLY_RESYNC_OFFSET;
        }

        let steps_per_beat = poly.subdivision.steps_per_beat().max(1);
        let total_steps = (poly.beats as usize * steps_per_beat).max(1);
        let intensity = poly.volume as f32 / 100.0;

        while self.next_poly_time < horizon && report.poly_clicks < MAX_STEPS_PER_PASS {
            let step_index = self.poly_step % total_steps;
            let accented = step_index % steps_per_beat == 0;

            out.push(ClickEvent::poly(self.next_poly_time, accented, intensity));
            report.poly_clicks += 1;

            self.next_poly_time += duration;
            self.poly_step = step_index + 1;
        }
    }

    /// Progress through the current measure in percent, clamped to 0-100
    pub fn phase_at(&self, now: f64, measure_duration: f64) -> f32 {
        if !(measure_duration > 0.0) {
            return 0.0;
        }
        let progress = (now - self.measure_start) / measure_duration;
        (progress * 100.0).clamp(0.0, 100.0) as f32
    }
}
