use clicktrack::{
    engine::ClickStream, ClickEvent, ConfigPatch, Metronome, MetronomeConfig, MetronomeEvent,
    OfflineOutput,
};

const SAMPLE_RATE: f32 = 48_000.0;
const TICK: f64 = 1.0 / 60.0;
const EPS: f64 = 1e-9;

fn metronome() -> Metronome<OfflineOutput> {
    Metronome::new(OfflineOutput::new(SAMPLE_RATE))
}

/// Tick at 60 Hz for `seconds` of device time
fn run_for(metronome: &mut Metronome<OfflineOutput>, seconds: f64) {
    let ticks = (seconds / TICK).round() as usize;
    for _ in 0..ticks {
        metronome.tick();
        metronome.device_mut().advance(TICK);
    }
}

fn stream(metronome: &Metronome<OfflineOutput>, which: ClickStream) -> Vec<ClickEvent> {
    metronome
        .device()
        .scheduled()
        .iter()
        .filter(|c| c.stream == which)
        .copied()
        .collect()
}

#[test]
fn first_clicks_follow_start_offset_and_eighth_grid() {
    let mut metronome = metronome();
    metronome.set_configuration(&ConfigPatch {
        bpm: Some(120),
        time_signature: Some("4/4".into()),
        subdivision: Some("1/8".into()),
        swing: Some(0),
        ..Default::default()
    });
    metronome.device_mut().advance(1.0);
    metronome.start().unwrap();
    run_for(&mut metronome, 4.5);

    let main = stream(&metronome, ClickStream::Main);
    assert!((main[0].time - 1.05).abs() < EPS);
    assert!((main[1].time - 1.30).abs() < EPS);

    for (i, click) in main.iter().enumerate() {
        assert_eq!(click.accented, i % 8 == 0, "step {i}");
        assert!((click.time - (1.05 + 0.25 * i as f64)).abs() < 1e-6);
    }
    assert!(main.len() >= 17);
}

#[test]
fn streams_stay_monotonic_through_live_changes() {
    let mut metronome = metronome();
    metronome.set_configuration(&ConfigPatch {
        poly_enabled: Some(true),
        poly_beats: Some(3),
        ..Default::default()
    });
    metronome.start().unwrap();

    run_for(&mut metronome, 1.0);
    metronome.set_configuration(&ConfigPatch { bpm: Some(150), ..Default::default() });
    run_for(&mut metronome, 1.5);
    metronome.set_configuration(&ConfigPatch {
        time_signature: Some("7/8".into()),
        ..Default::default()
    });
    run_for(&mut metronome, 1.5);
    metronome.set_configuration(&ConfigPatch {
        subdivision: Some("1/16".into()),
        swing: Some(50),
        ..Default::default()
    });
    run_for(&mut metronome, 1.0);
    metronome.set_configuration(&ConfigPatch { poly_beats: Some(5), ..Default::default() });
    run_for(&mut metronome, 2.0);

    for which in [ClickStream::Main, ClickStream::Poly] {
        let clicks = stream(&metronome, which);
        assert!(clicks.len() > 10);
        assert!(
            clicks.windows(2).all(|w| w[1].time > w[0].time),
            "{which:?} stream went backwards"
        );
    }
}

#[test]
fn poly_resyncs_on_every_measure_boundary() {
    let mut metronome = metronome();
    metronome.set_configuration(&ConfigPatch {
        bpm: Some(133),
        poly_enabled: Some(true),
        poly_beats: Some(5),
        poly_subdivision: Some("1/8".into()),
        ..Default::default()
    });
    metronome.start().unwrap();
    run_for(&mut metronome, 8.0);

    let poly = stream(&metronome, ClickStream::Poly);
    let downbeats: Vec<f64> = stream(&metronome, ClickStream::Main)
        .iter()
        .filter(|c| c.accented)
        .map(|c| c.time)
        .collect();
    assert!(downbeats.len() >= 4);

    for time in downbeats {
        let hit = poly.iter().find(|p| p.time == time);
        assert!(hit.is_some_and(|p| p.accented), "no poly downbeat at {time}");
    }

    // five beats of two eighths each per measure
    let measure = 4.0 * 60.0 / 133.0;
    assert!((poly[1].time - poly[0].time - measure / 10.0).abs() < 1e-9);
    assert!(!poly[1].accented && poly[2].accented);
}

#[test]
fn training_mode_ramps_tempo() {
    let mut metronome = metronome();
    let mut events = metronome.subscribe(1024);
    metronome.set_configuration(&ConfigPatch {
        subdivision: Some("1/4".into()),
        training_mode: Some(true),
        training_step: Some(10),
        training_every: Some(2),
        ..Default::default()
    });
    metronome.start().unwrap();
    run_for(&mut metronome, 6.0);

    // measures start at 0.05, 2.05, then at 130 and 140 bpm
    assert_eq!(metronome.bpm(), 140);

    let mut bpm_changes = Vec::new();
    while let Ok(event) = events.pop() {
        if let MetronomeEvent::BpmChanged(bpm) = event {
            bpm_changes.push(bpm);
        }
    }
    assert_eq!(bpm_changes, vec![130, 140]);

    // the step after 2.05 was fixed at 120 bpm; the one after that is not
    let main = stream(&metronome, ClickStream::Main);
    assert!((main[5].time - main[4].time - 0.5).abs() < 1e-9);
    assert!((main[6].time - main[5].time - 60.0 / 130.0).abs() < 1e-9);
}

#[test]
fn tempo_lock_freezes_training() {
    let mut metronome = metronome();
    metronome.set_configuration(&ConfigPatch {
        training_mode: Some(true),
        training_every: Some(1),
        tempo_lock: Some(true),
        ..Default::default()
    });
    metronome.start().unwrap();
    run_for(&mut metronome, 5.0);
    assert_eq!(metronome.bpm(), 120);
}

#[test]
fn restart_opens_a_fresh_epoch() {
    let mut metronome = metronome();
    metronome.start().unwrap();
    run_for(&mut metronome, 1.0);
    metronome.stop();
    let before = metronome.device().scheduled().len();

    run_for(&mut metronome, 1.0);
    assert_eq!(metronome.device().scheduled().len(), before);

    let now = metronome.device().scheduled().len();
    metronome.start().unwrap();
    let first = metronome.device().scheduled()[now];
    assert!(first.accented);
    assert!(first.time > 2.0);
}

#[test]
fn failed_start_keeps_everything_stopped() {
    let mut metronome = Metronome::new(OfflineOutput::unavailable(SAMPLE_RATE));
    assert!(metronome.start().is_err());
    run_for(&mut metronome, 1.0);

    assert!(!metronome.is_running());
    assert!(metronome.device().scheduled().is_empty());
    assert_eq!(metronome.config(), &MetronomeConfig::default());
}

#[test]
fn export_import_round_trip() {
    let mut source = metronome();
    source.set_configuration(&ConfigPatch {
        bpm: Some(72),
        time_signature: Some("6/8".into()),
        subdivision: Some("1/8T".into()),
        swing: Some(15),
        poly_enabled: Some(true),
        poly_beats: Some(4),
        accent_pattern: Some(vec![true, false, false, true, false, false]),
        ..Default::default()
    });
    let json = source.export_snapshot().to_json();

    let mut target = metronome();
    target.import_snapshot(&json).unwrap();
    assert_eq!(target.config(), source.config());
}

#[test]
fn import_respects_existing_tempo_lock() {
    let mut metronome = metronome();
    metronome.set_tempo_lock(true);
    metronome
        .import_snapshot(r#"{"version": 1, "bpm": 200, "tempoLock": false}"#)
        .unwrap();

    assert_eq!(metronome.bpm(), 120);
    assert!(!metronome.config().tempo_locked());
}

#[test]
fn every_dispatched_beat_start_is_published() {
    let mut metronome = metronome();
    metronome.set_configuration(&ConfigPatch {
        bpm: Some(300),
        time_signature: Some("8/32".into()),
        subdivision: Some("1/4".into()),
        ..Default::default()
    });
    let mut rx = metronome.subscribe(64);
    metronome.start().unwrap();

    let mut beats = Vec::new();
    while let Ok(event) = rx.pop() {
        if let MetronomeEvent::Beat(beat) = event {
            beats.push(beat);
        }
    }

    // quarter subdivision: every main click is a beat start
    let dispatched = stream(&metronome, ClickStream::Main).len();
    assert_eq!(dispatched, 3);
    assert_eq!(beats, vec![0, 1, 2]);
    assert_eq!(metronome.beat_index(), 2);
}
