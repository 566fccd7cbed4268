//! Timing integration tests
//!
//! Tests beat/seconds conversion across tempo changes, bar decomposition,
//! region recompute and grid quantization working together.

use crate::helpers::tolerances::BEAT_EPSILON;
use crate::helpers::*;
use approx::assert_relative_eq;
use stave::prelude::*;
use stave::recompute_duration_beats;

/// A tempo change leaves symbolic positions alone and rescales seconds.
#[test]
fn test_tempo_change_keeps_beats() {
    let note = BeatPosition::from_beats(6.0);

    let fast = Tempo::new(120.0);
    let slow = Tempo::new(60.0);

    assert_relative_eq!(note.to_seconds(fast), 3.0, epsilon = BEAT_EPSILON);
    assert_relative_eq!(note.to_seconds(slow), 6.0, epsilon = BEAT_EPSILON);
    assert_eq!(note.beats(), 6.0);
}

/// Time-locked regions keep their wall-clock length across a tempo change.
#[test]
fn test_time_locked_region_recompute() {
    let mut audio = RegionTiming::time_locked(BeatPosition::from_beats(4.0), 8.0, Tempo::new(120.0));
    let mut midi = RegionTiming::beat_locked(BeatPosition::from_beats(4.0), 8.0, Tempo::new(120.0));
    let seconds_before = audio.duration_seconds(Tempo::new(120.0));

    assert!(audio.apply_tempo_change(Tempo::new(60.0)));
    assert!(!midi.apply_tempo_change(Tempo::new(60.0)));

    assert_relative_eq!(audio.duration_beats(), 4.0, epsilon = BEAT_EPSILON);
    assert_relative_eq!(
        audio.duration_seconds(Tempo::new(60.0)),
        seconds_before,
        epsilon = BEAT_EPSILON
    );
    assert_eq!(audio.start.beats(), 4.0);
    assert_eq!(midi.duration_beats(), 8.0);
    assert_relative_eq!(audio.end().beats(), 8.0, epsilon = BEAT_EPSILON);
}

/// Chained tempo changes compose through the stored reference tempo.
#[test]
fn test_chained_tempo_changes() {
    let mut region = RegionTiming::time_locked(BeatPosition::ZERO, 8.0, Tempo::new(120.0));
    region.apply_tempo_change(Tempo::new(90.0));
    region.apply_tempo_change(Tempo::new(180.0));

    assert_relative_eq!(region.duration_beats(), 12.0, epsilon = BEAT_EPSILON);
    assert_eq!(region.reference_tempo(), Tempo::new(180.0));
    assert_relative_eq!(
        recompute_duration_beats(8.0, Tempo::new(120.0), Tempo::new(180.0)),
        12.0,
        epsilon = BEAT_EPSILON
    );
}

/// Out-of-range tempos are clamped before conversion.
#[test]
fn test_tempo_clamps() {
    assert_eq!(Tempo::new(0.0).bpm(), 1.0);
    assert_eq!(Tempo::new(5000.0).bpm(), 999.0);
    assert_eq!(Tempo::new(f64::NAN).bpm(), 120.0);
}

/// Bar display across meters.
#[test]
fn test_bar_positions() {
    let pos = BeatPosition::from_beats(9.5);
    assert_eq!(pos.decompose(FOUR_FOUR).to_string(), "3.2.50");
    assert_eq!(pos.decompose(TimeSignature::new(3, 4)).to_string(), "4.1.50");
    assert_eq!(BeatPosition::ZERO.decompose(FOUR_FOUR), BarPosition::default());
}

/// Quantize then place on the timeline.
#[test]
fn test_quantize_sixteenth() {
    assert_relative_eq!(
        GridResolution::Sixteenth.quantize(1.07, FOUR_FOUR),
        1.0,
        epsilon = BEAT_EPSILON
    );
    assert_relative_eq!(
        GridResolution::Sixteenth.quantize(1.2, FOUR_FOUR),
        1.25,
        epsilon = BEAT_EPSILON
    );
    assert_relative_eq!(
        GridResolution::Bar.quantize(5.0, TimeSignature::new(7, 8)),
        3.5,
        epsilon = BEAT_EPSILON
    );
}

/// Full-strength settings match the plain grid; partial strength moves part way.
#[test]
fn test_quantize_settings() {
    let hard = QuantizeSettings::new(GridResolution::Eighth);
    assert_relative_eq!(hard.quantize(0.6, FOUR_FOUR), 0.5, epsilon = BEAT_EPSILON);

    let soft = QuantizeSettings::builder()
        .resolution(GridResolution::Quarter)
        .strength(0.5)
        .build();
    assert_relative_eq!(soft.quantize(1.2, FOUR_FOUR), 1.1, epsilon = BEAT_EPSILON);
}

/// Swing delays off-beat grid lines.
#[test]
fn test_quantize_swing() {
    let swung = QuantizeSettings::builder()
        .resolution(GridResolution::Eighth)
        .swing(0.5)
        .build();

    // 0.5 is the first off-beat eighth; pushed by 0.5 * 0.5 * 0.5
    assert_relative_eq!(swung.quantize(0.52, FOUR_FOUR), 0.625, epsilon = BEAT_EPSILON);
    assert_relative_eq!(swung.quantize(0.98, FOUR_FOUR), 1.0, epsilon = BEAT_EPSILON);
}

/// Quantizing lane points snaps them onto the grid.
#[test]
fn test_lane_quantize_uses_grid() {
    let mut lane = AutomationLane::new(AutomationParameter::ModWheel);
    lane.add_point(0.13, 0.0, CurveType::Linear);
    lane.add_point(1.9, 1.0, CurveType::Linear);

    lane.quantize_points(GridResolution::Half, FOUR_FOUR);
    assert_eq!(beats_of(&lane), vec![0.0, 2.0]);
}
