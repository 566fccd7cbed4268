//! Automation integration tests
//!
//! Tests lane evaluation for every curve family, editing sequences, track
//! modes and the shared render-thread reader.

use crate::helpers::tolerances::{CURVE_EPSILON, VALUE_EPSILON};
use crate::helpers::*;
use approx::assert_relative_eq;
use stave::automation::curve;
use stave::prelude::*;
use stave::{ControlPoint, PointId};

/// `(0, 0.2, linear)`, `(4, 0.8)` reads 0.5 halfway.
#[test]
fn test_linear_exactness() {
    let lane = ramp_lane(AutomationParameter::Volume, 0.0, 0.2, 4.0, 0.8, CurveType::Linear);
    assert_relative_eq!(lane.value_at(2.0), 0.5, epsilon = VALUE_EPSILON);
}

/// Step holds the first value for the whole segment.
#[test]
fn test_step_hold() {
    let lane = ramp_lane(AutomationParameter::Pan, 0.0, 0.3, 4.0, 0.9, CurveType::Step);
    for value in render(&lane, 0.0, 0.5, 8) {
        assert_eq!(value, 0.3);
    }
    assert_eq!(lane.value_at(4.0), 0.9);
}

/// Smoothstep-family sample at a quarter of the segment.
#[test]
fn test_smooth_sample() {
    let lane = ramp_lane(AutomationParameter::Send1, 0.0, 0.0, 4.0, 1.0, CurveType::Smooth);
    assert_relative_eq!(lane.value_at(1.0), 0.1035, epsilon = CURVE_EPSILON);
}

/// Every family starts at the first value and reaches the second.
#[test]
fn test_curve_families_meet_endpoints() {
    for curve_type in CurveType::all() {
        let lane = ramp_lane(AutomationParameter::EqMid, 0.0, 0.1, 4.0, 0.9, *curve_type);

        assert_relative_eq!(lane.value_at(0.0), 0.1, epsilon = CURVE_EPSILON);
        assert_relative_eq!(lane.value_at(4.0), 0.9, epsilon = CURVE_EPSILON);
        if *curve_type != CurveType::Step {
            assert_relative_eq!(lane.value_at(3.9999), 0.9, epsilon = 1e-3);
        }
    }
}

/// Non-step families rise monotonically on a rising segment.
#[test]
fn test_curve_families_monotonic() {
    for curve_type in CurveType::all() {
        for tension in [-1.0, -0.5, 0.0, 0.5, 1.0] {
            let mut lane = AutomationLane::new(AutomationParameter::SynthCutoff);
            let id = lane.add_point(0.0, 0.0, *curve_type);
            lane.add_point(1.0, 1.0, CurveType::Linear);
            lane.set_point_tension(id, tension);

            let values = render(&lane, 0.0, 1.0 / 64.0, 65);
            assert_normalised(&values);
            assert!(
                values.windows(2).all(|w| w[1] >= w[0] - VALUE_EPSILON),
                "{curve_type} with tension {tension} is not monotonic"
            );
        }
    }
}

/// Tension bends the curve without moving its ends.
#[test]
fn test_tension_changes_shape() {
    let mut lane = ramp_lane(AutomationParameter::Volume, 0.0, 0.0, 4.0, 1.0, CurveType::Linear);
    let first = lane.points().as_slice()[0].id();
    let plain = lane.value_at(1.0);

    lane.set_point_tension(first, 1.0);
    let eased = lane.value_at(1.0);
    assert!(eased < plain);
    assert_relative_eq!(lane.value_at(2.0), 0.5, epsilon = VALUE_EPSILON);
    assert_eq!(lane.value_at(4.0), 1.0);
}

/// Bézier handles override the curve family.
#[test]
fn test_bezier_overrides_curve() {
    let mut lane = ramp_lane(AutomationParameter::Volume, 0.0, 0.0, 4.0, 1.0, CurveType::Step);
    let first = lane.points().as_slice()[0].id();
    lane.set_control_points(first, Some(ControlPoint::new(1.32, 0.5)), None);

    let v = lane.value_at(2.0);
    assert!(v > 0.0 && v < 1.0);
    assert_relative_eq!(
        v,
        curve::evaluate_segment(&lane.points().as_slice()[0], &lane.points().as_slice()[1], 2.0),
        epsilon = VALUE_EPSILON
    );
}

/// Leading and trailing beats hold flat.
#[test]
fn test_flat_extrapolation() {
    let lane = ramp_lane(AutomationParameter::Pan, 4.0, 0.2, 8.0, 0.6, CurveType::Smooth);
    assert_eq!(lane.value_at(0.0), 0.2);
    assert_eq!(lane.value_at(3.99), 0.2);
    assert_eq!(lane.value_at(8.0), 0.6);
    assert_eq!(lane.value_at(1000.0), 0.6);
}

/// A mixed editing session keeps points sorted and values bounded.
#[test]
fn test_editing_session_keeps_order() {
    let mut lane = AutomationLane::new(AutomationParameter::FilterCutoff);
    let mut ids: Vec<PointId> = Vec::new();

    for (i, beat) in [7.0, 1.0, 5.5, 3.0, 0.0, 9.25].iter().enumerate() {
        ids.push(lane.add_point(*beat, i as f32 / 5.0, CurveType::all()[i % 6]));
        assert_sorted(&lane);
    }

    lane.update_point(ids[0], Some(2.0), None);
    lane.update_point(ids[4], Some(12.0), Some(1.5));
    lane.remove_point(ids[2]);
    lane.shift_points(0.5);
    assert_sorted(&lane);

    assert_eq!(beats_of(&lane), vec![1.5, 2.5, 3.5, 9.75, 12.5]);
    assert_eq!(lane.point(ids[4]).map(|p| p.value()), Some(1.0));
    assert_normalised(&render(&lane, 0.0, 0.1, 140));
}

/// Track values respect the mode.
#[test]
fn test_track_mode_gating() {
    let mut track = test_track();

    assert_relative_eq!(
        track.value(AutomationParameter::Volume, 2.0).unwrap(),
        0.5,
        epsilon = VALUE_EPSILON
    );
    assert_eq!(track.value(AutomationParameter::Pan, 3.0), Some(0.75));
    assert_eq!(track.value(AutomationParameter::Sustain, 3.0), None);

    for mode in AutomationMode::all() {
        track.set_mode(*mode);
        assert_eq!(
            track.value(AutomationParameter::Pan, 3.0).is_some(),
            mode.can_read()
        );
        assert_eq!(track.values_at(1.0).count() == 2, mode.can_read());
    }
}

/// Enabling automation on a live control keeps its value until the first point.
#[test]
fn test_lane_lifecycle_keeps_live_value() {
    let mut track = TrackAutomationData::new();
    track.add_lane_with_current_value(AutomationParameter::Volume, 0.42);

    assert_relative_eq!(
        track.value(AutomationParameter::Volume, 0.0).unwrap(),
        0.42,
        epsilon = VALUE_EPSILON
    );

    if let Some(lane) = track.lane_mut(AutomationParameter::Volume) {
        lane.add_point(8.0, 0.9, CurveType::Linear);
    }
    assert_relative_eq!(
        track.value(AutomationParameter::Volume, 4.0).unwrap(),
        0.42,
        epsilon = VALUE_EPSILON
    );
    assert_eq!(track.value(AutomationParameter::Volume, 8.0), Some(0.9));
}

/// The reader keeps returning values from a consistent snapshot while the
/// editor publishes changes.
#[test]
fn test_shared_reader_follows_editor() {
    let shared = SharedTrackAutomation::new(test_track());
    let reader = shared.reader();
    let held = shared.snapshot();

    shared.update(|track| {
        if let Some(lane) = track.lane_mut(AutomationParameter::Volume) {
            lane.clear_points();
            lane.add_point(0.0, 0.7, CurveType::Linear);
        }
    });

    assert_eq!(reader.value(AutomationParameter::Volume, 2.0), Some(0.7));
    assert_relative_eq!(
        held.value(AutomationParameter::Volume, 2.0).unwrap(),
        0.5,
        epsilon = VALUE_EPSILON
    );
}

/// Looping playback repeats the loop region's automation.
#[test]
fn test_looped_playback() {
    let lane = ramp_lane(AutomationParameter::ModWheel, 0.0, 0.0, 4.0, 1.0, CurveType::Linear);

    for pass in 0..3 {
        let beat = 1.0 + pass as f64 * 4.0;
        assert_relative_eq!(lane.value_looped(beat, 0.0, 4.0), 0.25, epsilon = VALUE_EPSILON);
    }
}

/// Transport seconds map to lane values through the tempo.
#[test]
fn test_seconds_driven_evaluation() {
    let lane = ramp_lane(AutomationParameter::Expression, 0.0, 0.0, 8.0, 1.0, CurveType::Linear);

    let at_120 = BeatPosition::from_seconds(2.0, Tempo::new(120.0));
    let at_60 = BeatPosition::from_seconds(2.0, Tempo::new(60.0));
    assert_relative_eq!(lane.value_at(at_120.beats()), 0.5, epsilon = VALUE_EPSILON);
    assert_relative_eq!(lane.value_at(at_60.beats()), 0.25, epsilon = VALUE_EPSILON);
}
