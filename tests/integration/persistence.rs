//! Persistence integration tests
//!
//! Tests the serialized project form: key names, round-trips, and the
//! clamp-and-repair behaviour on load.

use crate::helpers::*;
use serde_json::{json, Value};
use stave::prelude::*;
use stave::{ControlPoint, Error, RegionTiming};

/// Track, lane and point keys match the persisted layout.
#[test]
fn test_persisted_layout() {
    let mut track = test_track();
    track.set_expanded(true);
    if let Some(lane) = track.lane_mut(AutomationParameter::Volume) {
        let first = lane.points().as_slice()[0].id();
        lane.set_control_points(first, Some(ControlPoint::new(1.0, 0.2)), None);
    }

    let value: Value = serde_json::from_str(&track.to_json().unwrap()).unwrap();

    assert_eq!(value["mode"], "read");
    assert_eq!(value["isExpanded"], true);

    let lane = &value["lanes"][0];
    for key in ["id", "parameter", "points", "isVisible", "isLocked", "colorHex", "height"] {
        assert!(lane.get(key).is_some(), "lane is missing {key}");
    }

    let point = &lane["points"][0];
    for key in ["id", "beat", "value", "curve", "tension", "controlPointOut"] {
        assert!(point.get(key).is_some(), "point is missing {key}");
    }
    assert!(point.get("controlPointIn").is_none());
    assert_eq!(point["controlPointOut"]["valueOffset"].as_f64().map(|v| (v * 10.0).round()), Some(2.0));
    assert_eq!(value["lanes"][1]["points"][0]["curve"], "step");
}

/// Save then load gives back an equal track.
#[test]
fn test_track_roundtrip() {
    let mut track = test_track();
    track.set_mode(AutomationMode::Latch);
    if let Some(lane) = track.lane_mut(AutomationParameter::Pan) {
        lane.set_visible(false);
        lane.set_height(140.0);
        lane.set_color_hex("#123456");
    }
    let lane = track.add_lane(AutomationParameter::PitchBend);
    let id = lane.add_point(1.5, 0.3, CurveType::SCurve);
    lane.set_point_tension(id, -0.4);

    let loaded = TrackAutomationData::from_json(&track.to_json().unwrap()).unwrap();
    assert_eq!(loaded, track);
}

/// Unknown-future and out-of-range numbers are repaired rather than rejected.
#[test]
fn test_load_repairs_values() {
    let doc = json!({
        "lanes": [{
            "parameter": "filterCutoff",
            "points": [
                {"beat": 8.0, "value": 1.4, "curve": "exponential", "tension": -3.0},
                {"beat": -2.0, "value": 0.5, "curve": "linear"},
                {"beat": 4.0, "value": 0.25, "controlPointIn": {"beatOffset": -1.0, "valueOffset": 2.0}}
            ],
            "height": 9000.0,
            "isVisible": false
        }],
        "mode": "touch"
    });

    let track = TrackAutomationData::from_json(&doc.to_string()).unwrap();
    let lane = track.lane(AutomationParameter::FilterCutoff).unwrap();

    assert_sorted(lane);
    assert_eq!(beats_of(lane), vec![0.0, 4.0, 8.0]);
    let points = lane.points().as_slice();
    assert_eq!(points[2].value(), 1.0);
    assert_eq!(points[2].tension(), -1.0);
    assert_eq!(points[1].control_point_in().map(|c| c.value_offset()), Some(1.0));
    assert_eq!(lane.height(), AutomationLane::MAX_HEIGHT);
    assert!(!lane.is_visible());
    assert_eq!(track.mode(), AutomationMode::Touch);
    assert!(!track.is_expanded());
}

/// Duplicate parameters collapse to the first lane.
#[test]
fn test_load_collapses_duplicates() {
    let doc = json!({
        "lanes": [
            {"parameter": "sustain", "initialValue": 0.0},
            {"parameter": "sustain", "initialValue": 1.0},
            {"parameter": "breath"}
        ],
        "mode": "off",
        "isExpanded": false
    });
    let track = TrackAutomationData::from_json(&doc.to_string()).unwrap();

    assert_eq!(track.lanes().len(), 2);
    assert_eq!(
        track.lane(AutomationParameter::Sustain).and_then(|l| l.initial_value()),
        Some(0.0)
    );
}

/// Unknown names surface as errors through the umbrella error type.
#[test]
fn test_unknown_names_are_errors() {
    fn parse_all(parameter: &str, curve: &str, mode: &str) -> stave::Result<()> {
        let _: AutomationParameter = parameter.parse()?;
        let _: CurveType = curve.parse()?;
        let _: AutomationMode = mode.parse()?;
        let _: GridResolution = "quarter".parse()?;
        Ok(())
    }

    assert!(parse_all("volume", "smooth", "write").is_ok());
    assert!(matches!(
        parse_all("volume", "wobble", "write"),
        Err(Error::Automation(_))
    ));
    assert!(TrackAutomationData::from_json(r#"{"lanes": [{"parameter": "gain"}]}"#).is_err());
}

/// Region timing survives a save/load cycle.
#[test]
fn test_region_roundtrip() {
    let region = RegionTiming::time_locked(BeatPosition::from_beats(2.0), 6.0, Tempo::new(128.0));
    let json = serde_json::to_string(&region).unwrap();
    let back: RegionTiming = serde_json::from_str(&json).unwrap();
    assert_eq!(back, region);

    let repaired: RegionTiming =
        serde_json::from_str(r#"{"start": -4.0, "durationBeats": -1.0}"#).unwrap();
    assert_eq!(repaired.start, BeatPosition::ZERO);
    assert_eq!(repaired.duration_beats(), 0.0);
    assert_eq!(repaired.time_base, TimeBase::BeatLocked);
}
