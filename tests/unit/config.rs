use super::*;
use crate::{
    foundation::core::Point,
    rig::{
        pin::{PinEvaluator, PinKind},
        weights::FalloffMethod,
    },
};

const SAMPLE: &str = r#"{
  "mesh": { "triangle_count": 300, "expansion": 2 },
  "weights": { "falloff": "radial_basis" },
  "pins": [
    { "id": "arm", "kind": "position", "rest": { "x": 40, "y": 60 }, "radius": 30,
      "current": { "position": { "x": 52, "y": 48 } } },
    { "id": "torso", "kind": "starch", "rest": { "x": 50, "y": 50 }, "radius": 20,
      "stiffness": 0.5 }
  ]
}"#;

#[test]
fn parses_sample_with_defaults() {
    let cfg = WarpConfig::from_json_str(SAMPLE).unwrap();
    cfg.validate().unwrap();

    assert_eq!(cfg.mesh.triangle_count, 300);
    assert_eq!(cfg.mesh.expansion, 2.0);
    assert_eq!(cfg.mesh.alpha_threshold, MeshParams::default().alpha_threshold);
    assert_eq!(cfg.weights.falloff, FalloffMethod::RadialBasis);
    assert_eq!(cfg.weights.power, 2.0);
    assert_eq!(cfg.fingerprint, FingerprintMode::Sparse);

    assert_eq!(cfg.pins.len(), 2);
    assert_eq!(cfg.pins[1].pin.kind, PinKind::Starch);
    assert_eq!(cfg.pins[1].pin.stiffness, 0.5);
    assert!(cfg.pins[1].current.is_none());

    let arm = cfg.pins[0].current.unwrap();
    assert_eq!(arm.position, Point::new(52.0, 48.0));
    assert_eq!(arm.scale, 1.0);
}

#[test]
fn poses_skip_unposed_pins() {
    let cfg = WarpConfig::from_json_str(SAMPLE).unwrap();
    let poses = cfg.poses();
    let rig = cfg.rig();

    assert!(poses.evaluate(&rig[0], 0.0).is_some());
    assert!(poses.evaluate(&rig[1], 0.0).is_none());
}

#[test]
fn empty_object_is_default() {
    let cfg = WarpConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, WarpConfig::default());
    assert_eq!(cfg.settings(), WarpSettings::default());
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut cfg = WarpConfig::from_json_str(SAMPLE).unwrap();
    cfg.pins[1].pin.id = cfg.pins[0].pin.id.clone();
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("duplicate pin id 'arm'"));
}

#[test]
fn bad_stiffness_is_rejected() {
    let mut cfg = WarpConfig::from_json_str(SAMPLE).unwrap();
    cfg.pins[1].pin.stiffness = 1.5;
    assert!(matches!(cfg.validate(), Err(WarpError::Validation(_))));
}

#[test]
fn non_finite_current_is_rejected() {
    let mut cfg = WarpConfig::from_json_str(SAMPLE).unwrap();
    if let Some(t) = cfg.pins[0].current.as_mut() {
        t.rotation_deg = f64::NAN;
    }
    assert!(cfg.validate().is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = WarpConfig::from_json_str("{ \"pins\": [ { \"id\": 3 } ] }").unwrap_err();
    assert!(matches!(err, WarpError::Serde(_)));
}

#[test]
fn json_round_trips_through_file() {
    let cfg = WarpConfig::from_json_str(SAMPLE).unwrap();
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("target/unit_config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("rig.json");
    std::fs::write(&path, cfg.to_json_string().unwrap()).unwrap();

    assert_eq!(WarpConfig::from_path(&path).unwrap(), cfg);
    assert!(WarpConfig::from_path(dir.join("missing.json")).is_err());
}
