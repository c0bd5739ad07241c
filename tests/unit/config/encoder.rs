use super::*;

fn bag(v: serde_json::Value) -> Bag {
    serde_json::from_value(v).unwrap()
}

#[test]
fn empty_options_get_default_duration_and_mode() {
    let merged = with_encoder_defaults(Bag::new());
    assert_eq!(merged["duration"], json!(0.5));
    assert_eq!(merged["mode"], json!("I"));

    let s = EncoderSettings::from_options(&Bag::new()).unwrap();
    assert_eq!(s.duration, FrameDuration::Uniform(0.5));
    assert_eq!(s.mode, EncoderMode::Animated);
    assert_eq!(s.delay_centis(0), 50);
}

#[test]
fn caller_duration_wins_and_mode_is_still_defaulted() {
    let merged = with_encoder_defaults(bag(json!({"duration": 0.3})));
    assert_eq!(merged["duration"], json!(0.3));
    assert_eq!(merged["mode"], json!("I"));

    let s = EncoderSettings::from_options(&bag(json!({"duration": 0.3}))).unwrap();
    assert_eq!(s.duration, FrameDuration::Uniform(0.3));
    assert_eq!(s.mode, EncoderMode::Animated);
    assert_eq!(s.delay_centis(7), 30);
}

#[test]
fn fps_replaces_default_duration() {
    let merged = with_encoder_defaults(bag(json!({"fps": 4})));
    assert!(!merged.contains_key("duration"));
    let s = EncoderSettings::from_options(&bag(json!({"fps": 4}))).unwrap();
    assert_eq!(s.delay_centis(0), 25);
}

#[test]
fn duration_and_fps_together_are_rejected() {
    let err = EncoderSettings::from_options(&bag(json!({"fps": 4, "duration": 0.1}))).unwrap_err();
    assert!(matches!(err, DatagifError::Configuration(_)));
}

#[test]
fn unknown_option_is_configuration_error() {
    let err = EncoderSettings::from_options(&bag(json!({"quantizer": "nq"}))).unwrap_err();
    assert!(matches!(err, DatagifError::Configuration(_)));
    assert!(err.to_string().contains("quantizer"));
}

#[test]
fn bad_mode_and_speed_are_rejected() {
    assert!(EncoderSettings::from_options(&bag(json!({"mode": "v"}))).is_err());
    assert!(EncoderSettings::from_options(&bag(json!({"speed": 0}))).is_err());
    assert!(EncoderSettings::from_options(&bag(json!({"loop": -1}))).is_err());
    assert!(EncoderSettings::from_options(&bag(json!({"duration": -0.1}))).is_err());
}

#[test]
fn per_frame_durations_must_match_frame_count() {
    let s = EncoderSettings::from_options(&bag(json!({"duration": [0.1, 0.2, 1.0]}))).unwrap();
    assert!(s.check_frame_count(3).is_ok());
    assert!(s.check_frame_count(2).is_err());
    assert_eq!(s.delay_centis(2), 100);
}

#[test]
fn single_mode_accepts_one_frame() {
    let s = EncoderSettings::from_options(&bag(json!({"mode": "i"}))).unwrap();
    assert_eq!(s.mode, EncoderMode::Single);
    assert!(s.check_frame_count(1).is_ok());
    assert!(matches!(
        s.check_frame_count(3),
        Err(DatagifError::Configuration(_))
    ));
}
