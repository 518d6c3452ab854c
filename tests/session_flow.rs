//! End-to-end walk through a learner session: pick an experiment, move the
//! controls, read the observations and answer the reflection check.

use light_lab::render::{experiment_markdown, lab_header, observation_line};
use light_lab::{Catalog, Config, ControlValue, Emphasis, ExperimentId, LabSession, Outcome};

fn catalog() -> &'static Catalog {
    Catalog::load().unwrap()
}

#[test]
fn test_refraction_walkthrough() {
    let mut session = LabSession::new(catalog(), ExperimentId(4));
    assert_eq!(session.current().unwrap().title, "Refraction with Water and Pencil");

    session.set_value("angle", ControlValue::Integer(10)).unwrap();
    let obs = session.observe().unwrap();
    assert_eq!(obs[0].panel, "bend");
    assert_eq!(obs[0].emphasis, Emphasis::Info);

    for _ in 0..10 {
        session.nudge("angle", true).unwrap();
    }
    assert_eq!(session.value("angle"), Some(&ControlValue::Integer(20)));
    let obs = session.observe().unwrap();
    assert_eq!(obs[0].emphasis, Emphasis::Success);
    assert!(observation_line(&obs[0]).starts_with("[success] "));
}

#[test]
fn test_out_of_range_value_is_rejected() {
    let mut session = LabSession::new(catalog(), ExperimentId(6));
    let err = session
        .set_value("distance", ControlValue::Integer(0))
        .unwrap_err();
    assert_eq!(err.kind(), "invalid_control_value");
    assert_eq!(session.value("distance"), Some(&ControlValue::Integer(5)));
}

#[test]
fn test_unknown_start_uses_first_experiment() {
    let session = LabSession::new(catalog(), ExperimentId(1));
    assert_eq!(session.current_id(), ExperimentId(3));
}

#[test]
fn test_mix_needs_two_picks() {
    let mut session = LabSession::new(catalog(), ExperimentId(3));
    session.toggle("mix", "Red").unwrap();
    let mix = session.observe().unwrap().pop().unwrap();
    assert!(mix.text.starts_with("Select two"));

    session.toggle("mix", "Green").unwrap();
    let mix = session.observe().unwrap().pop().unwrap();
    assert!(mix.text.contains("red"));
    assert!(mix.text.contains("green"));

    // un-picking drops back to the prompt
    session.toggle("mix", "Red").unwrap();
    let mix = session.observe().unwrap().pop().unwrap();
    assert!(mix.text.starts_with("Select two"));
}

#[test]
fn test_reflection_survives_switching() {
    let mut session = LabSession::new(catalog(), ExperimentId(5));
    session.set_outcome(Some(Outcome::DidNotWork));
    session.cycle(true);
    assert_eq!(session.current_id(), ExperimentId(6));
    session.cycle(false);
    assert_eq!(session.reflection().outcome, Some(Outcome::DidNotWork));
}

#[test]
fn test_page_respects_display_config() {
    let config = Config::from_toml_str(
        r#"
        [display]
        show_quick_setup = false
        show_reflection_checks = false
        "#,
    )
    .unwrap();
    let experiment = catalog().get(ExperimentId(6)).unwrap();
    let page = experiment_markdown(experiment, &config.display);
    assert!(page.starts_with("### Ice Magnifying Glass"));
    assert!(page.contains("Experiment 06"));
    assert!(!page.contains("#### Quick setup"));
    assert!(!page.contains("Did the activity work as expected?"));
}

#[test]
fn test_header_shows_configured_intro() {
    let config = Config::from_toml_str(
        r#"
        [lab]
        intro = "Try each activity with a grown-up nearby."
        "#,
    )
    .unwrap();
    let header = lab_header(&config.lab);
    assert!(header.starts_with("## Light & Color - Virtual Experiment Lab"));
    assert!(header.contains("Try each activity with a grown-up nearby."));

    let default_header = lab_header(&Config::default().lab);
    assert!(default_header.contains("learning by doing"));
}
