use auto_drive_sim::adapters::outbound::FilesystemScenarioSource;
use auto_drive_sim::common::DomainError;
use auto_drive_sim::domains::simulation::{Scenario, ScenarioCar, ScenarioField, ScenarioSource};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_filesystem_scenario_source_load() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("crash.toml"),
        r#"
[field]
width = 10
height = 10

[[cars]]
name = "A"
position = "1 2 N"
commands = "FFRFFFFRRL"

[[cars]]
name = "C"
position = "9 9 n"
"#,
    )
    .unwrap();

    let source = FilesystemScenarioSource::new(Some(dir.path().to_path_buf()));
    let scenario = source.load_scenario("crash.toml").unwrap();

    assert_eq!(scenario.field, ScenarioField { width: 10, height: 10 });
    assert_eq!(scenario.cars.len(), 2);
    assert_eq!(scenario.cars[1].commands, "");

    let field = scenario.build_field().unwrap();
    assert_eq!(field.car_details(), vec!["- A, (1, 2) N, FFRFFFFRRL", "- C, (9, 9) N, "]);
}

#[test]
fn test_filesystem_scenario_source_save_and_load() {
    let dir = tempdir().unwrap();
    let source = FilesystemScenarioSource::new(Some(dir.path().to_path_buf()));
    let scenario = Scenario {
        field: ScenarioField { width: 5, height: 7 },
        cars: vec![ScenarioCar {
            name: "Drumstick".to_string(),
            position: "0 0 E".to_string(),
            commands: "FFL".to_string(),
        }],
    };

    source.save_scenario("nested/one.toml", &scenario).unwrap();
    let loaded = source.load_scenario("nested/one.toml").unwrap();

    assert_eq!(loaded, scenario);
}

#[test]
fn test_missing_scenario_is_reported() {
    let dir = tempdir().unwrap();
    let source = FilesystemScenarioSource::new(Some(dir.path().to_path_buf()));

    match source.load_scenario("absent.toml").unwrap_err() {
        DomainError::ScenarioNotFound { name } => assert!(name.ends_with("absent.toml")),
        other => panic!("Expected ScenarioNotFound error, got {:?}", other),
    }
}

#[test]
fn test_malformed_scenario_is_invalid_input() {
    let err = Scenario::from_toml("[field]\nwidth = \"ten\"\n").unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput { .. }));

    let empty = Scenario::from_toml("[field]\nwidth = 0\nheight = 4\n").unwrap();
    assert!(matches!(empty.build_field(), Err(DomainError::InvalidInput { .. })));
}

#[test]
fn test_scenario_registration_rules_apply() {
    let scenario = Scenario::from_toml(
        r#"
[field]
width = 3
height = 3

[[cars]]
name = "A"
position = "0 0 N"

[[cars]]
name = "A"
position = "1 1 N"
"#,
    )
    .unwrap();

    assert!(matches!(
        scenario.build_field(),
        Err(DomainError::DuplicateCarName { .. })
    ));
}
