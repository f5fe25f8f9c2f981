use auto_drive_sim::adapters::outbound::{init_noop_logger, MultiLogger};
use auto_drive_sim::application::SimulationService;
use auto_drive_sim::common::{ApplicationError, DomainError, DomainResult};
use auto_drive_sim::config::OutputFormat;
use auto_drive_sim::domains::logger::{DomainLogger, DynLogger};
use auto_drive_sim::domains::simulation::{Scenario, ScenarioSource};
use std::sync::{Arc, Mutex};

struct BridgeCapture {
    messages: Arc<Mutex<Vec<String>>>,
}

impl BridgeCapture {
    fn new() -> Self {
        Self { messages: Arc::new(Mutex::new(Vec::new())) }
    }
}

impl DomainLogger for BridgeCapture {
    fn info(&self, msg: &str) { self.messages.lock().unwrap().push(format!("INFO:{}", msg)); }
    fn warn(&self, msg: &str) { self.messages.lock().unwrap().push(format!("WARN:{}", msg)); }
    fn error(&self, msg: &str) { self.messages.lock().unwrap().push(format!("ERR:{}", msg)); }
}

struct InMemorySource {
    scenario: Option<Scenario>,
}

impl ScenarioSource for InMemorySource {
    fn load_scenario(&self, name: &str) -> DomainResult<Scenario> {
        self.scenario
            .clone()
            .ok_or_else(|| DomainError::ScenarioNotFound { name: name.to_string() })
    }
}

fn four_car_scenario() -> Scenario {
    Scenario::from_toml(
        r#"
[field]
width = 10
height = 10

[[cars]]
name = "A"
position = "1 2 N"
commands = "FFRFFFFRRL"

[[cars]]
name = "B"
position = "7 8 W"
commands = "FFLFFFFFFF"

[[cars]]
name = "C"
position = "9 9 N"

[[cars]]
name = "D"
position = "0 0 S"
commands = "F"
"#,
    )
    .unwrap()
}

#[test]
fn test_service_logs_incidents() {
    let capture = Arc::new(BridgeCapture::new());
    let logger = capture.clone() as DynLogger;
    let source = Arc::new(InMemorySource { scenario: Some(four_car_scenario()) });
    let service = SimulationService::new(logger, source);

    let outcome = service.run_named("four-cars").unwrap();

    assert_eq!(
        outcome.lines(),
        vec![
            "- A, collides with B at (5, 4) at step 7",
            "- B, collides with A at (5, 4) at step 7",
            "- C, (9, 9) N",
            "- D, hits the wall at (0, 0) at step 1",
        ]
    );
    // FieldCreated, four CarAdded, SimulationCompleted
    assert_eq!(outcome.events.len(), 6);
    assert!(outcome.events.iter().all(|e| e.aggregate_id == outcome.field_id));
    assert_eq!(outcome.events[5].event_type, "SimulationCompleted");

    let msgs = capture.messages.lock().unwrap();
    assert!(msgs.iter().any(|m| m == "INFO:Loading scenario four-cars"));
    assert!(msgs.iter().any(|m| m == "WARN:- D, hits the wall at (0, 0) at step 1"));
    assert_eq!(msgs.iter().filter(|m| m.starts_with("WARN:")).count(), 3);
}

#[test]
fn test_service_reports_missing_scenario() {
    let capture = Arc::new(BridgeCapture::new());
    let service = SimulationService::new(capture.clone(), Arc::new(InMemorySource { scenario: None }));

    let err = service.run_named("nowhere").unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::ScenarioNotFound { .. })
    ));
    assert!(capture.messages.lock().unwrap().iter().any(|m| m.starts_with("ERR:")));
}

#[test]
fn test_json_rendering() {
    let service = SimulationService::new(init_noop_logger(), Arc::new(InMemorySource { scenario: None }));
    let outcome = service.run_scenario(&four_car_scenario()).unwrap();

    let json: serde_json::Value = serde_json::from_str(&outcome.render(OutputFormat::Json).unwrap()).unwrap();

    assert_eq!(json[2]["name"], "C");
    assert_eq!(json[2]["result"], "(9, 9) N");
    assert_eq!(json[0]["result"], "collides with B at (5, 4) at step 7");
    assert_eq!(
        outcome.render(OutputFormat::Text).unwrap(),
        outcome.lines().join("\n")
    );
}

#[test]
fn test_multi_logger_forwards_to_both() {
    let first = Arc::new(BridgeCapture::new());
    let second = Arc::new(BridgeCapture::new());
    let multi = MultiLogger::new(first.clone(), Some(second.clone() as DynLogger));

    multi.info("one");
    multi.warn("two");
    multi.error("three");

    for capture in [&first, &second] {
        let msgs = capture.messages.lock().unwrap();
        assert_eq!(*msgs, vec!["INFO:one", "WARN:two", "ERR:three"]);
    }

    let noop = init_noop_logger();
    noop.info("ignored");
    noop.error("ignored-err");
}
