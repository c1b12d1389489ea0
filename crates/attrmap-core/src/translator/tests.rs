use super::{ApiAttributes, AttributeMap, MappingEntry};
use crate::store::{ConfigStore, ResourceData};
use attrmap_types::{StoreError, TranslateError, Value, ValueKind};
use std::collections::{BTreeMap, HashMap};

fn queue_map() -> AttributeMap {
    AttributeMap::from_iter([
        ("name", "QueueName"),
        ("delay", "DelaySeconds"),
        ("fifo", "FifoQueue"),
    ])
}

fn queue_schema() -> BTreeMap<String, ValueKind> {
    BTreeMap::from([
        ("name".to_string(), ValueKind::String),
        ("delay".to_string(), ValueKind::Int),
        ("fifo".to_string(), ValueKind::Bool),
        ("ratio".to_string(), ValueKind::Float),
    ])
}

fn attrs(pairs: &[(&str, &str)]) -> ApiAttributes {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

/// Records writes in order and rejects one named field.
#[derive(Default)]
struct RecordingStore {
    writes: Vec<(String, String)>,
    reject: Option<&'static str>,
}

impl ConfigStore for RecordingStore {
    fn set_field(&mut self, name: &str, value: &str) -> Result<(), StoreError> {
        if self.reject == Some(name) {
            return Err(StoreError::UnknownField { field: name.to_string() });
        }
        self.writes.push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn get_field_if_present(&self, _name: &str) -> Option<Value> {
        None
    }

    fn get_field(&self, _name: &str) -> Value {
        Value::Null
    }

    fn has_field_changed(&self, _name: &str) -> bool {
        false
    }
}

#[test]
fn test_import_sets_typed_fields() {
    let mut data = ResourceData::new(queue_schema());
    let api = attrs(&[("QueueName", "orders"), ("DelaySeconds", "30"), ("FifoQueue", "true")]);

    queue_map().import_to_local(&api, &mut data).unwrap();

    assert_eq!(data.get_field("name"), Value::from("orders"));
    assert_eq!(data.get_field("delay"), Value::Int(30));
    assert_eq!(data.get_field("fifo"), Value::Bool(true));
}

#[test]
fn test_import_partial_response_leaves_fields_untouched() {
    let state = HashMap::from([("delay".to_string(), Value::Int(10))]);
    let mut data = ResourceData::with_state(queue_schema(), state).unwrap();
    let api = attrs(&[("QueueName", "orders"), ("Policy", "{}")]);

    queue_map().import_to_local(&api, &mut data).unwrap();

    assert_eq!(data.get_field("name"), Value::from("orders"));
    assert_eq!(data.get_field("delay"), Value::Int(10));
    assert_eq!(data.values().len(), 2);
}

#[test]
fn test_import_stops_at_first_rejected_write() {
    let mut store = RecordingStore { reject: Some("fifo"), ..Default::default() };
    let api = attrs(&[("QueueName", "orders"), ("DelaySeconds", "30"), ("FifoQueue", "true")]);

    let err = queue_map().import_to_local(&api, &mut store).unwrap_err();

    assert_eq!(
        err,
        TranslateError::FieldWrite {
            field: "fifo".to_string(),
            source: StoreError::UnknownField { field: "fifo".to_string() },
        }
    );
    // "delay" sorts before "fifo" and stays written; "name" is never reached
    assert_eq!(store.writes, vec![("delay".to_string(), "30".to_string())]);
}

#[test]
fn test_import_reports_coercion_failure() {
    let mut data = ResourceData::new(queue_schema());
    let api = attrs(&[("DelaySeconds", "thirty")]);

    let err = queue_map().import_to_local(&api, &mut data).unwrap_err();

    assert_eq!(err.field(), "delay");
    assert!(matches!(err, TranslateError::FieldWrite { source: StoreError::InvalidValue { .. }, .. }));
}

#[test]
fn test_create_includes_only_present_fields() {
    let mut data = ResourceData::new(queue_schema());
    data.set_value("name", "orders").unwrap();
    data.set_value("fifo", false).unwrap();

    let api = queue_map().export_for_create(&data).unwrap();

    assert_eq!(api, attrs(&[("QueueName", "orders"), ("FifoQueue", "false")]));
}

#[test]
fn test_create_coerces_negative_integers() {
    let mut data = ResourceData::new(queue_schema());
    data.set_value("delay", -15_i64).unwrap();

    let api = queue_map().export_for_create(&data).unwrap();

    assert_eq!(api["DelaySeconds"], "-15");
}

#[test]
fn test_create_is_idempotent() {
    let mut data = ResourceData::new(queue_schema());
    data.set_value("name", "orders").unwrap();
    data.set_value("delay", 30_i64).unwrap();
    let map = queue_map();

    let first = map.export_for_create(&data).unwrap();
    let second = map.export_for_create(&data).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_update_sends_only_changed_fields() {
    let state = HashMap::from([
        ("name".to_string(), Value::from("orders")),
        ("delay".to_string(), Value::Int(30)),
        ("fifo".to_string(), Value::Bool(false)),
    ]);
    let mut data = ResourceData::with_state(queue_schema(), state).unwrap();
    data.set_value("delay", 45_i64).unwrap();

    let api = queue_map().export_for_update(&data).unwrap();

    assert_eq!(api, attrs(&[("DelaySeconds", "45")]));
}

#[test]
fn test_update_sends_change_to_zero_value() {
    let state = HashMap::from([
        ("name".to_string(), Value::from("orders")),
        ("delay".to_string(), Value::Int(30)),
    ]);
    let mut data = ResourceData::with_state(queue_schema(), state).unwrap();
    data.set_value("delay", 0_i64).unwrap();
    data.set_value("name", "").unwrap();

    let api = queue_map().export_for_update(&data).unwrap();

    assert_eq!(api, attrs(&[("DelaySeconds", "0"), ("QueueName", "")]));
}

#[test]
fn test_update_skips_create_only_fields() {
    let mut data = ResourceData::new(queue_schema());
    data.set_value("fifo", true).unwrap();
    data.set_value("delay", 5_i64).unwrap();
    let map = queue_map().with_skip_update("fifo");

    let update = map.export_for_update(&data).unwrap();
    let create = map.export_for_create(&data).unwrap();

    assert_eq!(update, attrs(&[("DelaySeconds", "5")]));
    assert_eq!(create["FifoQueue"], "true");
}

#[test]
fn test_unsupported_kind_fails_without_partial_output() {
    let map = AttributeMap::from_iter([("name", "QueueName"), ("ratio", "RedriveRatio")]);
    let mut data = ResourceData::new(queue_schema());
    data.set_value("name", "orders").unwrap();
    data.set_value("ratio", 0.5).unwrap();

    let expected = TranslateError::UnsupportedValueKind {
        field: "ratio".to_string(),
        kind: ValueKind::Float,
    };
    assert_eq!(map.export_for_create(&data).unwrap_err(), expected);
    assert_eq!(map.export_for_update(&data).unwrap_err(), expected);
}

#[test]
fn test_update_reports_unknown_field_as_unsupported() {
    struct ChangedEverywhere;

    impl ConfigStore for ChangedEverywhere {
        fn set_field(&mut self, _name: &str, _value: &str) -> Result<(), StoreError> {
            Ok(())
        }
        fn get_field_if_present(&self, _name: &str) -> Option<Value> {
            None
        }
        fn get_field(&self, _name: &str) -> Value {
            Value::Null
        }
        fn has_field_changed(&self, _name: &str) -> bool {
            true
        }
    }

    let err = queue_map().export_for_update(&ChangedEverywhere).unwrap_err();

    assert_eq!(err.field(), "delay");
    assert!(matches!(err, TranslateError::UnsupportedValueKind { kind: ValueKind::Null, .. }));
}

#[test]
fn test_name_lookups() {
    let map = queue_map();

    assert_eq!(map.api_attribute_names(), vec!["DelaySeconds", "FifoQueue", "QueueName"]);
    assert_eq!(map.api_name("fifo"), Some("FifoQueue"));
    assert_eq!(map.local_name("QueueName"), Some("name"));
    assert_eq!(map.local_name("Policy"), None);
    assert_eq!(map.len(), 3);
    assert!(!map.is_empty());
    assert!(AttributeMap::new().is_empty());
}

#[test]
fn test_from_simple_map() {
    let simple = HashMap::from([("name".to_string(), "QueueName".to_string())]);

    let map = AttributeMap::from_simple_map(simple);

    assert_eq!(map.iter().collect::<Vec<_>>(), vec![("name", &MappingEntry::new("QueueName"))]);
}

#[test]
fn test_deserialize_mixed_entries() {
    let json = r#"{
        "name": "QueueName",
        "fifo": { "api_name": "FifoQueue", "skip_update": true },
        "delay": { "api_name": "DelaySeconds" }
    }"#;

    let map: AttributeMap = serde_json::from_str(json).unwrap();

    assert_eq!(map, queue_map().with_skip_update("fifo"));

    let round_trip: AttributeMap = serde_json::from_str(&serde_json::to_string(&map).unwrap()).unwrap();
    assert_eq!(round_trip, map);
}
