// Host-level behaviour of the registered bindings
use calc_bridge::{
    register_callbacks, BindingTable, BindingValue, BridgeConfig, Namespace, Resident,
    ShutdownReason,
};
use std::thread;
use std::time::Duration;

const SAMPLES: [f64; 9] = [0.0, 1.0, -1.0, 2.5, -7.25, 1e-9, 123456.789, f64::MAX, f64::MIN_POSITIVE];

fn default_table() -> BindingTable {
    let _ = env_logger::builder().is_test(true).try_init();
    BindingTable::with_callbacks(&BridgeConfig::default()).unwrap()
}

#[test]
fn arithmetic_matches_float_model() {
    let table = default_table();

    for &a in &SAMPLES {
        for &b in &SAMPLES {
            assert_eq!(table.call("goAdd", &[a, b]).unwrap(), BindingValue::Number(a + b));
            assert_eq!(table.call("goSub", &[a, b]).unwrap(), BindingValue::Number(a - b));
            assert_eq!(table.call("goMul", &[a, b]).unwrap(), BindingValue::Number(a * b));

            let quotient = table.call("goDiv", &[a, b]).unwrap();
            if b == 0.0 {
                assert_eq!(quotient, BindingValue::Text("∞"));
            } else {
                assert_eq!(quotient, BindingValue::Number(a / b));
            }
        }
    }
}

#[test]
fn repeated_calls_are_identical() {
    let table = default_table();

    let first = table.call("goDiv", &[1.0, 3.0]).unwrap();
    for _ in 0..10 {
        assert_eq!(table.call("goDiv", &[1.0, 3.0]).unwrap(), first);
    }
}

#[test]
fn short_calls_return_sentinels() {
    let table = default_table();

    for name in ["goAdd", "goSub", "goMul"] {
        assert_eq!(table.call(name, &[]).unwrap(), BindingValue::Integer(0));
        assert_eq!(table.call(name, &[4.0]).unwrap(), BindingValue::Integer(0));
    }
    assert_eq!(table.call("goDiv", &[]).unwrap(), BindingValue::Text("NaN"));
    assert_eq!(table.call("goDiv", &[4.0]).unwrap(), BindingValue::Text("NaN"));
}

#[test]
fn json_output_keeps_heterogeneous_types() {
    let table = default_table();

    let values = vec![
        table.call("goAdd", &[2.0, 3.0]).unwrap(),
        table.call("goAdd", &[]).unwrap(),
        table.call("goDiv", &[10.0, 0.0]).unwrap(),
        table.call("goDiv", &[]).unwrap(),
    ];

    let json = serde_json::to_string(&values).unwrap();
    assert_eq!(json, r#"[5.0,0,"∞","NaN"]"#);
}

/// A namespace that records installation order, standing in for a host
#[derive(Default)]
struct RecordingNamespace {
    names: Vec<String>,
}

impl Namespace for RecordingNamespace {
    fn set(&mut self, name: &str, _binding: calc_bridge::Binding) -> calc_bridge::Result<()> {
        self.names.push(name.to_string());
        Ok(())
    }
}

#[test]
fn registration_targets_any_namespace() {
    let mut namespace = RecordingNamespace::default();
    let config = BridgeConfig::new().with_prefix("calc");

    register_callbacks(&mut namespace, &config).unwrap();
    assert_eq!(namespace.names, vec!["calcAdd", "calcSub", "calcMul", "calcDiv"]);
}

#[test]
fn bindings_stay_callable_while_resident() {
    let table = default_table();
    let (resident, handle) = Resident::channel();

    let host = thread::spawn(move || {
        let sum = table.call("goAdd", &[2.0, 3.0]).unwrap();
        // Keep offering the signal until the resident side is parked
        for _ in 0..500 {
            if handle.clone().shutdown() {
                break;
            }
            thread::sleep(Duration::from_millis(2));
        }
        sum
    });

    assert_eq!(resident.run_until_shutdown(), ShutdownReason::Requested);
    assert_eq!(host.join().unwrap(), BindingValue::Number(5.0));
}
