use std::fs;
use std::path::Path;

use twap_calculator::engine::{run, RunInputs};
use twap_calculator::types::{FailurePolicy, RunConfig};

// 2^112
const Q: u128 = 5_192_296_858_534_827_628_530_496_329_220_096;

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Three pairs observed between timestamps ~100 and ~200:
/// - 0xLONG: reserves 1000/2000, stale end snapshot (last update at 150);
///   twap0 = 2.0, twap1 = 0.5. token0 is short, so long = 0.5 and pTwap = 1/3.
/// - 0xFLIP: reserves 1:1; token1 is short, long = twap0 = 1.0, pTwap = 0.5.
/// - 0xNONE: no market; only the two plain prices are written.
fn prices_doc(long_end_reserve0: i64) -> String {
    format!(
        r#"{{
  "startBlock": 1000,
  "endBlock": 1100,
  "pairs": {{
    "0xLONG": {{
      "start": {{"blockTimestamp": 100, "blockTimestampLast": 100,
                 "price0Cumulative": 0, "price1Cumulative": 0,
                 "reserve0": 1000, "reserve1": 2000}},
      "end":   {{"blockTimestamp": 200, "blockTimestampLast": 150,
                 "price0Cumulative": {c0}, "price1Cumulative": "{c1}",
                 "reserve0": {long_end_reserve0}, "reserve1": 2000}}
    }},
    "0xFLIP": {{
      "start": {{"blockTimestamp": 110, "blockTimestampLast": 110,
                 "price0Cumulative": 0, "price1Cumulative": 0,
                 "reserve0": 5, "reserve1": 5}},
      "end":   {{"blockTimestamp": 210, "blockTimestampLast": 210,
                 "price0Cumulative": {c_unit}, "price1Cumulative": {c_unit},
                 "reserve0": 5, "reserve1": 5}}
    }},
    "0xNONE": {{
      "start": {{"blockTimestamp": 100, "blockTimestampLast": 100,
                 "price0Cumulative": 0, "price1Cumulative": 0,
                 "reserve0": 1, "reserve1": 1}},
      "end":   {{"blockTimestamp": 200, "blockTimestampLast": 200,
                 "price0Cumulative": 0, "price1Cumulative": 0,
                 "reserve0": 1, "reserve1": 1}}
    }}
  }}
}}"#,
        c0 = Q * 2 * 50,
        c1 = Q / 2 * 50,
        c_unit = Q * 100,
    )
}

const MARKETS: &str = r#"{
  "data": {
    "conditionalScalarMarkets": [
      {"pair": {"id": "0xlong", "token0": {"id": "0xS1"}, "token1": {"id": "0xL1"}},
       "longToken": {"id": "0xl1"}, "shortToken": {"id": "0xs1"}, "outcomeIndex": 2},
      {"pair": {"id": "0xFlip", "token0": {"id": "0xL2"}, "token1": {"id": "0xS2"}},
       "longToken": {"id": "0xL2"}, "shortToken": {"id": "0xS2"}, "outcomeIndex": 5}
    ]
  }
}"#;

#[test]
fn computes_writes_and_ranks() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = RunInputs {
        prices_path: write(dir.path(), "prices.json", &prices_doc(1000)),
        markets_path: write(dir.path(), "csms.json", MARKETS),
    };
    let output = dir.path().join("results.json");
    let cfg = config_for(&output, FailurePolicy::Skip);

    let outcome = run(&inputs, &cfg).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written["startBlock"], 1000);
    assert_eq!(written["endBlock"], 1100);
    assert_eq!(written["startBlockTime"], 100);
    assert_eq!(written["endBlockTime"], 200);

    let long = &written["pairs"]["0xLONG"];
    assert_eq!(long["price0Twap"].as_f64(), Some(2.0));
    assert_eq!(long["price1Twap"].as_f64(), Some(0.5));
    assert_eq!(long["priceShortTwap"].as_f64(), Some(2.0));
    assert_eq!(long["priceLongTwap"].as_f64(), Some(0.5));
    assert_eq!(long["outcomeIndex"], 2);
    assert!((long["pTwap"].as_f64().unwrap() - 1.0 / 3.0).abs() < 1e-12);

    let flip = &written["pairs"]["0xFLIP"];
    assert_eq!(flip["priceLongTwap"].as_f64(), Some(1.0));
    assert_eq!(flip["pTwap"].as_f64(), Some(0.5));

    let none = written["pairs"]["0xNONE"].as_object().unwrap();
    assert_eq!(none.len(), 2);
    assert!(none.contains_key("price0Twap") && none.contains_key("price1Twap"));

    let top: Vec<_> = outcome
        .top(5)
        .into_iter()
        .map(|e| (e.address, e.outcome_index))
        .collect();
    assert_eq!(top, [("0xFLIP".to_string(), 5), ("0xLONG".to_string(), 2)]);
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn malformed_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = RunInputs {
        prices_path: write(dir.path(), "prices.json", "{\"startBlock\": 1,"),
        markets_path: write(dir.path(), "csms.json", MARKETS),
    };
    let output = dir.path().join("results.json");
    let cfg = config_for(&output, FailurePolicy::Skip);

    let err = run(&inputs, &cfg).unwrap_err();
    assert!(err.to_string().contains("prices.json"));
    assert!(!output.exists());
}

fn config_for(output: &Path, policy: FailurePolicy) -> RunConfig {
    RunConfig {
        output_path: output.display().to_string(),
        on_pair_error: policy,
        ..RunConfig::default()
    }
}

#[test]
fn zero_reserve_follows_failure_policy() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = RunInputs {
        prices_path: write(dir.path(), "prices.json", &prices_doc(0)),
        markets_path: write(dir.path(), "csms.json", MARKETS),
    };

    let aborted = dir.path().join("aborted.json");
    let err = run(&inputs, &config_for(&aborted, FailurePolicy::Abort)).unwrap_err();
    assert!(format!("{err:#}").contains("0xLONG"));
    assert!(!aborted.exists());

    let skipped = dir.path().join("skipped.json");
    let outcome = run(&inputs, &config_for(&skipped, FailurePolicy::Skip)).unwrap();
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].address, "0xLONG");

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&skipped).unwrap()).unwrap();
    let pairs = written["pairs"].as_object().unwrap();
    assert!(!pairs.contains_key("0xLONG"));
    assert_eq!(pairs.len(), 2);
    // Block times still come from the first pair in the document.
    assert_eq!(written["startBlockTime"], 100);
    assert_eq!(outcome.top(5).len(), 1);
}
