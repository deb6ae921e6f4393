//! JSON encoding of saves with field-by-field fallback on read.

use serde_json::{Map, Value};
use starminer_core::SaveState;
use tracing::warn;

/// Serializes progress into the persisted JSON shape.
pub fn encode_save(state: &SaveState) -> Result<String, serde_json::Error> {
    serde_json::to_string(state)
}

/// Reads progress from persisted text, substituting defaults for unusable fields.
///
/// Never fails: text that is not a JSON object yields the default state.
#[must_use]
pub fn decode_save(contents: &str) -> SaveState {
    let fields = match serde_json::from_str::<Value>(contents) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => {
            warn!("save is not a JSON object, starting fresh");
            return SaveState::default();
        }
        Err(error) => {
            warn!(%error, "save is not valid JSON, starting fresh");
            return SaveState::default();
        }
    };

    let defaults = SaveState::default();
    SaveState {
        resources: number(&fields, "resources").unwrap_or(defaults.resources),
        miner_level: level(&fields, "minerLevel"),
        miner_cost: number(&fields, "minerCost").unwrap_or(defaults.miner_cost),
        engine_level: level(&fields, "engineLevel"),
        engine_cost: number(&fields, "engineCost").unwrap_or(defaults.engine_cost),
        last_save_time: timestamp(&fields, "lastSaveTime"),
    }
    .sanitized()
}

fn number(fields: &Map<String, Value>, key: &str) -> Option<f64> {
    fields.get(key).and_then(Value::as_f64)
}

fn whole(fields: &Map<String, Value>, key: &str) -> Option<u64> {
    let value = fields.get(key)?;
    if let Some(whole) = value.as_u64() {
        return Some(whole);
    }
    // Integral floats such as `3.0` are accepted as well.
    let float = value.as_f64().filter(|v| v.is_finite() && *v >= 0.0)?;
    if float.fract() != 0.0 || float > u64::MAX as f64 {
        return None;
    }
    Some(float as u64)
}

fn level(fields: &Map<String, Value>, key: &str) -> u32 {
    whole(fields, key)
        .and_then(|value| u32::try_from(value).ok())
        .unwrap_or(0)
}

fn timestamp(fields: &Map<String, Value>, key: &str) -> u64 {
    whole(fields, key).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_camel_case_keys() {
        let encoded = encode_save(&SaveState::default()).expect("encodable");
        let value: Value = serde_json::from_str(&encoded).expect("valid json");
        for key in [
            "resources",
            "minerLevel",
            "minerCost",
            "engineLevel",
            "engineCost",
            "lastSaveTime",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn empty_object_yields_defaults() {
        assert_eq!(decode_save("{}"), SaveState::default());
    }

    #[test]
    fn non_object_yields_defaults() {
        assert_eq!(decode_save("[1, 2, 3]"), SaveState::default());
        assert_eq!(decode_save("not json"), SaveState::default());
        assert_eq!(decode_save(""), SaveState::default());
    }

    #[test]
    fn bad_fields_fall_back_individually() {
        let state = decode_save(
            r#"{
                "resources": -5,
                "minerLevel": "three",
                "minerCost": 0,
                "engineLevel": 2.0,
                "engineCost": null,
                "lastSaveTime": 1700000000000
            }"#,
        );

        assert_eq!(
            state,
            SaveState {
                resources: 0.0,
                miner_level: 0,
                miner_cost: 10.0,
                engine_level: 2,
                engine_cost: 50.0,
                last_save_time: 1_700_000_000_000,
            }
        );
    }

    #[test]
    fn fractional_and_negative_levels_are_rejected() {
        let state = decode_save(r#"{ "minerLevel": 1.5, "engineLevel": -1 }"#);
        assert_eq!(state.miner_level, 0);
        assert_eq!(state.engine_level, 0);
    }

    #[test]
    fn cost_below_base_falls_back() {
        let state = decode_save(r#"{ "minerCost": 0.5, "engineCost": 49 }"#);
        assert_eq!(state.miner_cost, 10.0);
        assert_eq!(state.engine_cost, 50.0);
    }

    #[test]
    fn fractional_balance_is_kept() {
        let state = decode_save(r#"{ "resources": 12.75, "minerCost": 22 }"#);
        assert_eq!(state.resources, 12.75);
        assert_eq!(state.miner_cost, 22.0);
    }
}
