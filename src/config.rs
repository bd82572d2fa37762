//! Persisted ruleset and the "don't warn me about rule changes" flag.
//!
//! Reads never fail: anything missing, unreadable or malformed falls back to
//! defaults. Writes are best effort and only logged on failure.

use dealing::{DealConfig, DealConfigPatch, DealMode};
use log::warn;
use serde_json::Value;

use crate::state::{CONFIG, SKIP_RULE_CHANGE_TIP_KEY};
use crate::storage::Storage;

/// The stored ruleset, sanitized, or the default one.
pub fn get_config<S: Storage + ?Sized>(storage: &S) -> DealConfig {
    let raw = match CONFIG.may_load_raw(storage) {
        Ok(Some(raw)) => raw,
        Ok(None) => return DealConfig::default(),
        Err(err) => {
            warn!("Failed to read ruleset, using defaults: {err}");
            return DealConfig::default();
        }
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => patch_from_json(&value).sanitize(),
        Err(err) => {
            warn!("Stored ruleset is not valid JSON, using defaults: {err}");
            DealConfig::default()
        }
    }
}

/// Merge `patch` onto the stored ruleset, persist and return the result.
pub fn set_config<S: Storage + ?Sized>(storage: &mut S, patch: &DealConfigPatch) -> DealConfig {
    let merged = get_config(&*storage).merge(patch);
    if let Err(err) = CONFIG.save(storage, &merged) {
        warn!("Failed to save ruleset: {err}");
    }
    merged
}

pub fn clear_config<S: Storage + ?Sized>(storage: &mut S) {
    if let Err(err) = CONFIG.remove(storage) {
        warn!("Failed to clear ruleset: {err}");
    }
}

pub fn skip_rule_change_tip<S: Storage + ?Sized>(storage: &S) -> bool {
    match storage.get(SKIP_RULE_CHANGE_TIP_KEY) {
        Ok(flag) => flag.is_some_and(|flag| !flag.is_empty()),
        Err(err) => {
            warn!("Failed to read rule change preference: {err}");
            false
        }
    }
}

pub fn set_skip_rule_change_tip<S: Storage + ?Sized>(storage: &mut S, skip: bool) {
    let flag = if skip { "1" } else { "" };
    if let Err(err) = storage.set(SKIP_RULE_CHANGE_TIP_KEY, flag) {
        warn!("Failed to save rule change preference: {err}");
    }
}

/// Read a loosely typed ruleset record field by field. Fields that are
/// missing or of an unusable type are left unset so sanitization fills in
/// the default.
pub fn patch_from_json(value: &Value) -> DealConfigPatch {
    DealConfigPatch {
        deck_count: value.get("deckCount").and_then(whole_number),
        include_jokers: value.get("includeJokers").and_then(truthy),
        player_count: value.get("playerCount").and_then(number),
        deal_mode: value
            .get("dealMode")
            .and_then(Value::as_str)
            .map(DealMode::from_label),
        per_time: value.get("perTime").and_then(number),
        reshuffle: value.get("reshuffle").and_then(truthy),
    }
}

/// JSON numbers with no fractional part, so `2.0` reads as 2 but `"2"` and
/// `2.5` do not.
fn whole_number(value: &Value) -> Option<i64> {
    value
        .as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0)
        .map(|f| f as i64)
}

/// Integers, fractions (truncated toward zero) and numeric strings.
fn number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64),
        _ => None,
    }
}

/// `null` is "missing"; everything else follows the usual truthiness rules.
fn truthy(value: &Value) -> Option<bool> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => Some(!s.is_empty()),
        Value::Array(_) | Value::Object(_) => Some(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use serde_json::json;

    #[test]
    fn test_defaults_when_absent() {
        let storage = MemoryStorage::new();
        assert_eq!(get_config(&storage), DealConfig::default());
    }

    #[test]
    fn test_defaults_when_corrupt() {
        let mut storage = MemoryStorage::new();
        storage.set(CONFIG.key(), "{not json").unwrap();
        assert_eq!(get_config(&storage), DealConfig::default());

        storage.set(CONFIG.key(), "[1, 2]").unwrap();
        assert_eq!(get_config(&storage), DealConfig::default());
    }

    #[test]
    fn test_set_merges_and_persists() {
        let mut storage = MemoryStorage::new();
        let cfg = set_config(
            &mut storage,
            &DealConfigPatch {
                player_count: Some(7),
                deal_mode: Some(DealMode::Simultaneous),
                ..DealConfigPatch::default()
            },
        );
        assert_eq!(cfg.player_count, 7);
        assert_eq!(cfg.deal_mode, DealMode::Simultaneous);
        assert_eq!(get_config(&storage), cfg);

        let cfg = set_config(
            &mut storage,
            &DealConfigPatch {
                per_time: Some(99),
                ..DealConfigPatch::default()
            },
        );
        assert_eq!(cfg.player_count, 7);
        assert_eq!(cfg.per_time, 10);
    }

    #[test]
    fn test_clear_restores_defaults() {
        let mut storage = MemoryStorage::new();
        set_config(
            &mut storage,
            &DealConfigPatch {
                reshuffle: Some(true),
                ..DealConfigPatch::default()
            },
        );
        clear_config(&mut storage);
        assert_eq!(get_config(&storage), DealConfig::default());
    }

    #[test]
    fn test_lenient_fields() {
        let patch = patch_from_json(&json!({
            "deckCount": "2",
            "includeJokers": 0,
            "playerCount": "6",
            "dealMode": "SIMULTANEOUS",
            "perTime": 2.9,
            "reshuffle": "yes",
        }));
        let cfg = patch.sanitize();
        assert_eq!(cfg.deck_count, 1);
        assert!(!cfg.include_jokers);
        assert_eq!(cfg.player_count, 6);
        assert_eq!(cfg.deal_mode, DealMode::Round);
        assert_eq!(cfg.per_time, 2);
        assert!(cfg.reshuffle);
    }

    #[test]
    fn test_deck_count_accepts_whole_floats() {
        let mut storage = MemoryStorage::new();
        storage
            .set(CONFIG.key(), r#"{"deckCount":2.0,"playerCount":4}"#)
            .unwrap();
        assert_eq!(get_config(&storage).deck_count, 2);

        let cfg = patch_from_json(&json!({ "deckCount": 2.5 })).sanitize();
        assert_eq!(cfg.deck_count, 1);
    }

    #[test]
    fn test_null_fields_take_defaults() {
        let cfg = patch_from_json(&json!({
            "includeJokers": null,
            "playerCount": null,
            "perTime": "lots",
        }))
        .sanitize();
        assert_eq!(cfg, DealConfig::default());
    }

    #[test]
    fn test_stored_out_of_range_is_clamped() {
        let mut storage = MemoryStorage::new();
        storage
            .set(
                CONFIG.key(),
                r#"{"deckCount":2,"includeJokers":false,"playerCount":30,"dealMode":"simultaneous","perTime":0,"reshuffle":true}"#,
            )
            .unwrap();
        let cfg = get_config(&storage);
        assert_eq!(cfg.deck_count, 2);
        assert_eq!(cfg.player_count, 12);
        assert_eq!(cfg.per_time, 1);
    }

    #[test]
    fn test_skip_flag() {
        let mut storage = MemoryStorage::new();
        assert!(!skip_rule_change_tip(&storage));

        set_skip_rule_change_tip(&mut storage, true);
        assert!(skip_rule_change_tip(&storage));
        assert_eq!(storage.get(SKIP_RULE_CHANGE_TIP_KEY).unwrap().as_deref(), Some("1"));

        set_skip_rule_change_tip(&mut storage, false);
        assert!(!skip_rule_change_tip(&storage));
        assert_eq!(storage.get(SKIP_RULE_CHANGE_TIP_KEY).unwrap().as_deref(), Some(""));
    }

    #[test]
    fn test_skip_flag_independent_of_ruleset() {
        let mut storage = MemoryStorage::new();
        set_skip_rule_change_tip(&mut storage, true);
        clear_config(&mut storage);
        assert!(skip_rule_change_tip(&storage));
    }
}
