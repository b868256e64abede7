// src/jobs/sources/mod.rs
//! One module per upstream job board. Each board implements [`Source`] with
//! its own envelope extraction and normalization quirks; the registry below
//! fixes the cross-source priority order used for deduplication.

pub mod arbeitnow;
pub mod jobicy;
pub mod remoteok;
pub mod remotive;
pub mod themuse;
pub mod working_nomads;

use serde_json::Value;

use crate::jobs::types::Source;

static REMOTIVE: remotive::Remotive = remotive::Remotive;
static ARBEITNOW: arbeitnow::Arbeitnow = arbeitnow::Arbeitnow;
static JOBICY: jobicy::Jobicy = jobicy::Jobicy;
static REMOTEOK: remoteok::RemoteOk = remoteok::RemoteOk;
static WORKING_NOMADS: working_nomads::WorkingNomads = working_nomads::WorkingNomads;
static THE_MUSE: themuse::TheMuse = themuse::TheMuse;

static ALL: [&'static dyn Source; 6] = [
    &REMOTIVE,
    &ARBEITNOW,
    &JOBICY,
    &REMOTEOK,
    &WORKING_NOMADS,
    &THE_MUSE,
];

/// All configured boards in fixed priority order. Earlier sources win when
/// the same listing URL appears on several boards, so this order must stay
/// stable across runs.
pub fn all() -> &'static [&'static dyn Source] {
    &ALL
}

/// Filter the registry by a configured allow-list (case-insensitive).
/// An empty list enables everything.
pub fn enabled(allow: &[String]) -> Vec<&'static dyn Source> {
    if allow.is_empty() {
        return all().to_vec();
    }
    all()
        .iter()
        .copied()
        .filter(|s| allow.iter().any(|a| a.eq_ignore_ascii_case(s.name())))
        .collect()
}

// --- small field helpers shared by the normalizers ---
// Missing or mistyped fields degrade to empty values; a single bad record
// must never abort its batch.

pub(crate) fn str_field(item: &Value, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub(crate) fn opt_str_field(item: &Value, key: &str) -> Option<String> {
    item.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub(crate) fn string_list(v: Option<&Value>) -> Vec<String> {
    match v {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Ordinal fallbacks live in their own sub-range, below the 100_000 spacing
/// between source offsets, so a fallback cannot collide with a small native
/// id in the same batch.
pub(crate) const ORDINAL_FALLBACK_BASE: u64 = 50_000;

/// Native numeric id, or a reserved-range ordinal when the id is missing or
/// non-numeric. Ordinals stay unique within one batch.
pub(crate) fn id_or_ordinal(item: &Value, key: &str, ordinal: usize) -> u64 {
    let fallback = ORDINAL_FALLBACK_BASE + ordinal as u64;
    match item.get(key) {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(fallback),
        Some(Value::String(s)) => s.parse().unwrap_or(fallback),
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn priority_order_is_stable() {
        let names: Vec<_> = all().iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            [
                "Remotive",
                "Arbeitnow",
                "Jobicy",
                "RemoteOK",
                "WorkingNomads",
                "TheMuse"
            ]
        );
    }

    #[test]
    fn id_offsets_are_disjoint() {
        let mut offsets: Vec<_> = all().iter().map(|s| s.id_offset()).collect();
        offsets.sort_unstable();
        offsets.dedup();
        assert_eq!(offsets.len(), all().len());
        for w in offsets.windows(2) {
            assert!(w[1] - w[0] >= 100_000);
        }
    }

    #[test]
    fn id_fallback_uses_reserved_range_ordinal() {
        assert_eq!(id_or_ordinal(&json!({"id": 7}), "id", 3), 7);
        assert_eq!(id_or_ordinal(&json!({"id": "7"}), "id", 3), 7);
        assert_eq!(
            id_or_ordinal(&json!({"id": "abc123"}), "id", 3),
            ORDINAL_FALLBACK_BASE + 3
        );
        assert_eq!(id_or_ordinal(&json!({}), "id", 3), ORDINAL_FALLBACK_BASE + 3);
    }

    #[test]
    fn id_fallback_cannot_collide_with_small_native_ids() {
        // A batch mixing a native id 1 with a fallback at ordinal 1 must still
        // produce two distinct ids.
        let native = id_or_ordinal(&json!({"id": 1}), "id", 0);
        let fallback = id_or_ordinal(&json!({}), "id", 1);
        assert_ne!(native, fallback);
    }
}
