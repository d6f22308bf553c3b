//! The parsed script: playable roles and night order.

use grimoire_core::context::Phase;
use grimoire_core::role::{META_ID, ScriptEntry, Team};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::raw::RawEntry;

/// Metadata carried by the script's `_meta` record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptMeta {
    /// Script name.
    #[serde(default)]
    pub name: Option<String>,
    /// Script author.
    #[serde(default)]
    pub author: Option<String>,
    /// Any other metadata fields, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The order in which roles wake on each kind of night.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NightOrder {
    /// Roles waking on the first night, ascending by `first_night`.
    pub first_night: Vec<ScriptEntry>,
    /// Roles waking on other nights, ascending by `other_night`.
    pub other_night: Vec<ScriptEntry>,
}

impl NightOrder {
    /// The wake sequence for `phase`. Nobody wakes during the day.
    #[must_use]
    pub fn for_phase(&self, phase: Phase) -> &[ScriptEntry] {
        match phase {
            Phase::FirstNight => &self.first_night,
            Phase::OtherNight => &self.other_night,
            Phase::Day => &[],
        }
    }
}

/// A parsed script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    /// Script metadata.
    pub meta: ScriptMeta,
    /// Playable roles in source order. Never contains travelers.
    pub roles: Vec<ScriptEntry>,
    /// Traveler roles in source order; listed in summaries only.
    pub travelers: Vec<ScriptEntry>,
    /// Night wake order derived from `roles`.
    pub night_order: NightOrder,
}

impl Script {
    /// Looks up a playable role by id.
    #[must_use]
    pub fn role(&self, id: &str) -> Option<&ScriptEntry> {
        self.roles.iter().find(|role| role.id == id)
    }

    /// Playable roles of `team`, in source order.
    pub fn roles_of(&self, team: Team) -> impl Iterator<Item = &ScriptEntry> {
        self.roles.iter().filter(move |role| role.team == team)
    }
}

/// Parses a raw role list into a [`Script`].
///
/// Parsing is permissive: records without an `id` or `team` are dropped
/// rather than reported. Night-order sequences keep only roles with a
/// positive order value and are stably sorted, so roles sharing a value keep
/// their source order.
#[must_use]
pub fn parse_script(raw: &[Value]) -> Script {
    let mut meta = ScriptMeta::default();
    let mut roles = Vec::new();
    let mut travelers = Vec::new();

    for (index, value) in raw.iter().enumerate() {
        if value.get("id").and_then(Value::as_str) == Some(META_ID) {
            meta = decode_meta(value);
            continue;
        }
        let Some(entry) = RawEntry::decode(value).and_then(RawEntry::into_entry) else {
            debug!(index, "dropping malformed script entry");
            continue;
        };
        if entry.is_traveler() {
            travelers.push(entry);
        } else {
            roles.push(entry);
        }
    }

    let night_order = NightOrder {
        first_night: ordered_by(&roles, |role| role.first_night),
        other_night: ordered_by(&roles, |role| role.other_night),
    };

    Script {
        meta,
        roles,
        travelers,
        night_order,
    }
}

fn decode_meta(value: &Value) -> ScriptMeta {
    let mut meta = ScriptMeta::deserialize(value).unwrap_or_default();
    meta.extra.remove("id");
    meta
}

fn ordered_by(roles: &[ScriptEntry], order: impl Fn(&ScriptEntry) -> f64) -> Vec<ScriptEntry> {
    let mut woken: Vec<ScriptEntry> = roles
        .iter()
        .filter(|role| order(*role) > 0.0)
        .cloned()
        .collect();
    woken.sort_by(|a, b| order(a).total_cmp(&order(b)));
    woken
}
