//! Lenient decoding of raw script records.
//!
//! Script files in the wild are hand-edited: ids go missing, night orders
//! arrive as strings, and bare role-id strings are mixed in with records.
//! Decoding never fails; whatever cannot be understood is dropped.

use grimoire_core::role::{ScriptEntry, Team};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A script record before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub ability: Option<String>,
    #[serde(default, deserialize_with = "lenient_order")]
    pub first_night: f64,
    #[serde(default, deserialize_with = "lenient_order")]
    pub other_night: f64,
}

impl RawEntry {
    /// Decodes a raw JSON value; non-objects and type mismatches yield `None`.
    pub(crate) fn decode(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        Self::deserialize(value).ok()
    }

    /// Converts into a `ScriptEntry`, requiring a non-empty `id` and `team`.
    pub(crate) fn into_entry(self) -> Option<ScriptEntry> {
        let id = self.id.filter(|id| !id.is_empty())?;
        let team = self.team.filter(|team| !team.is_empty())?;
        let team = Team::deserialize(Value::String(team)).unwrap_or(Team::Unknown);
        Some(ScriptEntry {
            name: self.name.unwrap_or_else(|| id.clone()),
            id,
            team,
            ability: self.ability.unwrap_or_default(),
            first_night: self.first_night,
            other_night: self.other_night,
        })
    }
}

/// Accepts numbers and numeric strings; everything else reads as `0`.
fn lenient_order<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let order = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if order.is_finite() { order } else { 0.0 })
}
