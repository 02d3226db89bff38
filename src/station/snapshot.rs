//! Typed view over the provider's station list response.
//!
//! Only the fields the compact projection reads are modeled; everything else stays available
//! through the raw JSON kept alongside. Readings are kept as [`JsonValue`] because the provider
//! mixes numbers, strings, and booleans, and JSON `null` collapses to `None`.
//!
//! Device and module lists are filtered by their `type` before typing: entries the projection
//! never reads are skipped whatever their shape, and a `null` list reads as empty.

// crates.io
use serde::{
	Deserializer,
	de::{DeserializeOwned, Error as DeError},
};
// self
use crate::{_prelude::*, station::SnapshotParseError};

/// Free-form reading set attached to a station or module.
pub type DashboardData = JsonMap<String, JsonValue>;

/// Provider response body for the station list request.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StationSnapshot {
	/// Response envelope.
	pub body: SnapshotBody,
}
impl StationSnapshot {
	/// Reads a snapshot out of an already-parsed JSON document.
	pub fn from_value(raw: &JsonValue) -> Result<Self, SnapshotParseError> {
		serde_path_to_error::deserialize(raw)
	}
}

/// Envelope holding the device list.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SnapshotBody {
	/// Main stations in provider order; other device types are dropped.
	#[serde(default, deserialize_with = "typed_entries")]
	pub devices: Vec<Device>,
}

/// One main station (`NAMain`).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Device {
	/// Whether the station currently reports.
	#[serde(default)]
	pub reachable: Option<JsonValue>,
	/// User-chosen station name.
	#[serde(default)]
	pub station_name: Option<JsonValue>,
	/// Timestamp of the last stored measurement.
	#[serde(default)]
	pub last_status_store: Option<JsonValue>,
	/// Current indoor readings.
	#[serde(default)]
	pub dashboard_data: Option<DashboardData>,
	/// Summarized modules in provider order; wind gauges and unknown types are dropped.
	#[serde(default, deserialize_with = "typed_entries")]
	pub modules: Vec<Module>,
}
impl Typed for Device {
	const TYPES: &'static [&'static str] = &["NAMain"];
}

/// Module type discriminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum ModuleKind {
	/// Outdoor temperature/humidity sensor.
	#[serde(rename = "NAModule1")]
	Outdoor,
	/// Rain gauge.
	#[serde(rename = "NAModule3")]
	Rain,
	/// Additional indoor CO2/comfort module.
	#[serde(rename = "NAModule4")]
	Comfort,
}

/// One module attached to a station.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Module {
	/// Type discriminator.
	#[serde(rename = "type")]
	pub kind: ModuleKind,
	/// User-chosen module name.
	#[serde(default)]
	pub module_name: Option<JsonValue>,
	/// Measurement types the module reports.
	#[serde(default)]
	pub data_type: Option<JsonValue>,
	/// Whether the module currently reports.
	#[serde(default)]
	pub reachable: Option<JsonValue>,
	/// Battery level in percent.
	#[serde(default)]
	pub battery_percent: Option<JsonValue>,
	/// Radio signal quality.
	#[serde(default)]
	pub rf_status: Option<JsonValue>,
	/// Current readings.
	#[serde(default)]
	pub dashboard_data: Option<DashboardData>,
}
impl Typed for Module {
	const TYPES: &'static [&'static str] = &["NAModule1", "NAModule3", "NAModule4"];
}

/// Entries selected by their `type` field.
trait Typed {
	const TYPES: &'static [&'static str];
}

enum Entry<T> {
	Kept(T),
	Skipped,
}
impl<'de, T> Deserialize<'de> for Entry<T>
where
	T: Typed + DeserializeOwned,
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let value = JsonValue::deserialize(deserializer)?;
		let kept = value
			.get("type")
			.and_then(JsonValue::as_str)
			.is_some_and(|kind| T::TYPES.contains(&kind));

		if !kept {
			return Ok(Self::Skipped);
		}

		T::deserialize(value).map(Self::Kept).map_err(D::Error::custom)
	}
}

fn typed_entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
	D: Deserializer<'de>,
	T: Typed + DeserializeOwned,
{
	let entries = <Option<Vec<Entry<T>>>>::deserialize(deserializer)?.unwrap_or_default();

	Ok(entries
		.into_iter()
		.filter_map(|entry| match entry {
			Entry::Kept(item) => Some(item),
			Entry::Skipped => None,
		})
		.collect())
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn entries_outside_the_projection_are_skipped_whatever_their_shape() {
		let raw = json!({
			"body": {
				"devices": [
					{ "type": "NAPlug", "dashboard_data": [], "modules": "none" },
					{
						"type": "NAMain",
						"station_name": null,
						"modules": [
							{ "type": "NAModule2", "dashboard_data": "n/a" },
							{ "type": "NAModule1", "battery_percent": 80 },
							{ "module_name": "untyped" },
							42,
						],
					},
					"garbage",
				],
			},
		});
		let snapshot = StationSnapshot::from_value(&raw).expect("Snapshot should parse.");

		assert_eq!(snapshot.body.devices.len(), 1);

		let device = &snapshot.body.devices[0];

		assert_eq!(device.station_name, None);
		assert_eq!(device.modules.len(), 1);
		assert_eq!(device.modules[0].kind, ModuleKind::Outdoor);
		assert_eq!(device.modules[0].battery_percent, Some(json!(80)));
	}

	#[test]
	fn null_lists_read_as_empty() {
		let snapshot = StationSnapshot::from_value(&json!({
			"body": { "devices": [{ "type": "NAMain", "modules": null }] },
		}))
		.expect("Null module list should parse.");

		assert!(snapshot.body.devices[0].modules.is_empty());

		let snapshot = StationSnapshot::from_value(&json!({ "body": { "devices": null } }))
			.expect("Null device list should parse.");

		assert!(snapshot.body.devices.is_empty());
	}

	#[test]
	fn parse_errors_report_the_offending_entry() {
		let raw = json!({
			"body": { "devices": [{ "type": "NAMain", "dashboard_data": "broken" }] },
		});
		let err = StationSnapshot::from_value(&raw).expect_err("Non-object readings must fail.");

		assert_eq!(err.path().to_string(), "body.devices[0]");
		assert!(err.inner().to_string().contains("expected a map"), "Unexpected error: {err}");

		let err = StationSnapshot::from_value(&json!({ "body": { "devices": {} } }))
			.expect_err("A device map is not a device list.");

		assert_eq!(err.path().to_string(), "body.devices");
	}
}
