//! Station telemetry: the raw provider snapshot and its compact dashboard projection.

pub mod compact;
pub mod snapshot;

pub use compact::*;
pub use snapshot::*;

// self
use crate::_prelude::*;

/// Sentinel emitted in place of a reading the provider did not report.
pub const NOT_AVAILABLE: &str = "N.N.";

/// Parse failure for a station response body.
pub type SnapshotParseError = serde_path_to_error::Error<serde_json::Error>;

/// Payload emitted for one invocation: the compact view plus the untouched provider body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardPayload {
	/// Flattened per-role summary.
	pub compact: CompactSummary,
	/// Provider response exactly as received.
	pub detailed: JsonValue,
}
impl DashboardPayload {
	/// Validates `raw` as a station snapshot and builds both views from it.
	pub fn from_raw(raw: JsonValue) -> Result<Self, SnapshotParseError> {
		let snapshot = StationSnapshot::from_value(&raw)?;

		Ok(Self { compact: transform(&snapshot), detailed: raw })
	}
}

/// Message handed back to the host after a successful invocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardMessage {
	/// Compact and detailed station views.
	pub payload: DashboardPayload,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn payload_keeps_raw_body_verbatim() {
		let raw = serde_json::json!({
			"status": "ok",
			"time_server": 1_700_000_000,
			"body": { "devices": [], "user": { "mail": "someone@example.com" } },
		});
		let payload = DashboardPayload::from_raw(raw.clone()).expect("Snapshot should parse.");

		assert_eq!(payload.detailed, raw);
		assert_eq!(payload.compact, CompactSummary::default());
	}

	#[test]
	fn payload_rejects_bodies_without_device_list_container() {
		let err = DashboardPayload::from_raw(serde_json::json!({ "error": "nope" }))
			.expect_err("A body without `body` is not a snapshot.");

		assert_eq!(err.path().to_string(), ".");
	}

	#[test]
	fn ignored_entries_never_fail_the_payload() {
		let raw = serde_json::json!({
			"body": {
				"devices": [
					{ "type": "NAMain", "station_name": "Home", "modules": null },
					{ "type": "NAPlug", "dashboard_data": [] },
					{
						"type": "NAMain",
						"modules": [{ "type": "NAModule2", "dashboard_data": "n/a" }],
					},
				],
			},
		});
		let payload = DashboardPayload::from_raw(raw.clone())
			.expect("Devices and modules outside the summary must not fail parsing.");

		assert_eq!(payload.detailed, raw);
		assert!(payload.compact.modules.is_empty());
		assert_eq!(payload.compact.outdoor, OutdoorSummary::default());
	}

	#[test]
	fn message_serializes_under_payload() {
		let payload = DashboardPayload::from_raw(serde_json::json!({ "body": { "devices": [] } }))
			.expect("Snapshot should parse.");
		let value = serde_json::to_value(DashboardMessage { payload })
			.expect("Message should serialize.");

		assert_eq!(
			value,
			serde_json::json!({
				"payload": {
					"compact": { "outdoor": {}, "rain": {}, "modules": [] },
					"detailed": { "body": { "devices": [] } },
				}
			})
		);
	}
}
