// crates.io
use serde_json::{Value, json};
// self
use netatmo_dashboard::station::{DashboardPayload, NOT_AVAILABLE, StationSnapshot, transform};

const FIXTURE: &str = include_str!("fixtures/getstationsdata.json");

fn fixture() -> Value {
	serde_json::from_str(FIXTURE).expect("Station fixture should be valid JSON.")
}

#[test]
fn realistic_snapshot_flattens_by_role() {
	let payload = DashboardPayload::from_raw(fixture()).expect("Fixture should be a snapshot.");
	let compact = serde_json::to_value(&payload.compact).expect("Summary should serialize.");

	assert_eq!(
		compact,
		json!({
			"reachable": true,
			"station_name": "Berlin (Flat)",
			"last_status_store": 1731240250,
			"temperature": 21.5,
			"temperatureTrend": "stable",
			"co2": 638,
			"humidity": 47,
			"noise": 36,
			"pressure": 1016.2,
			"pressureTrend": "down",
			"outdoor": {
				"reachable": true,
				"battery_percent": 64,
				"rf_status": 71,
				"temperature": 6.8,
				"humidity": 91,
				"temperatureTrend": "stable"
			},
			"rain": {
				"reachable": "false",
				"battery_percent": 12,
				"rf_status": 88,
				"rain": NOT_AVAILABLE,
				"sum_rain_24": NOT_AVAILABLE,
				"sum_rain_1": NOT_AVAILABLE
			},
			"modules": [
				{
					"name": "Bedroom",
					"data_type": ["Temperature", "CO2", "Humidity"],
					"battery_percent": 90,
					"rf_status": 55,
					"reachable": true,
					"dashboard_data": {
						"time_utc": 1731240200,
						"Temperature": 19.2,
						"CO2": 910,
						"Humidity": 52,
						"min_temp": 18.4,
						"max_temp": 19.9,
						"date_min_temp": 1731204000,
						"date_max_temp": 1731160800
					},
					"temperature": 19.2,
					"Humidity": 52,
					"CO2": 910,
					"min_temp": 18.4,
					"max_temp": 19.9,
					"date_min_temp": 1731204000,
					"date_max_temp": 1731160800
				},
				{
					"name": NOT_AVAILABLE,
					"data_type": [],
					"battery_percent": 0,
					"rf_status": 94,
					"reachable": "false",
					"dashboard_data": NOT_AVAILABLE,
					"temperature": NOT_AVAILABLE,
					"Humidity": NOT_AVAILABLE,
					"CO2": NOT_AVAILABLE,
					"min_temp": NOT_AVAILABLE,
					"max_temp": NOT_AVAILABLE,
					"date_min_temp": NOT_AVAILABLE,
					"date_max_temp": NOT_AVAILABLE
				}
			]
		})
	);
	assert_eq!(payload.detailed, fixture());
}

#[test]
fn transform_is_deterministic() {
	let snapshot = StationSnapshot::from_value(&fixture()).expect("Fixture should be a snapshot.");

	assert_eq!(transform(&snapshot), transform(&snapshot));
}
