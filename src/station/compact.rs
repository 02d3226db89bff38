//! Flattened station summary keyed by sensor role.
//!
//! Reading presence is a real absence check: a field that is missing, JSON `null`, or the
//! literal string `"undefined"` becomes [`NOT_AVAILABLE`]. A reading set that is missing as a
//! whole turns every field it would have fed into [`NOT_AVAILABLE`] as well.

// self
use crate::{
	_prelude::*,
	station::{
		NOT_AVAILABLE,
		snapshot::{DashboardData, Device, Module, ModuleKind, StationSnapshot},
	},
};

/// Compact view of the main station and its modules.
///
/// Top-level fields stay unset when the snapshot has no main station.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactSummary {
	/// Station reachability, or `"false"` when falsy.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub reachable: Option<JsonValue>,
	/// Station name, copied verbatim.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub station_name: Option<JsonValue>,
	/// Last measurement timestamp, copied verbatim.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub last_status_store: Option<JsonValue>,
	/// Indoor temperature.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub temperature: Option<JsonValue>,
	/// Indoor temperature trend.
	#[serde(rename = "temperatureTrend", skip_serializing_if = "Option::is_none")]
	pub temperature_trend: Option<JsonValue>,
	/// Indoor CO2 level.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub co2: Option<JsonValue>,
	/// Indoor humidity.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub humidity: Option<JsonValue>,
	/// Indoor noise level.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub noise: Option<JsonValue>,
	/// Barometric pressure.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pressure: Option<JsonValue>,
	/// Pressure trend.
	#[serde(rename = "pressureTrend", skip_serializing_if = "Option::is_none")]
	pub pressure_trend: Option<JsonValue>,
	/// Outdoor sensor summary; empty without an outdoor module.
	pub outdoor: OutdoorSummary,
	/// Rain gauge summary; empty without a rain gauge.
	pub rain: RainSummary,
	/// One entry per comfort module, in encounter order.
	pub modules: Vec<ModuleSummary>,
}

/// Outdoor temperature/humidity sensor summary.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutdoorSummary {
	/// Module reachability, or `"false"` when falsy.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub reachable: Option<JsonValue>,
	/// Battery level in percent.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub battery_percent: Option<JsonValue>,
	/// Radio signal quality.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub rf_status: Option<JsonValue>,
	/// Outdoor temperature.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub temperature: Option<JsonValue>,
	/// Outdoor humidity.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub humidity: Option<JsonValue>,
	/// Temperature trend taken from the enclosing station.
	#[serde(rename = "temperatureTrend", skip_serializing_if = "Option::is_none")]
	pub temperature_trend: Option<JsonValue>,
}

/// Rain gauge summary.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainSummary {
	/// Module reachability, or `"false"` when falsy.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub reachable: Option<JsonValue>,
	/// Battery level in percent.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub battery_percent: Option<JsonValue>,
	/// Radio signal quality.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub rf_status: Option<JsonValue>,
	/// Rain in the last measurement interval.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub rain: Option<JsonValue>,
	/// Rain over the last 24 hours.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sum_rain_24: Option<JsonValue>,
	/// Rain over the last hour.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sum_rain_1: Option<JsonValue>,
}

/// Comfort (CO2) module summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleSummary {
	/// Module name, or the sentinel when falsy.
	pub name: JsonValue,
	/// Reported measurement types, or the sentinel when falsy.
	pub data_type: JsonValue,
	/// Battery level in percent.
	pub battery_percent: JsonValue,
	/// Radio signal quality.
	pub rf_status: JsonValue,
	/// Module reachability, or `"false"` when falsy.
	pub reachable: JsonValue,
	/// Raw reading set, or the sentinel when missing.
	pub dashboard_data: JsonValue,
	/// Temperature.
	pub temperature: JsonValue,
	/// Humidity.
	#[serde(rename = "Humidity")]
	pub humidity: JsonValue,
	/// CO2 level.
	#[serde(rename = "CO2")]
	pub co2: JsonValue,
	/// Minimum temperature of the day.
	pub min_temp: JsonValue,
	/// Maximum temperature of the day.
	pub max_temp: JsonValue,
	/// Timestamp of the minimum temperature.
	pub date_min_temp: JsonValue,
	/// Timestamp of the maximum temperature.
	pub date_max_temp: JsonValue,
}

/// Builds the compact view from a snapshot.
///
/// Every main station in the device list is folded in order: scalar fields of a later station
/// overwrite earlier ones and comfort modules accumulate. Other device types are skipped, so a
/// snapshot without a main station yields [`CompactSummary::default`].
pub fn transform(snapshot: &StationSnapshot) -> CompactSummary {
	let mut summary = CompactSummary::default();

	for station in &snapshot.body.devices {
		apply_station(&mut summary, station);
	}

	summary
}

fn apply_station(summary: &mut CompactSummary, station: &Device) {
	summary.reachable = Some(or_false(station.reachable.as_ref()));
	summary.station_name = station.station_name.clone();
	summary.last_status_store = station.last_status_store.clone();

	let data = station.dashboard_data.as_ref();

	summary.temperature = Some(reading(data, "Temperature"));
	summary.temperature_trend = Some(reading(data, "temp_trend"));
	summary.co2 = Some(reading(data, "CO2"));
	summary.humidity = Some(reading(data, "Humidity"));
	summary.noise = Some(reading(data, "Noise"));
	summary.pressure = Some(reading(data, "Pressure"));
	summary.pressure_trend = Some(reading(data, "pressure_trend"));

	for module in &station.modules {
		match module.kind {
			ModuleKind::Outdoor => apply_outdoor(&mut summary.outdoor, module, station),
			ModuleKind::Rain => apply_rain(&mut summary.rain, module),
			ModuleKind::Comfort => summary.modules.push(comfort_summary(module)),
		}
	}
}

fn apply_outdoor(outdoor: &mut OutdoorSummary, module: &Module, station: &Device) {
	outdoor.reachable = Some(or_false(module.reachable.as_ref()));
	outdoor.battery_percent = Some(or_sentinel(module.battery_percent.as_ref()));
	outdoor.rf_status = Some(or_sentinel(module.rf_status.as_ref()));

	// Without module readings the trend is withheld too, even if the station has one.
	let (temperature, humidity, trend) = match module.dashboard_data.as_ref() {
		Some(data) => (
			reading(Some(data), "Temperature"),
			reading(Some(data), "Humidity"),
			reading(station.dashboard_data.as_ref(), "temp_trend"),
		),
		None => (sentinel(), sentinel(), sentinel()),
	};

	outdoor.temperature = Some(temperature);
	outdoor.humidity = Some(humidity);
	outdoor.temperature_trend = Some(trend);
}

fn apply_rain(rain: &mut RainSummary, module: &Module) {
	let data = module.dashboard_data.as_ref();

	rain.reachable = Some(or_false(module.reachable.as_ref()));
	rain.battery_percent = Some(or_sentinel(module.battery_percent.as_ref()));
	rain.rf_status = Some(or_sentinel(module.rf_status.as_ref()));
	rain.rain = Some(reading(data, "Rain"));
	rain.sum_rain_24 = Some(reading(data, "sum_rain_24"));
	rain.sum_rain_1 = Some(reading(data, "sum_rain_1"));
}

fn comfort_summary(module: &Module) -> ModuleSummary {
	let data = module.dashboard_data.as_ref();

	ModuleSummary {
		name: truthy_or_sentinel(module.module_name.as_ref()),
		data_type: truthy_or_sentinel(module.data_type.as_ref()),
		battery_percent: or_sentinel(module.battery_percent.as_ref()),
		rf_status: or_sentinel(module.rf_status.as_ref()),
		reachable: or_false(module.reachable.as_ref()),
		dashboard_data: data.map_or_else(sentinel, |d| JsonValue::Object(d.clone())),
		temperature: reading(data, "Temperature"),
		humidity: reading(data, "Humidity"),
		co2: reading(data, "CO2"),
		min_temp: reading(data, "min_temp"),
		max_temp: reading(data, "max_temp"),
		date_min_temp: reading(data, "date_min_temp"),
		date_max_temp: reading(data, "date_max_temp"),
	}
}

fn sentinel() -> JsonValue {
	JsonValue::String(NOT_AVAILABLE.into())
}

fn is_present(value: &JsonValue) -> bool {
	!matches!(value, JsonValue::Null) && value.as_str() != Some("undefined")
}

fn is_truthy(value: &JsonValue) -> bool {
	match value {
		JsonValue::Null => false,
		JsonValue::Bool(flag) => *flag,
		JsonValue::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
		JsonValue::String(s) => !s.is_empty(),
		JsonValue::Array(_) | JsonValue::Object(_) => true,
	}
}

fn or_sentinel(value: Option<&JsonValue>) -> JsonValue {
	value.filter(|v| is_present(v)).cloned().unwrap_or_else(sentinel)
}

fn truthy_or_sentinel(value: Option<&JsonValue>) -> JsonValue {
	value.filter(|v| is_truthy(v)).cloned().unwrap_or_else(sentinel)
}

fn or_false(value: Option<&JsonValue>) -> JsonValue {
	value.filter(|v| is_truthy(v)).cloned().unwrap_or_else(|| JsonValue::String("false".into()))
}

fn reading(data: Option<&DashboardData>, key: &str) -> JsonValue {
	or_sentinel(data.and_then(|d| d.get(key)))
}
