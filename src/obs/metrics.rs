// self
use crate::{
	_prelude::*,
	obs::{FlowKind, FlowOutcome},
};

/// Increments `netatmo_dashboard_flow_total{flow, outcome}` when the `metrics` feature is on.
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!(
		"netatmo_dashboard_flow_total",
		"flow" => kind.as_str(),
		"outcome" => outcome.as_str()
	)
	.increment(1);

	#[cfg(not(feature = "metrics"))]
	let _ = (kind, outcome);
}

/// Records the wall time of a finished flow in
/// `netatmo_dashboard_flow_duration_seconds{flow, outcome}`.
pub fn record_flow_duration(kind: FlowKind, outcome: FlowOutcome, elapsed: StdDuration) {
	#[cfg(feature = "metrics")]
	metrics::histogram!(
		"netatmo_dashboard_flow_duration_seconds",
		"flow" => kind.as_str(),
		"outcome" => outcome.as_str()
	)
	.record(elapsed.as_secs_f64());

	#[cfg(not(feature = "metrics"))]
	let _ = (kind, outcome, elapsed);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recording_without_a_recorder_is_a_noop() {
		record_flow_outcome(FlowKind::StationData, FlowOutcome::Failure);
		record_flow_duration(FlowKind::Refresh, FlowOutcome::Success, StdDuration::from_millis(12));
	}
}
