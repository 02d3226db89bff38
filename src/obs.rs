//! Optional observability helpers for dashboard flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `netatmo_dashboard.flow` with the `flow`
//!   and `stage` (call site) fields, a `warn` event for every failed flow, and debug/warn
//!   events at credential hand-offs.
//! - Enable `metrics` to increment the `netatmo_dashboard_flow_total` counter for every
//!   attempt/success/failure and to record `netatmo_dashboard_flow_duration_seconds`, both
//!   labeled by `flow` + `outcome`.
//!
//! [`FlowSpan::observe`] wires both up around a single provider round-trip.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Provider round-trips observed by the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// `refresh_token` grant plus credential persistence.
	Refresh,
	/// Authenticated station list request.
	StationData,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Refresh => "refresh",
			FlowKind::StationData => "station_data",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a flow.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}

	/// Maps a flow result onto its terminal outcome.
	pub fn of<T, E>(result: &Result<T, E>) -> Self {
		match result {
			Ok(_) => FlowOutcome::Success,
			Err(_) => FlowOutcome::Failure,
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
