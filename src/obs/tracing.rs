// std
use std::time::Instant;
// self
use crate::{
	_prelude::*,
	obs::{self, FlowKind, FlowOutcome},
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// Span around one provider round-trip (`netatmo_dashboard.flow`, fields `flow` and `stage`).
#[derive(Clone, Debug)]
pub struct FlowSpan {
	kind: FlowKind,
	stage: &'static str,
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Opens a span for `kind` at call site `stage`.
	pub fn new(kind: FlowKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("netatmo_dashboard.flow", flow = kind.as_str(), stage);

			Self { kind, stage, span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			Self { kind, stage }
		}
	}

	/// Flow this span belongs to.
	pub fn kind(&self) -> FlowKind {
		self.kind
	}

	/// Instruments a future without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}

	/// Runs `fut` inside the span and reports it.
	///
	/// Records the attempt, then the terminal outcome and elapsed time through
	/// [`obs::record_flow_outcome`] and [`obs::record_flow_duration`]. Failures are also logged
	/// at `warn` inside the span.
	pub async fn observe<Fut, T, E>(self, fut: Fut) -> Result<T, E>
	where
		Fut: Future<Output = Result<T, E>>,
		E: Display,
	{
		obs::record_flow_outcome(self.kind, FlowOutcome::Attempt);

		let started = Instant::now();
		let result = self.instrument(fut).await;
		let outcome = FlowOutcome::of(&result);

		obs::record_flow_outcome(self.kind, outcome);
		obs::record_flow_duration(self.kind, outcome, started.elapsed());

		if let Err(error) = &result {
			self.report_failure(error);
		}

		result
	}

	fn report_failure(&self, error: &dyn Display) {
		#[cfg(feature = "tracing")]
		self.span.in_scope(|| {
			tracing::warn!(flow = self.kind.as_str(), stage = self.stage, %error, "flow failed");
		});

		#[cfg(not(feature = "tracing"))]
		let _ = (self.stage, error);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn observe_passes_results_through() {
		let ok: Result<u8, String> =
			FlowSpan::new(FlowKind::Refresh, "observe_ok").observe(async { Ok(42) }).await;

		assert_eq!(ok, Ok(42));

		let err: Result<u8, String> = FlowSpan::new(FlowKind::StationData, "observe_err")
			.observe(async { Err("station offline".to_owned()) })
			.await;

		assert_eq!(err, Err("station offline".to_owned()));
	}

	#[test]
	fn span_remembers_its_flow() {
		assert_eq!(FlowSpan::new(FlowKind::StationData, "kind").kind(), FlowKind::StationData);
	}
}
