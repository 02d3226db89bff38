// std
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
// self
use crate::{_prelude::*, auth::TokenSet};

/// Point-in-time copy of [`RefreshMetrics`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshCounts {
	/// Refreshes started, including ones that failed before reaching the provider.
	pub attempts: u64,
	/// Refreshes whose rotated token was cached and stored.
	pub successes: u64,
	/// Refreshes that failed at lookup, exchange, or persistence.
	pub failures: u64,
}

/// Per-dashboard refresh counters plus the instant of the last rotation.
#[derive(Debug, Default)]
pub struct RefreshMetrics {
	attempts: AtomicU64,
	successes: AtomicU64,
	failures: AtomicU64,
	// Unix seconds; zero until the first rotation.
	last_rotated: AtomicI64,
}
impl RefreshMetrics {
	/// Returns the current counters.
	pub fn counts(&self) -> RefreshCounts {
		RefreshCounts {
			attempts: self.attempts.load(Ordering::Relaxed),
			successes: self.successes.load(Ordering::Relaxed),
			failures: self.failures.load(Ordering::Relaxed),
		}
	}

	/// When the provider last issued a rotated token for this dashboard.
	pub fn last_rotated_at(&self) -> Option<OffsetDateTime> {
		match self.last_rotated.load(Ordering::Relaxed) {
			0 => None,
			secs => OffsetDateTime::from_unix_timestamp(secs).ok(),
		}
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_result<E>(&self, result: &Result<TokenSet, E>) {
		match result {
			Ok(tokens) => {
				self.successes.fetch_add(1, Ordering::Relaxed);
				self.last_rotated.fetch_max(tokens.issued_at.unix_timestamp(), Ordering::Relaxed);
			},
			Err(_) => {
				self.failures.fetch_add(1, Ordering::Relaxed);
			},
		}
	}
}
