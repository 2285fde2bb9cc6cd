// self
use crate::obs::{CallKind, CallOutcome};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(kind: CallKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"auth_sidecar_call_total",
			"call" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records the status class of a sidecar response, so rejections (`4xx`) and sidecar faults
/// (`5xx`) can be told apart from transport failures, which never reach this counter.
pub fn record_sidecar_status(kind: CallKind, status: u16) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"auth_sidecar_response_total",
			"call" => kind.as_str(),
			"status_class" => status_class(status)
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, status);
	}
}

/// Buckets an HTTP status into a low-cardinality label.
pub const fn status_class(status: u16) -> &'static str {
	match status {
		100..=199 => "1xx",
		200..=299 => "2xx",
		300..=399 => "3xx",
		400..=499 => "4xx",
		500..=599 => "5xx",
		_ => "other",
	}
}
