// self
use crate::{_prelude::*, obs::CallKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by client operations.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the operation and the downstream API name (empty for
	/// `/Validate`).
	pub fn new(kind: CallKind, api: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("auth_sidecar.call", call = kind.as_str(), api);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, api);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
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
}

/// Emits a warning that certificate verification toward `base_url` is disabled.
pub fn warn_insecure_tls(base_url: &Url) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			base_url = base_url.as_str(),
			"TLS certificate verification is disabled; use only for local development."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = base_url;
	}
}

/// Emits a debug event once a call has been classified.
pub fn trace_call_status(kind: CallKind, status: Option<u16>) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(call = kind.as_str(), status, "Sidecar call completed.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, status);
	}
}
