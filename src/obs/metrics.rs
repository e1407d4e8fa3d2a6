// self
use crate::obs::{FlowKind, FlowOutcome};

/// Records a flow outcome via the global metrics recorder (when enabled).
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"artikcloud_oauth2_flow_total",
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn every_flow_records_all_outcomes() {
		for kind in [
			FlowKind::AuthorizationCode,
			FlowKind::Implicit,
			FlowKind::ClientCredentials,
			FlowKind::Refresh,
			FlowKind::Profile,
		] {
			for outcome in [FlowOutcome::Attempt, FlowOutcome::Success, FlowOutcome::Failure] {
				record_flow_outcome(kind, outcome);
			}

			assert!(kind.as_str().chars().all(|c| c.is_ascii_lowercase() || c == '_'));
		}
	}
}
