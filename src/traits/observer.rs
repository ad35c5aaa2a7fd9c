use crate::errors::BrokerError;
use crate::observability::messages::dispatch::SecondaryCallFailed;
use crate::observability::messages::StructuredLog;

/// Side channel for failures of calls whose outcome never reaches the client.
///
/// The dispatcher reports the post-authentication log call here instead of
/// discarding its error.
pub trait SecondaryCallObserver: Send + Sync {
    fn secondary_call_failed(&self, name: &str, error: &BrokerError);
}

/// Default observer: emits a structured `warn!` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SecondaryCallObserver for TracingObserver {
    fn secondary_call_failed(&self, name: &str, error: &BrokerError) {
        SecondaryCallFailed { name, error }.log();
    }
}
