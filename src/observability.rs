use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("wildcat.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("wildcat.client.request_errors");
pub(crate) static CLIENT_REQUEST_RETRIES: Counter = Counter::new("wildcat.client.retries");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("wildcat.client.request_duration_seconds");

pub(crate) static AUTH_REFRESHES: Counter = Counter::new("wildcat.auth.refreshes");
pub(crate) static AUTH_REFRESHES_COALESCED: Counter =
    Counter::new("wildcat.auth.refreshes_coalesced");
pub(crate) static AUTH_REFRESH_FAILURES: Counter = Counter::new("wildcat.auth.refresh_failures");
pub(crate) static AUTH_CREDENTIALS_CLEARED: Counter =
    Counter::new("wildcat.auth.credentials_cleared");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_counter(&CLIENT_REQUEST_RETRIES);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&AUTH_REFRESHES);
    collector.register_counter(&AUTH_REFRESHES_COALESCED);
    collector.register_counter(&AUTH_REFRESH_FAILURES);
    collector.register_counter(&AUTH_CREDENTIALS_CLEARED);
}
