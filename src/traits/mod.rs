pub mod backend;
pub mod observer;

pub use backend::{AuthBackend, AuthOutcome, LogBackend, AUTHENTICATED_RESULT};
pub use observer::{SecondaryCallObserver, TracingObserver};
