//! Port for shipping client-side failures to the backend log.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised while shipping a failure report.
    pub enum ErrorLogError {
        /// The report could not be delivered.
        Delivery { message: String } => "error report delivery failed: {message}",
    }
}

/// Remote error log.
#[async_trait]
pub trait ErrorLog: Send + Sync {
    /// Record a serialised error with a short description of where it
    /// happened.
    async fn log(&self, error: String, context: &str) -> Result<(), ErrorLogError>;
}
