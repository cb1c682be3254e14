//! Mock parameters steering the fixture API.
//!
//! Recognised keys:
//! - `auth.skip`: start with an open session.
//! - `api.delay=<ms>`: delay every call.
//! - `api.<operation>.error=<status>`: fail one operation with `status`,
//!   for example `api.patient.get.error=404`.

use std::time::Duration;

use querystring::QueryParams;

/// Typed view over the merged mock parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockParams(QueryParams);

impl MockParams {
    /// Wrap already merged parameters.
    pub fn new(params: QueryParams) -> Self {
        Self(params)
    }

    /// Parse a query string such as `auth.skip&api.delay=200`.
    pub fn parse(query: &str) -> Self {
        Self(QueryParams::parse(query))
    }

    /// Whether the fixture starts signed in.
    pub fn skip_auth(&self) -> bool {
        self.0.flag("auth.skip")
    }

    /// Artificial latency applied to every call.
    pub fn delay(&self) -> Option<Duration> {
        self.0
            .get_u64("api.delay")
            .filter(|millis| *millis > 0)
            .map(Duration::from_millis)
    }

    /// Status code `operation` should fail with, if any.
    ///
    /// Values outside the HTTP error range are ignored.
    pub fn failure_for(&self, operation: &str) -> Option<u16> {
        self.0
            .get_u64(&format!("api.{operation}.error"))
            .and_then(|status| u16::try_from(status).ok())
            .filter(|status| (400..600).contains(status))
    }

    /// The underlying parameters.
    pub fn params(&self) -> &QueryParams {
        &self.0
    }
}

impl From<QueryParams> for MockParams {
    fn from(params: QueryParams) -> Self {
        Self::new(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", false, None)]
    #[case("auth.skip", true, None)]
    #[case("auth.skip=false&api.delay=250", false, Some(Duration::from_millis(250)))]
    #[case("api.delay=0", false, None)]
    fn reads_session_and_delay(
        #[case] query: &str,
        #[case] skip_auth: bool,
        #[case] delay: Option<Duration>,
    ) {
        let params = MockParams::parse(query);
        assert_eq!(params.skip_auth(), skip_auth);
        assert_eq!(params.delay(), delay);
    }

    #[rstest]
    #[case("api.patient.get.error=404", "patient.get", Some(404))]
    #[case("api.patient.get.error=404", "patient.getall", None)]
    #[case("api.user.get.error=200", "user.get", None)]
    #[case("api.user.get.error=oops", "user.get", None)]
    #[case("api.user.get.error=70000", "user.get", None)]
    fn reads_per_operation_failures(
        #[case] query: &str,
        #[case] operation: &str,
        #[case] expected: Option<u16>,
    ) {
        assert_eq!(MockParams::parse(query).failure_for(operation), expected);
    }
}
