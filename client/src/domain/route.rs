//! Client-side route table.
//!
//! Paths are parsed into a typed [`Route`] once, so handler selection is an
//! exhaustive `match` rather than a string lookup.

use std::fmt;

use serde::Serialize;

use crate::domain::patient::PatientId;

/// Errors raised while parsing a route path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteParseError {
    /// No route pattern matches the path.
    #[error("no route matches {path}")]
    Unknown {
        /// Path that was parsed.
        path: String,
    },
    /// A `:id` segment was not a valid patient identifier.
    #[error("invalid patient id in {path}")]
    InvalidPatientId {
        /// Path that was parsed.
        path: String,
    },
}

/// Every screen the application can show.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "route", content = "patientId", rename_all = "snake_case")]
pub enum Route {
    /// `/`
    Root,
    /// `/login`
    Login,
    /// `/signup`
    Signup,
    /// `/profile`
    Profile,
    /// `/patients`
    Patients,
    /// `/patients/new`
    PatientNew,
    /// `/patients/:id`
    Patient(PatientId),
    /// `/patients/:id/edit`
    PatientEdit(PatientId),
    /// `/patients/:id/data`
    PatientData(PatientId),
}

impl Route {
    /// Parse a path such as `/patients/abc123/data`.
    ///
    /// Query strings, fragments markers and trailing slashes are ignored.
    pub fn parse(path: &str) -> Result<Self, RouteParseError> {
        let path_only = path
            .trim_start_matches('#')
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let segments: Vec<&str> = path_only.split('/').filter(|s| !s.is_empty()).collect();

        let patient_id = |raw: &str| {
            PatientId::new(raw).map_err(|_| RouteParseError::InvalidPatientId {
                path: path.to_owned(),
            })
        };

        match segments.as_slice() {
            [] => Ok(Self::Root),
            ["login"] => Ok(Self::Login),
            ["signup"] => Ok(Self::Signup),
            ["profile"] => Ok(Self::Profile),
            ["patients"] => Ok(Self::Patients),
            ["patients", "new"] => Ok(Self::PatientNew),
            ["patients", id] => patient_id(id).map(Self::Patient),
            ["patients", id, "edit"] => patient_id(id).map(Self::PatientEdit),
            ["patients", id, "data"] => patient_id(id).map(Self::PatientData),
            _ => Err(RouteParseError::Unknown {
                path: path.to_owned(),
            }),
        }
    }

    /// Canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Self::Root => "/".to_owned(),
            Self::Login => "/login".to_owned(),
            Self::Signup => "/signup".to_owned(),
            Self::Profile => "/profile".to_owned(),
            Self::Patients => "/patients".to_owned(),
            Self::PatientNew => "/patients/new".to_owned(),
            Self::Patient(id) => format!("/patients/{id}"),
            Self::PatientEdit(id) => format!("/patients/{id}/edit"),
            Self::PatientData(id) => format!("/patients/{id}/data"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Page tag used for view selection and telemetry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Page {
    /// `login`
    Login,
    /// `signup`
    Signup,
    /// `profile`
    Profile,
    /// `patients`
    Patients,
    /// `patients/new`
    PatientNew,
    /// `patients/{id}`
    Patient(PatientId),
    /// `patients/{id}/edit`
    PatientEdit(PatientId),
    /// `patients/{id}/data`
    PatientData(PatientId),
}

impl Page {
    /// Whether the page is one of the `patients/...` pages, which show the
    /// patient name in the navbar.
    pub fn is_patient_scoped(&self) -> bool {
        matches!(
            self,
            Self::PatientNew | Self::Patient(_) | Self::PatientEdit(_) | Self::PatientData(_)
        )
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => f.write_str("login"),
            Self::Signup => f.write_str("signup"),
            Self::Profile => f.write_str("profile"),
            Self::Patients => f.write_str("patients"),
            Self::PatientNew => f.write_str("patients/new"),
            Self::Patient(id) => write!(f, "patients/{id}"),
            Self::PatientEdit(id) => write!(f, "patients/{id}/edit"),
            Self::PatientData(id) => write!(f, "patients/{id}/data"),
        }
    }
}

impl From<Page> for String {
    fn from(value: Page) -> Self {
        value.to_string()
    }
}

/// Authentication gating for the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePolicy {
    no_auth_routes: Vec<Route>,
    default_not_authenticated: Route,
    default_authenticated: Route,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self {
            no_auth_routes: vec![Route::Login, Route::Signup],
            default_not_authenticated: Route::Login,
            default_authenticated: Route::Patients,
        }
    }
}

impl RoutePolicy {
    /// Policy with custom defaults and the standard no-auth routes.
    pub fn new(default_not_authenticated: Route, default_authenticated: Route) -> Self {
        Self {
            default_not_authenticated,
            default_authenticated,
            ..Self::default()
        }
    }

    /// Landing route for the given auth state.
    pub fn default_route(&self, authenticated: bool) -> &Route {
        if authenticated {
            &self.default_authenticated
        } else {
            &self.default_not_authenticated
        }
    }

    /// Whether the route is reserved for signed-out users.
    pub fn is_no_auth(&self, route: &Route) -> bool {
        self.no_auth_routes.contains(route)
    }

    /// Where the user should go instead of `route`, if anywhere.
    ///
    /// Signed-out users are sent away from protected routes and signed-in
    /// users away from the login/signup screens. `/` is open to both; its
    /// handler redirects.
    pub fn redirect_for(&self, route: &Route, authenticated: bool) -> Option<Route> {
        if *route == Route::Root {
            return None;
        }
        let no_auth = self.is_no_auth(route);
        match (authenticated, no_auth) {
            (false, false) => Some(self.default_not_authenticated.clone()),
            (true, true) => Some(self.default_authenticated.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn id() -> PatientId {
        PatientId::new("abc123").expect("valid id")
    }

    #[rstest]
    #[case("/", Route::Root)]
    #[case("", Route::Root)]
    #[case("/login", Route::Login)]
    #[case("#/signup", Route::Signup)]
    #[case("/profile/", Route::Profile)]
    #[case("/patients?x=1", Route::Patients)]
    #[case("/patients/new", Route::PatientNew)]
    #[case("/patients/abc123", Route::Patient(id()))]
    #[case("/patients/abc123/edit", Route::PatientEdit(id()))]
    #[case("/patients/abc123/data", Route::PatientData(id()))]
    fn parses_route_table(#[case] path: &str, #[case] expected: Route) {
        assert_eq!(Route::parse(path), Ok(expected));
    }

    #[rstest]
    #[case("/nope")]
    #[case("/patients/abc123/unknown")]
    fn rejects_unknown_paths(#[case] path: &str) {
        assert!(matches!(
            Route::parse(path),
            Err(RouteParseError::Unknown { .. })
        ));
    }

    #[rstest]
    fn path_round_trips() {
        for route in [
            Route::Root,
            Route::Login,
            Route::PatientNew,
            Route::PatientData(id()),
        ] {
            assert_eq!(Route::parse(&route.path()), Ok(route));
        }
    }

    #[rstest]
    #[case(Page::Patients, "patients", false)]
    #[case(Page::PatientNew, "patients/new", true)]
    #[case(Page::PatientEdit(id()), "patients/abc123/edit", true)]
    #[case(Page::Profile, "profile", false)]
    fn page_tags(#[case] page: Page, #[case] tag: &str, #[case] scoped: bool) {
        assert_eq!(page.to_string(), tag);
        assert_eq!(page.is_patient_scoped(), scoped);
    }

    #[rstest]
    #[case(Route::Patients, false, Some(Route::Login))]
    #[case(Route::Login, false, None)]
    #[case(Route::Login, true, Some(Route::Patients))]
    #[case(Route::Signup, true, Some(Route::Patients))]
    #[case(Route::Profile, true, None)]
    #[case(Route::Root, false, None)]
    fn gates_routes_by_auth_state(
        #[case] route: Route,
        #[case] authenticated: bool,
        #[case] expected: Option<Route>,
    ) {
        let policy = RoutePolicy::default();
        assert_eq!(policy.redirect_for(&route, authenticated), expected);
    }
}
