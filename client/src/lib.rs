//! State orchestration core for the diabetes data viewer.
//!
//! The controller owns routing, per-entity request state and notifications;
//! every backend call goes through a domain port implemented by the HTTP
//! adapter, the in-memory fixture API or a test mock.

pub mod config;
pub mod controller;
pub mod domain;
pub mod outbound;
pub mod wiring;

pub use controller::{AppController, AppPorts, ControllerOptions};
pub use wiring::{WiringError, build_ports};
