//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **http**: reqwest-backed client for the platform REST API, including the
//!   remote error log and fire-and-forget metrics
//! - **fixture**: in-memory demo API steered by mock parameters
//! - **processing**: chronological preprocessing of merged patient data
//! - **metrics**: metrics sink that writes events to the tracing log
//! - **effects**: view effects with a fixed transition delay
//!
//! Adapters translate between domain types and wire representations. They
//! contain no screen logic.

pub mod effects;
pub mod fixture;
pub mod http;
pub mod metrics;
pub mod processing;
