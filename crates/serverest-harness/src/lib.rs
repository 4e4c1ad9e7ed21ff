// crates/serverest-harness/src/lib.rs
// ============================================================================
// Module: ServeRest Harness Library
// Description: Core orchestration layer for ServeRest API conformance tests.
// Purpose: Provide command, fixture, and oracle building blocks for suites.
// Dependencies: reqwest, serde, serde_json, thiserror, tokio
// ============================================================================

//! ## Overview
//! This crate hosts the test orchestration core for the ServeRest
//! conformance suite: a command layer issuing one HTTP request per remote
//! capability, a fixture factory composing commands into valid prerequisite
//! chains, and a response oracle validating outcome classes with explicit,
//! auditable tolerance. The remote API is a black box under test; non-2xx
//! responses are values, never transport errors.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod commands;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod identity;
pub mod model;
pub mod oracle;
pub mod transport;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use commands::StoreClient;
pub use config::HarnessConfig;
pub use error::HarnessError;
pub use fixtures::FixtureFactory;
pub use fixtures::LineSpec;
pub use fixtures::Session;
pub use model::Credential;
pub use oracle::Expectation;
pub use transport::ApiResponse;
pub use transport::ApiTransport;
