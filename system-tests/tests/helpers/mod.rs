// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for conformance system-tests.
// Purpose: Provide the API stub, readiness probes, and artifact utilities.
// Dependencies: system-tests, serverest-harness, axum, tokio
// ============================================================================

//! ## Overview
//! Shared helpers for conformance system-tests: an in-process stub of the
//! store API, spawn/readiness plumbing, artifact reporters, and timeout
//! resolution. Scenario building blocks live in `serverest-harness`.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod harness;
