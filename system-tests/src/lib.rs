// system-tests/src/lib.rs
// ============================================================================
// Module: Conformance System Tests Library
// Description: Shared configuration and helpers for conformance scenarios.
// Purpose: Provide common utilities for the system-test binaries.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This crate hosts shared run-level configuration used by the conformance
//! system-test binaries in `system-tests/tests`. Scenario building blocks
//! (commands, fixtures, oracle) live in `serverest-harness`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
