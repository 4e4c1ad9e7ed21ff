// system-tests/src/config/mod.rs
// ============================================================================
// Module: System Test Configuration
// Description: Centralized run-level configuration for conformance tests.
// Purpose: Provide typed access to test environment settings and defaults.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Run-level settings (artifact run root, timeout floor) are read from
//! environment variables and mapped into a small typed structure for reuse
//! across test helpers. API-level settings (base URL, seed admin) belong to
//! `serverest_harness::config`.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::SystemTestConfig;
pub use env::SystemTestEnv;
