// crates/serverest-harness/src/error.rs
// ============================================================================
// Module: Harness Error Taxonomy
// Description: Error classification for conformance scenarios.
// Purpose: Keep infrastructure, fixture, and assertion failures distinct.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Scenario failures fall into four classes that reporting must never
//! conflate: configuration problems, transport (infrastructure) failures,
//! fixture-chain failures where a prerequisite step returned an unexpected
//! response, and oracle (assertion) failures. Expected-failure responses are
//! not errors at all; they are values classified by the oracle.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::oracle::OracleError;
use crate::transport::ApiResponse;
use crate::transport::TransportError;

// ============================================================================
// SECTION: Error Types
// ============================================================================

/// Top-level harness error.
///
/// # Invariants
/// - Variants are stable for failure classification in reports.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Harness configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),
    /// The request could not complete; infrastructure, not a test verdict.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// A prerequisite fixture step unexpectedly failed; no further steps ran.
    #[error("fixture step '{step}' failed: {response}")]
    FixtureChain {
        /// Name of the fixture step that failed.
        step: String,
        /// The failing response descriptor, attached for diagnosis.
        response: ApiResponse,
    },
    /// The response did not match the expected outcome class.
    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl HarnessError {
    /// Builds a fixture-chain failure for a named step.
    #[must_use]
    pub fn fixture_step(step: &str, response: ApiResponse) -> Self {
        Self::FixtureChain {
            step: step.to_string(),
            response,
        }
    }

    /// Returns true when the failure is infrastructure rather than logic.
    #[must_use]
    pub const fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
