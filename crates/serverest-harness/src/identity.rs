// crates/serverest-harness/src/identity.rs
// ============================================================================
// Module: Identity Generator
// Description: Collision-free natural keys for ephemeral test fixtures.
// Purpose: Guarantee unique emails and names within a process lifetime.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Fixture identities combine a coarse millisecond timestamp with a
//! process-wide monotonic counter, so identities stay distinct even when
//! many fixtures are minted within the same clock tick. A timestamp-only
//! strategy is a known collision mode and is deliberately avoided.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

// ============================================================================
// SECTION: State
// ============================================================================

/// Process-wide monotonic sequence for identity tokens.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Returns the current wall clock in milliseconds since the epoch.
fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

/// Returns the next process-unique identity token.
fn next_token() -> String {
    let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{}-{sequence:05}", now_millis())
}

// ============================================================================
// SECTION: Generators
// ============================================================================

/// Returns a process-unique identity with the given prefix.
#[must_use]
pub fn next_identity(prefix: &str) -> String {
    format!("{prefix}-{}", next_token())
}

/// Returns a process-unique email address under the `qa.test` domain.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}.{}@qa.test", next_token())
}

/// Returns a process-unique human-readable fixture name.
#[must_use]
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix} {}", next_token())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
