// crates/serverest-harness/src/oracle.rs
// ============================================================================
// Module: Response Oracle
// Description: Outcome-class validation for API response descriptors.
// Purpose: Centralize tolerant-but-precise assertions in one auditable place.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! The oracle asserts an outcome class ("created", "unauthorized", "not
//! found", "validation error on field X") against a response descriptor.
//! The remote API is externally owned and versions independently of this
//! suite, so the oracle tolerates declared variance such as status-code
//! sets, substring message matching, and alternate candidate field
//! locations, while failing loudly when no declared variant matches. The
//! tolerance policy lives here, never inline in scenario bodies.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

use crate::transport::ApiResponse;

// ============================================================================
// SECTION: Contract Messages
// ============================================================================

/// Documented contract strings pinned by scenarios.
pub mod messages {
    /// Successful resource creation.
    pub const CREATED: &str = "Cadastro realizado com sucesso";
    /// Successful resource update.
    pub const UPDATED: &str = "Registro alterado com sucesso";
    /// Successful resource deletion.
    pub const DELETED: &str = "Registro excluído com sucesso";
    /// Deletion matched no stored resource.
    pub const NOTHING_DELETED: &str = "Nenhum registro excluído";
    /// Duplicate account email rejection.
    pub const DUPLICATE_EMAIL: &str = "Este email já está sendo usado";
    /// Duplicate catalog item name rejection.
    pub const DUPLICATE_ITEM: &str = "Já existe produto com esse nome";
    /// Successful authentication.
    pub const LOGIN_OK: &str = "Login realizado com sucesso";
    /// Rejected authentication.
    pub const LOGIN_REJECTED: &str = "Email e/ou senha inválidos";
    /// Canonical unauthorized message for the absent-credential condition.
    pub const UNAUTHORIZED_CANONICAL: &str =
        "Token de acesso ausente, inválido, expirado ou usuário do token não existe mais";
    /// Unauthorized message fragment tolerated for degraded credentials.
    pub const UNAUTHORIZED_FRAGMENT: &str = "Token de acesso ausente";
    /// Catalog mutation attempted without admin rights.
    pub const ADMIN_ONLY: &str = "Rota exclusiva para administradores";
    /// Fragment shared by all fetch-by-identifier misses.
    pub const NOT_FOUND_FRAGMENT: &str = "não encontrado";
    /// Terminal cart operation found no cart for the credential.
    pub const NO_CART_FOR_USER: &str = "Não foi encontrado carrinho para esse usuário";
    /// Cart line exceeds available stock.
    pub const INSUFFICIENT_STOCK: &str = "Produto não possui quantidade suficiente";
}

// ============================================================================
// SECTION: Matching Policy
// ============================================================================

/// Message matching mode.
///
/// Exact equality pins a documented contract string; substring containment
/// asserts only that a class of error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageMatch {
    /// Full-string equality against a pinned contract message.
    Exact(String),
    /// Substring containment for wording-tolerant classes.
    Contains(String),
}

impl MessageMatch {
    /// Returns true when the actual message satisfies the match.
    #[must_use]
    pub fn matches(&self, actual: &str) -> bool {
        match self {
            Self::Exact(expected) => actual == expected,
            Self::Contains(fragment) => actual.contains(fragment.as_str()),
        }
    }

    /// Describes the expected message for diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Exact(expected) => format!("exactly '{expected}'"),
            Self::Contains(fragment) => format!("containing '{fragment}'"),
        }
    }
}

// ============================================================================
// SECTION: Expectation
// ============================================================================

/// Declared outcome class for one response.
///
/// # Invariants
/// - At least one acceptable status is always declared.
/// - Candidate message fields are consulted in priority order; the first
///   matching candidate satisfies the expectation, and a total miss fails
///   loudly rather than passing silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    /// Acceptable status codes.
    statuses: Vec<u16>,
    /// Optional message assertion.
    message: Option<MessageMatch>,
    /// Prioritized candidate body locations for the message.
    message_fields: Vec<String>,
    /// Body fields that must be present and non-null.
    required_fields: Vec<String>,
}

impl Expectation {
    /// Builds an expectation for a single exact status.
    #[must_use]
    pub fn status(code: u16) -> Self {
        Self {
            statuses: vec![code],
            message: None,
            message_fields: vec!["message".to_string(), "descricao".to_string()],
            required_fields: Vec::new(),
        }
    }

    /// Builds an expectation accepting any of the given statuses.
    ///
    /// Used for declared-ambiguous cases such as malformed query input the
    /// API may either ignore (200) or reject (400).
    #[must_use]
    pub fn statuses(codes: &[u16]) -> Self {
        let mut expectation = Self::status(codes.first().copied().unwrap_or(200));
        expectation.statuses = codes.to_vec();
        expectation
    }

    /// Outcome class: resource created with an issued identifier.
    #[must_use]
    pub fn created() -> Self {
        Self::status(201)
            .message_exact(messages::CREATED)
            .require_field("_id")
    }

    /// Outcome class: plain success.
    #[must_use]
    pub fn ok() -> Self {
        Self::status(200)
    }

    /// Outcome class: success pinned to a documented contract message.
    #[must_use]
    pub fn ok_message(expected: &str) -> Self {
        Self::status(200).message_exact(expected)
    }

    /// Outcome class: authentication succeeded with a usable token.
    #[must_use]
    pub fn login_ok() -> Self {
        Self::status(200)
            .message_exact(messages::LOGIN_OK)
            .require_field("authorization")
    }

    /// Outcome class: unauthorized, wording-tolerant.
    ///
    /// Used for the empty-string and malformed/expired credential
    /// conditions, which guarantee only the class, not the exact wording.
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::status(401).message_contains(messages::UNAUTHORIZED_FRAGMENT)
    }

    /// Outcome class: unauthorized with the canonical absent-token message.
    #[must_use]
    pub fn unauthorized_canonical() -> Self {
        Self::status(401).message_exact(messages::UNAUTHORIZED_CANONICAL)
    }

    /// Outcome class: authenticated but lacking admin rights.
    #[must_use]
    pub fn forbidden() -> Self {
        Self::status(403).message_exact(messages::ADMIN_ONLY)
    }

    /// Outcome class: fetch by a never-issued identifier.
    ///
    /// The API reports misses as 400 today; 404 is an accepted variant.
    #[must_use]
    pub fn not_found() -> Self {
        Self::statuses(&[400, 404]).message_contains(messages::NOT_FOUND_FRAGMENT)
    }

    /// Outcome class: uniqueness violation pinned to its contract message.
    #[must_use]
    pub fn duplicate(expected: &str) -> Self {
        Self::status(400).message_exact(expected)
    }

    /// Outcome class: validation error reported under a named body field.
    #[must_use]
    pub fn validation_error(field: &str, fragment: &str) -> Self {
        let mut expectation = Self::status(400).message_contains(fragment);
        expectation.message_fields = vec![field.to_string()];
        expectation
    }

    /// Pins the expected message to full-string equality.
    #[must_use]
    pub fn message_exact(mut self, expected: &str) -> Self {
        self.message = Some(MessageMatch::Exact(expected.to_string()));
        self
    }

    /// Relaxes the expected message to substring containment.
    #[must_use]
    pub fn message_contains(mut self, fragment: &str) -> Self {
        self.message = Some(MessageMatch::Contains(fragment.to_string()));
        self
    }

    /// Replaces the prioritized candidate locations for the message.
    #[must_use]
    pub fn message_fields(mut self, fields: &[&str]) -> Self {
        self.message_fields = fields.iter().map(ToString::to_string).collect();
        self
    }

    /// Requires a body field to be present and non-null.
    #[must_use]
    pub fn require_field(mut self, field: &str) -> Self {
        self.required_fields.push(field.to_string());
        self
    }

    /// Validates a response descriptor against this outcome class.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError`] recording both expected and actual when the
    /// status, message, or required fields do not match.
    pub fn verify(&self, response: &ApiResponse) -> Result<(), OracleError> {
        let actual_status = response.status.as_u16();
        if !self.statuses.contains(&actual_status) {
            return Err(OracleError::UnexpectedStatus {
                expected: describe_statuses(&self.statuses),
                actual: actual_status,
                body: response.body.clone(),
            });
        }

        if let Some(expected) = &self.message {
            self.verify_message(expected, response)?;
        }

        for field in &self.required_fields {
            let present =
                lookup(&response.body, field).is_some_and(|value| !value.is_null());
            if !present {
                return Err(OracleError::MissingField {
                    field: field.clone(),
                    body: response.body.clone(),
                });
            }
        }
        Ok(())
    }

    /// Checks the message against the prioritized candidate locations.
    fn verify_message(
        &self,
        expected: &MessageMatch,
        response: &ApiResponse,
    ) -> Result<(), OracleError> {
        let mut found: Vec<String> = Vec::new();
        for field in &self.message_fields {
            let Some(actual) = lookup(&response.body, field).and_then(Value::as_str) else {
                continue;
            };
            if expected.matches(actual) {
                return Ok(());
            }
            found.push(format!("{field}='{actual}'"));
        }
        if found.is_empty() {
            return Err(OracleError::MissingMessageField {
                candidates: self.message_fields.join(", "),
                body: response.body.clone(),
            });
        }
        Err(OracleError::MessageMismatch {
            expected: expected.describe(),
            actual: found.join("; "),
        })
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Assertion failures with both expected and actual recorded.
///
/// # Invariants
/// - Variants are stable for failure classification in reports.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The status code was outside the declared acceptable set.
    #[error("unexpected status {actual}: expected {expected}; body {body}")]
    UnexpectedStatus {
        /// Human-readable acceptable status set.
        expected: String,
        /// Actual status code.
        actual: u16,
        /// Actual response body.
        body: Value,
    },
    /// A message was found but matched no declared variant.
    #[error("message mismatch: expected {expected}; found {actual}")]
    MessageMismatch {
        /// Expected message description.
        expected: String,
        /// Messages found at the candidate locations.
        actual: String,
    },
    /// No candidate location carried a message at all.
    #[error("no message found under candidate fields [{candidates}]; body {body}")]
    MissingMessageField {
        /// The consulted candidate locations.
        candidates: String,
        /// Actual response body.
        body: Value,
    },
    /// A required body field was absent or null.
    #[error("required field '{field}' missing from body {body}")]
    MissingField {
        /// The missing field path.
        field: String,
        /// Actual response body.
        body: Value,
    },
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves a dotted path inside a JSON body.
fn lookup<'a>(body: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(body, |value, key| value.get(key))
}

/// Describes an acceptable status set for diagnostics.
fn describe_statuses(statuses: &[u16]) -> String {
    let rendered: Vec<String> = statuses.iter().map(ToString::to_string).collect();
    format!("one of [{}]", rendered.join(", "))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
