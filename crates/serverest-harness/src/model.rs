// crates/serverest-harness/src/model.rs
// ============================================================================
// Module: Fixture Data Model
// Description: Payloads and typed response views for the store API.
// Purpose: Carry the remote wire field names for ephemeral test fixtures.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Entities here are ephemeral test fixtures, not persisted domain objects;
//! the remote API is the system of record. Field names follow the remote
//! wire contract (`nome`, `preco`, `idProduto`, `precoTotal`, ...). Derived
//! cart totals appear only as response views: the harness verifies them and
//! never computes them from remote data.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Credential
// ============================================================================

/// Opaque bearer token bound to one account at authentication time.
///
/// # Invariants
/// - Sent verbatim as the `Authorization` header value.
/// - An empty credential is representable; it is a distinct test condition
///   from an absent credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a raw authorization token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns an empty-string credential for negative auth scenarios.
    #[must_use]
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// SECTION: Account
// ============================================================================

/// Writable account fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountPayload {
    /// Display name.
    pub nome: String,
    /// Unique natural key for the account.
    pub email: String,
    /// Plain-text password used for authentication.
    pub password: String,
    /// Admin flag carried as the wire strings `"true"` / `"false"`.
    pub administrador: String,
}

impl AccountPayload {
    /// Returns true when the payload carries the admin flag.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.administrador == "true"
    }
}

/// Stored account as returned by list and fetch operations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountRecord {
    /// Remote identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub nome: String,
    /// Unique natural key for the account.
    pub email: String,
    /// Admin flag as wire string.
    pub administrador: String,
}

/// List envelope for accounts.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountList {
    /// Number of matching accounts.
    pub quantidade: u64,
    /// Matching accounts.
    pub usuarios: Vec<AccountRecord>,
}

// ============================================================================
// SECTION: Catalog Item
// ============================================================================

/// Writable catalog item fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPayload {
    /// Unique item name.
    pub nome: String,
    /// Non-negative unit price.
    pub preco: f64,
    /// Free-form description.
    pub descricao: String,
    /// Non-negative stock quantity.
    pub quantidade: i64,
}

/// Stored catalog item as returned by list and fetch operations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemRecord {
    /// Remote identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Unique item name.
    pub nome: String,
    /// Unit price.
    pub preco: f64,
    /// Free-form description.
    pub descricao: String,
    /// Remaining stock quantity.
    pub quantidade: i64,
}

/// List envelope for catalog items.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemList {
    /// Number of matching items.
    pub quantidade: u64,
    /// Matching items.
    pub produtos: Vec<ItemRecord>,
}

// ============================================================================
// SECTION: Cart
// ============================================================================

/// One requested cart line referencing a catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Referenced catalog item identifier.
    #[serde(rename = "idProduto")]
    pub id_produto: String,
    /// Requested line quantity.
    pub quantidade: u32,
}

/// Writable cart fields. An empty line list is a valid cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartPayload {
    /// Ordered line items.
    pub produtos: Vec<CartLine>,
}

impl CartPayload {
    /// Builds a cart payload from lines.
    #[must_use]
    pub fn new(produtos: Vec<CartLine>) -> Self {
        Self {
            produtos,
        }
    }

    /// Builds a semantically valid cart with no line items.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            produtos: Vec::new(),
        }
    }
}

/// Stored cart line including the unit price captured at creation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CartLineRecord {
    /// Referenced catalog item identifier.
    #[serde(rename = "idProduto")]
    pub id_produto: String,
    /// Line quantity.
    pub quantidade: u32,
    /// Unit price at cart creation, when the API reports it.
    #[serde(rename = "precoUnitario", default)]
    pub preco_unitario: Option<f64>,
}

/// Stored cart with server-derived totals.
///
/// # Invariants
/// - `preco_total` and `quantidade_total` are derived by the remote API;
///   scenarios compare them against sums computed from requested inputs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CartRecord {
    /// Remote identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Stored line items.
    pub produtos: Vec<CartLineRecord>,
    /// Server-derived total price.
    #[serde(rename = "precoTotal")]
    pub preco_total: f64,
    /// Server-derived total quantity.
    #[serde(rename = "quantidadeTotal")]
    pub quantidade_total: u64,
    /// Owning account identifier.
    #[serde(rename = "idUsuario")]
    pub id_usuario: String,
}

/// List envelope for carts.
#[derive(Debug, Clone, Deserialize)]
pub struct CartList {
    /// Number of matching carts.
    pub quantidade: u64,
    /// Matching carts.
    pub carrinhos: Vec<CartRecord>,
}

// ============================================================================
// SECTION: Tests
// ============================================================================
