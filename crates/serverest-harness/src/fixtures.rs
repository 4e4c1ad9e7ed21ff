// crates/serverest-harness/src/fixtures.rs
// ============================================================================
// Module: Fixture Factory
// Description: Prerequisite object graphs for conformance scenarios.
// Purpose: Compose commands into valid multi-step chains that fail fast.
// Dependencies: tokio
// ============================================================================

//! ## Overview
//! Recipes here build ready-to-use object graphs (fresh account, authenticated
//! session, admin credential, carts over freshly created catalog items) so
//! scenario bodies never hand-construct multi-step prerequisites inline.
//!
//! Error policy: a failing step aborts the remaining chain and propagates the
//! failing response descriptor as [`HarnessError::FixtureChain`]; a scenario
//! must never assert against a fixture built on a failed prerequisite.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tokio::sync::OnceCell;

use crate::commands::StoreClient;
use crate::config::HarnessConfig;
use crate::config::SeedAdmin;
use crate::error::HarnessError;
use crate::identity;
use crate::model::AccountPayload;
use crate::model::CartLine;
use crate::model::CartPayload;
use crate::model::Credential;
use crate::model::ItemPayload;
use crate::transport::ApiResponse;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default password for minted fixture accounts.
pub const DEFAULT_PASSWORD: &str = "teste123";

// ============================================================================
// SECTION: Fixture Types
// ============================================================================

/// An account together with the credential obtained for it.
#[derive(Debug, Clone)]
pub struct Session {
    /// The payload the account was created from.
    pub account: AccountPayload,
    /// Remote identifier issued at creation.
    pub account_id: String,
    /// Credential minted by authenticating as the account.
    pub credential: Credential,
}

/// One cart line to be backed by a freshly created catalog item.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSpec {
    /// Unit price for the created item.
    pub price: f64,
    /// Requested line quantity.
    pub quantity: u32,
    /// Stock to create the item with; must cover the quantity.
    pub stock: i64,
}

impl LineSpec {
    /// Builds a line spec with ample stock for the requested quantity.
    #[must_use]
    pub fn new(price: f64, quantity: u32) -> Self {
        Self {
            price,
            quantity,
            stock: i64::from(quantity) * 10,
        }
    }
}

// ============================================================================
// SECTION: Factory
// ============================================================================

/// Fixture factory over one command client.
///
/// # Invariants
/// - The memoized admin credential is shared read-only; scenarios that test
///   credential invalidation mint their own account and credential instead.
#[derive(Debug)]
pub struct FixtureFactory {
    /// Command client used by every recipe step.
    client: StoreClient,
    /// Seed admin credentials, when the environment supplies them.
    seed_admin: Option<SeedAdmin>,
    /// Lazily initialized shared admin credential.
    admin: OnceCell<Credential>,
}

impl FixtureFactory {
    /// Creates a factory over a client and configuration.
    #[must_use]
    pub fn new(client: StoreClient, config: &HarnessConfig) -> Self {
        Self {
            client,
            seed_admin: config.seed_admin.clone(),
            admin: OnceCell::new(),
        }
    }

    /// Returns the command client the factory composes.
    #[must_use]
    pub const fn client(&self) -> &StoreClient {
        &self.client
    }

    /// Generates a unique account payload; callers may override fields
    /// before creating it.
    #[must_use]
    pub fn fresh_account(&self, admin: bool) -> AccountPayload {
        AccountPayload {
            nome: identity::unique_name("Usuario QA"),
            email: identity::unique_email("usuario"),
            password: DEFAULT_PASSWORD.to_string(),
            administrador: if admin { "true" } else { "false" }.to_string(),
        }
    }

    /// Creates an account and returns its issued identifier.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::FixtureChain`] for step `create-account`, or
    /// [`HarnessError::Transport`] for infrastructure failures.
    pub async fn create_account(&self, payload: &AccountPayload) -> Result<String, HarnessError> {
        let response = self.client.create_account(payload, None).await?;
        issued_id("create-account", response)
    }

    /// Creates the account and authenticates as it.
    ///
    /// Creation failure and authentication failure surface as distinct
    /// fixture steps.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::FixtureChain`] for steps `create-account` or
    /// `authenticate`, or [`HarnessError::Transport`] for infrastructure
    /// failures.
    pub async fn authenticated_as(
        &self,
        payload: &AccountPayload,
    ) -> Result<Session, HarnessError> {
        let account_id = self.create_account(payload).await?;
        let credential =
            self.authenticate(&payload.email, &payload.password, "authenticate").await?;
        Ok(Session {
            account: payload.clone(),
            account_id,
            credential,
        })
    }

    /// Returns the shared admin credential, authenticating at most once per
    /// factory.
    ///
    /// Scenarios that only need authorization use this; scenarios whose
    /// subject is account lifecycle mint their own fresh admin instead.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::FixtureChain`] when the admin account cannot
    /// be created or authenticated.
    pub async fn admin_session(&self) -> Result<Credential, HarnessError> {
        let credential = self
            .admin
            .get_or_try_init(|| async {
                match &self.seed_admin {
                    Some(seed) => {
                        self.authenticate(&seed.email, &seed.password, "authenticate-admin").await
                    }
                    None => {
                        let payload = self.fresh_account(true);
                        self.create_account(&payload).await?;
                        self.authenticate(&payload.email, &payload.password, "authenticate-admin")
                            .await
                    }
                }
            })
            .await?;
        Ok(credential.clone())
    }

    /// Creates one catalog item per line spec and one cart per group,
    /// strictly sequentially, returning cart identifiers in request order.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::FixtureChain`] for the first failing step
    /// (`create-item` or `create-cart`); no further steps are attempted.
    pub async fn carts_for(
        &self,
        credential: &Credential,
        groups: &[Vec<LineSpec>],
    ) -> Result<Vec<String>, HarnessError> {
        let admin = self.admin_session().await?;
        let mut cart_ids = Vec::with_capacity(groups.len());
        for group in groups {
            let mut lines = Vec::with_capacity(group.len());
            for spec in group {
                let item = ItemPayload {
                    nome: identity::unique_name("Produto QA"),
                    preco: spec.price,
                    descricao: "Produto criado pela fábrica de fixtures".to_string(),
                    quantidade: spec.stock,
                };
                let response = self.client.create_item(&item, Some(&admin)).await?;
                let item_id = issued_id("create-item", response)?;
                lines.push(CartLine {
                    id_produto: item_id,
                    quantidade: spec.quantity,
                });
            }
            let payload = CartPayload::new(lines);
            let response = self.client.create_cart(&payload, Some(credential)).await?;
            cart_ids.push(issued_id("create-cart", response)?);
        }
        Ok(cart_ids)
    }

    /// Authenticates and extracts the credential for a named fixture step.
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
        step: &str,
    ) -> Result<Credential, HarnessError> {
        let response = self.client.login(email, password).await?;
        if !response.is_success() {
            return Err(HarnessError::fixture_step(step, response));
        }
        match response.body_str("authorization") {
            Some(token) if !token.is_empty() => Ok(Credential::new(token)),
            _ => Err(HarnessError::fixture_step(step, response)),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Extracts the issued identifier from a successful creation response.
fn issued_id(step: &str, response: ApiResponse) -> Result<String, HarnessError> {
    if !response.is_success() {
        return Err(HarnessError::fixture_step(step, response));
    }
    match response.id() {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(HarnessError::fixture_step(step, response)),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
