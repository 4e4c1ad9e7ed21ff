// crates/serverest-harness/src/commands.rs
// ============================================================================
// Module: Command Layer
// Description: One operation per remote capability of the store API.
// Purpose: Issue exactly one HTTP request per command with fixed method/path.
// Dependencies: reqwest, serde_json
// ============================================================================

//! ## Overview
//! Each command is a pure function of `(payload, optional credential)` to a
//! response descriptor. Commands never raise on non-2xx; classifying a
//! response is the oracle's job. Write capabilities perform exactly one
//! remote state mutation, read capabilities none.
//!
//! Checkout and cancel are credential-scoped terminal operations: the wire
//! contract addresses them at the authenticated account, not at a cart
//! identifier.

// ============================================================================
// SECTION: Imports
// ============================================================================

use reqwest::Method;

use crate::config::HarnessConfig;
use crate::model::AccountPayload;
use crate::model::CartPayload;
use crate::model::Credential;
use crate::model::ItemPayload;
use crate::transport::ApiRequest;
use crate::transport::ApiResponse;
use crate::transport::ApiTransport;
use crate::transport::TransportError;

// ============================================================================
// SECTION: Client
// ============================================================================

/// Command client bound to one API deployment.
#[derive(Debug, Clone)]
pub struct StoreClient {
    /// Underlying transport collaborator.
    transport: ApiTransport,
}

impl StoreClient {
    /// Creates a client from harness configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the transport cannot be built.
    pub fn new(config: &HarnessConfig) -> Result<Self, TransportError> {
        Ok(Self {
            transport: ApiTransport::new(&config.base_url, config.timeout)?,
        })
    }

    /// Creates a client over an existing transport.
    #[must_use]
    pub const fn from_transport(transport: ApiTransport) -> Self {
        Self {
            transport,
        }
    }

    /// Returns the underlying transport, e.g. for transcript capture.
    #[must_use]
    pub const fn transport(&self) -> &ApiTransport {
        &self.transport
    }

    // ------------------------------------------------------------------
    // Accounts
    // ------------------------------------------------------------------

    /// Creates an account via `POST /usuarios`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only for infrastructure failures.
    pub async fn create_account(
        &self,
        payload: &AccountPayload,
        credential: Option<&Credential>,
    ) -> Result<ApiResponse, TransportError> {
        self.transport
            .send(
                ApiRequest::new(Method::POST, "/usuarios")
                    .with_body(payload)?
                    .with_credential(credential),
            )
            .await
    }

    /// Lists accounts via `GET /usuarios` with optional equality filters.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only for infrastructure failures.
    pub async fn list_accounts(
        &self,
        query: &[(&str, &str)],
        credential: Option<&Credential>,
    ) -> Result<ApiResponse, TransportError> {
        let mut request = ApiRequest::new(Method::GET, "/usuarios");
        for (name, value) in query {
            request = request.with_query(name, value);
        }
        self.transport.send(request.with_credential(credential)).await
    }

    /// Fetches one account via `GET /usuarios/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only for infrastructure failures.
    pub async fn get_account(
        &self,
        account_id: &str,
        credential: Option<&Credential>,
    ) -> Result<ApiResponse, TransportError> {
        self.transport
            .send(
                ApiRequest::new(Method::GET, format!("/usuarios/{account_id}"))
                    .with_credential(credential),
            )
            .await
    }

    /// Updates an account via `PUT /usuarios/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only for infrastructure failures.
    pub async fn update_account(
        &self,
        account_id: &str,
        payload: &AccountPayload,
        credential: Option<&Credential>,
    ) -> Result<ApiResponse, TransportError> {
        self.transport
            .send(
                ApiRequest::new(Method::PUT, format!("/usuarios/{account_id}"))
                    .with_body(payload)?
                    .with_credential(credential),
            )
            .await
    }

    /// Deletes an account via `DELETE /usuarios/{id}`, invalidating its tokens.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only for infrastructure failures.
    pub async fn delete_account(
        &self,
        account_id: &str,
        credential: Option<&Credential>,
    ) -> Result<ApiResponse, TransportError> {
        self.transport
            .send(
                ApiRequest::new(Method::DELETE, format!("/usuarios/{account_id}"))
                    .with_credential(credential),
            )
            .await
    }

    /// Authenticates via `POST /login` and mints a credential.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only for infrastructure failures.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ApiResponse, TransportError> {
        self.transport
            .send(
                ApiRequest::new(Method::POST, "/login").with_body(&serde_json::json!({
                    "email": email,
                    "password": password,
                }))?,
            )
            .await
    }

    // ------------------------------------------------------------------
    // Catalog items
    // ------------------------------------------------------------------

    /// Creates a catalog item via `POST /produtos` (admin only).
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only for infrastructure failures.
    pub async fn create_item(
        &self,
        payload: &ItemPayload,
        credential: Option<&Credential>,
    ) -> Result<ApiResponse, TransportError> {
        self.transport
            .send(
                ApiRequest::new(Method::POST, "/produtos")
                    .with_body(payload)?
                    .with_credential(credential),
            )
            .await
    }

    /// Lists catalog items via `GET /produtos` with optional equality filters.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only for infrastructure failures.
    pub async fn list_items(
        &self,
        query: &[(&str, &str)],
        credential: Option<&Credential>,
    ) -> Result<ApiResponse, TransportError> {
        let mut request = ApiRequest::new(Method::GET, "/produtos");
        for (name, value) in query {
            request = request.with_query(name, value);
        }
        self.transport.send(request.with_credential(credential)).await
    }

    /// Fetches one catalog item via `GET /produtos/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only for infrastructure failures.
    pub async fn get_item(
        &self,
        item_id: &str,
        credential: Option<&Credential>,
    ) -> Result<ApiResponse, TransportError> {
        self.transport
            .send(
                ApiRequest::new(Method::GET, format!("/produtos/{item_id}"))
                    .with_credential(credential),
            )
            .await
    }

    /// Updates a catalog item via `PUT /produtos/{id}` (admin only).
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only for infrastructure failures.
    pub async fn update_item(
        &self,
        item_id: &str,
        payload: &ItemPayload,
        credential: Option<&Credential>,
    ) -> Result<ApiResponse, TransportError> {
        self.transport
            .send(
                ApiRequest::new(Method::PUT, format!("/produtos/{item_id}"))
                    .with_body(payload)?
                    .with_credential(credential),
            )
            .await
    }

    /// Deletes a catalog item via `DELETE /produtos/{id}` (admin only).
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only for infrastructure failures.
    pub async fn delete_item(
        &self,
        item_id: &str,
        credential: Option<&Credential>,
    ) -> Result<ApiResponse, TransportError> {
        self.transport
            .send(
                ApiRequest::new(Method::DELETE, format!("/produtos/{item_id}"))
                    .with_credential(credential),
            )
            .await
    }

    // ------------------------------------------------------------------
    // Carts
    // ------------------------------------------------------------------

    /// Creates a cart owned by the credential's account via `POST /carrinhos`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only for infrastructure failures.
    pub async fn create_cart(
        &self,
        payload: &CartPayload,
        credential: Option<&Credential>,
    ) -> Result<ApiResponse, TransportError> {
        self.transport
            .send(
                ApiRequest::new(Method::POST, "/carrinhos")
                    .with_body(payload)?
                    .with_credential(credential),
            )
            .await
    }

    /// Lists carts via `GET /carrinhos` with optional equality filters.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only for infrastructure failures.
    pub async fn list_carts(
        &self,
        query: &[(&str, &str)],
        credential: Option<&Credential>,
    ) -> Result<ApiResponse, TransportError> {
        let mut request = ApiRequest::new(Method::GET, "/carrinhos");
        for (name, value) in query {
            request = request.with_query(name, value);
        }
        self.transport.send(request.with_credential(credential)).await
    }

    /// Fetches one cart via `GET /carrinhos/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only for infrastructure failures.
    pub async fn get_cart(
        &self,
        cart_id: &str,
        credential: Option<&Credential>,
    ) -> Result<ApiResponse, TransportError> {
        self.transport
            .send(
                ApiRequest::new(Method::GET, format!("/carrinhos/{cart_id}"))
                    .with_credential(credential),
            )
            .await
    }

    /// Concludes the account's carts via `DELETE /carrinhos/concluir-compra`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only for infrastructure failures.
    pub async fn checkout_cart(
        &self,
        credential: Option<&Credential>,
    ) -> Result<ApiResponse, TransportError> {
        self.transport
            .send(
                ApiRequest::new(Method::DELETE, "/carrinhos/concluir-compra")
                    .with_credential(credential),
            )
            .await
    }

    /// Aborts the account's carts via `DELETE /carrinhos/cancelar-compra`,
    /// returning reserved stock to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only for infrastructure failures.
    pub async fn cancel_cart(
        &self,
        credential: Option<&Credential>,
    ) -> Result<ApiResponse, TransportError> {
        self.transport
            .send(
                ApiRequest::new(Method::DELETE, "/carrinhos/cancelar-compra")
                    .with_credential(credential),
            )
            .await
    }
}
