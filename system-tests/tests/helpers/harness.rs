// system-tests/tests/helpers/harness.rs
// ============================================================================
// Module: System Test Harness
// Description: Deployment selection and client wiring for system-tests.
// Purpose: Point suites at a real deployment or an in-process stub.
// Dependencies: serverest-harness, system-tests
// ============================================================================

//! ## Overview
//! Suites run hermetically against the in-process stub by default. Setting
//! `SERVEREST_BASE_URL` redirects every suite at an external deployment
//! instead; the stub is then never spawned.

use serverest_harness::StoreClient;
use serverest_harness::config::HarnessConfig;
use serverest_harness::config::HarnessEnv;
use serverest_harness::config::read_env_strict;
use serverest_harness::fixtures::FixtureFactory;

use super::readiness;
use super::stub_api::StoreStubHandle;
use super::stub_api::spawn_store_stub;
use super::timeouts;

/// The deployment a suite talks to, keeping the stub alive when in use.
pub struct ApiUnderTest {
    config: HarnessConfig,
    stub: Option<StoreStubHandle>,
}

impl ApiUnderTest {
    /// Returns the base URL of the deployment under test.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Returns true when the suite runs against the in-process stub.
    pub fn is_hermetic(&self) -> bool {
        self.stub.is_some()
    }

    /// Returns the harness configuration for this deployment.
    pub fn harness_config(&self) -> &HarnessConfig {
        &self.config
    }
}

/// Resolves the deployment under test: an external base URL when
/// `SERVEREST_BASE_URL` is set, otherwise a freshly spawned stub.
pub async fn spawn_store_api() -> Result<ApiUnderTest, String> {
    let external = read_env_strict(HarnessEnv::BaseUrl.as_str())
        .map_err(|err| err.to_string())?
        .filter(|value| !value.trim().is_empty());
    let (mut config, stub) = match external {
        Some(_) => {
            let config = HarnessConfig::load().map_err(|err| err.to_string())?;
            (config, None)
        }
        None => {
            let stub = spawn_store_stub().await?;
            (HarnessConfig::for_base_url(stub.base_url()), Some(stub))
        }
    };
    config.timeout = timeouts::resolve_timeout(config.timeout)?;
    Ok(ApiUnderTest {
        config,
        stub,
    })
}

/// Spawns the deployment, waits until it answers, and wires a fixture
/// factory over a fresh client.
pub async fn ready_factory() -> Result<(ApiUnderTest, FixtureFactory), String> {
    let api = spawn_store_api().await?;
    let client = StoreClient::new(api.harness_config()).map_err(|err| err.to_string())?;
    readiness::wait_for_api_ready(&client, api.harness_config().timeout).await?;
    let factory = FixtureFactory::new(client, api.harness_config());
    Ok((api, factory))
}
