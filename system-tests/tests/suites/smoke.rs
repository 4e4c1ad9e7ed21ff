// system-tests/tests/suites/smoke.rs
// ============================================================================
// Module: Smoke Suite
// Description: End-to-end purchase flow scenario.
// Purpose: Exercise every capability class in one sequential chain.
// Dependencies: serverest-harness, system-tests, tokio
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use serverest_harness::identity;
use serverest_harness::model::CartLine;
use serverest_harness::model::CartList;
use serverest_harness::model::CartPayload;
use serverest_harness::model::ItemPayload;
use serverest_harness::oracle::Expectation;

use crate::helpers::artifacts::TestReporter;
use crate::helpers::harness::ready_factory;

#[tokio::test(flavor = "multi_thread")]
async fn purchase_flow_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("smoke_purchase_flow_end_to_end")?;
    let (_api, factory) = ready_factory().await?;

    // Fresh non-admin account with a usable credential.
    let session = factory.authenticated_as(&factory.fresh_account(false)).await?;
    assert!(!session.credential.as_str().is_empty(), "login must mint a non-empty credential");

    // Admin seeds the catalog with a known price and stock.
    let admin = factory.admin_session().await?;
    let item = ItemPayload {
        nome: identity::unique_name("Produto QA"),
        preco: 100.0,
        descricao: "Produto do cenário de fumaça".to_string(),
        quantidade: 10,
    };
    let response = factory.client().create_item(&item, Some(&admin)).await?;
    Expectation::created().verify(&response)?;
    let item_id = response.id().ok_or("item creation response missing identifier")?.to_string();

    // The account places a two-unit cart over the seeded item.
    let cart = CartPayload::new(vec![CartLine {
        id_produto: item_id,
        quantidade: 2,
    }]);
    let response = factory.client().create_cart(&cart, Some(&session.credential)).await?;
    Expectation::created().verify(&response)?;
    let cart_id = response.id().ok_or("cart creation response missing identifier")?.to_string();

    // The listing filter by identifier returns exactly that cart, with
    // totals derived by the server from the requested lines.
    let response = factory.client().list_carts(&[("_id", &cart_id)], None).await?;
    Expectation::ok().verify(&response)?;
    let listing: CartList = response.decode()?;
    assert_eq!(listing.quantidade, 1);
    let stored = listing.carrinhos.first().ok_or("listing returned no cart")?;
    assert_eq!(stored.id, cart_id);
    assert_eq!(stored.quantidade_total, 2);
    assert!((stored.preco_total - 200.0).abs() < 1e-9, "expected total 200, got {}", stored.preco_total);
    assert_eq!(stored.id_usuario, session.account_id);

    reporter.artifacts().write_transcript(&factory.client().transport().transcript())?;
    reporter.finish(
        "pass",
        vec!["purchase flow verified server-derived totals end to end".to_string()],
        vec!["transcript.json".to_string()],
    )?;
    Ok(())
}
