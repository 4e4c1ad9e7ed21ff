// system-tests/tests/suites/accounts.rs
// ============================================================================
// Module: Accounts Suite
// Description: Account lifecycle scenarios.
// Purpose: Verify creation, uniqueness, listing filters, update, deletion.
// Dependencies: serverest-harness, system-tests, tokio
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use serverest_harness::model::AccountList;
use serverest_harness::model::AccountRecord;
use serverest_harness::oracle::Expectation;
use serverest_harness::oracle::messages;

use crate::helpers::artifacts::TestReporter;
use crate::helpers::harness::ready_factory;

#[tokio::test(flavor = "multi_thread")]
async fn creation_issues_identifier_and_roundtrips() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("accounts_creation_issues_identifier")?;
    let (_api, factory) = ready_factory().await?;

    let payload = factory.fresh_account(false);
    let response = factory.client().create_account(&payload, None).await?;
    Expectation::created().verify(&response)?;
    let account_id = response.id().ok_or("creation response missing identifier")?.to_string();

    let response = factory.client().get_account(&account_id, None).await?;
    Expectation::ok().verify(&response)?;
    let stored: AccountRecord = response.decode()?;
    assert_eq!(stored.id, account_id);
    assert_eq!(stored.email, payload.email);
    assert_eq!(stored.administrador, "false");

    reporter.artifacts().write_transcript(&factory.client().transport().transcript())?;
    reporter.finish(
        "pass",
        vec!["created account fetched back by its issued identifier".to_string()],
        vec!["transcript.json".to_string()],
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("accounts_duplicate_email_is_rejected")?;
    let (_api, factory) = ready_factory().await?;

    let payload = factory.fresh_account(false);
    factory.create_account(&payload).await?;

    // Same email, different name: the natural key is the email alone.
    let mut duplicate = factory.fresh_account(false);
    duplicate.email = payload.email.clone();
    let response = factory.client().create_account(&duplicate, None).await?;
    Expectation::duplicate(messages::DUPLICATE_EMAIL).verify(&response)?;

    reporter.artifacts().write_transcript(&factory.client().transport().transcript())?;
    reporter.finish(
        "pass",
        vec!["duplicate email rejected with the pinned contract message".to_string()],
        vec!["transcript.json".to_string()],
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn listing_filters_by_email() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("accounts_listing_filters_by_email")?;
    let (_api, factory) = ready_factory().await?;

    let payload = factory.fresh_account(false);
    let account_id = factory.create_account(&payload).await?;

    let response = factory.client().list_accounts(&[("email", &payload.email)], None).await?;
    Expectation::ok().verify(&response)?;
    let listing: AccountList = response.decode()?;
    assert_eq!(listing.quantidade, 1);
    assert_eq!(listing.usuarios.len(), 1);
    let stored = listing.usuarios.first().ok_or("listing returned no account")?;
    assert_eq!(stored.id, account_id);

    reporter.artifacts().write_transcript(&factory.client().transport().transcript())?;
    reporter.finish(
        "pass",
        vec!["email filter returned exactly the created account".to_string()],
        vec!["transcript.json".to_string()],
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn fetching_unknown_identifier_misses() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("accounts_fetching_unknown_identifier_misses")?;
    let (_api, factory) = ready_factory().await?;

    let response = factory.client().get_account("0000000000000000", None).await?;
    Expectation::not_found().verify(&response)?;

    reporter.artifacts().write_transcript(&factory.client().transport().transcript())?;
    reporter.finish(
        "pass",
        vec!["fetch by a never-issued identifier reported a miss".to_string()],
        vec!["transcript.json".to_string()],
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn update_changes_stored_fields() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("accounts_update_changes_stored_fields")?;
    let (_api, factory) = ready_factory().await?;

    let payload = factory.fresh_account(false);
    let account_id = factory.create_account(&payload).await?;

    let mut updated = payload.clone();
    updated.nome = format!("{} Atualizado", payload.nome);
    let response = factory.client().update_account(&account_id, &updated, None).await?;
    Expectation::ok_message(messages::UPDATED).verify(&response)?;

    let response = factory.client().get_account(&account_id, None).await?;
    Expectation::ok().verify(&response)?;
    let stored: AccountRecord = response.decode()?;
    assert_eq!(stored.nome, updated.nome);

    reporter.artifacts().write_transcript(&factory.client().transport().transcript())?;
    reporter.finish(
        "pass",
        vec!["update was reflected by a subsequent fetch".to_string()],
        vec!["transcript.json".to_string()],
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn deletion_removes_the_account() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("accounts_deletion_removes_the_account")?;
    let (_api, factory) = ready_factory().await?;

    let payload = factory.fresh_account(false);
    let account_id = factory.create_account(&payload).await?;

    let response = factory.client().delete_account(&account_id, None).await?;
    Expectation::ok_message(messages::DELETED).verify(&response)?;

    let response = factory.client().get_account(&account_id, None).await?;
    Expectation::not_found().verify(&response)?;

    // Deleting again matches nothing and says so.
    let response = factory.client().delete_account(&account_id, None).await?;
    Expectation::ok_message(messages::NOTHING_DELETED).verify(&response)?;

    reporter.artifacts().write_transcript(&factory.client().transport().transcript())?;
    reporter.finish(
        "pass",
        vec!["deletion removed the account and repeat deletion was a no-op".to_string()],
        vec!["transcript.json".to_string()],
    )?;
    Ok(())
}
