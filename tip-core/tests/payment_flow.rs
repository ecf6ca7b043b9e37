//! End-to-end payment flow: sign in, submit, read back history

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tip_auth::{AuthConfig, AuthError, LocalIdentityProvider, SessionToken};
use tip_core::db::{Document, Query};
use tip_core::{
    Config, DocumentStore, InvalidInput, MemoryDocumentStore, StoreError, StoreResult, TipError,
    TipRate, TipService,
};

struct UnreachableStore;

#[async_trait]
impl DocumentStore for UnreachableStore {
    async fn set(&self, _: &str, _: &str, _: Document) -> StoreResult<()> {
        Err(StoreError::Database("network unreachable".into()))
    }

    async fn query(&self, _: &str, _: &Query) -> StoreResult<Vec<Document>> {
        Err(StoreError::Database("network unreachable".into()))
    }
}

fn identity() -> Arc<LocalIdentityProvider> {
    Arc::new(LocalIdentityProvider::new(AuthConfig::ephemeral()))
}

async fn signed_in(service: &TipService) -> SessionToken {
    service.sign_up("diner@example.com", "correct horse").await.unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[tokio::test]
async fn test_submit_saves_and_shows_in_recent() {
    let store = Arc::new(MemoryDocumentStore::new());
    let service = TipService::new(identity(), store.clone());
    let session = signed_in(&service).await;

    let submission = service
        .submit(&session, "100", Some(TipRate::TwentyPercent), false)
        .await
        .unwrap();
    assert_eq!(submission.result.tip, dec("20"));
    assert_eq!(submission.result.total, dec("120"));

    submission.save.await.unwrap().unwrap();

    let recent = service.recent(&session).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].total_amount, dec("120"));

    let line = service.recent_summary(&session).await.unwrap();
    assert_eq!(line, "Last 5 payments: 120.00");
}

#[tokio::test]
async fn test_invalid_cost_writes_nothing() {
    let store = Arc::new(MemoryDocumentStore::new());
    let service = TipService::new(identity(), store.clone());
    let session = signed_in(&service).await;

    let err = service
        .submit(&session, "abc", Some(TipRate::TenPercent), false)
        .await
        .err()
        .unwrap();
    assert!(matches!(err, TipError::InvalidInput(InvalidInput::Cost(_))));
    assert_eq!(err.user_message(), "Please enter a valid cost of service");

    let err = service.submit(&session, "12", None, false).await.err().unwrap();
    assert_eq!(err.user_message(), "Please select a tip option");

    assert!(store.is_empty("payments"));
}

#[tokio::test]
async fn test_failed_save_keeps_result_and_recent_degrades() {
    let service = TipService::new(identity(), Arc::new(UnreachableStore));
    let session = signed_in(&service).await;

    let submission = service
        .submit(&session, "33.33", Some(TipRate::FifteenPercent), true)
        .await
        .unwrap();
    assert_eq!(submission.result.tip, dec("4.9995"));
    assert_eq!(submission.result.total, dec("39"));

    assert!(submission.save.await.unwrap().is_err());
    assert!(service.recent(&session).await.unwrap().is_empty());
    assert_eq!(
        service.recent_summary(&session).await.unwrap(),
        "Last 5 payments: "
    );
}

#[tokio::test]
async fn test_signed_out_session_is_rejected() {
    let store = Arc::new(MemoryDocumentStore::new());
    let service = TipService::new(identity(), store.clone());
    let session = signed_in(&service).await;

    service.sign_out(&session).await.unwrap();

    let err = service
        .submit(&session, "10", Some(TipRate::FivePercent), false)
        .await
        .err()
        .unwrap();
    assert!(matches!(err, TipError::Auth(AuthError::SessionRevoked)));
    assert!(matches!(
        service.recent(&session).await,
        Err(TipError::Auth(AuthError::SessionRevoked))
    ));
    assert!(store.is_empty("payments"));
}

#[tokio::test]
async fn test_wrong_password_message() {
    let service = TipService::new(identity(), Arc::new(MemoryDocumentStore::new()));
    signed_in(&service).await;

    let err = service
        .sign_in("diner@example.com", "wrong horse")
        .await
        .err()
        .unwrap();
    assert_eq!(err.user_message(), "Incorrect password, please try again.");

    let err = service.sign_in("", "").await.err().unwrap();
    assert_eq!(err.user_message(), "Email and password must not be blank.");
}

#[tokio::test]
async fn test_history_accumulates_on_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_work_dir(dir.path().to_string_lossy());
    let service = TipService::open(&config, identity()).await.unwrap();
    let session = signed_in(&service).await;

    for cost in ["10", "20", "30"] {
        let submission = service
            .submit(&session, cost, Some(TipRate::TenPercent), false)
            .await
            .unwrap();
        submission.save.await.unwrap().unwrap();
    }

    let recent = service.recent(&session).await.unwrap();
    assert_eq!(recent.len(), 3);
    for record in &recent {
        assert!(record.total_amount > record.original_cost);
        assert!(!record.rounded_up);
    }
}

#[tokio::test]
async fn test_history_limit_is_respected() {
    let store = Arc::new(MemoryDocumentStore::new());
    let service = TipService::new(identity(), store.clone()).with_history_limit(2);
    let session = signed_in(&service).await;

    for _ in 0..4 {
        let submission = service
            .submit(&session, "5", Some(TipRate::ThirtyPercent), false)
            .await
            .unwrap();
        submission.save.await.unwrap().unwrap();
    }

    assert_eq!(store.len("payments"), 4);
    assert_eq!(service.recent(&session).await.unwrap().len(), 2);
    assert!(
        service
            .recent_summary(&session)
            .await
            .unwrap()
            .starts_with("Last 2 payments: ")
    );
}

#[tokio::test]
async fn test_suggested_tip_is_a_known_rate() {
    let service = TipService::new(identity(), Arc::new(MemoryDocumentStore::new()));
    for _ in 0..50 {
        let roll = service.suggest_tip();
        assert!((1..=6).contains(&roll.face()));
        assert!(TipRate::ALL.contains(&roll.recommended_rate()));
    }
}

#[tokio::test]
async fn test_costs_that_would_be_stored_inexactly_are_rejected() {
    let store = Arc::new(MemoryDocumentStore::new());
    let service = TipService::new(identity(), store.clone());
    let session = signed_in(&service).await;

    for cost in ["98765432109876.54321", "1_000", "1e-27"] {
        let err = service
            .submit(&session, cost, Some(TipRate::FifteenPercent), false)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, TipError::InvalidInput(_)), "{cost} accepted");
        assert_eq!(err.user_message(), "Please enter a valid cost of service");
    }
    assert!(store.is_empty("payments"));
}
