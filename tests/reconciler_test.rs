//! Webhook reconciliation tests

mod common;

use std::sync::Arc;

use common::{Call, FakeApi};
use spark_bot::application::services::WebhookReconciler;
use spark_bot::BotError;

const NAME: &str = "testbot";
const URL: &str = "http://fakebot.com";

fn is_create(c: &Call) -> bool {
    matches!(c, Call::CreateWebhook(_))
}

fn is_update(c: &Call) -> bool {
    matches!(c, Call::UpdateWebhook { .. })
}

#[tokio::test]
async fn test_creates_when_absent() {
    let api = Arc::new(FakeApi::new().with_webhook("other", "someone-else", "http://elsewhere"));
    let reconciler = WebhookReconciler::new(api.clone());

    let webhook = reconciler.reconcile(NAME, URL).await.unwrap();

    assert_eq!(webhook.id, "created-id");
    assert_eq!(api.count(is_create), 1);
    assert_eq!(api.count(is_update), 0);

    let Call::CreateWebhook(spec) = &api.calls()[1] else {
        panic!("second call should be a create");
    };
    assert_eq!(spec.name, NAME);
    assert_eq!(spec.target_url, URL);
    assert_eq!(spec.resource, "messages");
    assert_eq!(spec.event, "created");
}

#[tokio::test]
async fn test_updates_when_present() {
    let api = Arc::new(FakeApi::new().with_webhook("wh-1", NAME, "http://old.example.com"));
    let reconciler = WebhookReconciler::new(api.clone());

    let webhook = reconciler.reconcile(NAME, URL).await.unwrap();

    assert_eq!(webhook.id, "wh-1");
    assert_eq!(webhook.target_url, URL);
    assert_eq!(api.count(is_create), 0);
    assert_eq!(api.count(is_update), 1);
}

#[tokio::test]
async fn test_update_failure_returns_stale_webhook() {
    let api = Arc::new(FakeApi {
        fail_update: true,
        ..FakeApi::new().with_webhook("wh-1", NAME, "http://old.example.com")
    });
    let reconciler = WebhookReconciler::new(api.clone());

    let webhook = reconciler.reconcile(NAME, URL).await.unwrap();

    assert_eq!(webhook.id, "wh-1");
    assert_eq!(webhook.target_url, "http://old.example.com");
    assert_eq!(api.count(is_update), 1);
    assert_eq!(api.count(is_create), 0);
}

#[tokio::test]
async fn test_duplicate_names_pick_first() {
    let api = Arc::new(
        FakeApi::new()
            .with_webhook("wh-1", NAME, "http://one")
            .with_webhook("wh-2", NAME, "http://two"),
    );
    let reconciler = WebhookReconciler::new(api.clone());

    reconciler.reconcile(NAME, URL).await.unwrap();

    assert!(api.calls().contains(&Call::UpdateWebhook {
        id: "wh-1".to_string(),
        name: NAME.to_string(),
        target_url: URL.to_string(),
    }));
}

#[tokio::test]
async fn test_create_failure_propagates() {
    let api = Arc::new(FakeApi {
        fail_create: true,
        ..FakeApi::new()
    });
    let reconciler = WebhookReconciler::new(api);

    let err = reconciler.reconcile(NAME, URL).await.unwrap_err();
    assert!(matches!(err, BotError::UpstreamUnavailable(_)));
}

#[tokio::test]
async fn test_list_failure_propagates() {
    let api = Arc::new(FakeApi {
        fail_list: true,
        ..FakeApi::new()
    });
    let reconciler = WebhookReconciler::new(api.clone());

    assert!(reconciler.reconcile(NAME, URL).await.is_err());
    assert_eq!(api.count(is_create), 0);
}

#[tokio::test]
async fn test_reconcile_is_repeatable() {
    let api = Arc::new(FakeApi::new().with_webhook("wh-1", NAME, URL));
    let reconciler = WebhookReconciler::new(api.clone());

    let first = reconciler.reconcile(NAME, URL).await.unwrap();
    let second = reconciler.reconcile(NAME, URL).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(api.count(is_create), 0);
}

#[tokio::test]
async fn test_bot_setup_stores_webhook() {
    let api = Arc::new(FakeApi::new());
    let mut bot = common::test_bot(api.clone());

    assert!(bot.webhook().is_none());
    let id = bot.setup().await.unwrap().id.clone();
    assert_eq!(id, "created-id");
    assert_eq!(bot.webhook().map(|w| w.target_url.as_str()), Some(URL));
}
