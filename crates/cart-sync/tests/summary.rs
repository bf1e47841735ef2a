//! Count badge, mini-cart preview, and add-to-cart submission.

mod common;

use std::time::Duration;

use cart_sync::api::cart::add::{AddToCartForm, CSRF_FIELD};
use cart_sync::view::ids;
use cart_sync::{Document, NotificationLevel, SyncSettings};
use common::{Call, Failure, ScriptedTransport};

fn form() -> AddToCartForm {
    AddToCartForm::new("/cart/add/42/")
        .field(CSRF_FIELD, "tok")
        .field("quantity", "1")
}

#[tokio::test]
async fn test_load_fills_badge_and_preview() {
    let transport = ScriptedTransport::default()
        .with_count(3)
        .with_mini("<li>UV lamp x3</li>");
    let controller = common::controller(transport, Document::cart_page());

    controller.load().await;

    let page = common::page(&controller);
    assert_eq!(page.text(ids::CART_COUNT), Some("3"));
    let mini = page.element(ids::MINI_CART).unwrap();
    assert!(mini.visible);
    assert_eq!(mini.html.as_deref(), Some("<li>UV lamp x3</li>"));
}

#[tokio::test]
async fn test_refresh_is_idempotent() {
    let transport = ScriptedTransport::default()
        .with_count(5)
        .with_mini("<li>resin</li>");
    let controller = common::controller(transport, Document::cart_page());

    controller.refresh().await;
    let first = common::page(&controller);
    controller.refresh().await;
    controller.refresh().await;
    let third = common::page(&controller);

    assert_eq!(first.text(ids::CART_COUNT), third.text(ids::CART_COUNT));
    assert_eq!(
        first.element(ids::MINI_CART),
        third.element(ids::MINI_CART)
    );
    assert_eq!(controller.transport().count_calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_preview_hides_after_delay() {
    let transport = ScriptedTransport::default().with_mini("<li>resin</li>");
    let controller = common::controller(transport, Document::cart_page());

    controller.refresh_preview().await.unwrap();
    assert!(common::page(&controller).element(ids::MINI_CART).unwrap().visible);

    tokio::time::sleep(Duration::from_millis(2900)).await;
    assert!(common::page(&controller).element(ids::MINI_CART).unwrap().visible);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!common::page(&controller).element(ids::MINI_CART).unwrap().visible);
}

#[tokio::test(start_paused = true)]
async fn test_preview_delay_is_configurable() {
    let transport = ScriptedTransport::default();
    let settings = SyncSettings {
        mini_cart_hide_after: Duration::from_millis(500),
        ..SyncSettings::default()
    };
    let controller = common::controller_with(transport, Document::cart_page(), settings);

    controller.refresh_preview().await.unwrap();
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(!common::page(&controller).element(ids::MINI_CART).unwrap().visible);
}

#[tokio::test]
async fn test_refresh_failures_are_swallowed() {
    let transport = ScriptedTransport::default();
    *transport.count.lock() = Err(Failure::Status(500));
    *transport.mini_html.lock() = Err(Failure::NotJson);
    let page = Document::cart_page();
    let before = page.clone();
    let controller = common::controller(transport, page);

    controller.refresh().await;
    assert!(controller.refresh_count().await.is_err());

    let page = common::page(&controller);
    assert_eq!(page.text(ids::CART_COUNT), before.text(ids::CART_COUNT));
    assert_eq!(page.element(ids::MINI_CART), before.element(ids::MINI_CART));
    assert!(page.notifications().is_empty());
}

#[tokio::test]
async fn test_add_to_cart_success() {
    let transport = ScriptedTransport::default().with_count(1);
    let controller = common::controller(transport, Document::cart_page());

    controller.submit(&form()).await.unwrap();

    let page = common::page(&controller);
    assert_eq!(page.text(ids::CART_COUNT), Some("1"));
    assert!(page.element(ids::MINI_CART).unwrap().visible);

    let notices = page.notifications();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NotificationLevel::Success);
    assert_eq!(notices[0].title, "Added to cart");
    assert_eq!(notices[0].timer, Some(Duration::from_millis(1500)));

    let calls = controller.transport().calls.lock().clone();
    assert_eq!(calls[0], Call::Add(form()));
}

#[tokio::test]
async fn test_add_to_cart_failure_shows_error_only() {
    for failure in [Failure::NotJson, Failure::Status(403)] {
        let transport = ScriptedTransport::default().with_count(7);
        *transport.add_reply.lock() = Err(failure);
        let page = Document::cart_page();
        let before = page.clone();
        let controller = common::controller(transport, page);

        assert!(controller.submit(&form()).await.is_err());

        let page = common::page(&controller);
        assert_eq!(page.text(ids::CART_COUNT), before.text(ids::CART_COUNT));
        assert_eq!(page.element(ids::MINI_CART), before.element(ids::MINI_CART));
        assert_eq!(controller.transport().count_calls(), 0);

        let notices = page.notifications();
        assert_eq!(notices.len(), 1, "{failure:?}");
        assert_eq!(notices[0].level, NotificationLevel::Error);
        assert_eq!(notices[0].text.as_deref(), Some("Failed to add to cart."));
    }
}
