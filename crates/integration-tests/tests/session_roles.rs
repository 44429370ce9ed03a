//! Integration tests for simulated sign-in, role capabilities and dashboards.

#![allow(clippy::unwrap_used)]

use rethread_core::{Capability, ListingStatus, Role};
use rethread_integration_tests::{TestContext, user};
use rethread_storefront::services::{ListingDraft, ListingError, SessionError, StatusFilter};

fn draft() -> ListingDraft {
    ListingDraft {
        name: "Denim Jacket".to_owned(),
        description: "Oversized fit, no marks".to_owned(),
        category: "women".to_owned(),
        price: "1450".to_owned(),
        condition: "good".to_owned(),
        images: vec!["/uploads/jacket-front.jpg".to_owned()],
        ..ListingDraft::default()
    }
}

// =============================================================================
// Sessions
// =============================================================================

#[test]
fn test_login_persists_across_reopen_and_logout_clears() {
    let ctx = TestContext::new();
    let seller = user("Kabir", "kabir@example.in", Role::Seller);
    ctx.storefront.sessions().login(&seller).unwrap();

    let reopened = ctx.reopen();
    assert_eq!(reopened.sessions().current_user().unwrap(), Some(seller));

    reopened.sessions().logout().unwrap();
    assert_eq!(ctx.storefront.sessions().current_user().unwrap(), None);
}

#[test]
fn test_session_and_cart_share_one_store() {
    let ctx = TestContext::new();
    let product = &ctx.storefront.catalog().all()[0];
    ctx.storefront.cart().add_item(product, 1).unwrap();
    ctx.storefront
        .sessions()
        .login(&user("Kabir", "kabir@example.in", Role::Buyer))
        .unwrap();
    ctx.storefront.sessions().logout().unwrap();

    assert_eq!(ctx.reopen().cart().line_count().unwrap(), 1);
}

#[test]
fn test_capability_table() {
    let table = [
        (Role::Buyer, [true, false, false]),
        (Role::Seller, [true, true, false]),
        (Role::Both, [true, true, false]),
        (Role::Admin, [true, true, true]),
    ];
    for (role, [buy, sell, moderate]) in table {
        assert_eq!(role.can(Capability::Buy), buy, "{role}");
        assert_eq!(role.can(Capability::Sell), sell, "{role}");
        assert_eq!(role.can(Capability::Moderate), moderate, "{role}");
    }
}

// =============================================================================
// Dashboards
// =============================================================================

#[test]
fn test_dashboards_require_sign_in() {
    let ctx = TestContext::new();
    assert!(matches!(
        ctx.storefront.seller_dashboard(),
        Err(SessionError::NotSignedIn)
    ));
    assert!(matches!(
        ctx.storefront.moderation_queue(),
        Err(SessionError::NotSignedIn)
    ));
}

#[test]
fn test_seller_dashboard_for_seller() {
    let ctx = TestContext::new();
    ctx.storefront
        .sessions()
        .login(&user("Kabir", "kabir@example.in", Role::Seller))
        .unwrap();

    let dashboard = ctx.storefront.seller_dashboard().unwrap();
    let expected = ctx.storefront.catalog().len().div_ceil(3);
    assert_eq!(dashboard.items().len(), expected);
    assert_eq!(
        dashboard.filtered(StatusFilter::All, "").len(),
        dashboard.items().len()
    );

    assert!(matches!(
        ctx.storefront.moderation_queue(),
        Err(SessionError::Forbidden { .. })
    ));
}

#[test]
fn test_moderation_queue_for_admin() {
    let ctx = TestContext::new();
    ctx.storefront
        .sessions()
        .login(&user("Devi", "devi@example.in", Role::Admin))
        .unwrap();

    let mut queue = ctx.storefront.moderation_queue().unwrap();
    let pending = queue.pending_count();
    assert_eq!(pending, ctx.storefront.catalog().len().div_ceil(3));

    let first = queue
        .filtered(StatusFilter::Only(ListingStatus::Pending), "")
        .first()
        .map(|item| item.product.id)
        .unwrap();
    queue.approve(first).unwrap();
    assert_eq!(queue.pending_count(), pending - 1);
}

// =============================================================================
// Listings
// =============================================================================

#[tokio::test]
async fn test_buyer_cannot_submit_listing() {
    let ctx = TestContext::new();
    ctx.storefront
        .sessions()
        .login(&user("Kabir", "kabir@example.in", Role::Buyer))
        .unwrap();

    let err = ctx.storefront.submit_listing(&draft()).await.unwrap_err();
    assert!(matches!(
        err,
        ListingError::Session(SessionError::Forbidden {
            role: Role::Buyer,
            capability: Capability::Sell,
        })
    ));
}

#[tokio::test]
async fn test_both_role_submits_pending_listing() {
    let ctx = TestContext::new();
    ctx.storefront
        .sessions()
        .login(&user("Kabir", "kabir@example.in", Role::Both))
        .unwrap();

    let listing = ctx.storefront.submit_listing(&draft()).await.unwrap();
    assert_eq!(listing.status, ListingStatus::Pending);
    assert_eq!(listing.seller, "Kabir");
    assert_eq!(listing.submitted_on, rethread_integration_tests::fixed_now());
}

#[tokio::test]
async fn test_listing_validation_errors_are_reported_per_field() {
    let ctx = TestContext::new();
    ctx.storefront
        .sessions()
        .login(&user("Kabir", "kabir@example.in", Role::Seller))
        .unwrap();

    let mut bad = draft();
    bad.price = "-3".to_owned();
    bad.images.clear();

    match ctx.storefront.submit_listing(&bad).await.unwrap_err() {
        ListingError::Invalid(errors) => {
            assert_eq!(errors.len(), 2);
            assert_eq!(errors.get("price"), Some("Price must be a positive number"));
            assert_eq!(errors.get("images"), Some("At least one image is required"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
