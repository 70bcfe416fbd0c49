mod common;

use axum::http::StatusCode;

const KINDS: [&str; 5] = [
    "HelpRequest",
    "UCSBDiningCommonsMenuItem",
    "MenuItemReview",
    "UCSBOrganization",
    "UCSBDiningCommons",
];

#[tokio::test]
async fn logged_out_callers_get_403_on_every_operation() {
    let app = common::app();

    for kind in KINDS {
        let (status, _) = common::get(&app, &format!("/api/{kind}/all"), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "list {kind}");

        let (status, _) = common::post(&app, &format!("/api/{kind}/post"), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "create {kind}");

        let (status, _) = common::get(&app, &format!("/api/{kind}?id=1"), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "get {kind}");

        let (status, _) = common::put(
            &app,
            &format!("/api/{kind}?id=1"),
            None,
            serde_json::json!({}),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN, "update {kind}");

        let (status, _) = common::delete(&app, &format!("/api/{kind}?id=1"), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "delete {kind}");
    }
}

#[tokio::test]
async fn users_can_read_but_not_write() {
    let app = common::app();
    let token = common::user_token();

    for kind in KINDS {
        let (status, body) = common::get(&app, &format!("/api/{kind}/all"), Some(&token)).await;
        assert_eq!(status, StatusCode::OK, "list {kind}");
        assert_eq!(body, serde_json::json!([]), "empty list {kind}");

        let (status, _) = common::post(&app, &format!("/api/{kind}/post"), Some(&token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "create {kind}");

        let (status, _) = common::put(
            &app,
            &format!("/api/{kind}?id=1"),
            Some(&token),
            serde_json::json!({}),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN, "update {kind}");

        let (status, _) = common::delete(&app, &format!("/api/{kind}?id=1"), Some(&token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "delete {kind}");
    }
}

#[tokio::test]
async fn admin_without_user_cannot_read() {
    let app = common::app();
    let token = common::admin_only_token();

    for kind in KINDS {
        let (status, _) = common::get(&app, &format!("/api/{kind}/all"), Some(&token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "list {kind}");

        let (status, _) = common::get(&app, &format!("/api/{kind}?id=1"), Some(&token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "get {kind}");
    }
}

#[tokio::test]
async fn denial_happens_before_binding() {
    let app = common::app();

    // Unparseable key, yet still 403: the policy gate runs first and a
    // denied caller learns nothing about the input contract.
    let (status, _) =
        common::get(&app, "/api/UCSBDiningCommonsMenuItem?id=not-a-number", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The same request from an authorized caller is a binding error.
    let token = common::user_token();
    let (status, _) = common::get(
        &app,
        "/api/UCSBDiningCommonsMenuItem?id=not-a-number",
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn a_garbage_bearer_token_is_an_anonymous_caller() {
    let app = common::app();

    let (status, _) = common::get(
        &app,
        "/api/HelpRequest/all",
        Some("definitely-not-a-jwt"),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn current_user_reports_identity_and_roles() {
    let app = common::app();

    let (status, _) = common::get(&app, "/api/currentUser", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let token = common::admin_token();
    let (status, body) = common::get(&app, "/api/currentUser", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"], "phtcon");
    assert_eq!(body["roles"], serde_json::json!(["USER", "ADMIN"]));
}
