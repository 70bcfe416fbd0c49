mod common;

use axum::http::StatusCode;
use serde_json::json;

const BASE: &str = "/api/UCSBDiningCommonsMenuItem";

#[tokio::test]
async fn admin_can_create_and_the_store_assigns_ids() {
    let app = common::app();
    let admin = common::admin_token();

    let (status, first) = common::post(
        &app,
        &format!("{BASE}/post?diningCommonsCode=ortega&name=Baked%20Pesto%20Pasta&station=Entree%20Specials"),
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        first,
        json!({
            "id": 1,
            "diningCommonsCode": "ortega",
            "name": "Baked Pesto Pasta",
            "station": "Entree Specials"
        })
    );

    let (status, second) = common::post(
        &app,
        &format!("{BASE}/post?diningCommonsCode=portola&name=Cream%20of%20Broccoli%20Soup&station=Greens%20%26%20Grains"),
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["id"], 2);
}

#[tokio::test]
async fn created_records_round_trip_through_get() {
    let app = common::app();
    let admin = common::admin_token();
    let user = common::user_token();

    let (_, created) = common::post(
        &app,
        &format!("{BASE}/post?diningCommonsCode=ortega&name=Tofu%20Banh%20Mi&station=Entree%20Specials"),
        Some(&admin),
    )
    .await;

    let uri = format!("{BASE}?id={}", created["id"]);
    let (status, fetched) = common::get(&app, &uri, Some(&user)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    // Lookups do not mutate: a second read returns the identical record.
    let (_, fetched_again) = common::get(&app, &uri, Some(&user)).await;
    assert_eq!(fetched_again, fetched);

    let (status, all) = common::get(&app, &format!("{BASE}/all"), Some(&user)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all, json!([created]));
}

#[tokio::test]
async fn missing_ids_return_the_exact_not_found_contract() {
    let app = common::app();
    let user = common::user_token();
    let admin = common::admin_token();

    let expected = json!({
        "type": "EntityNotFoundException",
        "message": "UCSBDiningCommonsMenuItem with id 123 not found"
    });

    let (status, body) = common::get(&app, &format!("{BASE}?id=123"), Some(&user)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, expected);

    let replacement = json!({
        "id": 123,
        "diningCommonsCode": "carrillo",
        "name": "Chicken Caesar Salad",
        "station": "Entrees"
    });
    let (status, body) =
        common::put(&app, &format!("{BASE}?id=123"), Some(&admin), replacement).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, expected);

    let (status, body) = common::delete(&app, &format!("{BASE}?id=123"), Some(&admin)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, expected);

    // The rejected update body was never persisted.
    let (_, all) = common::get(&app, &format!("{BASE}/all"), Some(&user)).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn update_overwrites_fields_but_never_the_key() {
    let app = common::app();
    let admin = common::admin_token();
    let user = common::user_token();

    let (_, created) = common::post(
        &app,
        &format!("{BASE}/post?diningCommonsCode=ortega&name=Sriracha%20Mac&station=Entrees"),
        Some(&admin),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    // The body claims a different id; the record under `id` still takes
    // the body's non-key fields.
    let (status, updated) = common::put(
        &app,
        &format!("{BASE}?id={id}"),
        Some(&admin),
        json!({
            "id": id + 41,
            "diningCommonsCode": "portola",
            "name": "Sriracha Mac Supreme",
            "station": "Brick Oven"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        updated,
        json!({
            "id": id,
            "diningCommonsCode": "portola",
            "name": "Sriracha Mac Supreme",
            "station": "Brick Oven"
        })
    );

    let (_, fetched) = common::get(&app, &format!("{BASE}?id={id}"), Some(&user)).await;
    assert_eq!(fetched, updated);

    // Nothing was created under the id the body claimed.
    let (status, _) = common::get(&app, &format!("{BASE}?id={}", id + 41), Some(&user)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_the_record_and_reports_it() {
    let app = common::app();
    let admin = common::admin_token();
    let user = common::user_token();

    let (_, created) = common::post(
        &app,
        &format!("{BASE}/post?diningCommonsCode=carrillo&name=Apple%20Pie&station=Desserts"),
        Some(&admin),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = common::delete(&app, &format!("{BASE}?id={id}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "message": format!("UCSBDiningCommonsMenuItem with id {id} deleted") })
    );

    let (status, _) = common::get(&app, &format!("{BASE}?id={id}"), Some(&user)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, all) = common::get(&app, &format!("{BASE}/all"), Some(&user)).await;
    assert_eq!(all, json!([]));

    // Deleting again hits the not-found contract.
    let (status, body) = common::delete(&app, &format!("{BASE}?id={id}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["type"], "EntityNotFoundException");
}

#[tokio::test]
async fn create_with_missing_fields_is_a_binding_error() {
    let app = common::app();
    let admin = common::admin_token();
    let user = common::user_token();

    let (status, _) = common::post(
        &app,
        &format!("{BASE}/post?diningCommonsCode=ortega"),
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Binding failures never reach the store.
    let (_, all) = common::get(&app, &format!("{BASE}/all"), Some(&user)).await;
    assert_eq!(all, serde_json::json!([]));
}
