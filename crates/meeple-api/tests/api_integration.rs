//! End-to-end API tests over a seeded in-memory database.

use anyhow::Result;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use meeple_api::config::Config;
use meeple_api::server::Server;

async fn test_app() -> Result<Router> {
    let pool = meeple_store::db::connect_in_memory().await?;
    meeple_store::seed::seed(&pool).await?;
    Ok(Server::new(Config::default(), pool).router())
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let request = match body {
        Some(payload) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))?,
        None => Request::builder().method(method).uri(uri).body(Body::empty())?,
    };
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

async fn get(app: &Router, uri: &str) -> Result<(StatusCode, Value)> {
    send(app, "GET", uri, None).await
}

fn object_keys(value: &Value) -> Vec<String> {
    value
        .as_object()
        .expect("expected a JSON object")
        .keys()
        .cloned()
        .collect()
}

#[tokio::test]
async fn api_serves_the_full_catalog() -> Result<()> {
    let app = test_app().await?;
    let (status, body) = get(&app, "/api").await?;
    assert_eq!(status, StatusCode::OK);

    let endpoints = &body["endpoints"];
    assert_eq!(object_keys(endpoints).len(), 9);
    assert_eq!(endpoints["/api"]["get"]["req-body"], "none");
    assert_eq!(endpoints["/api"]["get"]["res-body"], "json");
    assert!(endpoints["/api"]["get"]["example"].is_null());
    assert_eq!(
        endpoints["/api/reviews"]["get"]["queries"][0],
        "category"
    );
    Ok(())
}

#[tokio::test]
async fn api_method_filter_keeps_single_verb_maps() -> Result<()> {
    let app = test_app().await?;
    let (status, body) = get(&app, "/api?method=delete").await?;
    assert_eq!(status, StatusCode::OK);

    let endpoints = body["endpoints"].as_object().unwrap();
    assert_eq!(
        endpoints.keys().collect::<Vec<_>>(),
        vec![
            "/api/categories/:slug",
            "/api/reviews/:review_id",
            "/api/comments/:comment_id",
            "/api/users/:username",
        ]
    );
    for methods in endpoints.values() {
        assert_eq!(object_keys(methods), vec!["delete"]);
    }
    Ok(())
}

#[tokio::test]
async fn api_ignores_unknown_criteria() -> Result<()> {
    let app = test_app().await?;
    let (_, unfiltered) = get(&app, "/api").await?;
    let (status, filtered) = get(&app, "/api?banana=7&method=teapot&hasKeys=maybe").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(filtered, unfiltered);
    Ok(())
}

#[tokio::test]
async fn api_pagination_counts_surviving_paths() -> Result<()> {
    let app = test_app().await?;
    let (status, body) = get(&app, "/api?method=post&limit=2&p=2").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        object_keys(&body["endpoints"]),
        vec!["/api/reviews/:review_id/comments", "/api/users"]
    );
    Ok(())
}

#[tokio::test]
async fn api_pages_partition_the_catalog() -> Result<()> {
    let app = test_app().await?;
    let (_, full) = get(&app, "/api?limit=100").await?;
    let all_paths = object_keys(&full["endpoints"]);

    let mut collected = Vec::new();
    for page in 1..=3 {
        let (_, body) = get(&app, &format!("/api?limit=4&p={page}")).await?;
        collected.extend(object_keys(&body["endpoints"]));
    }
    assert_eq!(collected, all_paths);
    Ok(())
}

#[tokio::test]
async fn api_body_shape_filters() -> Result<()> {
    let app = test_app().await?;
    let (_, body) = get(&app, "/api?req_body=json").await?;
    for methods in body["endpoints"].as_object().unwrap().values() {
        for verb in object_keys(methods) {
            assert!(verb == "post" || verb == "patch");
        }
    }

    let (status, body) = get(&app, "/api?req_body=xml").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["endpoints"].as_object().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn categories_listing_is_paginated() -> Result<()> {
    let app = test_app().await?;
    let (status, body) = get(&app, "/api/categories?limit=2&p=2").await?;
    assert_eq!(status, StatusCode::OK);

    let slugs: Vec<&str> = body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["euro game", "social deduction"]);
    Ok(())
}

#[tokio::test]
async fn category_crud_round_trip() -> Result<()> {
    let app = test_app().await?;
    let payload = json!({"slug": "deck building", "description": "Build a deck as you play"});

    let (status, body) = send(&app, "POST", "/api/categories", Some(payload.clone())).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["category"], payload);

    let (status, body) = get(&app, "/api/categories/deck%20building").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], payload);

    let (status, body) = send(
        &app,
        "PATCH",
        "/api/categories/deck%20building",
        Some(json!({"description": "Your deck grows as you play"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"]["description"], "Your deck grows as you play");

    let (status, body) = send(&app, "DELETE", "/api/categories/deck%20building", None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, body) = get(&app, "/api/categories/deck%20building").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Category not found");
    Ok(())
}

#[tokio::test]
async fn extra_client_fields_are_dropped() -> Result<()> {
    let app = test_app().await?;
    let (status, body) = send(
        &app,
        "POST",
        "/api/categories",
        Some(json!({"slug": "trains", "description": "Choo", "owner": "mallionaire"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(object_keys(&body["category"]), vec!["slug", "description"]);
    Ok(())
}

#[tokio::test]
async fn duplicate_category_conflicts() -> Result<()> {
    let app = test_app().await?;
    let (status, body) = send(
        &app,
        "POST",
        "/api/categories",
        Some(json!({"slug": "euro game", "description": "again"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["msg"], "Category already exists");
    Ok(())
}

#[tokio::test]
async fn reviews_listing_defaults_to_recency() -> Result<()> {
    let app = test_app().await?;
    let (status, body) = get(&app, "/api/reviews").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_count"], 13);

    let reviews = body["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 10);
    assert_eq!(reviews[0]["review_id"], 7);
    for review in reviews {
        assert!(review["comment_count"].is_i64());
        assert!(review.get("review_body").is_none());
    }
    Ok(())
}

#[tokio::test]
async fn reviews_category_filter_adjusts_the_total() -> Result<()> {
    let app = test_app().await?;
    let (status, body) =
        get(&app, "/api/reviews?category=social%20deduction&limit=7&p=2").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_count"], 11);
    assert_eq!(body["reviews"].as_array().unwrap().len(), 4);

    let (status, body) = get(&app, "/api/reviews?category=trains").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_count"], 0);
    assert!(body["reviews"].as_array().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn review_detail_carries_its_comment_count() -> Result<()> {
    let app = test_app().await?;
    let (status, body) = get(&app, "/api/reviews/2").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["review"]["comment_count"], 3);
    assert_eq!(body["review"]["title"], "Jenga");

    let (status, body) = get(&app, "/api/reviews/999").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Review not found");
    Ok(())
}

#[tokio::test]
async fn review_ids_must_be_numeric() -> Result<()> {
    let app = test_app().await?;
    let (status, body) = get(&app, "/api/reviews/banana").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Invalid request");
    Ok(())
}

#[tokio::test]
async fn review_creation_applies_defaults() -> Result<()> {
    let app = test_app().await?;
    let (status, body) = send(
        &app,
        "POST",
        "/api/reviews",
        Some(json!({
            "owner": "mallionaire",
            "title": "Azul",
            "review_body": "Tiles!",
            "category": "dexterity"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let review = &body["review"];
    assert_eq!(review["votes"], 0);
    assert_eq!(review["comment_count"], 0);
    assert!(review["designer"].is_null());
    assert!(
        review["review_img_url"]
            .as_str()
            .unwrap()
            .starts_with("https://images.pexels.com/")
    );
    Ok(())
}

#[tokio::test]
async fn review_creation_rejects_dangling_references() -> Result<()> {
    let app = test_app().await?;
    let (status, body) = send(
        &app,
        "POST",
        "/api/reviews",
        Some(json!({
            "owner": "mallionaire",
            "title": "Ticket to Ride",
            "review_body": "Trains!",
            "category": "trains"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Referenced resource not found");
    Ok(())
}

#[tokio::test]
async fn review_vote_patching() -> Result<()> {
    let app = test_app().await?;
    let (status, body) = send(
        &app,
        "PATCH",
        "/api/reviews/9",
        Some(json!({"inc_votes": 2})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["review"]["votes"], 12);
    // Updates return the row alone, without the aggregate.
    assert!(body["review"].get("comment_count").is_none());
    Ok(())
}

#[tokio::test]
async fn review_patch_body_failures_are_canonical() -> Result<()> {
    let app = test_app().await?;

    let (status, body) = send(
        &app,
        "PATCH",
        "/api/reviews/9",
        Some(json!({"inc_votes": "two"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Invalid request");

    let (status, body) = send(&app, "PATCH", "/api/reviews/9", Some(json!({}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Insufficient information to make request");

    let request = Request::builder()
        .method("PATCH")
        .uri("/api/reviews/9")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("votes++"))?;
    let response = app.clone().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let value: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(value["msg"], "Invalid body format");
    Ok(())
}

#[tokio::test]
async fn review_deletion_cascades_to_comments() -> Result<()> {
    let app = test_app().await?;
    let (status, _) = send(&app, "DELETE", "/api/reviews/2", None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = get(&app, "/api/comments/1").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Comment not found");

    let (status, body) = send(&app, "DELETE", "/api/reviews/2", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Review not found");
    Ok(())
}

#[tokio::test]
async fn comment_listing_sorts_and_filters() -> Result<()> {
    let app = test_app().await?;
    let (status, body) = get(&app, "/api/reviews/3/comments").await?;
    assert_eq!(status, StatusCode::OK);
    let comments = body["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert!(comments[0]["created_at"].as_str() >= comments[1]["created_at"].as_str());

    let (_, body) = get(&app, "/api/reviews/2/comments?author=bainesface").await?;
    let comments = body["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    for comment in comments {
        assert_eq!(comment["author"], "bainesface");
    }
    Ok(())
}

#[tokio::test]
async fn comment_listing_distinguishes_missing_from_quiet_reviews() -> Result<()> {
    let app = test_app().await?;
    let (status, body) = get(&app, "/api/reviews/1/comments").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["comments"].as_array().unwrap().is_empty());

    let (status, body) = get(&app, "/api/reviews/999/comments").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Review not found");
    Ok(())
}

#[tokio::test]
async fn comment_creation_and_failure_modes() -> Result<()> {
    let app = test_app().await?;
    let (status, body) = send(
        &app,
        "POST",
        "/api/reviews/1/comments",
        Some(json!({"username": "mallionaire", "body": "A modern classic"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["comment"]["author"], "mallionaire");
    assert_eq!(body["comment"]["votes"], 0);
    assert_eq!(body["comment"]["review_id"], 1);

    let (status, body) = send(
        &app,
        "POST",
        "/api/reviews/999/comments",
        Some(json!({"username": "mallionaire", "body": "ghost"})),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Review not found");

    let (status, body) = send(
        &app,
        "POST",
        "/api/reviews/1/comments",
        Some(json!({"username": "nobody", "body": "ghost"})),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Referenced resource not found");

    let (status, body) = send(
        &app,
        "POST",
        "/api/reviews/1/comments",
        Some(json!({"username": "mallionaire"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Insufficient information to make request");
    Ok(())
}

#[tokio::test]
async fn comment_votes_and_deletion() -> Result<()> {
    let app = test_app().await?;
    let (status, body) = send(
        &app,
        "PATCH",
        "/api/comments/1",
        Some(json!({"inc_votes": -1})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comment"]["votes"], 15);

    let (status, _) = send(&app, "DELETE", "/api/comments/1", None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "DELETE", "/api/comments/1", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Comment not found");
    Ok(())
}

#[tokio::test]
async fn user_crud_and_cascades() -> Result<()> {
    let app = test_app().await?;
    let (status, body) = get(&app, "/api/users").await?;
    assert_eq!(status, StatusCode::OK);
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 4);
    assert_eq!(users[0]["username"], "bainesface");

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({"username": "meeplemaster", "name": "mo"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["user"]["avatar_url"].is_null());

    let (status, body) = send(
        &app,
        "PATCH",
        "/api/users/mallionaire",
        Some(json!({"name": "harriet"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "harriet");
    assert!(body["user"]["avatar_url"].as_str().is_some());

    let (status, body) = send(&app, "PATCH", "/api/users/mallionaire", Some(json!({}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Insufficient information to make request");

    // mallionaire owns 11 of the 13 seeded reviews.
    let (status, _) = send(&app, "DELETE", "/api/users/mallionaire", None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, body) = get(&app, "/api/reviews").await?;
    assert_eq!(body["total_count"], 2);
    Ok(())
}

#[tokio::test]
async fn unknown_routes_and_methods_share_one_shape() -> Result<()> {
    let app = test_app().await?;
    let (status, body) = get(&app, "/api/nope").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Route not found");

    let (status, body) = send(
        &app,
        "PUT",
        "/api/categories",
        Some(json!({"slug": "x", "description": "y"})),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Route not found");
    Ok(())
}

#[tokio::test]
async fn catalog_covers_every_served_route() -> Result<()> {
    let app = test_app().await?;
    let (_, body) = get(&app, "/api?limit=100").await?;
    let endpoints = body["endpoints"].as_object().unwrap();

    for (path, methods) in endpoints {
        let uri = path
            .replace(":slug", "euro%20game")
            .replace(":review_id", "1")
            .replace(":comment_id", "1")
            .replace(":username", "mallionaire");
        for verb in object_keys(methods) {
            // Fresh state per probe so deletions cannot mask later paths.
            let app = test_app().await?;
            let method = verb.to_uppercase();
            let payload = if verb == "post" || verb == "patch" {
                Some(json!({}))
            } else {
                None
            };
            let (status, body) = send(&app, &method, &uri, payload).await?;
            assert!(
                !(status == StatusCode::NOT_FOUND && body["msg"] == "Route not found"),
                "{method} {uri} is advertised but not served"
            );
        }
    }
    Ok(())
}
