//! End-to-end flows against a mock recipe API.

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use wiremock::matchers::{bearer_token, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn profile_body() -> serde_json::Value {
    serde_json::json!({
        "username": "ana",
        "firstname": "Ana",
        "surname": "García",
        "email": "ana@example.com",
        "roles": ["USER", {"authority": "ROLE_PROFESSIONAL"}]
    })
}

fn catalog_page() -> serde_json::Value {
    serde_json::json!({
        "content": [
            {"idRecipe": 1, "name": "Fabada", "type": "main", "diet": "omnivore"},
            {"idRecipe": 2, "name": "Gazpacho", "type": "starter", "diet": "vegan"}
        ],
        "totalPages": 3
    })
}

fn seed_credential(home: &Path, token: &str) {
    fs::create_dir_all(home).unwrap();
    fs::write(
        home.join("credentials.json"),
        serde_json::json!({"token": token}).to_string(),
    )
    .unwrap();
}

#[tokio::test]
async fn test_login_stores_credential_and_prints_profile() {
    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .and(bearer_token("tok-good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .mount(&server)
        .await;

    cargo_bin_cmd!("ladle")
        .env("LADLE_HOME", temp.path())
        .env("LADLE_BASE_URL", format!("{}/api", server.uri()))
        .args(["login", "tok-good"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as ana."))
        .stdout(predicate::str::contains("ROLE_PROFESSIONAL"));

    let stored = fs::read_to_string(temp.path().join("credentials.json")).unwrap();
    assert!(stored.contains("tok-good"));
}

#[tokio::test]
async fn test_recipes_paginated_shows_route_and_favorites() {
    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();
    seed_credential(temp.path(), "tok-good");

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .and(bearer_token("tok-good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/recipes/all"))
        .and(query_param("page", "0"))
        .and(query_param("elements", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_page()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/recipes/favorites"))
        .and(bearer_token("tok-good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"idRecipe": 2, "name": "Gazpacho"}
        ])))
        .mount(&server)
        .await;

    cargo_bin_cmd!("ladle")
        .env("LADLE_HOME", temp.path())
        .env("LADLE_BASE_URL", format!("{}/api", server.uri()))
        .arg("recipes")
        .assert()
        .success()
        .stdout(predicate::str::contains("/recipes?page=0"))
        .stdout(predicate::str::contains("Fabada"))
        .stdout(predicate::str::contains("★"))
        .stdout(predicate::str::contains("Page 1 of 3"));
}

#[tokio::test]
async fn test_recipes_page_footer_at_max_page_index() {
    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/recipes/all"))
        .and(query_param("page", "4294967295"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_page()))
        .mount(&server)
        .await;

    cargo_bin_cmd!("ladle")
        .env("LADLE_HOME", temp.path())
        .env("LADLE_BASE_URL", format!("{}/api", server.uri()))
        .args(["recipes", "--page", "4294967295"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 4294967295 of 3"));
}

#[tokio::test]
async fn test_recipes_with_stale_token_self_heals() {
    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();
    seed_credential(temp.path(), "tok-expired");

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/recipes/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_page()))
        .mount(&server)
        .await;

    // Anonymous browsing still works and the bad credential is discarded.
    cargo_bin_cmd!("ladle")
        .env("LADLE_HOME", temp.path())
        .env("LADLE_BASE_URL", format!("{}/api", server.uri()))
        .arg("recipes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fabada"))
        .stdout(predicate::str::contains("★").not());

    assert!(!temp.path().join("credentials.json").exists());
}

#[tokio::test]
async fn test_search_drops_page_param_and_reports_no_results() {
    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/recipes/contains/unobtainium"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    cargo_bin_cmd!("ladle")
        .env("LADLE_HOME", temp.path())
        .env("LADLE_BASE_URL", format!("{}/api", server.uri()))
        .args(["recipes", "--search", "unobtainium", "--page", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/recipes\n"))
        .stdout(predicate::str::contains("page=").not())
        .stdout(predicate::str::contains("No recipes found for \"unobtainium\"."));
}

#[tokio::test]
async fn test_create_requires_professional_role() {
    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();
    seed_credential(temp.path(), "tok-home-cook");

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "username": "bob",
            "roles": ["USER"]
        })))
        .mount(&server)
        .await;

    cargo_bin_cmd!("ladle")
        .env("LADLE_HOME", temp.path())
        .env("LADLE_BASE_URL", format!("{}/api", server.uri()))
        .args([
            "create",
            "--name",
            "Tortilla",
            "--prep-time",
            "10m",
            "--cook-time",
            "20m",
            "--total-time",
            "30m",
            "--servings",
            "4",
            "--ingredients",
            "eggs, potatoes",
            "--steps",
            "fry, flip",
            "--type",
            "main",
            "--diet",
            "vegetarian",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("professional account"));
}

#[tokio::test]
async fn test_create_posts_recipe() {
    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();
    seed_credential(temp.path(), "tok-pro");

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .and(bearer_token("tok-pro"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/recipes"))
        .and(bearer_token("tok-pro"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({"idRecipe": 42})),
        )
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("ladle")
        .env("LADLE_HOME", temp.path())
        .env("LADLE_BASE_URL", format!("{}/api", server.uri()))
        .args([
            "create",
            "--name",
            "Tortilla",
            "--prep-time",
            "10m",
            "--cook-time",
            "20m",
            "--total-time",
            "30m",
            "--servings",
            "4",
            "--ingredients",
            "eggs, potatoes",
            "--steps",
            "fry, flip",
            "--type",
            "main",
            "--diet",
            "vegetarian",
            "--premium",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created recipe 42."));
}

#[tokio::test]
async fn test_logout_after_login() {
    let temp = tempfile::tempdir().unwrap();
    seed_credential(temp.path(), "tok-good");

    cargo_bin_cmd!("ladle")
        .env("LADLE_HOME", temp.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));

    assert!(!temp.path().join("credentials.json").exists());

    cargo_bin_cmd!("ladle")
        .env("LADLE_HOME", temp.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}
