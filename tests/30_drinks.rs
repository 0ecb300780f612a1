mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{latte_recipe, token, TestServer};

const ALL: [&str; 4] = ["get:drinks-detail", "post:drinks", "patch:drinks", "delete:drinks"];

async fn detail(server: &TestServer) -> Result<(StatusCode, Value)> {
    let res = server
        .client
        .get(server.url("/drinks-detail"))
        .bearer_auth(token(&ALL))
        .send()
        .await?;
    Ok((res.status(), res.json().await?))
}

async fn post(server: &TestServer, body: Value) -> Result<(StatusCode, Value)> {
    let res = server
        .client
        .post(server.url("/drinks"))
        .bearer_auth(token(&ALL))
        .json(&body)
        .send()
        .await?;
    Ok((res.status(), res.json().await?))
}

async fn patch(server: &TestServer, path: &str, body: Value) -> Result<(StatusCode, Value)> {
    let res = server
        .client
        .patch(server.url(path))
        .bearer_auth(token(&ALL))
        .json(&body)
        .send()
        .await?;
    Ok((res.status(), res.json().await?))
}

async fn delete(server: &TestServer, path: &str) -> Result<(StatusCode, Value)> {
    let res = server
        .client
        .delete(server.url(path))
        .bearer_auth(token(&ALL))
        .send()
        .await?;
    Ok((res.status(), res.json().await?))
}

#[tokio::test]
async fn empty_menu_is_not_found_in_both_views() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server.client.get(server.url("/drinks")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body, json!({"success": false, "error": 404, "message": "Not found"}));

    let (status, _) = detail(&server).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn created_drink_shows_up_in_the_detail_view() -> Result<()> {
    let server = TestServer::start().await?;

    let (status, body) = post(&server, json!({"title": "Latte", "recipe": latte_recipe()})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["drinks"][0]["title"], "Latte");
    assert_eq!(body["drinks"][0]["recipe"], json!([{"name": "milk", "color": "white", "parts": 1}]));

    let (status, body) = detail(&server).await?;
    assert_eq!(status, StatusCode::OK);
    let drinks = body["drinks"].as_array().unwrap();
    assert!(drinks.iter().any(|d| {
        d["title"] == "Latte" && d["recipe"] == json!([{"name": "milk", "color": "white", "parts": 1}])
    }));
    Ok(())
}

#[tokio::test]
async fn short_view_hides_ingredient_names() -> Result<()> {
    let server = TestServer::start().await?;
    let id = server
        .create_drink(
            "Flat White",
            json!([
                {"name": "espresso", "color": "brown", "parts": 1},
                {"name": "milk", "color": "white", "parts": 2}
            ]),
        )
        .await?;

    let body: Value = server.client.get(server.url("/drinks")).send().await?.json().await?;
    assert_eq!(
        body,
        json!({
            "success": true,
            "drinks": [{
                "id": id,
                "title": "Flat White",
                "recipe": [
                    {"color": "brown", "parts": 1},
                    {"color": "white", "parts": 2}
                ]
            }]
        })
    );
    Ok(())
}

#[tokio::test]
async fn duplicate_titles_are_rejected() -> Result<()> {
    let server = TestServer::start().await?;
    server.create_drink("Latte", latte_recipe()).await?;

    let (status, body) = post(&server, json!({"title": "Latte", "recipe": latte_recipe()})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], 400);
    assert_eq!(body["message"], "Title already exists.");
    Ok(())
}

#[tokio::test]
async fn create_validates_title_and_recipe() -> Result<()> {
    let server = TestServer::start().await?;

    let (status, body) = post(&server, json!({"recipe": latte_recipe()})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "bad request");

    let (status, _) = post(&server, json!({"title": "", "recipe": latte_recipe()})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post(&server, json!({"title": "Latte"})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Recipe is required");

    let (status, body) = post(&server, json!({"title": "Latte", "recipe": "milk"})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Recipe must be an ingredient or a list of ingredients.");

    let res = server
        .client
        .post(server.url("/drinks"))
        .bearer_auth(token(&ALL))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn partial_update_leaves_the_title_alone() -> Result<()> {
    let server = TestServer::start().await?;
    let id = server.create_drink("Latte", latte_recipe()).await?;

    let recipe = json!([
        {"name": "milk", "color": "white", "parts": 3},
        {"name": "espresso", "color": "brown", "parts": 1}
    ]);
    let (status, body) = patch(&server, &format!("/drinks/{}", id), json!({"recipe": recipe.clone()})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drinks"][0]["title"], "Latte");
    assert_eq!(body["drinks"][0]["recipe"], recipe);

    let (_, body) = detail(&server).await?;
    assert_eq!(body["drinks"][0]["title"], "Latte");
    assert_eq!(body["drinks"][0]["recipe"][1]["name"], "espresso");
    Ok(())
}

#[tokio::test]
async fn update_ignores_empty_values() -> Result<()> {
    let server = TestServer::start().await?;
    let id = server.create_drink("Latte", latte_recipe()).await?;

    let (status, body) = patch(&server, &format!("/drinks/{}", id), json!({"title": "", "recipe": []})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drinks"][0]["title"], "Latte");
    assert_eq!(body["drinks"][0]["recipe"], json!([latte_recipe()]));

    let (status, body) = patch(&server, &format!("/drinks/{}", id), json!({"title": "Cafe Latte"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drinks"][0]["title"], "Cafe Latte");
    Ok(())
}

#[tokio::test]
async fn update_of_unknown_drink_is_not_found() -> Result<()> {
    let server = TestServer::start().await?;

    let (status, body) = patch(&server, "/drinks/42", json!({"title": "Mocha"})).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not found");

    let (status, _) = patch(&server, "/drinks/mocha", json!({"title": "Mocha"})).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn renaming_onto_an_existing_title_is_unprocessable() -> Result<()> {
    let server = TestServer::start().await?;
    server.create_drink("Latte", latte_recipe()).await?;
    let mocha = server.create_drink("Mocha", latte_recipe()).await?;

    let (status, body) = patch(&server, &format!("/drinks/{}", mocha), json!({"title": "Latte"})).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({"success": false, "error": 422, "message": "unprocessable"}));
    Ok(())
}

#[tokio::test]
async fn delete_is_not_repeatable() -> Result<()> {
    let server = TestServer::start().await?;
    let id = server.create_drink("Latte", latte_recipe()).await?;
    let path = format!("/drinks/{}", id);

    let (status, body) = delete(&server, &path).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "delete": id}));

    let (status, body) = delete(&server, &path).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], 404);

    let res = server.client.get(server.url("/drinks")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
