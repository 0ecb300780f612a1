#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};

use coffee_shop_api::auth::{KeyCache, StaticKeySource, TokenVerifier};
use coffee_shop_api::database::MemoryDrinkStore;
use coffee_shop_api::{app, AppState};

pub const ISSUER: &str = "https://coffee-shop.test/";
pub const AUDIENCE: &str = "coffee";
const SIGNING_KEY: &[u8] = include_bytes!("../fixtures/signing_key.pem");
const JWKS: &str = include_str!("../fixtures/jwks.json");

/// In-process server with its own empty menu
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let source = Arc::new(StaticKeySource::from_json(JWKS)?);
        let verifier = TokenVerifier::new(KeyCache::new(source, Duration::from_secs(60)), AUDIENCE, ISSUER);
        let state = AppState::new(Arc::new(MemoryDrinkStore::new()), Arc::new(verifier));
        let router = app(state, &["*".to_string()]);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind {}", base_url))?;
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("server");
        });

        Ok(Self {
            port,
            base_url,
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Creates a drink through the API and returns its id
    pub async fn create_drink(&self, title: &str, recipe: Value) -> Result<i64> {
        let res = self
            .client
            .post(self.url("/drinks"))
            .bearer_auth(token(&["post:drinks"]))
            .json(&json!({ "title": title, "recipe": recipe }))
            .send()
            .await?;
        anyhow::ensure!(res.status().is_success(), "create failed: {}", res.status());

        let body: Value = res.json().await?;
        body["drinks"][0]["id"].as_i64().context("created drink has no id")
    }
}

/// Signs a token for the test issuer with the given permissions, valid for an hour
pub fn token(permissions: &[&str]) -> String {
    sign(claims(permissions, 3600))
}

/// Claims for the test issuer, expiring `expires_in` seconds from now (negative = already expired)
pub fn claims(permissions: &[&str], expires_in: i64) -> Value {
    let now = Utc::now().timestamp();
    json!({
        "sub": "auth0|test-barista",
        "iss": ISSUER,
        "aud": AUDIENCE,
        "iat": now,
        "exp": now + expires_in,
        "permissions": permissions,
    })
}

pub fn sign(claims: Value) -> String {
    sign_with_kid(claims, Some("test-key"))
}

pub fn sign_with_kid(claims: Value, kid: Option<&str>) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = kid.map(str::to_string);
    let key = EncodingKey::from_rsa_pem(SIGNING_KEY).expect("fixture signing key");
    encode(&header, &claims, &key).expect("sign token")
}

pub fn latte_recipe() -> Value {
    json!({"name": "milk", "color": "white", "parts": 1})
}
