use std::env;

use axum::{Json, Router, http::StatusCode, routing::post};
use serde_json::json;
use spinctl::spotify;
use tokio::net::TcpListener;

// Helper function to serve one canned token-endpoint response on an
// ephemeral port
async fn token_endpoint(status: StatusCode, body: serde_json::Value) -> String {
    let app = Router::new().route(
        "/api/token",
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/api/token", addr)
}

#[tokio::test]
async fn test_exchange_code_pkce_token_endpoint_handling() {
    // Environment is process global, so every scenario runs in this one test
    unsafe {
        env::set_var("SPOTIFY_API_AUTH_CLIENT_ID", "test-client");
        env::set_var("SPOTIFY_API_REDIRECT_URI", "http://127.0.0.1:8080/callback");
    }

    // A denied grant surfaces as an error, not an empty token
    let denied = token_endpoint(
        StatusCode::BAD_REQUEST,
        json!({
            "error": "invalid_grant",
            "error_description": "Invalid authorization code"
        }),
    )
    .await;
    unsafe {
        env::set_var("SPOTIFY_API_TOKEN_URL", &denied);
    }
    let result = spotify::auth::exchange_code_pkce("expired-code", "verifier").await;
    assert!(result.is_err());

    // A granted exchange yields the full token
    let granted = token_endpoint(
        StatusCode::OK,
        json!({
            "access_token": "fresh-access",
            "token_type": "Bearer",
            "scope": "user-library-read",
            "expires_in": 3600,
            "refresh_token": "fresh-refresh"
        }),
    )
    .await;
    unsafe {
        env::set_var("SPOTIFY_API_TOKEN_URL", &granted);
    }
    let token = spotify::auth::exchange_code_pkce("valid-code", "verifier")
        .await
        .unwrap();
    assert_eq!(token.access_token, "fresh-access");
    assert_eq!(token.refresh_token, "fresh-refresh");
    assert_eq!(token.scope, "user-library-read");
    assert_eq!(token.expires_in, 3600);
    assert!(token.obtained_at > 0);

    // A grant without a refresh token is rejected rather than defaulted
    let partial = token_endpoint(
        StatusCode::OK,
        json!({
            "access_token": "fresh-access",
            "token_type": "Bearer",
            "scope": "user-library-read",
            "expires_in": 3600
        }),
    )
    .await;
    unsafe {
        env::set_var("SPOTIFY_API_TOKEN_URL", &partial);
    }
    let result = spotify::auth::exchange_code_pkce("valid-code", "verifier").await;
    assert!(result.is_err());
}
