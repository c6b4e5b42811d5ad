use axum::routing::get;
use axum::Router;
use reqwest::StatusCode;
use tokio::net::TcpListener;

use pokedex::error::PokedexError;
use pokedex::keepalive::ping;

#[tokio::test]
async fn ping_reports_the_status() {
    let app = Router::new().route("/api/locations", get(|| async { "ok" }));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let client = reqwest::Client::new();
    let ok = ping(&client, &format!("http://{addr}/api/locations")).await.unwrap();
    let missing = ping(&client, &format!("http://{addr}/nope")).await.unwrap();

    assert_eq!(ok, StatusCode::OK);
    assert_eq!(missing, StatusCode::NOT_FOUND);
    handle.abort();
}

#[tokio::test]
async fn unreachable_target_is_upstream_unavailable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = ping(&reqwest::Client::new(), &format!("http://{addr}/")).await;

    assert!(matches!(result, Err(PokedexError::UpstreamUnavailable(_))));
}
