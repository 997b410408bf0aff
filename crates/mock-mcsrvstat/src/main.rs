//! Mock status service.
//!
//! Serves canned mcsrvstat.us v3 responses so the terminal can be exercised
//! without network access:
//!
//! | Address               | Response                                    |
//! |-----------------------|---------------------------------------------|
//! | `play.example.com`    | online, 1.20, 5 / 20 players, one MOTD line |
//! | `dead.example.com`    | offline                                     |
//! | `broken.example.com`  | HTTP 500                                    |
//! | `garbage.example.com` | JSON without `online`                       |
//! | anything else         | offline, echoing the address as hostname    |

use axum::{
    Router,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde_json::json;
use tracing::info;

fn app() -> Router {
    Router::new().route("/3/{address}", get(status))
}

async fn status(Path(address): Path<String>) -> Response {
    info!(address = %address, "status requested");
    match address.as_str() {
        "play.example.com" => Json(json!({
            "online": true,
            "ip": "203.0.113.10",
            "port": 25565,
            "hostname": "play.example.com",
            "version": "1.20",
            "players": { "online": 5, "max": 20 },
            "motd": {
                "raw": ["§aWelcome!"],
                "clean": ["Welcome!"],
                "html": ["<span style=\"color: #55FF55\">Welcome!</span>"]
            },
            "whitelist": false
        }))
        .into_response(),
        "broken.example.com" => {
            (StatusCode::INTERNAL_SERVER_ERROR, "upstream resolver failure").into_response()
        }
        "garbage.example.com" => Json(json!({ "status": "unknown" })).into_response(),
        other => Json(json!({
            "online": false,
            "hostname": other,
            "debug": { "ping": false, "query": false }
        }))
        .into_response(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("MOCK_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(4001);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        address = %addr,
        "mock status service listening, use STATUS_API_URL=http://localhost:{port}/3"
    );
    axum::serve(listener, app()).await?;
    Ok(())
}
