pub mod assets;
pub mod docs;
pub mod parse;

use axum::Json;
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "service is running",
        "service": "wechat-cover-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
