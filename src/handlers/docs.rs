use axum::{
    http::{header, HeaderMap},
    Json,
};
use serde_json::{json, Value};

/// GET /api/docs.json
///
/// Machine-readable description of the public API. `baseUrl` follows the
/// `Host` header so the usage snippets are copy-pasteable.
pub async fn api_docs_json(headers: HeaderMap) -> Json<Value> {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost:3001");
    let base_url = format!("http://{host}");

    Json(json!({
        "title": "WeChat article cover API",
        "description": "Extracts the cover image of a WeChat public-account article",
        "version": env!("CARGO_PKG_VERSION"),
        "baseUrl": base_url,
        "endpoints": {
            "parse": {
                "method": "POST",
                "path": "/api/parse",
                "request": {
                    "contentType": "application/json",
                    "body": {
                        "url": {
                            "type": "string",
                            "required": true,
                            "description": "Article link, e.g. https://mp.weixin.qq.com/s/xxxxx"
                        }
                    }
                },
                "response": {
                    "success": {
                        "status": 200,
                        "body": {
                            "success": true,
                            "coverUrl": "string (data URI, or image URL when the download failed)",
                            "originalUrl": "string (article URL)",
                            "imageUrl": "string (image URL, present when coverUrl is a data URI)",
                            "warning": "string (present when coverUrl is a bare image URL)"
                        }
                    },
                    "error": {
                        "status": [400, 404, 408, 500],
                        "body": { "error": "string" }
                    }
                },
                "usage": {
                    "curl": format!(
                        "curl -X POST {base_url}/api/parse -H \"Content-Type: application/json\" -d '{{\"url\": \"https://mp.weixin.qq.com/s/xxxxx\"}}'"
                    )
                }
            },
            "health": {
                "method": "GET",
                "path": "/health",
                "response": { "status": 200, "body": { "status": "ok" } }
            }
        }
    }))
}
