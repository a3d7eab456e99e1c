use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

pub struct TestServer {
    pub base_url: String,
}

pub fn catalog() -> Value {
    json!([
        {
            "formId": "f1",
            "name": "Intake",
            "formDefinition": {
                "title": "Intake",
                "components": [{"type": "textfield", "key": "firstName", "label": "First name"}]
            }
        },
        {
            "formId": "f2",
            "name": "Survey",
            "formDefinition": {
                "title": "Survey",
                "components": [
                    {"type": "htmlelement", "key": "icon", "content": "<svg viewBox=\"0 0 8 8\"><path d=\"M0 0h8\"/></svg>"},
                    {"type": "radio", "key": "rating", "label": "Rating"}
                ]
            }
        }
    ])
}

impl TestServer {
    pub async fn new() -> Self {
        let app = Router::new()
            .route("/forms", get(|| async { Json(catalog()) }))
            .route("/broken", get(|| async { "<html>not json</html>" }))
            .route("/object", get(|| async { Json(json!({"forms": []})) }))
            .route(
                "/down",
                get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
            );

        // Start server on random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestServer { base_url }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// URL of a port nothing listens on
pub async fn closed_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/forms", addr)
}
