//! Local vendor endpoint for provider tests.
//!
//! Spawns an axum server on an ephemeral port that records every request body
//! and answers with a fixed response.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::extract::{Form, FromRequest, Multipart, Request, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFile {
    pub field: String,
    pub filename: String,
    pub content_type: Option<String>,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedBody {
    Multipart {
        fields: HashMap<String, String>,
        files: Vec<RecordedFile>,
    },
    UrlEncoded(HashMap<String, String>),
    Other(String),
}

impl RecordedBody {
    /// Text fields regardless of encoding
    pub fn fields(&self) -> HashMap<String, String> {
        match self {
            RecordedBody::Multipart { fields, .. } => fields.clone(),
            RecordedBody::UrlEncoded(fields) => fields.clone(),
            RecordedBody::Other(_) => HashMap::new(),
        }
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, RecordedBody::Multipart { .. })
    }

    pub fn is_urlencoded(&self) -> bool {
        matches!(self, RecordedBody::UrlEncoded(_))
    }
}

#[derive(Clone)]
struct MockState {
    response: String,
    requests: Arc<Mutex<Vec<RecordedBody>>>,
}

pub struct MockVendor {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedBody>>>,
}

impl MockVendor {
    /// Starts a vendor that answers every request with `response` as JSON
    pub async fn start(response: serde_json::Value) -> Self {
        Self::start_raw(response.to_string()).await
    }

    /// Starts a vendor that answers every request with a raw body
    pub async fn start_raw(response: impl Into<String>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            response: response.into(),
            requests: requests.clone(),
        };
        let app = Router::new().fallback(record).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock vendor");
        let addr = listener.local_addr().expect("mock vendor address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock vendor server");
        });

        Self { addr, requests }
    }

    pub fn url(&self) -> String {
        format!("http://{}/send", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedBody> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn single_request(&self) -> RecordedBody {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request, got {:?}", requests);
        requests.into_iter().next().expect("one request")
    }
}

async fn record(State(state): State<MockState>, request: Request<Body>) -> Response {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let recorded = if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(request, &())
            .await
            .expect("multipart body");
        let mut fields = HashMap::new();
        let mut files = Vec::new();
        while let Some(field) = multipart.next_field().await.expect("multipart field") {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(str::to_string) {
                Some(filename) => files.push(RecordedFile {
                    field: name,
                    filename,
                    content_type: field.content_type().map(str::to_string),
                    content: field.bytes().await.expect("file part").to_vec(),
                }),
                None => {
                    fields.insert(name, field.text().await.expect("text part"));
                }
            }
        }
        RecordedBody::Multipart { fields, files }
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(fields) = Form::<HashMap<String, String>>::from_request(request, &())
            .await
            .expect("urlencoded body");
        RecordedBody::UrlEncoded(fields)
    } else {
        let bytes = axum::body::to_bytes(request.into_body(), usize::MAX)
            .await
            .expect("raw body");
        RecordedBody::Other(String::from_utf8_lossy(&bytes).into_owned())
    };

    state.requests.lock().expect("requests lock").push(recorded);

    ([(header::CONTENT_TYPE, "application/json")], state.response).into_response()
}
