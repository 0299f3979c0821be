use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use rstest::fixture;
use serde_json::{Value, json};
use tracing::info;
use zap_api_core::ZapClient;

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    info!("Tracing initialized");
}

/// Spider state kept by the fake ZAP API.
#[derive(Debug)]
pub struct SpiderState {
    pub progress: u8,
    pub results: Vec<String>,
    pub excluded: Vec<String>,
    pub max_depth: i64,
    pub thread_count: i64,
    pub post_form: bool,
    pub user_agent: String,
    pub calls: Vec<(String, HashMap<String, String>)>,
}

impl Default for SpiderState {
    fn default() -> Self {
        Self {
            progress: 0,
            results: vec![],
            excluded: vec![],
            max_depth: 5,
            thread_count: 2,
            post_form: true,
            user_agent: "Mozilla/5.0".to_string(),
            calls: vec![],
        }
    }
}

type SharedState = Arc<Mutex<SpiderState>>;

/// A fake ZAP serving `/JSON/spider/...` on a random local port.
#[derive(Debug, Clone)]
pub struct FakeZap {
    pub base_url: String,
    state: SharedState,
}

impl FakeZap {
    pub fn start() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;

        let state = SharedState::default();
        let app = Router::new()
            .route("/JSON/spider/{kind}/{name}/", get(spider))
            .with_state(Arc::clone(&state));

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("tokio runtime");
            runtime.block_on(async move {
                let listener =
                    tokio::net::TcpListener::from_std(listener).expect("valid listener");
                axum::serve(listener, app).await.expect("server running");
            });
        });

        let base_url = format!("http://{addr}/JSON/");
        info!(%base_url, "fake ZAP started");
        Ok(Self { base_url, state })
    }

    pub fn client(&self) -> anyhow::Result<ZapClient> {
        let client = ZapClient::builder()
            .with_base_url(&self.base_url)
            .without_proxy()
            .build()?;
        Ok(client)
    }

    pub fn state(&self) -> MutexGuard<'_, SpiderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[fixture]
pub fn zap() -> FakeZap {
    init_tracing();
    match FakeZap::start() {
        Ok(zap) => zap,
        Err(error) => panic!("fail to start fake ZAP: {error:?}"),
    }
}

async fn spider(
    State(state): State<SharedState>,
    Path((kind, name)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
    state.calls.push((format!("{kind}/{name}"), params.clone()));

    let ok = || Json(json!({"Result": "OK"})).into_response();
    let bad_request = |code: &str| {
        (StatusCode::BAD_REQUEST, Json(json!({"code": code}))).into_response()
    };

    match (kind.as_str(), name.as_str()) {
        ("view", "status") => Json(json!({"status": state.progress.to_string()})).into_response(),
        ("view", "results") => Json(json!({"results": state.results})).into_response(),
        ("view", "excludedFromScan") => {
            let regexes = state
                .excluded
                .iter()
                .map(|regex| json!({"regex": regex}))
                .collect::<Vec<Value>>();
            Json(json!({"excludedFromScan": regexes})).into_response()
        }
        ("view", "optionMaxDepth") => Json(json!({"MaxDepth": state.max_depth})).into_response(),
        ("view", "optionThreadCount") => {
            Json(json!({"ThreadCount": state.thread_count})).into_response()
        }
        ("view", "optionPostForm") => Json(json!({"PostForm": state.post_form})).into_response(),
        ("view", "optionUserAgent") => {
            Json(json!({"UserAgent": state.user_agent})).into_response()
        }
        ("view", "optionScope") => (StatusCode::OK, "this is not JSON").into_response(),
        ("view", "optionScopeText") => Json(json!(["not", "an", "object"])).into_response(),
        ("view", "optionParseComments") => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
        }
        ("action", "scan") => match params.get("url") {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
                state.results = vec![url.clone(), format!("{url}/robots.txt")];
                state.progress = 100;
                ok()
            }
            Some(_) => bad_request("bad_format"),
            None => bad_request("missing_parameter"),
        },
        ("action", "stop") => ok(),
        ("action", "clearExcludedFromScan") => {
            state.excluded.clear();
            ok()
        }
        ("action", "excludeFromScan") => match params.get("regex") {
            Some(regex) => {
                state.excluded.push(regex.clone());
                ok()
            }
            None => bad_request("missing_parameter"),
        },
        ("action", "setOptionMaxDepth") => {
            match params.get("Integer").and_then(|it| it.parse().ok()) {
                Some(depth) => {
                    state.max_depth = depth;
                    ok()
                }
                None => bad_request("illegal_parameter"),
            }
        }
        ("action", "setOptionThreadCount") => {
            match params.get("Integer").and_then(|it| it.parse().ok()) {
                Some(count) => {
                    state.thread_count = count;
                    ok()
                }
                None => bad_request("illegal_parameter"),
            }
        }
        ("action", "setOptionPostForm") => {
            match params.get("Boolean").and_then(|it| it.parse().ok()) {
                Some(flag) => {
                    state.post_form = flag;
                    ok()
                }
                None => bad_request("illegal_parameter"),
            }
        }
        ("action", "setOptionUserAgent") => match params.get("String") {
            Some(agent) => {
                state.user_agent = agent.clone();
                ok()
            }
            None => bad_request("missing_parameter"),
        },
        _ => (StatusCode::NOT_FOUND, Json(json!({"code": "bad_view"}))).into_response(),
    }
}
