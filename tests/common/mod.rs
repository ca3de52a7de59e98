#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use vinventory_core::{
    ignore_failed_attempt, Backoff, FailedAttempt, FailedAttemptHook, FetchConfig, HttpClient,
    HttpError, HttpRequest, HttpResponse,
};

type Reply = Result<HttpResponse, HttpError>;

/// Fake transport that replays queued replies and records every request.
#[derive(Default)]
pub struct ScriptedHttpClient {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("requests lock").len()
    }

    /// Offsets of every recorded request, decoded from the `query` parameter.
    pub fn offsets(&self) -> Vec<u64> {
        self.requests()
            .iter()
            .map(|request| page_query(&request.url)["offset"].as_u64().expect("offset"))
            .collect()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.requests.lock().expect("requests lock").push(request);
        let reply = self
            .replies
            .lock()
            .expect("replies lock")
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::new("script exhausted")));
        Box::pin(async move { reply })
    }
}

/// Decodes the JSON object carried in a page URL.
pub fn page_query(url: &str) -> Value {
    let (_, encoded) = url.split_once("?query=").expect("query parameter");
    let decoded = urlencoding::decode(encoded).expect("percent encoding");
    serde_json::from_str(&decoded).expect("query json")
}

/// `count` listings with VINs `{prefix}-{start}` .. and the given model.
pub fn listings(prefix: &str, start: usize, count: usize, model: &str) -> Vec<Value> {
    (start..start + count)
        .map(|index| {
            json!({
                "VIN": format!("{prefix}-{index:05}"),
                "Model": model,
                "TrimName": "Long Range",
                "Price": 40_000 + index,
            })
        })
        .collect()
}

pub fn page(items: Vec<Value>) -> Reply {
    Ok(HttpResponse::ok_json(json!({ "results": items }).to_string()))
}

pub fn raw(status: u16, body: &str) -> Reply {
    Ok(HttpResponse::with_status(status, body))
}

pub fn network_error(message: &str) -> Reply {
    Err(HttpError::new(message))
}

/// Retry config with instant backoff and a silent hook.
pub fn fast_config(retries: u32) -> FetchConfig {
    FetchConfig::default()
        .with_retries(retries)
        .with_backoff(Backoff::none())
        .on_failed_attempt(ignore_failed_attempt())
}

pub fn counting_hook() -> (FailedAttemptHook, Arc<AtomicU32>) {
    let counter = Arc::new(AtomicU32::new(0));
    let recorder = counter.clone();
    let hook: FailedAttemptHook = Arc::new(move |_: &FailedAttempt<'_>| {
        recorder.fetch_add(1, Ordering::SeqCst);
    });
    (hook, counter)
}
