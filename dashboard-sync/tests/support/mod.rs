//! In-memory transport with scripted replies and call recording.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use dashboard_sync::{Transport, TransportError};
use serde_json::Value;

/// What a fake request resolves to.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Fail,
    Pending,
}

impl Reply {
    async fn resolve(self) -> Result<Value, TransportError> {
        // Give concurrent callers a chance to run before the reply lands.
        tokio::task::yield_now().await;
        match self {
            Reply::Json(value) => Ok(value),
            Reply::Fail => Err(TransportError::Worker("connection refused".to_string())),
            Reply::Pending => std::future::pending().await,
        }
    }
}

pub struct FakeTransport {
    get_reply: Reply,
    post_reply: Reply,
    gets: AtomicUsize,
    get_paths: Mutex<Vec<String>>,
    posts: Mutex<Vec<(String, Value)>>,
}

impl FakeTransport {
    pub fn new(get_reply: Reply) -> Self {
        Self::with_post(get_reply, Reply::Json(Value::Null))
    }

    pub fn with_post(get_reply: Reply, post_reply: Reply) -> Self {
        Self {
            get_reply,
            post_reply,
            gets: AtomicUsize::new(0),
            get_paths: Mutex::new(Vec::new()),
            posts: Mutex::new(Vec::new()),
        }
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn get_paths(&self) -> Vec<String> {
        self.get_paths.lock().expect("lock").clone()
    }

    pub fn posts(&self) -> Vec<(String, Value)> {
        self.posts.lock().expect("lock").clone()
    }
}

impl Transport for FakeTransport {
    async fn get(&self, path: &str) -> Result<Value, TransportError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.get_paths.lock().expect("lock").push(path.to_string());
        self.get_reply.clone().resolve().await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        self.posts
            .lock()
            .expect("lock")
            .push((path.to_string(), body.clone()));
        self.post_reply.clone().resolve().await
    }
}
