//! Test doubles and common utilities for client contract tests
//!
//! [`ScriptedTransport`] replays queued response bodies in order and records
//! every request it receives, so tests can assert both the number of network
//! calls and their exact JSON.

#![allow(dead_code)]

use hostingde_core::error::{Error, Result};
use hostingde_core::traits::Transport;
use hostingde_core::{ApiClient, ClientConfig, Credentials};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const BASE_URL: &str = "https://api.test/dns/v1/json";
pub const TOKEN: &str = "client-token";
pub const ACCOUNT: &str = "client-account";

/// A request seen by the transport
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub uri: String,
    pub body: Value,
}

impl SeenRequest {
    /// Operation suffix of the URI
    pub fn endpoint(&self) -> &str {
        self.uri.rsplit('/').next().unwrap_or_default()
    }
}

/// A transport that answers from a script
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<String>>>,
    seen: Mutex<Vec<SeenRequest>>,
    call_count: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::new()),
            seen: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        })
    }

    /// Queue a JSON reply
    pub fn reply(&self, body: Value) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(body.to_string()));
        self
    }

    /// Queue the same JSON reply `n` times
    pub fn reply_times(&self, body: Value, n: usize) -> &Self {
        for _ in 0..n {
            self.reply(body.clone());
        }
        self
    }

    /// Queue a raw body
    pub fn reply_raw(&self, body: &str) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(body.to_string()));
        self
    }

    /// Queue a transport failure
    pub fn fail(&self, message: &str) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(Error::transport("scripted", message)));
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> SeenRequest {
        self.requests().pop().expect("no request was sent")
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn post(&self, uri: &str, body: String) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(SeenRequest {
            uri: uri.to_string(),
            body: serde_json::from_str(&body).expect("client sent invalid JSON"),
        });

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::transport(uri, "script exhausted")))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Client over `transport` with default policies
pub fn client(transport: &Arc<ScriptedTransport>) -> ApiClient {
    let config = ClientConfig::new(Credentials::new(TOKEN, ACCOUNT)).with_base_url(BASE_URL);
    ApiClient::new(config, transport.clone()).expect("valid test config")
}

// Response builders

pub fn envelope(status: &str, response: Value) -> Value {
    json!({
        "errors": [],
        "metadata": {"clientTransactionId": "", "serverTransactionId": "srv-1"},
        "response": response,
        "status": status,
        "warnings": []
    })
}

pub fn success(response: Value) -> Value {
    envelope("success", response)
}

pub fn pending(response: Value) -> Value {
    envelope("pending", response)
}

pub fn blocked() -> Value {
    json!({
        "errors": [{
            "code": 10109,
            "contextObject": "zone-1",
            "contextPath": "/zoneConfig",
            "details": [],
            "text": "Object is blocked",
            "value": "blocked"
        }],
        "metadata": {},
        "response": null,
        "status": "error",
        "warnings": []
    })
}

pub fn failed(code: i64, text: &str, value: &str) -> Value {
    json!({
        "errors": [{"code": code, "text": text, "value": value}],
        "response": null,
        "status": "error"
    })
}

pub fn found(data: Vec<Value>) -> Value {
    let total = data.len();
    success(json!({
        "data": data,
        "limit": 1,
        "page": 1,
        "totalEntries": total,
        "totalPages": 1,
        "type": "FindResult"
    }))
}

pub fn zone_config(id: &str, name: &str, status: &str) -> Value {
    json!({
        "id": id,
        "accountId": ACCOUNT,
        "status": status,
        "name": name,
        "nameUnicode": name,
        "type": "NATIVE",
        "emailAddress": format!("hostmaster@{}", name),
        "soaValues": {"refresh": 86400, "retry": 7200, "expire": 3600000, "ttl": 172800, "negativeTtl": 3600}
    })
}

pub fn record(id: &str, zone_id: &str, name: &str, record_type: &str, content: &str, ttl: u32) -> Value {
    json!({
        "id": id,
        "zoneConfigId": zone_id,
        "name": name,
        "type": record_type,
        "content": content,
        "ttl": ttl
    })
}

pub fn zone(config: Value, records: Vec<Value>) -> Value {
    json!({"zoneConfig": config, "records": records})
}
