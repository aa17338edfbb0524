// File: tarkovbot-core/tests/test_utils/mod.rs
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc::UnboundedReceiver;

use tarkovbot_common::models::{TraderRestockRecord, TraderSnapshot};
use tarkovbot_common::protocol::OutboundMessage;
use tarkovbot_core::context::{trader_datasets, DatasetWriters};
use tarkovbot_core::{
    ApiEndpoints, Error, HostHandle, HttpClient, HttpResponse, PluginConfig, PluginContext,
    RemoteDataClient,
};

pub const TEST_PLUGIN_UUID: &str = "test-plugin-uuid";

struct CannedReply {
    status: u16,
    body: String,
    delay: Duration,
}

/// An HttpClient that hands out queued replies in order and records every
/// request it sees. Runs dry with a parse error.
#[derive(Default)]
pub struct MockHttpClient {
    replies: Mutex<VecDeque<CannedReply>>,
    requests: Mutex<Vec<(String, HashMap<String, String>)>>,
    calls: AtomicUsize,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, status: u16, body: impl Into<String>) -> Self {
        self.reply_after(Duration::ZERO, status, body)
    }

    pub fn reply_after(self, delay: Duration, status: u16, body: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(CannedReply {
            status,
            body: body.into(),
            delay,
        });
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<(String, HashMap<String, String>)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: String, headers: HashMap<String, String>) -> Result<HttpResponse, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push((url, headers));
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(reply) => {
                if !reply.delay.is_zero() {
                    tokio::time::sleep(reply.delay).await;
                }
                Ok(HttpResponse::new(reply.status, reply.body))
            }
            None => Err(Error::Parse("no canned response left".into())),
        }
    }
}

/// Everything a behavior test needs: the shared context, the mock behind
/// its API client, the outbound queue and the dataset writers.
pub struct Harness {
    pub ctx: Arc<PluginContext>,
    pub http: Arc<MockHttpClient>,
    pub rx: UnboundedReceiver<OutboundMessage>,
    pub writers: DatasetWriters,
}

pub fn harness(http: MockHttpClient) -> Harness {
    let http = Arc::new(http);
    let (host, rx) = HostHandle::channel(TEST_PLUGIN_UUID);
    let api = Arc::new(RemoteDataClient::new(http.clone(), ApiEndpoints::default()));
    let (writers, datasets) = trader_datasets();
    let ctx = Arc::new(PluginContext::new(host, api, datasets, PluginConfig::default()));
    Harness {
        ctx,
        http,
        rx,
        writers,
    }
}

impl Harness {
    /// Everything queued for the host so far.
    pub fn drain(&mut self) -> Vec<OutboundMessage> {
        let mut out = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            out.push(msg);
        }
        out
    }

    pub fn titles(&mut self) -> Vec<String> {
        self.drain()
            .iter()
            .filter_map(|m| m.title().map(str::to_string))
            .collect()
    }
}

/// Let spawned tasks run until they park.
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

pub fn record(name: &str, reset_time: DateTime<Utc>) -> TraderRestockRecord {
    TraderRestockRecord {
        name: name.to_string(),
        reset_time,
    }
}

pub fn snapshot(records: Vec<TraderRestockRecord>) -> TraderSnapshot {
    TraderSnapshot::new(records, Utc::now())
}

pub fn traders_body(names: &[&str]) -> String {
    let traders: Vec<String> = names
        .iter()
        .map(|n| format!(r#"{{"name":"{n}","resetTime":"2030-01-01T00:00:00Z"}}"#))
        .collect();
    format!(r#"{{"data":{{"traders":[{}]}}}}"#, traders.join(","))
}
