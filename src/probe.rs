use std::sync::mpsc;
use std::time::Duration;

use futures::future::{join_all, ready, FutureExt, LocalBoxFuture};
use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;
use crate::schema::ConfigMap;

/// Per-provider budget; the whole batch is bounded by the slowest single
/// check, not their sum.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

const LMSTUDIO_FALLBACK_URL: &str = "http://localhost:1234/v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderStatus {
    pub provider: &'static str,
    pub detail: String,
    pub healthy: bool,
}

impl ProviderStatus {
    fn new(provider: &'static str, detail: impl Into<String>, healthy: bool) -> Self {
        Self {
            provider,
            detail: detail.into(),
            healthy,
        }
    }
}

/// Seam between the editor shell and the network; tests substitute a fixed
/// result set.
pub trait ProviderProbe: Send {
    fn probe(&self, cfg: &ConfigMap) -> Vec<ProviderStatus>;
}

/// Best-effort reachability/credential checks, one per known provider, in
/// fixed order. Individual failures become unhealthy statuses, never errors.
pub struct StatusProber {
    timeout: Duration,
}

impl StatusProber {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for StatusProber {
    fn default() -> Self {
        Self::new(PROBE_TIMEOUT)
    }
}

impl ProviderProbe for StatusProber {
    fn probe(&self, cfg: &ConfigMap) -> Vec<ProviderStatus> {
        let rt = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(err) => {
                // No runtime, no network: report everything unreachable.
                let detail = format!("probe unavailable: {err}");
                return ["Anthropic", "Gemini", "DeepSeek", "LM Studio"]
                    .into_iter()
                    .map(|name| ProviderStatus::new(name, detail.clone(), false))
                    .collect();
            }
        };

        let lmstudio_url = cfg
            .get("lmstudio_base_url")
            .filter(|url| !url.is_empty())
            .cloned()
            .unwrap_or_else(|| LMSTUDIO_FALLBACK_URL.to_string());

        // join_all keeps the declared provider order regardless of which
        // check finishes first.
        let checks: Vec<LocalBoxFuture<'_, ProviderStatus>> = vec![
            ready(check_api_key("Anthropic", cfg.get("anthropic_api_key"))).boxed_local(),
            ready(check_gemini_cli()).boxed_local(),
            ready(check_api_key("DeepSeek", cfg.get("deepseek_api_key"))).boxed_local(),
            check_lmstudio(lmstudio_url, self.timeout).boxed_local(),
        ];
        rt.block_on(join_all(checks))
    }
}

fn check_api_key(provider: &'static str, key: Option<&String>) -> ProviderStatus {
    match key {
        Some(key) if !key.is_empty() => ProviderStatus::new(provider, "API key set", true),
        _ => ProviderStatus::new(provider, "No API key", false),
    }
}

fn check_gemini_cli() -> ProviderStatus {
    if which::which("gemini").is_ok() {
        ProviderStatus::new("Gemini", "CLI installed", true)
    } else {
        ProviderStatus::new("Gemini", "CLI not found", false)
    }
}

async fn check_lmstudio(base_url: String, timeout: Duration) -> ProviderStatus {
    let url = format!("{}/models", base_url.trim_end_matches('/'));

    let request = async {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| e.to_string())?;
        let response = client.get(&url).send().await.map_err(|e| e.to_string())?;
        let body: Value = response.json().await.map_err(|e| e.to_string())?;
        let count = body
            .get("data")
            .and_then(|d| d.as_array())
            .map(|models| models.len())
            .unwrap_or(0);
        Ok::<usize, String>(count)
    };

    match tokio::time::timeout(timeout, request).await {
        Ok(Ok(1)) => ProviderStatus::new("LM Studio", "1 model loaded", true),
        Ok(Ok(count)) => ProviderStatus::new("LM Studio", format!("{count} models loaded"), true),
        Ok(Err(_)) | Err(_) => ProviderStatus::new("LM Studio", "Not reachable", false),
    }
}

pub enum ProbeMsg {
    Finished { result: Vec<ProviderStatus> },
}

/// Probe worker shared by both interactive renderers: requests carry a
/// ConfigMap snapshot, results come back on a channel drained between frames.
pub struct ProbeSystem {
    req_tx: mpsc::Sender<ConfigMap>,
    result_rx: mpsc::Receiver<ProbeMsg>,
    _handle: std::thread::JoinHandle<()>,
}

impl ProbeSystem {
    pub fn start() -> Result<Self, AppError> {
        let (req_tx, req_rx) = mpsc::channel::<ConfigMap>();
        let (result_tx, result_rx) = mpsc::channel::<ProbeMsg>();

        let handle = std::thread::Builder::new()
            .name("prismmcp-probe".to_string())
            .spawn(move || probe_worker_loop(req_rx, result_tx))
            .map_err(|e| AppError::IoContext {
                context: "failed to spawn probe worker thread".to_string(),
                source: e,
            })?;

        Ok(Self {
            req_tx,
            result_rx,
            _handle: handle,
        })
    }

    pub fn request(&self, cfg: ConfigMap) {
        let _ = self.req_tx.send(cfg);
    }

    pub fn try_recv(&self) -> Option<ProbeMsg> {
        self.result_rx.try_recv().ok()
    }
}

fn probe_worker_loop(rx: mpsc::Receiver<ConfigMap>, tx: mpsc::Sender<ProbeMsg>) {
    let prober = StatusProber::default();
    while let Ok(mut cfg) = rx.recv() {
        // Collapse a backlog of requests down to the most recent snapshot.
        for next in rx.try_iter() {
            cfg = next;
        }
        let result = prober.probe(&cfg);
        let _ = tx.send(ProbeMsg::Finished { result });
    }
}
