//! CDP WebSocket client.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, trace, warn};
use url::Url;

use domjson_core::from_str_unbounded;

use crate::error::CdpError;
use crate::protocol::{BrowserVersion, CdpRequest, CdpResponse, PageInfo};
use crate::session::PageSession;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;
type PendingMap = Arc<Mutex<HashMap<u64, oneshot::Sender<Result<Value, CdpError>>>>>;

/// Default timeout for a single CDP request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared WebSocket connection: request ids, in-flight requests and the sink.
///
/// The client and every page session it creates send through the same
/// connection; sessions are told apart by `sessionId`.
pub(crate) struct Connection {
    ws_tx: tokio::sync::Mutex<WsSink>,
    request_id: AtomicU64,
    pending: PendingMap,
    timeout: Duration,
}

impl Connection {
    /// Send a CDP command and wait for its response.
    pub(crate) async fn call(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);

        let request = CdpRequest {
            id,
            method: method.to_string(),
            params,
            session_id: session_id.map(|s| s.to_string()),
        };

        let json = serde_json::to_string(&request)?;
        trace!("CDP send: {}", json);

        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, tx);

        {
            let mut ws = self.ws_tx.lock().await;
            if let Err(e) = ws.send(Message::Text(json.into())).await {
                self.pending.lock().remove(&id);
                return Err(e.into());
            }
        }

        match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CdpError::SessionClosed),
            Err(_) => {
                self.pending.lock().remove(&id);
                Err(CdpError::Timeout(format!("Request {} timed out", method)))
            }
        }
    }
}

/// CDP client for a browser running with remote debugging enabled.
pub struct CdpClient {
    /// HTTP endpoint for target discovery.
    http_endpoint: String,
    connection: Arc<Connection>,
    /// Background receive task.
    recv_task: tokio::task::JoinHandle<()>,
}

impl CdpClient {
    /// Connect to Chrome at `endpoint` (e.g. `http://localhost:9222`).
    ///
    /// ```rust,ignore
    /// let client = CdpClient::connect("http://localhost:9222", DEFAULT_REQUEST_TIMEOUT).await?;
    /// ```
    pub async fn connect(endpoint: &str, timeout: Duration) -> Result<Self, CdpError> {
        let http_endpoint = normalize_endpoint(endpoint)?;

        let version = fetch_version(&http_endpoint).await?;
        debug!("Connected to browser: {}", version.browser);

        let browser_ws_url = version.web_socket_debugger_url;

        let (ws_stream, _) = tokio_tungstenite::connect_async(browser_ws_url.as_str())
            .await
            .map_err(|e| CdpError::ConnectionFailed(format!("WebSocket: {}", e)))?;

        let (ws_sink, ws_source) = ws_stream.split();
        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));

        let recv_task = {
            let pending = pending.clone();
            tokio::spawn(async move {
                Self::receive_loop(ws_source, pending).await;
            })
        };

        debug!("CDP client connected to {}", browser_ws_url);

        Ok(Self {
            http_endpoint,
            connection: Arc::new(Connection {
                ws_tx: tokio::sync::Mutex::new(ws_sink),
                request_id: AtomicU64::new(1),
                pending,
                timeout,
            }),
            recv_task,
        })
    }

    /// WebSocket receive loop. Fails every in-flight request once the socket
    /// closes.
    async fn receive_loop(mut ws_source: WsSource, pending: PendingMap) {
        while let Some(msg) = ws_source.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    trace!("CDP recv: {}", text);
                    Self::handle_frame(&text, &pending);
                }
                Ok(Message::Close(_)) => {
                    debug!("WebSocket closed");
                    break;
                }
                Err(e) => {
                    error!("WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }

        for (_, tx) in pending.lock().drain() {
            let _ = tx.send(Err(CdpError::SessionClosed));
        }
    }

    /// Decode one text frame and route it. A frame that fails to decode
    /// fails its request with the decode error.
    fn handle_frame(text: &str, pending: &PendingMap) {
        match from_str_unbounded::<CdpResponse>(text) {
            Ok(resp) => Self::dispatch(resp, pending),
            Err(e) => {
                warn!("Failed to parse CDP message: {}", e);
                if let Some(tx) = frame_id(text).and_then(|id| pending.lock().remove(&id)) {
                    let _ = tx.send(Err(CdpError::Serialization(e)));
                }
            }
        }
    }

    fn dispatch(resp: CdpResponse, pending: &PendingMap) {
        let Some(id) = resp.id else {
            // Events are not consumed; captures poll page state instead.
            if let Some(method) = resp.method {
                trace!("CDP event ignored: {}", method);
            }
            return;
        };

        let Some(tx) = pending.lock().remove(&id) else {
            return;
        };

        let result = match resp.error {
            Some(error) => Err(CdpError::Protocol {
                code: error.code,
                message: error.message,
            }),
            None => Ok(resp.result.unwrap_or(Value::Null)),
        };
        let _ = tx.send(result);
    }

    /// Send a browser-level CDP command.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.connection.call(method, params, None).await
    }

    /// Get the HTTP discovery endpoint.
    pub fn http_endpoint(&self) -> &str {
        &self.http_endpoint
    }

    /// List all targets, most recently focused first.
    pub async fn list_pages(&self) -> Result<Vec<PageInfo>, CdpError> {
        fetch_pages(&self.http_endpoint).await
    }

    /// Create a new tab, optionally loading `url`, and attach to it.
    pub async fn new_page(&self, url: Option<&str>) -> Result<PageSession, CdpError> {
        // Chrome requires PUT for /json/new
        let create_url = new_page_url(&self.http_endpoint, url);

        let client = reqwest::Client::new();
        let page_info: PageInfo = client
            .put(&create_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!("Created new page: {} - {}", page_info.id, page_info.url);

        self.attach_page(&page_info.id).await
    }

    /// Attach to an existing tab.
    pub async fn attach_page(&self, target_id: &str) -> Result<PageSession, CdpError> {
        let result = self
            .call(
                "Target.attachToTarget",
                Some(json!({
                    "targetId": target_id,
                    "flatten": true
                })),
            )
            .await?;

        let session_id = result["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing sessionId".to_string()))?
            .to_string();

        let session = PageSession::new(target_id.to_string(), session_id, self.connection.clone());
        session.enable_domains().await?;

        Ok(session)
    }

    /// Close a tab.
    pub async fn close_page(&self, target_id: &str) -> Result<(), CdpError> {
        self.call("Target.closeTarget", Some(json!({"targetId": target_id})))
            .await?;
        Ok(())
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self.recv_task.abort();
    }
}

/// `/json/new` URL; the page URL travels percent-encoded as the whole query.
fn new_page_url(http_endpoint: &str, url: Option<&str>) -> String {
    match url {
        Some(u) => {
            let encoded: String = url::form_urlencoded::byte_serialize(u.as_bytes())
                .collect::<String>()
                .replace('+', "%20");
            format!("{}/json/new?{}", http_endpoint, encoded)
        }
        None => format!("{}/json/new", http_endpoint),
    }
}

#[derive(Deserialize)]
struct FrameId {
    id: Option<u64>,
}

/// Request id of a frame that did not decode as a [`CdpResponse`].
///
/// Tries a shallow decode first, then the `{"id":N,` prefix Chrome writes
/// for every response.
fn frame_id(text: &str) -> Option<u64> {
    if let Ok(FrameId { id }) = from_str_unbounded::<FrameId>(text) {
        return id;
    }
    let rest = text.trim_start().strip_prefix('{')?.trim_start();
    let rest = rest.strip_prefix("\"id\"")?.trim_start().strip_prefix(':')?.trim_start();
    let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    rest[..digits].parse().ok()
}

/// Validate `endpoint` and strip any trailing slash.
pub fn normalize_endpoint(endpoint: &str) -> Result<String, CdpError> {
    let parsed = Url::parse(endpoint)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(CdpError::ConnectionFailed(format!(
            "Unsupported scheme '{}' in {}",
            parsed.scheme(),
            endpoint
        )));
    }
    Ok(endpoint.trim_end_matches('/').to_string())
}

/// Fetch `/json/version` to discover the browser WebSocket URL.
pub async fn fetch_version(http_endpoint: &str) -> Result<BrowserVersion, CdpError> {
    let version_url = format!("{}/json/version", http_endpoint);
    debug!("Fetching browser version from {}", version_url);

    reqwest::get(&version_url)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", http_endpoint, e)))?
        .json()
        .await
        .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", http_endpoint, e)))
}

/// Fetch `/json/list`.
pub async fn fetch_pages(http_endpoint: &str) -> Result<Vec<PageInfo>, CdpError> {
    let url = format!("{}/json/list", http_endpoint);
    let pages: Vec<PageInfo> = reqwest::get(&url).await?.error_for_status()?.json().await?;
    Ok(pages)
}
