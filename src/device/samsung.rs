//! Art channel client for Frame-style TVs.
//!
//! ## Protocol
//!
//! - Art support is read from the REST device-info endpoint
//!   (`http://<host>:8001/api/v2/`, `device.FrameTVSupport`).
//! - Everything else goes over the secure websocket art channel
//!   (`wss://<host>:8002/api/v2/channels/com.samsung.art-app`). The TV uses a
//!   self-signed certificate.
//! - After connecting the TV sends `ms.channel.connect` (carrying a pairing
//!   token on first use) and then `ms.channel.ready`.
//! - Requests are `ms.channel.emit` envelopes for the `art_app_request`
//!   event. Their `data` field is a JSON *string* holding the request name
//!   and a request id.
//! - Replies are `d2d_service_message` events whose `data` string echoes the
//!   request id. An inner `event` of `error` means the request was refused.
//!
//! The connection is opened lazily on the first art channel request and
//! reused for the rest of the session.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use futures_util::{SinkExt, StreamExt};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::{timeout_at, Instant};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{Connector, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::DeviceConfig;
use crate::device::{ArtDevice, DeviceError, MatteChange, MatteList, TokenStore};
use crate::models::ArtworkItem;

/// Websocket channel name of the art app.
const ART_CHANNEL: &str = "com.samsung.art-app";

/// How long to wait for the user to accept the client on the TV.
const PAIRING_TIMEOUT: Duration = Duration::from_secs(30);

type ArtSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Client for the art channel of one TV.
pub struct SamsungArtClient {
    host: String,
    config: DeviceConfig,
    tokens: TokenStore,
    http: reqwest::Client,
    socket: Option<ArtSocket>,
    closed: bool,
}

impl std::fmt::Debug for SamsungArtClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SamsungArtClient")
            .field("host", &self.host)
            .field("port", &self.config.port)
            .field("connected", &self.socket.is_some())
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl SamsungArtClient {
    /// Creates a client for `host`. No connection is made until first use.
    pub fn new(
        host: impl Into<String>,
        config: DeviceConfig,
        tokens: TokenStore,
    ) -> Result<Self, DeviceError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| DeviceError::Transport(e.to_string()))?;

        Ok(Self {
            host: host.into(),
            config,
            tokens,
            http,
            socket: None,
            closed: false,
        })
    }

    async fn socket(&mut self) -> Result<&mut ArtSocket, DeviceError> {
        if self.closed {
            return Err(DeviceError::Closed);
        }
        if self.socket.is_none() {
            let socket = open_socket(&self.host, &self.config, &self.tokens).await?;
            self.socket = Some(socket);
        }
        self.socket.as_mut().ok_or(DeviceError::Closed)
    }

    async fn art_request(
        &mut self,
        request: &str,
        params: Map<String, Value>,
        wait: Duration,
    ) -> Result<Value, DeviceError> {
        let request_id = Uuid::new_v4().to_string();
        let envelope = request_envelope(request, &request_id, params);
        let socket = self.socket().await?;

        debug!("-> {request} ({request_id})");
        socket
            .send(Message::Text(envelope.to_string()))
            .await
            .map_err(|e| DeviceError::Transport(e.to_string()))?;

        let deadline = Instant::now() + wait;
        loop {
            let message = next_json(socket, deadline, request).await?;
            if let Some(reply) = match_reply(&message, &request_id)? {
                debug!("<- {request} ({request_id})");
                return check_reply(request, reply);
            }
        }
    }
}

#[async_trait]
impl ArtDevice for SamsungArtClient {
    async fn is_art_supported(&mut self) -> Result<bool, DeviceError> {
        if self.closed {
            return Err(DeviceError::Closed);
        }
        let url = format!("http://{}:{}/api/v2/", self.host, self.config.rest_port);
        let info: Value = self
            .http
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| DeviceError::Transport(e.to_string()))?
            .json()
            .await
            .map_err(|e| DeviceError::Protocol(e.to_string()))?;

        Ok(info["device"]["FrameTVSupport"] == "true")
    }

    async fn matte_list(&mut self, include_color: bool) -> Result<MatteList, DeviceError> {
        let mut params = Map::new();
        if include_color {
            params.insert("include_colour".into(), Value::Bool(true));
        }
        let reply = self
            .art_request("get_matte_list", params, self.config.request_timeout())
            .await?;

        let types = embedded_json(&reply, "matte_type_list")?;
        let colors = if include_color {
            embedded_json(&reply, "matte_color_list")?
        } else {
            Vec::new()
        };
        Ok(MatteList { types, colors })
    }

    async fn list_artwork(
        &mut self,
        category: Option<&str>,
        timeout: Duration,
    ) -> Result<Vec<ArtworkItem>, DeviceError> {
        let mut params = Map::new();
        if let Some(category) = category {
            params.insert("category".into(), Value::String(category.to_string()));
        }
        let reply = self.art_request("get_content_list", params, timeout).await?;
        content_list(&reply, category)
    }

    async fn change_matte(&mut self, change: &MatteChange) -> Result<(), DeviceError> {
        let mut params = Map::new();
        params.insert("content_id".into(), Value::String(change.content_id.clone()));
        params.insert("matte_id".into(), Value::String(change.landscape.to_string()));
        if let Some(portrait) = &change.portrait {
            params.insert("portrait_matte_id".into(), Value::String(portrait.to_string()));
        }
        self.art_request("change_matte", params, self.config.request_timeout())
            .await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DeviceError> {
        self.closed = true;
        if let Some(mut socket) = self.socket.take() {
            if let Err(err) = socket.close(None).await {
                debug!("error closing art websocket: {err}");
            }
            info!("closed art websocket");
        }
        Ok(())
    }
}

/// Connects to the art channel and waits until it is ready, saving any new
/// pairing token on the way.
async fn open_socket(
    host: &str,
    config: &DeviceConfig,
    tokens: &TokenStore,
) -> Result<ArtSocket, DeviceError> {
    let token = tokens.load()?;
    let url = channel_url(host, config.port, &config.client_name, token.as_deref())?;
    info!("opening art websocket to {}:{}", host, config.port);

    let tls = native_tls::TlsConnector::builder()
        .danger_accept_invalid_certs(true)
        .danger_accept_invalid_hostnames(true)
        .build()
        .map_err(|e| DeviceError::Transport(e.to_string()))?;

    let deadline = Instant::now() + PAIRING_TIMEOUT;
    let (mut socket, _) = timeout_at(
        deadline,
        tokio_tungstenite::connect_async_tls_with_config(
            url.as_str(),
            None,
            false,
            Some(Connector::NativeTls(tls)),
        ),
    )
    .await
    .map_err(|_| DeviceError::Timeout("connection".into()))?
    .map_err(|e| DeviceError::Transport(e.to_string()))?;

    loop {
        let message = next_json(&mut socket, deadline, "channel ready").await?;
        match message["event"].as_str() {
            Some("ms.channel.connect") => {
                if let Some(new_token) = message["data"]["token"].as_str() {
                    if token.as_deref() != Some(new_token) {
                        info!(
                            "received new pairing token, saving to {}",
                            tokens.path().display()
                        );
                        tokens.save(new_token)?;
                    }
                }
            }
            Some("ms.channel.ready") => break,
            Some("ms.channel.unauthorized") => {
                return Err(DeviceError::Transport("client was not accepted on the TV".into()));
            }
            Some("ms.channel.timeOut") => {
                return Err(DeviceError::Timeout("pairing".into()));
            }
            other => debug!("ignoring {:?} during handshake", other),
        }
    }

    debug!("art channel ready");
    Ok(socket)
}

/// Builds the art channel URL, base64-encoding the client name.
fn channel_url(
    host: &str,
    port: u16,
    client_name: &str,
    token: Option<&str>,
) -> Result<reqwest::Url, DeviceError> {
    let base = format!("wss://{host}:{port}/api/v2/channels/{ART_CHANNEL}");
    let name = BASE64.encode(client_name);
    let mut params = vec![("name", name.as_str())];
    if let Some(token) = token {
        params.push(("token", token));
    }
    reqwest::Url::parse_with_params(&base, &params)
        .map_err(|e| DeviceError::Protocol(format!("invalid device address {host}: {e}")))
}

/// Wraps an art request in the channel's emit envelope.
fn request_envelope(request: &str, request_id: &str, mut params: Map<String, Value>) -> Value {
    params.insert("request".into(), Value::String(request.to_string()));
    params.insert("id".into(), Value::String(request_id.to_string()));
    params.insert("request_id".into(), Value::String(request_id.to_string()));

    json!({
        "method": "ms.channel.emit",
        "params": {
            "event": "art_app_request",
            "to": "host",
            "data": Value::Object(params).to_string(),
        }
    })
}

/// Returns the decoded reply payload if `message` answers `request_id`.
fn match_reply(message: &Value, request_id: &str) -> Result<Option<Value>, DeviceError> {
    if message["event"] != "d2d_service_message" {
        return Ok(None);
    }
    let Some(data) = message["data"].as_str() else {
        return Ok(None);
    };
    let data: Value = serde_json::from_str(data)
        .map_err(|e| DeviceError::Protocol(format!("undecodable art event: {e}")))?;

    let reply_id = data
        .get("request_id")
        .or_else(|| data.get("id"))
        .and_then(Value::as_str);
    if reply_id == Some(request_id) {
        Ok(Some(data))
    } else {
        debug!("ignoring art event {}", data["event"]);
        Ok(None)
    }
}

/// Turns an `error` reply into a rejection.
fn check_reply(request: &str, reply: Value) -> Result<Value, DeviceError> {
    if reply["event"] != "error" {
        return Ok(reply);
    }
    let code = match &reply["error_code"] {
        Value::String(code) => code.clone(),
        Value::Null => "unknown".to_string(),
        other => other.to_string(),
    };
    Err(DeviceError::Rejected {
        request: request.to_string(),
        code,
    })
}

/// Decodes the artwork list entry by entry, keeping only `category` when set.
///
/// A bad entry becomes a malformed item rather than failing the whole list.
fn content_list(reply: &Value, category: Option<&str>) -> Result<Vec<ArtworkItem>, DeviceError> {
    let records: Vec<Value> = embedded_json(reply, "content_list")?;
    let items = records.into_iter().map(ArtworkItem::from_record);

    let Some(category) = category else {
        return Ok(items.collect());
    };
    Ok(items
        .filter(|item| match item.category_id.as_deref() {
            Some(item_category) => item_category == category,
            None => {
                debug!("dropping {} from {category}: record has no category", item.label());
                false
            }
        })
        .collect())
}

/// Reads a list field that the TV sends either as a JSON string or inline.
fn embedded_json<T: DeserializeOwned>(reply: &Value, field: &str) -> Result<T, DeviceError> {
    let result = match reply.get(field) {
        Some(Value::String(encoded)) => serde_json::from_str(encoded),
        Some(value) => serde_json::from_value(value.clone()),
        None => return Err(DeviceError::Protocol(format!("reply has no {field}"))),
    };
    result.map_err(|e| DeviceError::Protocol(format!("invalid {field}: {e}")))
}

/// Waits for the next text frame and decodes it as JSON.
async fn next_json(
    socket: &mut ArtSocket,
    deadline: Instant,
    waiting_for: &str,
) -> Result<Value, DeviceError> {
    loop {
        let frame = timeout_at(deadline, socket.next())
            .await
            .map_err(|_| DeviceError::Timeout(waiting_for.to_string()))?;

        match frame {
            Some(Ok(Message::Text(text))) => {
                return serde_json::from_str(&text)
                    .map_err(|e| DeviceError::Protocol(format!("invalid JSON from device: {e}")));
            }
            Some(Ok(Message::Close(_))) | None => {
                return Err(DeviceError::Transport("connection closed by device".into()));
            }
            Some(Ok(_)) => continue,
            Some(Err(err)) => return Err(DeviceError::Transport(err.to_string())),
        }
    }
}
