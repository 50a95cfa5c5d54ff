#![allow(dead_code)]
//! The WebSocket endpoint: one `GatewaySession` actor per connection,
//! a heartbeat loop and upgrade handler carrying §4 connection state and
//! forwarding a joined game's broadcast stream onto the socket.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::{Actor, ActorContext, ActorFutureExt, AsyncContext, Handler, Message, StreamHandler};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use serde::Deserialize;

use crate::full_info;
use crate::runtime::game_runtime::EventBatch;
use crate::shared::wire::{ClientMessage, InboundEnvelope, OutboundEnvelope, ServerMessage};

use super::dispatch::{self, ConnectionSession};
use super::recipient_filter::redact_for_viewer;
use super::state::AppState;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Deserialize)]
pub struct WsQuery {
    pub token: Option<String>,
}

/// One outbound frame pushed onto a session's socket. Carried as a raw
/// JSON value rather than a typed `OutboundEnvelope` because the
/// broadcast-forwarding path needs to drop a field out of an `Event`
/// after it has already been serialized (see `recipient_filter`), which a
/// typed `Vec<Event>` field can't represent.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Deliver(pub serde_json::Value);

fn envelope_value(correlation_id: Option<String>, message: ServerMessage) -> serde_json::Value {
    let envelope = OutboundEnvelope::reply(correlation_id, crate::auth::users::chrono_now_iso8601(), message);
    serde_json::to_value(&envelope).expect("outbound envelopes always serialize")
}

pub struct GatewaySession {
    state: Arc<AppState>,
    session: ConnectionSession,
    hb: Instant,
    connection_id: String,
}

impl GatewaySession {
    pub fn new(state: Arc<AppState>) -> Self {
        GatewaySession {
            state,
            session: ConnectionSession::default(),
            hb: Instant::now(),
            connection_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    fn heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |act, ctx| {
            if Instant::now().duration_since(act.hb) > CLIENT_TIMEOUT {
                full_info!("gateway session timed out, dropping connection");
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }

    /// Subscribes this connection to a game's broadcast channel and spawns
    /// a forwarding task that redacts each event per-recipient before
    /// delivering it back onto this actor's own mailbox. A batch this same
    /// connection produced via a direct `submit` is skipped here — it was
    /// already sent as that submission's RPC reply.
    fn subscribe_to_game(&self, ctx: &mut ws::WebsocketContext<Self>, game_id: String) {
        let registry = self.state.games.clone();
        let viewer = self.session.user_id.clone().unwrap_or_default();
        let own_connection_id = self.connection_id.clone();
        let addr = ctx.address();
        actix::spawn(async move {
            let Some(runtime) = registry.get(&game_id).await else {
                return;
            };
            let mut receiver = runtime.subscribe();
            loop {
                match receiver.recv().await {
                    Ok(EventBatch { game_id, start_index, end_index, events, origin_connection }) => {
                        if origin_connection.as_deref() == Some(own_connection_id.as_str()) {
                            continue;
                        }
                        let redacted: Vec<serde_json::Value> = events.iter().map(|e| redact_for_viewer(e, &viewer)).collect();
                        let mut value = envelope_value(
                            None,
                            ServerMessage::GameEvents { game_id, start_index, end_index, events: Vec::new() },
                        );
                        if let Some(events_field) = value.pointer_mut("/message/events") {
                            *events_field = serde_json::Value::Array(redacted);
                        }
                        addr.do_send(Deliver(value));
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
        });
    }
}

impl Actor for GatewaySession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.heartbeat(ctx);
    }
}

impl Handler<Deliver> for GatewaySession {
    type Result = ();

    fn handle(&mut self, msg: Deliver, ctx: &mut Self::Context) {
        ctx.text(msg.0.to_string());
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for GatewaySession {
    fn handle(&mut self, item: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        let msg = match item {
            Ok(msg) => msg,
            Err(_) => {
                ctx.stop();
                return;
            }
        };
        match msg {
            ws::Message::Ping(bytes) => {
                self.hb = Instant::now();
                ctx.pong(&bytes);
            }
            ws::Message::Pong(_) => {
                self.hb = Instant::now();
            }
            ws::Message::Text(text) => {
                self.hb = Instant::now();
                let envelope: InboundEnvelope = match serde_json::from_str(&text) {
                    Ok(e) => e,
                    Err(err) => {
                        let reply = ServerMessage::ProtocolError {
                            code: crate::shared::errors::ProtocolErrorCode::MalformedMessage,
                            message: err.to_string(),
                        };
                        ctx.address().do_send(Deliver(envelope_value(None, reply)));
                        return;
                    }
                };
                if !envelope.protocol_version.is_supported() {
                    let reply = ServerMessage::ProtocolError {
                        code: crate::shared::errors::ProtocolErrorCode::UnsupportedVersion,
                        message: format!("unsupported protocol version {}.{}", envelope.protocol_version.major, envelope.protocol_version.minor),
                    };
                    ctx.address().do_send(Deliver(envelope_value(Some(envelope.request_id), reply)));
                    return;
                }

                let state = self.state.clone();
                let addr = ctx.address();
                let request_id = envelope.request_id.clone();
                let joined_game = matches!(envelope.message, ClientMessage::Control(crate::shared::wire::ControlMessage::StartGame));
                let session = self.session.clone();
                let connection_id = self.connection_id.clone();
                let fut = async move { dispatch::dispatch(&state, session, envelope.message, &connection_id).await };
                ctx.spawn(actix::fut::wrap_future(fut).map(move |(reply, session), act: &mut Self, ctx| {
                    let game_id = session.game_id.clone();
                    act.session = session;
                    addr.do_send(Deliver(envelope_value(Some(request_id.clone()), reply)));
                    if joined_game {
                        if let Some(game_id) = game_id {
                            act.subscribe_to_game(ctx, game_id);
                        }
                    }
                }));
            }
            ws::Message::Close(reason) => {
                ctx.close(reason);
                ctx.stop();
            }
            _ => {}
        }
    }
}

/// HTTP upgrade handler. Pulls an optional bearer token off the query
/// string so a client can authenticate in the handshake instead of
/// needing a separate `authenticate` frame.
pub async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    state: web::Data<Arc<AppState>>,
    query: web::Query<WsQuery>,
) -> Result<HttpResponse, Error> {
    let mut session = GatewaySession::new(state.get_ref().clone());
    if let Some(token) = &query.token {
        if let Some(user_id) = crate::auth::session::verify_token(token) {
            if let Ok(Some(user)) = state.db.as_user_db().find_user_by_id(&user_id).await {
                session.session.user_id = Some(user.id);
                session.session.display_name = Some(user.display_name);
            }
        }
    }
    ws::start(session, &req, stream)
}
