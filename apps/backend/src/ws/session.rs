use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::dev::ToEnvelope;
use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::utterance::Utterance;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;
use crate::services::director::{GameDirector, GetSnapshot, StartGame, StopGame, SubmitChoice};
use crate::services::events::GameEvent;
use crate::services::scheduler::{HumanChoice, StartRequest};
use crate::state::app_state::AppState;
use crate::ws::hub::ObserverRegistry;
use crate::ws::protocol::{ClientMsg, ServerMsg, PROTOCOL_VERSION};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = WsSession::new(app_state.director.clone(), app_state.hub());
    ws::start(session, &req, stream)
}

/// One observer connection. Must say `hello` before anything else; from then
/// on it receives every game event and may drive the session.
pub struct WsSession {
    conn_id: Uuid,
    director: Addr<GameDirector>,
    hub: Arc<ObserverRegistry>,
    /// Registry token, set once `hello` succeeds.
    observer: Option<Uuid>,

    last_heartbeat: Instant,
}

impl WsSession {
    fn new(director: Addr<GameDirector>, hub: Arc<ObserverRegistry>) -> Self {
        Self {
            conn_id: Uuid::new_v4(),
            director,
            hub,
            observer: None,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error(ctx: &mut ws::WebsocketContext<Self>, code: ErrorCode, message: impl Into<String>) {
        Self::send_json(
            ctx,
            &ServerMsg::Error {
                code: code.as_str(),
                message: message.into(),
            },
        );
    }

    fn send_error_and_close(
        &self,
        ctx: &mut ws::WebsocketContext<Self>,
        code: ErrorCode,
        message: impl Into<String>,
    ) {
        Self::send_error(ctx, code, message);
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
        ctx.stop();
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn unregister(&mut self) {
        if let Some(token) = self.observer.take() {
            self.hub.unregister(token);
        }
    }

    /// Forward a command to the director. Failures become an `error` frame;
    /// the socket stays open.
    fn dispatch<M, T, F>(&self, ctx: &mut ws::WebsocketContext<Self>, msg: M, on_ok: F)
    where
        M: Message<Result = Result<T, DomainError>> + Send + 'static,
        T: Send + 'static,
        GameDirector: Handler<M>,
        <GameDirector as Actor>::Context: ToEnvelope<GameDirector, M>,
        F: FnOnce(T, &mut ws::WebsocketContext<Self>) + 'static,
    {
        let conn_id = self.conn_id;
        ctx.spawn(
            self.director
                .send(msg)
                .into_actor(self)
                .map(move |res, _actor, ctx| {
                    let result = res
                        .map_err(AppError::from)
                        .and_then(|inner| inner.map_err(AppError::from));
                    match result {
                        Ok(value) => on_ok(value, ctx),
                        Err(err) => {
                            info!(conn_id = %conn_id, code = %err.code(), "[WS SESSION] command refused");
                            Self::send_error(ctx, err.code(), err.detail());
                        }
                    }
                }),
        );
    }

    fn handle_command(&mut self, cmd: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        match cmd {
            ClientMsg::Hello { protocol } => {
                if protocol != PROTOCOL_VERSION {
                    self.send_error_and_close(
                        ctx,
                        ErrorCode::BadProtocol,
                        "Unsupported protocol version",
                    );
                    return;
                }
                Self::send_json(
                    ctx,
                    &ServerMsg::HelloAck {
                        protocol: PROTOCOL_VERSION,
                    },
                );
                if self.observer.is_none() {
                    let recipient = ctx.address().recipient::<GameEvent>();
                    self.observer = Some(self.hub.register(recipient));
                }
                // Ordering guarantee: hello_ack then current snapshot
                if let Some(snapshot) = self.hub.latest_snapshot() {
                    Self::send_json(ctx, &ServerMsg::Snapshot(snapshot));
                }
            }
            _ if self.observer.is_none() => {
                self.send_error_and_close(ctx, ErrorCode::BadProtocol, "Must send hello first");
            }
            ClientMsg::Start {
                participants,
                hard,
                human,
            } => {
                let request = StartRequest {
                    participants,
                    hard,
                    human,
                };
                self.dispatch(ctx, StartGame(request), |_, _| {});
            }
            ClientMsg::HumanChoice { choice, nominate } => {
                let choice = HumanChoice {
                    token: choice.parse::<Utterance>().unwrap_or_default(),
                    nominate,
                };
                self.dispatch(ctx, SubmitChoice(choice), |_, _| {});
            }
            ClientMsg::Stop => {
                self.dispatch(ctx, StopGame, |_, _| {});
            }
            ClientMsg::Snapshot => {
                self.dispatch(ctx, GetSnapshot, |snapshot, ctx| {
                    Self::send_json(ctx, &ServerMsg::Snapshot(snapshot));
                });
            }
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] started");
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.unregister();
        info!(conn_id = %self.conn_id, "[WS SESSION] stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();

                let parsed: Result<ClientMsg, _> = serde_json::from_str(&text);
                let Ok(cmd) = parsed else {
                    self.send_error_and_close(ctx, ErrorCode::BadRequest, "Malformed JSON");
                    return;
                };
                self.handle_command(cmd, ctx);
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                self.send_error_and_close(ctx, ErrorCode::BadRequest, "Binary not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "[WS SESSION] protocol error");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<GameEvent> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: GameEvent, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &ServerMsg::from(msg));
    }
}
