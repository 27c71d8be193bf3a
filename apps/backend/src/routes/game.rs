//! REST control surface for the single game session.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::info;

use crate::domain::state::AgentId;
use crate::domain::utterance::Utterance;
use crate::error::AppError;
use crate::extractors::validated_json::ValidatedJson;
use crate::services::director::{GetSnapshot, StartGame, StopGame, SubmitChoice};
use crate::services::scheduler::{HumanChoice, StartRequest};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct StartGameBody {
    pub participants: usize,
    #[serde(default)]
    pub hard: bool,
    #[serde(default)]
    pub human: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct HumanChoiceBody {
    pub choice: String,
    #[serde(default)]
    pub nominate: Option<AgentId>,
}

async fn get_snapshot(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let snapshot = app_state.director.send(GetSnapshot).await??;
    Ok(HttpResponse::Ok().json(snapshot))
}

async fn start_game(
    body: ValidatedJson<StartGameBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let request = StartRequest {
        participants: body.participants,
        hard: body.hard,
        human: body.human,
    };
    let snapshot = app_state.director.send(StartGame(request)).await??;
    info!(participants = body.participants, hard = body.hard, "game started over http");
    Ok(HttpResponse::Created().json(snapshot))
}

async fn submit_choice(
    body: ValidatedJson<HumanChoiceBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let choice = HumanChoice {
        token: body.choice.parse::<Utterance>().unwrap_or_default(),
        nominate: body.nominate,
    };
    app_state.director.send(SubmitChoice(choice)).await??;
    Ok(HttpResponse::NoContent().finish())
}

async fn stop_game(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let summary = app_state.director.send(StopGame).await??;
    Ok(HttpResponse::Ok().json(summary))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(get_snapshot))
        .route("/start", web::post().to(start_game))
        .route("/choice", web::post().to(submit_choice))
        .route("/stop", web::post().to(stop_game));
}
