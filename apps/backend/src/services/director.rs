//! The director actor: single owner of the live session.
//!
//! All mutations (start, human choice, stop and timer fires) run on this
//! actor's mailbox, so they are serialized without locks. Timers are actix
//! `run_later` handles; at most one is armed at any time.

use std::sync::Arc;

use actix::prelude::*;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::domain::outcome::GameSummary;
use crate::domain::random::{SeededRng, TurnRng};
use crate::domain::snapshot::SessionSnapshot;
use crate::errors::domain::DomainError;
use crate::services::events::GameEvent;
use crate::services::scheduler::{HumanChoice, Scheduler, StartRequest, Step};
use crate::ws::hub::ObserverRegistry;

#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "Result<SessionSnapshot, DomainError>")]
pub struct StartGame(pub StartRequest);

#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "Result<(), DomainError>")]
pub struct SubmitChoice(pub HumanChoice);

#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "Result<GameSummary, DomainError>")]
pub struct StopGame;

#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "Result<SessionSnapshot, DomainError>")]
pub struct GetSnapshot;

pub struct GameDirector {
    scheduler: Scheduler,
    hub: Arc<ObserverRegistry>,
    /// Token and handle of the armed timer.
    timer: Option<(u64, SpawnHandle)>,
}

impl GameDirector {
    pub fn new(config: GameConfig, hub: Arc<ObserverRegistry>) -> Self {
        let rng = SeededRng::new(config.rng_seed);
        Self::with_rng(config, Box::new(rng), hub)
    }

    pub fn with_rng(config: GameConfig, rng: Box<dyn TurnRng>, hub: Arc<ObserverRegistry>) -> Self {
        Self {
            scheduler: Scheduler::new(config, rng),
            hub,
            timer: None,
        }
    }

    fn apply(&mut self, step: Step, ctx: &mut Context<Self>) {
        for event in &step.events {
            debug!(
                event = event.kind(),
                observers = self.hub.active_connections_count(),
                "broadcast"
            );
            self.hub.broadcast(event);
        }
        if !step.events.is_empty() {
            self.hub.publish_snapshot(self.scheduler.snapshot());
        }

        match step.timer {
            Some(request) => {
                self.cancel_timer(ctx);
                let token = request.token;
                let handle = ctx.run_later(request.delay, move |act, ctx| {
                    if matches!(act.timer, Some((armed, _)) if armed == token) {
                        act.timer = None;
                    }
                    let step = act.scheduler.on_timer(token, OffsetDateTime::now_utc());
                    act.apply(step, ctx);
                });
                self.timer = Some((token, handle));
            }
            None if self.scheduler.pending_timer().is_none() => self.cancel_timer(ctx),
            None => {}
        }
    }

    fn cancel_timer(&mut self, ctx: &mut Context<Self>) {
        if let Some((_, handle)) = self.timer.take() {
            ctx.cancel_future(handle);
        }
    }
}

impl Actor for GameDirector {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("game director started");
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!("game director stopped");
    }
}

impl Handler<StartGame> for GameDirector {
    type Result = Result<SessionSnapshot, DomainError>;

    fn handle(&mut self, msg: StartGame, ctx: &mut Self::Context) -> Self::Result {
        let step = self.scheduler.start(msg.0, OffsetDateTime::now_utc())?;
        self.apply(step, ctx);
        self.scheduler.snapshot().ok_or(DomainError::NoSession)
    }
}

impl Handler<SubmitChoice> for GameDirector {
    type Result = Result<(), DomainError>;

    fn handle(&mut self, msg: SubmitChoice, ctx: &mut Self::Context) -> Self::Result {
        let mut step = self.scheduler.human_choice(msg.0, OffsetDateTime::now_utc())?;
        let rejection = step.rejection.take();
        self.apply(step, ctx);
        match rejection {
            Some(cause) => Err(cause),
            None => Ok(()),
        }
    }
}

impl Handler<StopGame> for GameDirector {
    type Result = Result<GameSummary, DomainError>;

    fn handle(&mut self, _msg: StopGame, ctx: &mut Self::Context) -> Self::Result {
        let step = self.scheduler.stop(OffsetDateTime::now_utc())?;
        let summary = step.events.iter().find_map(|event| match event {
            GameEvent::GameOver(summary) => Some(summary.clone()),
            _ => None,
        });
        self.apply(step, ctx);
        summary.ok_or(DomainError::NoSession)
    }
}

impl Handler<GetSnapshot> for GameDirector {
    type Result = Result<SessionSnapshot, DomainError>;

    fn handle(&mut self, _msg: GetSnapshot, _ctx: &mut Self::Context) -> Self::Result {
        self.scheduler.snapshot().ok_or(DomainError::NoSession)
    }
}
