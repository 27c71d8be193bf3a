// Observer actor that records every event it receives.

use std::sync::Arc;
use std::time::Duration;

use actix::prelude::*;
use parking_lot::Mutex;
use sechack_backend::services::events::GameEvent;
use sechack_backend::ws::hub::ObserverRegistry;

pub type EventLog = Arc<Mutex<Vec<GameEvent>>>;

pub struct RecordingObserver {
    log: EventLog,
}

impl Actor for RecordingObserver {
    type Context = Context<Self>;
}

impl Handler<GameEvent> for RecordingObserver {
    type Result = ();

    fn handle(&mut self, msg: GameEvent, _ctx: &mut Self::Context) {
        self.log.lock().push(msg);
    }
}

/// Start a recorder and register it with `hub`.
pub fn attach_recorder(hub: &ObserverRegistry) -> EventLog {
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    let addr = RecordingObserver { log: log.clone() }.start();
    hub.register(addr.recipient());
    log
}

/// Wait until the log satisfies `pred`; returns a copy of the log.
pub async fn wait_for_events<F>(
    log: &EventLog,
    timeout: Duration,
    pred: F,
) -> Result<Vec<GameEvent>, String>
where
    F: Fn(&[GameEvent]) -> bool,
{
    let start = tokio::time::Instant::now();
    loop {
        {
            let events = log.lock();
            if pred(&events) {
                return Ok(events.clone());
            }
            if start.elapsed() >= timeout {
                return Err(format!("timed out; events so far: {:?}", *events));
            }
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
}

pub fn is_game_over(event: &GameEvent) -> bool {
    matches!(event, GameEvent::GameOver(_))
}
