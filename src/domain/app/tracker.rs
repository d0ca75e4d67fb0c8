use std::sync::Arc;

use crate::domain::engine::{Engine, Snapshot};
use crate::domain::entity::Settings;
use crate::domain::outbound::Clock;
use crate::domain::repository::SessionRepository;
use crate::tracing_report;

/// Actions the presentation layer forwards into the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Start,
    Pause,
    Resume,
    Stop,
    SetManualStart(String),
    SetPlannedWork(Option<u32>),
    SelectPlan(String),
    AddBreak,
    RemoveBreak(usize),
    SetBreakStart { index: usize, time: String },
    SetBreakEnd { index: usize, time: String },
    SetBreakDuration { index: usize, value: String },
    ResetBreaks,
    Tick,
}

/// Application service which applies [`Intent`]s to an [`Engine`] and keeps
/// the saved session in step. Storage failures are logged and otherwise
/// ignored; the in-memory session stays authoritative.
pub struct Tracker {
    engine: Engine,
    sessions: Arc<dyn SessionRepository>,
}

impl Tracker {
    /// Open the tracker on the saved session, or on a fresh one if nothing
    /// usable was saved.
    pub async fn open(
        settings: Arc<Settings>,
        clock: Arc<dyn Clock>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        let engine = match sessions.load().await {
            Ok(Some(session)) => Engine::restore(settings, clock, session),
            Ok(None) => Engine::new(settings, clock),
            Err(err) => {
                tracing_report!(err, "Could not restore session, starting over");
                Engine::new(settings, clock)
            }
        };
        Self { engine, sessions }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    /// Apply `intent` and save the session if it changed.
    pub async fn handle(&mut self, intent: Intent) -> Snapshot {
        let before = self.engine.session().clone();

        match intent {
            Intent::Start => self.engine.start(),
            Intent::Pause => self.engine.pause(),
            Intent::Resume => self.engine.resume(),
            Intent::Stop => self.engine.stop(),
            Intent::SetManualStart(time) => self.engine.set_manual_start(&time),
            Intent::SetPlannedWork(minutes) => self.engine.set_planned_work(minutes),
            Intent::SelectPlan(key) => self.engine.select_plan(&key),
            Intent::AddBreak => self.engine.add_break(),
            Intent::RemoveBreak(index) => self.engine.remove_break(index),
            Intent::SetBreakStart { index, time } => self.engine.set_break_start(index, &time),
            Intent::SetBreakEnd { index, time } => self.engine.set_break_end(index, &time),
            Intent::SetBreakDuration { index, value } => {
                self.engine.set_break_duration(index, &value)
            }
            Intent::ResetBreaks => self.engine.reset_breaks(),
            Intent::Tick => {
                self.engine.tick();
            }
        }

        if self.engine.session() != &before {
            self.persist().await;
        }
        self.engine.snapshot()
    }

    /// Delete everything saved and start over with a fresh session.
    pub async fn clear_all(&mut self) {
        if let Err(err) = self.sessions.clear_all().await {
            tracing_report!(err, "Could not clear storage completely");
        }
        self.engine.clear();
    }

    async fn persist(&self) {
        if let Err(err) = self.sessions.save(self.engine.session().clone()).await {
            tracing_report!(err, "Could not save session");
        }
    }
}
