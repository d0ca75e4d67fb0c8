//! The time tracking engine.
//!
//! An [`Engine`] owns one [`SessionState`] and performs no I/O on its own:
//! the caller forwards user intents and calls [`Engine::tick`] periodically,
//! the injected [`Clock`] supplies the current time.
//!
//! ```text
//! Stopped -> Running -> (Paused <-> Running) -> Stopped
//! ```

pub mod calculator;
pub mod ledger;
pub mod session;
pub mod snapshot;
pub mod validator;

pub use ledger::BreakLedger;
pub use session::SessionState;
pub use snapshot::{Feed, Snapshot};

use std::sync::Arc;

use chrono::{Datelike, NaiveDateTime};

use crate::domain::entity::{Break, Settings, Status, TimeOfDay, Warning};
use crate::domain::outbound::Clock;

use validator::ComplianceInput;

pub struct Engine {
    settings: Arc<Settings>,
    clock: Arc<dyn Clock>,
    session: SessionState,
}

impl Engine {
    /// Creates a new [`Engine`] with a fresh session for today.
    pub fn new(settings: Arc<Settings>, clock: Arc<dyn Clock>) -> Self {
        let session = SessionState::initial(&settings, clock.now());
        Self {
            settings,
            clock,
            session,
        }
    }

    /// Creates an [`Engine`] continuing a previously saved session.
    pub fn restore(settings: Arc<Settings>, clock: Arc<dyn Clock>, session: SessionState) -> Self {
        let mut engine = Self {
            settings,
            clock,
            session,
        };
        engine.refresh(engine.clock.now());
        engine
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(&self.session)
    }

    /// The current time as seen by the engine's clock.
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    // ── Status transitions ──────────────────────────────────────────

    /// Start a run at the manually entered time of today. Rejected on days
    /// off and for start times after now; the rejection shows up as a
    /// warning.
    pub fn start(&mut self) {
        if self.session.status != Status::Stopped {
            tracing::debug!(status = %self.session.status, "Ignored start");
            return;
        }

        let now = self.clock.now();
        let quota = self.settings.quota(now.weekday());
        let start = self.session.manual_start_input.on(now.date());
        self.session.start_requested = true;

        if quota == 0 || start > now {
            tracing::info!(%start, quota, "Rejected start");
            self.refresh(now);
            return;
        }

        self.session.start_time = Some(start);
        self.session.status = Status::Running;
        self.session.worked_minutes = 0;
        if self.session.planned_work == 0 {
            self.session.planned_work = quota;
        }
        tracing::info!(%start, planned = self.session.planned_work, "Started");
        self.refresh(now);
    }

    /// Pause a running session by opening a new break.
    pub fn pause(&mut self) {
        if self.session.status != Status::Running {
            tracing::debug!(status = %self.session.status, "Ignored pause");
            return;
        }

        let now = self.clock.now();
        self.session.breaks.push(Break::open(now));
        self.session.status = Status::Paused;
        tracing::info!(%now, "Paused");
        self.refresh(now);
    }

    /// Resume a paused session by closing the open break.
    pub fn resume(&mut self) {
        if self.session.status != Status::Paused {
            tracing::debug!(status = %self.session.status, "Ignored resume");
            return;
        }

        let now = self.clock.now();
        self.session.breaks.close_open(now);
        self.session.status = Status::Running;
        tracing::info!(%now, "Resumed");
        self.refresh(now);
    }

    /// Stop the session. Start time, breaks and worked minutes stay visible
    /// until the next start.
    pub fn stop(&mut self) {
        let now = self.clock.now();
        if self.session.status.is_active() {
            self.session.worked_minutes = calculator::worked_minutes(&self.session, now);
            if self.session.status == Status::Paused {
                self.session.breaks.close_open(now);
            }
            tracing::info!(worked = self.session.worked_minutes, "Stopped");
        }
        self.session.status = Status::Stopped;
        self.session.start_requested = false;
        self.refresh(now);
    }

    // ── Session inputs ──────────────────────────────────────────────

    /// Set the time of day the next start is placed at. Unparseable input is
    /// ignored.
    pub fn set_manual_start(&mut self, input: &str) {
        match input.parse::<TimeOfDay>() {
            Ok(time) => self.session.manual_start_input = time,
            Err(err) => {
                tracing::debug!(%err, "Ignored manual start");
                return;
            }
        }
        self.refresh(self.clock.now());
    }

    /// Set the planned working minutes. Zero or `None` selects the quota of
    /// the current weekday.
    pub fn set_planned_work(&mut self, minutes: Option<u32>) {
        let now = self.clock.now();
        self.session.planned_work = match minutes {
            Some(minutes) if minutes > 0 => minutes,
            _ => self.settings.quota(now.weekday()),
        };
        self.refresh(now);
    }

    /// Select the attendance plan. Unknown keys are ignored.
    pub fn select_plan(&mut self, key: &str) {
        if !self.settings.has_plan(key) {
            tracing::debug!(key, "Ignored unknown plan");
            return;
        }
        self.session.plan = key.to_owned();
        self.refresh(self.clock.now());
    }

    // ── Break ledger ────────────────────────────────────────────────

    pub fn add_break(&mut self) {
        self.session.breaks.append_empty();
        self.refresh(self.clock.now());
    }

    pub fn remove_break(&mut self, index: usize) {
        if self.session.breaks.remove(index).is_some() {
            self.refresh(self.clock.now());
        }
    }

    /// Set the start of a break to a time of the session's start date.
    /// Ignored before the first start.
    pub fn set_break_start(&mut self, index: usize, input: &str) {
        let (Some(start), Ok(time)) = (self.session.start_time, input.parse::<TimeOfDay>()) else {
            tracing::debug!(index, input, "Ignored break start");
            return;
        };
        if self.session.breaks.update_start(index, time, start.date()) {
            self.refresh(self.clock.now());
        }
    }

    /// Set the end of a break to a time of the session's start date.
    /// Ignored before the first start.
    pub fn set_break_end(&mut self, index: usize, input: &str) {
        let (Some(start), Ok(time)) = (self.session.start_time, input.parse::<TimeOfDay>()) else {
            tracing::debug!(index, input, "Ignored break end");
            return;
        };
        if self.session.breaks.update_end(index, time, start.date()) {
            self.refresh(self.clock.now());
        }
    }

    pub fn set_break_duration(&mut self, index: usize, input: &str) {
        if self.session.breaks.update_duration(index, input) {
            self.refresh(self.clock.now());
        }
    }

    /// Replace all breaks with the default template.
    pub fn reset_breaks(&mut self) {
        let now = self.clock.now();
        let date = self.session.start_time.unwrap_or(now).date();
        self.session.breaks = BreakLedger::from_template(self.settings.default_breaks(), date);
        self.refresh(now);
    }

    // ── Recomputation ───────────────────────────────────────────────

    /// Recompute worked minutes, reserve statutory breaks and re-evaluate
    /// warnings. The new state replaces the old one as a whole.
    pub fn tick(&mut self) -> Snapshot {
        let now = self.clock.now();
        let mut next = self.session.clone();
        self.recompute(&mut next, now, true);
        self.session = next;
        self.snapshot()
    }

    /// Drop the session and start over with defaults.
    pub fn clear(&mut self) {
        self.session = SessionState::initial(&self.settings, self.clock.now());
        tracing::info!("Cleared session");
    }

    fn refresh(&mut self, now: NaiveDateTime) {
        let mut next = self.session.clone();
        self.recompute(&mut next, now, false);
        self.session = next;
    }

    fn recompute(&self, session: &mut SessionState, now: NaiveDateTime, statutory: bool) {
        if session.status.is_active() {
            session.worked_minutes = calculator::worked_minutes(session, now);
        }

        if statutory && session.status != Status::Paused {
            if let Some(duration) = session.breaks.ensure_statutory(session.worked_minutes) {
                tracing::info!(
                    duration,
                    worked = session.worked_minutes,
                    "Reserved statutory break"
                );
            }
        }

        session.warnings = self.evaluate(session, now);
    }

    fn evaluate(&self, session: &SessionState, now: NaiveDateTime) -> Vec<Warning> {
        let input = ComplianceInput {
            now,
            status: session.status,
            start_requested: session.start_requested,
            manual_start: session.manual_start_input,
            quota: self.settings.quota(now.weekday()),
            plan: self.settings.plan(&session.plan),
            worked_minutes: session.worked_minutes,
            total_break_minutes: session.breaks.total_minutes(),
            start_date: session.start_time.map(|start| start.date()),
            end_time: calculator::end_time(session),
        };
        validator::evaluate(&input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use crate::domain::entity::settings::{self, BreakTemplate, DisplayFormat};
    use crate::domain::entity::{BreakSpan, Plan};
    use crate::domain::outbound::testing::FakeClock;
    use crate::domain::outbound::MockClock;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn saturday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
    }

    fn new_engine(clock: &Arc<FakeClock>) -> Engine {
        let clock: Arc<dyn Clock> = Arc::clone(clock) as Arc<dyn Clock>;
        Engine::new(Arc::new(settings::sample()), clock)
    }

    fn started_engine(clock: &Arc<FakeClock>) -> Engine {
        let mut engine = new_engine(clock);
        engine.set_manual_start("08:00");
        engine.start();
        assert_eq!(engine.session().status, Status::Running);
        engine
    }

    fn settings_with_template() -> Settings {
        let time = |s: &str| s.parse::<TimeOfDay>().unwrap();
        let mut plans = BTreeMap::new();
        plans.insert(
            "flex".to_owned(),
            Plan::try_new("Gleitzeit".into(), time("06:00"), time("20:00"), 600).unwrap(),
        );
        Settings::try_new(
            [0, 480, 480, 480, 480, 480, 0],
            vec![
                BreakTemplate {
                    start: time("09:00"),
                    end: time("09:15"),
                    duration: 15,
                },
                BreakTemplate {
                    start: time("12:00"),
                    end: time("12:30"),
                    duration: 30,
                },
            ],
            plans,
            "flex".to_owned(),
            DisplayFormat::Minutes,
        )
        .unwrap()
    }

    #[test]
    fn planned_day_without_overtime() {
        let clock = FakeClock::on(monday(), 8, 0);
        let mut engine = started_engine(&clock);
        assert_eq!(engine.session().planned_work, 480);

        clock.advance(480);
        let snapshot = engine.tick();

        assert_eq!(snapshot.worked_minutes, 480);
        assert_eq!(snapshot.overtime, 0);
        assert!(snapshot.warnings.is_empty(), "{:?}", snapshot.warnings);
        assert_eq!(snapshot.breaks.get(0), Some(&Break::planned(30)));
        assert_eq!(snapshot.end_time, Some("16:30".parse().unwrap()));
    }

    #[test]
    fn start_rejected_on_weekend() {
        let clock = FakeClock::on(saturday(), 9, 0);
        let mut engine = new_engine(&clock);
        engine.set_manual_start("08:00");
        engine.start();

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.status, Status::Stopped);
        assert_eq!(engine.session().start_time, None);
        assert!(snapshot
            .warnings
            .iter()
            .any(|warning| warning.to_string() == "Samstag und Sonntag sind arbeitsfrei!"));
    }

    #[test]
    fn start_rejected_in_future() {
        let clock = FakeClock::on(monday(), 8, 0);
        let mut engine = new_engine(&clock);
        engine.set_manual_start("09:00");
        engine.start();

        assert_eq!(engine.session().status, Status::Stopped);
        assert_eq!(
            engine.session().warnings,
            vec![Warning::FutureStart {
                start: "09:00".parse().unwrap()
            }]
        );

        engine.set_manual_start("07:30");
        engine.start();
        assert_eq!(engine.session().status, Status::Running);
        assert!(engine.session().warnings.is_empty());
        assert_eq!(engine.session().worked_minutes, 30);
    }

    #[test]
    fn pause_and_resume() {
        let clock = FakeClock::on(monday(), 8, 0);
        let mut engine = started_engine(&clock);

        clock.advance(120);
        engine.pause();
        assert_eq!(engine.session().status, Status::Paused);
        assert!(engine.session().breaks.open_break().is_some());

        clock.advance(15);
        assert_eq!(engine.tick().worked_minutes, 120);
        engine.resume();

        let session = engine.session();
        assert_eq!(session.status, Status::Running);
        assert_eq!(session.breaks.len(), 1);
        assert_eq!(session.breaks.get(0).unwrap().duration(), 15);
        assert_eq!(session.worked_minutes, 120);
    }

    #[test]
    fn illegal_transitions_are_ignored() {
        let clock = FakeClock::on(monday(), 8, 0);
        let mut engine = new_engine(&clock);
        let before = engine.session().clone();

        engine.pause();
        engine.resume();
        assert_eq!(engine.session(), &before);

        engine.set_manual_start("08:00");
        engine.start();
        let started = engine.session().start_time;
        clock.advance(30);
        engine.start();
        engine.resume();
        assert_eq!(engine.session().start_time, started);
        assert_eq!(engine.session().status, Status::Running);

        engine.pause();
        engine.pause();
        assert_eq!(engine.session().breaks.len(), 1);
    }

    #[test]
    fn stop_keeps_final_snapshot() {
        let clock = FakeClock::on(monday(), 8, 0);
        let mut engine = started_engine(&clock);
        clock.advance(90);
        engine.pause();
        clock.advance(10);
        engine.stop();

        let session = engine.session().clone();
        assert_eq!(session.status, Status::Stopped);
        assert_eq!(session.worked_minutes, 90);
        assert_eq!(session.start_time, Some(monday().and_hms_opt(8, 0, 0).unwrap()));
        assert!(session.breaks.get(0).unwrap().is_complete());
        assert!(session.breaks.open_break().is_none());

        clock.advance(120);
        assert_eq!(engine.tick().worked_minutes, 90);
    }

    #[test]
    fn start_keeps_configured_breaks() {
        let clock = FakeClock::on(monday(), 8, 0);
        let mut engine = new_engine(&clock);
        engine.add_break();
        engine.set_break_duration(0, "20");
        engine.set_manual_start("08:00");
        engine.start();

        assert_eq!(engine.session().breaks.len(), 1);
        assert_eq!(engine.session().breaks.total_minutes(), 20);
    }

    #[test]
    fn break_edits_need_a_start() {
        let clock = FakeClock::on(monday(), 8, 0);
        let mut engine = new_engine(&clock);
        engine.add_break();
        engine.set_break_start(0, "12:00");
        assert_eq!(engine.session().breaks.get(0), Some(&Break::empty()));

        engine.set_manual_start("08:00");
        engine.start();
        engine.set_break_end(0, "12:30");
        engine.set_break_start(0, "12:00");
        let entry = engine.session().breaks.get(0).unwrap().clone();
        assert_eq!(entry.start(), Some(monday().and_hms_opt(12, 0, 0).unwrap()));
        assert_eq!(entry.duration(), 30);

        engine.set_break_start(0, "noon");
        assert_eq!(engine.session().breaks.get(0), Some(&entry));

        engine.remove_break(0);
        assert!(engine.session().breaks.is_empty());
    }

    #[test]
    fn statutory_break_not_duplicated() {
        let clock = FakeClock::on(monday(), 8, 0);
        let mut engine = started_engine(&clock);
        engine.add_break();

        clock.advance(400);
        engine.tick();
        engine.tick();
        assert_eq!(engine.session().breaks.len(), 1);
        assert!(engine
            .session()
            .warnings
            .contains(&Warning::InsufficientBreak {
                worked_over: 360,
                required: 30
            }));
    }

    #[test]
    fn statutory_break_not_reserved_while_paused() {
        let clock = FakeClock::on(monday(), 8, 0);
        let mut engine = started_engine(&clock);
        clock.advance(400);
        engine.pause();
        engine.set_break_end(0, "15:00");
        clock.advance(5);
        engine.tick();
        assert_eq!(engine.session().breaks.len(), 1);
    }

    #[test]
    fn stop_keeps_break_being_edited() {
        let clock = FakeClock::on(monday(), 8, 0);
        let mut engine = started_engine(&clock);
        engine.add_break();
        clock.advance(300);
        engine.set_break_start(0, "12:00");
        engine.stop();

        let session = engine.session();
        let entry = session.breaks.get(0).unwrap();
        assert_eq!(session.status, Status::Stopped);
        assert_eq!(entry.start(), Some(monday().and_hms_opt(12, 0, 0).unwrap()));
        assert_eq!(entry.end(), None);
        assert_eq!(session.breaks.total_minutes(), 0);
        assert_eq!(session.worked_minutes, 300);
        assert_eq!(engine.snapshot().end_time, Some("16:00".parse().unwrap()));
    }

    #[test]
    fn pause_and_resume_keep_break_being_edited() {
        let clock = FakeClock::on(monday(), 8, 0);
        let mut engine = started_engine(&clock);
        engine.add_break();
        engine.set_break_start(0, "09:00");

        clock.advance(60);
        engine.pause();
        clock.advance(10);
        engine.resume();

        let breaks = &engine.session().breaks;
        assert_eq!(breaks.len(), 2);
        assert_eq!(breaks.get(0).unwrap().end(), None);
        assert!(breaks.get(1).unwrap().is_complete());
        assert_eq!(breaks.get(1).unwrap().duration(), 10);

        engine.stop();
        assert_eq!(engine.session().breaks.get(0).unwrap().end(), None);
    }

    #[test]
    fn reserved_break_blocks_longer_reservation() {
        let clock = FakeClock::on(monday(), 8, 0);
        let mut engine = started_engine(&clock);

        clock.advance(400);
        engine.tick();
        assert_eq!(engine.session().breaks.get(0), Some(&Break::planned(30)));

        clock.advance(200);
        let snapshot = engine.tick();
        assert_eq!(snapshot.worked_minutes, 570);
        assert_eq!(snapshot.breaks.len(), 1);
        assert_eq!(snapshot.breaks.total_minutes(), 30);
        assert!(snapshot.warnings.contains(&Warning::InsufficientBreak {
            worked_over: 540,
            required: 45
        }));
    }

    #[test]
    fn reset_breaks_is_idempotent() {
        let clock = FakeClock::on(monday(), 8, 0);
        let clock_dyn: Arc<dyn Clock> = Arc::clone(&clock) as Arc<dyn Clock>;
        let mut engine = Engine::new(Arc::new(settings_with_template()), clock_dyn);
        assert_eq!(engine.session().breaks.total_minutes(), 45);

        engine.add_break();
        engine.remove_break(0);
        engine.reset_breaks();
        let once = engine.session().breaks.clone();
        engine.reset_breaks();
        assert_eq!(engine.session().breaks, once);
        assert_eq!(once.len(), 2);
        assert_eq!(once.total_minutes(), 45);
    }

    #[test]
    fn planned_work_defaults_to_quota() {
        let clock = FakeClock::on(monday(), 8, 0);
        let mut engine = new_engine(&clock);
        engine.set_planned_work(Some(300));
        assert_eq!(engine.session().planned_work, 300);
        engine.set_planned_work(Some(0));
        assert_eq!(engine.session().planned_work, 480);
        engine.set_planned_work(Some(240));
        engine.set_planned_work(None);
        assert_eq!(engine.session().planned_work, 480);
    }

    #[test]
    fn select_plan() {
        let clock = FakeClock::on(monday(), 8, 0);
        let mut engine = started_engine(&clock);
        engine.select_plan("core");
        assert_eq!(engine.session().plan, "core");
        engine.select_plan("unknown");
        assert_eq!(engine.session().plan, "core");

        clock.advance(541);
        engine.tick();
        assert!(engine
            .session()
            .warnings
            .contains(&Warning::MaxDurationExceeded {
                plan: "Kernzeit".into(),
                max: 540
            }));
    }

    #[test]
    fn clear_resets_session() {
        let clock = FakeClock::on(monday(), 8, 0);
        let mut engine = started_engine(&clock);
        clock.advance(60);
        engine.pause();
        engine.clear();

        let session = engine.session();
        assert_eq!(session.status, Status::Stopped);
        assert_eq!(session.start_time, None);
        assert!(session.breaks.is_empty());
        assert_eq!(session.manual_start_input, "09:00".parse().unwrap());
    }

    #[test]
    fn restore_recomputes_worked_minutes() {
        let clock = FakeClock::on(monday(), 8, 0);
        let engine = started_engine(&clock);
        let saved = engine.session().clone();

        clock.advance(75);
        let clock: Arc<dyn Clock> = clock;
        let engine = Engine::restore(Arc::new(settings::sample()), clock, saved);
        assert_eq!(engine.session().worked_minutes, 75);
    }

    #[test]
    fn engine_reads_injected_clock() {
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .return_const(monday().and_hms_opt(10, 0, 0).unwrap());
        let engine = Engine::new(Arc::new(settings::sample()), Arc::new(clock));
        assert_eq!(
            engine.session().manual_start_input,
            "10:00".parse().unwrap()
        );
    }
}
