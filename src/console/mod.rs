//! The command line front end: applies one [`Command`] to a [`Tracker`] and
//! writes the outcome as text.

pub mod command;
pub mod render;

pub use command::{BreakCommand, Command, StartArguments};

use std::future::Future;
use std::io::{Error as IoError, Write};
use std::sync::Arc;

use snafu::prelude::*;
use tokio::time::Duration;

use crate::domain::app::{Intent, Ticker, Tracker};
use crate::domain::engine::Snapshot;
use crate::domain::entity::time_of_day::ParseTimeOfDayError;
use crate::domain::entity::{DisplayFormat, TimeOfDay};
use crate::domain::outbound::NotifyPort;
use crate::tracing_report;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Presentation layer over a [`Tracker`].
pub struct Console<W> {
    tracker: Tracker,
    output: W,
    notifier: Option<Arc<dyn NotifyPort>>,
    format: DisplayFormat,
}

impl<W: Write> Console<W> {
    /// Creates a new [`Console`] writing to `output`.
    pub fn new(tracker: Tracker, output: W) -> Self {
        let format = tracker.engine().settings().display_format();
        Self {
            tracker,
            output,
            notifier: None,
            format,
        }
    }

    /// Announce new warnings through `notifier` while watching.
    pub fn with_notifier(mut self, notifier: Arc<dyn NotifyPort>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Run specific function according to `command`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the command names something
    /// that doesn't exist, lacks confirmation or the output can't be
    /// written.
    pub async fn run(&mut self, command: Command) -> Result<(), ConsoleError> {
        match command {
            Command::Status => self.apply([Intent::Tick]).await,
            Command::Start(args) => self.start(args).await,
            Command::Pause => self.apply([Intent::Pause]).await,
            Command::Resume => self.apply([Intent::Resume]).await,
            Command::Stop => self.apply([Intent::Stop]).await,
            Command::Plan(None) => self.list_plans(),
            Command::Plan(Some(key)) => {
                self.check_plan(&key)?;
                self.apply([Intent::SelectPlan(key)]).await
            }
            Command::Target(minutes) => self.apply([Intent::SetPlannedWork(minutes)]).await,
            Command::Break(command) => self.apply([command.into()]).await,
            Command::Watch => self.watch(interrupted()).await,
            Command::Clear { confirmed } => self.clear(confirmed).await,
        }
    }

    /// Print a progress line on every tick until `shutdown` completes.
    ///
    /// # Errors
    ///
    /// This function will return an error if the output can't be written.
    pub async fn watch<F>(&mut self, shutdown: F) -> Result<(), ConsoleError>
    where
        F: Future<Output = ()>,
    {
        let mut ticker = Ticker::new(TICK_PERIOD);
        if let Some(notifier) = &self.notifier {
            ticker = ticker.with_notifier(Arc::clone(notifier));
        }

        let format = self.format;
        let output = &mut self.output;
        let mut failure = None;
        ticker
            .run(&mut self.tracker, shutdown, |snapshot| {
                if failure.is_none() {
                    failure = writeln!(output, "{}", render::feed(snapshot, format)).err();
                }
            })
            .await;

        match failure {
            Some(source) => Err(source).context(OutputSnafu),
            None => Ok(()),
        }
    }

    async fn start(&mut self, args: StartArguments) -> Result<(), ConsoleError> {
        let mut intents = Vec::new();

        if let Some(key) = args.plan {
            self.check_plan(&key)?;
            intents.push(Intent::SelectPlan(key));
        }

        let at = match args.at {
            Some(input) => input
                .parse::<TimeOfDay>()
                .context(InvalidTimeSnafu { input })?,
            None => TimeOfDay::of(self.tracker.engine().now()),
        };
        intents.push(Intent::SetManualStart(at.to_string()));

        if let Some(planned) = args.planned {
            intents.push(Intent::SetPlannedWork(Some(planned)));
        }

        intents.push(Intent::Start);
        self.apply(intents).await
    }

    async fn clear(&mut self, confirmed: bool) -> Result<(), ConsoleError> {
        ensure!(confirmed, UnconfirmedSnafu);
        self.tracker.clear_all().await;
        writeln!(self.output, "Storage cleared").context(OutputSnafu)
    }

    fn list_plans(&mut self) -> Result<(), ConsoleError> {
        let engine = self.tracker.engine();
        let selected = &engine.session().plan;
        let lines = engine
            .settings()
            .plans()
            .map(|(key, plan)| render::plan(key, plan, key == selected, self.format))
            .collect::<Vec<_>>();

        for line in lines {
            writeln!(self.output, "{line}").context(OutputSnafu)?;
        }
        Ok(())
    }

    fn check_plan(&self, key: &str) -> Result<(), ConsoleError> {
        ensure!(
            self.tracker.engine().settings().has_plan(key),
            UnknownPlanSnafu { key }
        );
        Ok(())
    }

    async fn apply<I>(&mut self, intents: I) -> Result<(), ConsoleError>
    where
        I: IntoIterator<Item = Intent>,
    {
        let mut snapshot = self.tracker.snapshot();
        for intent in intents {
            snapshot = self.tracker.handle(intent).await;
        }
        self.show(&snapshot)
    }

    fn show(&mut self, snapshot: &Snapshot) -> Result<(), ConsoleError> {
        let plan = self.tracker.engine().settings().plan(&snapshot.plan);
        let text = render::status(snapshot, plan, self.format);
        writeln!(self.output, "{text}").context(OutputSnafu)
    }
}

impl From<BreakCommand> for Intent {
    fn from(value: BreakCommand) -> Self {
        match value {
            BreakCommand::Add => Self::AddBreak,
            BreakCommand::Remove(index) => Self::RemoveBreak(index),
            BreakCommand::Start { index, time } => Self::SetBreakStart { index, time },
            BreakCommand::End { index, time } => Self::SetBreakEnd { index, time },
            BreakCommand::Duration { index, value } => Self::SetBreakDuration { index, value },
            BreakCommand::Reset => Self::ResetBreaks,
        }
    }
}

async fn interrupted() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing_report!(err, "Could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// An error for console operations.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ConsoleError {
    #[snafu(display("Plan {key:?} is not configured"))]
    UnknownPlan { key: String },
    #[snafu(display("Could not use {input:?} as a time of day"))]
    InvalidTime {
        input: String,
        source: ParseTimeOfDayError,
    },
    #[snafu(display("Refusing to clear all saved data without confirmation"))]
    Unconfirmed,
    #[snafu(display("Could not write output"))]
    Output { source: IoError },
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    use crate::domain::entity::{settings, Status};
    use crate::domain::outbound::testing::FakeClock;
    use crate::domain::outbound::Clock;
    use crate::domain::repository::session::MockSessionRepository;

    async fn console(clock: &Arc<FakeClock>, repository: MockSessionRepository) -> Console<Vec<u8>> {
        let clock: Arc<dyn Clock> = Arc::clone(clock) as Arc<dyn Clock>;
        let tracker =
            Tracker::open(Arc::new(settings::sample()), clock, Arc::new(repository)).await;
        Console::new(tracker, Vec::new())
    }

    fn repository() -> MockSessionRepository {
        let mut repository = MockSessionRepository::new();
        repository.expect_load().returning(|| Ok(None));
        repository.expect_save().returning(|_| Ok(()));
        repository
    }

    fn text(console: &Console<Vec<u8>>) -> String {
        String::from_utf8(console.output().clone()).unwrap()
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[tokio::test]
    async fn console_start_now() {
        let clock = FakeClock::on(monday(), 8, 0);
        let mut console = console(&clock, repository()).await;
        clock.set(monday().and_hms_opt(9, 30, 0).unwrap());

        console
            .run(Command::Start(StartArguments::default()))
            .await
            .unwrap();

        assert_eq!(console.tracker.snapshot().status, Status::Running);
        let text = text(&console);
        assert!(text.contains("Status   = Running"));
        assert!(text.contains("End      = 17:30"));
    }

    #[tokio::test]
    async fn console_start_with_arguments() {
        let clock = FakeClock::on(monday(), 9, 0);
        let mut console = console(&clock, repository()).await;

        let args = StartArguments {
            at: Some("08:00".into()),
            planned: Some(420),
            plan: Some("core".into()),
        };
        console.run(Command::Start(args)).await.unwrap();

        let snapshot = console.tracker.snapshot();
        assert_eq!(snapshot.plan, "core");
        assert_eq!(snapshot.worked_minutes, 60);
        assert_eq!(snapshot.end_time, Some("15:00".parse().unwrap()));
    }

    #[tokio::test]
    async fn console_start_rejects_bad_input() {
        let clock = FakeClock::on(monday(), 9, 0);
        let mut console = console(&clock, repository()).await;

        let args = StartArguments {
            plan: Some("night".into()),
            ..Default::default()
        };
        assert!(matches!(
            console.run(Command::Start(args)).await,
            Err(ConsoleError::UnknownPlan { .. })
        ));

        let args = StartArguments {
            at: Some("8 Uhr".into()),
            ..Default::default()
        };
        assert!(matches!(
            console.run(Command::Start(args)).await,
            Err(ConsoleError::InvalidTime { .. })
        ));
        assert_eq!(console.tracker.snapshot().status, Status::Stopped);
    }

    #[tokio::test]
    async fn console_list_plans() {
        let clock = FakeClock::on(monday(), 9, 0);
        let mut console = console(&clock, repository()).await;

        console.run(Command::Plan(None)).await.unwrap();
        assert_eq!(
            text(&console),
            "  core: Kernzeit 07:00-18:00, max 9:00 h\n* flex: Gleitzeit 06:00-20:00, max 10:00 h\n"
        );
    }

    #[tokio::test]
    async fn console_breaks() {
        let clock = FakeClock::on(monday(), 9, 0);
        let mut console = console(&clock, repository()).await;

        console.run(Command::Break(BreakCommand::Add)).await.unwrap();
        let duration = BreakCommand::Duration {
            index: 0,
            value: "20".into(),
        };
        console.run(Command::Break(duration)).await.unwrap();

        assert_eq!(console.tracker.snapshot().breaks.total_minutes(), 20);
        assert!(text(&console).contains("  1. --:-- - --:-- 0:20 h"));

        console.run(Command::Break(BreakCommand::Remove(0))).await.unwrap();
        assert!(console.tracker.snapshot().breaks.is_empty());
    }

    #[tokio::test]
    async fn console_clear() {
        let clock = FakeClock::on(monday(), 9, 0);
        let mut repository = repository();
        repository.expect_clear_all().times(1).returning(|| Ok(()));
        let mut console = console(&clock, repository).await;

        assert!(matches!(
            console.run(Command::Clear { confirmed: false }).await,
            Err(ConsoleError::Unconfirmed)
        ));
        console.run(Command::Clear { confirmed: true }).await.unwrap();
        assert_eq!(text(&console), "Storage cleared\n");
    }

    #[tokio::test(start_paused = true)]
    async fn console_watch() {
        let clock = FakeClock::on(monday(), 9, 0);
        let mut console = console(&clock, repository()).await;
        console
            .run(Command::Start(StartArguments {
                at: Some("08:00".into()),
                ..Default::default()
            }))
            .await
            .unwrap();

        let mut console = Console::new(console.tracker, Vec::new());
        console
            .watch(tokio::time::sleep(Duration::from_millis(1500)))
            .await
            .unwrap();

        assert_eq!(
            text(&console),
            "1:00 h / 8:00 h until 16:00\n1:00 h / 8:00 h until 16:00\n"
        );
    }
}
