use crate::domain::engine::Snapshot;
use crate::domain::entity::{Break, BreakSpan, DisplayFormat, Plan, TimeOfDay};

const NO_TIME: &str = "--:--";

/// Render the full view of a session as aligned `key = value` lines,
/// followed by the breaks and the warnings.
pub fn status(snapshot: &Snapshot, plan: &Plan, format: DisplayFormat) -> String {
    let end = snapshot
        .end_time
        .map_or_else(|| NO_TIME.to_owned(), |end| end.to_string());
    let pairs = [
        ("Status", snapshot.status.to_string()),
        ("Plan", format!("{} ({})", plan.name(), snapshot.plan)),
        ("Worked", format.format(snapshot.worked_minutes.into())),
        ("Planned", format.format(snapshot.planned_work.into())),
        ("Overtime", format.format(snapshot.overtime)),
        ("End", end),
    ];

    let key_align = pairs.iter().map(|(key, _)| key.len()).max().unwrap_or_default();
    let mut lines = pairs
        .iter()
        .map(|(key, value)| format!("{key:<key_align$} = {value}"))
        .collect::<Vec<_>>();

    if !snapshot.breaks.is_empty() {
        lines.push("Breaks:".to_owned());
        lines.extend(
            snapshot
                .breaks
                .iter()
                .enumerate()
                .map(|(index, entry)| format!("  {}. {}", index + 1, break_entry(entry, format))),
        );
    }

    lines.extend(snapshot.warnings.iter().map(|warning| format!("! {warning}")));
    lines.join("\n")
}

/// One break as `start - end duration`, with placeholders for missing ends.
pub fn break_entry(entry: &Break, format: DisplayFormat) -> String {
    let time = |value: Option<chrono::NaiveDateTime>| {
        value.map_or_else(|| NO_TIME.to_owned(), |value| TimeOfDay::of(value).to_string())
    };
    let mut line = format!(
        "{} - {} {}",
        time(entry.start()),
        time(entry.end()),
        format.format(entry.duration().into())
    );
    if entry.is_open() {
        line.push_str(" (open)");
    }
    line
}

/// The compact progress line printed on every tick.
pub fn feed(snapshot: &Snapshot, format: DisplayFormat) -> String {
    let feed = snapshot.feed();
    let end = feed
        .end_time
        .map_or_else(|| NO_TIME.to_owned(), |end| end.to_string());
    format!(
        "{} / {} until {end}",
        format.format(feed.worked_minutes.into()),
        format.format(feed.planned_work.into())
    )
}

/// A plan line of the plan listing. The selected plan is marked.
pub fn plan(key: &str, plan: &Plan, selected: bool, format: DisplayFormat) -> String {
    let mark = if selected { '*' } else { ' ' };
    format!(
        "{mark} {key}: {} {}-{}, max {}",
        plan.name(),
        plan.earliest_start(),
        plan.latest_end(),
        format.format(plan.max_duration().into())
    )
}
