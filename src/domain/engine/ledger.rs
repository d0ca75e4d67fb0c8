use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Break, BreakSpan, BreakTemplate, TimeOfDay};

/// Worked minutes after which a first break is required.
pub const FIRST_BREAK_AFTER: u32 = 6 * 60;
/// Break minutes required once [`FIRST_BREAK_AFTER`] is exceeded.
pub const FIRST_BREAK_MINUTES: u32 = 30;
/// Worked minutes after which a longer break is required.
pub const SECOND_BREAK_AFTER: u32 = 9 * 60;
/// Break minutes required once [`SECOND_BREAK_AFTER`] is exceeded.
pub const SECOND_BREAK_MINUTES: u32 = 45;

/// Statutory break minutes required after `worked_minutes` of work, if any.
pub fn required_break(worked_minutes: u32) -> Option<u32> {
    if worked_minutes > SECOND_BREAK_AFTER {
        Some(SECOND_BREAK_MINUTES)
    } else if worked_minutes > FIRST_BREAK_AFTER {
        Some(FIRST_BREAK_MINUTES)
    } else {
        None
    }
}

/// Ordered breaks of a session. Clones share one buffer; an edit copies it
/// only while another clone still holds it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Break>", into = "Vec<Break>")]
pub struct BreakLedger {
    breaks: Arc<Vec<Break>>,
}

impl BreakLedger {
    /// Creates a new [`BreakLedger`].
    pub fn new(breaks: Vec<Break>) -> Self {
        Self {
            breaks: Arc::new(breaks),
        }
    }

    /// Build a ledger from the default break template with its times placed
    /// on `date`.
    pub fn from_template(template: &[BreakTemplate], date: NaiveDate) -> Self {
        template
            .iter()
            .map(|slot| {
                Break::from_parts(
                    Some(slot.start.on(date)),
                    Some(slot.end.on(date)),
                    slot.duration,
                )
            })
            .collect::<Vec<_>>()
            .into()
    }

    pub fn len(&self) -> usize {
        self.breaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breaks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Break> {
        self.breaks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Break> {
        self.breaks.iter()
    }

    /// Sum of all break durations in minutes.
    pub fn total_minutes(&self) -> u32 {
        self.breaks.iter().map(BreakSpan::duration).sum()
    }

    /// Returns `true` if any break misses its start or end.
    pub fn has_incomplete(&self) -> bool {
        self.breaks.iter().any(|entry| !entry.is_complete())
    }

    /// Returns the last break if it is still going on.
    pub fn open_break(&self) -> Option<&Break> {
        self.breaks.last().filter(|entry| entry.is_open())
    }

    pub fn push(&mut self, entry: Break) {
        Arc::make_mut(&mut self.breaks).push(entry);
    }

    /// Append a break without times or duration.
    pub fn append_empty(&mut self) {
        self.push(Break::empty());
    }

    /// Remove the break at `index`. Returns `None` if the index is out of
    /// range.
    pub fn remove(&mut self, index: usize) -> Option<Break> {
        if index >= self.breaks.len() {
            return None;
        }
        Some(Arc::make_mut(&mut self.breaks).remove(index))
    }

    /// Replace the break at `index` with the result of `update`. Returns
    /// `false` if the index is out of range.
    pub fn replace<F>(&mut self, index: usize, update: F) -> bool
    where
        F: FnOnce(&Break) -> Break,
    {
        let Some(current) = self.breaks.get(index) else {
            return false;
        };
        let next = update(current);
        Arc::make_mut(&mut self.breaks)[index] = next;
        true
    }

    /// Set the start of the break at `index` to `time` on `date`.
    pub fn update_start(&mut self, index: usize, time: TimeOfDay, date: NaiveDate) -> bool {
        self.replace(index, |entry| entry.with_start(time.on(date)))
    }

    /// Set the end of the break at `index` to `time` on `date`.
    pub fn update_end(&mut self, index: usize, time: TimeOfDay, date: NaiveDate) -> bool {
        self.replace(index, |entry| entry.with_end(time.on(date)))
    }

    /// Set the duration of the break at `index` from user input. Input which
    /// is not a number counts as zero and negative numbers are clamped.
    pub fn update_duration(&mut self, index: usize, value: &str) -> bool {
        let minutes = parse_leading_integer(value).unwrap_or(0).clamp(0, i64::from(u32::MAX));
        self.replace(index, |entry| entry.with_duration(minutes as u32))
    }

    /// Close the break which is still going on at `now`. Returns `false` if
    /// there is none.
    pub fn close_open(&mut self, now: NaiveDateTime) -> bool {
        match self.breaks.len().checked_sub(1) {
            Some(last) if self.breaks[last].is_open() => {
                self.replace(last, |entry| entry.with_end(now))
            }
            _ => false,
        }
    }

    /// Make sure the statutory break for `worked_minutes` is at least
    /// reserved. A break carrying the missing requirement is appended only
    /// when every existing break is complete, so the user can fill in the
    /// times of an incomplete one instead. Returns the duration of the
    /// appended break.
    pub fn ensure_statutory(&mut self, worked_minutes: u32) -> Option<u32> {
        let required = required_break(worked_minutes)?;
        if self.total_minutes() >= required || self.has_incomplete() {
            return None;
        }
        self.push(Break::planned(required));
        Some(required)
    }
}

impl From<Vec<Break>> for BreakLedger {
    fn from(value: Vec<Break>) -> Self {
        Self::new(value)
    }
}

impl From<BreakLedger> for Vec<Break> {
    fn from(value: BreakLedger) -> Self {
        Arc::unwrap_or_clone(value.breaks)
    }
}

/// Parse the integer at the beginning of `value`, ignoring anything after
/// it.
fn parse_leading_integer(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let digits_from = usize::from(value.starts_with(['-', '+']));
    let digits = value[digits_from..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    let number = &value[..digits_from + digits];
    Some(number.parse::<i64>().unwrap_or(if number.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    }))
}
