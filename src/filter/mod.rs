//! Age-window filtering of extracted dates.
//!
//! This module decides whether a file's extracted date falls inside the
//! configured inclusion window. The filter is immutable once constructed and
//! is shared read-only by every traversal task.

use chrono::NaiveDate;

/// The inclusion rules applied to every extracted date.
///
/// With both cutoffs set, the inclusion window is the open interval
/// `(newer_than, older_than)`: dates exactly equal to either cutoff are
/// excluded.
#[derive(Debug, Clone)]
pub struct AgeFilter {
    /// Only dates strictly after this cutoff are included.
    pub newer_than: Option<NaiveDate>,

    /// Only dates strictly before this cutoff are included.
    pub older_than: Option<NaiveDate>,

    /// The wall-clock date used for the future-date check. This is the date
    /// at the time the run starts, not the configured reference date used to
    /// derive the cutoffs.
    pub now: NaiveDate,

    /// Whether dates after `now` pass the filter at all.
    /// When false, future-dated files are excluded before the cutoffs apply.
    pub include_future: bool,
}

impl AgeFilter {
    /// An all-inclusive filter for the given wall-clock date: no cutoffs,
    /// future dates excluded.
    pub fn new(now: NaiveDate) -> Self {
        Self {
            newer_than: None,
            older_than: None,
            now,
            include_future: false,
        }
    }

    /// Decides whether a file carrying the given date is included.
    ///
    /// The checks apply in order and any failing check excludes the file:
    /// the future-date rule first, then the older cutoff, then the newer
    /// cutoff. Both cutoff boundaries are exclusive.
    pub fn matches(&self, date: NaiveDate) -> bool {
        if !self.include_future && date > self.now {
            return false;
        }
        if let Some(older) = self.older_than {
            if date >= older {
                return false;
            }
        }
        if let Some(newer) = self.newer_than {
            if date <= newer {
                return false;
            }
        }
        true
    }
}
