use core::fmt;

use chrono::{Local, NaiveDateTime};
use serde::{Serialize, Serializer};

/// `dd-MM-yyyy hh:mm:ss` on a 12-hour clock, without meridiem.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %I:%M:%S";

/// Local wall-clock instant captured when an [`ApiError`](crate::ApiError) is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Captures the current local date-time.
    #[inline]
    pub fn now() -> Self {
        Self(Local::now().naive_local())
    }

    #[inline]
    pub const fn as_naive(&self) -> &NaiveDateTime {
        &self.0
    }
}

impl From<NaiveDateTime> for Timestamp {
    #[inline]
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.format(TIMESTAMP_FORMAT), f)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
