// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Timestamp helpers.
//!
//! All timestamps in the system are UTC text with whole-second
//! precision, so lexicographic order on stored columns equals
//! chronological order. Splintering windows are calendar days, not
//! business days.

use time::{Duration, OffsetDateTime};

/// Formats a moment with fixed whole-second precision.
fn format_timestamp(moment: OffsetDateTime) -> String {
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        moment.year(),
        u8::from(moment.month()),
        moment.day(),
        moment.hour(),
        moment.minute(),
        moment.second()
    )
}

/// The current UTC time as a storage timestamp.
///
/// Exposed so the route layer stamps directory rows with the same
/// format the engine writes everywhere else.
#[must_use]
pub fn now_timestamp() -> String {
    format_timestamp(OffsetDateTime::now_utc())
}

/// The start of a lookback window ending now.
#[must_use]
pub fn window_start(window_days: u32) -> String {
    format_timestamp(OffsetDateTime::now_utc() - Duration::days(i64::from(window_days)))
}
