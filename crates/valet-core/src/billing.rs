//! Billing engine — elapsed-duration and fee computation.
//!
//! Every function here is deterministic and side-effect-free; the clock is
//! the caller's problem. The charging rule is that any started hour is
//! billed in full: one minute of parking costs the same as sixty.

use chrono::{DateTime, Utc};

/// Whole elapsed minutes between `entry` and `reference`.
///
/// Floors toward negative infinity, so a `reference` earlier than `entry`
/// (clock skew, bad input) yields a negative count rather than silently
/// truncating toward zero. Billing callers clamp via [`billable_hours`].
pub fn duration_minutes(
  entry: DateTime<Utc>,
  reference: DateTime<Utc>,
) -> i64 {
  (reference - entry).num_milliseconds().div_euclid(60_000)
}

/// Billable hours for an elapsed minute count.
///
/// Negative counts clamp to zero before rounding up, so the resulting
/// amount is never negative.
pub fn billable_hours(minutes: i64) -> u64 {
  (minutes.max(0) as u64).div_ceil(60)
}

/// Fee for a stay from `entry` to `exit` at `price_per_hour`.
pub fn price(
  entry: DateTime<Utc>,
  exit: DateTime<Utc>,
  price_per_hour: u32,
) -> u64 {
  billable_hours(duration_minutes(entry, exit)) * u64::from(price_per_hour)
}

/// Render a minute count as a short human-readable duration.
///
/// The hour component appears only when non-zero; the minute component
/// appears when non-zero or when it is all there is, so the output is never
/// empty. Negative counts render as `"0min"`.
///
/// ```
/// # use valet_core::billing::format_duration;
/// assert_eq!(format_duration(0), "0min");
/// assert_eq!(format_duration(60), "1h");
/// assert_eq!(format_duration(90), "1h 30min");
/// ```
pub fn format_duration(minutes: i64) -> String {
  if minutes < 0 {
    return "0min".to_string();
  }
  let hours = minutes / 60;
  let mins = minutes % 60;

  let mut parts = Vec::with_capacity(2);
  if hours > 0 {
    parts.push(format!("{hours}h"));
  }
  if mins > 0 || hours == 0 {
    parts.push(format!("{mins}min"));
  }
  parts.join(" ")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};

  use super::*;

  fn at(h: u32, m: u32, s: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, h, m, s).unwrap()
  }

  // ── Duration ────────────────────────────────────────────────────────────

  #[test]
  fn duration_of_ninety_minutes() {
    assert_eq!(duration_minutes(at(8, 0, 0), at(9, 30, 0)), 90);
  }

  #[test]
  fn duration_floors_partial_minutes() {
    assert_eq!(duration_minutes(at(8, 0, 0), at(8, 0, 59)), 0);
    assert_eq!(duration_minutes(at(8, 0, 0), at(8, 1, 0)), 1);
  }

  #[test]
  fn duration_before_entry_is_negative() {
    assert_eq!(duration_minutes(at(9, 0, 0), at(8, 58, 0)), -2);
    // Floors toward negative infinity, like the sub-minute case above.
    assert_eq!(duration_minutes(at(9, 0, 0), at(8, 59, 30)), -1);
  }

  // ── Price ───────────────────────────────────────────────────────────────

  #[test]
  fn every_started_hour_bills_in_full() {
    let entry = at(8, 0, 0);
    for (minutes, expected_hours) in
      [(0, 0), (1, 1), (59, 1), (60, 1), (61, 2), (120, 2)]
    {
      let exit = entry + chrono::Duration::minutes(minutes);
      assert_eq!(
        price(entry, exit, 100),
        expected_hours * 100,
        "{minutes} minutes"
      );
    }
  }

  #[test]
  fn price_scales_with_rate() {
    let entry = at(8, 0, 0);
    let exit = entry + chrono::Duration::minutes(61);
    assert_eq!(price(entry, exit, 250), 500);
  }

  #[test]
  fn price_clamps_negative_duration_to_zero() {
    assert_eq!(price(at(9, 0, 0), at(7, 0, 0), 100), 0);
  }

  // ── Formatting ──────────────────────────────────────────────────────────

  #[test]
  fn format_duration_cases() {
    assert_eq!(format_duration(0), "0min");
    assert_eq!(format_duration(59), "59min");
    assert_eq!(format_duration(60), "1h");
    assert_eq!(format_duration(90), "1h 30min");
    assert_eq!(format_duration(120), "2h");
    assert_eq!(format_duration(-5), "0min");
  }
}
