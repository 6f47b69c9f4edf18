//! Conversion of provider epoch values into exchange-local civil time.
//!
//! Zones come from the IANA database bundled with `chrono-tz`; rendered times
//! carry the zone abbreviation that was in effect at the instant (`EST`, `EDT`, ...).
use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;

/// Clock-only rendering, e.g. `05:13PM EST`.
pub const CLOCK_FORMAT: &str = "%I:%M%p %Z";
/// Full date and time rendering, e.g. `2017-07-13 22:40:00 EDT`.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// Resolves an exchange timezone.
///
/// `primary` is tried first; `fallback` only when `primary` is not a known zone.
pub fn resolve_timezone(primary: &str, fallback: Option<&str>) -> Result<Tz, String> {
    match primary.parse::<Tz>() {
        Ok(tz) => Ok(tz),
        Err(primary_err) => match fallback.map(str::parse::<Tz>) {
            Some(Ok(tz)) => {
                log::debug!("timezone {:?} unknown, using {:?}", primary, fallback);
                Ok(tz)
            }
            _ => Err(format!("unknown timezone {:?} ({})", primary, primary_err)),
        },
    }
}

/// Converts epoch seconds (possibly fractional) to civil time in `tz`.
pub fn from_epoch_seconds(tz: Tz, seconds: f64) -> Result<DateTime<Tz>, String> {
    if !seconds.is_finite() {
        return Err(format!("{} is not a valid timestamp", seconds));
    }
    let whole = seconds.floor();
    let nanos = (((seconds - whole) * NANOS_PER_SEC).round() as u32).min(999_999_999);
    tz.timestamp_opt(whole as i64, nanos)
        .single()
        .ok_or_else(|| format!("timestamp {} is out of range", seconds))
}

/// Converts epoch milliseconds to civil time in `tz`.
pub fn from_epoch_millis(tz: Tz, millis: f64) -> Result<DateTime<Tz>, String> {
    from_epoch_seconds(tz, millis / 1000.0)
}
