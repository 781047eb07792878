use chrono::{DateTime, Utc};

/// Highest urgency an item can reach.
pub const URGENCY_CAP: f64 = 0.25;
/// Days after which an untouched item reaches full urgency before capping.
pub const URGENCY_HORIZON_DAYS: f64 = 7.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

pub fn days_elapsed(last_activity: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    match last_activity {
        Some(at) => (now - at).num_milliseconds() as f64 / MILLIS_PER_DAY,
        None => URGENCY_HORIZON_DAYS,
    }
}

pub fn urgency(last_activity: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    urgency_with_cap(last_activity, now, URGENCY_CAP)
}

pub fn urgency_with_cap(last_activity: Option<DateTime<Utc>>, now: DateTime<Utc>, cap: f64) -> f64 {
    let cap = cap.clamp(0.0, 1.0);
    (days_elapsed(last_activity, now) / URGENCY_HORIZON_DAYS).clamp(0.0, cap)
}

/// Red background tint carrying the urgency in its alpha channel.
pub fn tint(urgency: f64) -> String {
    format!("rgba(255, 0, 0, {:.3})", urgency.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 10, 8, 30, 0).unwrap()
    }

    #[test]
    fn never_touched_items_start_at_the_cap() {
        assert_eq!(urgency(None, now()), URGENCY_CAP);
        assert_eq!(urgency_with_cap(None, now(), 1.0), 1.0);
    }

    #[test]
    fn urgency_grows_then_saturates() {
        let fresh = urgency(Some(now()), now());
        let one_day = urgency(Some(now() - Duration::days(1)), now());
        assert_eq!(fresh, 0.0);
        assert!((one_day - 1.0 / 7.0).abs() < 1e-9);

        for cap in [0.25, 0.5, 1.0] {
            let saturation = Duration::milliseconds((7.0 * cap * MILLIS_PER_DAY) as i64);
            for extra in [0, 1, 30, 400] {
                let at = now() - saturation - Duration::days(extra);
                assert_eq!(urgency_with_cap(Some(at), now(), cap), cap);
            }
        }
    }

    #[test]
    fn urgency_is_monotonic_in_elapsed_time() {
        let mut previous = 0.0;
        for hours in (0..24 * 10).step_by(6) {
            let value = urgency(Some(now() - Duration::hours(hours)), now());
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn future_activity_clamps_to_zero() {
        assert_eq!(urgency(Some(now() + Duration::days(2)), now()), 0.0);
    }

    #[test]
    fn cap_is_limited_to_one() {
        assert_eq!(urgency_with_cap(None, now(), 3.0), 1.0);
    }

    #[test]
    fn tint_formats_alpha() {
        assert_eq!(tint(0.25), "rgba(255, 0, 0, 0.250)");
    }
}
