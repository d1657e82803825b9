//! Elapsed-time formatting and the one-second ticker
//!
//! Pure formatting lives in [`format_elapsed`] / [`format_time_ago`];
//! [`ElapsedTicker`] only decides *when* to re-render.

use chrono::{DateTime, Utc};
use shared::models::{AttendanceStatus, ClockStatus};
use tokio::sync::watch;
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Re-render cadence of live timers
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Output format of an elapsed duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationStyle {
    /// `HH:MM:SS`
    #[default]
    Clock,
    /// `00h 00m 00s`
    Labeled,
}

impl DurationStyle {
    /// Render a non-negative number of seconds
    pub fn render(&self, total_secs: i64) -> String {
        let total = total_secs.max(0);
        let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
        match self {
            Self::Clock => format!("{h:02}:{m:02}:{s:02}"),
            Self::Labeled => format!("{h:02}h {m:02}m {s:02}s"),
        }
    }

    pub fn zero(&self) -> String {
        self.render(0)
    }
}

/// Elapsed time between `start` and `end` (or `now`)
///
/// A missing start or a negative difference renders as zero.
pub fn format_elapsed(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    style: DurationStyle,
) -> String {
    let Some(start) = start else {
        return style.zero();
    };
    let end = end.unwrap_or(now);
    style.render((end - start).num_seconds())
}

/// Relative age of a timestamp ("3 hours ago")
pub fn format_time_ago(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    const BUCKETS: [(i64, &str); 5] = [
        (31_536_000, "years"),
        (2_592_000, "months"),
        (86_400, "days"),
        (3_600, "hours"),
        (60, "min"),
    ];

    let secs = (now - created).num_seconds().max(0);
    for (size, unit) in BUCKETS {
        // strictly more than one unit, floored
        if secs > size {
            return format!("{} {unit} ago", secs / size);
        }
    }
    format!("{secs} sec ago")
}

/// What the attendance widget shows for a given status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceDisplay {
    ClockedOut,
    Working {
        elapsed: String,
        /// Local wall-clock of the clock-in, `HH:MM`
        since: String,
    },
    OnBreak {
        break_elapsed: String,
        /// Work time up to the start of the break
        total_work: String,
    },
}

impl AttendanceDisplay {
    pub fn derive(status: &AttendanceStatus, now: DateTime<Utc>, style: DurationStyle) -> Self {
        match status.status {
            ClockStatus::ClockedOut => Self::ClockedOut,
            ClockStatus::ClockedIn => Self::Working {
                elapsed: format_elapsed(status.work_start_time, None, now, style),
                since: status
                    .work_start_time
                    .map(|t| t.with_timezone(&chrono::Local).format("%H:%M").to_string())
                    .unwrap_or_else(|| "--:--".to_string()),
            },
            ClockStatus::OnBreak => Self::OnBreak {
                break_elapsed: format_elapsed(status.break_start_time, None, now, style),
                total_work: format_elapsed(status.work_start_time, status.break_start_time, now, style),
            },
        }
    }

    /// Primary timer text
    pub fn headline(&self) -> &str {
        match self {
            Self::ClockedOut => "Clocked Out",
            Self::Working { elapsed, .. } => elapsed,
            Self::OnBreak { break_elapsed, .. } => break_elapsed,
        }
    }
}

/// One-second tick source for live timers
///
/// Each tick publishes the current time. Ticking stops when the ticker is
/// dropped or its token is cancelled.
pub struct ElapsedTicker {
    rx: watch::Receiver<DateTime<Utc>>,
    cancel: CancellationToken,
}

impl ElapsedTicker {
    /// Spawn a ticker on the current tokio runtime
    pub fn spawn() -> Self {
        Self::with_interval(TICK_INTERVAL)
    }

    pub fn with_interval(period: Duration) -> Self {
        let (tx, rx) = watch::channel(Utc::now());
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if tx.send(Utc::now()).is_err() {
                            break;
                        }
                    }
                    _ = token.cancelled() => break,
                }
            }
        });

        Self { rx, cancel }
    }

    /// Receiver that changes once per tick
    pub fn subscribe(&self) -> watch::Receiver<DateTime<Utc>> {
        self.rx.clone()
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for ElapsedTicker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, h, m, s).unwrap()
    }

    #[test]
    fn test_null_start_is_zero() {
        assert_eq!(format_elapsed(None, None, at(9, 0, 0), DurationStyle::Clock), "00:00:00");
        assert_eq!(format_elapsed(None, None, at(9, 0, 0), DurationStyle::Labeled), "00h 00m 00s");
    }

    #[test]
    fn test_elapsed_formats() {
        let start = Some(at(8, 0, 0));
        assert_eq!(format_elapsed(start, None, at(9, 2, 5), DurationStyle::Clock), "01:02:05");
        assert_eq!(format_elapsed(start, None, at(9, 2, 5), DurationStyle::Labeled), "01h 02m 05s");
        // explicit end wins over now
        assert_eq!(
            format_elapsed(start, Some(at(8, 30, 0)), at(12, 0, 0), DurationStyle::Clock),
            "00:30:00"
        );
    }

    #[test]
    fn test_negative_difference_is_zero() {
        assert_eq!(format_elapsed(Some(at(10, 0, 0)), None, at(9, 0, 0), DurationStyle::Clock), "00:00:00");
    }

    #[test]
    fn test_hours_exceed_a_day() {
        let start = Some(at(0, 0, 0));
        let now = at(0, 0, 0) + chrono::Duration::hours(27);
        assert_eq!(format_elapsed(start, None, now, DurationStyle::Clock), "27:00:00");
    }

    #[test]
    fn test_break_elapsed_is_monotonic() {
        let status = AttendanceStatus {
            status: ClockStatus::OnBreak,
            work_start_time: Some(at(8, 0, 0)),
            break_start_time: Some(at(12, 0, 0)),
        };
        let first = AttendanceDisplay::derive(&status, at(12, 0, 10), DurationStyle::Clock);
        let later = AttendanceDisplay::derive(&status, at(12, 5, 0), DurationStyle::Clock);
        match (first, later) {
            (
                AttendanceDisplay::OnBreak { break_elapsed: a, total_work: w1 },
                AttendanceDisplay::OnBreak { break_elapsed: b, total_work: w2 },
            ) => {
                assert_eq!(a, "00:00:10");
                assert_eq!(b, "00:05:00");
                assert!(b > a);
                // total work is frozen at the break start
                assert_eq!(w1, "04:00:00");
                assert_eq!(w1, w2);
            }
            other => panic!("unexpected display: {other:?}"),
        }
    }

    #[test]
    fn test_clocked_out_display() {
        let display = AttendanceDisplay::derive(&AttendanceStatus::clocked_out(), at(9, 0, 0), DurationStyle::Labeled);
        assert_eq!(display, AttendanceDisplay::ClockedOut);
        assert_eq!(display.headline(), "Clocked Out");
    }

    #[test]
    fn test_time_ago_buckets() {
        let now = at(12, 0, 0);
        assert_eq!(format_time_ago(now - chrono::Duration::seconds(30), now), "30 sec ago");
        // exactly one minute stays in seconds
        assert_eq!(format_time_ago(now - chrono::Duration::seconds(60), now), "60 sec ago");
        assert_eq!(format_time_ago(now - chrono::Duration::seconds(150), now), "2 min ago");
        assert_eq!(format_time_ago(now - chrono::Duration::hours(5), now), "5 hours ago");
        assert_eq!(format_time_ago(now - chrono::Duration::days(3), now), "3 days ago");
        assert_eq!(format_time_ago(now - chrono::Duration::seconds(61), now), "1 min ago");
        assert_eq!(format_time_ago(now - chrono::Duration::days(400 * 2), now), "2 years ago");
    }

    #[test]
    fn test_time_ago_floors_partial_units() {
        let now = at(12, 0, 0);
        assert_eq!(format_time_ago(now - chrono::Duration::seconds(90), now), "1 min ago");
        assert_eq!(format_time_ago(now - chrono::Duration::seconds(5400), now), "1 hours ago");
        assert_eq!(format_time_ago(now - chrono::Duration::days(547), now), "1 years ago");
        // exactly one hour is still counted in minutes
        assert_eq!(format_time_ago(now - chrono::Duration::hours(1), now), "60 min ago");
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_ticks_and_stops() {
        let ticker = ElapsedTicker::spawn();
        let mut rx = ticker.subscribe();

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        ticker.stop();
        assert!(ticker.is_stopped());
        tokio::time::sleep(Duration::from_secs(3)).await;
        // sender is gone once the task exits
        assert!(rx.changed().await.is_err());
    }
}
