use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

use super::lenient;
use super::session::SessionItem;

/// One scheduled job as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CronJob {
    #[serde(default)]
    pub name: String,
    /// Either a 5-field cron-like expression, an "Every …"/"At …" phrase,
    /// or an ISO-minute timestamp ("2024-06-01T09:30").
    #[serde(default)]
    pub schedule: String,
    #[serde(default)]
    pub last_run: Option<String>,
    #[serde(default)]
    pub next_run: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl CronJob {
    /// Shape check for the schedule field. Accepts the formats the backend
    /// actually emits; anything else is reported as a sanity warning, never
    /// a parse failure.
    pub fn schedule_is_valid(&self) -> bool {
        static CRON_RE: OnceLock<Regex> = OnceLock::new();
        static ISO_MIN_RE: OnceLock<Regex> = OnceLock::new();
        let cron_re = CRON_RE.get_or_init(|| {
            Regex::new(
                r"^(\*/\d+|\d{1,2})\s+(\*|\*/\d+|\d{1,2})\s+\*\s+\*\s+(\*|\d{1,2}(?:,\d{1,2})*)$",
            )
            .unwrap()
        });
        let iso_re =
            ISO_MIN_RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}$").unwrap());

        let sched = self.schedule.trim();
        cron_re.is_match(sched)
            || sched.starts_with("Every ")
            || sched.starts_with("At ")
            || iso_re.is_match(sched)
    }
}

/// One point of the daily cost chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// "YYYY-MM-DD"
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::de_f64")]
    pub cost: f64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// One fetched state of all dashboard sections, immutable after ingest.
///
/// Deserialization is deliberately lenient: missing or null numerics become
/// 0, missing lists become empty, unknown fields are kept in `extra`. A bad
/// payload degrades the affected section instead of failing the cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, deserialize_with = "lenient::de_f64")]
    pub total_cost_today: f64,
    #[serde(default, deserialize_with = "lenient::de_f64")]
    pub projected_monthly: f64,
    /// Backend's own count of active sessions, when it sends one.
    #[serde(default, alias = "sessionCount", deserialize_with = "lenient::de_opt_i64")]
    pub active_sessions: Option<i64>,
    #[serde(default)]
    pub crons: Vec<CronJob>,
    #[serde(default)]
    pub sessions: Vec<SessionItem>,
    #[serde(default)]
    pub daily_chart: Vec<ChartPoint>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Snapshot {
    pub fn active(&self) -> impl Iterator<Item = &SessionItem> {
        self.sessions.iter().filter(|s| s.active)
    }

    /// The daily chart must be chronologically non-decreasing and every
    /// date must look like YYYY-MM-DD.
    pub fn chart_is_chronological(&self) -> bool {
        static DATE_RE: OnceLock<Regex> = OnceLock::new();
        let date_re = DATE_RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

        let mut prev: Option<&str> = None;
        for point in &self.daily_chart {
            if !date_re.is_match(&point.date) {
                return false;
            }
            if let Some(p) = prev {
                if point.date.as_str() < p {
                    return false;
                }
            }
            prev = Some(&point.date);
        }
        true
    }

    /// Soft data-integrity checks. These are heuristics about backend
    /// output, surfaced as warnings in the status bar and the log; none of
    /// them ever blocks a paint.
    pub fn sanity_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.chart_is_chronological() {
            warnings.push("dailyChart is not chronological".to_string());
        }

        for cron in &self.crons {
            if !cron.schedule_is_valid() {
                warnings.push(format!(
                    "cron {:?} has an unrecognized schedule {:?}",
                    cron.name, cron.schedule
                ));
            }
        }

        // Outlier heuristic, not a business rule: a projection an order of
        // magnitude below today's spend usually means the backend computed
        // it from partial data.
        if self.projected_monthly < self.total_cost_today
            && self.projected_monthly < self.total_cost_today / 10.0
        {
            warnings.push(format!(
                "projectedMonthly ({:.2}) looks too low vs totalCostToday ({:.2})",
                self.projected_monthly, self.total_cost_today
            ));
        }

        if let Some(count) = self.active_sessions {
            if count > 0 && self.sessions.is_empty() {
                warnings.push(format!(
                    "activeSessions is {} but the sessions list is empty",
                    count
                ));
            }
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(json: &str) -> Snapshot {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn missing_fields_default_to_zero_and_empty() {
        let s = snap("{}");
        assert_eq!(s.total_cost_today, 0.0);
        assert!(s.crons.is_empty());
        assert!(s.sessions.is_empty());
        assert!(s.daily_chart.is_empty());
    }

    #[test]
    fn null_numeric_defaults_to_zero() {
        let s = snap(r#"{"totalCostToday": null, "projectedMonthly": "3.5"}"#);
        assert_eq!(s.total_cost_today, 0.0);
        assert_eq!(s.projected_monthly, 3.5);
    }

    #[test]
    fn chart_chronological_accepts_ordered_dates() {
        let s = snap(r#"{"dailyChart": [{"date": "2024-01-01"}, {"date": "2024-01-02"}]}"#);
        assert!(s.chart_is_chronological());
    }

    #[test]
    fn chart_chronological_rejects_out_of_order_dates() {
        let s = snap(r#"{"dailyChart": [{"date": "2024-01-02"}, {"date": "2024-01-01"}]}"#);
        assert!(!s.chart_is_chronological());
        assert!(!s.sanity_warnings().is_empty());
    }

    #[test]
    fn chart_chronological_rejects_malformed_date() {
        let s = snap(r#"{"dailyChart": [{"date": "Jan 1"}]}"#);
        assert!(!s.chart_is_chronological());
    }

    #[test]
    fn cron_schedule_shapes() {
        let ok = ["*/5 * * * *", "30 9 * * 1,3,5", "Every 10 minutes", "At 09:30", "2024-06-01T09:30"];
        for sched in ok {
            let c = CronJob {
                schedule: sched.to_string(),
                ..Default::default()
            };
            assert!(c.schedule_is_valid(), "expected valid: {sched}");
        }
        let bad = ["whenever", "5 * * *", "2024-06-01", ""];
        for sched in bad {
            let c = CronJob {
                schedule: sched.to_string(),
                ..Default::default()
            };
            assert!(!c.schedule_is_valid(), "expected invalid: {sched}");
        }
    }

    #[test]
    fn projection_outlier_is_a_warning_not_an_error() {
        let s = snap(r#"{"totalCostToday": 100.0, "projectedMonthly": 2.0}"#);
        let warnings = s.sanity_warnings();
        assert!(warnings.iter().any(|w| w.contains("projectedMonthly")));

        // Projection below today but within tolerance: no warning.
        let s = snap(r#"{"totalCostToday": 100.0, "projectedMonthly": 50.0}"#);
        assert!(s.sanity_warnings().is_empty());
    }

    #[test]
    fn active_count_mismatch_is_flagged() {
        let s = snap(r#"{"activeSessions": 3, "sessions": []}"#);
        assert!(s
            .sanity_warnings()
            .iter()
            .any(|w| w.contains("sessions list is empty")));
    }
}
