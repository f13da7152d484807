// src/recency.rs
//! Recency scorer: finds dates mentioned in the text and grades the newest
//! one against a reference date.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::signals::Scored;

const FRESH_DAYS: i64 = 30;
const RECENT_DAYS: i64 = 365;

const MONTHS: &str = r"(january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec)";

static ISO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").expect("iso date regex"));
static DAY_MONTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?{MONTHS}\.?,?\s+(\d{{4}})\b"
    ))
    .expect("day-month date regex")
});
static MONTH_DAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b{MONTHS}\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?,?\s+(\d{{4}})\b"
    ))
    .expect("month-day date regex")
});
static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(19[5-9]\d|20\d\d)\b").expect("year regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecencyStatus {
    Fresh,
    Recent,
    Stale,
    Undated,
}

impl RecencyStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::Recent => "recent",
            Self::Stale => "stale",
            Self::Undated => "undated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecencyInfo {
    pub newest_date: Option<NaiveDate>,
    pub age_days: Option<i64>,
    pub status: RecencyStatus,
    pub explanation: String,
}

fn month_number(name: &str) -> Option<u32> {
    let m = match name.get(..3)?.to_ascii_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(m)
}

fn num<T: std::str::FromStr>(s: Option<regex::Match<'_>>) -> Option<T> {
    s?.as_str().parse().ok()
}

/// All full dates in the text; bare years only when no full date is present.
/// A bare year stands for the last day of that year.
pub fn extract_dates(text: &str) -> Vec<NaiveDate> {
    let mut out = Vec::new();

    for c in ISO_RE.captures_iter(text) {
        if let (Some(y), Some(m), Some(d)) = (num(c.get(1)), num(c.get(2)), num(c.get(3))) {
            out.extend(NaiveDate::from_ymd_opt(y, m, d));
        }
    }
    for c in DAY_MONTH_RE.captures_iter(text) {
        let month = c.get(2).and_then(|m| month_number(m.as_str()));
        if let (Some(d), Some(m), Some(y)) = (num(c.get(1)), month, num(c.get(3))) {
            out.extend(NaiveDate::from_ymd_opt(y, m, d));
        }
    }
    for c in MONTH_DAY_RE.captures_iter(text) {
        let month = c.get(1).and_then(|m| month_number(m.as_str()));
        if let (Some(m), Some(d), Some(y)) = (month, num(c.get(2)), num(c.get(3))) {
            out.extend(NaiveDate::from_ymd_opt(y, m, d));
        }
    }

    if out.is_empty() {
        for c in YEAR_RE.captures_iter(text) {
            if let Some(y) = num(c.get(1)) {
                out.extend(NaiveDate::from_ymd_opt(y, 12, 31));
            }
        }
    }
    out
}

/// Grades the newest mentioned date. Dates after `reference` count as age 0.
pub fn score(text: &str, reference: NaiveDate) -> Scored<RecencyInfo> {
    let Some(newest) = extract_dates(text).into_iter().max() else {
        return Scored {
            adjustment: 0.0,
            info: RecencyInfo {
                newest_date: None,
                age_days: None,
                status: RecencyStatus::Undated,
                explanation: "No dates found to judge timeliness.".to_string(),
            },
        };
    };

    let age = (reference - newest).num_days().max(0);
    let (adjustment, status, explanation) = if age <= FRESH_DAYS {
        (3.0, RecencyStatus::Fresh, format!("Content references recent events ({newest})."))
    } else if age <= RECENT_DAYS {
        (0.0, RecencyStatus::Recent, format!("Newest date mentioned is {age} days old."))
    } else {
        (
            -8.0,
            RecencyStatus::Stale,
            format!(
                "Newest date mentioned is from {}; the story may be outdated or recirculated.",
                newest.year()
            ),
        )
    };

    Scored {
        adjustment,
        info: RecencyInfo {
            newest_date: Some(newest),
            age_days: Some(age),
            status,
            explanation,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn extracts_all_full_date_forms() {
        let dates = extract_dates("On 2024-03-05, then 7th June 2024 and March 9, 2023.");
        assert!(dates.contains(&d(2024, 3, 5)));
        assert!(dates.contains(&d(2024, 6, 7)));
        assert!(dates.contains(&d(2023, 3, 9)));
        // Bare years are ignored once a full date exists.
        assert_eq!(dates.len(), 3);
    }

    #[test]
    fn invalid_dates_fall_back_to_the_bare_year() {
        assert_eq!(extract_dates("2024-13-40"), vec![d(2024, 12, 31)]);
        assert_eq!(extract_dates("31 February 2023"), vec![d(2023, 12, 31)]);
        assert!(extract_dates("no dates here").is_empty());
    }

    #[test]
    fn fresh_recent_stale_undated() {
        let today = d(2025, 6, 1);

        let fresh = score("Announced on 20 May 2025.", today);
        assert_eq!(fresh.info.status, RecencyStatus::Fresh);
        assert_eq!(fresh.adjustment, 3.0);

        let recent = score("Announced on 2025-01-10.", today);
        assert_eq!(recent.info.status, RecencyStatus::Recent);
        assert_eq!(recent.adjustment, 0.0);

        let stale = score("Back in 2019 the bridge collapsed.", today);
        assert_eq!(stale.info.status, RecencyStatus::Stale);
        assert_eq!(stale.adjustment, -8.0);

        let undated = score("The government announced new policies today.", today);
        assert_eq!(undated.info.status, RecencyStatus::Undated);
        assert_eq!(undated.adjustment, 0.0);
    }

    #[test]
    fn future_dates_count_as_fresh() {
        let s = score("Elections hold on 2025-12-01.", d(2025, 6, 1));
        assert_eq!(s.info.age_days, Some(0));
        assert_eq!(s.info.status, RecencyStatus::Fresh);
    }
}
