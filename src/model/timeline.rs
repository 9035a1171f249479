use chrono::{Datelike, Duration, NaiveDate};

use crate::config::{MONTH_SPAN_DAYS, TICK_MIN_SPACING, WEEK_SPAN_DAYS};

/// Display format for dates in labels and tooltips.
pub const DISPLAY_FORMAT: &str = "%b %-d, %Y";

/// Calendar-day difference from `a` to `b`; negative when `b` is earlier.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

/// Horizontal offset of `date` from the first project day.
pub fn date_to_x(date: NaiveDate, project_start: NaiveDate, day_width: f32) -> f32 {
    days_between(project_start, date) as f32 * day_width
}

/// Number of days the timeline covers, both ends inclusive, never below one.
pub fn total_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (days_between(start, end) + 1).max(1)
}

/// Pixels per day so the whole range fits `available_width` exactly.
pub fn day_width(available_width: f32, total_days: i64) -> f32 {
    available_width / total_days.max(1) as f32
}

/// Format a date for display, or an em dash when it is absent.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format(DISPLAY_FORMAT).to_string(),
        None => "—".to_string(),
    }
}

/// Granularity of the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickScale {
    Weekly,
    Monthly,
    Quarterly,
}

/// One labelled gridline on the time axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub date: NaiveDate,
    pub label: String,
}

impl TickScale {
    /// Pick the finest scale whose ticks stay at least `min_spacing` apart.
    pub fn for_day_width(day_width: f32, min_spacing: f32) -> Self {
        if day_width * WEEK_SPAN_DAYS >= min_spacing {
            TickScale::Weekly
        } else if day_width * MONTH_SPAN_DAYS >= min_spacing {
            TickScale::Monthly
        } else {
            TickScale::Quarterly
        }
    }

    pub fn label(self, date: NaiveDate) -> String {
        match self {
            TickScale::Weekly => date.format("%b %-d").to_string(),
            TickScale::Monthly => date.format("%b %Y").to_string(),
            TickScale::Quarterly => format!("Q{} {}", date.month0() / 3 + 1, date.year()),
        }
    }

    /// Ticks covering `[start, end]`. Never empty: when nothing falls in
    /// range a single tick at `start` is returned.
    pub fn ticks(self, start: NaiveDate, end: NaiveDate) -> Vec<Tick> {
        let dates = match self {
            TickScale::Weekly => weekly_dates(start, end),
            TickScale::Monthly => monthly_dates(start, end),
            TickScale::Quarterly => quarterly_dates(start, end),
        };
        let dates = if dates.is_empty() { vec![start] } else { dates };
        dates
            .into_iter()
            .map(|date| Tick {
                date,
                label: self.label(date),
            })
            .collect()
    }
}

/// Adaptive ticks for a project range at the given density.
pub fn generate_ticks(start: NaiveDate, end: NaiveDate, day_width: f32) -> Vec<Tick> {
    TickScale::for_day_width(day_width, TICK_MIN_SPACING).ticks(start, end)
}

fn weekly_dates(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let weekday = start.weekday().num_days_from_monday();
    let mut date = start - Duration::days(weekday as i64);
    let mut dates = Vec::new();
    while date <= end {
        dates.push(date);
        date += Duration::days(7);
    }
    dates
}

fn monthly_dates(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut date = NaiveDate::from_ymd_opt(start.year(), start.month(), 1).unwrap_or(start);
    let mut dates = Vec::new();
    while date <= end {
        dates.push(date);
        let (y, m) = if date.month() == 12 {
            (date.year() + 1, 1)
        } else {
            (date.year(), date.month() + 1)
        };
        match NaiveDate::from_ymd_opt(y, m, 1) {
            Some(next) => date = next,
            None => break,
        }
    }
    dates
}

fn quarterly_dates(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    (start.year()..=end.year())
        .flat_map(|year| [1, 4, 7, 10].map(|month| NaiveDate::from_ymd_opt(year, month, 1)))
        .flatten()
        .filter(|d| *d >= start && *d <= end)
        .collect()
}

/// The horizontal mapping of one render pass.
///
/// There is no zoom level: `day_width` is whatever makes the full range fit
/// the width the pass was given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    /// First project day, at x = 0.
    pub start: NaiveDate,
    /// Last project day (inclusive).
    pub end: NaiveDate,
    /// Pixels per day.
    pub day_width: f32,
}

impl Timeline {
    pub fn fit(start: NaiveDate, end: NaiveDate, available_width: f32) -> Self {
        Self {
            start,
            end,
            day_width: day_width(available_width, total_days(start, end)),
        }
    }

    /// Convert a date to an x-pixel offset from the project start.
    pub fn date_to_x(&self, date: NaiveDate) -> f32 {
        date_to_x(date, self.start, self.day_width)
    }

    /// Convert an x-pixel offset back to the day it falls in.
    pub fn x_to_date(&self, x: f32) -> NaiveDate {
        if self.day_width <= 0.0 {
            return self.start;
        }
        let days = (x / self.day_width).floor() as i64;
        self.start
            .checked_add_signed(Duration::days(days))
            .unwrap_or(self.end)
    }

    pub fn total_days(&self) -> i64 {
        total_days(self.start, self.end)
    }

    pub fn scale(&self, min_spacing: f32) -> TickScale {
        TickScale::for_day_width(self.day_width, min_spacing)
    }

    pub fn ticks(&self, min_spacing: f32) -> Vec<Tick> {
        self.scale(min_spacing).ticks(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn january_fits_310_pixels_at_ten_per_day() {
        let tl = Timeline::fit(date(2024, 1, 1), date(2024, 1, 31), 310.0);
        assert_eq!(tl.total_days(), 31);
        assert_eq!(tl.day_width, 10.0);
        assert_eq!(tl.date_to_x(date(2024, 1, 5)), 40.0);
    }

    #[test]
    fn dates_before_start_are_negative() {
        assert_eq!(date_to_x(date(2023, 12, 30), date(2024, 1, 1), 5.0), -10.0);
    }

    #[test]
    fn x_to_date_inverts_date_to_x() {
        let tl = Timeline::fit(date(2024, 1, 1), date(2024, 1, 31), 310.0);
        assert_eq!(tl.x_to_date(45.0), date(2024, 1, 5));
        assert_eq!(tl.x_to_date(0.0), date(2024, 1, 1));
    }

    #[test]
    fn zero_width_does_not_panic() {
        let tl = Timeline::fit(date(2024, 1, 1), date(2024, 1, 1), 0.0);
        assert_eq!(tl.day_width, 0.0);
        assert_eq!(tl.x_to_date(100.0), date(2024, 1, 1));
        assert!(!generate_ticks(tl.start, tl.end, tl.day_width).is_empty());
    }

    #[test]
    fn weekly_ticks_start_on_monday() {
        // 2024-01-03 is a Wednesday.
        let ticks = TickScale::Weekly.ticks(date(2024, 1, 3), date(2024, 1, 20));
        let dates: Vec<_> = ticks.iter().map(|t| t.date).collect();
        assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 8), date(2024, 1, 15)]);
        assert_eq!(ticks[0].label, "Jan 1");
    }

    #[test]
    fn monthly_ticks_cross_year_boundary() {
        let ticks = TickScale::Monthly.ticks(date(2023, 11, 15), date(2024, 2, 1));
        let labels: Vec<_> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Nov 2023", "Dec 2023", "Jan 2024", "Feb 2024"]);
    }

    #[test]
    fn quarterly_ticks_inside_range_only() {
        let ticks = TickScale::Quarterly.ticks(date(2023, 2, 1), date(2024, 4, 1));
        let labels: Vec<_> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Q2 2023", "Q3 2023", "Q4 2023", "Q1 2024", "Q2 2024"]);
    }

    #[test]
    fn quarterly_falls_back_to_start() {
        let ticks = TickScale::Quarterly.ticks(date(2024, 2, 10), date(2024, 3, 20));
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].date, date(2024, 2, 10));
        assert_eq!(ticks[0].label, "Q1 2024");
    }

    #[test]
    fn scale_follows_density() {
        assert_eq!(TickScale::for_day_width(10.0, 40.0), TickScale::Weekly);
        assert_eq!(TickScale::for_day_width(40.0 / 7.0, 40.0), TickScale::Weekly);
        assert_eq!(TickScale::for_day_width(2.0, 40.0), TickScale::Monthly);
        assert_eq!(TickScale::for_day_width(1.0, 40.0), TickScale::Quarterly);
    }

    #[test]
    fn display_format() {
        assert_eq!(format_date(Some(date(2024, 1, 5))), "Jan 5, 2024");
        assert_eq!(format_date(None), "—");
    }

    fn date_strategy() -> impl Strategy<Value = NaiveDate> {
        (0i64..20_000).prop_map(|n| date(1990, 1, 1) + Duration::days(n))
    }

    proptest! {
        #[test]
        fn days_between_is_antisymmetric(a in date_strategy(), b in date_strategy()) {
            prop_assert_eq!(days_between(a, b), -days_between(b, a));
            if a <= b {
                prop_assert!(days_between(a, b) >= 0);
            }
        }

        #[test]
        fn project_start_maps_to_origin(s in date_strategy(), w in -50.0f32..50.0) {
            prop_assert_eq!(date_to_x(s, s, w), 0.0);
        }

        #[test]
        fn ticks_are_stable_and_non_empty(
            s in date_strategy(),
            len in 0i64..3_000,
            w in 0.0f32..60.0,
        ) {
            let e = s + Duration::days(len);
            let first = generate_ticks(s, e, w);
            prop_assert!(!first.is_empty());
            prop_assert_eq!(first, generate_ticks(s, e, w));
        }
    }
}
