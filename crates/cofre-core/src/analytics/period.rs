//! Period identifiers and date range resolution

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Serialize, Serializer};

/// Length of the trailing window used for `30_dias` and unknown identifiers
pub const TRAILING_WINDOW_DAYS: u64 = 30;

/// Named relative calendar window
///
/// Parsing never fails: an unrecognized identifier is kept verbatim as
/// `Other` and resolves to the trailing 30-day window.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PeriodKey {
    /// `este_mes`: first day of the current month through today
    EsteMes,
    /// `mes_passado`: the whole previous calendar month
    MesPassado,
    /// `este_ano`: January 1 through today
    EsteAno,
    /// `30_dias`: the trailing 30 days
    TrintaDias,
    /// Any other identifier
    Other(String),
}

impl PeriodKey {
    /// The recognized identifiers, in menu order
    pub fn named() -> [PeriodKey; 4] {
        [
            PeriodKey::EsteMes,
            PeriodKey::MesPassado,
            PeriodKey::EsteAno,
            PeriodKey::TrintaDias,
        ]
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "este_mes" => PeriodKey::EsteMes,
            "mes_passado" => PeriodKey::MesPassado,
            "este_ano" => PeriodKey::EsteAno,
            "30_dias" => PeriodKey::TrintaDias,
            other => PeriodKey::Other(other.to_string()),
        }
    }

    /// The identifier as given
    pub fn as_str(&self) -> &str {
        match self {
            PeriodKey::EsteMes => "este_mes",
            PeriodKey::MesPassado => "mes_passado",
            PeriodKey::EsteAno => "este_ano",
            PeriodKey::TrintaDias => "30_dias",
            PeriodKey::Other(raw) => raw,
        }
    }
}

impl From<&str> for PeriodKey {
    fn from(s: &str) -> Self {
        PeriodKey::parse(s)
    }
}

impl FromStr for PeriodKey {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(PeriodKey::parse(s))
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for PeriodKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Inclusive date range, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days covered, both ends included
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Resolve a period identifier to a concrete range anchored at `today`
pub fn resolve(period: &PeriodKey, today: NaiveDate) -> DateRange {
    let first_of_month = today - Days::new(u64::from(today.day0()));

    match period {
        PeriodKey::EsteMes => DateRange {
            start: first_of_month,
            end: today,
        },
        PeriodKey::MesPassado => {
            let end = first_of_month - Days::new(1);
            DateRange {
                start: end - Days::new(u64::from(end.day0())),
                end,
            }
        }
        PeriodKey::EsteAno => DateRange {
            start: today - Days::new(u64::from(today.ordinal0())),
            end: today,
        },
        PeriodKey::TrintaDias | PeriodKey::Other(_) => DateRange {
            start: today - Days::new(TRAILING_WINDOW_DAYS),
            end: today,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
        DateRange { start, end }
    }

    #[test]
    fn test_this_month() {
        assert_eq!(
            resolve(&PeriodKey::EsteMes, date(2024, 3, 15)),
            range(date(2024, 3, 1), date(2024, 3, 15))
        );
    }

    #[test]
    fn test_last_month_leap_february() {
        assert_eq!(
            resolve(&PeriodKey::MesPassado, date(2024, 3, 15)),
            range(date(2024, 2, 1), date(2024, 2, 29))
        );
    }

    #[test]
    fn test_last_month_non_leap_february() {
        assert_eq!(
            resolve(&PeriodKey::MesPassado, date(2023, 3, 31)),
            range(date(2023, 2, 1), date(2023, 2, 28))
        );
    }

    #[test]
    fn test_last_month_january_rolls_over_year() {
        assert_eq!(
            resolve(&PeriodKey::MesPassado, date(2024, 1, 10)),
            range(date(2023, 12, 1), date(2023, 12, 31))
        );
    }

    #[test]
    fn test_this_year() {
        assert_eq!(
            resolve(&PeriodKey::EsteAno, date(2024, 3, 15)),
            range(date(2024, 1, 1), date(2024, 3, 15))
        );
    }

    #[test]
    fn test_trailing_thirty_days() {
        assert_eq!(
            resolve(&PeriodKey::TrintaDias, date(2024, 3, 15)),
            range(date(2024, 2, 14), date(2024, 3, 15))
        );
    }

    #[test]
    fn test_unknown_falls_back_to_thirty_days() {
        let period = PeriodKey::parse("unknown_value");
        assert_eq!(period, PeriodKey::Other("unknown_value".into()));
        assert_eq!(
            resolve(&period, date(2024, 3, 15)),
            range(date(2024, 2, 14), date(2024, 3, 15))
        );
    }

    #[test]
    fn test_first_day_of_month() {
        let today = date(2024, 5, 1);
        assert_eq!(resolve(&PeriodKey::EsteMes, today), range(today, today));
        assert_eq!(
            resolve(&PeriodKey::MesPassado, today),
            range(date(2024, 4, 1), date(2024, 4, 30))
        );
    }

    #[test]
    fn test_start_never_after_end() {
        let mut periods = PeriodKey::named().to_vec();
        periods.push(PeriodKey::parse(""));
        periods.push(PeriodKey::parse("ESTE_MES"));

        let mut today = date(2023, 1, 1);
        while today <= date(2025, 1, 1) {
            for period in &periods {
                let r = resolve(period, today);
                assert!(r.start <= r.end, "{} at {}", period, today);
                assert!(r.end <= today);
            }
            today = today + Days::new(1);
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(
            PeriodKey::parse("Este_Mes"),
            PeriodKey::Other("Este_Mes".into())
        );
    }

    #[test]
    fn test_identifier_roundtrip() {
        for period in PeriodKey::named() {
            assert_eq!(PeriodKey::parse(period.as_str()), period);
        }
        assert_eq!(PeriodKey::parse("semana").as_str(), "semana");
    }

    #[test]
    fn test_range_helpers() {
        let r = range(date(2024, 2, 1), date(2024, 2, 29));
        assert_eq!(r.num_days(), 29);
        assert!(r.contains(date(2024, 2, 1)));
        assert!(r.contains(date(2024, 2, 29)));
        assert!(!r.contains(date(2024, 3, 1)));
    }
}
