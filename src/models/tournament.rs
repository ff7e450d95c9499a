use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for tournaments table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tournament {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Tournament {
    /// "Premier League - 2018"
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.name, self.start_date.year())
    }

    /// First instant a match of this tournament may start.
    pub fn opens_at(&self) -> DateTime<Utc> {
        self.start_date.and_time(chrono::NaiveTime::MIN).and_utc()
    }

    /// First instant after the tournament's last day.
    pub fn closes_at(&self) -> DateTime<Utc> {
        (self.end_date + chrono::Days::new(1))
            .and_time(chrono::NaiveTime::MIN)
            .and_utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tournament() -> Tournament {
        Tournament {
            id: Uuid::new_v4(),
            name: "Premier League".into(),
            start_date: NaiveDate::from_ymd_opt(2018, 8, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2019, 5, 12).unwrap(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_display_name_uses_start_year() {
        assert_eq!(tournament().display_name(), "Premier League - 2018");
    }

    #[test]
    fn test_match_bounds_cover_last_day() {
        let t = tournament();
        assert_eq!(t.opens_at().to_rfc3339(), "2018-08-10T00:00:00+00:00");
        assert_eq!(t.closes_at().to_rfc3339(), "2019-05-13T00:00:00+00:00");
    }
}
