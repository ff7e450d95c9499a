//! Human-readable renderings of spreads and scores for API clients.

use rust_decimal::Decimal;

use crate::models::MatchResult;

/// Render a spread as a handicap line, e.g. `0.25` → `"0 : ¼"`,
/// `-1.75` → `"1¾ : 0"`. The handicap sits on the side that concedes it.
pub fn format_spread(spread: Decimal) -> String {
    if spread.is_zero() {
        return "0 : 0".into();
    }

    let abs = spread.abs();
    let whole = abs.trunc();
    let fraction = match abs - whole {
        f if f.is_zero() => "",
        f if f == Decimal::new(25, 2) => "¼",
        f if f == Decimal::new(5, 1) => "½",
        _ => "¾",
    };

    let line = if whole.is_zero() {
        fraction.to_string()
    } else {
        format!("{}{}", whole.normalize(), fraction)
    };

    if spread.is_sign_positive() {
        format!("0 : {line}")
    } else {
        format!("{line} : 0")
    }
}

pub fn format_result(result: Option<&MatchResult>) -> String {
    match result {
        Some(r) => format!("{} - {}", r.home_goals, r.guest_goals),
        None => "-- : --".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_format_spread() {
        assert_eq!(format_spread(Decimal::ZERO), "0 : 0");
        assert_eq!(format_spread(Decimal::new(25, 2)), "0 : ¼");
        assert_eq!(format_spread(Decimal::new(150, 2)), "0 : 1½");
        assert_eq!(format_spread(Decimal::new(200, 2)), "0 : 2");
        assert_eq!(format_spread(Decimal::new(-75, 2)), "¾ : 0");
        assert_eq!(format_spread(Decimal::new(-175, 2)), "1¾ : 0");
        assert_eq!(format_spread(Decimal::from(-5)), "5 : 0");
    }

    #[test]
    fn test_format_result() {
        let result = MatchResult {
            match_id: Uuid::new_v4(),
            home_goals: 3,
            guest_goals: 1,
            created_at: None,
            updated_at: None,
        };
        assert_eq!(format_result(Some(&result)), "3 - 1");
        assert_eq!(format_result(None), "-- : --");
    }
}
