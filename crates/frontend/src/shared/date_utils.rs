/// Date helpers for the panels and printed reports
use chrono::{Local, NaiveDate};

/// Local calendar date of the browser
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Long form used in report headers
/// Example: 2024-03-09 -> "March 9, 2024"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_long_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(format_long_date(date), "March 9, 2024");
    }
}
