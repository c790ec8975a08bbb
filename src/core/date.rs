use crate::utils::error::{Result, ScrapeError};
use regex::Regex;

/// Normalize the portal's display date into ISO form.
///
/// The input looks like `2024年10月2日（水）`; digit runs are taken
/// left-to-right as year, month, day and the weekday annotation is
/// discarded. Month and day are zero-padded to width 2. Values are not
/// checked against a calendar; the portal is trusted to render real
/// dates.
pub fn normalize_display_date(input: &str) -> Result<String> {
    let digits = Regex::new(r"\d+").unwrap();
    let mut groups = digits.find_iter(input);

    let (year, month, day) = match (groups.next(), groups.next(), groups.next()) {
        (Some(y), Some(m), Some(d)) => (y.as_str(), m.as_str(), d.as_str()),
        _ => {
            return Err(ScrapeError::DateParse {
                input: input.to_string(),
            })
        }
    };

    Ok(format!("{}-{:0>2}-{:0>2}", year, month, day))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_portal_display_date() {
        assert_eq!(
            normalize_display_date("2024年10月2日（水）").unwrap(),
            "2024-10-02"
        );
    }

    #[test]
    fn test_pads_month_and_day() {
        assert_eq!(
            normalize_display_date("2024年1月1日（月）").unwrap(),
            "2024-01-01"
        );
    }

    #[test]
    fn test_already_wide_fields_untouched() {
        assert_eq!(
            normalize_display_date("2024年12月31日（火）").unwrap(),
            "2024-12-31"
        );
    }

    #[test]
    fn test_weekday_annotation_is_not_a_digit_group() {
        // Only the first three digit runs matter.
        assert_eq!(
            normalize_display_date("2025年3月9日（日）10時").unwrap(),
            "2025-03-09"
        );
    }

    #[test]
    fn test_no_calendar_validation() {
        // Day 31 in a 30-day month passes through unchanged.
        assert_eq!(
            normalize_display_date("2024年4月31日（水）").unwrap(),
            "2024-04-31"
        );
    }

    #[test]
    fn test_too_few_digit_groups_is_an_error() {
        let err = normalize_display_date("no date here").unwrap_err();
        assert!(matches!(err, ScrapeError::DateParse { .. }));

        assert!(normalize_display_date("2024年10月").is_err());
        assert!(normalize_display_date("").is_err());
    }

    #[test]
    fn test_output_shape() {
        let re = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
        for input in ["2024年10月2日（水）", "2023年5月15日（月）", "2026年2月7日（土）"] {
            let normalized = normalize_display_date(input).unwrap();
            assert!(re.is_match(&normalized), "unexpected shape: {}", normalized);
        }
    }
}
