//! Naive experience-span estimate from year-like tokens

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[0-9]{4}\b").expect("Invalid year regex"));

/// Span between the smallest and largest four-digit number in a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "years", rename_all = "snake_case")]
pub enum ExperienceEstimate {
    Years(u32),
    NotAvailable,
}

impl fmt::Display for ExperienceEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceEstimate::Years(years) => write!(f, "{} years", years),
            ExperienceEstimate::NotAvailable => write!(f, "N/A"),
        }
    }
}

/// Any standalone four-digit number counts as a year; there is no calendar
/// range check. A single distinct year yields `NotAvailable`, not zero.
pub fn estimate_experience(text: &str) -> ExperienceEstimate {
    let years: Vec<u32> = YEAR
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();

    match (years.iter().min(), years.iter().max()) {
        (Some(&min), Some(&max)) if max > min => ExperienceEstimate::Years(max - min),
        _ => ExperienceEstimate::NotAvailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_between_years() {
        let text = "Software engineer at Acme (2015 - 2018), then staff engineer until 2020.";
        assert_eq!(estimate_experience(text), ExperienceEstimate::Years(5));
        assert_eq!(estimate_experience(text).to_string(), "5 years");
    }

    #[test]
    fn test_no_years() {
        assert_eq!(estimate_experience("Seasoned backend engineer"), ExperienceEstimate::NotAvailable);
        assert_eq!(estimate_experience(""), ExperienceEstimate::NotAvailable);
        assert_eq!(ExperienceEstimate::NotAvailable.to_string(), "N/A");
    }

    #[test]
    fn test_single_repeated_year_is_not_available() {
        assert_eq!(estimate_experience("2020, 2020 and again 2020"), ExperienceEstimate::NotAvailable);
    }

    #[test]
    fn test_only_standalone_four_digit_tokens() {
        // 12345 and 2019a are not four-digit tokens; 0042 is
        assert_eq!(estimate_experience("id 12345, build 2019a, code 0042, since 2010"), ExperienceEstimate::Years(1968));
    }

    #[test]
    fn test_years_inside_ranges() {
        assert_eq!(estimate_experience("2012–2016, 2016-2023"), ExperienceEstimate::Years(11));
    }
}
