//! Reported search durations attached to a case.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const UNKNOWN: &str = "unknown";

/// Hour counts exactly as reported, which may be free text such as
/// `"unknown"`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReportedHours {
    /// Total hours from the subject going missing to the find.
    pub total: String,
    /// Hours before the search was notified.
    pub notify: String,
    /// Hours spent searching.
    pub search: String,
}

impl ReportedHours {
    /// Replace an `"unknown"` total with notify plus search hours.
    ///
    /// The total is left untouched when it is known or when either part is
    /// not a number.
    ///
    /// # Examples
    /// ```
    /// use mapscore_core::ReportedHours;
    ///
    /// let hours = ReportedHours {
    ///     total: "Unknown".into(),
    ///     notify: "2".into(),
    ///     search: "5.5".into(),
    /// };
    /// assert_eq!(hours.with_filled_total().total, "7.5");
    /// ```
    #[expect(clippy::float_arithmetic, reason = "total is a sum of two durations")]
    #[must_use]
    pub fn with_filled_total(mut self) -> Self {
        if !self.total.trim().eq_ignore_ascii_case(UNKNOWN) {
            return self;
        }
        let notify = self.notify.trim().parse::<f64>();
        let search = self.search.trim().parse::<f64>();
        if let (Ok(before), Ok(during)) = (notify, search) {
            self.total = (before + during).to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn hours(total: &str, notify: &str, search: &str) -> ReportedHours {
        ReportedHours {
            total: total.to_owned(),
            notify: notify.to_owned(),
            search: search.to_owned(),
        }
    }

    #[rstest]
    #[case(hours("unknown", "3", "4"), "7")]
    #[case(hours("UNKNOWN", "0.5", "1"), "1.5")]
    #[case(hours("12", "3", "4"), "12")]
    #[case(hours("unknown", "n/a", "4"), "unknown")]
    #[case(hours("unknown", "3", ""), "unknown")]
    fn fills_only_unknown_totals(#[case] input: ReportedHours, #[case] expected: &str) {
        assert_eq!(input.with_filled_total().total, expected);
    }
}
