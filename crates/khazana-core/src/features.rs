//! Calendar feature derivation
//!
//! Every loaded row gets `day`, `month`, `year`, `day_of_week` and
//! `is_weekend` attached exactly once, when the table is built.

use chrono::{Datelike, NaiveDate};

use crate::models::{Classifier, RawTransaction, Transaction};

/// Calendar fields derived from a transaction date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFeatures {
    pub day: u32,
    pub month: u32,
    pub year: i32,
    /// 0 = Monday .. 6 = Sunday
    pub day_of_week: u32,
    pub is_weekend: bool,
}

impl CalendarFeatures {
    pub fn from_date(date: NaiveDate) -> Self {
        let day_of_week = date.weekday().num_days_from_monday();
        Self {
            day: date.day(),
            month: date.month(),
            year: date.year(),
            day_of_week,
            is_weekend: matches!(day_of_week, 5 | 6),
        }
    }
}

/// Attach calendar features and the expense/income classification to a raw row
pub fn derive(raw: RawTransaction, classifier: &Classifier) -> Transaction {
    let features = CalendarFeatures::from_date(raw.date);
    let classification = classifier.classify(&raw.kind);

    Transaction {
        date: raw.date,
        amount: raw.amount,
        kind: raw.kind,
        category: raw.category,
        details: raw.details,
        day: features.day,
        month: features.month,
        year: features.year,
        day_of_week: features.day_of_week,
        is_weekend: features.is_weekend,
        classification,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Classification;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_features_weekday() {
        // 2024-01-15 is a Monday
        let f = CalendarFeatures::from_date(date(2024, 1, 15));
        assert_eq!(f.day, 15);
        assert_eq!(f.month, 1);
        assert_eq!(f.year, 2024);
        assert_eq!(f.day_of_week, 0);
        assert!(!f.is_weekend);
    }

    #[test]
    fn test_features_weekend_flag() {
        // 2024-01-20 Saturday, 2024-01-21 Sunday, 2024-01-19 Friday
        assert!(CalendarFeatures::from_date(date(2024, 1, 20)).is_weekend);
        assert_eq!(CalendarFeatures::from_date(date(2024, 1, 20)).day_of_week, 5);
        assert!(CalendarFeatures::from_date(date(2024, 1, 21)).is_weekend);
        assert_eq!(CalendarFeatures::from_date(date(2024, 1, 21)).day_of_week, 6);
        assert!(!CalendarFeatures::from_date(date(2024, 1, 19)).is_weekend);
    }

    #[test]
    fn test_derive_keeps_fields_and_classifies() {
        let raw = RawTransaction {
            date: date(2023, 12, 31),
            amount: 42.5,
            kind: "Withdrawal".to_string(),
            category: Some("Food".to_string()),
            details: Some("Dinner".to_string()),
        };

        let tx = derive(raw, &Classifier::default());
        assert_eq!(tx.amount, 42.5);
        assert_eq!(tx.kind, "Withdrawal");
        assert_eq!(tx.category.as_deref(), Some("Food"));
        assert_eq!(tx.year, 2023);
        assert_eq!(tx.month, 12);
        assert_eq!(tx.day, 31);
        // 2023-12-31 is a Sunday
        assert_eq!(tx.day_of_week, 6);
        assert!(tx.is_weekend);
        assert_eq!(tx.classification, Classification::Expense);
    }
}
