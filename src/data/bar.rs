use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BarError {
    #[error("Invalid OHLC values: high ({high}) < low ({low})")]
    InvalidHighLow { high: f64, low: f64 },
    #[error("Invalid OHLC values: close ({close}) outside high-low range [{low}, {high}]")]
    InvalidClose { close: f64, high: f64, low: f64 },
    #[error("Invalid OHLC values: open ({open}) outside high-low range [{low}, {high}]")]
    InvalidOpen { open: f64, high: f64, low: f64 },
    #[error("Non-positive close: {0}")]
    NonPositiveClose(f64),
}

//a single daily ohlc bar of market data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    //creates a new Bar with validation
    pub fn new(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> Result<Self, BarError> {
        //validate high >= low
        if high < low {
            return Err(BarError::InvalidHighLow { high, low });
        }

        //validate close within [low, high]
        if close < low || close > high {
            return Err(BarError::InvalidClose { close, high, low });
        }

        //validate open within [low, high]
        if open < low || open > high {
            return Err(BarError::InvalidOpen { open, high, low });
        }

        //close is a divisor in returns and excursion ratios
        if close <= 0.0 {
            return Err(BarError::NonPositiveClose(close));
        }

        Ok(Bar {
            date,
            open,
            high,
            low,
            close,
        })
    }

    //creates a Bar without validation
    pub fn new_unchecked(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        Bar {
            date,
            open,
            high,
            low,
            close,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn new_accepts_valid_bar() {
        let bar = Bar::new(day(2), 100.0, 110.0, 95.0, 105.0).unwrap();
        assert_eq!(bar.date, day(2));
        assert!((bar.close - 105.0).abs() < f64::EPSILON);
    }

    #[test]
    fn new_rejects_high_below_low() {
        let err = Bar::new(day(2), 100.0, 90.0, 95.0, 92.0).unwrap_err();
        assert!(matches!(err, BarError::InvalidHighLow { .. }));
    }

    #[test]
    fn new_rejects_close_outside_range() {
        let err = Bar::new(day(2), 100.0, 110.0, 95.0, 120.0).unwrap_err();
        assert!(matches!(err, BarError::InvalidClose { .. }));
    }

    #[test]
    fn new_rejects_open_outside_range() {
        let err = Bar::new(day(2), 80.0, 110.0, 95.0, 100.0).unwrap_err();
        assert!(matches!(err, BarError::InvalidOpen { .. }));
    }

    #[test]
    fn new_rejects_non_positive_close() {
        let err = Bar::new(day(2), -1.0, 0.0, -1.0, 0.0).unwrap_err();
        assert!(matches!(err, BarError::NonPositiveClose(_)));
    }

    #[test]
    fn new_unchecked_skips_validation() {
        let bar = Bar::new_unchecked(day(2), 100.0, 90.0, 95.0, 92.0);
        assert!((bar.high - 90.0).abs() < f64::EPSILON);
    }
}
