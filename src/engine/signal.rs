use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PositionError {
    #[error("Invalid position flag: {0} (expected 0 or 1)")]
    InvalidFlag(i8),
}

//daily position state, long-only with a single unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    Flat,
    Long,
}

impl Position {
    //portfolio weight applied to daily returns
    pub fn weight(&self) -> f64 {
        match self {
            Position::Flat => 0.0,
            Position::Long => 1.0,
        }
    }

    //converts a 0/1 integer flag as found in csv input
    pub fn from_flag(flag: i8) -> Result<Self, PositionError> {
        match flag {
            0 => Ok(Position::Flat),
            1 => Ok(Position::Long),
            other => Err(PositionError::InvalidFlag(other)),
        }
    }

    pub fn as_flag(&self) -> i8 {
        match self {
            Position::Flat => 0,
            Position::Long => 1,
        }
    }
}

//discrete trade event derived from day-over-day position changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Hold,
    Entry,
    Exit,
}

impl Signal {
    //integer rendering for export: entry +1, exit -1, hold 0
    pub fn as_int(&self) -> i8 {
        match self {
            Signal::Hold => 0,
            Signal::Entry => 1,
            Signal::Exit => -1,
        }
    }
}

//converts a position series into entry/exit/hold events
//day 0 entering directly from nothing counts as an entry
pub fn extract_signals(positions: &[Position]) -> Vec<Signal> {
    let mut signals = Vec::with_capacity(positions.len());

    for (i, &position) in positions.iter().enumerate() {
        let signal = if i == 0 {
            match position {
                Position::Long => Signal::Entry,
                Position::Flat => Signal::Hold,
            }
        } else {
            match (positions[i - 1], position) {
                (Position::Flat, Position::Long) => Signal::Entry,
                (Position::Long, Position::Flat) => Signal::Exit,
                _ => Signal::Hold,
            }
        };
        signals.push(signal);
    }

    signals
}

#[cfg(test)]
mod tests {
    use super::Position::{Flat, Long};
    use super::Signal::{Entry, Exit, Hold};
    use super::*;

    #[test]
    fn signals_round_trip() {
        let positions = vec![Long, Long, Flat, Flat, Long, Flat];
        let signals = extract_signals(&positions);
        assert_eq!(signals, vec![Entry, Hold, Exit, Hold, Entry, Exit]);
    }

    #[test]
    fn signals_flat_start() {
        let positions = vec![Flat, Flat, Long];
        let signals = extract_signals(&positions);
        assert_eq!(signals, vec![Hold, Hold, Entry]);
    }

    #[test]
    fn signals_are_deterministic() {
        let positions = vec![Flat, Long, Long, Flat, Long];
        assert_eq!(extract_signals(&positions), extract_signals(&positions));
    }

    #[test]
    fn signals_empty_series() {
        assert!(extract_signals(&[]).is_empty());
    }

    #[test]
    fn integer_rendering_matches_convention() {
        assert_eq!(Entry.as_int(), 1);
        assert_eq!(Exit.as_int(), -1);
        assert_eq!(Hold.as_int(), 0);
    }

    #[test]
    fn position_flag_round_trip() {
        assert_eq!(Position::from_flag(0).unwrap(), Flat);
        assert_eq!(Position::from_flag(1).unwrap(), Long);
        assert_eq!(Long.as_flag(), 1);
        assert!(Position::from_flag(2).is_err());
        assert!(Position::from_flag(-1).is_err());
    }

    #[test]
    fn weight_is_zero_or_one() {
        assert!((Flat.weight() - 0.0).abs() < f64::EPSILON);
        assert!((Long.weight() - 1.0).abs() < f64::EPSILON);
    }
}
