//! Timeframe — a candle duration with its display label.

use serde::{Deserialize, Serialize};

/// A synthetic-candle duration. The label is what reports print ("5M",
/// "15M", "1H"); the math only ever sees `minutes`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timeframe {
    pub minutes: u32,
    pub label: String,
}

impl Timeframe {
    pub fn new(minutes: u32, label: impl Into<String>) -> Self {
        Self {
            minutes,
            label: label.into(),
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_label() {
        assert_eq!(Timeframe::new(60, "1H").to_string(), "1H");
    }
}
