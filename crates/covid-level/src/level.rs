//! Community level categories.

use colored::Color;
use std::fmt;
use std::str::FromStr;

use crate::error::LevelError;

/// A county's weekly COVID-19 community level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommunityLevel {
    High,
    Medium,
    Low,
}

impl CommunityLevel {
    /// Sort weight: high=0, medium=1, low=2.
    pub fn weight(self) -> u8 {
        match self {
            CommunityLevel::High => 0,
            CommunityLevel::Medium => 1,
            CommunityLevel::Low => 2,
        }
    }

    pub fn color(self) -> Color {
        match self {
            CommunityLevel::High => Color::Red,
            CommunityLevel::Medium => Color::Yellow,
            CommunityLevel::Low => Color::Green,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CommunityLevel::High => "high",
            CommunityLevel::Medium => "medium",
            CommunityLevel::Low => "low",
        }
    }
}

impl FromStr for CommunityLevel {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(CommunityLevel::High),
            "medium" => Ok(CommunityLevel::Medium),
            "low" => Ok(CommunityLevel::Low),
            _ => Err(LevelError::UnknownLevel(s.to_string())),
        }
    }
}

impl fmt::Display for CommunityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
