use serde::{Deserialize, Serialize};

/// Basis on which the configured rate is quoted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayScheme {
    #[default]
    Hourly,
    Daily,
    Monthly,
}

impl PayScheme {
    pub fn all() -> &'static [PayScheme] {
        &[PayScheme::Hourly, PayScheme::Daily, PayScheme::Monthly]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Monthly => "monthly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Hourly => "Hourly rate",
            Self::Daily => "Daily rate",
            Self::Monthly => "Monthly salary",
        }
    }

    /// Parses a scheme name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hourly" | "hour" | "h" => Some(Self::Hourly),
            "daily" | "day" | "d" => Some(Self::Daily),
            "monthly" | "month" | "m" => Some(Self::Monthly),
            _ => None,
        }
    }
}

/// Where the overtime hours used for pricing come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OvertimePolicy {
    /// The user-declared `overtime_hours` value, regardless of the clock.
    #[default]
    Declared,
    /// Hours worked beyond `work_hours_per_day`, as measured by the clock.
    ClockDerived,
}

impl OvertimePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Declared => "declared",
            Self::ClockDerived => "clock",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "declared" => Some(Self::Declared),
            "clock" | "clock-derived" => Some(Self::ClockDerived),
            _ => None,
        }
    }
}
