use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// Project location. Selects the SREC market: ACP schedule, availability
/// factor, and which programs are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    Maryland,
    WashingtonDc,
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Jurisdiction::Maryland => write!(f, "Maryland"),
            Jurisdiction::WashingtonDc => write!(f, "Washington DC"),
        }
    }
}

/// Utility company. Used only to default the electric rate at the input
/// boundary; it has no effect on the projection itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Utility {
    PepcoMaryland,
    PepcoDc,
    Bge,
    PotomacEdison,
    Other,
}

impl Utility {
    /// Default retail rate in $/kWh for this utility's territory.
    pub fn default_electric_rate(&self) -> Rate {
        match self {
            Utility::PepcoMaryland => dec!(0.135),
            Utility::PepcoDc => dec!(0.147),
            Utility::Bge => dec!(0.110),
            Utility::PotomacEdison => dec!(0.125),
            Utility::Other => dec!(0.130),
        }
    }
}

impl fmt::Display for Utility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Utility::PepcoMaryland => "PEPCO Maryland",
            Utility::PepcoDc => "PEPCO DC",
            Utility::Bge => "BGE",
            Utility::PotomacEdison => "Potomac Edison",
            Utility::Other => "Other",
        };
        write!(f, "{label}")
    }
}

/// SREC program selection. Standard and Brighter Tomorrow are Maryland
/// programs; DC has a single standard program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SrecProgram {
    Standard,
    BrighterTomorrow,
    DcStandard,
}

impl fmt::Display for SrecProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SrecProgram::Standard => "Standard SREC",
            SrecProgram::BrighterTomorrow => "Brighter Tomorrow SREC",
            SrecProgram::DcStandard => "Standard SREC (DC)",
        };
        write!(f, "{label}")
    }
}

/// Annual utility-rate escalation assumption. The input boundary offers
/// exactly these three scenarios, so out-of-menu rates are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EscalationAssumption {
    Conservative,
    Moderate,
    Aggressive,
}

impl EscalationAssumption {
    pub fn rate(&self) -> Rate {
        match self {
            EscalationAssumption::Conservative => dec!(0.020),
            EscalationAssumption::Moderate => dec!(0.035),
            EscalationAssumption::Aggressive => dec!(0.050),
        }
    }
}

impl fmt::Display for EscalationAssumption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EscalationAssumption::Conservative => "2.0% (Conservative)",
            EscalationAssumption::Moderate => "3.5% (Moderate)",
            EscalationAssumption::Aggressive => "5.0% (Aggressive)",
        };
        write!(f, "{label}")
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utility_default_rates() {
        assert_eq!(Utility::PepcoMaryland.default_electric_rate(), dec!(0.135));
        assert_eq!(Utility::PepcoDc.default_electric_rate(), dec!(0.147));
        assert_eq!(Utility::Bge.default_electric_rate(), dec!(0.110));
        assert_eq!(Utility::PotomacEdison.default_electric_rate(), dec!(0.125));
        assert_eq!(Utility::Other.default_electric_rate(), dec!(0.130));
    }

    #[test]
    fn test_escalation_menu() {
        assert_eq!(EscalationAssumption::Conservative.rate(), dec!(0.020));
        assert_eq!(EscalationAssumption::Moderate.rate(), dec!(0.035));
        assert_eq!(EscalationAssumption::Aggressive.rate(), dec!(0.050));
    }

    #[test]
    fn test_jurisdiction_labels() {
        assert_eq!(Jurisdiction::Maryland.to_string(), "Maryland");
        assert_eq!(Jurisdiction::WashingtonDc.to_string(), "Washington DC");
    }
}
