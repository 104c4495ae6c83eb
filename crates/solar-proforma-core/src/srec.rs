use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Jurisdiction, Money, SrecProgram};

/// One SREC is minted per 1000 kWh of generation.
pub const KWH_PER_SREC: Decimal = dec!(1000);

/// Maryland ACP schedule, $ per credit: nine published compliance years,
/// zero thereafter.
const MARYLAND_ACP: [Decimal; 9] = [
    dec!(55),
    dec!(45),
    dec!(35),
    dec!(30),
    dec!(30),
    dec!(30),
    dec!(30),
    dec!(30),
    dec!(0),
];

/// DC ACP schedule, $ per credit: seventeen published compliance years,
/// then the statutory floor.
const DC_ACP: [Decimal; 17] = [
    dec!(460),
    dec!(440),
    dec!(420),
    dec!(400),
    dec!(380),
    dec!(360),
    dec!(340),
    dec!(320),
    dec!(300),
    dec!(300),
    dec!(300),
    dec!(300),
    dec!(300),
    dec!(300),
    dec!(300),
    dec!(300),
    dec!(300),
];

/// Floor price for DC compliance years beyond the published schedule.
const DC_ACP_FLOOR: Decimal = dec!(100);

impl Jurisdiction {
    /// ACP price for a 1-based projection year. Years past the published
    /// schedule take the jurisdiction's documented tail: zero in Maryland,
    /// the $100 floor in DC.
    pub fn acp_for_year(&self, year: u32) -> Money {
        let idx = year.saturating_sub(1) as usize;
        match self {
            Jurisdiction::Maryland => MARYLAND_ACP.get(idx).copied().unwrap_or(Decimal::ZERO),
            Jurisdiction::WashingtonDc => DC_ACP.get(idx).copied().unwrap_or(DC_ACP_FLOOR),
        }
    }

    /// Fraction of minted credits assumed to monetize.
    pub fn availability_factor(&self) -> Decimal {
        match self {
            Jurisdiction::Maryland => dec!(0.90),
            Jurisdiction::WashingtonDc => dec!(0.85),
        }
    }
}

impl SrecProgram {
    /// Program price multiplier. Brighter Tomorrow credits clear at 1.5x.
    pub fn multiplier(&self) -> Decimal {
        match self {
            SrecProgram::BrighterTomorrow => dec!(1.5),
            SrecProgram::Standard | SrecProgram::DcStandard => Decimal::ONE,
        }
    }

    /// The jurisdiction this program is offered in.
    pub fn jurisdiction(&self) -> Jurisdiction {
        match self {
            SrecProgram::Standard | SrecProgram::BrighterTomorrow => Jurisdiction::Maryland,
            SrecProgram::DcStandard => Jurisdiction::WashingtonDc,
        }
    }
}

/// Effective SREC price for one projection year:
/// ACP x availability factor x program multiplier.
pub fn srec_unit_value(jurisdiction: Jurisdiction, program: SrecProgram, year: u32) -> Money {
    jurisdiction.acp_for_year(year) * jurisdiction.availability_factor() * program.multiplier()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maryland_year_one_value() {
        // 55 ACP x 90% availability
        let value = srec_unit_value(Jurisdiction::Maryland, SrecProgram::Standard, 1);
        assert_eq!(value, dec!(49.5));
    }

    #[test]
    fn test_brighter_tomorrow_multiplier() {
        let value = srec_unit_value(Jurisdiction::Maryland, SrecProgram::BrighterTomorrow, 1);
        assert_eq!(value, dec!(49.5) * dec!(1.5));
    }

    #[test]
    fn test_maryland_schedule_goes_to_zero() {
        // Year 9 is the published zero; years 10-25 fall off the schedule.
        assert_eq!(Jurisdiction::Maryland.acp_for_year(9), Decimal::ZERO);
        for year in 10..=25 {
            assert_eq!(
                srec_unit_value(Jurisdiction::Maryland, SrecProgram::Standard, year),
                Decimal::ZERO,
                "Maryland SREC value should be zero in year {year}"
            );
        }
    }

    #[test]
    fn test_dc_floor_after_published_schedule() {
        assert_eq!(Jurisdiction::WashingtonDc.acp_for_year(17), dec!(300));
        for year in 18..=25 {
            assert_eq!(
                Jurisdiction::WashingtonDc.acp_for_year(year),
                DC_ACP_FLOOR,
                "DC ACP should sit at the floor in year {year}"
            );
        }
        // Floor flows through the availability factor, not past it
        assert_eq!(
            srec_unit_value(Jurisdiction::WashingtonDc, SrecProgram::DcStandard, 18),
            dec!(100) * dec!(0.85)
        );
    }

    #[test]
    fn test_dc_year_one_value() {
        let value = srec_unit_value(Jurisdiction::WashingtonDc, SrecProgram::DcStandard, 1);
        assert_eq!(value, dec!(460) * dec!(0.85));
    }

    #[test]
    fn test_program_jurisdictions() {
        assert_eq!(SrecProgram::Standard.jurisdiction(), Jurisdiction::Maryland);
        assert_eq!(
            SrecProgram::BrighterTomorrow.jurisdiction(),
            Jurisdiction::Maryland
        );
        assert_eq!(
            SrecProgram::DcStandard.jurisdiction(),
            Jurisdiction::WashingtonDc
        );
    }
}
