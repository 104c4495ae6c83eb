use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ProFormaError;
use crate::types::Money;
use crate::ProFormaResult;

/// Highest unit cost the input boundary accepts for any category, $/W.
const MAX_UNIT_COST: Decimal = dec!(5);

/// Largest system size the input boundary accepts, kW.
const MAX_SYSTEM_SIZE_KW: Decimal = dec!(10000);

const WATTS_PER_KW: Decimal = dec!(1000);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The fixed set of per-watt cost categories tracked on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostCategory {
    Modules,
    Inverters,
    Racking,
    BallastBlock,
    ElectricalMaterial,
    OtherMaterials,
    EquipmentRental,
    RoofAttachments,
    Dumpsters,
    PortaJohn,
    SafetyEquipment,
    Engineering,
    Stamps,
    Permits,
    RevenueGradeMeters,
    IxApplicationFees,
    OriginationCosts,
}

impl CostCategory {
    pub fn label(&self) -> &'static str {
        match self {
            CostCategory::Modules => "Modules",
            CostCategory::Inverters => "Inverters",
            CostCategory::Racking => "Racking",
            CostCategory::BallastBlock => "Ballast Block",
            CostCategory::ElectricalMaterial => "Electrical Material",
            CostCategory::OtherMaterials => "Other Materials",
            CostCategory::EquipmentRental => "Equipment Rental",
            CostCategory::RoofAttachments => "Roof Attachments",
            CostCategory::Dumpsters => "Dumpsters",
            CostCategory::PortaJohn => "Porta John",
            CostCategory::SafetyEquipment => "Safety Equipment",
            CostCategory::Engineering => "Engineering",
            CostCategory::Stamps => "Stamps",
            CostCategory::Permits => "Permits",
            CostCategory::RevenueGradeMeters => "Revenue Grade Meters",
            CostCategory::IxApplicationFees => "IX Application Fees",
            CostCategory::OriginationCosts => "Origination Costs",
        }
    }
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-category unit costs in $/W. One field per category so JSON inputs
/// name costs explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSchedule {
    pub modules: Money,
    pub inverters: Money,
    pub racking: Money,
    pub ballast_block: Money,
    pub electrical_material: Money,
    pub other_materials: Money,
    pub equipment_rental: Money,
    pub roof_attachments: Money,
    pub dumpsters: Money,
    pub porta_john: Money,
    pub safety_equipment: Money,
    pub engineering: Money,
    pub stamps: Money,
    pub permits: Money,
    pub revenue_grade_meters: Money,
    pub ix_application_fees: Money,
    pub origination_costs: Money,
}

impl Default for PricingSchedule {
    /// The standard commercial rooftop pricing set (sums to 1.15 $/W).
    fn default() -> Self {
        PricingSchedule {
            modules: dec!(0.28),
            inverters: dec!(0.15),
            racking: dec!(0.23),
            ballast_block: dec!(0.02),
            electrical_material: dec!(0.23),
            other_materials: dec!(0.02),
            equipment_rental: dec!(0.04),
            roof_attachments: dec!(0.02),
            dumpsters: dec!(0.01),
            porta_john: dec!(0.00),
            safety_equipment: dec!(0.01),
            engineering: dec!(0.02),
            stamps: dec!(0.03),
            permits: dec!(0.03),
            revenue_grade_meters: dec!(0.01),
            ix_application_fees: dec!(0.00),
            origination_costs: dec!(0.05),
        }
    }
}

impl PricingSchedule {
    /// Unit costs paired with their categories, in workbook order.
    pub fn entries(&self) -> [(CostCategory, Money); 17] {
        [
            (CostCategory::Modules, self.modules),
            (CostCategory::Inverters, self.inverters),
            (CostCategory::Racking, self.racking),
            (CostCategory::BallastBlock, self.ballast_block),
            (CostCategory::ElectricalMaterial, self.electrical_material),
            (CostCategory::OtherMaterials, self.other_materials),
            (CostCategory::EquipmentRental, self.equipment_rental),
            (CostCategory::RoofAttachments, self.roof_attachments),
            (CostCategory::Dumpsters, self.dumpsters),
            (CostCategory::PortaJohn, self.porta_john),
            (CostCategory::SafetyEquipment, self.safety_equipment),
            (CostCategory::Engineering, self.engineering),
            (CostCategory::Stamps, self.stamps),
            (CostCategory::Permits, self.permits),
            (CostCategory::RevenueGradeMeters, self.revenue_grade_meters),
            (CostCategory::IxApplicationFees, self.ix_application_fees),
            (CostCategory::OriginationCosts, self.origination_costs),
        ]
    }

    /// Sum of all unit costs, $/W.
    pub fn total_unit_cost(&self) -> Money {
        self.entries().iter().map(|(_, cost)| *cost).sum()
    }
}

/// One line of the cost breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostLine {
    pub category: CostCategory,
    /// $/W
    pub unit_cost: Money,
    /// unit_cost x system size in watts
    pub total: Money,
}

/// Aggregated project pricing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingSummary {
    /// $/W across all categories
    pub total_unit_cost: Money,
    /// Total installed cost in dollars
    pub total_cost: Money,
    pub line_items: Vec<CostLine>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Sum per-category unit costs into a total unit cost and total project
/// cost for the given system size.
pub fn aggregate_pricing(
    schedule: &PricingSchedule,
    system_size_kw: Decimal,
) -> ProFormaResult<PricingSummary> {
    if system_size_kw <= Decimal::ZERO || system_size_kw > MAX_SYSTEM_SIZE_KW {
        return Err(ProFormaError::InvalidInput {
            field: "system_size_kw".into(),
            reason: format!("System size must be between 0 and {MAX_SYSTEM_SIZE_KW} kW"),
        });
    }

    let system_size_w = system_size_kw * WATTS_PER_KW;
    let mut line_items = Vec::with_capacity(17);
    let mut total_unit_cost = Decimal::ZERO;

    for (category, unit_cost) in schedule.entries() {
        if unit_cost < Decimal::ZERO {
            return Err(ProFormaError::InvalidInput {
                field: category.label().into(),
                reason: "Unit cost cannot be negative".into(),
            });
        }
        if unit_cost > MAX_UNIT_COST {
            return Err(ProFormaError::InvalidInput {
                field: category.label().into(),
                reason: format!("Unit cost exceeds {MAX_UNIT_COST} $/W"),
            });
        }
        total_unit_cost += unit_cost;
        line_items.push(CostLine {
            category,
            unit_cost,
            total: unit_cost * system_size_w,
        });
    }

    Ok(PricingSummary {
        total_unit_cost,
        total_cost: total_unit_cost * system_size_w,
        line_items,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
