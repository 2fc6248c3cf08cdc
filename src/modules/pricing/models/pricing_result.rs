use serde::{Deserialize, Serialize};

use crate::core::money::Cents;

use super::fee_model::FeeModel;

/// One itemized fee component of a priced charge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeLine {
    pub label: String,
    pub amount_cents: Cents,
}

/// The outcome of a pricing calculation.
///
/// Invariant: `net_cents = gross_cents - sum(fees)`, always.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    /// What the customer is charged
    pub gross_cents: Cents,
    /// What the business receives after fees
    pub net_cents: Cents,
    /// Itemized fees, in configuration order
    pub fees: Vec<FeeLine>,
}

impl PricingResult {
    /// All-zero result for a zero amount, with one entry per configured
    /// fee component so callers can still render the breakdown
    pub fn zero(model: &FeeModel) -> Self {
        Self {
            gross_cents: 0,
            net_cents: 0,
            fees: vec![
                FeeLine {
                    label: model.processing.label.clone(),
                    amount_cents: 0,
                },
                FeeLine {
                    label: model.documentation.label.clone(),
                    amount_cents: 0,
                },
            ],
        }
    }

    pub fn total_fees_cents(&self) -> Cents {
        self.fees.iter().map(|f| f.amount_cents).sum()
    }
}
