use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::Cents;
use crate::core::{AppError, Result};

/// Line-item label used when the processing fee is passed through to the
/// customer on the hosted checkout page
pub const PROCESSING_FEE_LABEL: &str = "Service & Handling";

/// Line-item label for the invoicing/paperwork cost recovery fee
pub const DOCUMENTATION_FEE_LABEL: &str = "Documentation & Processing";

/// Percentage-plus-fixed fee charged by the payment processor per transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingFee {
    pub label: String,
    pub rate: Decimal,
    pub fixed_cents: Cents,
}

/// Percentage fee recovering invoicing/documentation cost, optionally capped
/// at an absolute amount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentationFee {
    pub label: String,
    pub rate: Decimal,
    pub cap_cents: Option<Cents>,
}

/// The canonical fee configuration injected into the calculator.
///
/// There is exactly one of these per deployment; every checkout path prices
/// against the same model so quoted totals and settled totals agree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeModel {
    pub processing: ProcessingFee,
    pub documentation: DocumentationFee,
}

impl FeeModel {
    /// Card-payment defaults: 2.9% + 30 cents processing, 0.4% documentation
    /// capped at $2.00
    pub fn card_default() -> Self {
        Self {
            processing: ProcessingFee {
                label: PROCESSING_FEE_LABEL.to_string(),
                rate: Decimal::new(29, 3),
                fixed_cents: 30,
            },
            documentation: DocumentationFee {
                label: DOCUMENTATION_FEE_LABEL.to_string(),
                rate: Decimal::new(4, 3),
                cap_cents: Some(200),
            },
        }
    }

    /// Validates the model is solvable.
    ///
    /// The gross-from-net equation divides by `1 - processing.rate -
    /// documentation.rate`; rates summing to 1 or more make the denominator
    /// zero or negative and the equation diverges.
    pub fn validate(&self) -> Result<()> {
        if self.processing.rate < Decimal::ZERO {
            return Err(AppError::invalid_fee_model(format!(
                "processing rate cannot be negative, got {}",
                self.processing.rate
            )));
        }

        if self.documentation.rate < Decimal::ZERO {
            return Err(AppError::invalid_fee_model(format!(
                "documentation rate cannot be negative, got {}",
                self.documentation.rate
            )));
        }

        if self.processing.fixed_cents < 0 {
            return Err(AppError::invalid_fee_model(format!(
                "fixed processing fee cannot be negative, got {}",
                self.processing.fixed_cents
            )));
        }

        if let Some(cap) = self.documentation.cap_cents {
            if cap <= 0 {
                return Err(AppError::invalid_fee_model(format!(
                    "documentation fee cap must be positive, got {}",
                    cap
                )));
            }
        }

        if self.combined_rate() >= Decimal::ONE {
            return Err(AppError::invalid_fee_model(format!(
                "combined fee rate must be below 1, got {}",
                self.combined_rate()
            )));
        }

        Ok(())
    }

    /// Sum of the percentage components
    pub fn combined_rate(&self) -> Decimal {
        self.processing.rate + self.documentation.rate
    }
}
