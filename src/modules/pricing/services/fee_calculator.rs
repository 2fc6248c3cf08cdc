use rust_decimal::Decimal;
use tracing::debug;

use crate::core::money::{self, Cents};
use crate::core::{AppError, Result};
use crate::modules::cart::models::CartItem;
use crate::modules::pricing::models::{FeeLine, FeeModel, PricingResult};

/// Solves the fee-inclusive pricing equation: what must the customer be
/// charged so that, after the processor takes its cut, the business nets a
/// target amount.
///
/// With a processing fee of rate `p` plus fixed `f` and a documentation fee
/// of rate `d` capped at `cap`, the net is a piecewise-linear function of the
/// gross:
///
/// ```text
/// net = gross * (1 - p - d) - f              while gross * d < cap
/// net = gross * (1 - p) - f - cap            once the cap binds
/// ```
///
/// Inverting either branch and taking the ceiling keeps the settled net at or
/// above the requested amount.
///
/// Stateless; every operation is a pure function of its inputs.
pub struct FeeCalculator;

impl FeeCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Computes the gross charge that nets `net_cents` after fees.
    ///
    /// Solves the uncapped branch first; if the documentation fee at that
    /// gross reaches the cap, re-solves with the fee pinned at the cap and
    /// clamps to the break-even gross where the cap first binds.
    pub fn gross_from_net(&self, net_cents: Cents, model: &FeeModel) -> Result<PricingResult> {
        model.validate()?;

        if net_cents < 0 {
            return Err(AppError::invalid_amount(format!(
                "net amount cannot be negative, got {}",
                net_cents
            )));
        }

        if net_cents == 0 {
            return Ok(PricingResult::zero(model));
        }

        let net = Decimal::from(net_cents);
        let fixed = Decimal::from(model.processing.fixed_cents);
        let p = model.processing.rate;
        let d = model.documentation.rate;

        let mut gross = money::ceil_cents((net + fixed) / (Decimal::ONE - p - d))?;

        if let Some(cap) = model.documentation.cap_cents {
            if d > Decimal::ZERO {
                let cap_dec = Decimal::from(cap);
                // Gross at which the documentation fee first hits the cap
                let break_even = money::ceil_cents(cap_dec / d)?;
                if gross >= break_even {
                    gross = money::ceil_cents((net + fixed + cap_dec) / (Decimal::ONE - p))?;
                    if gross < break_even {
                        gross = break_even;
                    }
                }
            }
        }

        // The per-component fee rounding can eat the ceiling slack when both
        // components land on a half cent; charge one more cent until the
        // settled net meets the target.
        let mut result = self.breakdown(gross, model)?;
        while result.net_cents < net_cents {
            gross += 1;
            result = self.breakdown(gross, model)?;
        }

        debug!(
            net_requested = net_cents,
            gross = result.gross_cents,
            net = result.net_cents,
            "solved gross from net"
        );

        Ok(result)
    }

    /// Prices a whole cart: sums the line subtotals (each rounded to the
    /// nearest cent) into the net target and delegates to `gross_from_net`.
    ///
    /// Does not mutate the cart; callers pass a snapshot.
    pub fn gross_from_cart(&self, items: &[CartItem], model: &FeeModel) -> Result<PricingResult> {
        if items.is_empty() {
            return Err(AppError::invalid_cart_item("cart is empty"));
        }

        let mut net_cents: Cents = 0;
        for item in items {
            item.validate()?;
            net_cents = net_cents
                .checked_add(item.subtotal_cents()?)
                .ok_or_else(|| AppError::invalid_amount("cart subtotal overflows cents"))?;
        }

        self.gross_from_net(net_cents, model)
    }

    /// Itemizes the fees for a charge whose gross is already fixed, e.g. a
    /// flat listed price. No solving; the net is whatever remains.
    pub fn breakdown_for_gross(&self, gross_cents: Cents, model: &FeeModel) -> Result<PricingResult> {
        model.validate()?;

        if gross_cents < 0 {
            return Err(AppError::invalid_amount(format!(
                "gross amount cannot be negative, got {}",
                gross_cents
            )));
        }

        if gross_cents == 0 {
            return Ok(PricingResult::zero(model));
        }

        self.breakdown(gross_cents, model)
    }

    /// Fee entries for a given gross: processing = round(gross * p) + f,
    /// documentation = min(round(gross * d), cap). Assumes a validated model
    /// and non-negative gross.
    fn breakdown(&self, gross_cents: Cents, model: &FeeModel) -> Result<PricingResult> {
        let gross = Decimal::from(gross_cents);

        let processing_cents =
            money::round_cents(gross * model.processing.rate)? + model.processing.fixed_cents;

        let mut documentation_cents = money::round_cents(gross * model.documentation.rate)?;
        if let Some(cap) = model.documentation.cap_cents {
            documentation_cents = documentation_cents.min(cap);
        }

        let fees = vec![
            FeeLine {
                label: model.processing.label.clone(),
                amount_cents: processing_cents,
            },
            FeeLine {
                label: model.documentation.label.clone(),
                amount_cents: documentation_cents,
            },
        ];

        let net_cents = gross_cents - processing_cents - documentation_cents;

        Ok(PricingResult {
            gross_cents,
            net_cents,
            fees,
        })
    }
}

impl Default for FeeCalculator {
    fn default() -> Self {
        Self::new()
    }
}
