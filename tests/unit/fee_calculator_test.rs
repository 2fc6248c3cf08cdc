// Property-based tests for the fee-inclusive pricing calculator
//
// Validates:
// - The business never nets less than the requested amount
// - Rounding excess stays within a few cents
// - Gross is monotone in the net target
// - The capped and uncapped documentation-fee regimes meet continuously
// - Identical inputs produce identical output

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use fleetforge_checkout::core::AppError;
use fleetforge_checkout::modules::pricing::models::{
    DocumentationFee, FeeModel, ProcessingFee, DOCUMENTATION_FEE_LABEL, PROCESSING_FEE_LABEL,
};
use fleetforge_checkout::modules::pricing::services::FeeCalculator;

fn card_model() -> FeeModel {
    FeeModel::card_default()
}

fn model_from_parts(
    processing_bp: u32,
    fixed_cents: i64,
    documentation_bp: u32,
    cap_cents: Option<i64>,
) -> FeeModel {
    FeeModel {
        processing: ProcessingFee {
            label: PROCESSING_FEE_LABEL.to_string(),
            rate: Decimal::from(processing_bp) / Decimal::from(10_000),
            fixed_cents,
        },
        documentation: DocumentationFee {
            label: DOCUMENTATION_FEE_LABEL.to_string(),
            rate: Decimal::from(documentation_bp) / Decimal::from(10_000),
            cap_cents,
        },
    }
}

proptest! {
    #[test]
    fn test_net_guarantee_canonical_model(net in 0i64..10_000_000i64) {
        let calc = FeeCalculator::new();
        let result = calc.gross_from_net(net, &card_model()).unwrap();

        prop_assert!(result.net_cents >= net, "netted {} for target {}", result.net_cents, net);
        prop_assert!(result.net_cents - net <= 3, "excess {} too large", result.net_cents - net);
    }

    #[test]
    fn test_net_guarantee_arbitrary_models(
        net in 0i64..5_000_000i64,
        processing_bp in 0u32..2_000u32,       // 0% to 20%
        fixed_cents in 0i64..100i64,
        documentation_bp in 0u32..500u32,      // 0% to 5%
        cap_cents in prop::option::of(50i64..10_000i64)
    ) {
        let model = model_from_parts(processing_bp, fixed_cents, documentation_bp, cap_cents);
        let calc = FeeCalculator::new();
        let result = calc.gross_from_net(net, &model).unwrap();

        prop_assert!(result.net_cents >= net);
        prop_assert!(result.net_cents - net <= 5, "excess {} too large", result.net_cents - net);
        prop_assert_eq!(result.net_cents, result.gross_cents - result.total_fees_cents());
    }

    #[test]
    fn test_gross_monotone_in_net(net in 0i64..1_000_000i64, step in 1i64..10_000i64) {
        let calc = FeeCalculator::new();
        let lower = calc.gross_from_net(net, &card_model()).unwrap();
        let higher = calc.gross_from_net(net + step, &card_model()).unwrap();

        prop_assert!(lower.gross_cents <= higher.gross_cents);
    }

    #[test]
    fn test_idempotence(net in 0i64..10_000_000i64) {
        let calc = FeeCalculator::new();
        let first = calc.gross_from_net(net, &card_model()).unwrap();
        let second = calc.gross_from_net(net, &card_model()).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_breakdown_reconstructs_net(gross in 0i64..10_000_000i64) {
        let calc = FeeCalculator::new();
        let result = calc.breakdown_for_gross(gross, &card_model()).unwrap();

        prop_assert_eq!(result.gross_cents, gross);
        prop_assert_eq!(result.net_cents, gross - result.total_fees_cents());
    }
}

#[test]
fn test_worked_example_uncapped() {
    // net $100.00 with 2.9% + 30c processing and uncapped 0.4% documentation
    let model = model_from_parts(290, 30, 40, None);
    let calc = FeeCalculator::new();
    let result = calc.gross_from_net(10_000, &model).unwrap();

    // gross = ceil((10000 + 30) / 0.967) = 10373
    assert_eq!(result.gross_cents, 10_373);
    assert_eq!(result.fees[0].amount_cents, 331);
    assert_eq!(result.fees[1].amount_cents, 41);
    assert_eq!(result.net_cents, 10_001);
}

#[test]
fn test_cap_boundary_continuity() {
    // At gross = cap / d = 200 / 0.004 = 50000 both regimes price the
    // documentation fee at exactly the cap
    let capped = card_model();
    let mut uncapped = card_model();
    uncapped.documentation.cap_cents = None;

    let calc = FeeCalculator::new();
    let at_boundary_capped = calc.breakdown_for_gross(50_000, &capped).unwrap();
    let at_boundary_uncapped = calc.breakdown_for_gross(50_000, &uncapped).unwrap();

    assert_eq!(at_boundary_capped.fees[1].amount_cents, 200);
    assert_eq!(at_boundary_uncapped.fees[1].amount_cents, 200);
    assert_eq!(at_boundary_capped.net_cents, at_boundary_uncapped.net_cents);
}

#[test]
fn test_capped_regime_pins_documentation_fee() {
    let calc = FeeCalculator::new();
    let result = calc.gross_from_net(100_000, &card_model()).unwrap();

    // ceil((100000 + 30 + 200) / 0.971) = 103224
    assert_eq!(result.gross_cents, 103_224);
    assert_eq!(result.fees[1].label, DOCUMENTATION_FEE_LABEL);
    assert_eq!(result.fees[1].amount_cents, 200);
    assert!(result.net_cents >= 100_000);
}

#[test]
fn test_zero_net_and_zero_gross() {
    let calc = FeeCalculator::new();

    let from_net = calc.gross_from_net(0, &card_model()).unwrap();
    assert_eq!(from_net.gross_cents, 0);
    assert_eq!(from_net.net_cents, 0);
    assert!(from_net.fees.iter().all(|f| f.amount_cents == 0));

    let from_gross = calc.breakdown_for_gross(0, &card_model()).unwrap();
    assert_eq!(from_gross, from_net);
}

#[test]
fn test_negative_net_fails_with_invalid_amount() {
    let calc = FeeCalculator::new();
    let err = calc.gross_from_net(-5, &card_model()).unwrap_err();
    assert!(matches!(err, AppError::InvalidAmount(_)));
}

#[test]
fn test_rates_summing_to_one_fail_with_invalid_fee_model() {
    let mut model = card_model();
    model.processing.rate = dec!(0.5);
    model.documentation.rate = dec!(0.5);

    let calc = FeeCalculator::new();
    let err = calc.gross_from_net(10_000, &model).unwrap_err();
    assert!(matches!(err, AppError::InvalidFeeModel(_)));

    let err = calc.breakdown_for_gross(10_000, &model).unwrap_err();
    assert!(matches!(err, AppError::InvalidFeeModel(_)));
}

#[test]
fn test_fee_labels_follow_configuration() {
    let calc = FeeCalculator::new();
    let result = calc.gross_from_net(10_000, &card_model()).unwrap();

    assert_eq!(result.fees[0].label, PROCESSING_FEE_LABEL);
    assert_eq!(result.fees[1].label, DOCUMENTATION_FEE_LABEL);
}
