//! Pricing tests
//!
//! Tests for net/gross price derivation including:
//! - Half-up rounding to two decimal places
//! - Gross from net and net from gross conversions
//! - Round-trip drift bounds

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::pricing::{gross_from_net, net_from_gross, round_price};
use std::str::FromStr;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Standard 27% VAT on a round net price
    #[test]
    fn test_gross_from_net_standard_vat() {
        assert_eq!(gross_from_net(dec("100.00"), dec("27.00")), dec("127.00"));
        assert_eq!(gross_from_net(dec("1000"), dec("27")), dec("1270.00"));
    }

    /// Derive net back from a gross price
    #[test]
    fn test_net_from_gross_standard_vat() {
        assert_eq!(net_from_gross(dec("127.00"), dec("27.00")), dec("100.00"));
        assert_eq!(net_from_gross(dec("1270"), dec("27")), dec("1000.00"));
    }

    /// Zero VAT leaves the price unchanged apart from scale
    #[test]
    fn test_zero_vat() {
        assert_eq!(gross_from_net(dec("99.99"), Decimal::ZERO), dec("99.99"));
        assert_eq!(net_from_gross(dec("99.99"), Decimal::ZERO), dec("99.99"));
    }

    /// Midpoints round away from zero (half-up for prices)
    #[test]
    fn test_round_price_half_up() {
        assert_eq!(round_price(dec("1.005")), dec("1.01"));
        assert_eq!(round_price(dec("1.004")), dec("1.00"));
        assert_eq!(round_price(dec("2.675")), dec("2.68"));
        assert_eq!(round_price(dec("0.125")), dec("0.13"));
    }

    /// Rounding happens once, on the final result
    #[test]
    fn test_gross_rounds_final_result() {
        // 10.99 * 1.27 = 13.9573 -> 13.96
        assert_eq!(gross_from_net(dec("10.99"), dec("27.00")), dec("13.96"));
        // 0.33 * 1.27 = 0.4191 -> 0.42
        assert_eq!(gross_from_net(dec("0.33"), dec("27.00")), dec("0.42"));
    }

    /// Net from gross with a repeating quotient
    #[test]
    fn test_net_from_gross_repeating() {
        // 100 / 1.27 = 78.7401... -> 78.74
        assert_eq!(net_from_gross(dec("100.00"), dec("27.00")), dec("78.74"));
    }

    /// Zero price stays zero under any rate
    #[test]
    fn test_zero_price() {
        assert_eq!(gross_from_net(Decimal::ZERO, dec("27.00")), dec("0.00"));
        assert_eq!(net_from_gross(Decimal::ZERO, dec("27.00")), dec("0.00"));
    }

    /// Reduced VAT rates used for some product groups
    #[test]
    fn test_reduced_vat_rates() {
        assert_eq!(gross_from_net(dec("100.00"), dec("5.00")), dec("105.00"));
        assert_eq!(gross_from_net(dec("100.00"), dec("18.00")), dec("118.00"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating net prices (0.01 to 100000.00)
    fn price_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=10_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    /// Strategy for generating VAT rates (0.00 to 50.00)
    fn vat_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=5000i64).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Gross price is always >= net price for non-negative VAT
        #[test]
        fn prop_gross_not_below_net(
            net in price_strategy(),
            vat in vat_strategy()
        ) {
            let gross = gross_from_net(net, vat);
            prop_assert!(gross >= round_price(net));
        }

        /// Both conversions always land on exactly two decimal places
        #[test]
        fn prop_two_decimal_places(
            price in price_strategy(),
            vat in vat_strategy()
        ) {
            prop_assert!(gross_from_net(price, vat).scale() <= 2);
            prop_assert!(net_from_gross(price, vat).scale() <= 2);
        }

        /// Round-tripping net -> gross -> net drifts at most one cent
        #[test]
        fn prop_round_trip_drift_bounded(
            net in price_strategy(),
            vat in vat_strategy()
        ) {
            let gross = gross_from_net(net, vat);
            let back = net_from_gross(gross, vat);
            let drift = (back - net).abs();
            prop_assert!(drift <= dec("0.01"));
        }

        /// Conversion is monotonic: a higher net never yields a lower gross
        #[test]
        fn prop_gross_monotonic(
            net in price_strategy(),
            extra in price_strategy(),
            vat in vat_strategy()
        ) {
            let lower = gross_from_net(net, vat);
            let higher = gross_from_net(net + extra, vat);
            prop_assert!(higher >= lower);
        }

        /// Rounding is idempotent
        #[test]
        fn prop_round_idempotent(price in price_strategy()) {
            let once = round_price(price);
            prop_assert_eq!(round_price(once), once);
        }
    }
}
