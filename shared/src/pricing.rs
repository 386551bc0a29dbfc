//! Price arithmetic for catalog products
//!
//! All currency math uses exact decimals. Rounding is half-up to two places
//! everywhere a price is derived, so repeated edits never drift.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round a monetary amount half-up to two decimal places.
pub fn round_price(amount: Decimal) -> Decimal {
    // MidpointAwayFromZero is half-up for the non-negative amounts this
    // domain allows.
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// VAT multiplier for a percentage rate: 1 + rate/100.
fn vat_multiplier(vat_rate: Decimal) -> Decimal {
    Decimal::ONE + vat_rate / Decimal::ONE_HUNDRED
}

/// Gross (brutto) price from a net price and VAT rate.
pub fn gross_from_net(net_price: Decimal, vat_rate: Decimal) -> Decimal {
    round_price(net_price * vat_multiplier(vat_rate))
}

/// Net price from a gross (brutto) price and VAT rate.
pub fn net_from_gross(gross_price: Decimal, vat_rate: Decimal) -> Decimal {
    round_price(gross_price / vat_multiplier(vat_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_gross_from_net_standard_rate() {
        assert_eq!(gross_from_net(dec("100.00"), dec("27.00")), dec("127.00"));
        assert_eq!(gross_from_net(dec("1000.00"), dec("5.00")), dec("1050.00"));
    }

    #[test]
    fn test_gross_from_net_rounds_half_up() {
        // 10.55 * 1.27 = 13.3985 -> 13.40
        assert_eq!(gross_from_net(dec("10.55"), dec("27.00")), dec("13.40"));
        // 0.05 * 1.05 = 0.0525 -> 0.05 (half-up on the third place)
        assert_eq!(gross_from_net(dec("0.05"), dec("5.00")), dec("0.05"));
    }

    #[test]
    fn test_zero_vat_leaves_net_equal_gross() {
        assert_eq!(gross_from_net(dec("42.42"), Decimal::ZERO), dec("42.42"));
        assert_eq!(net_from_gross(dec("42.42"), Decimal::ZERO), dec("42.42"));
    }

    #[test]
    fn test_net_from_gross() {
        assert_eq!(net_from_gross(dec("127.00"), dec("27.00")), dec("100.00"));
        assert_eq!(net_from_gross(dec("1270.00"), dec("27.00")), dec("1000.00"));
    }

    #[test]
    fn test_round_trip_drift_bounded() {
        let net = dec("33.33");
        let vat = dec("27.00");
        let back = net_from_gross(gross_from_net(net, vat), vat);
        assert!((back - net).abs() <= dec("0.01"));
    }
}
