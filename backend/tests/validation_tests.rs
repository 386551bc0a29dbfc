//! Input validation tests
//!
//! Tests for user-facing validators including:
//! - Password strength with independent rule reporting
//! - Phone number format
//! - EAN-13 barcode and SKU format

use proptest::prelude::*;
use shared::validation::{
    validate_ean13, validate_password_strength, validate_phone, validate_sku,
};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// A password satisfying all four rules passes
    #[test]
    fn test_password_accepts_strong() {
        assert!(validate_password_strength("Abcdefg1").is_ok());
        assert!(validate_password_strength("CorrectHorse42").is_ok());
    }

    /// Each rule produces its own message
    #[test]
    fn test_password_single_failure_messages() {
        assert_eq!(
            validate_password_strength("abc12345").unwrap_err(),
            vec!["Password must contain at least one uppercase letter"]
        );
        assert_eq!(
            validate_password_strength("ABC12345").unwrap_err(),
            vec!["Password must contain at least one lowercase letter"]
        );
        assert_eq!(
            validate_password_strength("Abcdefgh").unwrap_err(),
            vec!["Password must contain at least one digit"]
        );
        assert_eq!(
            validate_password_strength("short1A").unwrap_err(),
            vec!["Password must be at least 8 characters long"]
        );
    }

    /// All failing rules are reported together, not just the first
    #[test]
    fn test_password_collects_all_failures() {
        let failures = validate_password_strength("").unwrap_err();
        assert_eq!(failures.len(), 4);

        let failures = validate_password_strength("abcdefgh").unwrap_err();
        assert_eq!(failures.len(), 2); // no uppercase, no digit
    }

    /// Accepted phone number shapes
    #[test]
    fn test_phone_accepts_common_formats() {
        assert!(validate_phone("+36 30 123 4567").is_ok());
        assert!(validate_phone("06-30-123-4567").is_ok());
        assert!(validate_phone("(1) 234 5678").is_ok());
        assert!(validate_phone("123456").is_ok());
    }

    /// Rejected phone numbers
    #[test]
    fn test_phone_rejects_bad_input() {
        assert!(validate_phone("").is_err());
        assert!(validate_phone("+").is_err());
        assert!(validate_phone("call me").is_err());
        assert!(validate_phone("12+34").is_err());
    }

    /// EAN-13 is exactly 13 digits, nothing more
    #[test]
    fn test_ean13_length_and_digits() {
        assert!(validate_ean13("5901234123457").is_ok());
        assert!(validate_ean13("0000000000000").is_ok());
        assert!(validate_ean13("590123412345").is_err()); // 12 digits
        assert!(validate_ean13("59012341234578").is_err()); // 14 digits
        assert!(validate_ean13("59012341234X7").is_err()); // letter
        assert!(validate_ean13("").is_err());
    }

    /// SKU must be non-empty and bounded
    #[test]
    fn test_sku_bounds() {
        assert!(validate_sku("DELL-INSP-15-001").is_ok());
        assert!(validate_sku("").is_err());
        assert!(validate_sku("  ").is_err());
        assert!(validate_sku(&"A".repeat(50)).is_ok());
        assert!(validate_sku(&"A".repeat(51)).is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Any 13-digit string passes the EAN-13 check
        #[test]
        fn prop_ean13_any_13_digits(digits in "[0-9]{13}") {
            prop_assert!(validate_ean13(&digits).is_ok());
        }

        /// Any other length fails
        #[test]
        fn prop_ean13_wrong_length_fails(digits in "[0-9]{0,12}") {
            prop_assert!(validate_ean13(&digits).is_err());
        }

        /// A password built to satisfy all rules always passes
        #[test]
        fn prop_password_well_formed_passes(
            lower in "[a-z]{3,10}",
            upper in "[A-Z]{3,10}",
            digits in "[0-9]{2,5}"
        ) {
            let password = format!("{upper}{lower}{digits}");
            prop_assert!(validate_password_strength(&password).is_ok());
        }

        /// Passwords without digits always fail, and the digit rule is among
        /// the reported failures
        #[test]
        fn prop_password_without_digit_fails(password in "[a-zA-Z]{8,20}") {
            let failures = validate_password_strength(&password).unwrap_err();
            prop_assert!(failures
                .iter()
                .any(|m| m.contains("digit")));
        }

        /// Phone numbers made only of allowed characters pass
        #[test]
        fn prop_phone_allowed_charset(body in "[0-9][0-9 ()-]{0,14}") {
            prop_assert!(validate_phone(&body).is_ok());
            let with_plus = format!("+{}", body);
            prop_assert!(validate_phone(&with_plus).is_ok());
        }
    }
}
