//! Validation utilities for the Inventory Management Platform

/// Validate password strength.
///
/// Every rule is checked independently so the caller can show the full list
/// of problems at once, not just the first one.
pub fn validate_password_strength(password: &str) -> Result<(), Vec<&'static str>> {
    let mut failures = Vec::new();

    if password.len() < 8 {
        failures.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        failures.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        failures.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        failures.push("Password must contain at least one digit");
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures)
    }
}

/// Validate a phone number.
///
/// Accepts digits, spaces, hyphens, parentheses and an optional leading plus
/// sign. Anything else is rejected.
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    let rest = phone.strip_prefix('+').unwrap_or(phone);
    if rest.is_empty() {
        return Err("Phone number cannot be empty");
    }
    if !rest
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-' || c == '(' || c == ')')
    {
        return Err("Invalid phone number format");
    }
    Ok(())
}

/// Validate an EAN-13 barcode: exactly 13 ASCII digits.
pub fn validate_ean13(ean13: &str) -> Result<(), &'static str> {
    if ean13.len() != 13 || !ean13.chars().all(|c| c.is_ascii_digit()) {
        return Err("EAN-13 barcode must consist of exactly 13 digits");
    }
    Ok(())
}

/// Validate a SKU (non-empty, at most 50 characters).
pub fn validate_sku(sku: &str) -> Result<(), &'static str> {
    if sku.trim().is_empty() {
        return Err("SKU cannot be empty");
    }
    if sku.len() > 50 {
        return Err("SKU must be at most 50 characters");
    }
    Ok(())
}

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}
