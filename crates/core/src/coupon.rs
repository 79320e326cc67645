//! Coupon rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Input for creating a coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CouponForm {
    /// Redemption code. Stored upper-case.
    #[validate(custom(function = "validate_code"))]
    pub code: String,
    /// Discount in whole percent.
    #[validate(range(min = 1, max = 100, message = "discount must be between 1 and 100"))]
    pub discount_percent: i16,
    /// Last moment the coupon can be redeemed.
    pub valid_until: DateTime<Utc>,
}

/// Trims and upper-cases a coupon code.
#[must_use]
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

fn validate_code(code: &str) -> Result<(), ValidationError> {
    let code = code.trim();
    if (3..=32).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        Ok(())
    } else {
        Err(ValidationError::new("code")
            .with_message("code must be 3-32 letters, digits or dashes".into()))
    }
}

/// Returns true if a coupon can be redeemed at `now`.
#[must_use]
pub fn is_redeemable(is_active: bool, valid_until: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    is_active && now <= valid_until
}

/// Applies a percentage discount to a price in cents, rounding down.
#[must_use]
pub fn apply_discount(price_cents: i64, discount_percent: i16) -> i64 {
    let percent = i64::from(discount_percent.clamp(0, 100));
    price_cents * (100 - percent) / 100
}
