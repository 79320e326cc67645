//! Coupons.

use chrono::{DateTime, Utc};
use hotelres_core::audit::{AdminAction, AdminActor, log_admin_action};
use hotelres_core::coupon::{CouponForm, normalize_code};
use uuid::Uuid;
use validator::Validate;

use super::ServiceError;
use crate::UnitOfWork;
use crate::entities::coupons;

/// Coupon service.
pub struct CouponService;

impl CouponService {
    /// Creates an active coupon. The code is stored trimmed and upper-case.
    ///
    /// A duplicate code surfaces as a unique violation when the change is
    /// committed.
    ///
    /// # Errors
    ///
    /// Returns a validation error or a database error.
    pub async fn create_coupon(
        uow: &UnitOfWork,
        actor: &AdminActor,
        form: CouponForm,
    ) -> Result<coupons::Model, ServiceError> {
        form.validate()?;

        let now = Utc::now().fixed_offset();
        let coupon = coupons::Model {
            id: Uuid::now_v7(),
            code: normalize_code(&form.code),
            discount_percent: form.discount_percent,
            valid_until: form.valid_until.fixed_offset(),
            is_active: true,
            created_at: now,
        };
        uow.coupons().create(coupon.clone());
        uow.complete().await?;

        log_admin_action(actor, AdminAction::Create, &format!("coupon: {}", coupon.code));
        Ok(coupon)
    }

    /// Lists every coupon.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_coupons(uow: &UnitOfWork) -> Result<Vec<coupons::Model>, ServiceError> {
        Ok(uow.coupons().get(None).await?)
    }

    /// Looks up a coupon redeemable at `now`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` for an unknown, inactive or expired
    /// code.
    pub async fn find_active_by_code(
        uow: &UnitOfWork,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<coupons::Model, ServiceError> {
        uow.coupons()
            .find_active_by_code(code, now)
            .await?
            .ok_or(ServiceError::NotFound("coupon"))
    }
}
