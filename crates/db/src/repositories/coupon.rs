//! Coupon repository.

use std::ops::Deref;

use chrono::{DateTime, Utc};
use hotelres_core::coupon::normalize_code;
use sea_orm::{ColumnTrait, Condition, DbErr};

use super::repository::Repository;
use crate::entities::coupons;

/// Coupon repository.
#[derive(Debug, Clone)]
pub struct CouponRepository {
    inner: Repository<coupons::Entity>,
}

impl Deref for CouponRepository {
    type Target = Repository<coupons::Entity>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl CouponRepository {
    pub(crate) fn new(inner: Repository<coupons::Entity>) -> Self {
        Self { inner }
    }

    /// Finds a coupon by code, ignoring case and surrounding spaces.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<coupons::Model>, DbErr> {
        self.get_one(coupons::Column::Code.eq(normalize_code(code)))
            .await
    }

    /// Finds a coupon that can be redeemed at `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_active_by_code(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<coupons::Model>, DbErr> {
        self.get_one(
            Condition::all()
                .add(coupons::Column::Code.eq(normalize_code(code)))
                .add(coupons::Column::IsActive.eq(true))
                .add(coupons::Column::ValidUntil.gte(now.fixed_offset())),
        )
        .await
    }
}
