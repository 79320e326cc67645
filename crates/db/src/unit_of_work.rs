//! Unit of work: one change set, one commit.
//!
//! A unit of work is created per request. Its repositories share a single
//! change set; [`UnitOfWork::complete`] writes every staged change in one
//! transaction, in the order the changes were staged.

use std::sync::{Arc, Mutex};

use once_cell::sync::OnceCell;
use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};
use tracing::{debug, error, warn};

use crate::entities::{amenities, contact_requests, hotel_amenities, room_types};
use crate::repositories::repository::{ChangeSet, lock};
use crate::repositories::{
    CompanyRepository, CouponRepository, HotelRepository, Repository, RoomRepository,
};

/// Aggregates one repository per entity type over a shared change set.
pub struct UnitOfWork {
    db: DatabaseConnection,
    changes: ChangeSet,
    companies: OnceCell<CompanyRepository>,
    hotels: OnceCell<HotelRepository>,
    rooms: OnceCell<RoomRepository>,
    room_types: OnceCell<Repository<room_types::Entity>>,
    amenities: OnceCell<Repository<amenities::Entity>>,
    hotel_amenities: OnceCell<Repository<hotel_amenities::Entity>>,
    coupons: OnceCell<CouponRepository>,
    contact_requests: OnceCell<Repository<contact_requests::Entity>>,
}

impl std::fmt::Debug for UnitOfWork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitOfWork")
            .field("pending_changes", &self.pending_changes())
            .finish_non_exhaustive()
    }
}

impl UnitOfWork {
    /// Creates an empty unit of work.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            changes: Arc::new(Mutex::new(Vec::new())),
            companies: OnceCell::new(),
            hotels: OnceCell::new(),
            rooms: OnceCell::new(),
            room_types: OnceCell::new(),
            amenities: OnceCell::new(),
            hotel_amenities: OnceCell::new(),
            coupons: OnceCell::new(),
            contact_requests: OnceCell::new(),
        }
    }

    fn repository<E>(&self) -> Repository<E>
    where
        E: sea_orm::EntityTrait,
        E::Model: sea_orm::IntoActiveModel<E::ActiveModel> + Send + Sync,
        E::ActiveModel: sea_orm::ActiveModelTrait<Entity = E> + Send + Sync + 'static,
    {
        Repository::new(self.db.clone(), Arc::clone(&self.changes))
    }

    /// Companies.
    pub fn companies(&self) -> &CompanyRepository {
        self.companies
            .get_or_init(|| CompanyRepository::new(self.repository()))
    }

    /// Hotels.
    pub fn hotels(&self) -> &HotelRepository {
        self.hotels
            .get_or_init(|| HotelRepository::new(self.repository()))
    }

    /// Rooms.
    pub fn rooms(&self) -> &RoomRepository {
        self.rooms.get_or_init(|| RoomRepository::new(self.repository()))
    }

    /// Room types.
    pub fn room_types(&self) -> &Repository<room_types::Entity> {
        self.room_types.get_or_init(|| self.repository())
    }

    /// Amenities.
    pub fn amenities(&self) -> &Repository<amenities::Entity> {
        self.amenities.get_or_init(|| self.repository())
    }

    /// Hotel/amenity join rows.
    pub fn hotel_amenities(&self) -> &Repository<hotel_amenities::Entity> {
        self.hotel_amenities.get_or_init(|| self.repository())
    }

    /// Coupons.
    pub fn coupons(&self) -> &CouponRepository {
        self.coupons
            .get_or_init(|| CouponRepository::new(self.repository()))
    }

    /// Contact requests.
    pub fn contact_requests(&self) -> &Repository<contact_requests::Entity> {
        self.contact_requests.get_or_init(|| self.repository())
    }

    /// Number of staged operations.
    pub fn pending_changes(&self) -> usize {
        lock(&self.changes).len()
    }

    /// Returns true if anything is staged.
    pub fn has_changes(&self) -> bool {
        self.pending_changes() > 0
    }

    /// Drops every staged change and returns how many there were.
    pub fn discard(&self) -> usize {
        let dropped = std::mem::take(&mut *lock(&self.changes)).len();
        if dropped > 0 {
            debug!(dropped, "Discarded staged changes");
        }
        dropped
    }

    /// Writes every staged change in one transaction.
    ///
    /// Returns the number of affected rows. On failure the transaction is
    /// rolled back and the staged changes are gone; nothing was written.
    /// With nothing staged no transaction is opened.
    ///
    /// # Errors
    ///
    /// Returns the first database error raised by a change or by the commit.
    pub async fn complete(&self) -> Result<u64, DbErr> {
        let staged = std::mem::take(&mut *lock(&self.changes));
        if staged.is_empty() {
            return Ok(0);
        }

        let operations = staged.len();
        let txn = self.db.begin().await?;
        let mut affected = 0;

        for change in staged {
            let description = change.describe();
            match change.apply(&txn).await {
                Ok(rows) => affected += rows,
                Err(e) => {
                    warn!(change = %description, error = %e, "Staged change failed, rolling back");
                    if let Err(rollback) = txn.rollback().await {
                        error!(error = %rollback, "Rollback failed");
                    }
                    return Err(e);
                }
            }
        }

        txn.commit().await?;
        debug!(operations, affected, "Unit of work completed");
        Ok(affected)
    }
}
