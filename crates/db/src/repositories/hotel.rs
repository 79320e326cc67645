//! Hotel repository.

use std::ops::Deref;

use hotelres_shared::types::{PageRequest, PageResponse};
use sea_orm::sea_query::IntoCondition;
use sea_orm::{ColumnTrait, Condition, DbErr};
use uuid::Uuid;

use super::repository::Repository;
use crate::entities::{amenities, hotels};

/// A hotel with its amenities, sorted by name.
pub type HotelWithAmenities = (hotels::Model, Vec<amenities::Model>);

/// Hotel repository.
#[derive(Debug, Clone)]
pub struct HotelRepository {
    inner: Repository<hotels::Entity>,
}

impl Deref for HotelRepository {
    type Target = Repository<hotels::Entity>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl HotelRepository {
    pub(crate) fn new(inner: Repository<hotels::Entity>) -> Self {
        Self { inner }
    }

    /// Fetches a hotel joined with its amenities.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn hotels_with_amenities(
        &self,
        hotel_id: Uuid,
    ) -> Result<Option<HotelWithAmenities>, DbErr> {
        let found = self
            .get_with_many::<amenities::Entity>(Some(hotels::Column::Id.eq(hotel_id).into_condition()))
            .await?
            .into_iter()
            .next();

        Ok(found.map(|(hotel, mut amenities)| {
            amenities.sort_by(|a, b| a.name.cmp(&b.name));
            (hotel, amenities)
        }))
    }

    /// Pages through hotels, optionally only those in `city`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn browse(
        &self,
        city: Option<&str>,
        page: PageRequest,
    ) -> Result<PageResponse<hotels::Model>, DbErr> {
        let filter = city.map(|city| Condition::all().add(hotels::Column::City.eq(city)));
        self.get_page(filter, page).await
    }
}
