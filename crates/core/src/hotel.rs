//! Hotels, room types, room batches and amenity sets.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

/// Largest number of rooms created by one batch.
pub const MAX_ROOMS_PER_BATCH: u32 = 100;

/// Category of a room type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    /// One bed, one guest.
    Single,
    /// One double bed.
    Double,
    /// Two single beds.
    Twin,
    /// Suite.
    Suite,
    /// Deluxe room.
    Deluxe,
    /// Family room.
    Family,
}

impl RoomKind {
    /// Every room kind.
    pub const ALL: [Self; 6] = [
        Self::Single,
        Self::Double,
        Self::Twin,
        Self::Suite,
        Self::Deluxe,
        Self::Family,
    ];

    /// Returns the stored name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Twin => "twin",
            Self::Suite => "suite",
            Self::Deluxe => "deluxe",
            Self::Family => "family",
        }
    }
}

impl std::fmt::Display for RoomKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a room kind name is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown room type: {0}")]
pub struct UnknownRoomKind(pub String);

impl FromStr for RoomKind {
    type Err = UnknownRoomKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownRoomKind(s.to_string()))
    }
}

/// Room listing filter: every room, or rooms of one kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoomTypeFilter {
    /// No filtering.
    #[default]
    All,
    /// Only rooms whose type has this kind.
    Kind(RoomKind),
}

impl RoomTypeFilter {
    /// Returns the kind to filter on, if any.
    #[must_use]
    pub const fn kind(&self) -> Option<RoomKind> {
        match self {
            Self::All => None,
            Self::Kind(kind) => Some(*kind),
        }
    }
}

impl FromStr for RoomTypeFilter {
    type Err = UnknownRoomKind;

    /// `"All"` (any case) or empty means no filter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Kind)
        }
    }
}

/// A room type to create along with a hotel, or on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RoomTypeForm {
    /// Room category.
    pub kind: RoomKind,
    /// Nightly price in cents.
    #[validate(range(min = 0, message = "price cannot be negative"))]
    pub price_per_night_cents: i64,
    /// Guests per room.
    #[validate(range(min = 1, max = 20, message = "capacity must be between 1 and 20"))]
    pub capacity: i32,
}

/// Input for creating a hotel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct HotelForm {
    /// Owning company, if any.
    pub company_id: Option<Uuid>,
    /// Hotel name.
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    /// City.
    #[validate(length(min = 1, max = 100, message = "city is required"))]
    pub city: String,
    /// Street address.
    #[validate(length(min = 1, max = 200, message = "address is required"))]
    pub address: String,
    /// Free-text description.
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    /// Star rating.
    #[validate(range(min = 1, max = 5, message = "stars must be between 1 and 5"))]
    pub stars: i16,
    /// Room types created in the same commit.
    #[serde(default)]
    #[validate(nested)]
    pub room_types: Vec<RoomTypeForm>,
}

/// Input for creating a batch of identical rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RoomBatchForm {
    /// Hotel the rooms belong to.
    pub hotel_id: Uuid,
    /// Room type of every created room.
    pub room_type_id: Uuid,
    /// Number of rooms.
    #[validate(range(
        min = 1,
        max = MAX_ROOMS_PER_BATCH,
        message = "count must be between 1 and 100"
    ))]
    pub count: u32,
}

/// Input for creating an amenity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AmenityForm {
    /// Amenity name, unique.
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    /// Icon name shown next to the amenity.
    #[validate(length(max = 100))]
    pub icon: Option<String>,
}

/// Input for replacing a hotel's amenity set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignAmenitiesForm {
    /// Target hotel.
    pub hotel_id: Uuid,
    /// The complete new set. Empty clears every amenity.
    #[serde(default)]
    pub amenity_ids: Vec<Uuid>,
}

/// Removes duplicate amenity IDs, keeping the first occurrence of each.
#[must_use]
pub fn normalize_amenity_ids(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Message shown after a room's availability changed.
#[must_use]
pub const fn availability_message(is_available: bool) -> &'static str {
    if is_available {
        "Room is now available."
    } else {
        "Room is now unavailable."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("All", RoomTypeFilter::All)]
    #[case("all", RoomTypeFilter::All)]
    #[case("", RoomTypeFilter::All)]
    #[case("Deluxe", RoomTypeFilter::Kind(RoomKind::Deluxe))]
    #[case(" suite ", RoomTypeFilter::Kind(RoomKind::Suite))]
    fn test_parse_filter(#[case] input: &str, #[case] expected: RoomTypeFilter) {
        assert_eq!(input.parse::<RoomTypeFilter>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_filter() {
        assert_eq!(
            "Penthouse".parse::<RoomTypeFilter>(),
            Err(UnknownRoomKind("Penthouse".into()))
        );
    }

    #[test]
    fn test_filter_kind() {
        assert_eq!(RoomTypeFilter::All.kind(), None);
        assert_eq!(
            RoomTypeFilter::Kind(RoomKind::Twin).kind(),
            Some(RoomKind::Twin)
        );
    }

    #[test]
    fn test_room_kind_round_trips_through_name() {
        for kind in RoomKind::ALL {
            assert_eq!(kind.to_string().parse::<RoomKind>().unwrap(), kind);
        }
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(100, true)]
    #[case(101, false)]
    fn test_room_batch_count(#[case] count: u32, #[case] valid: bool) {
        let form = RoomBatchForm {
            hotel_id: Uuid::new_v4(),
            room_type_id: Uuid::new_v4(),
            count,
        };
        assert_eq!(form.validate().is_ok(), valid);
        assert_eq!(valid, (1..=MAX_ROOMS_PER_BATCH).contains(&count));
    }

    fn lotus() -> HotelForm {
        HotelForm {
            company_id: None,
            name: "Lotus".into(),
            city: "Cairo".into(),
            address: "12 Nile Corniche".into(),
            description: None,
            stars: 4,
            room_types: vec![RoomTypeForm {
                kind: RoomKind::Deluxe,
                price_per_night_cents: 12_500,
                capacity: 2,
            }],
        }
    }

    #[test]
    fn test_hotel_form_valid() {
        assert!(lotus().validate().is_ok());
    }

    #[test]
    fn test_hotel_form_checks_nested_room_types() {
        let mut form = lotus();
        form.room_types[0].capacity = 0;
        form.stars = 6;

        let errors = form.validate().unwrap_err();
        let fields = errors.errors();
        assert!(fields.contains_key("stars"));
        assert!(fields.contains_key("room_types"));
    }

    #[test]
    fn test_normalize_keeps_first_occurrence() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(normalize_amenity_ids(&[a, b, a, b, a]), vec![a, b]);
        assert!(normalize_amenity_ids(&[]).is_empty());
    }

    #[test]
    fn test_availability_message() {
        assert_eq!(availability_message(true), "Room is now available.");
        assert_eq!(availability_message(false), "Room is now unavailable.");
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn ids() -> impl Strategy<Value = Vec<Uuid>> {
        // A small pool so duplicates are common.
        prop::collection::vec(0u128..8, 0..24)
            .prop_map(|raw| raw.into_iter().map(Uuid::from_u128).collect())
    }

    proptest! {
        #[test]
        fn prop_normalized_ids_are_the_same_set(raw in ids()) {
            let normalized = normalize_amenity_ids(&raw);

            let expected: HashSet<Uuid> = raw.iter().copied().collect();
            let actual: HashSet<Uuid> = normalized.iter().copied().collect();
            prop_assert_eq!(actual, expected);
            prop_assert_eq!(normalized.len(), normalized.iter().collect::<HashSet<_>>().len());
        }

        #[test]
        fn prop_normalize_is_idempotent(raw in ids()) {
            let once = normalize_amenity_ids(&raw);
            prop_assert_eq!(normalize_amenity_ids(&once), once);
        }
    }
}
