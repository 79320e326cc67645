//! Integration tests for the generic repository and the domain repositories.

mod common;

use chrono::{Duration, Utc};
use common::{amenity, company, coupon, hotel, room, room_type, seed_amenities, seed_hotel, setup};
use hotelres_core::hotel::{RoomKind, RoomTypeFilter};
use hotelres_db::UnitOfWork;
use hotelres_db::entities::sea_orm_active_enums::RoomTypeKind;
use hotelres_db::entities::{hotel_amenities, hotels, rooms};
use hotelres_shared::types::PageRequest;
use sea_orm::sea_query::IntoCondition;
use sea_orm::{ColumnTrait, Condition, DbErr};
use uuid::Uuid;

#[tokio::test]
async fn test_get_returns_committed_rows_in_key_order() {
    let db = setup().await;
    let uow = UnitOfWork::new(db.clone());

    let first = hotel("Lotus", "Luxor");
    let second = hotel("Papyrus", "Aswan");
    uow.hotels().add_range([first.clone(), second.clone()]);
    uow.complete().await.expect("Failed to commit");

    let all = uow.hotels().get(None).await.expect("Failed to list hotels");
    assert_eq!(all, vec![first.clone(), second]);

    let found = uow
        .hotels()
        .find_by_id(first.id)
        .await
        .expect("Failed to find hotel")
        .expect("Hotel should exist");
    assert_eq!(found, first);
}

#[tokio::test]
async fn test_get_with_filter() {
    let db = setup().await;
    seed_hotel(&db, "Lotus", "Luxor").await;
    let aswan = seed_hotel(&db, "Papyrus", "Aswan").await;

    let uow = UnitOfWork::new(db);
    let found = uow
        .hotels()
        .get(Some(hotels::Column::City.eq("Aswan").into_condition()))
        .await
        .expect("Failed to filter hotels");

    assert_eq!(found, vec![aswan]);
}

#[tokio::test]
async fn test_get_one_and_get_single() {
    let db = setup().await;
    let first = seed_hotel(&db, "Lotus", "Luxor").await;
    seed_hotel(&db, "Karnak", "Luxor").await;
    let aswan = seed_hotel(&db, "Papyrus", "Aswan").await;
    let uow = UnitOfWork::new(db);

    let one = uow
        .hotels()
        .get_one(hotels::Column::City.eq("Luxor"))
        .await
        .expect("Failed to query");
    assert_eq!(one, Some(first));

    let single = uow
        .hotels()
        .get_single(hotels::Column::City.eq("Aswan"))
        .await
        .expect("Failed to query");
    assert_eq!(single, Some(aswan));

    let ambiguous = uow
        .hotels()
        .get_single(hotels::Column::City.eq("Luxor"))
        .await;
    assert!(matches!(ambiguous, Err(DbErr::Custom(_))));

    let missing = uow
        .hotels()
        .get_single(hotels::Column::City.eq("Cairo"))
        .await
        .expect("Failed to query");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_get_including_loads_parent() {
    let db = setup().await;
    let lotus = seed_hotel(&db, "Lotus", "Luxor").await;

    let uow = UnitOfWork::new(db);
    let deluxe = room_type(lotus.id, RoomTypeKind::Deluxe);
    uow.room_types().create(deluxe.clone());
    uow.rooms().create(room(lotus.id, deluxe.id));
    uow.complete().await.expect("Failed to commit");

    let rows = uow
        .rooms()
        .get_including::<hotels::Entity>(None)
        .await
        .expect("Failed to load rooms");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].1.as_ref().map(|h| h.id), Some(lotus.id));
}

#[tokio::test]
async fn test_hotels_with_amenities_sorted_by_name() {
    let db = setup().await;
    let lotus = seed_hotel(&db, "Lotus", "Luxor").await;
    let bare = seed_hotel(&db, "Bare", "Luxor").await;
    let amenities = seed_amenities(&db, &["Wifi", "Pool", "Spa"]).await;

    let uow = UnitOfWork::new(db);
    uow.hotel_amenities()
        .add_range(amenities.iter().map(|a| hotel_amenities::Model {
            hotel_id: lotus.id,
            amenity_id: a.id,
        }));
    uow.complete().await.expect("Failed to commit");

    let (hotel, found) = uow
        .hotels()
        .hotels_with_amenities(lotus.id)
        .await
        .expect("Failed to load")
        .expect("Hotel should exist");
    assert_eq!(hotel.id, lotus.id);
    let names: Vec<_> = found.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["Pool", "Spa", "Wifi"]);

    let (_, none) = uow
        .hotels()
        .hotels_with_amenities(bare.id)
        .await
        .expect("Failed to load")
        .expect("Hotel should exist");
    assert!(none.is_empty());

    let missing = uow
        .hotels()
        .hotels_with_amenities(Uuid::now_v7())
        .await
        .expect("Failed to load");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_browse_paginates_by_city() {
    let db = setup().await;
    for n in 0..5 {
        seed_hotel(&db, &format!("Luxor {n}"), "Luxor").await;
    }
    seed_hotel(&db, "Papyrus", "Aswan").await;

    let uow = UnitOfWork::new(db);
    let page = uow
        .hotels()
        .browse(Some("Luxor"), PageRequest::new(2, 2))
        .await
        .expect("Failed to browse");

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.meta.total, 5);
    assert_eq!(page.meta.total_pages, 3);
    assert!(page.data.iter().all(|h| h.city == "Luxor"));

    let everything = uow
        .hotels()
        .browse(None, PageRequest::new(1, 100))
        .await
        .expect("Failed to browse");
    assert_eq!(everything.meta.total, 6);
}

#[tokio::test]
async fn test_count_with_filter() {
    let db = setup().await;
    seed_amenities(&db, &["Wifi", "Pool"]).await;
    let uow = UnitOfWork::new(db);

    assert_eq!(uow.amenities().count(None).await.expect("count"), 2);
    let filtered = uow
        .amenities()
        .count(Some(Condition::all().add(hotelres_db::entities::amenities::Column::Name.eq("Pool"))))
        .await
        .expect("count");
    assert_eq!(filtered, 1);
}

#[tokio::test]
async fn test_update_and_delete() {
    let db = setup().await;
    let lotus = seed_hotel(&db, "Lotus", "Luxor").await;
    let uow = UnitOfWork::new(db);

    let renamed = hotels::Model {
        name: "Lotus Palace".into(),
        stars: 5,
        ..lotus.clone()
    };
    uow.hotels().update(renamed.clone());
    assert_eq!(uow.complete().await.expect("Failed to update"), 1);
    let stored = uow.hotels().find_by_id(lotus.id).await.expect("find");
    assert_eq!(stored, Some(renamed.clone()));

    uow.hotels().delete(renamed);
    assert_eq!(uow.complete().await.expect("Failed to delete"), 1);
    assert!(uow.hotels().find_by_id(lotus.id).await.expect("find").is_none());
}

#[tokio::test]
async fn test_rooms_with_details_filters_by_kind() {
    let db = setup().await;
    let lotus = seed_hotel(&db, "Lotus", "Luxor").await;
    let other = seed_hotel(&db, "Other", "Luxor").await;

    let uow = UnitOfWork::new(db);
    let single = room_type(lotus.id, RoomTypeKind::Single);
    let deluxe = room_type(lotus.id, RoomTypeKind::Deluxe);
    let foreign = room_type(other.id, RoomTypeKind::Deluxe);
    uow.room_types()
        .add_range([single.clone(), deluxe.clone(), foreign.clone()]);
    uow.rooms().add_range([
        room(lotus.id, single.id),
        room(lotus.id, deluxe.id),
        room(lotus.id, deluxe.id),
        room(other.id, foreign.id),
    ]);
    uow.complete().await.expect("Failed to commit");

    let all = uow
        .rooms()
        .rooms_with_details(lotus.id, RoomTypeFilter::All)
        .await
        .expect("Failed to list rooms");
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|r| r.hotel.as_ref().map(|h| h.id) == Some(lotus.id)));

    let deluxe_rooms = uow
        .rooms()
        .rooms_with_details(lotus.id, RoomTypeFilter::Kind(RoomKind::Deluxe))
        .await
        .expect("Failed to list rooms");
    assert_eq!(deluxe_rooms.len(), 2);
    assert!(
        deluxe_rooms
            .iter()
            .all(|r| r.room_type.as_ref().map(|t| t.id) == Some(deluxe.id))
    );

    let suites = uow
        .rooms()
        .rooms_with_details(lotus.id, RoomTypeFilter::Kind(RoomKind::Suite))
        .await
        .expect("Failed to list rooms");
    assert!(suites.is_empty());
}

#[tokio::test]
async fn test_room_with_details() {
    let db = setup().await;
    let lotus = seed_hotel(&db, "Lotus", "Luxor").await;
    let uow = UnitOfWork::new(db);
    let twin = room_type(lotus.id, RoomTypeKind::Twin);
    let created = room(lotus.id, twin.id);
    uow.room_types().create(twin.clone());
    uow.rooms().create(created.clone());
    uow.complete().await.expect("Failed to commit");

    let details = uow
        .rooms()
        .room_with_details(created.id)
        .await
        .expect("Failed to load")
        .expect("Room should exist");
    assert_eq!(details.room, created);
    assert_eq!(details.hotel, Some(lotus));
    assert_eq!(details.room_type, Some(twin));

    assert!(
        uow.rooms()
            .room_with_details(Uuid::now_v7())
            .await
            .expect("Failed to load")
            .is_none()
    );
}

#[tokio::test]
async fn test_company_lookups() {
    let db = setup().await;
    let uow = UnitOfWork::new(db);
    let nile = company("Nile Stays");
    uow.companies().create(nile.clone());
    uow.complete().await.expect("Failed to commit");

    let by_email = uow
        .companies()
        .find_by_email(&nile.email)
        .await
        .expect("Failed to query");
    assert_eq!(by_email, Some(nile.clone()));

    let by_user = uow
        .companies()
        .find_by_user_id(nile.user_id)
        .await
        .expect("Failed to query");
    assert_eq!(by_user, Some(nile));
}

#[tokio::test]
async fn test_find_active_coupon() {
    let db = setup().await;
    let uow = UnitOfWork::new(db);
    let live = coupon("NILE15", Duration::days(7));
    let expired = coupon("OLD10", Duration::days(-1));
    let disabled = deactivated(coupon("OFF20", Duration::days(7)));
    uow.coupons().add_range([live.clone(), expired, disabled]);
    uow.complete().await.expect("Failed to commit");

    let now = Utc::now();
    let found = uow
        .coupons()
        .find_active_by_code("  nile15 ", now)
        .await
        .expect("Failed to query");
    assert_eq!(found.map(|c| c.id), Some(live.id));

    for code in ["OLD10", "OFF20", "NOPE"] {
        let found = uow
            .coupons()
            .find_active_by_code(code, now)
            .await
            .expect("Failed to query");
        assert!(found.is_none(), "{code} should not be redeemable");
    }

    assert!(
        uow.coupons()
            .find_by_code("old10")
            .await
            .expect("Failed to query")
            .is_some()
    );
}

fn deactivated(
    mut coupon: hotelres_db::entities::coupons::Model,
) -> hotelres_db::entities::coupons::Model {
    coupon.is_active = false;
    coupon
}

#[tokio::test]
async fn test_amenity_rows_are_detached_snapshots() {
    let db = setup().await;
    let uow = UnitOfWork::new(db);
    let wifi = amenity("Wifi");
    uow.amenities().create(wifi.clone());
    uow.complete().await.expect("Failed to commit");

    let mut read = uow
        .amenities()
        .find_by_id(wifi.id)
        .await
        .expect("find")
        .expect("Amenity should exist");
    read.name = "Changed".into();
    assert!(!uow.has_changes());

    let again = uow.amenities().find_by_id(wifi.id).await.expect("find");
    assert_eq!(again, Some(wifi));
}

#[tokio::test]
async fn test_room_delete_range() {
    let db = setup().await;
    let lotus = seed_hotel(&db, "Lotus", "Luxor").await;
    let uow = UnitOfWork::new(db);
    let family = room_type(lotus.id, RoomTypeKind::Family);
    let created: Vec<_> = (0..3).map(|_| room(lotus.id, family.id)).collect();
    uow.room_types().create(family);
    uow.rooms().add_range(created.clone());
    uow.complete().await.expect("Failed to commit");

    uow.rooms().delete_range(created[..2].to_vec());
    assert_eq!(uow.complete().await.expect("Failed to delete"), 2);

    let left = uow.rooms().get(None).await.expect("list");
    assert_eq!(left, vec![created[2].clone()]);
    let count = uow
        .rooms()
        .count(Some(rooms::Column::HotelId.eq(lotus.id).into_condition()))
        .await
        .expect("count");
    assert_eq!(count, 1);
}
