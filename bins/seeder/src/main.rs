//! Database seeder for Hotelres development and testing.
//!
//! Seeds an admin login, amenities, a demo hotel with rooms and a coupon for
//! local development.
//!
//! Usage: cargo run --bin seeder

use chrono::{Duration, Utc};
use hotelres_core::auth::Role;
use hotelres_core::identity::{IdentityStore, NewIdentityUser, grant_role};
use hotelres_db::entities::sea_orm_active_enums::RoomTypeKind;
use hotelres_db::entities::{amenities, coupons, hotels, room_types, rooms};
use hotelres_db::{SeaOrmIdentityStore, UnitOfWork};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Demo hotel ID (consistent for all seeds)
const DEMO_HOTEL_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0001);
const ADMIN_EMAIL: &str = "admin@hotelres.dev";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
    let admin_password =
        std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "Admin#2024".to_string());

    println!("Connecting to database...");
    let db = hotelres_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding admin user...");
    seed_admin(&db, &admin_password).await;

    println!("Seeding amenities...");
    let amenity_ids = seed_amenities(&db).await;

    println!("Seeding demo hotel...");
    seed_demo_hotel(&db, &amenity_ids).await;

    println!("Seeding coupons...");
    seed_coupon(&db).await;

    println!("Seeding complete!");
}

/// Seeds the admin login used by the admin screens.
async fn seed_admin(db: &DatabaseConnection, password: &str) {
    let identity = SeaOrmIdentityStore::new(db.clone());

    let user = match identity.find_by_email(ADMIN_EMAIL).await {
        Ok(Some(user)) => {
            println!("  Admin user already exists, skipping...");
            user
        }
        Ok(None) => {
            let created = identity
                .create_user(NewIdentityUser {
                    user_name: ADMIN_EMAIL.to_string(),
                    email: ADMIN_EMAIL.to_string(),
                    phone_number: None,
                    city: None,
                    password: password.to_string(),
                })
                .await;
            match created {
                Ok(user) => {
                    println!("  Created admin user: {ADMIN_EMAIL}");
                    user
                }
                Err(e) => {
                    eprintln!("Failed to create admin user: {e}");
                    return;
                }
            }
        }
        Err(e) => {
            eprintln!("Failed to look up admin user: {e}");
            return;
        }
    };

    match identity.roles_of(user.id).await {
        Ok(roles) if roles.contains(&Role::Admin) => {}
        _ => {
            if let Err(e) = grant_role(&identity, user.id, Role::Admin).await {
                eprintln!("Failed to grant admin role: {e}");
            }
        }
    }
}

/// Seeds the amenity catalogue and returns the IDs of every amenity.
async fn seed_amenities(db: &DatabaseConnection) -> Vec<Uuid> {
    let uow = UnitOfWork::new(db.clone());
    let existing = match uow.amenities().get(None).await {
        Ok(existing) => existing,
        Err(e) => {
            eprintln!("Failed to read amenities: {e}");
            return Vec::new();
        }
    };
    if !existing.is_empty() {
        println!("  Amenities already exist, skipping...");
        return existing.into_iter().map(|a| a.id).collect();
    }

    let catalogue = [
        ("Free Wi-Fi", "wifi"),
        ("Swimming Pool", "pool"),
        ("Parking", "car"),
        ("Breakfast", "coffee"),
        ("Gym", "dumbbell"),
        ("Spa", "spa"),
    ];
    let rows: Vec<_> = catalogue
        .iter()
        .map(|(name, icon)| amenities::Model {
            id: Uuid::now_v7(),
            name: (*name).to_string(),
            icon: Some((*icon).to_string()),
        })
        .collect();
    let ids = rows.iter().map(|a| a.id).collect();

    uow.amenities().add_range(rows);
    match uow.complete().await {
        Ok(count) => {
            println!("  Created {count} amenities");
            ids
        }
        Err(e) => {
            eprintln!("Failed to insert amenities: {e}");
            Vec::new()
        }
    }
}

/// Seeds the "Lotus" hotel with one room type per kind, five Deluxe rooms and
/// the first three amenities.
async fn seed_demo_hotel(db: &DatabaseConnection, amenity_ids: &[Uuid]) {
    let uow = UnitOfWork::new(db.clone());
    if uow.hotels().find_by_id(DEMO_HOTEL_ID).await.ok().flatten().is_some() {
        println!("  Demo hotel already exists, skipping...");
        return;
    }

    uow.hotels().create(hotels::Model {
        id: DEMO_HOTEL_ID,
        company_id: None,
        name: "Lotus".to_string(),
        city: "Alexandria".to_string(),
        address: "14 Corniche Road".to_string(),
        description: Some("Sea-view hotel on the Corniche.".to_string()),
        stars: 4,
        created_at: Utc::now().fixed_offset(),
    });

    let room_types = [
        (RoomTypeKind::Single, 8_000, 1),
        (RoomTypeKind::Double, 12_000, 2),
        (RoomTypeKind::Deluxe, 20_000, 3),
    ]
    .map(|(kind, price_per_night_cents, capacity)| room_types::Model {
        id: Uuid::now_v7(),
        hotel_id: DEMO_HOTEL_ID,
        kind,
        price_per_night_cents,
        capacity,
    });
    let deluxe_id = room_types[2].id;
    uow.room_types().add_range(room_types);

    uow.rooms().add_range((0..5).map(|_| rooms::Model {
        id: Uuid::now_v7(),
        hotel_id: DEMO_HOTEL_ID,
        room_type_id: deluxe_id,
        is_available: true,
    }));

    uow.hotel_amenities()
        .add_range(amenity_ids.iter().take(3).map(|&amenity_id| {
            hotelres_db::entities::hotel_amenities::Model {
                hotel_id: DEMO_HOTEL_ID,
                amenity_id,
            }
        }));

    match uow.complete().await {
        Ok(count) => println!("  Created demo hotel Lotus ({count} rows)"),
        Err(e) => eprintln!("Failed to insert demo hotel: {e}"),
    }
}

/// Seeds a coupon valid for 90 days.
async fn seed_coupon(db: &DatabaseConnection) {
    let uow = UnitOfWork::new(db.clone());
    if uow
        .coupons()
        .find_active_by_code("WELCOME10", Utc::now())
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Coupon WELCOME10 already exists, skipping...");
        return;
    }

    let now = Utc::now();
    uow.coupons().create(coupons::Model {
        id: Uuid::now_v7(),
        code: "WELCOME10".to_string(),
        discount_percent: 10,
        valid_until: (now + Duration::days(90)).fixed_offset(),
        is_active: true,
        created_at: now.fixed_offset(),
    });

    if let Err(e) = uow.complete().await {
        eprintln!("Failed to insert coupon: {e}");
    } else {
        println!("  Created coupon: WELCOME10");
    }
}
