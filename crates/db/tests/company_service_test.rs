//! Integration tests for the company saga.

mod common;

use std::sync::{Arc, Mutex};

use bytes::Bytes;
use chrono::Utc;
use common::{admin, setup};
use hotelres_core::auth::Role;
use hotelres_core::company::{CreateCompanyForm, EditCompanyForm};
use hotelres_core::identity::{IdentityError, IdentityStore, IdentityUser, MockIdentityStore};
use hotelres_core::storage::{ImageUpload, StorageService};
use hotelres_db::services::CompanyService;
use hotelres_db::{SeaOrmIdentityStore, ServiceError, UnitOfWork};
use mockall::predicate::eq;
use sea_orm::{ConnectionTrait, DatabaseConnection};
use uuid::Uuid;

fn create_form(email: &str) -> CreateCompanyForm {
    CreateCompanyForm {
        name: "Nile Stays".into(),
        email: email.into(),
        phone_number: Some("+20 100 123 4567".into()),
        address: Some("Giza".into()),
        password: "Lotus#2024".into(),
        confirm_password: "Lotus#2024".into(),
    }
}

fn png(name: &str) -> ImageUpload {
    ImageUpload::new(name, "image/png", Bytes::from_static(b"\x89PNG\r\n"))
}

fn identity_user(email: &str) -> IdentityUser {
    IdentityUser {
        id: Uuid::now_v7(),
        user_name: email.into(),
        email: email.into(),
        phone_number: None,
        city: None,
        profile_image: None,
        password_hash: "$argon2id$stub".into(),
        created_at: Utc::now(),
    }
}

fn real_service(db: &DatabaseConnection) -> (CompanyService, Arc<SeaOrmIdentityStore>, StorageService) {
    let identity = Arc::new(SeaOrmIdentityStore::new(db.clone()));
    let storage = StorageService::in_memory().expect("storage");
    let service = CompanyService::new(identity.clone(), storage.clone());
    (service, identity, storage)
}

async fn block(db: &DatabaseConnection, event: &str) {
    db.execute_unprepared(&format!(
        "CREATE TRIGGER block_{event} BEFORE {event} ON companies \
         BEGIN SELECT RAISE(ABORT, 'companies are locked'); END;"
    ))
    .await
    .expect("Failed to create trigger");
}

#[tokio::test]
async fn test_create_edit_delete_company() {
    let db = setup().await;
    let (service, identity, storage) = real_service(&db);
    let uow = UnitOfWork::new(db);
    let actor = admin();

    let company = service
        .create_company(&uow, &actor, create_form("owner@nile.test"), Some(png("logo.png")))
        .await
        .expect("Failed to create company");
    let first_image = company.profile_image.clone().expect("profile image");
    assert!(storage.exists(&first_image).await);

    let user = identity
        .find_by_id(company.user_id)
        .await
        .expect("find")
        .expect("Identity user should exist");
    assert_eq!(user.email, "owner@nile.test");
    assert_eq!(user.profile_image.as_deref(), Some(first_image.as_str()));
    assert_eq!(
        identity.roles_of(user.id).await.expect("roles"),
        vec![Role::Company]
    );
    assert!(
        identity
            .verify_credentials("OWNER@nile.test", "Lotus#2024")
            .await
            .expect("verify")
            .is_some()
    );

    let edited = service
        .edit_company(
            &uow,
            &actor,
            company.id,
            EditCompanyForm {
                name: "Nile Stays Group".into(),
                email: "group@nile.test".into(),
                phone_number: None,
                address: Some("Cairo".into()),
            },
            Some(png("new-logo.png")),
        )
        .await
        .expect("Failed to edit company");
    let second_image = edited.profile_image.clone().expect("profile image");
    assert_ne!(second_image, first_image);
    assert!(!storage.exists(&first_image).await);
    assert!(storage.exists(&second_image).await);

    let user = identity
        .find_by_id(company.user_id)
        .await
        .expect("find")
        .expect("Identity user should exist");
    assert_eq!(user.email, "group@nile.test");
    assert_eq!(user.user_name, "group@nile.test");
    assert_eq!(user.city.as_deref(), Some("Cairo"));
    assert_eq!(user.profile_image, edited.profile_image);

    service
        .delete_company(&uow, &actor, company.id)
        .await
        .expect("Failed to delete company");
    assert!(uow.companies().find_by_id(company.id).await.expect("find").is_none());
    assert!(identity.find_by_id(company.user_id).await.expect("find").is_none());
    assert!(!storage.exists(&second_image).await);
}

#[tokio::test]
async fn test_create_company_with_taken_email() {
    let db = setup().await;
    let (service, _, _) = real_service(&db);
    let uow = UnitOfWork::new(db);

    service
        .create_company(&uow, &admin(), create_form("owner@nile.test"), None)
        .await
        .expect("Failed to create company");
    let result = service
        .create_company(&uow, &admin(), create_form("Owner@Nile.test"), None)
        .await;

    let Err(ServiceError::Identity(IdentityError::Rejected(messages))) = result else {
        panic!("expected identity rejection");
    };
    assert!(messages.iter().any(|m| m.contains("already taken")));
    assert_eq!(uow.companies().count(None).await.expect("count"), 1);
}

#[tokio::test]
async fn test_create_company_rejects_weak_password() {
    let db = setup().await;
    let (service, identity, _) = real_service(&db);
    let uow = UnitOfWork::new(db);
    let mut form = create_form("owner@nile.test");
    form.password = "weak".into();
    form.confirm_password = "weak".into();

    let result = service.create_company(&uow, &admin(), form, None).await;

    assert!(matches!(
        result,
        Err(ServiceError::Identity(IdentityError::Rejected(_)))
    ));
    assert!(identity.find_by_email("owner@nile.test").await.expect("find").is_none());
}

#[tokio::test]
async fn test_create_company_compensates_when_commit_fails() {
    let db = setup().await;
    block(&db, "INSERT").await;
    let user = identity_user("owner@nile.test");
    let user_id = user.id;
    let stored_key = Arc::new(Mutex::new(None::<String>));

    let mut identity = MockIdentityStore::new();
    identity
        .expect_create_user()
        .times(1)
        .returning(move |_| Ok(user.clone()));
    let seen = Arc::clone(&stored_key);
    identity.expect_update_user().times(1).returning(move |user| {
        *seen.lock().expect("lock") = user.profile_image.clone();
        Ok(())
    });
    identity.expect_role_exists().returning(|_| Ok(true));
    identity.expect_add_to_role().returning(|_, _| Ok(()));
    identity
        .expect_delete_user()
        .withf(move |id| *id == user_id)
        .times(1)
        .returning(|_| Ok(()));

    let storage = StorageService::in_memory().expect("storage");
    let service = CompanyService::new(Arc::new(identity), storage.clone());
    let uow = UnitOfWork::new(db);

    let result = service
        .create_company(&uow, &admin(), create_form("owner@nile.test"), Some(png("logo.png")))
        .await;

    assert!(matches!(result, Err(ServiceError::Database(_))));
    let key = stored_key
        .lock()
        .expect("lock")
        .clone()
        .expect("image should have been stored");
    assert!(!storage.exists(&key).await);
}

#[tokio::test]
async fn test_create_company_compensates_when_role_grant_fails() {
    let db = setup().await;
    let user = identity_user("owner@nile.test");
    let user_id = user.id;

    let mut identity = MockIdentityStore::new();
    identity
        .expect_create_user()
        .times(1)
        .returning(move |_| Ok(user.clone()));
    identity.expect_role_exists().returning(|_| Ok(true));
    identity
        .expect_add_to_role()
        .returning(|_, _| Err(IdentityError::store("role table unavailable")));
    identity
        .expect_delete_user()
        .with(eq(user_id))
        .times(1)
        .returning(|_| Ok(()));

    let storage = StorageService::in_memory().expect("storage");
    let service = CompanyService::new(Arc::new(identity), storage);
    let uow = UnitOfWork::new(db);

    let result = service
        .create_company(&uow, &admin(), create_form("owner@nile.test"), None)
        .await;

    assert!(matches!(
        result,
        Err(ServiceError::Identity(IdentityError::Store(_)))
    ));
    assert_eq!(uow.companies().count(None).await.expect("count"), 0);
}

#[tokio::test]
async fn test_failed_identity_delete_leaves_company_intact() {
    let db = setup().await;
    let (service, identity, storage) = real_service(&db);
    let uow = UnitOfWork::new(db.clone());
    let company = service
        .create_company(&uow, &admin(), create_form("owner@nile.test"), Some(png("logo.png")))
        .await
        .expect("Failed to create company");
    let image = company.profile_image.clone().expect("profile image");
    let user = identity
        .find_by_id(company.user_id)
        .await
        .expect("find")
        .expect("Identity user should exist");

    let mut failing = MockIdentityStore::new();
    failing
        .expect_find_by_id()
        .returning(move |_| Ok(Some(user.clone())));
    failing
        .expect_roles_of()
        .returning(|_| Ok(vec![Role::Company]));
    failing
        .expect_delete_user()
        .returning(|_| Err(IdentityError::store("identity store offline")));
    let service = CompanyService::new(Arc::new(failing), storage.clone());

    let result = service.delete_company(&uow, &admin(), company.id).await;

    assert!(result.is_err());
    assert_eq!(
        uow.companies().find_by_id(company.id).await.expect("find"),
        Some(company)
    );
    assert!(storage.exists(&image).await);
}

#[tokio::test]
async fn test_delete_restores_identity_when_commit_fails() {
    let db = setup().await;
    let (service, identity, storage) = real_service(&db);
    let uow = UnitOfWork::new(db.clone());
    let company = service
        .create_company(&uow, &admin(), create_form("owner@nile.test"), Some(png("logo.png")))
        .await
        .expect("Failed to create company");
    let image = company.profile_image.clone().expect("profile image");
    block(&db, "DELETE").await;

    let result = service.delete_company(&uow, &admin(), company.id).await;

    assert!(matches!(result, Err(ServiceError::Database(_))));
    let restored = identity
        .find_by_id(company.user_id)
        .await
        .expect("find")
        .expect("Identity user should be restored");
    assert_eq!(restored.email, "owner@nile.test");
    assert_eq!(
        identity.roles_of(restored.id).await.expect("roles"),
        vec![Role::Company]
    );
    assert!(
        identity
            .verify_credentials("owner@nile.test", "Lotus#2024")
            .await
            .expect("verify")
            .is_some()
    );
    assert!(uow.companies().find_by_id(company.id).await.expect("find").is_some());
    assert!(storage.exists(&image).await);
}

#[tokio::test]
async fn test_edit_restores_identity_when_commit_fails() {
    let db = setup().await;
    let (service, identity, storage) = real_service(&db);
    let uow = UnitOfWork::new(db.clone());
    let company = service
        .create_company(&uow, &admin(), create_form("owner@nile.test"), Some(png("logo.png")))
        .await
        .expect("Failed to create company");
    let old_image = company.profile_image.clone().expect("profile image");
    block(&db, "UPDATE").await;

    let result = service
        .edit_company(
            &uow,
            &admin(),
            company.id,
            EditCompanyForm {
                name: "Renamed".into(),
                email: "renamed@nile.test".into(),
                phone_number: None,
                address: None,
            },
            Some(png("new.png")),
        )
        .await;

    assert!(matches!(result, Err(ServiceError::Database(_))));
    let user = identity
        .find_by_id(company.user_id)
        .await
        .expect("find")
        .expect("Identity user should exist");
    assert_eq!(user.email, "owner@nile.test");
    assert_eq!(user.profile_image.as_deref(), Some(old_image.as_str()));
    assert!(storage.exists(&old_image).await);
    assert_eq!(
        uow.companies().find_by_id(company.id).await.expect("find"),
        Some(company)
    );
}

#[tokio::test]
async fn test_replace_profile_image_keeps_other_fields() {
    let db = setup().await;
    let (service, _, storage) = real_service(&db);
    let uow = UnitOfWork::new(db);
    let company = service
        .create_company(&uow, &admin(), create_form("owner@nile.test"), None)
        .await
        .expect("Failed to create company");
    assert!(company.profile_image.is_none());

    let updated = service
        .replace_profile_image(&uow, &admin(), company.id, png("logo.png"))
        .await
        .expect("Failed to replace image");

    assert_eq!(updated.name, company.name);
    assert_eq!(updated.email, company.email);
    let key = updated.profile_image.expect("profile image");
    assert!(key.starts_with(&format!("profiles/{}/", company.user_id)));
    assert!(storage.exists(&key).await);
}

#[tokio::test]
async fn test_unknown_company() {
    let db = setup().await;
    let (service, _, _) = real_service(&db);
    let uow = UnitOfWork::new(db);

    let result = service.delete_company(&uow, &admin(), Uuid::now_v7()).await;
    assert!(matches!(result, Err(ServiceError::NotFound("company"))));
    assert!(service.list_companies(&uow).await.expect("list").is_empty());
}
