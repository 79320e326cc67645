//! Identity store migration.
//!
//! The identity tables share the database but are written outside any unit of
//! work, so there are no foreign keys from hotel tables into them.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(IDENTITY_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS identity_user_roles CASCADE;
             DROP TABLE IF EXISTS identity_roles CASCADE;
             DROP TABLE IF EXISTS identity_users CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const IDENTITY_SQL: &str = r"
CREATE TABLE identity_users (
    id UUID PRIMARY KEY,
    user_name VARCHAR(256) NOT NULL,
    email VARCHAR(256) NOT NULL UNIQUE,
    phone_number VARCHAR(20),
    city VARCHAR(200),
    profile_image TEXT,
    password_hash TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE UNIQUE INDEX idx_identity_users_email_lower ON identity_users(lower(email));

CREATE TABLE identity_roles (
    id UUID PRIMARY KEY,
    name VARCHAR(64) NOT NULL UNIQUE
);

CREATE TABLE identity_user_roles (
    user_id UUID NOT NULL REFERENCES identity_users(id) ON DELETE CASCADE,
    role_id UUID NOT NULL REFERENCES identity_roles(id) ON DELETE CASCADE,
    PRIMARY KEY (user_id, role_id)
);
";
