//! Core domain rules for Hotelres.
//!
//! This crate contains pure domain logic with ZERO web or database dependencies.
//! Ports for collaborators (identity store) are declared here and implemented
//! by the db crate.
//!
//! # Modules
//!
//! - `auth` - Roles and password hashing
//! - `identity` - Identity store port and password policy
//! - `storage` - Profile image storage on OpenDAL
//! - `hotel` - Hotels, room types, room batches and amenity sets
//! - `company` - Company profile forms
//! - `contact` - Contact requests
//! - `coupon` - Coupon forms
//! - `audit` - Structured admin action logging

pub mod audit;
pub mod auth;
pub mod company;
pub mod contact;
pub mod coupon;
pub mod hotel;
pub mod identity;
pub mod storage;
