//! String-backed enums stored in the database.

use hotelres_core::contact::ContactKind;
use hotelres_core::hotel::RoomKind;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `room_types.kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum RoomTypeKind {
    #[sea_orm(string_value = "single")]
    Single,
    #[sea_orm(string_value = "double")]
    Double,
    #[sea_orm(string_value = "twin")]
    Twin,
    #[sea_orm(string_value = "suite")]
    Suite,
    #[sea_orm(string_value = "deluxe")]
    Deluxe,
    #[sea_orm(string_value = "family")]
    Family,
}

impl From<RoomKind> for RoomTypeKind {
    fn from(kind: RoomKind) -> Self {
        match kind {
            RoomKind::Single => Self::Single,
            RoomKind::Double => Self::Double,
            RoomKind::Twin => Self::Twin,
            RoomKind::Suite => Self::Suite,
            RoomKind::Deluxe => Self::Deluxe,
            RoomKind::Family => Self::Family,
        }
    }
}

impl From<RoomTypeKind> for RoomKind {
    fn from(kind: RoomTypeKind) -> Self {
        match kind {
            RoomTypeKind::Single => Self::Single,
            RoomTypeKind::Double => Self::Double,
            RoomTypeKind::Twin => Self::Twin,
            RoomTypeKind::Suite => Self::Suite,
            RoomTypeKind::Deluxe => Self::Deluxe,
            RoomTypeKind::Family => Self::Family,
        }
    }
}

/// `contact_requests.request_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    #[sea_orm(string_value = "complaint")]
    Complaint,
    #[sea_orm(string_value = "suggestion")]
    Suggestion,
    #[sea_orm(string_value = "company_request")]
    CompanyRequest,
}

impl From<ContactKind> for RequestType {
    fn from(kind: ContactKind) -> Self {
        match kind {
            ContactKind::Complaint => Self::Complaint,
            ContactKind::Suggestion => Self::Suggestion,
            ContactKind::CompanyRequest => Self::CompanyRequest,
        }
    }
}

impl From<RequestType> for ContactKind {
    fn from(kind: RequestType) -> Self {
        match kind {
            RequestType::Complaint => Self::Complaint,
            RequestType::Suggestion => Self::Suggestion,
            RequestType::CompanyRequest => Self::CompanyRequest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_kind_names_match_core() {
        for kind in RoomKind::ALL {
            assert_eq!(RoomTypeKind::from(kind).to_value(), kind.as_str());
            assert_eq!(RoomKind::from(RoomTypeKind::from(kind)), kind);
        }
    }

    #[test]
    fn test_request_type_names_match_core() {
        for kind in ContactKind::ALL {
            assert_eq!(RequestType::from(kind).to_value(), kind.as_str());
        }
    }
}
