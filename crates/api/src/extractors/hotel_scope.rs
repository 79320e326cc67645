//! The hotel a company or admin screen is working on.
//!
//! `?id=` selects a hotel and is remembered in a cookie; later requests
//! without `?id=` fall back to the cookie.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use uuid::Uuid;

use crate::ApiError;

/// Cookie holding the selected hotel.
pub const HOTEL_ID_COOKIE: &str = "HotelIdCookie";

#[derive(Debug, Deserialize)]
struct HotelIdQuery {
    id: Option<String>,
}

/// Selected hotel, resolved once per request.
///
/// Return [`HotelScope::into_jar`] with the response so a newly selected
/// hotel is written back to the cookie.
#[derive(Debug)]
pub struct HotelScope {
    /// Selected hotel.
    pub hotel_id: Uuid,
    jar: CookieJar,
}

impl HotelScope {
    /// Resolves the hotel from an explicit ID or the cookie jar.
    ///
    /// # Errors
    ///
    /// Returns a 400 error if neither holds a valid hotel ID.
    pub fn resolve(query_id: Option<&str>, jar: CookieJar) -> Result<Self, ApiError> {
        if let Some(raw) = query_id.map(str::trim).filter(|raw| !raw.is_empty()) {
            let hotel_id = Uuid::parse_str(raw)
                .map_err(|_| ApiError::bad_request("hotel id is not a valid id"))?;
            let cookie = Cookie::build((HOTEL_ID_COOKIE, hotel_id.to_string()))
                .path("/")
                .http_only(true)
                .build();
            return Ok(Self {
                hotel_id,
                jar: jar.add(cookie),
            });
        }

        match jar.get(HOTEL_ID_COOKIE).map(|c| Uuid::parse_str(c.value())) {
            Some(Ok(hotel_id)) => Ok(Self { hotel_id, jar }),
            Some(Err(_)) => Err(ApiError::bad_request("selected hotel cookie is invalid")),
            None => Err(ApiError::bad_request("no hotel selected")),
        }
    }

    /// The cookie jar to return with the response.
    #[must_use]
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl<S> FromRequestParts<S> for HotelScope
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<HotelIdQuery>::try_from_uri(&parts.uri)
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        let jar = CookieJar::from_headers(&parts.headers);
        Self::resolve(query.id.as_deref(), jar)
    }
}
