//! Current admin service
//!
//! Verify the admin from the request based on the basic Authorization header

use axum::Extension;
use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Basic;

use crate::admin::AdminCredentials;
use crate::api::Error;

/// The verified admin of the current request
#[derive(Clone, Debug)]
pub struct CurrentAdmin {
    /// Verified username, only used for the audit log
    pub username: String,
}

impl<S> FromRequestParts<S> for CurrentAdmin
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // a missing header is just as wrong as a wrong password
        let TypedHeader(Authorization(basic)) =
            TypedHeader::<Authorization<Basic>>::from_request_parts(parts, state)
                .await
                .map_err(|_| Error::unauthorized())?;

        let Extension(credentials) = parts
            .extract::<Extension<AdminCredentials>>()
            .await
            .map_err(|_| Error::internal_server_error("Could not get admin credentials"))?;

        let username = credentials
            .verify(basic.username(), basic.password())
            .await
            .ok_or_else(Error::unauthorized)?;

        Ok(Self { username })
    }
}
