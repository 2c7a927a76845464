use axum::http::StatusCode;
use database::{entities::users, services::user::UserService};
use models::course::Role;
use sea_orm::{DatabaseConnection, DbErr};
use tower_oauth2_resource_server::claims::DefaultClaims;

/// Why a request was turned away; the message tells the user what to do
/// next, the status tells the client which flow (sign-in, signup) fixes it
#[derive(Debug, PartialEq, Eq)]
pub struct Denial {
    pub status: StatusCode,
    pub message: &'static str,
}

impl Denial {
    /// Token missing a subject, or no token at all made it this far
    pub fn unauthenticated() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "Please sign in to continue",
        }
    }

    /// Valid token, but the subject never finished signup
    pub fn no_profile() -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: "Please complete your profile to continue",
        }
    }

    /// Signed in with a profile, but the wrong role for this page
    pub fn wrong_role() -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: "You do not have access to this page",
        }
    }

    /// Plain-text body, the same shape every other error path uses
    pub fn into_error(self) -> (StatusCode, String) {
        (self.status, self.message.to_owned())
    }
}

/// Outcome of the access check at the protected-route boundary
pub enum Access {
    Granted(users::Model),
    Denied(Denial),
}

impl Access {
    pub fn granted(self) -> Result<users::Model, (StatusCode, String)> {
        match self {
            Self::Granted(user) => Ok(user),
            Self::Denied(denial) => Err(denial.into_error()),
        }
    }
}

/// The identity-provider subject from the validated JWT
pub fn subject(claims: &DefaultClaims) -> Result<&str, Denial> {
    claims
        .sub
        .as_deref()
        .ok_or_else(Denial::unauthenticated)
}

/// The one place access is decided for protected routes
///
/// Resolves the token's subject to a profile and, when `required_role` is
/// given, checks the profile's role against it. Handlers receive either the
/// profile or a denial ready to map onto the response.
pub async fn check_access(
    db: &DatabaseConnection,
    claims: &DefaultClaims,
    required_role: Option<Role>,
) -> Result<Access, DbErr> {
    let sub = match subject(claims) {
        Ok(sub) => sub,
        Err(denial) => return Ok(Access::Denied(denial)),
    };

    let user = match UserService::get_profile(db, sub).await? {
        Some(user) => user,
        None => return Ok(Access::Denied(Denial::no_profile())),
    };

    if let Some(required) = required_role
        && user.role != required
    {
        return Ok(Access::Denied(Denial::wrong_role()));
    }

    Ok(Access::Granted(user))
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_denial_statuses() {
        assert_eq!(Denial::unauthenticated().status, StatusCode::UNAUTHORIZED);
        assert_eq!(Denial::no_profile().status, StatusCode::FORBIDDEN);
        assert_eq!(Denial::wrong_role().status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_denial_body_is_the_plain_message() {
        let (status, body) = Denial::no_profile().into_error();
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, "Please complete your profile to continue");
    }

    #[test]
    fn test_subject_requires_sub_claim() {
        let claims: DefaultClaims = serde_json::from_value(json!({})).unwrap();
        assert_eq!(subject(&claims), Err(Denial::unauthenticated()));

        let claims: DefaultClaims = serde_json::from_value(json!({ "sub": "user-1" })).unwrap();
        assert_eq!(subject(&claims), Ok("user-1"));
    }
}
