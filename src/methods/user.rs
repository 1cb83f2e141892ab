use diesel::prelude::*;
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::task;
use warp::Rejection;
use warp::Reply;
use warp::http::StatusCode;
use warp::reply::with_status;

use crate::POOL;
use crate::model::{User, UserRole};

pub async fn get_user_by_id(_user_id: &i32) -> QueryResult<User> {
    let mut pool = POOL.get().unwrap();
    let id_clone = *_user_id;
    task::spawn_blocking(move || {
        use crate::schema::users::dsl::*;
        users.filter(id.eq(&id_clone)).get_result::<User>(&mut pool)
    })
    .await
    .unwrap()
}

pub fn user_is_admin(user: &User) -> bool {
    user.role == UserRole::Admin
}

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub fn email_is_valid(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn user_not_admin_wrapped_return(
    token_data: crate::model::PublishAccessToken,
) -> Result<(warp::reply::Response,), Rejection> {
    let error_msg = serde_json::json!({"error": "You do not have administrator privileges"});
    Ok::<_, Rejection>((crate::methods::tokens::wrap_json_reply_with_token(
        token_data,
        with_status(warp::reply::json(&error_msg), StatusCode::FORBIDDEN),
    ),))
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(email_is_valid("rider@example.com"));
        assert!(email_is_valid("first.last@mail.co.in"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!email_is_valid("not-an-email"));
        assert!(!email_is_valid("a b@example.com"));
        assert!(!email_is_valid("rider@nodot"));
        assert!(!email_is_valid("@example.com"));
    }
}
