use crate::{POOL, methods, model};
use bcrypt::verify;
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::reply::with_status;
use warp::{Filter, Reply};

#[derive(Deserialize, Serialize, Clone)]
struct LoginData {
    email: String,
    password: String,
}

pub fn main() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("login")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::header::<String>("user-agent"))
        .and_then(async move |login_data: LoginData, user_agent: String| {
            let email_clone = login_data.email.clone();
            let mut pool = POOL.get().unwrap();
            let result = spawn_blocking(move || {
                use crate::schema::users::dsl::*;
                users
                    .filter(email.eq(&email_clone))
                    .get_result::<model::User>(&mut pool)
                    .optional()
            })
            .await
            .unwrap();
            // One reply for every failure mode; never reveal which part of
            // the credentials was wrong.
            let credentials_invalid = || {
                let error_msg = serde_json::json!({"error": "Credentials invalid"});
                Ok::<_, warp::Rejection>((with_status(
                    warp::reply::json(&error_msg),
                    StatusCode::UNAUTHORIZED,
                )
                .into_response(),))
            };
            let user = match result {
                Err(e) => {
                    return methods::standard_replies::internal_server_error_response(format!(
                        "user/login: lookup failed: {:?}",
                        e
                    ));
                }
                Ok(None) => return credentials_invalid(),
                Ok(Some(user)) => user,
            };
            if !verify(&login_data.password, &user.password).unwrap_or(false) {
                return credentials_invalid();
            }

            let new_access_token = methods::tokens::gen_token_object(&user.id, &user_agent).await;
            let mut pool = POOL.get().unwrap();
            let token_result = spawn_blocking(move || {
                use crate::schema::access_tokens::dsl::*;
                diesel::insert_into(access_tokens)
                    .values(&new_access_token)
                    .get_result::<model::AccessToken>(&mut pool)
            })
            .await
            .unwrap();
            match token_result {
                Err(e) => methods::standard_replies::internal_server_error_response(format!(
                    "user/login: token insert failed: {:?}",
                    e
                )),
                Ok(token_row) => {
                    let pub_token: model::PublishAccessToken = token_row.into();
                    let pub_user: model::PublishUser = user.into();
                    let msg = serde_json::json!({"user": &pub_user});
                    Ok::<_, warp::Rejection>((methods::tokens::wrap_json_reply_with_token(
                        pub_token,
                        with_status(warp::reply::json(&msg), StatusCode::OK),
                    ),))
                }
            }
        })
}
