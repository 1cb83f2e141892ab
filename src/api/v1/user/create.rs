use crate::{POOL, methods, model};
use bcrypt::{DEFAULT_COST, hash};
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::Filter;
use warp::http::StatusCode;
use warp::reply::with_status;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
struct CreateUserBodyData {
    name: String,
    email: String,
    password: String,
    phone: String,
    role: Option<String>,
    business_name: Option<String>,
}

pub fn main() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("create")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::header::<String>("user-agent"))
        .and_then(async move |body: CreateUserBodyData, user_agent: String| {
            if !methods::user::email_is_valid(&body.email) {
                return methods::standard_replies::bad_request("Invalid email format");
            }
            if body.password.len() < 8 {
                return methods::standard_replies::bad_request(
                    "Password must be at least 8 characters",
                );
            }
            // Admin accounts are provisioned out of band, never registered.
            let role = match body.role.as_deref() {
                None | Some("user") => model::UserRole::User,
                Some("client") => model::UserRole::Client,
                Some(_) => {
                    return methods::standard_replies::bad_request(
                        "role must be either \"user\" or \"client\"",
                    );
                }
            };
            if role == model::UserRole::Client && body.business_name.is_none() {
                return methods::standard_replies::bad_request(
                    "businessName is required for client accounts",
                );
            }

            let email_clone = body.email.clone();
            let mut pool = POOL.get().unwrap();
            let email_taken = spawn_blocking(move || {
                use crate::schema::users::dsl::*;
                diesel::select(diesel::dsl::exists(users.filter(email.eq(&email_clone))))
                    .get_result::<bool>(&mut pool)
                    .unwrap_or(true)
            })
            .await
            .unwrap();
            if email_taken {
                return methods::standard_replies::conflict("Email already registered");
            }

            let hashed = match hash(&body.password, DEFAULT_COST) {
                Err(e) => {
                    return methods::standard_replies::internal_server_error_response(format!(
                        "user/create: password hashing failed: {:?}",
                        e
                    ));
                }
                Ok(hashed) => hashed,
            };
            let new_user = model::NewUser {
                name: body.name.clone(),
                email: body.email.clone(),
                password: hashed,
                phone: body.phone.clone(),
                role,
                business_name: body.business_name.clone(),
            };
            let mut pool = POOL.get().unwrap();
            let insert_result = spawn_blocking(move || {
                use crate::schema::users::dsl::*;
                diesel::insert_into(users)
                    .values(&new_user)
                    .get_result::<model::User>(&mut pool)
            })
            .await
            .unwrap();
            let saved = match insert_result {
                Err(e) => {
                    return methods::standard_replies::internal_server_error_response(format!(
                        "user/create: insert failed: {:?}",
                        e
                    ));
                }
                Ok(saved) => saved,
            };

            let new_access_token = methods::tokens::gen_token_object(&saved.id, &user_agent).await;
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
                    "user/create: token insert failed: {:?}",
                    e
                )),
                Ok(token_row) => {
                    let pub_token: model::PublishAccessToken = token_row.into();
                    let pub_user: model::PublishUser = saved.into();
                    let msg = serde_json::json!({"user": &pub_user});
                    Ok::<_, warp::Rejection>((methods::tokens::wrap_json_reply_with_token(
                        pub_token,
                        with_status(warp::reply::json(&msg), StatusCode::CREATED),
                    ),))
                }
            }
        })
}
