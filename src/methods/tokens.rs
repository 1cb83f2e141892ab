use chrono::{DateTime, Utc};
use diesel::prelude::*;
use secrets::Secret;
use std::ops::Add;
use tokio::task;
use tokio::task::spawn_blocking;
use warp::Rejection;
use warp::Reply;
use warp::http::StatusCode;
use warp::reply::with_status;

use crate::POOL;
use crate::helper_model::ApiError;
use crate::model::{AccessToken, NewAccessToken, PublishAccessToken, RequestToken, User};
use crate::schema::access_tokens::dsl::*;

async fn generate_unique_token() -> Vec<u8> {
    loop {
        // Generate a secure random 32-byte token
        let token_vec = Secret::<[u8; 32]>::random(|s| s.to_vec());
        let token_to_return = token_vec.clone();

        let token_exists = task::spawn_blocking(move || {
            let mut pool = POOL.get().unwrap();
            diesel::select(diesel::dsl::exists(
                crate::schema::access_tokens::table
                    .filter(crate::schema::access_tokens::token.eq(token_vec)),
            ))
            .get_result::<bool>(&mut pool)
            // Treat a DB error as if the token exists, to force a retry.
            .unwrap_or_else(|e| {
                eprintln!("Database error checking token uniqueness: {:?}", e);
                true
            })
        })
        .await
        .unwrap_or(true);

        if !token_exists {
            return token_to_return;
        }
    }
}

pub async fn gen_token_object(_user_id: &i32, user_agent: &String) -> NewAccessToken {
    let mut _exp: DateTime<Utc> = Utc::now().add(chrono::Duration::seconds(600));
    if user_agent.contains("wheelio-app") {
        _exp = Utc::now().add(chrono::Duration::days(28));
    }
    NewAccessToken {
        user_id: *_user_id,
        token: generate_unique_token().await,
        exp: _exp,
    }
}

pub async fn verify_user_token(_user_id: &i32, token_data: &String) -> Result<bool, ApiError> {
    let binary_token = hex::decode(token_data).map_err(|_| ApiError::TokenFormatError)?;
    let id_clone = *_user_id;
    let mut pool = POOL.get().unwrap();
    let token_in_db = spawn_blocking(move || {
        access_tokens
            .filter(token.eq(binary_token))
            .filter(user_id.eq(id_clone))
            .first::<AccessToken>(&mut pool)
            .optional()
    })
    .await
    .unwrap()
    .map_err(|_| ApiError::Unexpected)?;
    match token_in_db {
        Some(found) => Ok(found.exp >= Utc::now()),
        None => Ok(false),
    }
}

pub async fn rm_token_by_binary(token_bit: Vec<u8>) {
    let mut pool = POOL.get().unwrap();
    let _ = spawn_blocking(move || {
        diesel::delete(access_tokens.filter(token.eq(token_bit))).execute(&mut pool)
    })
    .await;
}

// Parse the `auth` header ("<hex token>$<user id>"), verify the token,
// rotate it, and load the caller. Every authenticated endpoint goes through
// here; the returned publish token must be handed back to the client.
pub async fn authenticate(
    auth: &String,
    user_agent: &String,
) -> Result<(User, PublishAccessToken), ApiError> {
    let token_and_id = auth.split("$").collect::<Vec<&str>>();
    if token_and_id.len() != 2 {
        return Err(ApiError::InvalidToken);
    }
    let _user_id = token_and_id[1]
        .parse::<i32>()
        .map_err(|_| ApiError::InvalidToken)?;
    let access_token = RequestToken {
        user_id: _user_id,
        token: token_and_id[0].to_string(),
    };
    let token_is_valid = verify_user_token(&access_token.user_id, &access_token.token).await?;
    if !token_is_valid {
        return Err(ApiError::InvalidToken);
    }
    // Token checked out; rotate it before doing any work.
    rm_token_by_binary(hex::decode(&access_token.token).unwrap()).await;
    let new_token = gen_token_object(&access_token.user_id, user_agent).await;
    let mut pool = POOL.get().unwrap();
    let new_token_in_db = spawn_blocking(move || {
        diesel::insert_into(access_tokens)
            .values(&new_token)
            .get_result::<AccessToken>(&mut pool)
    })
    .await
    .unwrap()
    .map_err(|_| ApiError::Unexpected)?;
    let caller = crate::methods::user::get_user_by_id(&access_token.user_id)
        .await
        .map_err(|_| ApiError::InvalidToken)?;
    Ok((caller, new_token_in_db.into()))
}

pub fn token_not_hex_warp_return() -> Result<(warp::reply::Response,), Rejection> {
    let error_msg = serde_json::json!({"error": "Token not in hex format"});
    Ok::<_, Rejection>((with_status(warp::reply::json(&error_msg), StatusCode::BAD_REQUEST)
        .into_response(),))
}

pub fn token_invalid_wrapped_return() -> Result<(warp::reply::Response,), Rejection> {
    let error_msg = serde_json::json!({"error": "Token not valid"});
    Ok::<_, Rejection>((with_status(warp::reply::json(&error_msg), StatusCode::UNAUTHORIZED)
        .into_response(),))
}

// Rotated tokens ride back to the client in the `token` response header.
pub fn wrap_json_reply_with_token(
    token_data: PublishAccessToken,
    reply: impl Reply,
) -> warp::reply::Response {
    warp::reply::with_header(reply, "token", token_data.token).into_response()
}
