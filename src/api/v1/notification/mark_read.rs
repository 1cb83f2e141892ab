use crate::{POOL, helper_model, methods, model};
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::Filter;
use warp::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
struct MarkReadBodyData {
    notification_id: i32,
}

pub fn main() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("mark-read")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(async move |body: MarkReadBodyData, auth: String, user_agent: String| {
            let (caller, token_data) = match methods::tokens::authenticate(&auth, &user_agent).await
            {
                Err(helper_model::ApiError::TokenFormatError) => {
                    return methods::tokens::token_not_hex_warp_return();
                }
                Err(_) => return methods::tokens::token_invalid_wrapped_return(),
                Ok(pair) => pair,
            };

            let caller_id = caller.id;
            let mut pool = POOL.get().unwrap();
            let update_result = spawn_blocking(move || {
                use crate::schema::notifications::dsl::*;
                diesel::update(
                    notifications
                        .filter(id.eq(&body.notification_id))
                        .filter(user_id.eq(caller_id)),
                )
                .set(is_read.eq(true))
                .get_result::<model::Notification>(&mut pool)
                .optional()
            })
            .await
            .unwrap();
            match update_result {
                Err(e) => methods::standard_replies::wrapped_internal_error(
                    token_data,
                    format!("notification/mark-read: update failed: {:?}", e),
                ),
                Ok(None) => {
                    methods::standard_replies::wrapped_not_found(token_data, "Notification")
                }
                Ok(Some(updated)) => {
                    let msg = serde_json::json!({"notification": &updated});
                    methods::standard_replies::wrapped_response_with_obj(
                        token_data,
                        msg,
                        StatusCode::OK,
                    )
                }
            }
        })
}
