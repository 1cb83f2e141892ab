use crate::{POOL, helper_model, methods, model};
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::Filter;
use warp::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
struct ListQuery {
    unread_only: Option<bool>,
}

pub fn main() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("list")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<ListQuery>())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(async move |query: ListQuery, auth: String, user_agent: String| {
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
            let list_result = spawn_blocking(move || {
                use crate::schema::notifications::dsl::*;
                let mut db_query = notifications.filter(user_id.eq(caller_id)).into_boxed();
                if query.unread_only == Some(true) {
                    db_query = db_query.filter(is_read.eq(false));
                }
                db_query
                    .order(created_at.desc())
                    .load::<model::Notification>(&mut pool)
            })
            .await
            .unwrap();
            match list_result {
                Err(e) => methods::standard_replies::wrapped_internal_error(
                    token_data,
                    format!("notification/list: query failed: {:?}", e),
                ),
                Ok(list) => {
                    let msg = serde_json::json!({"notifications": &list});
                    methods::standard_replies::wrapped_response_with_obj(
                        token_data,
                        msg,
                        StatusCode::OK,
                    )
                }
            }
        })
}
