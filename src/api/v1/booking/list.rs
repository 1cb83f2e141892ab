use crate::{POOL, helper_model, methods, model};
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::Filter;
use warp::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
struct ListQuery {
    // "owner" lists bookings against the caller's vehicles; anything else
    // (or nothing) lists the caller's own reservations.
    side: Option<String>,
    status: Option<model::BookingStatus>,
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

            let as_owner = query.side.as_deref() == Some("owner");
            let caller_id = caller.id;
            let mut pool = POOL.get().unwrap();
            let list_result = spawn_blocking(move || {
                use crate::schema::bookings::dsl::*;
                let mut db_query = bookings.into_boxed();
                if as_owner {
                    db_query = db_query.filter(owner_id.eq(caller_id));
                } else {
                    db_query = db_query.filter(renter_id.eq(caller_id));
                }
                if let Some(wanted) = query.status {
                    db_query = db_query.filter(status.eq(wanted));
                }
                db_query
                    .order(created_at.desc())
                    .load::<model::Booking>(&mut pool)
            })
            .await
            .unwrap();
            match list_result {
                Err(e) => methods::standard_replies::wrapped_internal_error(
                    token_data,
                    format!("booking/list: query failed: {:?}", e),
                ),
                Ok(list) => {
                    let msg = serde_json::json!({"bookings": &list});
                    methods::standard_replies::wrapped_response_with_obj(
                        token_data,
                        msg,
                        StatusCode::OK,
                    )
                }
            }
        })
}
