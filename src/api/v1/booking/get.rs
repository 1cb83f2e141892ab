use crate::{POOL, helper_model, methods, model};
use diesel::prelude::*;
use tokio::task::spawn_blocking;
use warp::Filter;
use warp::http::StatusCode;

pub fn main() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("get" / i32)
        .and(warp::get())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(async move |booking_id: i32, auth: String, user_agent: String| {
            let (_caller, token_data) =
                match methods::tokens::authenticate(&auth, &user_agent).await {
                    Err(helper_model::ApiError::TokenFormatError) => {
                        return methods::tokens::token_not_hex_warp_return();
                    }
                    Err(_) => return methods::tokens::token_invalid_wrapped_return(),
                    Ok(pair) => pair,
                };

            let mut pool = POOL.get().unwrap();
            let booking_result = spawn_blocking(move || {
                use crate::schema::bookings::dsl::*;
                bookings
                    .filter(id.eq(&booking_id))
                    .get_result::<model::Booking>(&mut pool)
                    .optional()
            })
            .await
            .unwrap();
            match booking_result {
                Err(e) => methods::standard_replies::wrapped_internal_error(
                    token_data,
                    format!("booking/get: lookup failed: {:?}", e),
                ),
                Ok(None) => methods::standard_replies::wrapped_not_found(token_data, "Booking"),
                Ok(Some(booking)) => {
                    let msg = serde_json::json!({"booking": &booking});
                    methods::standard_replies::wrapped_response_with_obj(
                        token_data,
                        msg,
                        StatusCode::OK,
                    )
                }
            }
        })
}
