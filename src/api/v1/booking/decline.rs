use crate::{POOL, helper_model, methods, model};
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::Filter;
use warp::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
struct DeclineBookingBodyData {
    booking_id: i32,
}

pub fn main() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("decline")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(async move |body: DeclineBookingBodyData, auth: String, user_agent: String| {
            let (caller, token_data) = match methods::tokens::authenticate(&auth, &user_agent).await
            {
                Err(helper_model::ApiError::TokenFormatError) => {
                    return methods::tokens::token_not_hex_warp_return();
                }
                Err(_) => return methods::tokens::token_invalid_wrapped_return(),
                Ok(pair) => pair,
            };

            let booking_id_clone = body.booking_id;
            let mut pool = POOL.get().unwrap();
            let booking_result = spawn_blocking(move || {
                use crate::schema::bookings::dsl::*;
                bookings
                    .filter(id.eq(&booking_id_clone))
                    .get_result::<model::Booking>(&mut pool)
                    .optional()
            })
            .await
            .unwrap();
            let booking = match booking_result {
                Err(e) => {
                    return methods::standard_replies::wrapped_internal_error(
                        token_data,
                        format!("booking/decline: lookup failed: {:?}", e),
                    );
                }
                Ok(None) => {
                    return methods::standard_replies::wrapped_not_found(token_data, "Booking");
                }
                Ok(Some(booking)) => booking,
            };
            if booking.owner_id != caller.id {
                return methods::standard_replies::wrapped_forbidden(
                    token_data,
                    "Not authorized to decline this booking",
                );
            }

            let mut pool = POOL.get().unwrap();
            let update_result = spawn_blocking(move || {
                use crate::schema::bookings::dsl::*;
                diesel::update(
                    bookings
                        .filter(id.eq(&booking_id_clone))
                        .filter(status.eq(model::BookingStatus::Pending)),
                )
                .set(status.eq(model::BookingStatus::Cancelled))
                .get_result::<model::Booking>(&mut pool)
                .optional()
            })
            .await
            .unwrap();
            match update_result {
                Err(e) => methods::standard_replies::wrapped_internal_error(
                    token_data,
                    format!("booking/decline: update failed: {:?}", e),
                ),
                Ok(None) => methods::standard_replies::wrapped_conflict(
                    token_data,
                    &methods::booking::guard_message(
                        "declined",
                        booking.status.as_str(),
                        model::BookingStatus::Pending.as_str(),
                    ),
                ),
                Ok(Some(updated)) => {
                    let msg = serde_json::json!({"booking": &updated});
                    methods::standard_replies::wrapped_response_with_obj(
                        token_data,
                        msg,
                        StatusCode::OK,
                    )
                }
            }
        })
}
