use crate::{POOL, helper_model, methods, model};
use chrono::Utc;
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::Filter;
use warp::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
struct AcceptBookingBodyData {
    booking_id: i32,
    driver_name: Option<String>,
    driver_phone: Option<String>,
    driver_license: Option<String>,
}

pub fn main() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("accept")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(async move |body: AcceptBookingBodyData, auth: String, user_agent: String| {
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
                        format!("booking/accept: lookup failed: {:?}", e),
                    );
                }
                Ok(None) => {
                    return methods::standard_replies::wrapped_not_found(token_data, "Booking");
                }
                Ok(Some(booking)) => booking,
            };
            // Only the vehicle owner recorded on the booking may accept it.
            if booking.owner_id != caller.id {
                return methods::standard_replies::wrapped_forbidden(
                    token_data,
                    "Not authorized to accept this booking",
                );
            }

            let assign_driver = booking.driver_required && body.driver_name.is_some();
            let mut pool = POOL.get().unwrap();
            // Conditional update: only a still-pending booking can be
            // confirmed, so concurrent accept/decline resolve to one winner.
            let update_result = spawn_blocking(move || {
                use crate::schema::bookings::dsl::*;
                diesel::update(
                    bookings
                        .filter(id.eq(&body.booking_id))
                        .filter(status.eq(model::BookingStatus::Pending)),
                )
                .set((
                    status.eq(model::BookingStatus::Confirmed),
                    owner_accepted.eq(true),
                    owner_accepted_at.eq(Some(Utc::now())),
                    driver_assigned.eq(assign_driver),
                    driver_name.eq(if assign_driver { body.driver_name.clone() } else { None }),
                    driver_phone.eq(if assign_driver { body.driver_phone.clone() } else { None }),
                    driver_license.eq(if assign_driver {
                        body.driver_license.clone()
                    } else {
                        None
                    }),
                ))
                .get_result::<model::Booking>(&mut pool)
                .optional()
            })
            .await
            .unwrap();
            match update_result {
                Err(e) => methods::standard_replies::wrapped_internal_error(
                    token_data,
                    format!("booking/accept: update failed: {:?}", e),
                ),
                Ok(None) => methods::standard_replies::wrapped_conflict(
                    token_data,
                    &methods::booking::guard_message(
                        "accepted",
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
