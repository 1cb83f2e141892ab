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
        .and_then(async move |booking_request_id: i32, auth: String, user_agent: String| {
            let (caller, token_data) = match methods::tokens::authenticate(&auth, &user_agent).await
            {
                Err(helper_model::ApiError::TokenFormatError) => {
                    return methods::tokens::token_not_hex_warp_return();
                }
                Err(_) => return methods::tokens::token_invalid_wrapped_return(),
                Ok(pair) => pair,
            };

            let mut pool = POOL.get().unwrap();
            let request_result = spawn_blocking(move || {
                use crate::schema::booking_requests::dsl::*;
                booking_requests
                    .filter(id.eq(&booking_request_id))
                    .get_result::<model::BookingRequest>(&mut pool)
                    .optional()
            })
            .await
            .unwrap();
            match request_result {
                Err(e) => methods::standard_replies::wrapped_internal_error(
                    token_data,
                    format!("booking-request/get: lookup failed: {:?}", e),
                ),
                Ok(None) => methods::standard_replies::wrapped_not_found(token_data, "Booking"),
                Ok(Some(request)) => {
                    // A user only sees their own requests; admins see all.
                    if request.user_id != caller.id && !methods::user::user_is_admin(&caller) {
                        return methods::standard_replies::wrapped_forbidden(
                            token_data,
                            "Not authorized to view this booking",
                        );
                    }
                    let msg = serde_json::json!({"booking_request": &request});
                    methods::standard_replies::wrapped_response_with_obj(
                        token_data,
                        msg,
                        StatusCode::OK,
                    )
                }
            }
        })
}
