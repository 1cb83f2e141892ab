use crate::{POOL, helper_model, methods, model};
use chrono::Utc;
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::Filter;
use warp::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
struct StartRequestBodyData {
    booking_request_id: i32,
    admin_notes: Option<String>,
}

pub fn main() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("start")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(async move |body: StartRequestBodyData, auth: String, user_agent: String| {
            let (caller, token_data) = match methods::tokens::authenticate(&auth, &user_agent).await
            {
                Err(helper_model::ApiError::TokenFormatError) => {
                    return methods::tokens::token_not_hex_warp_return();
                }
                Err(_) => return methods::tokens::token_invalid_wrapped_return(),
                Ok(pair) => pair,
            };
            if !methods::user::user_is_admin(&caller) {
                return methods::user::user_not_admin_wrapped_return(token_data);
            }

            let request_id_clone = body.booking_request_id;
            let mut pool = POOL.get().unwrap();
            let request_result = spawn_blocking(move || {
                use crate::schema::booking_requests::dsl::*;
                booking_requests
                    .filter(id.eq(&request_id_clone))
                    .get_result::<model::BookingRequest>(&mut pool)
                    .optional()
            })
            .await
            .unwrap();
            let request = match request_result {
                Err(e) => {
                    return methods::standard_replies::wrapped_internal_error(
                        token_data,
                        format!("booking-request/start: lookup failed: {:?}", e),
                    );
                }
                Ok(None) => {
                    return methods::standard_replies::wrapped_not_found(token_data, "Booking");
                }
                Ok(Some(request)) => request,
            };

            let new_notes = body.admin_notes.clone().or(request.admin_notes.clone());
            let mut pool = POOL.get().unwrap();
            let update_result = spawn_blocking(move || {
                use crate::schema::booking_requests::dsl::*;
                diesel::update(
                    booking_requests
                        .filter(id.eq(&request_id_clone))
                        .filter(booking_status.eq(model::RequestStatus::Approved)),
                )
                .set((
                    booking_status.eq(model::RequestStatus::Ongoing),
                    started_at.eq(Some(Utc::now())),
                    updated_at.eq(Utc::now()),
                    admin_notes.eq(new_notes),
                ))
                .get_result::<model::BookingRequest>(&mut pool)
                .optional()
            })
            .await
            .unwrap();
            match update_result {
                Err(e) => methods::standard_replies::wrapped_internal_error(
                    token_data,
                    format!("booking-request/start: update failed: {:?}", e),
                ),
                Ok(None) => methods::standard_replies::wrapped_conflict(
                    token_data,
                    &methods::booking::guard_message(
                        "started",
                        request.booking_status.as_str(),
                        model::RequestStatus::Approved.as_str(),
                    ),
                ),
                Ok(Some(updated)) => {
                    notify_owner(&updated).await;
                    let msg = serde_json::json!({"booking_request": &updated});
                    methods::standard_replies::wrapped_response_with_obj(
                        token_data,
                        msg,
                        StatusCode::OK,
                    )
                }
            }
        })
}

async fn notify_owner(request: &model::BookingRequest) {
    let owner = match methods::user::get_user_by_id(&request.user_id).await {
        Err(e) => {
            eprintln!(
                "booking-request/start: owner {} not found for notification: {:?}",
                request.user_id, e
            );
            return;
        }
        Ok(owner) => owner,
    };
    let vehicle_title = super::vehicle_title(request.vehicle_id).await;
    methods::notifications::dispatch(
        owner,
        String::from("trip_started"),
        String::from("Trip Started"),
        format!("Your trip for {} has started. Have a safe ride!", vehicle_title),
        Some(request.id),
    );
}
