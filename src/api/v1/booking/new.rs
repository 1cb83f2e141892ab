use crate::methods::pricing::RentalWindow;
use crate::{POOL, helper_model, methods, model};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::Filter;
use warp::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
struct NewBookingBodyData {
    vehicle_id: i32,
    start_at: Option<DateTime<Utc>>,
    end_at: Option<DateTime<Utc>>,
    expected_km: Option<f64>,
    pickup_location: Option<String>,
    destination: Option<String>,
    #[serde(default)]
    driver_required: bool,
    payment_method: Option<model::BookingPaymentMethod>,
}

pub fn main() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("new")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(async move |body: NewBookingBodyData, auth: String, user_agent: String| {
            let (caller, token_data) = match methods::tokens::authenticate(&auth, &user_agent).await
            {
                Err(helper_model::ApiError::TokenFormatError) => {
                    return methods::tokens::token_not_hex_warp_return();
                }
                Err(_) => return methods::tokens::token_invalid_wrapped_return(),
                Ok(pair) => pair,
            };

            // Vehicle must be live and rentable before anything is priced.
            let vehicle_id_clone = body.vehicle_id;
            let mut pool = POOL.get().unwrap();
            let vehicle_result = spawn_blocking(move || {
                use crate::schema::vehicles::dsl::*;
                vehicles
                    .filter(id.eq(&vehicle_id_clone))
                    .filter(is_published.eq(true))
                    .filter(is_deleted.eq(false))
                    .get_result::<model::Vehicle>(&mut pool)
                    .optional()
            })
            .await
            .unwrap();
            let vehicle = match vehicle_result {
                Err(e) => {
                    return methods::standard_replies::wrapped_internal_error(
                        token_data,
                        format!("booking/new: vehicle lookup failed: {:?}", e),
                    );
                }
                Ok(None) => {
                    return methods::standard_replies::wrapped_not_found(token_data, "Vehicle");
                }
                Ok(Some(vehicle)) => vehicle,
            };
            if vehicle.vehicle_kind != model::VehicleKind::Rent {
                return methods::standard_replies::wrapped_bad_request(
                    token_data,
                    "This vehicle is not available for rent",
                );
            }

            let window = RentalWindow {
                start_at: body.start_at,
                end_at: body.end_at,
                expected_km: body.expected_km,
            };
            let quote =
                match methods::pricing::compute_price(&vehicle, &window, body.driver_required) {
                    Err(e) => {
                        return methods::standard_replies::wrapped_bad_request(
                            token_data,
                            e.message(),
                        );
                    }
                    Ok(quote) => quote,
                };

            // Timed rentals must not overlap an active booking on the same
            // vehicle. Distance/fixed rentals carry no window to check.
            if let (Some(start), Some(end)) = (body.start_at, body.end_at) {
                match methods::availability::has_conflict(vehicle.id, start, end).await {
                    Err(e) => {
                        return methods::standard_replies::wrapped_internal_error(
                            token_data,
                            format!("booking/new: conflict check failed: {:?}", e),
                        );
                    }
                    Ok(true) => {
                        let msg = helper_model::ErrorResponse {
                            title: String::from("Booking Not Allowed"),
                            message: String::from(
                                "Vehicle is not available for the selected time. Please try a different time.",
                            ),
                        };
                        return methods::standard_replies::wrapped_response_with_obj(
                            token_data,
                            msg,
                            StatusCode::CONFLICT,
                        );
                    }
                    Ok(false) => {}
                }
            }

            let new_booking = model::NewBooking {
                confirmation: methods::booking::generate_unique_booking_confirmation(),
                vehicle_id: vehicle.id,
                renter_id: caller.id,
                owner_id: vehicle.owner_id,
                start_at: body.start_at,
                end_at: body.end_at,
                expected_km: body.expected_km,
                pickup_location: body.pickup_location.clone(),
                destination: body.destination.clone(),
                driver_required: body.driver_required,
                vehicle_price: quote.vehicle_price,
                driver_price: quote.driver_price,
                total_price: quote.total_price,
                status: model::BookingStatus::Pending,
                payment_method: body
                    .payment_method
                    .unwrap_or(model::BookingPaymentMethod::Offline),
                payment_status: model::BookingPaymentStatus::Pending,
            };
            let mut pool = POOL.get().unwrap();
            let insert_result = spawn_blocking(move || {
                use crate::schema::bookings::dsl::*;
                diesel::insert_into(bookings)
                    .values(&new_booking)
                    .get_result::<model::Booking>(&mut pool)
            })
            .await
            .unwrap();
            match insert_result {
                Err(e) => methods::standard_replies::wrapped_internal_error(
                    token_data,
                    format!("booking/new: insert failed: {:?}", e),
                ),
                Ok(saved) => {
                    let msg = serde_json::json!({"booking": &saved});
                    methods::standard_replies::wrapped_response_with_obj(
                        token_data,
                        msg,
                        StatusCode::CREATED,
                    )
                }
            }
        })
}
