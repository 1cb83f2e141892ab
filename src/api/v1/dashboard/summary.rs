use crate::{POOL, helper_model, methods, model};
use chrono::{Datelike, TimeZone, Utc};
use diesel::prelude::*;
use tokio::task::spawn_blocking;
use warp::Filter;
use warp::http::StatusCode;

// Read-only KPI rollup across both booking models. "Active rental" merges
// the two status vocabularies: confirmed/in_progress on direct bookings and
// approved/ongoing on admin-mediated requests. Mutates nothing.
pub fn main() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("summary")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(async move |auth: String, user_agent: String| {
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

            let now = Utc::now();
            let start_of_month = Utc
                .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
                .unwrap();
            let mut pool = POOL.get().unwrap();
            let summary_result = spawn_blocking(move || -> QueryResult<helper_model::DashboardSummary> {
                let total_vehicles: i64 = {
                    use crate::schema::vehicles::dsl::*;
                    vehicles
                        .filter(is_deleted.eq(false))
                        .filter(is_published.eq(true))
                        .count()
                        .get_result(&mut pool)?
                };
                let vehicles_for_sale: i64 = {
                    use crate::schema::vehicles::dsl::*;
                    vehicles
                        .filter(is_deleted.eq(false))
                        .filter(is_published.eq(true))
                        .filter(vehicle_kind.eq(model::VehicleKind::Sell))
                        .count()
                        .get_result(&mut pool)?
                };
                let active_bookings: i64 = {
                    use crate::schema::bookings::dsl::*;
                    bookings
                        .filter(status.eq_any([
                            model::BookingStatus::Confirmed,
                            model::BookingStatus::InProgress,
                        ]))
                        .count()
                        .get_result(&mut pool)?
                };
                let active_requests: i64 = {
                    use crate::schema::booking_requests::dsl::*;
                    booking_requests
                        .filter(booking_status.eq_any([
                            model::RequestStatus::Approved,
                            model::RequestStatus::Ongoing,
                        ]))
                        .count()
                        .get_result(&mut pool)?
                };
                let pending_bookings: i64 = {
                    use crate::schema::bookings::dsl::*;
                    bookings
                        .filter(status.eq(model::BookingStatus::Pending))
                        .count()
                        .get_result(&mut pool)?
                };
                let pending_requests: i64 = {
                    use crate::schema::booking_requests::dsl::*;
                    booking_requests
                        .filter(booking_status.eq(model::RequestStatus::Pending))
                        .count()
                        .get_result(&mut pool)?
                };
                let total_users: i64 = {
                    use crate::schema::users::dsl::*;
                    users.count().get_result(&mut pool)?
                };
                // Direct bookings carry their frozen total; requests carry
                // the concrete price_amount column.
                let booking_revenue: Option<f64> = {
                    use crate::schema::bookings::dsl::*;
                    bookings
                        .filter(status.eq(model::BookingStatus::Completed))
                        .filter(created_at.ge(start_of_month))
                        .select(diesel::dsl::sum(total_price))
                        .get_result(&mut pool)?
                };
                let request_revenue: Option<f64> = {
                    use crate::schema::booking_requests::dsl::*;
                    booking_requests
                        .filter(booking_status.eq(model::RequestStatus::Completed))
                        .filter(payment_status.eq(model::RequestPaymentStatus::Paid))
                        .filter(created_at.ge(start_of_month))
                        .select(diesel::dsl::sum(price_amount))
                        .get_result(&mut pool)?
                };
                Ok(helper_model::DashboardSummary {
                    total_vehicles,
                    vehicles_for_sale,
                    active_rentals: active_bookings + active_requests,
                    pending_bookings: pending_bookings + pending_requests,
                    total_users,
                    monthly_revenue: booking_revenue.unwrap_or(0.0)
                        + request_revenue.unwrap_or(0.0),
                })
            })
            .await
            .unwrap();
            match summary_result {
                Err(e) => methods::standard_replies::wrapped_internal_error(
                    token_data,
                    format!("dashboard/summary: query failed: {:?}", e),
                ),
                Ok(summary) => {
                    let msg = serde_json::json!({"summary": &summary});
                    methods::standard_replies::wrapped_response_with_obj(
                        token_data,
                        msg,
                        StatusCode::OK,
                    )
                }
            }
        })
}
