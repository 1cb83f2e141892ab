mod booking;
mod booking_request;
mod dashboard;
mod notification;
mod user;
mod vehicle;

use warp::Filter;

pub fn api_v1() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("v1")
        .and(
            user::api_v1_user()
                .or(vehicle::api_v1_vehicle())
                .or(booking::api_v1_booking())
                .or(booking_request::api_v1_booking_request())
                .or(notification::api_v1_notification())
                .or(dashboard::api_v1_dashboard()),
        )
        .and(warp::path::end())
}
