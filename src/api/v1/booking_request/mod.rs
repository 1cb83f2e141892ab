mod approve;
mod complete;
mod get;
mod list;
mod new;
mod reject;
mod start;

use diesel::prelude::*;
use warp::Filter;

pub fn api_v1_booking_request()
-> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("booking-request")
        .and(
            new::main()
                .or(approve::main())
                .or(reject::main())
                .or(start::main())
                .or(complete::main())
                .or(get::main())
                .or(list::main()),
        )
        .and(warp::path::end())
}

// Vehicle title for notification copy; a missing vehicle must not stop the
// notification, so it degrades to a generic phrase.
pub(crate) async fn vehicle_title(_vehicle_id: i32) -> String {
    let mut pool = crate::POOL.get().unwrap();
    tokio::task::spawn_blocking(move || {
        use crate::schema::vehicles::dsl::*;
        vehicles
            .filter(id.eq(&_vehicle_id))
            .select(title)
            .get_result::<String>(&mut pool)
            .optional()
    })
    .await
    .unwrap()
    .ok()
    .flatten()
    .unwrap_or_else(|| String::from("your vehicle"))
}
