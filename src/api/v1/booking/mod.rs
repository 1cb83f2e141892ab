mod accept;
mod complete_trip;
mod decline;
mod get;
mod list;
mod new;
mod start_trip;

use warp::Filter;

pub fn api_v1_booking() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone
{
    warp::path("booking")
        .and(
            new::main()
                .or(accept::main())
                .or(decline::main())
                .or(start_trip::main())
                .or(complete_trip::main())
                .or(get::main())
                .or(list::main()),
        )
        .and(warp::path::end())
}
