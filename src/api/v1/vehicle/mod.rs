mod get;
mod new;
mod search;
mod upload_image;

use warp::Filter;

pub fn api_v1_vehicle() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone
{
    warp::path("vehicle")
        .and(
            new::main()
                .or(get::main())
                .or(search::main())
                .or(upload_image::main()),
        )
        .and(warp::path::end())
}
