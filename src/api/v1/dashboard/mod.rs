mod summary;

use warp::Filter;

pub fn api_v1_dashboard()
-> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("dashboard")
        .and(summary::main())
        .and(warp::path::end())
}
