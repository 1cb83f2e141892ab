mod create;
mod login;
mod update_push_token;

use warp::Filter;

pub fn api_v1_user() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone
{
    warp::path("user")
        .and(
            create::main()
                .or(login::main())
                .or(update_push_token::main()),
        )
        .and(warp::path::end())
}
