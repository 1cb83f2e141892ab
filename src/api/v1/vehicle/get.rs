use crate::{POOL, methods, model};
use diesel::prelude::*;
use tokio::task::spawn_blocking;
use warp::Filter;
use warp::http::StatusCode;

// Public listing detail: the vehicle plus its display rate card. No auth.
pub fn main() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("get" / i32)
        .and(warp::get())
        .and_then(async move |vehicle_id: i32| {
            let mut pool = POOL.get().unwrap();
            let vehicle_result = spawn_blocking(move || {
                use crate::schema::vehicles::dsl::*;
                vehicles
                    .filter(id.eq(&vehicle_id))
                    .filter(is_deleted.eq(false))
                    .get_result::<model::Vehicle>(&mut pool)
                    .optional()
            })
            .await
            .unwrap();
            match vehicle_result {
                Err(e) => methods::standard_replies::internal_server_error_response(format!(
                    "vehicle/get: lookup failed: {:?}",
                    e
                )),
                Ok(None) => methods::standard_replies::not_found("Vehicle"),
                Ok(Some(vehicle)) => {
                    let options = methods::pricing::pricing_options(&vehicle);
                    let driver = methods::pricing::driver_pricing(&vehicle);
                    let msg = serde_json::json!({
                        "vehicle": &vehicle,
                        "pricing_options": &options,
                        "driver_pricing": &driver,
                    });
                    methods::standard_replies::response_with_obj(msg, StatusCode::OK)
                }
            }
        })
}
