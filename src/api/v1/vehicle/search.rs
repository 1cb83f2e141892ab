use crate::{POOL, methods, model};
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::Filter;
use warp::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
struct SearchQuery {
    category: Option<model::VehicleCategory>,
    vehicle_kind: Option<model::VehicleKind>,
    rent_type: Option<model::RentType>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    driver_available: Option<bool>,
    q: Option<String>,
}

// Public catalog search over published, non-deleted listings.
pub fn main() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("search")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<SearchQuery>())
        .and_then(async move |query: SearchQuery| {
            let mut pool = POOL.get().unwrap();
            let list_result = spawn_blocking(move || {
                use crate::schema::vehicles::dsl::*;
                let mut db_query = vehicles
                    .filter(is_published.eq(true))
                    .filter(is_deleted.eq(false))
                    .into_boxed();
                if let Some(wanted) = query.category {
                    db_query = db_query.filter(category.eq(wanted));
                }
                if let Some(wanted) = query.vehicle_kind {
                    db_query = db_query.filter(vehicle_kind.eq(wanted));
                }
                if let Some(wanted) = query.rent_type {
                    db_query = db_query.filter(rent_type.eq(wanted));
                }
                if let Some(min) = query.min_price {
                    db_query = db_query.filter(base_price.ge(min));
                }
                if let Some(max) = query.max_price {
                    db_query = db_query.filter(base_price.le(max));
                }
                if let Some(wanted) = query.driver_available {
                    db_query = db_query.filter(driver_available.eq(wanted));
                }
                if let Some(needle) = query.q {
                    let pattern = format!("%{}%", needle);
                    db_query = db_query.filter(
                        title
                            .ilike(pattern.clone())
                            .or(description.ilike(pattern)),
                    );
                }
                db_query
                    .order(created_at.desc())
                    .load::<model::Vehicle>(&mut pool)
            })
            .await
            .unwrap();
            match list_result {
                Err(e) => methods::standard_replies::internal_server_error_response(format!(
                    "vehicle/search: query failed: {:?}",
                    e
                )),
                Ok(list) => {
                    let msg = serde_json::json!({"vehicles": &list});
                    methods::standard_replies::response_with_obj(msg, StatusCode::OK)
                }
            }
        })
}
