use crate::{POOL, helper_model, methods, model};
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::Filter;
use warp::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
struct NewVehicleBodyData {
    title: String,
    description: Option<String>,
    category: Option<model::VehicleCategory>,
    vehicle_kind: model::VehicleKind,
    rent_type: Option<model::RentType>,
    base_price: f64,
    currency: Option<String>,
    hourly_price: Option<f64>,
    daily_price: Option<f64>,
    per_km_price: Option<f64>,
    #[serde(default)]
    driver_available: bool,
    driver_price: Option<f64>,
    driver_label: Option<String>,
    location: Option<String>,
    seats: Option<i32>,
}

pub fn main() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("new")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(async move |body: NewVehicleBodyData, auth: String, user_agent: String| {
            let (caller, token_data) = match methods::tokens::authenticate(&auth, &user_agent).await
            {
                Err(helper_model::ApiError::TokenFormatError) => {
                    return methods::tokens::token_not_hex_warp_return();
                }
                Err(_) => return methods::tokens::token_invalid_wrapped_return(),
                Ok(pair) => pair,
            };
            // Listings belong to business accounts.
            if caller.role == model::UserRole::User {
                return methods::standard_replies::wrapped_forbidden(
                    token_data,
                    "Only business accounts can list vehicles",
                );
            }

            if body.base_price < 0.0 || body.driver_price.unwrap_or(0.0) < 0.0 {
                return methods::standard_replies::wrapped_bad_request(
                    token_data,
                    "Prices cannot be negative",
                );
            }
            // rent_type travels with rentals and nothing else.
            match (body.vehicle_kind, body.rent_type) {
                (model::VehicleKind::Rent, None) => {
                    return methods::standard_replies::wrapped_bad_request(
                        token_data,
                        "rentType is required for rental vehicles",
                    );
                }
                (model::VehicleKind::Sell, Some(_)) | (model::VehicleKind::Service, Some(_)) => {
                    return methods::standard_replies::wrapped_bad_request(
                        token_data,
                        "rentType only applies to rental vehicles",
                    );
                }
                _ => {}
            }

            let new_vehicle = model::NewVehicle {
                owner_id: caller.id,
                title: body.title.clone(),
                description: body.description.clone(),
                category: body.category.unwrap_or(model::VehicleCategory::Other),
                vehicle_kind: body.vehicle_kind,
                rent_type: body.rent_type,
                base_price: body.base_price,
                currency: body.currency.clone().unwrap_or_else(|| String::from("₹")),
                hourly_price: body.hourly_price,
                daily_price: body.daily_price,
                per_km_price: body.per_km_price,
                driver_available: body.driver_available,
                driver_price: body.driver_price.unwrap_or(0.0),
                driver_label: body.driver_label.clone(),
                image_links: vec![],
                location: body.location.clone(),
                seats: body.seats.unwrap_or(4),
                is_published: true,
                is_deleted: false,
            };
            let mut pool = POOL.get().unwrap();
            let insert_result = spawn_blocking(move || {
                use crate::schema::vehicles::dsl::*;
                diesel::insert_into(vehicles)
                    .values(&new_vehicle)
                    .get_result::<model::Vehicle>(&mut pool)
            })
            .await
            .unwrap();
            match insert_result {
                Err(e) => methods::standard_replies::wrapped_internal_error(
                    token_data,
                    format!("vehicle/new: insert failed: {:?}", e),
                ),
                Ok(saved) => {
                    let msg = serde_json::json!({"vehicle": &saved});
                    methods::standard_replies::wrapped_response_with_obj(
                        token_data,
                        msg,
                        StatusCode::CREATED,
                    )
                }
            }
        })
}
