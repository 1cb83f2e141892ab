use crate::{POOL, helper_model, integration, methods, model};
use bytes::BufMut;
use diesel::prelude::*;
use futures::TryStreamExt;
use tokio::task::spawn_blocking;
use warp::Filter;
use warp::http::StatusCode;
use warp::multipart::FormData;

pub fn main() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("upload-image")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::multipart::form().max_length(5 * 1024 * 1024))
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(async move |form: FormData, auth: String, user_agent: String| {
            let (caller, token_data) = match methods::tokens::authenticate(&auth, &user_agent).await
            {
                Err(helper_model::ApiError::TokenFormatError) => {
                    return methods::tokens::token_not_hex_warp_return();
                }
                Err(_) => return methods::tokens::token_invalid_wrapped_return(),
                Ok(pair) => pair,
            };

            let fields_result: Result<Vec<(String, Option<String>, Vec<u8>)>, warp::Error> = form
                .and_then(|mut field| async move {
                    let mut data: Vec<u8> = Vec::new();
                    while let Some(content) = field.data().await {
                        let content = content?;
                        data.put(content);
                    }
                    Ok((
                        field.name().to_string(),
                        field.filename().map(|f| f.to_string()),
                        data,
                    ))
                })
                .try_collect()
                .await;
            let fields = match fields_result {
                Err(_) => {
                    return methods::standard_replies::wrapped_bad_request(
                        token_data,
                        "Malformed multipart form data",
                    );
                }
                Ok(fields) => fields,
            };

            let mut vehicle_id_value: Option<i32> = None;
            let mut image: Option<(String, Vec<u8>)> = None;
            for (field_name, file_name, data) in fields {
                match field_name.as_str() {
                    "vehicle_id" => {
                        vehicle_id_value = String::from_utf8_lossy(&data).parse::<i32>().ok()
                    }
                    "image" => {
                        image = Some((
                            file_name.unwrap_or_else(|| String::from("vehicle.jpg")),
                            data,
                        ))
                    }
                    _ => {}
                }
            }
            let Some(vehicle_id_value) = vehicle_id_value else {
                return methods::standard_replies::wrapped_bad_request(
                    token_data,
                    "vehicle_id is required",
                );
            };
            let Some((file_name, data)) = image else {
                return methods::standard_replies::wrapped_bad_request(
                    token_data,
                    "Please upload exactly one image",
                );
            };

            let mut pool = POOL.get().unwrap();
            let vehicle_result = spawn_blocking(move || {
                use crate::schema::vehicles::dsl::*;
                vehicles
                    .filter(id.eq(&vehicle_id_value))
                    .filter(is_deleted.eq(false))
                    .get_result::<model::Vehicle>(&mut pool)
                    .optional()
            })
            .await
            .unwrap();
            let vehicle = match vehicle_result {
                Err(e) => {
                    return methods::standard_replies::wrapped_internal_error(
                        token_data,
                        format!("vehicle/upload-image: lookup failed: {:?}", e),
                    );
                }
                Ok(None) => {
                    return methods::standard_replies::wrapped_not_found(token_data, "Vehicle");
                }
                Ok(Some(vehicle)) => vehicle,
            };
            if vehicle.owner_id != caller.id && !methods::user::user_is_admin(&caller) {
                return methods::standard_replies::wrapped_forbidden(
                    token_data,
                    "Not authorized to modify this vehicle",
                );
            }

            let stored_path = integration::gcloud_storage_wheelio::upload_file(
                "vehicle_images/".to_string(),
                file_name,
                data,
            )
            .await;

            let mut new_links = vehicle.image_links.clone();
            new_links.push(stored_path);
            let mut pool = POOL.get().unwrap();
            let update_result = spawn_blocking(move || {
                use crate::schema::vehicles::dsl::*;
                diesel::update(vehicles.filter(id.eq(&vehicle_id_value)))
                    .set(image_links.eq(new_links))
                    .get_result::<model::Vehicle>(&mut pool)
            })
            .await
            .unwrap();
            match update_result {
                Err(e) => methods::standard_replies::wrapped_internal_error(
                    token_data,
                    format!("vehicle/upload-image: update failed: {:?}", e),
                ),
                Ok(updated) => {
                    let msg = serde_json::json!({"vehicle": &updated});
                    methods::standard_replies::wrapped_response_with_obj(
                        token_data,
                        msg,
                        StatusCode::OK,
                    )
                }
            }
        })
}
