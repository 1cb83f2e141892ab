use crate::{POOL, helper_model, integration, methods, model};
use bytes::BufMut;
use diesel::prelude::*;
use futures::TryStreamExt;
use tokio::task::spawn_blocking;
use warp::Filter;
use warp::http::StatusCode;
use warp::multipart::FormData;

const MAX_DOCUMENT_IMAGES: usize = 5;

// Text fields plus up to five document images (Aadhaar, PAN, RC and the
// like) arrive together as multipart/form-data.
struct ParsedForm {
    phone: Option<String>,
    email: Option<String>,
    description: Option<String>,
    vehicle_id: Option<i32>,
    payment_method: Option<model::RequestPaymentMethod>,
    price_amount: Option<f64>,
    documents: Vec<(String, Vec<u8>)>,
}

fn parse_form(fields: Vec<(String, Option<String>, Vec<u8>)>) -> Result<ParsedForm, &'static str> {
    let mut parsed = ParsedForm {
        phone: None,
        email: None,
        description: None,
        vehicle_id: None,
        payment_method: None,
        price_amount: None,
        documents: Vec::new(),
    };
    for (field_name, file_name, data) in fields {
        match field_name.as_str() {
            "phone" => parsed.phone = Some(String::from_utf8_lossy(&data).to_string()),
            "email" => parsed.email = Some(String::from_utf8_lossy(&data).to_string()),
            "description" => {
                parsed.description = Some(String::from_utf8_lossy(&data).to_string())
            }
            "vehicle_id" => {
                parsed.vehicle_id = Some(
                    String::from_utf8_lossy(&data)
                        .parse::<i32>()
                        .map_err(|_| "vehicle_id must be a number")?,
                )
            }
            "payment_method" => {
                parsed.payment_method = Some(match &*String::from_utf8_lossy(&data) {
                    "online" => model::RequestPaymentMethod::Online,
                    "pay_to_driver" => model::RequestPaymentMethod::PayToDriver,
                    _ => return Err("paymentMethod must be either \"online\" or \"pay_to_driver\""),
                })
            }
            "price_amount" => {
                parsed.price_amount = Some(
                    String::from_utf8_lossy(&data)
                        .parse::<f64>()
                        .map_err(|_| "price_amount must be a number")?,
                )
            }
            "document_images" => {
                let file_name = file_name.unwrap_or_else(|| String::from("document.jpg"));
                parsed.documents.push((file_name, data));
            }
            _ => {}
        }
    }
    Ok(parsed)
}

pub fn main() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("new")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::multipart::form().max_length(20 * 1024 * 1024))
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
                    // field.data() only returns a piece of the content, keep
                    // calling until it replies None
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
            let parsed = match parse_form(fields) {
                Err(msg) => {
                    return methods::standard_replies::wrapped_bad_request(token_data, msg);
                }
                Ok(parsed) => parsed,
            };

            let (phone, email, vehicle_id_value, payment_method) = match (
                parsed.phone.clone(),
                parsed.email.clone(),
                parsed.vehicle_id,
                parsed.payment_method,
            ) {
                (Some(phone), Some(email), Some(vehicle_id_value), Some(payment_method)) => {
                    (phone, email, vehicle_id_value, payment_method)
                }
                _ => {
                    return methods::standard_replies::wrapped_bad_request(
                        token_data,
                        "Missing required fields: phone, email, vehicle_id, payment_method",
                    );
                }
            };
            if !methods::user::email_is_valid(&email) {
                return methods::standard_replies::wrapped_bad_request(
                    token_data,
                    "Invalid email format",
                );
            }
            if parsed.documents.len() > MAX_DOCUMENT_IMAGES {
                return methods::standard_replies::wrapped_bad_request(
                    token_data,
                    "Maximum 5 document images allowed",
                );
            }

            // A request may target any listed vehicle, published or not; the
            // admin decides whether it can be honored.
            let mut pool = POOL.get().unwrap();
            let vehicle_result = spawn_blocking(move || {
                use crate::schema::vehicles::dsl::*;
                vehicles
                    .filter(id.eq(&vehicle_id_value))
                    .get_result::<model::Vehicle>(&mut pool)
                    .optional()
            })
            .await
            .unwrap();
            let vehicle = match vehicle_result {
                Err(e) => {
                    return methods::standard_replies::wrapped_internal_error(
                        token_data,
                        format!("booking-request/new: vehicle lookup failed: {:?}", e),
                    );
                }
                Ok(None) => {
                    return methods::standard_replies::wrapped_not_found(token_data, "Vehicle");
                }
                Ok(Some(vehicle)) => vehicle,
            };

            // Upload order determines the stored order.
            let mut document_images: Vec<String> = Vec::new();
            for (file_name, data) in parsed.documents {
                let stored_path = integration::gcloud_storage_wheelio::upload_file(
                    "booking_docs/".to_string(),
                    file_name,
                    data,
                )
                .await;
                document_images.push(stored_path);
            }

            let new_request = model::NewBookingRequest {
                user_id: caller.id,
                vehicle_id: vehicle.id,
                phone,
                email,
                description: parsed.description.clone(),
                document_images,
                payment_method,
                booking_status: model::RequestStatus::Pending,
                payment_status: model::RequestPaymentStatus::Unpaid,
                price_amount: parsed.price_amount,
                price_currency: vehicle.currency.clone(),
            };
            let mut pool = POOL.get().unwrap();
            let insert_result = spawn_blocking(move || {
                use crate::schema::booking_requests::dsl::*;
                diesel::insert_into(booking_requests)
                    .values(&new_request)
                    .get_result::<model::BookingRequest>(&mut pool)
            })
            .await
            .unwrap();
            match insert_result {
                Err(e) => methods::standard_replies::wrapped_internal_error(
                    token_data,
                    format!("booking-request/new: insert failed: {:?}", e),
                ),
                Ok(saved) => {
                    methods::notifications::dispatch(
                        caller,
                        String::from("booking_created"),
                        String::from("Booking Received"),
                        format!(
                            "Your booking request for {} has been received and is awaiting approval.",
                            vehicle.title
                        ),
                        Some(saved.id),
                    );
                    let msg = serde_json::json!({"booking_request": &saved});
                    methods::standard_replies::wrapped_response_with_obj(
                        token_data,
                        msg,
                        StatusCode::CREATED,
                    )
                }
            }
        })
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    fn text_field(field_name: &str, value: &str) -> (String, Option<String>, Vec<u8>) {
        (field_name.to_string(), None, value.as_bytes().to_vec())
    }

    fn file_field(file_name: &str) -> (String, Option<String>, Vec<u8>) {
        (
            String::from("document_images"),
            Some(file_name.to_string()),
            vec![0xFF, 0xD8],
        )
    }

    #[test]
    fn parses_fields_and_keeps_document_order() {
        let parsed = parse_form(vec![
            text_field("phone", "+919876543210"),
            text_field("email", "rider@example.com"),
            text_field("vehicle_id", "42"),
            text_field("payment_method", "pay_to_driver"),
            file_field("aadhaar.jpg"),
            file_field("pan.jpg"),
            file_field("rc.jpg"),
        ])
        .unwrap();
        assert_eq!(parsed.vehicle_id, Some(42));
        assert_eq!(
            parsed.payment_method,
            Some(model::RequestPaymentMethod::PayToDriver)
        );
        let names: Vec<_> = parsed.documents.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["aadhaar.jpg", "pan.jpg", "rc.jpg"]);
    }

    #[test]
    fn rejects_unknown_payment_method() {
        let result = parse_form(vec![text_field("payment_method", "cash")]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_non_numeric_vehicle_id() {
        let result = parse_form(vec![text_field("vehicle_id", "abc")]);
        assert!(result.is_err());
    }
}
