use crate::methods::tokens;
use crate::{helper_model, integration, model};
use warp::http::StatusCode;
use warp::{Rejection, Reply};

pub fn bad_request(err_msg: &str) -> Result<(warp::reply::Response,), Rejection> {
    let msg: helper_model::ErrorResponse = helper_model::ErrorResponse {
        title: String::from("Bad Request"),
        message: err_msg.to_string(),
    };
    Ok::<_, Rejection>((warp::reply::with_status(
        warp::reply::json(&msg),
        StatusCode::BAD_REQUEST,
    )
    .into_response(),))
}

pub fn not_found(what: &str) -> Result<(warp::reply::Response,), Rejection> {
    let msg: helper_model::ErrorResponse = helper_model::ErrorResponse {
        title: String::from("Not Found"),
        message: what.to_owned() + " not found",
    };
    Ok((warp::reply::with_status(warp::reply::json(&msg), StatusCode::NOT_FOUND)
        .into_response(),))
}

// State-guard and availability failures. The caller must re-fetch and decide.
pub fn conflict(err_msg: &str) -> Result<(warp::reply::Response,), Rejection> {
    let msg: helper_model::ErrorResponse = helper_model::ErrorResponse {
        title: String::from("Conflict"),
        message: err_msg.to_string(),
    };
    Ok((warp::reply::with_status(warp::reply::json(&msg), StatusCode::CONFLICT)
        .into_response(),))
}

pub fn internal_server_error_response(msg: String) -> Result<(warp::reply::Response,), Rejection> {
    let _ = tokio::spawn(async move {
        let dev = integration::sendgrid_wheelio::make_email_obj("dev@wheelio.app", "Wheelio Dev Team");
        let _ = integration::sendgrid_wheelio::send_email(
            Option::from("Wheelio Server"),
            dev,
            "Internal Server Error",
            &*msg,
            None,
            None,
        )
        .await;
    });
    let msg: helper_model::ErrorResponse = helper_model::ErrorResponse {
        title: String::from("Internal Server Error"),
        message: String::from("Please try again later. If issue present, contact us at dev@wheelio.app "),
    };
    Ok::<_, Rejection>((warp::reply::with_status(
        warp::reply::json(&msg),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
    .into_response(),))
}

pub fn response_with_obj<T>(
    obj: T,
    status_code: StatusCode,
) -> Result<(warp::reply::Response,), Rejection>
where
    T: serde::Serialize,
{
    Ok((warp::reply::with_status(warp::reply::json(&obj), status_code).into_response(),))
}

// Variants for authenticated endpoints: the token has already been rotated,
// so every reply (errors included) must carry the fresh one back.
pub fn wrapped_response_with_obj<T>(
    token_data: model::PublishAccessToken,
    obj: T,
    status_code: StatusCode,
) -> Result<(warp::reply::Response,), Rejection>
where
    T: serde::Serialize,
{
    Ok((tokens::wrap_json_reply_with_token(
        token_data,
        warp::reply::with_status(warp::reply::json(&obj), status_code),
    ),))
}

fn wrapped_error(
    token_data: model::PublishAccessToken,
    title: &str,
    err_msg: &str,
    status_code: StatusCode,
) -> Result<(warp::reply::Response,), Rejection> {
    let msg = helper_model::ErrorResponse {
        title: String::from(title),
        message: err_msg.to_string(),
    };
    Ok((tokens::wrap_json_reply_with_token(
        token_data,
        warp::reply::with_status(warp::reply::json(&msg), status_code),
    ),))
}

pub fn wrapped_bad_request(
    token_data: model::PublishAccessToken,
    err_msg: &str,
) -> Result<(warp::reply::Response,), Rejection> {
    wrapped_error(token_data, "Bad Request", err_msg, StatusCode::BAD_REQUEST)
}

pub fn wrapped_not_found(
    token_data: model::PublishAccessToken,
    what: &str,
) -> Result<(warp::reply::Response,), Rejection> {
    wrapped_error(
        token_data,
        "Not Found",
        &(what.to_owned() + " not found"),
        StatusCode::NOT_FOUND,
    )
}

pub fn wrapped_conflict(
    token_data: model::PublishAccessToken,
    err_msg: &str,
) -> Result<(warp::reply::Response,), Rejection> {
    wrapped_error(token_data, "Conflict", err_msg, StatusCode::CONFLICT)
}

pub fn wrapped_forbidden(
    token_data: model::PublishAccessToken,
    err_msg: &str,
) -> Result<(warp::reply::Response,), Rejection> {
    wrapped_error(token_data, "Permission Denied", err_msg, StatusCode::FORBIDDEN)
}

pub fn wrapped_internal_error(
    token_data: model::PublishAccessToken,
    context: String,
) -> Result<(warp::reply::Response,), Rejection> {
    let _ = tokio::spawn(async move {
        let dev = integration::sendgrid_wheelio::make_email_obj("dev@wheelio.app", "Wheelio Dev Team");
        let _ = integration::sendgrid_wheelio::send_email(
            Option::from("Wheelio Server"),
            dev,
            "Internal Server Error",
            &*context,
            None,
            None,
        )
        .await;
    });
    wrapped_error(
        token_data,
        "Internal Server Error",
        "Please try again later. If issue present, contact us at dev@wheelio.app ",
        StatusCode::INTERNAL_SERVER_ERROR,
    )
}
