use crate::{POOL, helper_model, methods, model};
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::Filter;
use warp::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
struct UpdatePushTokenBodyData {
    apns_token: Option<String>,
    expo_push_token: Option<String>,
}

// Registers the device endpoints that booking notifications are pushed to.
pub fn main() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("update-push-token")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(
            async move |body: UpdatePushTokenBodyData, auth: String, user_agent: String| {
                let (caller, token_data) =
                    match methods::tokens::authenticate(&auth, &user_agent).await {
                        Err(helper_model::ApiError::TokenFormatError) => {
                            return methods::tokens::token_not_hex_warp_return();
                        }
                        Err(_) => return methods::tokens::token_invalid_wrapped_return(),
                        Ok(pair) => pair,
                    };
                if body.apns_token.is_none() && body.expo_push_token.is_none() {
                    return methods::standard_replies::wrapped_bad_request(
                        token_data,
                        "Provide apnsToken or expoPushToken",
                    );
                }

                let new_apns = body.apns_token.clone().or(caller.apns_token.clone());
                let new_expo = body
                    .expo_push_token
                    .clone()
                    .or(caller.expo_push_token.clone());
                let caller_id = caller.id;
                let mut pool = POOL.get().unwrap();
                let update_result = spawn_blocking(move || {
                    use crate::schema::users::dsl::*;
                    diesel::update(users.filter(id.eq(&caller_id)))
                        .set((apns_token.eq(new_apns), expo_push_token.eq(new_expo)))
                        .get_result::<model::User>(&mut pool)
                })
                .await
                .unwrap();
                match update_result {
                    Err(e) => methods::standard_replies::wrapped_internal_error(
                        token_data,
                        format!("user/update-push-token: update failed: {:?}", e),
                    ),
                    Ok(updated) => {
                        let pub_user: model::PublishUser = updated.into();
                        let msg = serde_json::json!({"user": &pub_user});
                        methods::standard_replies::wrapped_response_with_obj(
                            token_data,
                            msg,
                            StatusCode::OK,
                        )
                    }
                }
            },
        )
}
