use anyhow::Result;
use diesel::prelude::*;
use tokio::task::spawn_blocking;

use crate::model::{NewNotification, Notification, User};
use crate::{POOL, integration};

// Fire-and-forget: state transitions never wait on (or fail because of)
// notification delivery. The row insert and the pushes run on a detached
// task; anything that goes wrong is logged and swallowed.
pub fn dispatch(user: User, kind: String, title: String, message: String, booking_id: Option<i32>) {
    tokio::spawn(async move {
        if let Err(e) = create_and_send(&user, &kind, &title, &message, booking_id).await {
            eprintln!(
                "Notification dispatch failed for user {} ({}): {:?}",
                user.id, kind, e
            );
        }
    });
}

async fn create_and_send(
    user: &User,
    kind: &str,
    title: &str,
    message: &str,
    _booking_id: Option<i32>,
) -> Result<()> {
    let new_notification = NewNotification {
        user_id: user.id,
        kind: kind.to_string(),
        title: title.to_string(),
        message: message.to_string(),
        booking_id: _booking_id,
    };
    let mut pool = POOL.get()?;
    let saved = spawn_blocking(move || {
        use crate::schema::notifications::dsl::*;
        diesel::insert_into(notifications)
            .values(&new_notification)
            .get_result::<Notification>(&mut pool)
    })
    .await??;

    if let Some(apns) = user.apns_token.clone() {
        if let Err(e) = integration::apns_wheelio::send_notification(
            false,
            apns,
            title.to_string(),
            message.to_string(),
        )
        .await
        {
            eprintln!("APNs push failed for user {}: {:?}", user.id, e);
        }
    }
    if let Some(expo_token) = user.expo_push_token.clone() {
        let data = serde_json::json!({
            "notificationId": saved.id,
            "type": kind,
            "bookingId": _booking_id,
        });
        if let Err(e) =
            integration::expo_push_wheelio::send_push(&expo_token, title, message, data).await
        {
            eprintln!("Expo push failed for user {}: {:?}", user.id, e);
        }
    }
    println!(
        "Notification {} created for user {} ({})",
        saved.id, user.id, kind
    );
    Ok(())
}
