use diesel::prelude::*;
use rand::Rng;

use crate::POOL;

pub fn generate_unique_booking_confirmation() -> String {
    // Digits 0-9 and uppercase A-Z.
    let charset: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut rng = rand::rng();

    loop {
        let confirmation: String = (0..8)
            .map(|_| {
                let idx = rng.random_range(0..charset.len());
                charset[idx] as char
            })
            .collect();

        let exists = {
            let mut conn = POOL.get().expect("Failed to get DB connection");

            // If there's an error performing the query, treat it as
            // "exists = true" so we retry.
            diesel::select(diesel::dsl::exists(
                crate::schema::bookings::table
                    .filter(crate::schema::bookings::confirmation.eq(&confirmation)),
            ))
            .get_result::<bool>(&mut conn)
            .unwrap_or_else(|e| {
                eprintln!("Database error checking booking confirmation: {:?}", e);
                true
            })
        };

        if !exists {
            return confirmation;
        }
    }
}

// Guard-miss wording shared by both booking models; always names the current
// state and the state the transition needs.
pub fn guard_message(action: &str, current: &str, required: &str) -> String {
    format!(
        "Booking cannot be {}. Current status: {}. Booking must be {} first.",
        action, current, required
    )
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_message_names_both_states() {
        let msg = guard_message("approved", "rejected", "pending");
        assert_eq!(
            msg,
            "Booking cannot be approved. Current status: rejected. Booking must be pending first."
        );
    }

    #[test]
    fn guard_message_for_start() {
        let msg = guard_message("started", "pending", "approved");
        assert!(msg.contains("Current status: pending"));
        assert!(msg.contains("must be approved first"));
    }
}
