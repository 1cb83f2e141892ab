use serde_derive::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ErrorResponse {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    TokenFormatError,
    InvalidToken,
    Unexpected,
}

// The single applicable charge computed for a concrete booking. Frozen onto
// the booking row at creation time and never recomputed.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    pub vehicle_price: f64,
    pub driver_price: f64,
    pub total_price: f64,
}

// Display-only rate card entry ("₹400 per hour"); not used for charging.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PricingOption {
    pub label: String,
    pub price: f64,
    pub currency_symbol: String,
    pub display: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_vehicles: i64,
    pub vehicles_for_sale: i64,
    pub active_rentals: i64,
    pub pending_bookings: i64,
    pub total_users: i64,
    pub monthly_revenue: f64,
}
