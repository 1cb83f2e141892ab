use chrono::{DateTime, Utc};
use currency_rs::Currency;

use crate::helper_model::{PriceQuote, PricingOption};
use crate::model::{RentType, Vehicle};

// The usage window a renter asks for. Hourly/daily rentals carry the time
// span; per-km rentals carry the expected distance instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RentalWindow {
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub expected_km: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingError {
    MissingWindow,
    NonPositiveDuration,
    NegativeDistance,
}

impl PricingError {
    pub fn message(&self) -> &'static str {
        match self {
            PricingError::MissingWindow => {
                "startAt and endAt are required for this rent type"
            }
            PricingError::NonPositiveDuration => "endAt must be after startAt",
            PricingError::NegativeDistance => "expectedKm cannot be negative",
        }
    }
}

const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;

// Partial units bill as full units: a 61 minute rental bills 2 hours.
fn billable_units(start: DateTime<Utc>, end: DateTime<Utc>, unit_seconds: i64) -> Result<i64, PricingError> {
    let seconds = (end - start).num_seconds();
    if seconds <= 0 {
        return Err(PricingError::NonPositiveDuration);
    }
    Ok((seconds + unit_seconds - 1) / unit_seconds)
}

// Derives the single applicable charge for a booking from the vehicle's rate
// card. The driver surcharge is a flat add-on, independent of rent type, and
// applies only when the renter asked for a driver AND the vehicle offers one.
pub fn compute_price(
    vehicle: &Vehicle,
    window: &RentalWindow,
    driver_requested: bool,
) -> Result<PriceQuote, PricingError> {
    let vehicle_price = match vehicle.rent_type {
        Some(RentType::Hourly) => {
            let (start, end) = match (window.start_at, window.end_at) {
                (Some(s), Some(e)) => (s, e),
                _ => return Err(PricingError::MissingWindow),
            };
            billable_units(start, end, SECONDS_PER_HOUR)? as f64 * vehicle.base_price
        }
        Some(RentType::Daily) => {
            let (start, end) = match (window.start_at, window.end_at) {
                (Some(s), Some(e)) => (s, e),
                _ => return Err(PricingError::MissingWindow),
            };
            billable_units(start, end, SECONDS_PER_DAY)? as f64 * vehicle.base_price
        }
        Some(RentType::PerKm) => {
            let km = window.expected_km.unwrap_or(0.0);
            if km < 0.0 {
                return Err(PricingError::NegativeDistance);
            }
            km * vehicle.base_price
        }
        // fixed rent, or a sell/service listing priced as-is
        Some(RentType::Fixed) | None => vehicle.base_price,
    };

    let driver_price = if driver_requested && vehicle.driver_available {
        vehicle.driver_price
    } else {
        0.0
    };

    Ok(PriceQuote {
        vehicle_price,
        driver_price,
        total_price: vehicle_price + driver_price,
    })
}

fn format_money(symbol: &str, amount: f64) -> String {
    format!("{}{}", symbol, Currency::new_float(amount, None).format())
}

// Display-only rate card: one entry per populated rate field so a client can
// show "₹400/hr, ₹2500/day" side by side. Only one rate ever applies to a
// concrete booking; these entries never feed compute_price.
pub fn pricing_options(vehicle: &Vehicle) -> Vec<PricingOption> {
    let mut options = Vec::new();
    let rates = [
        (vehicle.hourly_price, "per hour"),
        (vehicle.daily_price, "per day"),
        (vehicle.per_km_price, "per km"),
    ];
    for (price, label) in rates {
        if let Some(price) = price {
            options.push(PricingOption {
                label: label.to_string(),
                price,
                currency_symbol: vehicle.currency.clone(),
                display: format!("{} {}", format_money(&vehicle.currency, price), label),
            });
        }
    }
    options
}

// The driver rate is shown separately, never as a pricing-options member.
pub fn driver_pricing(vehicle: &Vehicle) -> Option<PricingOption> {
    if !vehicle.driver_available {
        return None;
    }
    let label = vehicle
        .driver_label
        .clone()
        .unwrap_or_else(|| String::from("with driver"));
    Some(PricingOption {
        price: vehicle.driver_price,
        currency_symbol: vehicle.currency.clone(),
        display: format!(
            "{} {}",
            format_money(&vehicle.currency, vehicle.driver_price),
            label
        ),
        label,
    })
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{VehicleCategory, VehicleKind};
    use chrono::TimeZone;

    fn rental_vehicle(rent_type: RentType, base_price: f64) -> Vehicle {
        Vehicle {
            id: 1,
            owner_id: 7,
            title: String::from("Swift Dzire"),
            description: None,
            category: VehicleCategory::Car,
            vehicle_kind: VehicleKind::Rent,
            rent_type: Some(rent_type),
            base_price,
            currency: String::from("₹"),
            hourly_price: None,
            daily_price: None,
            per_km_price: None,
            driver_available: false,
            driver_price: 0.0,
            driver_label: None,
            image_links: vec![],
            location: None,
            seats: 4,
            is_published: true,
            is_deleted: false,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn window(start: (u32, u32), end: (u32, u32)) -> RentalWindow {
        RentalWindow {
            start_at: Some(
                Utc.with_ymd_and_hms(2025, 6, 1, start.0, start.1, 0).unwrap(),
            ),
            end_at: Some(Utc.with_ymd_and_hms(2025, 6, 1, end.0, end.1, 0).unwrap()),
            expected_km: None,
        }
    }

    #[test]
    fn hourly_rounds_partial_hours_up() {
        let vehicle = rental_vehicle(RentType::Hourly, 100.0);
        // 09:00 to 10:31 is 91 minutes and bills as 2 hours
        let quote = compute_price(&vehicle, &window((9, 0), (10, 31)), false).unwrap();
        assert_eq!(quote.vehicle_price, 200.0);
        assert_eq!(quote.total_price, 200.0);
    }

    #[test]
    fn hourly_exact_hour_bills_one_unit() {
        let vehicle = rental_vehicle(RentType::Hourly, 400.0);
        let quote = compute_price(&vehicle, &window((9, 0), (10, 0)), false).unwrap();
        assert_eq!(quote.vehicle_price, 400.0);
    }

    #[test]
    fn daily_rounds_partial_days_up() {
        let vehicle = rental_vehicle(RentType::Daily, 2500.0);
        let w = RentalWindow {
            start_at: Some(Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()),
            end_at: Some(Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap()),
            expected_km: None,
        };
        // 25 hours bills 2 days
        let quote = compute_price(&vehicle, &w, false).unwrap();
        assert_eq!(quote.vehicle_price, 5000.0);
    }

    #[test]
    fn zero_duration_is_rejected_not_billed() {
        let vehicle = rental_vehicle(RentType::Hourly, 100.0);
        let result = compute_price(&vehicle, &window((9, 0), (9, 0)), false);
        assert_eq!(result, Err(PricingError::NonPositiveDuration));
    }

    #[test]
    fn reversed_window_is_rejected() {
        let vehicle = rental_vehicle(RentType::Daily, 100.0);
        let result = compute_price(&vehicle, &window((12, 0), (9, 0)), false);
        assert_eq!(result, Err(PricingError::NonPositiveDuration));
    }

    #[test]
    fn missing_window_is_rejected_for_timed_rentals() {
        let vehicle = rental_vehicle(RentType::Hourly, 100.0);
        let w = RentalWindow { start_at: None, end_at: None, expected_km: None };
        assert_eq!(compute_price(&vehicle, &w, false), Err(PricingError::MissingWindow));
    }

    #[test]
    fn per_km_multiplies_expected_distance() {
        let vehicle = rental_vehicle(RentType::PerKm, 12.0);
        let w = RentalWindow { start_at: None, end_at: None, expected_km: Some(30.0) };
        let quote = compute_price(&vehicle, &w, false).unwrap();
        assert_eq!(quote.vehicle_price, 360.0);
    }

    #[test]
    fn per_km_defaults_missing_distance_to_zero() {
        let vehicle = rental_vehicle(RentType::PerKm, 12.0);
        let w = RentalWindow { start_at: None, end_at: None, expected_km: None };
        let quote = compute_price(&vehicle, &w, false).unwrap();
        assert_eq!(quote.vehicle_price, 0.0);
        assert_eq!(quote.total_price, 0.0);
    }

    #[test]
    fn driver_surcharge_applies_on_fixed_rentals() {
        let mut vehicle = rental_vehicle(RentType::Fixed, 5000.0);
        vehicle.driver_available = true;
        vehicle.driver_price = 50.0;
        let w = RentalWindow { start_at: None, end_at: None, expected_km: None };
        let quote = compute_price(&vehicle, &w, true).unwrap();
        assert_eq!(quote.vehicle_price, 5000.0);
        assert_eq!(quote.driver_price, 50.0);
        assert_eq!(quote.total_price, 5050.0);
    }

    #[test]
    fn driver_surcharge_needs_vehicle_offering_a_driver() {
        let vehicle = rental_vehicle(RentType::Fixed, 5000.0);
        let w = RentalWindow { start_at: None, end_at: None, expected_km: None };
        let quote = compute_price(&vehicle, &w, true).unwrap();
        assert_eq!(quote.driver_price, 0.0);
        assert_eq!(quote.total_price, 5000.0);
    }

    #[test]
    fn driver_surcharge_needs_renter_asking() {
        let mut vehicle = rental_vehicle(RentType::Hourly, 100.0);
        vehicle.driver_available = true;
        vehicle.driver_price = 75.0;
        let quote = compute_price(&vehicle, &window((9, 0), (10, 0)), false).unwrap();
        assert_eq!(quote.driver_price, 0.0);
    }

    #[test]
    fn pricing_options_lists_only_populated_rates() {
        let mut vehicle = rental_vehicle(RentType::Hourly, 400.0);
        vehicle.hourly_price = Some(400.0);
        vehicle.daily_price = Some(2500.0);
        let options = pricing_options(&vehicle);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].label, "per hour");
        assert_eq!(options[0].price, 400.0);
        assert_eq!(options[1].label, "per day");
        assert_eq!(options[1].price, 2500.0);
    }

    #[test]
    fn driver_pricing_is_separate_from_options() {
        let mut vehicle = rental_vehicle(RentType::Hourly, 400.0);
        vehicle.hourly_price = Some(400.0);
        vehicle.driver_available = true;
        vehicle.driver_price = 300.0;
        vehicle.driver_label = Some(String::from("per day with driver"));
        assert_eq!(pricing_options(&vehicle).len(), 1);
        let driver = driver_pricing(&vehicle).unwrap();
        assert_eq!(driver.price, 300.0);
        assert_eq!(driver.label, "per day with driver");
    }

    #[test]
    fn no_driver_pricing_when_unavailable() {
        let vehicle = rental_vehicle(RentType::Hourly, 400.0);
        assert!(driver_pricing(&vehicle).is_none());
    }
}
