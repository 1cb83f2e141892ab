use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

// Diesel requires us to define a custom mapping between the Rust enum
// and the database type, if we are not using string.
use crate::schema::*;
use diesel::deserialize::{self, FromSql};
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, Output, ToSql};
use diesel::{AsExpression, FromSqlRow};
use std::io::Write;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::UserRoleEnum)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    User,
    Client, // vehicle owner / business account
    Admin,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::VehicleCategoryEnum)]
#[serde(rename_all = "snake_case")]
pub enum VehicleCategory {
    Bike,
    Car,
    Auto,
    Other,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::VehicleKindEnum)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    Rent,
    Sell,
    Service,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::RentTypeEnum)]
#[serde(rename_all = "snake_case")]
pub enum RentType {
    Hourly,
    Daily,
    PerKm,
    Fixed,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::BookingStatusEnum)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::BookingPaymentMethodEnum)]
#[serde(rename_all = "snake_case")]
pub enum BookingPaymentMethod {
    Online,
    Offline,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::BookingPaymentStatusEnum)]
#[serde(rename_all = "snake_case")]
pub enum BookingPaymentStatus {
    Pending,
    Paid,
    Failed,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::RequestStatusEnum)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Ongoing,
    Completed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Ongoing => "ongoing",
            RequestStatus::Completed => "completed",
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::RequestPaymentMethodEnum)]
#[serde(rename_all = "snake_case")]
pub enum RequestPaymentMethod {
    Online,
    PayToDriver,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::RequestPaymentStatusEnum)]
#[serde(rename_all = "snake_case")]
pub enum RequestPaymentStatus {
    Unpaid,
    Paid,
}

//This is for postgres. For other databases the type might be different.
impl ToSql<sql_types::UserRoleEnum, Pg> for UserRole {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            UserRole::User => out.write_all(b"user")?,
            UserRole::Client => out.write_all(b"client")?,
            UserRole::Admin => out.write_all(b"admin")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::UserRoleEnum, Pg> for UserRole {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"user" => Ok(UserRole::User),
            b"client" => Ok(UserRole::Client),
            b"admin" => Ok(UserRole::Admin),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}
// The following is the traits implementation for other Enums.
impl ToSql<sql_types::VehicleCategoryEnum, Pg> for VehicleCategory {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            VehicleCategory::Bike => out.write_all(b"bike")?,
            VehicleCategory::Car => out.write_all(b"car")?,
            VehicleCategory::Auto => out.write_all(b"auto")?,
            VehicleCategory::Other => out.write_all(b"other")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::VehicleCategoryEnum, Pg> for VehicleCategory {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"bike" => Ok(VehicleCategory::Bike),
            b"car" => Ok(VehicleCategory::Car),
            b"auto" => Ok(VehicleCategory::Auto),
            b"other" => Ok(VehicleCategory::Other),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<sql_types::VehicleKindEnum, Pg> for VehicleKind {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            VehicleKind::Rent => out.write_all(b"rent")?,
            VehicleKind::Sell => out.write_all(b"sell")?,
            VehicleKind::Service => out.write_all(b"service")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::VehicleKindEnum, Pg> for VehicleKind {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"rent" => Ok(VehicleKind::Rent),
            b"sell" => Ok(VehicleKind::Sell),
            b"service" => Ok(VehicleKind::Service),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<sql_types::RentTypeEnum, Pg> for RentType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            RentType::Hourly => out.write_all(b"hourly")?,
            RentType::Daily => out.write_all(b"daily")?,
            RentType::PerKm => out.write_all(b"per_km")?,
            RentType::Fixed => out.write_all(b"fixed")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::RentTypeEnum, Pg> for RentType {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"hourly" => Ok(RentType::Hourly),
            b"daily" => Ok(RentType::Daily),
            b"per_km" => Ok(RentType::PerKm),
            b"fixed" => Ok(RentType::Fixed),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<sql_types::BookingStatusEnum, Pg> for BookingStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::BookingStatusEnum, Pg> for BookingStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"pending" => Ok(BookingStatus::Pending),
            b"confirmed" => Ok(BookingStatus::Confirmed),
            b"in_progress" => Ok(BookingStatus::InProgress),
            b"completed" => Ok(BookingStatus::Completed),
            b"cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<sql_types::BookingPaymentMethodEnum, Pg> for BookingPaymentMethod {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            BookingPaymentMethod::Online => out.write_all(b"online")?,
            BookingPaymentMethod::Offline => out.write_all(b"offline")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::BookingPaymentMethodEnum, Pg> for BookingPaymentMethod {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"online" => Ok(BookingPaymentMethod::Online),
            b"offline" => Ok(BookingPaymentMethod::Offline),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<sql_types::BookingPaymentStatusEnum, Pg> for BookingPaymentStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            BookingPaymentStatus::Pending => out.write_all(b"pending")?,
            BookingPaymentStatus::Paid => out.write_all(b"paid")?,
            BookingPaymentStatus::Failed => out.write_all(b"failed")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::BookingPaymentStatusEnum, Pg> for BookingPaymentStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"pending" => Ok(BookingPaymentStatus::Pending),
            b"paid" => Ok(BookingPaymentStatus::Paid),
            b"failed" => Ok(BookingPaymentStatus::Failed),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<sql_types::RequestStatusEnum, Pg> for RequestStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::RequestStatusEnum, Pg> for RequestStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"pending" => Ok(RequestStatus::Pending),
            b"approved" => Ok(RequestStatus::Approved),
            b"rejected" => Ok(RequestStatus::Rejected),
            b"ongoing" => Ok(RequestStatus::Ongoing),
            b"completed" => Ok(RequestStatus::Completed),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<sql_types::RequestPaymentMethodEnum, Pg> for RequestPaymentMethod {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            RequestPaymentMethod::Online => out.write_all(b"online")?,
            RequestPaymentMethod::PayToDriver => out.write_all(b"pay_to_driver")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::RequestPaymentMethodEnum, Pg> for RequestPaymentMethod {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"online" => Ok(RequestPaymentMethod::Online),
            b"pay_to_driver" => Ok(RequestPaymentMethod::PayToDriver),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<sql_types::RequestPaymentStatusEnum, Pg> for RequestPaymentStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            RequestPaymentStatus::Unpaid => out.write_all(b"unpaid")?,
            RequestPaymentStatus::Paid => out.write_all(b"paid")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::RequestPaymentStatusEnum, Pg> for RequestPaymentStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"unpaid" => Ok(RequestPaymentStatus::Unpaid),
            b"paid" => Ok(RequestPaymentStatus::Paid),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String, // Hashed!
    pub phone: String,
    pub role: UserRole,
    pub business_name: Option<String>,
    pub profile_image: Option<String>,
    pub apns_token: Option<String>,
    pub expo_push_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub business_name: Option<String>,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublishUser {
    fn from(user: User) -> Self {
        PublishUser {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role,
            business_name: user.business_name,
            profile_image: user.profile_image,
            created_at: user.created_at,
        }
    }
}

#[derive(Insertable, Debug, Clone, Deserialize, Serialize)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String, // Hash this before inserting!
    pub phone: String,
    pub role: UserRole,
    pub business_name: Option<String>,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(belongs_to(User))]
#[diesel(table_name = access_tokens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AccessToken {
    pub id: i32,
    pub user_id: i32,
    pub token: Vec<u8>,
    pub exp: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(belongs_to(User))]
#[diesel(table_name = access_tokens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAccessToken {
    pub user_id: i32,
    pub token: Vec<u8>,
    pub exp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishAccessToken {
    pub token: String,
    pub exp: DateTime<Utc>,
}

impl From<AccessToken> for PublishAccessToken {
    fn from(token: AccessToken) -> Self {
        PublishAccessToken {
            token: hex::encode(token.token),
            exp: token.exp,
        }
    }
}

// Parsed out of the `auth` header: "<hex token>$<user id>".
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RequestToken {
    pub user_id: i32,
    pub token: String,
}

#[derive(
    Queryable, Identifiable, Associations, Debug, Clone, PartialEq, Serialize, Deserialize,
)]
#[diesel(belongs_to(User, foreign_key = owner_id))]
#[diesel(table_name = vehicles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Vehicle {
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub category: VehicleCategory,
    pub vehicle_kind: VehicleKind,
    pub rent_type: Option<RentType>,
    pub base_price: f64,
    pub currency: String,
    pub hourly_price: Option<f64>,
    pub daily_price: Option<f64>,
    pub per_km_price: Option<f64>,
    pub driver_available: bool,
    pub driver_price: f64,
    pub driver_label: Option<String>,
    pub image_links: Vec<String>,
    pub location: Option<String>,
    pub seats: i32,
    pub is_published: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(belongs_to(User, foreign_key = owner_id))]
#[diesel(table_name = vehicles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewVehicle {
    pub owner_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub category: VehicleCategory,
    pub vehicle_kind: VehicleKind,
    pub rent_type: Option<RentType>,
    pub base_price: f64,
    pub currency: String,
    pub hourly_price: Option<f64>,
    pub daily_price: Option<f64>,
    pub per_km_price: Option<f64>,
    pub driver_available: bool,
    pub driver_price: f64,
    pub driver_label: Option<String>,
    pub image_links: Vec<String>,
    pub location: Option<String>,
    pub seats: i32,
    pub is_published: bool,
    pub is_deleted: bool,
}

#[derive(
    Queryable, Identifiable, Associations, Debug, Clone, PartialEq, Serialize, Deserialize,
)]
#[diesel(belongs_to(Vehicle))]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Booking {
    pub id: i32,
    pub confirmation: String,
    pub vehicle_id: i32,
    pub renter_id: i32,
    pub owner_id: i32,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub expected_km: Option<f64>,
    pub actual_km: Option<f64>,
    pub pickup_location: Option<String>,
    pub destination: Option<String>,
    pub driver_required: bool,
    pub driver_assigned: bool,
    pub driver_name: Option<String>,
    pub driver_phone: Option<String>,
    pub driver_license: Option<String>,
    pub vehicle_price: f64,
    pub driver_price: f64,
    pub total_price: f64,
    pub status: BookingStatus,
    pub owner_accepted: bool,
    pub owner_accepted_at: Option<DateTime<Utc>>,
    pub trip_started_at: Option<DateTime<Utc>>,
    pub trip_completed_at: Option<DateTime<Utc>>,
    pub payment_method: BookingPaymentMethod,
    pub payment_status: BookingPaymentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Vehicle))]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewBooking {
    pub confirmation: String,
    pub vehicle_id: i32,
    pub renter_id: i32,
    pub owner_id: i32,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub expected_km: Option<f64>,
    pub pickup_location: Option<String>,
    pub destination: Option<String>,
    pub driver_required: bool,
    pub vehicle_price: f64,
    pub driver_price: f64,
    pub total_price: f64,
    pub status: BookingStatus,
    pub payment_method: BookingPaymentMethod,
    pub payment_status: BookingPaymentStatus,
}

#[derive(
    Queryable, Identifiable, Associations, Debug, Clone, PartialEq, Serialize, Deserialize,
)]
#[diesel(belongs_to(User))]
#[diesel(belongs_to(Vehicle))]
#[diesel(table_name = booking_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BookingRequest {
    pub id: i32,
    pub user_id: i32,
    pub vehicle_id: i32,
    pub phone: String,
    pub email: String,
    pub description: Option<String>,
    pub document_images: Vec<String>,
    pub payment_method: RequestPaymentMethod,
    pub booking_status: RequestStatus,
    pub payment_status: RequestPaymentStatus,
    pub price_amount: Option<f64>,
    pub price_currency: String,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(belongs_to(User))]
#[diesel(belongs_to(Vehicle))]
#[diesel(table_name = booking_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewBookingRequest {
    pub user_id: i32,
    pub vehicle_id: i32,
    pub phone: String,
    pub email: String,
    pub description: Option<String>,
    pub document_images: Vec<String>,
    pub payment_method: RequestPaymentMethod,
    pub booking_status: RequestStatus,
    pub payment_status: RequestPaymentStatus,
    pub price_amount: Option<f64>,
    pub price_currency: String,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(belongs_to(User))]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub booking_id: Option<i32>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(belongs_to(User))]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewNotification {
    pub user_id: i32,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub booking_id: Option<i32>,
}
