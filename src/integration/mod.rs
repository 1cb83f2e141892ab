pub mod apns_wheelio;
pub mod expo_push_wheelio;
pub mod gcloud_storage_wheelio;
pub mod sendgrid_wheelio;
