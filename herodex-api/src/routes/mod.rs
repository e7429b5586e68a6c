/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `heroes`: Hero CRUD endpoints
/// - `notifications`: Notification endpoint with deferred log writes
/// - `admin`: Admin namespace (token protected)

pub mod admin;
pub mod health;
pub mod heroes;
pub mod notifications;
