/// Middleware modules for the API server
///
/// This module contains custom middleware for:
/// - Admin token gate (`auth`)
/// - Deferred-task queue injection and post-response drain (`deferred`)

pub mod auth;
pub mod deferred;
