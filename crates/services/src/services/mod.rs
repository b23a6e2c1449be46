pub mod api_client;
pub mod auth;
pub mod auth_store;
pub mod identify;
#[cfg(any(test, feature = "test-support"))]
pub mod mock_backend;
pub mod plants;
pub mod pot_assignment;
pub mod pots;
pub mod push;
pub mod reminders;
pub mod session;
pub mod settings;
