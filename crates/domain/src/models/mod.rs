pub mod api_error;
pub mod auth;
pub mod care_event;
pub mod identification;
pub mod photo;
pub mod plant;
pub mod pot;
pub mod push;
pub mod reminder;
pub mod settings;
