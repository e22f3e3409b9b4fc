pub mod auth;
pub mod crops;
pub mod farms;
pub mod harvests;
pub mod health;
pub mod metrics;
pub mod producers;
pub mod users;
