pub mod auth;
pub mod crop_service;
pub mod farm_service;
pub mod harvest_service;
pub mod producer_service;
pub mod user_service;
