pub mod auth;
pub mod crop;
pub mod farm;
pub mod harvest;
pub mod producer;
