pub mod crop_repo;
pub mod farm_repo;
pub mod harvest_repo;
pub mod producer_repo;
pub mod user_repo;

pub use crop_repo::{CropRepository, PgCropRepository};
pub use farm_repo::{FarmRepository, PgFarmRepository};
pub use harvest_repo::{HarvestRepository, PgHarvestRepository};
pub use producer_repo::{PgProducerRepository, ProducerRepository};
pub use user_repo::{PgUserRepository, UserRepository};

#[cfg(test)]
pub mod memory;
