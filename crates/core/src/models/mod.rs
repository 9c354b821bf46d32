pub mod account;
pub mod plan;
pub mod settings;
pub mod summary;
pub mod transaction;
