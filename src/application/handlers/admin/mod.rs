//! Administrative operations on the engine's entities.

mod provision_admin;

pub use provision_admin::{
    AdminSeatSettings, ProvisionAdminCommand, ProvisionAdminHandler, ProvisionedAdmin,
};
