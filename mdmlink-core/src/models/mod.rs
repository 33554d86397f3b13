//! Canonical model types.

mod brand;
mod command;
mod device;
mod permissions;
mod query;

pub use brand::{Brand, DeviceStatus};
pub use command::{CommandState, VendorCommand};
pub use device::{CommandReceipt, Credit, Device, DeviceDetail, Location, Wallpaper};
pub use permissions::Permissions;
pub use query::DeviceQuery;
