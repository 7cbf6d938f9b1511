pub mod middleware;
pub mod whitelist;

pub use middleware::{require_device, API_KEY_HEADER, DEVICE_ID_HEADER};
pub use whitelist::{AuthError, DeviceWhitelist};
