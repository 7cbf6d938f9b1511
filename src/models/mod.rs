pub mod request;
pub mod spot;
pub mod user;

pub use request::{ParkRequest, RfidRequest};
pub use spot::{ParkOutcome, Spot};
pub use user::{UserInfo, UserOccupancy, UserStatus};
