pub mod health;
pub mod parking;
