pub mod mileage;
pub mod record;
pub mod user;
