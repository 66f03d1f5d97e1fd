pub mod health;
pub mod resolve;
