pub mod health;
pub mod hello;
