pub mod controller;
pub mod factory;
