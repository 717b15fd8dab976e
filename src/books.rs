pub mod controller;
pub mod domain;
pub mod factory;
pub mod forms;
