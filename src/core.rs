pub mod controller;
pub mod domain;
pub mod forms;
pub mod library;
pub mod repository;
pub mod view;
