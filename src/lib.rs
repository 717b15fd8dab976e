pub mod core;
pub mod utils;
pub mod authors;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod instances;
