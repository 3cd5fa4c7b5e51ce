pub mod basket;
pub mod cars;
pub mod catalog;
