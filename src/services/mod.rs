pub mod betting;
pub mod catalog;
pub mod settlement;
