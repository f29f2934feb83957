pub mod comic;
pub mod common;
pub mod competition;
pub mod registration;
