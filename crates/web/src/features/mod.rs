pub mod comics;
pub mod competitions;
pub mod registrations;
