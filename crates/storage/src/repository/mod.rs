pub mod comic;
pub mod competition;
pub mod registration;

pub use comic::ComicRepository;
pub use competition::CompetitionRepository;
pub use registration::RegistrationRepository;
