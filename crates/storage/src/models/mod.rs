pub mod comic;
pub mod competition;
pub mod registration;

pub use comic::Comic;
pub use competition::{Competition, JudgingCriterion, TimelineEntry};
pub use registration::CompetitionRegistration;
