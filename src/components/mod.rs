//! UI components.

mod audio_overview;
mod chat;
pub mod concept_map;
mod flashcards;
mod quiz;
mod speech;
mod video_overview;

pub use audio_overview::AudioOverview;
pub use chat::Chat;
pub use concept_map::ConceptMapCanvas;
pub use flashcards::Flashcards;
pub use quiz::Quiz;
pub use video_overview::VideoOverview;
