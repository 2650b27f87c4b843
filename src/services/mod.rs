pub mod habits;
pub mod insights;
pub mod moods;
