pub mod habits;
pub mod health;
pub mod insights;
pub mod moods;
