pub mod health;
pub mod meetings;
pub mod tasks;
pub mod transcripts;
