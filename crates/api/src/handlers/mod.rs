pub mod participants;
pub mod programs;
pub mod registrations;
pub mod reports;
pub mod teams;
