pub mod applications;
pub mod contacts;
pub mod hackathon;
pub mod inquiries;
pub mod jobs;
pub mod media;
pub mod projects;
