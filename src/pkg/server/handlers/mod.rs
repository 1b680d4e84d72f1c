pub mod careers;
pub mod contact;
pub mod hackathon;
pub mod inquiry;
pub mod jobs;
pub mod media;
pub mod multipart;
pub mod probes;
pub mod projects;
