pub mod adaptors;
pub mod assets;
pub mod auth;
pub mod careers;
pub mod catalog;
pub mod contact;
pub mod hackathon;
pub mod inquiry;
pub mod media;
pub mod notify;
pub mod sheets;

#[cfg(test)]
pub mod testing;
