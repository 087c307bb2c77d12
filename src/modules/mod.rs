pub mod audio;
pub mod notify;
pub mod quiz;
pub mod summary;
pub mod user;
