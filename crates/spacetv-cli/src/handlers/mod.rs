pub mod account;
pub mod video;
