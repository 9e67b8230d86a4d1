pub mod client;
pub mod gateway;

pub use client::ApiClient;
pub use gateway::{AuthApi, MentorApi, ReplayApi};
