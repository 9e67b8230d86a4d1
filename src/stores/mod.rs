pub mod auth;
pub mod mentor;
pub mod replays;

pub use auth::AuthStore;
pub use mentor::MentorStore;
pub use replays::ReplayStore;
