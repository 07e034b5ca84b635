pub mod access_entry;
pub mod user;

pub use access_entry::AccessEntry;
pub use user::User;
