pub mod access_list;
pub mod health;
pub mod users;
