pub mod auth;
pub mod orders;
pub mod products;
pub mod quotes;
pub mod server;
pub mod users;
