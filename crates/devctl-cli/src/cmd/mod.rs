pub mod auth;
pub mod backend;
pub mod database;
pub mod frontend;
pub mod init;
pub mod seed;
pub mod stack;
