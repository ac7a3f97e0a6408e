pub mod auth;
pub mod comments;
pub mod community;
pub mod pages;
pub mod shell;
