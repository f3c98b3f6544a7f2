//! HTTP request handlers

pub mod book;
pub mod health;
pub mod question;
