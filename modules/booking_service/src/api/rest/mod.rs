//! REST API layer

pub mod dto;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod mapper;
pub mod routes;
pub mod views;
