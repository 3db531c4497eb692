//! Data Transfer Objects for request and response serialization.

pub mod health_dto;
pub mod sign_dto;

pub use health_dto::*;
pub use sign_dto::*;
