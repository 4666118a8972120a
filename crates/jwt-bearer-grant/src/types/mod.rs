//! Domain types shared by the grant handlers and the capabilities.

pub mod client;
pub mod request;
pub mod scope;
pub mod token;
pub mod user;

pub use client::{Client, GrantType};
pub use request::GrantRequest;
pub use scope::{Scope, ScopeParseError};
pub use token::Token;
pub use user::User;
