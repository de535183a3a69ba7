pub mod auth;
pub mod comments;
pub mod cookie;
pub mod error;
pub mod middleware;
pub mod routes;
