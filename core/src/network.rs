pub mod http;
pub mod ping;
pub mod resolver;
