//! Outbound HTTP clients

pub mod refresh_client;

#[cfg(test)]
mod tests;

pub use refresh_client::HttpTokenRefresher;
