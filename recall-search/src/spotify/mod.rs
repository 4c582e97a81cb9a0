//! Spotify Web API catalog: typed response schema, token providers, client.

pub mod client;
pub mod schema;
pub mod token;

pub use client::SpotifyCatalog;
pub use token::{
    AccessToken, ClientCredentials, ClientCredentialsProvider, StaticTokenProvider, TokenProvider,
};
