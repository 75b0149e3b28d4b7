//! HTTP side of the backend client.

mod client;
mod response;


pub use client::HttpBackendClient;
