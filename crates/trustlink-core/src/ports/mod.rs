//! Ports - trait definitions for the client's seams.
//! Infrastructure provides the implementations; callers may substitute test doubles.

mod backend;
mod chat;
mod logger;

pub use backend::BackendApi;
pub use chat::ChatObserver;
pub use logger::ErrorLogger;
