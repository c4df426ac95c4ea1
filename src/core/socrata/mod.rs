// Socrata module - Remote query client for SODA endpoints
pub mod client;
pub mod credentials;

pub use client::{process_response, QueryClient, SocrataClient, DEFAULT_TIMEOUT};
pub use credentials::{CredentialOverrides, Credentials};
