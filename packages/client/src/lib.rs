//! # Figport Client
//!
//! OAuth-authenticated access to the design tool's file and image APIs.
//!
//! All authentication state is held in an explicit [`AuthContext`] built from
//! credentials and a token file, and handed to [`FigmaClient`]. Requests go
//! through the [`HttpTransport`] seam so tests can replace the network.

pub mod auth;
pub mod client;
pub mod error;
pub mod transport;

pub use auth::{AuthContext, AuthProvider, OAuthCredentials, StoredTokens, TokenStore};
pub use client::FigmaClient;
pub use error::{ClientError, ClientResult};
pub use transport::{BinaryResponse, HttpResponse, HttpTransport, ReqwestTransport};
