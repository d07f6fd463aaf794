//! Blocking client for the GenAI management API.
//!
//! Covers the two directories the exporter reads from:
//! - agents: `/api/genai/v1/projects/{project}/agents`
//! - sessions: `/api/genai/v1/projects/{project}/sessions`
//!
//! Raw wire records live in `schema` and are mapped into `chatlog-types`
//! domain values before they leave this crate.
//!
//! # Example
//!
//! ```no_run
//! use chatlog_client::{ApiClient, SessionFilter};
//!
//! # fn example() -> chatlog_client::Result<()> {
//! let client = ApiClient::builder()
//!     .origin("http://localhost:8000")
//!     .project_id("631a6a99-0b30-425a-bdf2-af4532ff9451")
//!     .credentials("admin", "password")
//!     .build()?;
//!
//! let filter = SessionFilter::new().exclude_user("^test-")?;
//! let sessions = client.sessions().list_filtered(&filter)?;
//! # Ok(())
//! # }
//! ```

mod agents;
mod client;
mod directory;
mod error;
mod filter;
mod mapper;
mod schema;
mod sessions;

pub use agents::AgentsApi;
pub use client::{ApiClient, ClientBuilder, DEFAULT_TIMEOUT};
pub use directory::{AgentDirectory, SessionDirectory};
pub use error::{Error, Result};
pub use filter::SessionFilter;
pub use sessions::SessionsApi;
