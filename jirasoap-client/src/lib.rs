//! Client for the JIRA SOAP service.
//!
//! # Components
//!
//! - **Transport**: the seam to the network; hands requests out and response
//!   envelopes back
//! - **Session**: login state and the token every call carries
//! - **Catalog**: one typed method per remote operation
//!
//! # Example
//!
//! ```
//! use jirasoap_client::mock::{MockTransport, collection_envelope, scalar_envelope};
//! use jirasoap_client::{ClientConfig, Session};
//! use jirasoap_wire::Node;
//!
//! let transport = MockTransport::new();
//! transport
//!     .respond(scalar_envelope("login", "token-1"))
//!     .respond(collection_envelope(
//!         "getStatuses",
//!         [Node::new("s").child(Node::with_text("name", "Open"))],
//!     ));
//!
//! let mut session = Session::new(ClientConfig::new("https://jira.example.com"), &transport);
//! session.login("alice", "secret").unwrap();
//!
//! let statuses = session.api().get_statuses().unwrap();
//! assert_eq!(statuses[0].name.as_deref(), Some("Open"));
//! ```

mod catalog;
mod config;
mod error;
mod session;
mod transport;

pub use catalog::RemoteProcedureCatalog;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use session::{Session, SessionState};
pub use transport::{AUTHENTICATION_FAULT, Transport, TransportError, mock};

pub use jirasoap_model as model;
pub use jirasoap_wire as wire;
