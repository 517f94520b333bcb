//! Synchronous client for the PassNinja wallet-pass service.
//!
//! # Overview
//! Creates, reads, updates, deletes, lists and decrypts passes, and looks up
//! pass templates. Each call validates its arguments locally, performs one
//! round trip (two for `create`, which first fetches the template's
//! required keys) and reshapes the response into a stable return type.
//!
//! # Design
//! - `PassClient` is immutable after construction and holds its transport
//!   behind an `Arc<dyn Transport>`, so one client can serve many threads.
//! - Each remote call is split into `build_*` (produces request) and
//!   `parse_*` (consumes response); the resource groups in `resources`
//!   run them through the transport.
//! - Tests swap in a canned-response `Transport`; production uses
//!   `UreqTransport`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.
//!
//! ```no_run
//! use passninja_core::{ClientPassData, PassClient};
//!
//! # fn main() -> Result<(), passninja_core::PassNinjaError> {
//! let client = PassClient::new("my-account-id", "my-api-key")?;
//! let mut data = ClientPassData::new();
//! data.insert("barcode".into(), "12345".into());
//! data.insert("description".into(), "Loyalty card".into());
//! let pass = client.pass().create("demo.coupon", &data)?;
//! client.pass().delete(&pass.pass_type, &pass.serial_number)?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod resources;
pub mod transport;
pub mod types;
pub mod validate;

pub use client::PassClient;
pub use config::ClientConfig;
pub use error::{PassNinjaError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use resources::{PassTemplates, Passes};
pub use transport::UreqTransport;
pub use types::{ClientPassData, CreatedPass};
