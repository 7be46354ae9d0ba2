//! # Hub Deal ACL Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── scenarios.rs     # Buyer / stranger / spoofed-metadata calls
//!     ├── wiring.rs        # HubAcl layers in front of tower services
//!     ├── concurrency.rs   # Authorizing while deals open and close
//!     └── properties.rs    # Decision determinism
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p hub-tests
//! cargo test -p hub-tests integration::scenarios::
//! ```
