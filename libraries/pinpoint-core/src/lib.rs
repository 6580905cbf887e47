//! Pinpoint Core
//!
//! Platform-agnostic types, traits, error handling and the user record
//! service for Pinpoint.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `Location`, `UserId`, create/update inputs
//! - **Core Traits**: `UserStore`, `LocationResolver`
//! - **Record Service**: `UserService`, the CRUD orchestrator
//! - **Error Handling**: `PinpointError`, `ErrorKind` and `ResolveError`
//!
//! Concrete stores live in `pinpoint-storage`, the HTTP-backed resolver in
//! `pinpoint-geocode`.
//!
//! # Example
//!
//! ```rust,no_run
//! use pinpoint_core::{CreateUser, LocationResolver, UserService, UserStore};
//! use std::sync::Arc;
//!
//! # async fn example(
//! #     store: Arc<dyn UserStore>,
//! #     resolver: Arc<dyn LocationResolver>,
//! # ) -> pinpoint_core::Result<()> {
//! let service = UserService::new(store, resolver);
//! let user = service.create_user(CreateUser::new("Ana", "12345")).await?;
//! println!("{} lives in {}", user.name, user.timezone);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod service;
pub mod traits;
pub mod types;

pub use error::{ErrorKind, PinpointError, ResolveError, Result};
pub use service::UserService;
pub use traits::{LocationResolver, UserStore};
pub use types::{CreateUser, Location, UpdateUser, User, UserId, UserList};
