//! `typeid` offers type-safe, globally unique identifiers with a human readable type prefix,
//! and a generic identifier type to conveniently manage them with Serde and Diesel.
//!
//! An identifier is a UUID encoded in 26 characters of Crockford base32, prefixed by the
//! name of the object type, inspired by Stripe's API: `user_01hf98sp99fs2b4qf2jm11hse4`.
//! The prefix prevents accidentally or intentionally mixing IDs of different types of
//! objects, both in strings and in Rust code, where each object type gets its own type.
//!
//! Two kinds of identifiers are provided:
//!
//! - [`Sortable`] identifiers are based on UUIDv7 and are k-sortable, which makes them good
//!   primary keys for classic databases like PostgreSQL.  The suffix is encoded in
//!   **lower case**.
//! - [`Random`] identifiers are based on UUIDv4 and are completely random, for when high
//!   entropy matters more than ordering, or when sequential keys would create hotspots in a
//!   distributed database.  The suffix is encoded in **upper case**.
//!
//! Parsing is strict: the prefix must match exactly, the suffix must have exactly 26
//! characters of the alphabet in the case of its kind, and values wider than 128 bits are
//! rejected.
//!
//! # Usage
//!
//! Define a prefix marker for each type of object, and a type alias for its identifier.
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use typeid_rs::{Prefix, Random, Sortable};
//!
//! #[derive(Debug)]
//! pub struct UserPrefix;
//! impl Prefix for UserPrefix {
//!     fn prefix() -> &'static str { "user" }
//! }
//!
//! type UserId = Sortable<UserPrefix>;
//!
//! // The identifier can then be used in structs, and works automatically with Serde and
//! // Diesel.
//! #[derive(Serialize, Deserialize)]
//! struct User {
//!     pub id: UserId,
//! }
//!
//! let user = User { id: UserId::parse("user_01hp1aybq6f6athhfcvp1j8fpt").unwrap() };
//! let user_str = serde_json::to_string(&user).unwrap();
//! assert_eq!(user_str, "{\"id\":\"user_01hp1aybq6f6athhfcvp1j8fpt\"}");
//!
//! let new_id = UserId::new().unwrap();
//! assert!(new_id.to_string().starts_with("user_"));
//!
//! // Identifiers of other types do not parse.
//! #[derive(Debug)]
//! pub struct AccountPrefix;
//! impl Prefix for AccountPrefix {
//!     fn prefix() -> &'static str { "account" }
//! }
//! assert!(Random::<AccountPrefix>::parse(&new_id.to_string()).is_err());
//! ```
//!
//! ## Low level API
//!
//! The [`codec`] module encodes and decodes the raw 16 byte values.
//!
//! ```
//! use typeid_rs::codec::LOWER;
//!
//! let encoded = LOWER.encode(&[0u8; 16]);
//! assert_eq!(encoded, "00000000000000000000000000");
//! assert_eq!(LOWER.decode(&encoded).unwrap(), [0u8; 16]);
//! ```

pub mod codec;
mod error;
mod grammar;
mod id;
mod processor;
mod sql;

pub use codec::{SUFFIX_LEN, VALUE_LEN};
pub use error::{BoxError, Error};
pub use grammar::{validate_prefix, Prefix, MAX_PREFIX_LEN, SEPARATOR};
pub use id::{Random, Sortable, TypedId};
pub use processor::{Generator, Kind, Processor, RandomKind, SortableKind};

/// Re-export uuid for consumers that need raw UUID operations.
pub use uuid::Uuid;
