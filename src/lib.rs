//! RFC4122 UUID generation for resource-constrained devices
//!
//! ```rust
//! let uuid = embedded_uuid::uuid6();
//! println!("{}", uuid); // e.g., "1ec9414c-232a-6b00-b3c8-9f6bdeced846"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//! ```
//!
//! This crate generates five kinds of UUIDs:
//!
//! | Version | Source                               | Entry point                           |
//! | ------- | ------------------------------------ | ------------------------------------- |
//! | 1       | timestamp, clock sequence, node      | [`Generator::generate_v1`], [`uuid1`] |
//! | 3       | MD5 of namespace and name            | [`uuid3`], [`V3Hasher`]               |
//! | 4       | random bytes                         | [`Generator::generate_v4`], [`uuid4`] |
//! | 5       | SHA-1 of namespace and name          | [`uuid5`], [`V5Hasher`]               |
//! | 6       | timestamp (sortable), sequence, node | [`Generator::generate_v6`], [`uuid6`] |
//!
//! Version 6 is not part of RFC4122. It carries the same fields as version 1 with the
//! timestamp reordered most significant bits first, so that raw byte comparison of two version 6
//! UUIDs matches the order in which they were created.
//!
//! # Generators and capabilities
//!
//! Nothing in this crate allocates or holds global state unless the `global_gen` feature is
//! enabled. Time-based and random UUIDs come from a [`Generator`] value that owns the
//! capabilities it draws from:
//!
//! - an [`EntropySource`] seeding the clock sequence and filling version 4 UUIDs,
//! - a [`TimeSource`] reporting seconds and a sub-second fraction at a fixed tick rate,
//! - a [`DeviceIdSource`] supplying up to six device-unique bytes for the node field.
//!
//! ```rust
//! use embedded_uuid::{ClockReading, Error, Generator, TimeSource};
//!
//! /// A 1 kHz RTC.
//! struct Rtc(u64);
//!
//! impl TimeSource for Rtc {
//!     const TICKS_PER_SECOND: u32 = 1_000;
//!
//!     fn current_time(&mut self) -> Result<ClockReading, Error> {
//!         self.0 += 1;
//!         Ok(ClockReading {
//!             seconds: 1_700_000_000 + self.0 / 1_000,
//!             fraction: (self.0 % 1_000) as u32,
//!         })
//!     }
//! }
//!
//! let serial = [0x5e, 0x00, 0x12, 0x34, 0x56, 0x78];
//! let mut g = Generator::with_rand08(rand::rngs::OsRng, Rtc(0), serial)?;
//! let a = g.generate_v6()?;
//! let b = g.generate_v6()?;
//! assert!(a < b);
//! # Ok::<(), Error>(())
//! ```
//!
//! Name-based UUIDs only need a block hash; [`NamespaceHasher`] keeps the hash state and the
//! staging buffer for the first block so they can be reused across calls.
//!
//! # Crate features
//!
//! - `std` enables [`StdSystemTime`] and [`std::error::Error`] impls.
//! - `global_gen` (default) enables the process-wide [`uuid1`], [`uuid4`] and [`uuid6`].
//! - `v3` (default) enables MD5-based UUIDs through the `md-5` crate.
//! - `v5` (default) enables SHA-1-based UUIDs through the `sha1` crate.
//! - `serde` enables serialization of [`Uuid`].
//! - `uuid` enables conversion from and to [`uuid::Uuid`](https://docs.rs/uuid).

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub use error::{Error, Source};

mod id;
pub use id::{ParseError, Uuid, Variant, LENGTH_BINARY, LENGTH_STRING, UUID_EPOCH_OFFSET};

pub mod generator;
pub use generator::{
    with_rand08, ClockReading, DeviceIdSource, EntropySource, Generator, Layout, TimeSource,
};

#[cfg(feature = "std")]
pub use generator::StdSystemTime;

mod v4;
pub use v4::generate_v4;

pub mod namespace;
pub use namespace::{BlockHash, Name, NamespaceHasher};

#[cfg(feature = "v3")]
pub use namespace::{uuid3, V3Hasher};

#[cfg(feature = "v5")]
pub use namespace::{uuid5, V5Hasher};

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{uuid1, uuid4, uuid6};
