//! Name-based UUIDs (versions 3 and 5).
//!
//! A name-based UUID is the digest of a namespace UUID followed by a name, truncated to 16 bytes
//! and stamped with the version. The hash is driven one 64-byte block at a time through
//! [`BlockHash`], so the adapter assembles the first block itself: the 16-byte namespace
//! followed by as much of the name as fits, with the rest of the name streamed in block-sized
//! chunks.

#[cfg(not(feature = "std"))]
use core as std;

use std::fmt;

use crate::{Error, Uuid};

/// Block size of MD5 and SHA-1 in bytes.
pub const BLOCK_BYTES: usize = 64;

/// A hash function that consumes its input in fixed-size blocks.
pub trait BlockHash {
    /// Digest produced by [`extract_digest`](BlockHash::extract_digest), at least 16 bytes long.
    type Output: AsRef<[u8]>;

    /// The UUID version stamped on UUIDs derived from this hash.
    const VERSION: u8;

    /// Resets the running state.
    fn init(&mut self);

    /// Feeds a full, non-final block.
    fn next_block(&mut self, block: &[u8; BLOCK_BYTES]);

    /// Feeds the final block. `bit_length` counts the meaningful bits at the head of `data` and
    /// does not exceed `BLOCK_BYTES * 8`.
    fn last_block(&mut self, data: &[u8], bit_length: usize);

    /// Returns the digest of everything fed since [`init`](BlockHash::init).
    fn extract_digest(&mut self) -> Self::Output;
}

/// A name of at most [`Name::MAX_LEN`] bytes.
///
/// The bound keeps hashing time predictable on small devices.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
pub struct Name<'a>(&'a [u8]);

impl<'a> Name<'a> {
    /// Longest accepted name in bytes.
    pub const MAX_LEN: usize = 255;

    /// Wraps `bytes`, or fails if it is longer than [`Name::MAX_LEN`].
    pub const fn new(bytes: &'a [u8]) -> Result<Self, Error> {
        if bytes.len() > Self::MAX_LEN {
            Err(Error::PreconditionViolation("name longer than 255 bytes"))
        } else {
            Ok(Self(bytes))
        }
    }

    /// Returns the name bytes.
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.0
    }
}

impl<'a> TryFrom<&'a [u8]> for Name<'a> {
    type Error = Error;

    fn try_from(src: &'a [u8]) -> Result<Self, Self::Error> {
        Self::new(src)
    }
}

impl<'a> TryFrom<&'a str> for Name<'a> {
    type Error = Error;

    fn try_from(src: &'a str) -> Result<Self, Self::Error> {
        Self::new(src.as_bytes())
    }
}

/// Derives name-based UUIDs through a [`BlockHash`], holding the hash state and the staging
/// buffer for the first block.
///
/// # Examples
///
/// ```rust
/// # #[cfg(feature = "v5")]
/// # {
/// use embedded_uuid::{namespace::Name, Uuid, V5Hasher};
///
/// let mut hasher = V5Hasher::default();
/// let name = Name::try_from("www.example.com")?;
/// let uuid = hasher.hash_uuid(&Uuid::NAMESPACE_DNS, name);
/// assert_eq!(&uuid.encode() as &str, "2ed6657d-e927-568b-95e1-2665a8aea6a2");
/// # }
/// # Ok::<(), embedded_uuid::Error>(())
/// ```
#[derive(Clone)]
pub struct NamespaceHasher<H> {
    hash: H,
    stage: [u8; BLOCK_BYTES],
}

impl<H: BlockHash> NamespaceHasher<H> {
    /// Creates a hasher around `hash`.
    pub const fn new(hash: H) -> Self {
        Self {
            hash,
            stage: [0; BLOCK_BYTES],
        }
    }

    /// Returns the UUID derived from `namespace` and `name`.
    pub fn hash_uuid(&mut self, namespace: &Uuid, name: Name<'_>) -> Uuid {
        const NS_BYTES: usize = 16;

        let name = name.as_bytes();
        self.hash.init();

        let head = name.len().min(BLOCK_BYTES - NS_BYTES);
        self.stage[..NS_BYTES].copy_from_slice(namespace.as_bytes());
        self.stage[NS_BYTES..NS_BYTES + head].copy_from_slice(&name[..head]);

        let mut rest = &name[head..];
        if rest.is_empty() {
            let len = NS_BYTES + head;
            self.hash.last_block(&self.stage[..len], len * 8);
        } else {
            self.hash.next_block(&self.stage);
            loop {
                match rest.split_first_chunk::<BLOCK_BYTES>() {
                    Some((block, tail)) if !tail.is_empty() => {
                        self.hash.next_block(block);
                        rest = tail;
                    }
                    _ => {
                        // exactly one block or less remains
                        self.hash.last_block(rest, rest.len() * 8);
                        break;
                    }
                }
            }
        }

        let digest = self.hash.extract_digest();
        let mut uuid = Uuid::NIL;
        uuid.as_bytes_mut()
            .copy_from_slice(&digest.as_ref()[..NS_BYTES]);
        uuid.stamp(H::VERSION);
        uuid
    }
}

impl<H: BlockHash + Default> Default for NamespaceHasher<H> {
    fn default() -> Self {
        Self::new(Default::default())
    }
}

impl<H> fmt::Debug for NamespaceHasher<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamespaceHasher").finish_non_exhaustive()
    }
}

#[cfg(feature = "v3")]
#[cfg_attr(docsrs, doc(cfg(feature = "v3")))]
pub use md5_support::{uuid3, Md5Hash, V3Hasher};

#[cfg(feature = "v3")]
mod md5_support {
    use super::{BlockHash, Name, NamespaceHasher, BLOCK_BYTES};
    use crate::Uuid;
    use md5::{Digest, Md5};

    /// [`BlockHash`] implementation of MD5 backed by the `md-5` crate.
    #[derive(Clone, Default)]
    pub struct Md5Hash(Md5);

    impl BlockHash for Md5Hash {
        type Output = [u8; 16];
        const VERSION: u8 = 3;

        fn init(&mut self) {
            Digest::reset(&mut self.0);
        }

        fn next_block(&mut self, block: &[u8; BLOCK_BYTES]) {
            self.0.update(block);
        }

        fn last_block(&mut self, data: &[u8], bit_length: usize) {
            debug_assert!(bit_length <= BLOCK_BYTES * 8 && bit_length % 8 == 0);
            self.0.update(&data[..bit_length / 8]);
        }

        fn extract_digest(&mut self) -> Self::Output {
            let mut digest = [0u8; 16];
            digest.copy_from_slice(&self.0.finalize_reset());
            digest
        }
    }

    /// Derives version 3 (MD5) UUIDs.
    pub type V3Hasher = NamespaceHasher<Md5Hash>;

    /// Generates a UUIDv3 object from `namespace` and `name`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use embedded_uuid::{uuid3, Uuid};
    ///
    /// let uuid = uuid3(&Uuid::NAMESPACE_DNS, "www.example.com".try_into()?);
    /// assert_eq!(&uuid.encode() as &str, "5df41881-3aed-3515-88a7-2f4a814cf09e");
    /// # Ok::<(), embedded_uuid::Error>(())
    /// ```
    pub fn uuid3(namespace: &Uuid, name: Name<'_>) -> Uuid {
        V3Hasher::default().hash_uuid(namespace, name)
    }
}

#[cfg(feature = "v5")]
#[cfg_attr(docsrs, doc(cfg(feature = "v5")))]
pub use sha1_support::{uuid5, Sha1Hash, V5Hasher};

#[cfg(feature = "v5")]
mod sha1_support {
    use super::{BlockHash, Name, NamespaceHasher, BLOCK_BYTES};
    use crate::Uuid;
    use sha1::{Digest, Sha1};

    /// [`BlockHash`] implementation of SHA-1 backed by the `sha1` crate.
    #[derive(Clone, Default)]
    pub struct Sha1Hash(Sha1);

    impl BlockHash for Sha1Hash {
        type Output = [u8; 20];
        const VERSION: u8 = 5;

        fn init(&mut self) {
            Digest::reset(&mut self.0);
        }

        fn next_block(&mut self, block: &[u8; BLOCK_BYTES]) {
            self.0.update(block);
        }

        fn last_block(&mut self, data: &[u8], bit_length: usize) {
            debug_assert!(bit_length <= BLOCK_BYTES * 8 && bit_length % 8 == 0);
            self.0.update(&data[..bit_length / 8]);
        }

        fn extract_digest(&mut self) -> Self::Output {
            let mut digest = [0u8; 20];
            digest.copy_from_slice(&self.0.finalize_reset());
            digest
        }
    }

    /// Derives version 5 (SHA-1) UUIDs.
    pub type V5Hasher = NamespaceHasher<Sha1Hash>;

    /// Generates a UUIDv5 object from `namespace` and `name`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use embedded_uuid::{uuid5, Uuid};
    ///
    /// let uuid = uuid5(&Uuid::NAMESPACE_DNS, "www.example.com".try_into()?);
    /// assert_eq!(&uuid.encode() as &str, "2ed6657d-e927-568b-95e1-2665a8aea6a2");
    /// # Ok::<(), embedded_uuid::Error>(())
    /// ```
    pub fn uuid5(namespace: &Uuid, name: Name<'_>) -> Uuid {
        V5Hasher::default().hash_uuid(namespace, name)
    }
}
