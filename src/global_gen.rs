//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::Uuid;
use inner::GlobalGenInner;

/// Returns the lock handle of process-wide global generator, creating one if none exists.
fn lock_global_gen() -> sync::MutexGuard<'static, GlobalGenInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalGenInner>> = sync::OnceLock::new();
    G.get_or_init(Default::default)
        .lock()
        .expect("embedded_uuid: could not lock global generator")
}

/// Generates a UUIDv1 object.
///
/// This function employs a global generator whose node is a random 48-bit value with the
/// multicast bit set, and guarantees distinct timestamps process-wide. On Unix, this function
/// resets the generator when the process ID changes (i.e., upon process forks) to prevent
/// collisions across processes.
///
/// # Examples
///
/// ```rust
/// let uuid = embedded_uuid::uuid1();
/// println!("{}", uuid); // e.g., "c232ab00-9414-11ec-b3c8-9f6bdeced846"
/// ```
pub fn uuid1() -> Uuid {
    lock_global_gen()
        .get_mut()
        .generate_v1()
        .expect("embedded_uuid: could not generate UUIDv1")
}

/// Generates a UUIDv6 object.
///
/// UUIDs returned by this function sort by creation time when compared as bytes or as strings.
///
/// # Examples
///
/// ```rust
/// let uuid = embedded_uuid::uuid6();
/// println!("{}", uuid); // e.g., "1ec9414c-232a-6b00-b3c8-9f6bdeced846"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
/// ```
pub fn uuid6() -> Uuid {
    lock_global_gen()
        .get_mut()
        .generate_v6()
        .expect("embedded_uuid: could not generate UUIDv6")
}

/// Generates a UUIDv4 object.
///
/// # Examples
///
/// ```rust
/// let uuid = embedded_uuid::uuid4();
/// println!("{}", uuid); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// ```
pub fn uuid4() -> Uuid {
    lock_global_gen()
        .get_mut()
        .generate_v4()
        .expect("embedded_uuid: could not generate UUIDv4")
}

mod inner {
    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha12Core;

    use crate::generator::{with_rand08::Adapter, Generator, StdSystemTime};

    /// Number of bytes generated before the global generator reseeds itself from [`OsRng`].
    pub const RESEED_THRESHOLD: u64 = 1024 * 64;

    /// The type alias for the random number generator of the global generator.
    ///
    /// The global generator currently employs [`ChaCha12Core`] with [`ReseedingRng`] wrapper to
    /// emulate the strategy used by [`rand::rngs::ThreadRng`].
    pub type GlobalGenRng = ReseedingRng<ChaCha12Core, OsRng>;

    /// The type alias for the generator behind the process-wide entry points.
    pub type GlobalGen = Generator<Adapter<GlobalGenRng>, StdSystemTime, [u8; 6]>;

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    #[derive(Debug)]
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        generator: GlobalGen,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            let core = ChaCha12Core::from_rng(OsRng)
                .expect("embedded_uuid: could not seed global generator");
            let mut rng = GlobalGenRng::new(core, RESEED_THRESHOLD, OsRng);
            let mut node = [0u8; 6];
            rng.fill_bytes(&mut node);

            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator: Generator::with_rand08(rng, StdSystemTime, node)
                    .expect("embedded_uuid: could not initialize global generator"),
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a mutable reference to the inner [`Generator`] instance, reseting the
        /// generator state on Unix if the process ID has changed.
        pub fn get_mut(&mut self) -> &mut GlobalGen {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                log::debug!("process id changed; reinitializing global generator");
                *self = Default::default();
            }
            &mut self.generator
        }
    }
}
