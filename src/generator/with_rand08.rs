//! Integration with `rand` (v0.8) crate.

use super::{DeviceIdSource, EntropySource, Generator, TimeSource};
use crate::{Error, Source};
use rand::RngCore;

/// An adapter that implements [`EntropySource`] for [`RngCore`] types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> EntropySource for Adapter<T> {
    fn next_byte(&mut self) -> Result<u8, Error> {
        let mut buffer = [0u8; 1];
        EntropySource::fill_bytes(self, &mut buffer)?;
        Ok(buffer[0])
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.0
            .try_fill_bytes(dest)
            .map_err(|_| Error::SourceUnavailable(Source::Entropy))
    }
}

impl<T: RngCore, C: TimeSource, D: DeviceIdSource> Generator<Adapter<T>, C, D> {
    /// Creates a generator object with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.8) crate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use embedded_uuid::{Generator, StdSystemTime};
    ///
    /// let mut g = Generator::with_rand08(rand::thread_rng(), StdSystemTime, *b"serial")?;
    /// println!("{}", g.generate_v1()?);
    /// # Ok::<(), embedded_uuid::Error>(())
    /// ```
    pub fn with_rand08(rng: T, clock: C, device: D) -> Result<Self, Error> {
        Self::new(Adapter(rng), clock, device)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{MockClock, DEVICE_ID};
    use super::{Adapter, EntropySource};
    use crate::{Error, Generator, Source};
    use rand::rngs::mock::StepRng;

    /// Seeds clock sequence from wrapped RNG
    #[test]
    fn seeds_clock_sequence_from_wrapped_rng() {
        let g = Generator::with_rand08(
            StepRng::new(0x1234, 0),
            MockClock::new(0),
            DEVICE_ID,
        )
        .unwrap();
        assert_eq!(g.clock_seq(), 0x3434);
    }

    /// Fills bytes in bulk
    #[test]
    fn fills_bytes_in_bulk() {
        let mut a = Adapter(StepRng::new(0x0807_0605_0403_0201, 0));
        let mut buffer = [0u8; 8];
        a.fill_bytes(&mut buffer).unwrap();
        assert_eq!(buffer, [1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(a.next_byte(), Ok(1));
    }

    /// Maps RNG failure to unavailable entropy
    #[test]
    fn maps_rng_failure_to_unavailable_entropy() {
        struct Broken;
        impl rand::RngCore for Broken {
            fn next_u32(&mut self) -> u32 {
                unreachable!()
            }
            fn next_u64(&mut self) -> u64 {
                unreachable!()
            }
            fn fill_bytes(&mut self, _: &mut [u8]) {
                unreachable!()
            }
            fn try_fill_bytes(&mut self, _: &mut [u8]) -> Result<(), rand::Error> {
                Err(rand::Error::new("exhausted"))
            }
        }

        let mut a = Adapter(Broken);
        assert_eq!(
            a.next_byte(),
            Err(Error::SourceUnavailable(Source::Entropy))
        );
    }
}
