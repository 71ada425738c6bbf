//! Time-node generator and the capability traits it draws from.

#[cfg(not(feature = "std"))]
use core as std;

use crate::{id::UUID_EPOCH_OFFSET, Error, Source, Uuid};

pub mod with_rand08;

#[cfg(test)]
mod tests;

/// Number of 100-nanosecond UUID timestamp units per second.
const UNITS_PER_SECOND: u64 = 10_000_000;

/// Largest timestamp representable in the 60-bit field plus one.
const TIMESTAMP_LIMIT: u64 = 1 << 60;

/// Number of consecutive clock reads within one exhausted tick after which the clock is
/// considered stuck.
const MAX_STALLED_READS: u32 = 1 << 20;

/// A trait that defines the minimum random byte source interface for [`Generator`].
///
/// The source is assumed to be seeded before the first UUID is generated.
pub trait EntropySource {
    /// Returns the next random byte.
    fn next_byte(&mut self) -> Result<u8, Error>;

    /// Fills `dest` with random bytes.
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        for e in dest.iter_mut() {
            *e = self.next_byte()?;
        }
        Ok(())
    }
}

/// A reading of the wall clock.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct ClockReading {
    /// Whole seconds since the Unix epoch.
    pub seconds: u64,

    /// Sub-second part counted in ticks of [`TimeSource::TICKS_PER_SECOND`].
    pub fraction: u32,
}

/// A trait that defines the wall clock interface for [`Generator`].
pub trait TimeSource {
    /// Tick rate of [`ClockReading::fraction`], from 1 Hz up to 10 MHz.
    const TICKS_PER_SECOND: u32;

    /// Returns the current time.
    fn current_time(&mut self) -> Result<ClockReading, Error>;
}

/// A trait that defines the device-unique identifier interface for [`Generator`].
pub trait DeviceIdSource {
    /// Writes up to `buf.len()` bytes of the device identifier into `buf` and returns the number
    /// of bytes written.
    fn read_id(&mut self, buf: &mut [u8]) -> Result<usize, Error>;
}

/// A fixed identifier, e.g. a serial number burned into the device at manufacture.
impl<const N: usize> DeviceIdSource for [u8; N] {
    fn read_id(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let n = N.min(buf.len());
        buf[..n].copy_from_slice(&self[..n]);
        Ok(n)
    }
}

/// [`TimeSource`] implementation backed by [`std::time::SystemTime`] at 100-nanosecond
/// resolution.
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
pub struct StdSystemTime;

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl TimeSource for StdSystemTime {
    const TICKS_PER_SECOND: u32 = 10_000_000;

    fn current_time(&mut self) -> Result<ClockReading, Error> {
        use std::time;
        let elapsed = time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .map_err(|_| Error::SourceUnavailable(Source::Clock))?;
        Ok(ClockReading {
            seconds: elapsed.as_secs(),
            fraction: elapsed.subsec_nanos() / 100,
        })
    }
}

/// The arrangement of the 60-bit timestamp in a time-based UUID.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Layout {
    /// RFC4122 version 1: `time_low`, `time_mid` and `time_hi` hold the timestamp from its least
    /// significant end.
    V1,

    /// Version 6: the timestamp is stored most significant bits first, so that the byte order
    /// of UUIDs matches their creation order.
    V6,
}

impl Layout {
    /// Returns the version number stamped by this layout.
    pub const fn version(self) -> u8 {
        match self {
            Self::V1 => 1,
            Self::V6 => 6,
        }
    }

    fn write(self, out: &mut Uuid, timestamp: u64) {
        let b = out.as_bytes_mut();
        match self {
            Self::V1 => {
                b[0..4].copy_from_slice(&(timestamp as u32).to_be_bytes());
                b[4..6].copy_from_slice(&((timestamp >> 32) as u16).to_be_bytes());
                b[6..8].copy_from_slice(&((timestamp >> 48) as u16).to_be_bytes());
            }
            Self::V6 => {
                b[0..6].copy_from_slice(&(timestamp >> 12).to_be_bytes()[2..]);
                b[6] = (timestamp >> 8) as u8 & 0x0f;
                b[7] = timestamp as u8;
            }
        }
        out.stamp(self.version());
    }
}

/// Represents a UUID generator that encapsulates the time-node template and an intra-tick
/// counter, and guarantees distinct, increasing timestamps for version 1 and version 6 UUIDs
/// generated within the same clock tick.
///
/// The generator owns the capabilities it draws from: an [`EntropySource`] for the clock
/// sequence and version 4 UUIDs, a [`TimeSource`] for timestamps, and a [`DeviceIdSource`] for
/// the node field. It is constructed in the ready state; there is no way to obtain an
/// uninitialized one.
///
/// A generator is driven through `&mut self` and never locks. The following example shares one
/// across threads using Rust's standard synchronization mechanism.
///
/// # Examples
///
/// ```rust
/// use embedded_uuid::{Generator, StdSystemTime};
/// use std::{sync, thread};
///
/// let g = Generator::with_rand08(rand::rngs::OsRng, StdSystemTime, [0x5e, 1, 2, 3, 4, 5])?;
/// let g = sync::Arc::new(sync::Mutex::new(g));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = sync::Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.lock().unwrap().generate_v6().unwrap(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// # Ok::<(), embedded_uuid::Error>(())
/// ```
///
/// # Intra-tick counter
///
/// When the clock reports the same tick as the previous call, the counter is incremented and
/// added to the timestamp. The counter is bounded by the width of one clock tick in 100-ns
/// units (`10_000_000 / TICKS_PER_SECOND`), so an adjusted timestamp never reaches the next
/// tick. Once the bound is reached, [`generate_core`] returns [`Error::TickExhausted`] and
/// [`generate_v1`] / [`generate_v6`] re-read the clock until it moves on. If the clock is still
/// in the same tick after 2<sup>20</sup> re-reads, they return [`Error::TickExhausted`] as well.
///
/// [`generate_core`]: Generator::generate_core
/// [`generate_v1`]: Generator::generate_v1
/// [`generate_v6`]: Generator::generate_v6
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Generator<E, C, D> {
    template: Uuid,
    last_timestamp: u64,
    ticks: u32,

    /// The random byte source used by the generator.
    entropy: E,

    /// The wall clock used by the generator.
    clock: C,

    /// The device identifier source used by the generator.
    device: D,
}

impl<E: EntropySource, C: TimeSource, D: DeviceIdSource> Generator<E, C, D> {
    /// Width of one clock tick in 100-ns units.
    const TICK_WIDTH: u32 = (UNITS_PER_SECOND / C::TICKS_PER_SECOND as u64) as u32;

    /// Creates a generator instance and initializes its time-node template.
    pub fn new(entropy: E, clock: C, device: D) -> Result<Self, Error> {
        if C::TICKS_PER_SECOND == 0 || C::TICKS_PER_SECOND as u64 > UNITS_PER_SECOND {
            return Err(Error::PreconditionViolation(
                "clock tick rate must be between 1 Hz and 10 MHz",
            ));
        }

        let mut g = Self {
            template: Uuid::NIL,
            last_timestamp: 0,
            ticks: 0,
            entropy,
            clock,
            device,
        };
        g.init()?;
        Ok(g)
    }

    /// Reads the node from the device identifier source and seeds a new random clock sequence.
    ///
    /// Bytes the device does not supply are left zero. The multicast bit (the least significant
    /// bit of the first node octet) is always set, marking the node as something other than an
    /// IEEE 802 address.
    ///
    /// [`new`](Generator::new) already calls this. Calling it again changes the identity of the
    /// generator: subsequent UUIDs carry a new clock sequence.
    pub fn init(&mut self) -> Result<(), Error> {
        let mut node = [0u8; 6];
        let n = self.device.read_id(&mut node)?.min(node.len());
        node[n..].fill(0);
        node[0] |= 0x01;

        let clock_seq_low = self.entropy.next_byte()?;
        let clock_seq_hi_and_reserved = self.entropy.next_byte()?;

        self.template.clear();
        self.template.set_node(&node);
        self.template
            .set_clock_seq(clock_seq_hi_and_reserved, clock_seq_low);

        log::debug!(
            "time-node template initialized: {} device id bytes, clock sequence {:#06x}",
            n,
            self.clock_seq()
        );
        Ok(())
    }

    /// Returns the node field copied into every time-based UUID.
    pub fn node(&self) -> [u8; 6] {
        self.template.node()
    }

    /// Returns the 14-bit clock sequence copied into every time-based UUID.
    pub fn clock_seq(&self) -> u16 {
        (((self.template.clock_seq_hi_and_reserved() & 0x3f) as u16) << 8)
            | self.template.clock_seq_low() as u16
    }

    /// Generates a new version 1 UUID from the current time.
    pub fn generate_v1(&mut self) -> Result<Uuid, Error> {
        self.generate_with_clock(Layout::V1)
    }

    /// Generates a new version 6 UUID from the current time.
    ///
    /// Version 6 UUIDs from the same generator sort by creation time when compared as bytes.
    pub fn generate_v6(&mut self) -> Result<Uuid, Error> {
        self.generate_with_clock(Layout::V6)
    }

    /// Generates a new version 4 UUID utilizing the random byte source inside.
    pub fn generate_v4(&mut self) -> Result<Uuid, Error> {
        crate::v4::generate_v4(&mut self.entropy)
    }

    /// Generates a new time-based UUID from a `timestamp` counted in 100-ns intervals since the
    /// UUID epoch (1582-10-15T00:00:00Z).
    ///
    /// This is the low-level primitive behind [`generate_v1`](Generator::generate_v1) and
    /// [`generate_v6`](Generator::generate_v6). It returns [`Error::TickExhausted`] without
    /// touching the generator state when the intra-tick counter cannot be incremented further;
    /// the caller decides whether to wait for the next tick.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PreconditionViolation`] if `timestamp`, or `timestamp` adjusted by the
    /// intra-tick counter, does not fit in 60 bits.
    pub fn generate_core(&mut self, layout: Layout, timestamp: u64) -> Result<Uuid, Error> {
        const OUT_OF_RANGE: Error = Error::PreconditionViolation("timestamp must fit in 60 bits");

        if timestamp >= TIMESTAMP_LIMIT {
            return Err(OUT_OF_RANGE);
        }

        let effective = if timestamp == self.last_timestamp {
            let ticks = self.ticks + 1;
            if ticks >= Self::TICK_WIDTH {
                log::trace!("intra-tick counter exhausted at timestamp {}", timestamp);
                return Err(Error::TickExhausted);
            }
            let adjusted = timestamp + ticks as u64;
            if adjusted >= TIMESTAMP_LIMIT {
                return Err(OUT_OF_RANGE);
            }
            log::trace!("timestamp collision, intra-tick sequence {}", ticks);
            self.ticks = ticks;
            adjusted
        } else {
            if timestamp < self.last_timestamp {
                log::warn!(
                    "clock moved backwards by {} units",
                    self.last_timestamp - timestamp
                );
            }
            // keep the tick boundary, not the adjusted value
            self.last_timestamp = timestamp;
            self.ticks = 0;
            timestamp
        };

        let mut out = self.template;
        layout.write(&mut out, effective);
        Ok(out)
    }

    fn generate_with_clock(&mut self, layout: Layout) -> Result<Uuid, Error> {
        let mut stalled_reads = 0;
        loop {
            let timestamp = to_timestamp::<C>(self.clock.current_time()?)?;
            match self.generate_core(layout, timestamp) {
                Err(Error::TickExhausted) if stalled_reads < MAX_STALLED_READS => {
                    stalled_reads += 1;
                    std::hint::spin_loop();
                }
                Err(Error::TickExhausted) => {
                    log::warn!("clock did not advance in {} reads", stalled_reads);
                    return Err(Error::TickExhausted);
                }
                result => return result,
            }
        }
    }
}

/// Converts a clock reading into 100-ns intervals since the UUID epoch.
fn to_timestamp<C: TimeSource>(reading: ClockReading) -> Result<u64, Error> {
    if reading.fraction >= C::TICKS_PER_SECOND {
        return Err(Error::PreconditionViolation(
            "clock fraction must be less than one second",
        ));
    }

    let fraction = reading.fraction as u64 * UNITS_PER_SECOND / C::TICKS_PER_SECOND as u64;
    reading
        .seconds
        .checked_mul(UNITS_PER_SECOND)
        .and_then(|e| e.checked_add(fraction + UUID_EPOCH_OFFSET))
        .filter(|e| *e < TIMESTAMP_LIMIT)
        .ok_or(Error::PreconditionViolation(
            "clock reading out of UUID timestamp range",
        ))
}


#[cfg(test)]
mod tests_generate_core {
    use super::tests::{for_testing, TICK};
    use super::Layout;
    use crate::{Error, Uuid, Variant};

    const TS: u64 = 0x0123_4567_89ab_cdef;

    /// Lays out prepared cases correctly
    #[test]
    fn lays_out_prepared_cases_correctly() {
        let cases = [
            (Layout::V1, "89abcdef-4567-1123-9234-a1b1c2d3e4f5"),
            (Layout::V6, "12345678-9abc-6def-9234-a1b1c2d3e4f5"),
        ];
        for (layout, text) in cases {
            let e = for_testing(0).generate_core(layout, TS).unwrap();
            assert_eq!(Ok(e), text.parse::<Uuid>());
            assert_eq!(e.timestamp(), Some(TS));
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(layout.version()));
        }
    }

    /// Increments timestamps within same tick
    #[test]
    fn increments_timestamps_within_same_tick() {
        for layout in [Layout::V1, Layout::V6] {
            let mut g = for_testing(0);
            let mut prev = g.generate_core(layout, TS).unwrap();
            for i in 1..TICK {
                let curr = g.generate_core(layout, TS).unwrap();
                assert_eq!(curr.timestamp(), Some(TS + i));
                assert!(prev.timestamp() < curr.timestamp());
                prev = curr;
            }
        }
    }

    /// Returns error when counter reaches tick width
    #[test]
    fn returns_error_when_counter_reaches_tick_width() {
        let mut g = for_testing(0);
        for _ in 0..TICK {
            g.generate_core(Layout::V1, TS).unwrap();
        }
        assert_eq!(g.generate_core(Layout::V1, TS), Err(Error::TickExhausted));
        assert_eq!(g.generate_core(Layout::V1, TS), Err(Error::TickExhausted));

        let next = g.generate_core(Layout::V1, TS + TICK).unwrap();
        assert_eq!(next.timestamp(), Some(TS + TICK));
        let next = g.generate_core(Layout::V1, TS + TICK).unwrap();
        assert_eq!(next.timestamp(), Some(TS + TICK + 1));
    }

    /// Resets counter at new tick
    #[test]
    fn resets_counter_at_new_tick() {
        let mut g = for_testing(0);
        g.generate_core(Layout::V6, TS).unwrap();
        g.generate_core(Layout::V6, TS).unwrap();
        let e = g.generate_core(Layout::V6, TS).unwrap();
        assert_eq!(e.timestamp(), Some(TS + 2));

        let e = g.generate_core(Layout::V6, TS + TICK).unwrap();
        assert_eq!(e.timestamp(), Some(TS + TICK));

        // a rolled back clock starts a new tick as well
        let e = g.generate_core(Layout::V6, TS).unwrap();
        assert_eq!(e.timestamp(), Some(TS));
    }

    /// Sorts v6 bytes in generation order
    #[test]
    fn sorts_v6_bytes_in_generation_order() {
        let mut g = for_testing(0);
        let mut prev = g.generate_core(Layout::V6, TS).unwrap();
        for i in 1..100_000u64 {
            let curr = g.generate_core(Layout::V6, TS + (i / 7) * TICK).unwrap();
            assert!(prev < curr);
            assert!(prev.as_bytes() < curr.as_bytes());
            prev = curr;
        }
    }

    /// Rejects timestamp beyond 60 bits
    #[test]
    fn rejects_timestamp_beyond_60_bits() {
        let mut g = for_testing(0);
        assert!(matches!(
            g.generate_core(Layout::V1, 1 << 60),
            Err(Error::PreconditionViolation(_))
        ));
        assert!(g.generate_core(Layout::V1, (1 << 60) - 1).is_ok());
    }

    /// Rejects counter adjustment beyond 60 bits
    #[test]
    fn rejects_counter_adjustment_beyond_60_bits() {
        let max = (1 << 60) - 1;
        for layout in [Layout::V1, Layout::V6] {
            let mut g = for_testing(0);
            let e = g.generate_core(layout, max).unwrap();
            assert_eq!(e.timestamp(), Some(max));
            for _ in 0..3 {
                assert!(matches!(
                    g.generate_core(layout, max),
                    Err(Error::PreconditionViolation(_))
                ));
            }

            let e = g.generate_core(layout, max - TICK).unwrap();
            assert_eq!(e.timestamp(), Some(max - TICK));
            let e = g.generate_core(layout, max - TICK).unwrap();
            assert_eq!(e.timestamp(), Some(max - TICK + 1));
        }
    }
}
