use super::*;

/// Device identifier supplied to generators under test.
pub const DEVICE_ID: [u8; 6] = [0xa0, 0xb1, 0xc2, 0xd3, 0xe4, 0xf5];

/// Width of one [`MockClock`] tick in 100-ns units.
pub const TICK: u64 = 10_000;

/// Returns a generator whose clock starts at 1_500_000_000 seconds and advances by one tick
/// every `reads_per_tick` reads, or never if `reads_per_tick` is zero.
pub fn for_testing(reads_per_tick: u32) -> Generator<MockEntropy, MockClock, [u8; 6]> {
    with_sources(
        MockEntropy::new(&[0x34, 0x12]),
        MockClock::new(reads_per_tick),
    )
}

/// Returns a generator over [`DEVICE_ID`] that draws from `entropy` and `clock`.
pub fn with_sources<E: EntropySource, C: TimeSource>(
    entropy: E,
    clock: C,
) -> Generator<E, C, [u8; 6]> {
    Generator::new(entropy, clock, DEVICE_ID).unwrap()
}

/// Replays a fixed byte sequence; random bytes are drawn from `rand` once it runs out.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct MockEntropy {
    seed: &'static [u8],
    pos: usize,
}

impl MockEntropy {
    pub fn new(seed: &'static [u8]) -> Self {
        Self { seed, pos: 0 }
    }
}

impl EntropySource for MockEntropy {
    fn next_byte(&mut self) -> Result<u8, Error> {
        let pos = self.pos;
        self.pos += 1;
        Ok(self.seed.get(pos).copied().unwrap_or_else(rand::random))
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FailingEntropy;

impl EntropySource for FailingEntropy {
    fn next_byte(&mut self) -> Result<u8, Error> {
        Err(Error::SourceUnavailable(Source::Entropy))
    }
}

/// A millisecond clock that moves forward only as it is read.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct MockClock {
    reads: u32,
    reads_per_tick: u32,
}

impl MockClock {
    pub fn new(reads_per_tick: u32) -> Self {
        Self {
            reads: 0,
            reads_per_tick,
        }
    }
}

impl TimeSource for MockClock {
    const TICKS_PER_SECOND: u32 = 1_000;

    fn current_time(&mut self) -> Result<ClockReading, Error> {
        let fraction = self.reads.checked_div(self.reads_per_tick).unwrap_or(0);
        self.reads += 1;
        Ok(ClockReading {
            seconds: 1_500_000_000,
            fraction,
        })
    }
}

/// Hands out `remaining` zero bytes, then fails.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FiniteEntropy {
    remaining: usize,
}

impl FiniteEntropy {
    pub fn new(remaining: usize) -> Self {
        Self { remaining }
    }
}

impl EntropySource for FiniteEntropy {
    fn next_byte(&mut self) -> Result<u8, Error> {
        if self.remaining == 0 {
            return Err(Error::SourceUnavailable(Source::Entropy));
        }
        self.remaining -= 1;
        Ok(0)
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FailingClock;

impl TimeSource for FailingClock {
    const TICKS_PER_SECOND: u32 = 1_000;

    fn current_time(&mut self) -> Result<ClockReading, Error> {
        Err(Error::SourceUnavailable(Source::Clock))
    }
}
