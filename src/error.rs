#[cfg(not(feature = "std"))]
use core as std;

use std::fmt;

/// An external capability that a generator draws from.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Source {
    /// The random byte source.
    Entropy,
    /// The wall clock.
    Clock,
    /// The device-unique identifier source.
    DeviceId,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Entropy => "entropy source",
            Self::Clock => "clock",
            Self::DeviceId => "device id source",
        })
    }
}

/// Error generating a UUID.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Error {
    /// The caller broke a documented precondition of the operation.
    PreconditionViolation(&'static str),

    /// An injected capability could not deliver.
    SourceUnavailable(Source),

    /// The intra-tick counter has used up every timestamp the current clock tick can represent.
    ///
    /// The counter recovers as soon as the clock advances to the next tick.
    TickExhausted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreconditionViolation(what) => write!(f, "precondition violated: {}", what),
            Self::SourceUnavailable(source) => write!(f, "{} unavailable", source),
            Self::TickExhausted => write!(f, "no more timestamps available in current clock tick"),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl std::error::Error for Error {}
