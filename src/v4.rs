//! UUIDv4-related functionality

use crate::{generator::EntropySource, Error, Uuid};

/// Generates a UUIDv4 object from 16 bytes of `entropy`.
///
/// # Examples
///
/// ```rust
/// use embedded_uuid::{generate_v4, with_rand08::Adapter};
///
/// let uuid = generate_v4(&mut Adapter(rand::rngs::OsRng))?;
/// println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
/// # Ok::<(), embedded_uuid::Error>(())
/// ```
pub fn generate_v4<E: EntropySource + ?Sized>(entropy: &mut E) -> Result<Uuid, Error> {
    let mut uuid = Uuid::NIL;
    entropy.fill_bytes(uuid.as_bytes_mut())?;
    uuid.stamp(4);
    Ok(uuid)
}

#[cfg(test)]
mod tests {
    use super::generate_v4;
    use crate::generator::with_rand08::Adapter;
    use crate::Variant;

    const N_SAMPLES: usize = 200_000;
    thread_local!(static SAMPLES: Vec<String> = {
        let mut rng = Adapter(rand::thread_rng());
        (0..N_SAMPLES).map(|_| generate_v4(&mut rng).unwrap().to_string()).collect()
    });

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(e));
            }
        });
    }

    /// Generates 200k identifiers without collision
    #[test]
    fn generates_200k_identifiers_without_collision() {
        use std::collections::HashSet;
        SAMPLES.with(|samples| {
            let s: HashSet<&String> = samples.iter().collect();
            assert_eq!(s.len(), N_SAMPLES);
        });
    }

    /// Sets constant bits and random bits properly
    #[test]
    fn sets_constant_bits_and_random_bits_properly() {
        // count '1' of each bit
        let bins = SAMPLES.with(|samples| {
            let mut bins = [0u32; 128];
            for e in samples {
                let mut it = bins.iter_mut().rev();
                for c in e.chars().rev() {
                    if let Some(mut num) = c.to_digit(16) {
                        for _ in 0..4 {
                            *it.next().unwrap() += num & 1;
                            num >>= 1;
                        }
                    }
                }
            }
            bins
        });

        // test if constant bits are all set to 1 or 0
        let n = N_SAMPLES as u32;
        assert_eq!(bins[48], 0, "version bit 48");
        assert_eq!(bins[49], n, "version bit 49");
        assert_eq!(bins[50], 0, "version bit 50");
        assert_eq!(bins[51], 0, "version bit 51");
        assert_eq!(bins[64], n, "variant bit 64");
        assert_eq!(bins[65], 0, "variant bit 65");

        // test if random bits are set to 1 at ~50% probability
        // set margin based on binom dist 99.999% confidence interval
        let margin = 4.417173 * (0.5 * 0.5 / N_SAMPLES as f64).sqrt();
        for i in (0..48).chain(52..64).chain(66..128) {
            let p = bins[i] as f64 / N_SAMPLES as f64;
            assert!((p - 0.5).abs() < margin, "random bit {}: {}", i, p);
        }
    }

    /// Sets correct variant and version bits
    #[test]
    fn sets_correct_variant_and_version_bits() {
        let mut rng = Adapter(rand::thread_rng());
        for _ in 0..1_000 {
            let e = generate_v4(&mut rng).unwrap();
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(4));
        }
    }
}
