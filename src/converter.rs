//! # Memoizing converter
//!
//! [`Converter`] wraps every conversion in a bounded least-recently-used
//! cache keyed by the exact arguments. All conversions are deterministic,
//! so a cached result is byte-identical to a recomputed one.
//!
//! ```rust
//! use radix_steps::{Converter, ConverterConfig};
//!
//! let converter = Converter::new(ConverterConfig {
//!     cache_capacity: 64,
//!     ..ConverterConfig::default()
//! });
//!
//! let first = converter.convert_base("FF", 16, 10).unwrap();
//! let second = converter.convert_base("FF", 16, 10).unwrap();
//! assert_eq!(first, second);
//! assert_eq!(converter.stats().hits, 1);
//! ```

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};

use log::debug;
use lru::LruCache;

use crate::base::{self, Base};
use crate::error::ConversionError;
use crate::explanation::Conversion;
use crate::ieee754::{IeeeFormat, SubnormalMode, decode, encode};
use crate::{fraction, radix, signed};

/// Tunables for a [`Converter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConverterConfig {
    /// Maximum number of cached results. Zero disables caching.
    pub cache_capacity: usize,
    /// Decoder policy for zero-exponent, nonzero-mantissa patterns.
    pub subnormals: SubnormalMode,
    /// Fractional bits used by [`Converter::float_to_binary`].
    pub float_precision: i32,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 1024,
            subnormals: SubnormalMode::FlushToZero,
            float_precision: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CacheKey {
    Base { digits: String, from: u32, to: u32 },
    Signed { value: String, bits: u32 },
    FloatBinary { value: String, precision: i32 },
    // f64 keyed by bit pattern so that -0.0 and 0.0 stay distinct
    Encode { value: u64, bits: u32 },
    Decode { bits: String },
}

#[derive(Debug, Clone)]
enum Cached {
    Text(Conversion<String>),
    Number(Conversion<f64>),
}

/// Thread-safe conversion facade with an optional LRU result cache.
#[derive(Debug)]
pub struct Converter {
    config: ConverterConfig,
    cache: Option<Mutex<LruCache<CacheKey, Cached>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConverterConfig::default())
    }
}

impl Converter {
    pub fn new(config: ConverterConfig) -> Self {
        let cache = NonZeroUsize::new(config.cache_capacity).map(|c| Mutex::new(LruCache::new(c)));
        Self {
            config,
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Process-wide instance with the default configuration.
    pub fn global() -> &'static Converter {
        static GLOBAL: OnceLock<Converter> = OnceLock::new();
        GLOBAL.get_or_init(Converter::default)
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn stats(&self) -> CacheStats {
        let (entries, capacity) = match &self.cache {
            Some(cache) => {
                let cache = cache.lock().unwrap_or_else(PoisonError::into_inner);
                (cache.len(), cache.cap().get())
            }
            None => (0, 0),
        };
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries,
            capacity,
        }
    }

    /// Drops every cached result. Hit and miss counters are kept.
    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().unwrap_or_else(PoisonError::into_inner).clear();
        }
    }

    fn lookup(&self, key: &CacheKey) -> Option<Cached> {
        let cache = self.cache.as_ref()?;
        let found = cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned();
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("cache hit for {key:?}");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!("cache miss for {key:?}");
        }
        found
    }

    fn store(&self, key: CacheKey, value: Cached) {
        if let Some(cache) = &self.cache {
            let mut cache = cache.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some((evicted, _)) = cache.push(key, value) {
                debug!("evicted {evicted:?} from conversion cache");
            }
        }
    }

    fn cached_text(
        &self,
        key: CacheKey,
        compute: impl FnOnce() -> Result<Conversion<String>, ConversionError>,
    ) -> Result<Conversion<String>, ConversionError> {
        if let Some(Cached::Text(conversion)) = self.lookup(&key) {
            return Ok(conversion);
        }
        let conversion = compute()?;
        self.store(key, Cached::Text(conversion.clone()));
        Ok(conversion)
    }

    fn cached_number(
        &self,
        key: CacheKey,
        compute: impl FnOnce() -> Result<Conversion<f64>, ConversionError>,
    ) -> Result<Conversion<f64>, ConversionError> {
        if let Some(Cached::Number(conversion)) = self.lookup(&key) {
            return Ok(conversion);
        }
        let conversion = compute()?;
        self.store(key, Cached::Number(conversion.clone()));
        Ok(conversion)
    }

    /// Not cached: a single pass over the input is cheaper than a lookup.
    pub fn detect_base(&self, digits: &str) -> Result<Base, ConversionError> {
        base::detect_base(digits)
    }

    pub fn convert_base(
        &self,
        digits: &str,
        from_base: u32,
        to_base: u32,
    ) -> Result<Conversion<String>, ConversionError> {
        let key = CacheKey::Base {
            digits: digits.to_string(),
            from: from_base,
            to: to_base,
        };
        self.cached_text(key, || radix::convert_base(digits, from_base, to_base))
    }

    /// Every other base, each through the cache.
    pub fn convert_to_all_bases(
        &self,
        digits: &str,
        from_base: u32,
    ) -> Result<Vec<(Base, String)>, ConversionError> {
        let from = Base::try_from(from_base)?;
        Base::ALL
            .into_iter()
            .filter(|&to| to != from)
            .map(|to| {
                self.convert_base(digits, from_base, to.radix())
                    .map(|c| (to, c.value))
            })
            .collect()
    }

    pub fn convert_to_signed_binary(
        &self,
        value: &str,
        bits: u32,
    ) -> Result<Conversion<String>, ConversionError> {
        let key = CacheKey::Signed {
            value: value.to_string(),
            bits,
        };
        self.cached_text(key, || signed::convert_to_signed_binary(value, bits))
    }

    pub fn convert_float_to_binary(
        &self,
        value: &str,
        precision: i32,
    ) -> Result<Conversion<String>, ConversionError> {
        let key = CacheKey::FloatBinary {
            value: value.to_string(),
            precision,
        };
        self.cached_text(key, || fraction::convert_float_to_binary(value, precision))
    }

    /// [`Converter::convert_float_to_binary`] with the configured precision.
    pub fn float_to_binary(&self, value: &str) -> Result<Conversion<String>, ConversionError> {
        self.convert_float_to_binary(value, self.config.float_precision)
    }

    pub fn decimal_to_ieee754(
        &self,
        value: f64,
        bits: u32,
    ) -> Result<Conversion<String>, ConversionError> {
        let format = IeeeFormat::try_from(bits)?;
        let key = CacheKey::Encode {
            value: value.to_bits(),
            bits,
        };
        self.cached_text(key, || Ok(encode::encode(value, format)))
    }

    /// Decodes with the configured [`SubnormalMode`].
    pub fn ieee754_to_decimal(&self, bits: &str) -> Result<Conversion<f64>, ConversionError> {
        let key = CacheKey::Decode {
            bits: bits.to_string(),
        };
        self.cached_number(key, || {
            decode::ieee754_to_decimal_with(bits, self.config.subnormals)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn converter() -> Converter {
        Converter::new(ConverterConfig {
            cache_capacity: 4,
            ..ConverterConfig::default()
        })
    }

    #[rstest]
    fn test_hits_and_misses(converter: Converter) {
        let first = converter.convert_base("FF", 16, 10).unwrap();
        let second = converter.convert_base("FF", 16, 10).unwrap();
        assert_eq!(first, second);

        let stats = converter.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.capacity, 4);
    }

    #[rstest]
    fn test_errors_are_not_cached(converter: Converter) {
        assert!(converter.convert_to_signed_binary("128", 8).is_err());
        assert!(converter.convert_to_signed_binary("128", 8).is_err());
        let stats = converter.stats();
        assert_eq!(stats.entries, 0);
        assert_eq!(stats.misses, 2);
    }

    #[rstest]
    fn test_least_recently_used_is_evicted(converter: Converter) {
        for value in ["1", "2", "3", "4"] {
            converter.convert_base(value, 10, 2).unwrap();
        }
        // Touch "1" so that "2" becomes the oldest entry.
        converter.convert_base("1", 10, 2).unwrap();
        converter.convert_base("5", 10, 2).unwrap();
        assert_eq!(converter.stats().entries, 4);

        let hits = converter.stats().hits;
        converter.convert_base("1", 10, 2).unwrap();
        assert_eq!(converter.stats().hits, hits + 1);
        converter.convert_base("2", 10, 2).unwrap();
        assert_eq!(converter.stats().hits, hits + 1);
    }

    #[rstest]
    fn test_signed_zero_keys_are_distinct(converter: Converter) {
        converter.decimal_to_ieee754(0.0, 32).unwrap();
        converter.decimal_to_ieee754(-0.0, 32).unwrap();
        assert_eq!(converter.stats().entries, 2);
        assert_eq!(converter.stats().hits, 0);
    }

    #[rstest]
    fn test_disabled_cache() {
        let converter = Converter::new(ConverterConfig {
            cache_capacity: 0,
            ..ConverterConfig::default()
        });
        converter.convert_base("FF", 16, 2).unwrap();
        converter.convert_base("FF", 16, 2).unwrap();
        assert_eq!(converter.stats(), CacheStats::default());
    }

    #[rstest]
    fn test_clear(converter: Converter) {
        converter.convert_float_to_binary("2.5", 4).unwrap();
        converter.ieee754_to_decimal(&"0".repeat(32)).unwrap();
        assert_eq!(converter.stats().entries, 2);
        converter.clear();
        assert_eq!(converter.stats().entries, 0);
    }

    #[rstest]
    fn test_configured_subnormal_mode() {
        let smallest = format!("{}1", "0".repeat(31));
        let flushing = Converter::default();
        assert_eq!(flushing.ieee754_to_decimal(&smallest).unwrap().value, 0.0);

        let gradual = Converter::new(ConverterConfig {
            subnormals: SubnormalMode::Gradual,
            ..ConverterConfig::default()
        });
        assert_eq!(
            gradual.ieee754_to_decimal(&smallest).unwrap().value,
            f64::from(f32::from_bits(1))
        );
    }

    #[rstest]
    fn test_matches_uncached_functions(converter: Converter) {
        assert_eq!(
            converter.convert_base("377", 8, 16),
            radix::convert_base("377", 8, 16)
        );
        assert_eq!(
            converter.convert_to_signed_binary("-5", 8),
            signed::convert_to_signed_binary("-5", 8)
        );
        assert_eq!(
            converter.float_to_binary("0.1"),
            fraction::convert_float_to_binary("0.1", 10)
        );
        assert_eq!(
            converter.decimal_to_ieee754(0.1, 64),
            encode::decimal_to_ieee754(0.1, 64)
        );
        assert_eq!(
            converter.convert_to_all_bases("255", 10),
            radix::convert_to_all_bases("255", 10)
        );
        assert_eq!(converter.detect_base("FA"), Ok(Base::Hexadecimal));
    }

    #[rstest]
    fn test_shared_across_threads() {
        let converter = Arc::new(Converter::default());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let converter = Arc::clone(&converter);
                thread::spawn(move || {
                    for value in 0..100u32 {
                        let digits = (value + i).to_string();
                        let conversion = converter.convert_base(&digits, 10, 16).unwrap();
                        assert_eq!(conversion.value, format!("{:X}", value + i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        let stats = converter.stats();
        assert_eq!(stats.hits + stats.misses, 800);
        assert_eq!(stats.entries, 107);
    }

    #[rstest]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(Converter::global(), Converter::global()));
    }
}
