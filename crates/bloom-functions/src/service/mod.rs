//! Service Layer
//!
//! SQL function implementations and their registration.

pub mod functions;

pub use functions::{
    BloomContains, BloomFilterAggregate, BloomFunctions, MurmurHash, BLOOMFILTER, BLOOM_CONTAINS,
    MURMURHASH,
};
