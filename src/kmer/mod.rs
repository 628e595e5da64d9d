//! K-mer processing module - canonical 2-bit encoding of DNA windows

pub mod encode;
