//! Bearer credential handling
//!
//! Login and refresh flows live outside this application; it only reads the
//! token the platform stored for it.

pub mod storage;
