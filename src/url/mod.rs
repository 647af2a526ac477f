//! URL handling module for Kumo
//!
//! This module provides link resolution, URL normalization, and domain and
//! extension extraction. The normalized form produced here is the canonical
//! key used by the visited set and the statistics aggregator.

mod domain;
mod normalize;

pub use domain::{extract_domain, extract_extension};
pub use normalize::{normalize_absolute, resolve_and_normalize};
