// Decision core: profile, keyword extraction, classification, fit scoring, strategy gate.
// Pure functions over an immutable `MatchingProfile`; no I/O beyond loading the profile.

pub mod classifier;
pub mod fit_scoring;
pub mod keywords;
pub mod profile;
pub mod strategy;
