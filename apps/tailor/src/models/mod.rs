pub mod application;
pub mod classification;
pub mod posting;
