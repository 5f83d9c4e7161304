//! BibPhoto Core - race photo lookup client
//!
//! This crate provides the logic behind the BibPhoto page: decoding and
//! cropping reference faces, compressing them under the service's payload
//! ceiling, and building and parsing the bib, search and download calls.

pub mod api;
pub mod compress;
pub mod config;
pub mod crop;
pub mod decode;
pub mod encode;
pub mod session;

pub use api::{ApiError, BibInfo, PreparedRequest, ThumbResponse};
pub use compress::{compress_jpeg, CompressionSettings, EncodedPayload};
pub use config::{ClientConfig, ConfigError};
pub use crop::{crop_face, CropError, CropRegion, CroppedImage};
pub use decode::{decode_upload, DecodeError, DecodedImage};
pub use session::{Session, SessionError, Tab};
