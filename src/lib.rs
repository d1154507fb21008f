//! Port of Amir Said's fast arithmetic coder to Rust.
//!
//! An [`ArithmeticCodec`] maps a stream of symbols onto a single
//! variable-length byte string whose length approaches the entropy of the
//! source. Symbol probabilities come from one of five models: fixed or
//! adaptive, binary or multi-symbol, plus an adaptive variant with an
//! *escape* symbol for alphabets learned on the fly.
//!
//! The decoder must drive its models with the same symbol history the
//! encoder saw; models are therefore constructed fresh (with the same
//! configuration) on both sides.
//!
//! # Examples
//!
//! ```
//! use fastac::{AdaptiveDataModel, ArithmeticCodec, FastAcError};
//!
//! # fn main() -> Result<(), FastAcError> {
//! let message: Vec<u8> = b"abracadabra".iter().cloned().cycle().take(220).collect();
//!
//! let mut codec = ArithmeticCodec::new(4096)?;
//! let mut model = AdaptiveDataModel::new(256)?;
//! codec.start_encoder()?;
//! for &byte in &message {
//!     codec.encode_symbol(&mut model, u32::from(byte))?;
//! }
//! let code_bytes = codec.stop_encoder()?;
//! assert!(code_bytes < message.len());
//!
//! // decoding starts over with an equally configured model
//! let mut model = AdaptiveDataModel::new(256)?;
//! codec.start_decoder()?;
//! for &byte in &message {
//!     assert_eq!(codec.decode_symbol(&mut model)?, u32::from(byte));
//! }
//! codec.stop_decoder()?;
//! # Ok(())
//! # }
//! ```
//!
//! Streams meant to be stored or exchanged get a length-prefixed frame;
//! [`ArithmeticCodec::write_to`] and [`ArithmeticCodec::read_from`] handle
//! it over anything implementing `Write` / `Read`:
//!
//! ```
//! use fastac::{ArithmeticCodec, FastAcError, StaticBitModel};
//!
//! # fn main() -> Result<(), FastAcError> {
//! let mut stored = std::io::Cursor::new(Vec::new());
//!
//! let mut codec = ArithmeticCodec::new(64)?;
//! let mut model = StaticBitModel::with_probability_0(0.9);
//! codec.start_encoder()?;
//! for bit in &[0, 0, 1, 0, 0, 0, 1, 0] {
//!     codec.encode_bit(&mut model, *bit)?;
//! }
//! codec.write_to(&mut stored)?;
//!
//! stored.set_position(0);
//! let mut codec = ArithmeticCodec::new(64)?;
//! let mut model = StaticBitModel::with_probability_0(0.9);
//! codec.read_from(&mut stored)?;
//! for bit in &[0, 0, 1, 0, 0, 0, 1, 0] {
//!     assert_eq!(codec.decode_bit(&mut model)?, *bit);
//! }
//! codec.stop_decoder()?;
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod constants;
pub mod errors;
pub mod framing;
pub mod models;

pub use codec::{ArithmeticCodec, Mode};
pub use errors::FastAcError;
pub use models::{
    AdaptiveBitModel, AdaptiveDataModel, AdaptiveEscDataModel, BitModel, DataModel,
    StaticBitModel, StaticDataModel,
};
