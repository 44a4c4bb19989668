//! Code decrypters.

pub mod kms;

pub use kms::{EnvelopeDecryptor, EsdkEnvelopeDecryptor, KmsCodeDecrypter};
