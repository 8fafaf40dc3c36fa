pub mod aes;
mod checksum;
mod cipher;
mod common;
mod des;
mod nfold;
mod rc4;
mod utils;

use thiserror::Error;

pub use self::checksum::{cksum_types, Checksum, ChecksumSuite, KERB_NON_KERB_CKSUM_SALT};
pub use self::cipher::{Cipher, CipherSuite};
pub use self::des::DesCbcMd5;
pub use self::rc4::{Rc4, Rc4HmacMd5};

//= [Assigned Numbers](https://datatracker.ietf.org/doc/html/rfc3961#section-8) =//
pub mod etypes {
    pub const DES_CBC_MD5: u8 = 3;
    pub const AES128_CTS_HMAC_SHA1_96: u8 = 17;
    pub const AES256_CTS_HMAC_SHA1_96: u8 = 18;
    /// [RFC 4757](https://datatracker.ietf.org/doc/html/rfc4757#section-2)
    pub const RC4_HMAC: u8 = 23;
}

#[derive(Error, Debug)]
pub enum KerberosCryptoError {
    #[error("invalid key length: {0}. Expected: {1}")]
    KeyLength(usize, usize),
    #[error("invalid cipher length: {0}. Expected at least: {1}")]
    CipherLength(usize, usize),
    #[error("invalid algorithm identifier: {0}")]
    AlgorithmIdentifier(u32),
    #[error("invalid algorithm identifier: {0:?}")]
    AlgorithmIdentifierData(Vec<u8>),
    #[error("bad integrity: calculated checksum is different than provided")]
    IntegrityCheck,
    #[error("cipher error: {0}")]
    CipherError(String),
}

pub type KerberosCryptoResult<T> = Result<T, KerberosCryptoError>;
