//! SPNEGO token and Kerberos PAC decoding for HTTP `Negotiate` authentication.
//!
//! This crate takes the raw bytes of an `Authorization: Negotiate` token plus
//! caller-supplied Kerberos keys and recovers the authenticated principal's
//! identity and group SIDs:
//!
//! 1. [spnego::SpnegoToken] decodes the SPNEGO NegTokenInit,
//! 2. [kerberos::KerberosMechToken] unwraps the embedded AP-REQ,
//! 3. [kerberos::decrypt_ticket] decrypts the ticket's enc-part under
//!    RC4-HMAC, DES-CBC-MD5 or AES128/256-CTS-HMAC-SHA1-96,
//! 4. [kerberos::find_pac_data] walks the nested authorization data,
//! 5. [pac::Pac] decodes the PAC directory, verifies its signatures and
//!    exposes [pac::PacLogonInfo] and [pac::PacUpnDnsInfo].
//!
//! [negotiate::accept_negotiate_token] chains the whole pipeline. Every
//! component is a pure function over caller-owned buffers; acquiring tickets,
//! reading keytabs and the GSS-API handshake itself stay with the caller.

mod ber;
pub mod crypto;
mod errors;
pub mod kerberos;
pub mod negotiate;
pub mod pac;
mod secret;
pub mod spnego;
mod utils;

pub use crate::crypto::CipherSuite;
pub use crate::errors::{Error, ErrorKind, Result};
pub use crate::kerberos::KerberosKey;
pub use crate::negotiate::{accept_negotiate_token, AuthenticatedUser};
pub use crate::pac::{ChecksumPolicy, Pac, PacLogonInfo, PacSid, PacUpnDnsInfo};
pub use crate::secret::Secret;
pub use crate::spnego::SpnegoToken;
