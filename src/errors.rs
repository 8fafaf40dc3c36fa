use std::{error, fmt};

use crate::crypto::KerberosCryptoError;

/// The kind of a decode/validation error. Enables to specify the error based on its type.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Zero-length SPNEGO token.
    EmptySpnegoToken,
    /// SPNEGO token structure does not decode: wrong tag, truncated or overrunning length.
    MalformedSpnegoToken,
    /// SPNEGO token decodes but carries an unexpected value (e.g. a non-SPNEGO leading OID).
    InvalidSpnegoToken,
    /// Zero-length Kerberos mechanism token.
    EmptyKerberosToken,
    /// Kerberos mechanism token or AP-REQ structure does not decode.
    MalformedKerberosToken,
    /// No candidate key decrypted the ticket's enc-part.
    TicketDecryptionFailed,
    /// A supplied key cannot be used at all (unknown encryption type).
    InvalidKey,
    /// PAC directory or buffer bounds violation.
    MalformedPac,
    /// PAC version field is not zero.
    InvalidPacVersion,
    /// Recomputed PAC signature does not match, or a required signing key is missing.
    PacChecksumMismatch,
    /// KERB_VALIDATION_INFO buffer does not decode.
    MalformedLogonInfo,
    /// UPN_DNS_INFO buffer does not decode.
    MalformedUpnDnsInfo,
    /// PAC_CLIENT_INFO buffer does not decode.
    MalformedClientInfo,
    /// SID binary layout violation.
    MalformedSid,
    /// A decoded node is not of the expected concrete shape.
    ObjectCast,
}

impl ErrorKind {
    /// Stable machine-readable key, suitable for caller-side logging and localization.
    pub fn key(self) -> &'static str {
        match self {
            ErrorKind::EmptySpnegoToken => "spnego.token.empty",
            ErrorKind::MalformedSpnegoToken => "spnego.token.malformed",
            ErrorKind::InvalidSpnegoToken => "spnego.token.invalid",
            ErrorKind::EmptyKerberosToken => "kerberos.token.empty",
            ErrorKind::MalformedKerberosToken => "kerberos.token.malformed",
            ErrorKind::TicketDecryptionFailed => "kerberos.ticket.decrypt.fail",
            ErrorKind::InvalidKey => "kerberos.key.invalid",
            ErrorKind::MalformedPac => "pac.malformed",
            ErrorKind::InvalidPacVersion => "pac.version.invalid",
            ErrorKind::PacChecksumMismatch => "pac.checksum.fail",
            ErrorKind::MalformedLogonInfo => "pac.logoninfo.malformed",
            ErrorKind::MalformedUpnDnsInfo => "pac.upndnsinfo.malformed",
            ErrorKind::MalformedClientInfo => "pac.clientinfo.malformed",
            ErrorKind::MalformedSid => "pac.sid.malformed",
            ErrorKind::ObjectCast => "object.cast.fail",
        }
    }
}

/// Holds the [ErrorKind] and the description of the error.
#[derive(Debug, Clone)]
pub struct Error {
    pub kind: ErrorKind,
    pub description: String,
}

impl Error {
    /// Allows to fill a new error easily, supplying it with a coherent description.
    pub fn new(kind: ErrorKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.key(), self.description)
    }
}

impl From<KerberosCryptoError> for Error {
    fn from(err: KerberosCryptoError) -> Self {
        Self::new(ErrorKind::TicketDecryptionFailed, format!("Kerberos crypto error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_keys_are_stable() {
        assert_eq!(ErrorKind::MalformedSpnegoToken.key(), "spnego.token.malformed");
        assert_eq!(ErrorKind::InvalidSpnegoToken.key(), "spnego.token.invalid");
        assert_eq!(ErrorKind::EmptyKerberosToken.key(), "kerberos.token.empty");
        assert_eq!(ErrorKind::MalformedKerberosToken.key(), "kerberos.token.malformed");
        assert_eq!(ErrorKind::MalformedUpnDnsInfo.key(), "pac.upndnsinfo.malformed");
        assert_eq!(ErrorKind::ObjectCast.key(), "object.cast.fail");
    }

    #[test]
    fn error_display_carries_the_key() {
        let err = Error::new(ErrorKind::MalformedPac, "buffer 2 overruns the directory");

        assert_eq!(err.to_string(), "pac.malformed: buffer 2 overruns the directory");
    }
}
