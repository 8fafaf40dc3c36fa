mod mech_fixer;

use std::io::Cursor;

use bitflags::bitflags;
pub use mech_fixer::prefer_krb5_mech;
use oid::ObjectIdentifier;
use picky_asn1_x509::oids;
use tracing::instrument;

use crate::ber::{self, Pc};
use crate::{Error, ErrorKind, Result};

/// Encoded value bytes of the SPNEGO mechanism OID 1.3.6.1.5.5.2.
pub(crate) const SPNEGO_OID_VALUE: [u8; 6] = [0x2B, 0x06, 0x01, 0x05, 0x05, 0x02];
/// Encoded value bytes of the Kerberos V5 mechanism OID 1.2.840.113554.1.2.2.
pub(crate) const KRB5_OID_VALUE: [u8; 9] = [0x2A, 0x86, 0x48, 0x86, 0xF7, 0x12, 0x01, 0x02, 0x02];
/// Encoded value bytes of the MS-KRB5 mechanism OID 1.2.840.48018.1.2.2.
#[cfg(test)]
pub(crate) const MS_KRB5_OID_VALUE: [u8; 9] = [0x2A, 0x86, 0x48, 0x82, 0xF7, 0x12, 0x01, 0x02, 0x02];

bitflags! {
    /// GSS-API ContextFlags carried in the NegTokenInit reqFlags BIT STRING.
    ///
    /// Bit numbers follow [RFC 2478 3.2.1](https://datatracker.ietf.org/doc/html/rfc2478#section-3.2.1);
    /// bit 0 is the most significant bit of the first content octet.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ContextFlags: u8 {
        const DELEG = 0x80;
        const MUTUAL = 0x40;
        const REPLAY = 0x20;
        const SEQUENCE = 0x10;
        const ANON = 0x08;
        const CONF = 0x04;
        const INTEG = 0x02;
    }
}

/// A decoded SPNEGO NegTokenInit.
///
/// ```not_rust
/// NegTokenInit ::= SEQUENCE {
///     mechTypes       [0] MechTypeList,
///     reqFlags        [1] ContextFlags  OPTIONAL,
///     mechToken       [2] OCTET STRING  OPTIONAL,
///     mechListMIC     [3] OCTET STRING  OPTIONAL,
/// }
/// ```
///
/// All inner fields are optional on the wire; absence is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpnegoToken {
    mechanisms: Vec<ObjectIdentifier>,
    context_flags: Option<ContextFlags>,
    mechanism_token: Option<Vec<u8>>,
    mechanism_list_mic: Option<Vec<u8>>,
}

impl SpnegoToken {
    /// Decodes the initial SPNEGO token of a GSS exchange:
    /// `[APPLICATION 0] { OID(1.3.6.1.5.5.2), [0] NegTokenInit }`.
    #[instrument(level = "trace", skip_all)]
    pub fn decode_init(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::new(ErrorKind::EmptySpnegoToken, "SPNEGO token is empty"));
        }

        let mut stream = Cursor::new(data);

        let wrapper_len = ber::read_application_tag(&mut stream, 0).map_err(malformed)?;
        ensure_remaining(&stream, data, wrapper_len)?;

        let oid = read_oid(&mut stream)?;
        if oid != oids::spnego() {
            return Err(Error::new(
                ErrorKind::InvalidSpnegoToken,
                format!("unexpected mechanism oid: {:?}", oid),
            ));
        }

        ber::read_contextual_tag(&mut stream, 0, Pc::Construct).map_err(malformed)?;
        let seq_len = ber::read_sequence_tag(&mut stream).map_err(malformed)?;
        ensure_remaining(&stream, data, seq_len)?;
        let end = stream.position() + u64::from(seq_len);

        let mechanisms = if peek_contextual_tag(&stream, data, end, 0) {
            ber::read_contextual_tag(&mut stream, 0, Pc::Construct).map_err(malformed)?;
            read_mech_type_list(&mut stream, data)?
        } else {
            Vec::new()
        };

        let context_flags = if peek_contextual_tag(&stream, data, end, 1) {
            ber::read_contextual_tag(&mut stream, 1, Pc::Construct).map_err(malformed)?;
            let bits = ber::read_bit_string(&mut stream).map_err(malformed)?;
            bits.first().map(|first| ContextFlags::from_bits_truncate(*first))
        } else {
            None
        };

        let mechanism_token = if peek_contextual_tag(&stream, data, end, 2) {
            ber::read_contextual_tag(&mut stream, 2, Pc::Construct).map_err(malformed)?;
            Some(ber::read_octet_string(&mut stream).map_err(malformed)?)
        } else {
            None
        };

        let mechanism_list_mic = if peek_contextual_tag(&stream, data, end, 3) {
            ber::read_contextual_tag(&mut stream, 3, Pc::Construct).map_err(malformed)?;
            Some(ber::read_octet_string(&mut stream).map_err(malformed)?)
        } else {
            None
        };

        if stream.position() > end {
            return Err(Error::new(
                ErrorKind::MalformedSpnegoToken,
                "NegTokenInit fields overrun the declared sequence length",
            ));
        }

        Ok(Self {
            mechanisms,
            context_flags,
            mechanism_token,
            mechanism_list_mic,
        })
    }

    /// The negotiated mechanism: the first entry of the mechType list, if any.
    pub fn mechanism(&self) -> Option<&ObjectIdentifier> {
        self.mechanisms.first()
    }

    pub fn mechanisms(&self) -> &[ObjectIdentifier] {
        &self.mechanisms
    }

    pub fn context_flags(&self) -> Option<ContextFlags> {
        self.context_flags
    }

    /// The embedded mechanism token (for Kerberos, the AP-REQ carrier).
    pub fn mechanism_token(&self) -> Option<&[u8]> {
        self.mechanism_token.as_deref()
    }

    pub fn mechanism_list_mic(&self) -> Option<&[u8]> {
        self.mechanism_list_mic.as_deref()
    }
}

pub(crate) fn read_oid(stream: &mut Cursor<&[u8]>) -> Result<ObjectIdentifier> {
    let value = ber::read_oid(stream).map_err(malformed)?;

    ObjectIdentifier::try_from(value.as_slice())
        .map_err(|_| Error::new(ErrorKind::ObjectCast, "encoded value is not a valid oid"))
}

fn read_mech_type_list(stream: &mut Cursor<&[u8]>, data: &[u8]) -> Result<Vec<ObjectIdentifier>> {
    let list_len = ber::read_sequence_tag(&mut *stream).map_err(malformed)?;
    ensure_remaining(stream, data, list_len)?;
    let list_end = stream.position() + u64::from(list_len);

    let mut mechanisms = Vec::new();
    while stream.position() < list_end {
        let mechanism = read_oid(stream)?;
        if stream.position() > list_end {
            return Err(Error::new(
                ErrorKind::MalformedSpnegoToken,
                "mechType entry overruns the mechType list",
            ));
        }

        mechanisms.push(mechanism);
    }

    Ok(mechanisms)
}

/// Reports whether the next byte is the constructed context tag `[tagnum]`,
/// without consuming it. Returns `false` at the end of the enclosing sequence.
fn peek_contextual_tag(stream: &Cursor<&[u8]>, data: &[u8], end: u64, tagnum: u8) -> bool {
    let position = stream.position();

    position < end && data.get(position as usize) == Some(&(0xA0 | tagnum))
}

fn ensure_remaining(stream: &Cursor<&[u8]>, data: &[u8], needed: u16) -> Result<()> {
    let remaining = data.len() as u64 - stream.position();

    if u64::from(needed) > remaining {
        Err(Error::new(
            ErrorKind::MalformedSpnegoToken,
            format!(
                "declared length ({}) overruns the token buffer ({} bytes remaining)",
                needed, remaining
            ),
        ))
    } else {
        Ok(())
    }
}

fn malformed(err: std::io::Error) -> Error {
    Error::new(ErrorKind::MalformedSpnegoToken, format!("invalid SPNEGO token: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spnego::mech_fixer::tests::build_neg_token_init;

    #[test]
    fn decode_empty_token_fails_with_typed_error() {
        let err = SpnegoToken::decode_init(&[]).unwrap_err();

        assert_eq!(err.kind, ErrorKind::EmptySpnegoToken);
        assert_eq!(err.kind.key(), "spnego.token.empty");
    }

    #[test]
    fn decode_wrong_leading_tag_fails_with_typed_error() {
        let err = SpnegoToken::decode_init(&[0x61]).unwrap_err();

        assert_eq!(err.kind, ErrorKind::MalformedSpnegoToken);
        assert_eq!(err.kind.key(), "spnego.token.malformed");
    }

    #[test]
    fn decode_wrong_mechanism_oid_fails() {
        // [APPLICATION 0] { OID(1.2.840.113554.1.2.2), ... }: Kerberos oid where SPNEGO is required
        let token = [
            0x60, 0x0D, 0x06, 0x09, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x12, 0x01, 0x02, 0x02, 0xA0, 0x00,
        ];

        let err = SpnegoToken::decode_init(&token).unwrap_err();

        assert_eq!(err.kind, ErrorKind::InvalidSpnegoToken);
        assert_eq!(err.kind.key(), "spnego.token.invalid");
    }

    #[test]
    fn decode_truncated_mech_token_fails() {
        let mut token = build_neg_token_init(&[&KRB5_OID_VALUE], None, Some(&[0x01, 0x02, 0x03, 0x04]));
        token.truncate(token.len() - 2);

        let err = SpnegoToken::decode_init(&token).unwrap_err();

        assert_eq!(err.kind, ErrorKind::MalformedSpnegoToken);
    }

    #[test]
    fn decode_neg_token_init_with_all_fields() {
        let mech_token = [0x0A, 0x0B, 0x0C, 0x0D, 0x0E];
        let token = build_neg_token_init(
            &[&MS_KRB5_OID_VALUE, &KRB5_OID_VALUE],
            Some(ContextFlags::MUTUAL | ContextFlags::INTEG),
            Some(&mech_token),
        );

        let decoded = SpnegoToken::decode_init(&token).unwrap();

        assert_eq!(decoded.mechanisms().len(), 2);
        assert_eq!(*decoded.mechanism().unwrap(), oids::ms_krb5());
        assert_eq!(decoded.mechanisms()[1], oids::krb5());
        assert_eq!(
            decoded.context_flags(),
            Some(ContextFlags::MUTUAL | ContextFlags::INTEG)
        );
        assert_eq!(decoded.mechanism_token(), Some(mech_token.as_slice()));
        assert_eq!(decoded.mechanism_list_mic(), None);
    }

    #[test]
    fn decode_neg_token_init_without_optional_fields() {
        let token = build_neg_token_init(&[&KRB5_OID_VALUE], None, None);

        let decoded = SpnegoToken::decode_init(&token).unwrap();

        assert_eq!(*decoded.mechanism().unwrap(), oids::krb5());
        assert_eq!(decoded.mechanism_token(), None);
        assert_eq!(decoded.context_flags(), None);
    }
}
