use std::io::Cursor;

use crate::ber::{self, Pc};
use crate::spnego::{KRB5_OID_VALUE, SPNEGO_OID_VALUE};

/// Reorders the mechType list of a NegTokenInit so that the legacy Kerberos V5
/// OID (1.2.840.113554.1.2.2) comes first, keeping all other entries in their
/// original relative order. Some SPNEGO acceptors refuse the token otherwise.
///
/// This is a best-effort compatibility transform over a known-good token, not
/// a decoder: entries are moved byte-for-byte (the encoded length does not
/// change) and any unexpected structure aborts the transform.
///
/// Returns `None` when there is nothing to do: the legacy OID is absent or
/// already first, or the token does not look like a NegTokenInit.
pub fn prefer_krb5_mech(token: &[u8]) -> Option<Vec<u8>> {
    let mut stream = Cursor::new(token);

    ber::read_application_tag(&mut stream, 0).ok()?;
    let oid = ber::read_oid(&mut stream).ok()?;
    if oid != SPNEGO_OID_VALUE {
        return None;
    }

    ber::read_contextual_tag(&mut stream, 0, Pc::Construct).ok()?;
    ber::read_sequence_tag(&mut stream).ok()?;
    ber::read_contextual_tag(&mut stream, 0, Pc::Construct).ok()?;
    let list_len = ber::read_sequence_tag(&mut stream).ok()?;

    let list_start = stream.position() as usize;
    let list_end = list_start.checked_add(usize::from(list_len))?;
    if list_end > token.len() {
        return None;
    }

    // Record the extent of every encoded mechType entry.
    let mut entries = Vec::new();
    while (stream.position() as usize) < list_end {
        let start = stream.position() as usize;
        ber::read_oid(&mut stream).ok()?;
        let end = stream.position() as usize;
        if end > list_end {
            return None;
        }
        entries.push((start, end));
    }

    let legacy = entries
        .iter()
        .position(|&(start, end)| is_legacy_krb5_entry(&token[start..end]))?;
    if legacy == 0 {
        return None;
    }

    let mut fixed = token.to_vec();
    let mut position = list_start;
    let mut emit = |(start, end): (usize, usize)| {
        fixed[position..position + (end - start)].copy_from_slice(&token[start..end]);
        position += end - start;
    };

    emit(entries[legacy]);
    for (index, &entry) in entries.iter().enumerate() {
        if index != legacy {
            emit(entry);
        }
    }

    Some(fixed)
}

fn is_legacy_krb5_entry(entry: &[u8]) -> bool {
    entry.len() == 2 + KRB5_OID_VALUE.len()
        && entry[0] == 0x06
        && usize::from(entry[1]) == KRB5_OID_VALUE.len()
        && entry[2..] == KRB5_OID_VALUE
}
