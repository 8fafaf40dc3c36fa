use bitflags::bitflags;
use time::OffsetDateTime;
use tracing::instrument;

use super::filetime_to_date;
use super::ndr::{NdrReader, UnicodeStringDescriptor};
use super::sid::PacSid;
use crate::{ErrorKind, Result};

bitflags! {
    /// KERB_VALIDATION_INFO UserFlags.
    ///
    /// [MS-PAC 2.5](https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-pac/69e86ccc-85e3-41b9-b514-7d969cd0ed73)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct UserFlags: u32 {
        const LOGON_GUEST = 0x1;
        const LOGON_NOENCRYPTION = 0x2;
        const LOGON_EXTRA_SIDS = 0x20;
        const LOGON_RESOURCE_GROUPS = 0x200;

        const _ = !0;
    }
}

/// The decoded KERB_VALIDATION_INFO buffer: the account identity and group
/// membership the KDC asserted for the authenticated principal.
///
/// [MS-PAC 2.5](https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-pac/69e86ccc-85e3-41b9-b514-7d969cd0ed73)
#[derive(Debug, Clone)]
pub struct PacLogonInfo {
    pub logon_time: Option<OffsetDateTime>,
    pub logoff_time: Option<OffsetDateTime>,
    pub kick_off_time: Option<OffsetDateTime>,
    pub password_last_set: Option<OffsetDateTime>,
    pub password_can_change: Option<OffsetDateTime>,
    pub password_must_change: Option<OffsetDateTime>,
    pub user_name: String,
    pub user_display_name: String,
    pub logon_script: String,
    pub profile_path: String,
    pub home_directory: String,
    pub home_drive: String,
    pub logon_count: u16,
    pub bad_password_count: u16,
    pub user_id: u32,
    pub primary_group_id: u32,
    pub user_flags: UserFlags,
    pub user_session_key: [u8; 16],
    pub user_account_control: u32,
    pub server_name: String,
    pub domain_name: String,
    pub domain_sid: Option<PacSid>,
    /// Domain-relative group memberships, resolved against `domain_sid`.
    pub group_sids: Vec<PacSid>,
    /// Present when `LOGON_EXTRA_SIDS` is set.
    pub extra_sids: Vec<PacSid>,
    /// Present when `LOGON_RESOURCE_GROUPS` is set, resolved against the
    /// resource-group domain SID.
    pub resource_group_sids: Vec<PacSid>,
}

impl PacLogonInfo {
    /// Decodes the NDR-marshaled KERB_VALIDATION_INFO in two passes: the
    /// fixed part first, then the deferred referents in declaration order.
    #[instrument(level = "trace", skip_all)]
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = NdrReader::new(data, ErrorKind::MalformedLogonInfo);
        reader.skip_prologue()?;

        let logon_time = filetime_to_date(reader.read_u64()?);
        let logoff_time = filetime_to_date(reader.read_u64()?);
        let kick_off_time = filetime_to_date(reader.read_u64()?);
        let password_last_set = filetime_to_date(reader.read_u64()?);
        let password_can_change = filetime_to_date(reader.read_u64()?);
        let password_must_change = filetime_to_date(reader.read_u64()?);

        let user_name_descriptor = reader.read_unicode_string_descriptor()?;
        let user_display_name_descriptor = reader.read_unicode_string_descriptor()?;
        let logon_script_descriptor = reader.read_unicode_string_descriptor()?;
        let profile_path_descriptor = reader.read_unicode_string_descriptor()?;
        let home_directory_descriptor = reader.read_unicode_string_descriptor()?;
        let home_drive_descriptor = reader.read_unicode_string_descriptor()?;

        let logon_count = reader.read_u16()?;
        let bad_password_count = reader.read_u16()?;
        let user_id = reader.read_u32()?;
        let primary_group_id = reader.read_u32()?;
        let group_count = reader.read_u32()?;
        let groups_pointer = reader.read_u32()?;
        let user_flags = UserFlags::from_bits_retain(reader.read_u32()?);

        let mut user_session_key = [0_u8; 16];
        reader.read_exact(&mut user_session_key)?;

        let server_name_descriptor = reader.read_unicode_string_descriptor()?;
        let domain_name_descriptor = reader.read_unicode_string_descriptor()?;
        let domain_sid_pointer = reader.read_u32()?;

        // Reserved1
        reader.skip(8)?;
        let user_account_control = reader.read_u32()?;
        // SubAuthStatus, LastSuccessfulILogon, LastFailedILogon, FailedILogonCount, Reserved3
        reader.skip(4 + 8 + 8 + 4 + 4)?;

        let sid_count = reader.read_u32()?;
        let extra_sids_pointer = reader.read_u32()?;
        let resource_group_domain_sid_pointer = reader.read_u32()?;
        let resource_group_count = reader.read_u32()?;
        let resource_groups_pointer = reader.read_u32()?;

        // fixed part done, resolve the deferred referents in declaration order
        let user_name = read_optional_string(&mut reader, &user_name_descriptor)?;
        let user_display_name = read_optional_string(&mut reader, &user_display_name_descriptor)?;
        let logon_script = read_optional_string(&mut reader, &logon_script_descriptor)?;
        let profile_path = read_optional_string(&mut reader, &profile_path_descriptor)?;
        let home_directory = read_optional_string(&mut reader, &home_directory_descriptor)?;
        let home_drive = read_optional_string(&mut reader, &home_drive_descriptor)?;

        let group_relative_ids = if groups_pointer != 0 {
            read_group_memberships(&mut reader, group_count)?
        } else {
            Vec::new()
        };

        let server_name = read_optional_string(&mut reader, &server_name_descriptor)?;
        let domain_name = read_optional_string(&mut reader, &domain_name_descriptor)?;

        let domain_sid = if domain_sid_pointer != 0 {
            Some(reader.read_sid()?)
        } else {
            None
        };

        let extra_sids = if user_flags.contains(UserFlags::LOGON_EXTRA_SIDS) && extra_sids_pointer != 0 {
            read_extra_sids(&mut reader, sid_count)?
        } else {
            Vec::new()
        };

        let resource_group_domain_sid = if resource_group_domain_sid_pointer != 0 {
            Some(reader.read_sid()?)
        } else {
            None
        };

        let resource_group_relative_ids =
            if user_flags.contains(UserFlags::LOGON_RESOURCE_GROUPS) && resource_groups_pointer != 0 {
                read_group_memberships(&mut reader, resource_group_count)?
            } else {
                Vec::new()
            };

        let group_sids = match &domain_sid {
            Some(domain_sid) => group_relative_ids
                .iter()
                .map(|relative_id| domain_sid.with_relative_id(*relative_id))
                .collect(),
            None => Vec::new(),
        };

        let resource_group_sids = match &resource_group_domain_sid {
            Some(resource_domain_sid) => resource_group_relative_ids
                .iter()
                .map(|relative_id| resource_domain_sid.with_relative_id(*relative_id))
                .collect(),
            None => Vec::new(),
        };

        Ok(Self {
            logon_time,
            logoff_time,
            kick_off_time,
            password_last_set,
            password_can_change,
            password_must_change,
            user_name,
            user_display_name,
            logon_script,
            profile_path,
            home_directory,
            home_drive,
            logon_count,
            bad_password_count,
            user_id,
            primary_group_id,
            user_flags,
            user_session_key,
            user_account_control,
            server_name,
            domain_name,
            domain_sid,
            group_sids,
            extra_sids,
            resource_group_sids,
        })
    }
}

fn read_optional_string(reader: &mut NdrReader<'_>, descriptor: &UnicodeStringDescriptor) -> Result<String> {
    if descriptor.is_present() {
        reader.read_deferred_string(descriptor)
    } else {
        Ok(String::new())
    }
}

/// A deferred GROUP_MEMBERSHIP array: `(count, count x (relativeId, attributes))`.
fn read_group_memberships(reader: &mut NdrReader<'_>, declared_count: u32) -> Result<Vec<u32>> {
    reader.align4()?;

    let count = reader.read_u32()?;
    if count != declared_count {
        return Err(reader.fail(format!(
            "group array count ({}) differs from the declared count ({})",
            count, declared_count
        )));
    }
    if count as usize * 8 > reader.remaining() {
        return Err(reader.fail("group array overruns the buffer"));
    }

    let mut relative_ids = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let relative_id = reader.read_u32()?;
        let _attributes = reader.read_u32()?;
        relative_ids.push(relative_id);
    }

    Ok(relative_ids)
}

/// A deferred KERB_SID_AND_ATTRIBUTES array: `(count, count x (pointer,
/// attributes))` followed by the pointed-to SIDs.
fn read_extra_sids(reader: &mut NdrReader<'_>, declared_count: u32) -> Result<Vec<PacSid>> {
    reader.align4()?;

    let count = reader.read_u32()?;
    if count != declared_count {
        return Err(reader.fail(format!(
            "extra SID array count ({}) differs from the declared count ({})",
            count, declared_count
        )));
    }
    if count as usize * 8 > reader.remaining() {
        return Err(reader.fail("extra SID array overruns the buffer"));
    }

    let mut pointers = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let pointer = reader.read_u32()?;
        let _attributes = reader.read_u32()?;
        pointers.push(pointer);
    }

    let mut sids = Vec::with_capacity(pointers.len());
    for pointer in pointers {
        if pointer != 0 {
            sids.push(reader.read_sid()?);
        }
    }

    Ok(sids)
}
