// pn532prov/src/protocol/responses/target.rs
//! InListPassiveTarget answer decoding.

use crate::protocol::parser;
use crate::types::{TargetId, TargetInfo, Uid};
use crate::Result;

/// Decode an InListPassiveTarget response payload (response code = 0x4B)
/// for 106 kbps type A targets.
/// Layout: response_code(1) + NbTg(1) + [Tg(1) + SENS_RES(2) + SEL_RES(1)
/// + NFCIDLength(1) + NFCID(n)]
///
/// Only the first target is decoded; the driver never asks for more.
pub fn decode_in_list_passive_target(data: &[u8]) -> Result<(u8, Option<TargetInfo>)> {
    let count = parser::byte_at(data, 1)?;
    if count == 0 {
        return Ok((0, None));
    }

    let target = TargetId::new(parser::byte_at(data, 2)?);
    let sens_res = parser::be_u16_at(data, 3)?;
    let sel_res = parser::byte_at(data, 5)?;
    let uid_len = parser::byte_at(data, 6)? as usize;
    let uid = Uid::from_bytes(parser::slice_at(data, 7, uid_len)?.to_vec());

    Ok((
        count,
        Some(TargetInfo {
            target,
            sens_res,
            sel_res,
            uid,
        }),
    ))
}
