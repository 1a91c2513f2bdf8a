// pn532prov/src/protocol/commands/exchange.rs
//! InDataExchange encoding.

use crate::constants::{MAX_APDU_LEN, PN532_CMD_IN_DATA_EXCHANGE};
use crate::types::TargetId;
use crate::{Error, Result};

/// InDataExchange: Tg followed by the data sent to the target.
pub fn encode_in_data_exchange(target: TargetId, data: &[u8]) -> Result<Vec<u8>> {
    if data.len() > MAX_APDU_LEN {
        return Err(Error::PayloadTooLong {
            max: MAX_APDU_LEN,
            actual: data.len(),
        });
    }
    let mut buf = Vec::with_capacity(2 + data.len());
    buf.push(PN532_CMD_IN_DATA_EXCHANGE);
    buf.push(target.as_u8());
    buf.extend_from_slice(data);
    Ok(buf)
}
