// pn532prov/src/protocol/responses/exchange.rs
//! InDataExchange answer decoding.

use crate::protocol::parser;
use crate::Result;

/// Decode an InDataExchange response payload (response code = 0x41)
/// Layout: response_code(1) + status(1) + data_in(n)
pub fn decode_in_data_exchange(data: &[u8]) -> Result<(u8, Vec<u8>)> {
    let status = parser::byte_at(data, 1)?;
    Ok((status, data[2..].to_vec()))
}
