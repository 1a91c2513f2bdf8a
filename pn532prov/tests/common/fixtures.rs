// fixtures.rs - commonly used frames and tag answers, written out as hex so
// they read like a logic-analyzer capture.

use pn532prov::protocol::Frame;

fn from_hex(s: &str) -> Vec<u8> {
    let compact: String = s.split_whitespace().collect();
    hex::decode(compact).unwrap()
}

pub fn ack() -> Vec<u8> {
    from_hex("00 00 FF 00 FF 00")
}

/// GetFirmwareVersion command as it goes out on the wire.
pub fn get_firmware_version_frame() -> Vec<u8> {
    from_hex("00 00 FF 02 FE D4 02 2A 00")
}

/// GetFirmwareVersion answer: IC 0x32, firmware 1.6, support 0x07.
pub fn firmware_response_frame() -> Vec<u8> {
    from_hex("00 00 FF 06 FA D5 03 32 01 06 07 E8 00")
}

/// SAMConfiguration normal mode, 1 s timeout, IRQ on.
pub fn sam_configuration_frame() -> Vec<u8> {
    from_hex("00 00 FF 05 FB D4 14 01 14 01 02 00")
}

pub fn sam_response_frame() -> Vec<u8> {
    from_hex("00 00 FF 02 FE D5 15 16 00")
}

/// InListPassiveTarget, one target, 106 kbps type A.
pub fn in_list_passive_target_frame() -> Vec<u8> {
    from_hex("00 00 FF 04 FC D4 4A 01 00 E1 00")
}

/// One target: Tg 1, SENS_RES 0x0004, SEL_RES 0x08, UID DE AD BE EF.
pub fn one_target_payload() -> Vec<u8> {
    from_hex("4B 01 01 00 04 08 04 DE AD BE EF")
}

pub fn no_target_payload() -> Vec<u8> {
    from_hex("4B 00")
}

/// InDataExchange success carrying only SW 90 00.
pub fn exchange_ok_payload() -> Vec<u8> {
    from_hex("41 00 90 00")
}

/// Capability container of a phone's emulated Type 4 tag.
pub fn capability_container_payload() -> Vec<u8> {
    from_hex("41 00 00 0F 20 00 3B 00 34 04 06 E1 04 00 32 00 00 90 00")
}

pub fn nlen_payload() -> Vec<u8> {
    from_hex("41 00 00 1C 90 00")
}

/// NDEF file read as the phone app answers it for `MyNetwork?Sup3rSecret`:
/// NLEN, Text record header, status 02, "en", the text, SW 90 00.
pub fn text_record_payload() -> Vec<u8> {
    from_hex(
        "41 00 00 1C D1 01 18 54 02 65 6E \
         4D 79 4E 65 74 77 6F 72 6B 3F 53 75 70 33 72 53 65 63 72 65 74 \
         90 00",
    )
}

pub fn framed(payload: &[u8]) -> Vec<u8> {
    Frame::encode_response(payload).unwrap()
}
