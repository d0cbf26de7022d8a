pub mod dto;
pub mod topics;

#[cfg(test)]
mod test {
    use crate::tasmota::dto::{DisplayClear, DisplayText, Position};
    use crate::tasmota::topics::TasmotaDisplay;

    #[test]
    fn test_position_tag() {
        assert_eq!(Position::new(1, 0).to_string(), "s1y0");
        assert_eq!(Position::new(2, 100).to_string(), "s2y100");
    }

    #[test]
    fn test_encode_display_text() {
        let display = TasmotaDisplay::new("acct1", "tasmota_EAB2A0");
        let text = DisplayText::new(Position::new(2, 15), "House: 2.5kW/850.0W");

        assert_eq!(display.text.name(), "acct1/cmnd/tasmota_EAB2A0/displaytext");
        assert_eq!(&display.text.encode(&text)[..], b"[s2y15] House: 2.5kW/850.0W");
    }

    #[test]
    fn test_encode_display_clear() {
        let display = TasmotaDisplay::new("acct1", "tasmota_EAB2A0");

        assert_eq!(display.clear.name(), "acct1/cmnd/tasmota_EAB2A0/displayclear");
        assert!(display.clear.encode(&DisplayClear).is_empty());
    }
}
