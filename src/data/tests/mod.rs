//! Tests for data block decoding

mod decoder_tests;
mod layout_tests;

use crate::models::ChannelDetail;

pub fn detail(ordinal: usize, width: &str, format: &str, type_letter: &str) -> ChannelDetail {
    ChannelDetail {
        ordinal,
        pad: "-99".to_string(),
        start: String::new(),
        width: width.to_string(),
        format: format.to_string(),
        type_letter: type_letter.to_string(),
        decimal_places: String::new(),
    }
}

pub fn lines(text: &[&str]) -> Vec<String> {
    text.iter().map(|l| l.to_string()).collect()
}
