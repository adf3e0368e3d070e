//! Text payload framing shared by all techniques.
//!
//! A payload is turned into its UTF-8 bytes, the [`TERMINATOR`] is appended and every byte
//! is emitted as 8 bits, most significant bit first. Unveiling reverses this: bits are
//! regrouped into bytes (an incomplete trailing group is dropped) and the text is cut at the
//! first terminator.

use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::result::Result;

/// Ordered sequence of bits, `true` is a 1-bit.
pub type BitSequence = Vec<bool>;

/// End marker appended to every text payload before it is hidden.
pub const TERMINATOR: &str = "§END§";

/// Width of the [`TERMINATOR`] in bits.
pub const TERMINATOR_BITS: usize = TERMINATOR.len() * 8;

/// Text recovered from a bit stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unveiled {
    pub text: String,
    /// `false` when no terminator was found and `text` holds everything that was decoded
    pub terminated: bool,
}

/// Converts a text payload, including the terminator, into bits.
pub fn to_bits(text: &str) -> Result<BitSequence> {
    let mut payload = Vec::with_capacity(text.len() + TERMINATOR.len());
    payload.extend_from_slice(text.as_bytes());
    payload.extend_from_slice(TERMINATOR.as_bytes());

    bits_from_bytes(&payload)
}

/// Reconstructs the text from bits, truncated at the first terminator.
///
/// A missing terminator is not an error, the whole decoded text is returned instead.
pub fn from_bits(bits: &[bool]) -> Result<String> {
    decode(bits).map(|unveiled| unveiled.text)
}

/// Like [`from_bits`], but also reports whether the terminator was found.
pub fn decode(bits: &[bool]) -> Result<Unveiled> {
    let mut bytes = bytes_from_bits(bits)?;
    let terminator = TERMINATOR.as_bytes();
    let end = bytes
        .windows(terminator.len())
        .position(|window| window == terminator);

    if let Some(end) = end {
        bytes.truncate(end);
    }

    Ok(Unveiled {
        text: String::from_utf8_lossy(&bytes).into_owned(),
        terminated: end.is_some(),
    })
}

/// Checks if the last [`TERMINATOR_BITS`] bits spell out the terminator.
pub fn ends_with_terminator(bits: &[bool]) -> bool {
    if bits.len() < TERMINATOR_BITS {
        return false;
    }

    let tail = &bits[bits.len() - TERMINATOR_BITS..];
    TERMINATOR
        .bytes()
        .flat_map(|byte| (0..8).rev().map(move |i| (byte >> i) & 1 == 1))
        .zip(tail)
        .all(|(expected, given)| expected == *given)
}

/// Splits bytes into bits, most significant bit first.
pub fn bits_from_bytes(bytes: &[u8]) -> Result<BitSequence> {
    let mut reader = BitReader::endian(Cursor::new(bytes), BigEndian);
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for _ in 0..bytes.len() * 8 {
        bits.push(reader.read_bit()?);
    }

    Ok(bits)
}

/// Groups bits into bytes, most significant bit first. An incomplete trailing group is dropped.
pub fn bytes_from_bits(bits: &[bool]) -> Result<Vec<u8>> {
    let whole_bytes = bits.len() / 8;
    let mut writer = BitWriter::endian(Vec::with_capacity(whole_bytes), BigEndian);
    for bit in &bits[..whole_bytes * 8] {
        writer.write_bit(*bit)?;
    }

    Ok(writer.into_writer())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_encode_each_byte_most_significant_bit_first() {
        let bits = to_bits("h").unwrap();

        // 'h' = 0x68
        assert_eq!(
            &bits[..8],
            &[false, true, true, false, true, false, false, false]
        );
        assert_eq!(bits.len(), 8 + TERMINATOR_BITS);
    }

    #[test]
    fn should_measure_the_terminator_as_utf8() {
        assert_eq!(TERMINATOR.len(), 7);
        assert_eq!(TERMINATOR_BITS, 56);
    }

    #[test]
    fn should_truncate_at_the_first_terminator() {
        let mut bits = to_bits("first").unwrap();
        bits.extend(to_bits("second").unwrap());

        let unveiled = decode(&bits).unwrap();
        assert_eq!(unveiled.text, "first");
        assert!(unveiled.terminated);
    }

    #[test]
    fn should_return_everything_without_terminator() {
        let bits = bits_from_bytes(b"no end").unwrap();

        let unveiled = decode(&bits).unwrap();
        assert_eq!(unveiled.text, "no end");
        assert!(!unveiled.terminated);
    }

    #[test]
    fn should_drop_an_incomplete_trailing_group() {
        let mut bits = bits_from_bytes(b"ab").unwrap();
        bits.extend([true, true, false]);

        assert_eq!(bytes_from_bits(&bits).unwrap(), b"ab");
    }

    #[test]
    fn should_keep_code_points_above_255_intact() {
        let text = "grüße € 𝄞";
        let bits = to_bits(text).unwrap();

        assert_eq!(from_bits(&bits).unwrap(), text);
    }

    #[test]
    fn should_detect_the_terminator_at_the_tail_only() {
        let bits = to_bits("hi").unwrap();
        assert!(ends_with_terminator(&bits));
        assert!(!ends_with_terminator(&bits[..bits.len() - 8]));
        assert!(!ends_with_terminator(&bits[..10]));
    }
}
