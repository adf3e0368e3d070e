use speculate::speculate;

use steganokit_core::bit_codec::*;

speculate! {
    describe "bit_codec::to_bits()" {
        // String: H           i
        // Hex   : 0x48        0x69
        // Binary: 0b01001000  0b01101001
        it "should emit the bits of 'Hi' most significant bit first" {
            let bits = to_bits("Hi").unwrap();

            assert_eq!(
                &bits[..16],
                &[
                    false, true, false, false, true, false, false, false,
                    false, true, true, false, true, false, false, true,
                ]
            );
        }

        it "should append the terminator as UTF-8" {
            let bits = to_bits("").unwrap();

            assert_eq!(bits.len(), TERMINATOR_BITS);
            assert!(ends_with_terminator(&bits));
        }

        it "should encode multi byte characters byte by byte" {
            let bits = to_bits("ü").unwrap();

            assert_eq!(bits.len(), 2 * 8 + TERMINATOR_BITS);
            assert_eq!(bytes_from_bits(&bits[..16]).unwrap(), "ü".as_bytes());
        }
    }

    describe "bit_codec::decode()" {
        it "should drop an incomplete trailing byte" {
            let mut bits = bits_from_bytes(b"ok").unwrap();
            bits.extend([true, true, true]);

            assert_eq!(from_bits(&bits).unwrap(), "ok");
        }

        it "should replace invalid UTF-8 instead of failing" {
            let mut bits = bits_from_bytes(&[0xFF, b'a']).unwrap();
            bits.extend(to_bits("").unwrap());

            let unveiled = decode(&bits).unwrap();
            assert_eq!(unveiled.text, "\u{FFFD}a");
            assert!(unveiled.terminated);
        }

        it "should decode nothing from no bits" {
            let unveiled = decode(&[]).unwrap();

            assert_eq!(unveiled.text, "");
            assert!(!unveiled.terminated);
        }
    }

    describe "bit_codec::ends_with_terminator()" {
        it "should only look at the tail" {
            let mut bits = bits_from_bytes(b"some prefix").unwrap();
            assert!(!ends_with_terminator(&bits));

            bits.extend(to_bits("").unwrap());
            assert!(ends_with_terminator(&bits));

            bits.push(false);
            assert!(!ends_with_terminator(&bits));
        }
    }
}
