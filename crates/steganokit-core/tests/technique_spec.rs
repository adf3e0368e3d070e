use speculate::speculate;

use steganokit_core::techniques::{patch_origin, BitPlaneLsb, SpatialPatchBias};
use steganokit_core::{HideBits, PixelBuffer, SteganoCore, SteganoError, Technique};

fn textured(width: u32, height: u32) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |x, y| {
        [
            ((x * 7 + y * 3) % 64 + 96) as u8,
            ((x * 5 + y * 11) % 64 + 96) as u8,
            ((x * 13 + y * 7) % 80 + 88) as u8,
            255,
        ]
    })
}

speculate! {
    describe "Technique::from_str()" {
        it "should accept the five selectors" {
            for selector in ["lsb", "lsb-improved", "patchwork", "dct", "histogram"] {
                let technique: Technique = selector.parse().unwrap();
                assert_eq!(technique.name(), selector);
            }
        }

        it "should reject anything else" {
            match "steghide".parse::<Technique>() {
                Err(SteganoError::UnknownTechnique(name)) => assert_eq!(name, "steghide"),
                _ => panic!("steghide is no technique"),
            }
        }
    }

    describe "Technique::capacity()" {
        it "should grow with the carrier" {
            for technique in Technique::all() {
                let small = technique.capacity(&textured(64, 64));
                let large = technique.capacity(&textured(128, 128));

                assert!(small <= large, "technique {technique}");
            }
        }

        it "should be zero for a carrier without usable area" {
            let tiny = textured(8, 8);

            assert_eq!(Technique::from(SpatialPatchBias::default()).capacity(&tiny), 0);
            assert_eq!("dct".parse::<Technique>().unwrap().capacity(&tiny), 0);
            assert_eq!("histogram".parse::<Technique>().unwrap().capacity(&tiny), 0);
        }
    }

    describe "lsb" {
        it "should stop unveiling at the decode ceiling" {
            let pixels = textured(32, 32);
            let technique = Technique::from(BitPlaneLsb::default()).with_max_decode_bits(Some(80));

            assert_eq!(technique.unveil_bits(&pixels).unwrap().len(), 80);
        }

        it "should only alter bit 0" {
            let original = textured(32, 32);
            let mut pixels = original.clone();
            SteganoCore::hide_text(&mut pixels, "a secret", &Technique::default()).unwrap();

            for (given, expected) in pixels.as_raw().iter().zip(original.as_raw()) {
                assert_eq!(given >> 1, expected >> 1);
            }
        }
    }

    describe "patchwork" {
        it "should place patches inside the carrier" {
            for index in 0..1000 {
                let (x, y) = patch_origin(index, 200, 160);
                assert!(x + 8 <= 200 && y + 8 <= 160);
            }
        }

        it "should carry text on a flat carrier" {
            let mut pixels = PixelBuffer::from_fn(256, 256, |_, _| [128, 128, 128, 255]);
            let patchwork: Technique = "patchwork".parse().unwrap();

            SteganoCore::hide_text(&mut pixels, "Hello", &patchwork).unwrap();

            assert_eq!(SteganoCore::unveil_text(&pixels, &patchwork).unwrap(), "Hello");
        }

        it "should fill every distinct origin of a 64x64 carrier with the bare terminator" {
            let mut pixels = PixelBuffer::from_fn(64, 64, |_, _| [128, 128, 128, 255]);
            let patchwork: Technique = "patchwork".parse().unwrap();
            assert_eq!(patchwork.capacity(&pixels), 56);

            SteganoCore::hide_text(&mut pixels, "", &patchwork).unwrap();

            let unveiled = SteganoCore::unveil(&pixels, &patchwork).unwrap();
            assert!(unveiled.terminated);
            assert_eq!(unveiled.text, "");
        }

        it "should refuse a single byte beyond the distinct origins" {
            let original = PixelBuffer::from_fn(64, 64, |_, _| [128, 128, 128, 255]);
            let mut pixels = original.clone();
            let patchwork: Technique = "patchwork".parse().unwrap();

            match SteganoCore::hide_text(&mut pixels, "h", &patchwork) {
                Err(SteganoError::CapacityExceeded { required: 64, available: 56, .. }) => (),
                other => panic!("64 bits cannot fit 56 origins, got {other:?}"),
            }
            assert_eq!(pixels, original);
        }
    }

    describe "dct" {
        it "should carry unicode text" {
            let mut pixels = textured(96, 64);
            let dct: Technique = "dct".parse().unwrap();

            SteganoCore::hide_text(&mut pixels, "dct test ünïcode", &dct).unwrap();

            assert_eq!(SteganoCore::unveil_text(&pixels, &dct).unwrap(), "dct test ünïcode");
        }

        it "should carry text on flat black and white carriers or leave them untouched" {
            let dct: Technique = "dct".parse().unwrap();
            for level in [0u8, 255] {
                let original = PixelBuffer::from_fn(64, 64, |_, _| [level, level, level, 255]);
                let mut pixels = original.clone();

                match SteganoCore::hide_text(&mut pixels, "ok", &dct) {
                    Ok(()) => assert_eq!(SteganoCore::unveil_text(&pixels, &dct).unwrap(), "ok"),
                    Err(SteganoError::EmbeddingFailed { .. }) => assert_eq!(pixels, original),
                    Err(other) => panic!("unexpected error for level {level}: {other:?}"),
                }
            }
        }

        it "should refuse a carrier that was never encoded" {
            let blank = PixelBuffer::from_fn(16, 16, |_, _| [0, 0, 0, 0]);
            let dct: Technique = "dct".parse().unwrap();

            assert!(matches!(
                SteganoCore::unveil(&blank, &dct),
                Err(SteganoError::SignatureMismatch("dct"))
            ));
        }
    }
}
