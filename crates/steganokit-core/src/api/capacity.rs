use std::path::{Path, PathBuf};

use crate::{HideBits, PixelBuffer, SteganoCore, SteganoError, Technique};

pub fn prepare() -> CapacityApi {
    CapacityApi::default()
}

/// How much one technique can hide in one carrier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub technique: Technique,
    pub bits: usize,
    /// bytes of text left after the terminator
    pub text_bytes: usize,
}

#[derive(Default, Debug)]
pub struct CapacityApi {
    image: Option<PathBuf>,
    techniques: Option<Vec<Technique>>,
}

impl CapacityApi {
    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    /// Only report this technique, all techniques are reported by default
    pub fn using_technique(mut self, technique: Technique) -> Self {
        self.techniques.get_or_insert_with(Vec::new).push(technique);
        self
    }

    pub fn execute(self) -> Result<Vec<Capacity>, SteganoError> {
        let Some(image) = self.image else {
            return Err(SteganoError::CarrierNotSet);
        };

        let pixels = PixelBuffer::from_file(&image)?;
        let techniques = self.techniques.unwrap_or_else(|| Technique::all().to_vec());

        Ok(techniques
            .into_iter()
            .map(|technique| Capacity {
                technique,
                bits: technique.capacity(&pixels),
                text_bytes: SteganoCore::text_capacity(&pixels, &technique),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::api::test_utils::write_carrier;

    #[test]
    fn should_report_every_technique_by_default() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let carrier = write_carrier(temp_dir.path());

        let capacities = prepare().with_image(carrier).execute().unwrap();

        let bits: Vec<_> = capacities
            .iter()
            .map(|c| (c.technique.to_string(), c.bits))
            .collect();
        assert_eq!(bits[0], ("lsb".to_string(), 128 * 128 * 3));
        assert_eq!(bits[1], ("lsb-improved".to_string(), 128 * 128 * 3));
        assert_eq!(bits[2], ("patchwork".to_string(), 120));
        assert_eq!(bits[3], ("dct".to_string(), 255 * 4));
        assert_eq!(bits[4].0, "histogram");
        assert_eq!(capacities[0].text_bytes, 128 * 128 * 3 / 8 - 7);
    }

    #[test]
    fn should_report_only_the_chosen_technique() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let carrier = write_carrier(temp_dir.path());

        let capacities = prepare()
            .with_image(carrier)
            .using_technique("dct".parse().unwrap())
            .execute()
            .unwrap();

        assert_eq!(capacities.len(), 1);
        assert_eq!(capacities[0].text_bytes, 127 - 7);
    }
}
