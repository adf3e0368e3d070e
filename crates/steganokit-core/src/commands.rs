//! One call per CLI command, each delegating to the [`crate::api`] builders.

use std::path::Path;

use crate::api::capacity::Capacity;
use crate::{SteganoError, Technique};

pub fn hide(
    carrier: &Path,
    output: &Path,
    message: &str,
    technique: Technique,
) -> Result<(), SteganoError> {
    crate::api::hide::prepare()
        .with_message(message)
        .with_image(carrier)
        .with_output(output)
        .using_technique(technique)
        .execute()
}

pub fn unveil(
    secret_media: &Path,
    technique: Technique,
    destination_file: Option<&Path>,
    require_terminator: bool,
) -> Result<String, SteganoError> {
    let api = crate::api::unveil::prepare()
        .from_secret_file(secret_media)
        .using_technique(technique)
        .require_terminator(require_terminator);

    match destination_file {
        Some(file) => api.into_output_file(file).execute(),
        None => api.execute(),
    }
}

/// capacity of `carrier` for `technique`, or for every technique when `None`
pub fn capacity(carrier: &Path, technique: Option<Technique>) -> Result<Vec<Capacity>, SteganoError> {
    let api = crate::api::capacity::prepare().with_image(carrier);

    match technique {
        Some(technique) => api.using_technique(technique).execute(),
        None => api.execute(),
    }
}
