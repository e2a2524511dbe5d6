#[derive(thiserror::Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Refusing to write outside the output directory: {0}")]
    UnsafePath(String),

    #[error(transparent)]
    Generation(#[from] webgen_core::generation::GenerationError),
}
