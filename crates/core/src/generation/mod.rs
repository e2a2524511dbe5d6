pub mod error;
pub mod prompt;
pub mod types;
pub mod wire;

pub use error::GenerationError;
pub use prompt::{build_prompt, format_instructions, framework_directive};
pub use types::{Framework, GenerationConfig, GenerationRequest, OutputContract, SamplingConfig};
pub use wire::{build_request_body, parse_generate_response, GenerateContentBody};
