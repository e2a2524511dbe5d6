use super::types::{Framework, GenerationRequest, OutputContract};

const DELIMITER_INSTRUCTIONS: &str = "\
Return your response in the following format and nothing else:
---FILES---
---FILE:filename.ext---
<full content of the file>
---ENDFILE---
(repeat the FILE block for every file)
---ENDFILES---
Always include App.js (or App.tsx), index.js, styles.css, index.html and package.json.";

const JSON_INSTRUCTIONS: &str = "\
Return a single JSON object and nothing else, shaped like:
{ \"files\": { \"/App.js\": \"<file content>\", \"/package.json\": \"<file content>\" } }
Every value must be the complete file content as a JSON string with newlines escaped.
Always include App.js (or App.tsx), index.js, styles.css, index.html and package.json.";

/// Framework directive sentence for the prompt.
pub fn framework_directive(framework: Framework) -> &'static str {
    match framework {
        Framework::React => "Use React and Tailwind CSS.",
        Framework::ReactTs => "Use React with TypeScript and Tailwind CSS.",
        Framework::Next => {
            "Use React components written in the Next.js style (client components only, no server code) and Tailwind CSS."
        }
        Framework::Vite => "Use React with a Vite project layout and Tailwind CSS.",
    }
}

/// Output format section of the prompt.
pub fn format_instructions(contract: OutputContract) -> &'static str {
    match contract {
        OutputContract::Delimiter => DELIMITER_INSTRUCTIONS,
        OutputContract::Json => JSON_INSTRUCTIONS,
    }
}

/// Build the single-turn prompt sent to the model.
///
/// Embeds the user's description, the framework directive, design guidance and
/// the output contract the response parser expects.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let parts = [
        format!(
            "Generate a {} web application based on this description: \"{}\".",
            request.framework,
            request.prompt_text.trim()
        ),
        framework_directive(request.framework).to_string(),
        "Make the design modern, responsive, and visually appealing.".to_string(),
        "Include comments in the code to explain key functionality.".to_string(),
        "Only import packages from npm; do not reference local files you do not create."
            .to_string(),
        format_instructions(request.contract).to_string(),
    ];

    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::types::GenerationConfig;

    #[test]
    fn test_prompt_embeds_description_and_framework() {
        let request = GenerationRequest::new("  A pomodoro timer  ", GenerationConfig::default());
        let prompt = build_prompt(&request);

        assert!(prompt.starts_with(
            "Generate a react web application based on this description: \"A pomodoro timer\"."
        ));
        assert!(prompt.contains("Use React and Tailwind CSS."));
    }

    #[test]
    fn test_prompt_uses_delimiter_contract_by_default() {
        let request = GenerationRequest::new("Blog", GenerationConfig::default());
        let prompt = build_prompt(&request);

        assert!(prompt.contains("---FILES---"));
        assert!(prompt.contains("---FILE:filename.ext---"));
        assert!(prompt.contains("---ENDFILE---"));
        assert!(prompt.contains("---ENDFILES---"));
    }

    #[test]
    fn test_prompt_json_contract() {
        let config = GenerationConfig {
            contract: OutputContract::Json,
            framework: Framework::ReactTs,
            ..Default::default()
        };
        let prompt = build_prompt(&GenerationRequest::new("Dashboard", config));

        assert!(prompt.contains("{ \"files\":"));
        assert!(!prompt.contains("---FILES---"));
        assert!(prompt.contains("TypeScript"));
    }

    #[test]
    fn test_every_framework_mentions_tailwind() {
        for framework in [
            Framework::React,
            Framework::ReactTs,
            Framework::Next,
            Framework::Vite,
        ] {
            assert!(framework_directive(framework).contains("Tailwind CSS"));
        }
    }
}
