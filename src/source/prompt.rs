use serde_json::{Value, json};

use crate::models::{Difficulty, Topic};

pub fn build_prompt(topic: Topic, difficulty: Difficulty, count: usize) -> String {
    format!(
        "Generate exactly {count} high-quality multiple-choice questions for the {topic} \
programming language at the {difficulty} level.

STRICT CONTENT RULES:
1. NO SPOILERS: The 'question' and 'codeSnippet' fields MUST NOT contain the correct answer, \
the value being tested, or any text that gives away which option is correct.
2. CONDITIONAL CODE SNIPPETS: Only provide a 'codeSnippet' if the question is specifically a \
\"What is the output?\" or \"What does this code do?\" type of challenge. For general conceptual \
or syntax questions, the 'codeSnippet' field MUST be empty or null.
3. CODE FORMATTING: If providing a snippet, use '\\n' for new lines and ensure professional \
indentation.
4. OPTIONS: Provide exactly 4 plausible, distinct options. Ensure the 'correctAnswerIndex' \
(0-3) matches the actual correct option.
5. EXPLANATION: Provide a detailed 'explanation' that will ONLY be shown after the user answers.

Return the response as a JSON array of objects following the defined schema."
    )
}

/// Structured output schema sent alongside the prompt.
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING" },
                "question": { "type": "STRING" },
                "codeSnippet": {
                    "type": "STRING",
                    "description": "Multiline code block. Only use for output-based questions. Otherwise null.",
                    "nullable": true
                },
                "options": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                },
                "correctAnswerIndex": { "type": "INTEGER" },
                "explanation": { "type": "STRING" }
            },
            "required": ["id", "question", "options", "correctAnswerIndex", "explanation"]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_request_parameters() {
        let prompt = build_prompt(Topic::CSharp, Difficulty::Intermediate, 25);
        assert!(prompt.starts_with("Generate exactly 25 "));
        assert!(prompt.contains("for the C# programming language at the Intermediate level"));
        assert!(prompt.contains("NO SPOILERS"));
        assert!(prompt.contains("exactly 4 plausible, distinct options"));
    }

    #[test]
    fn test_schema_requires_core_fields() {
        let schema = response_schema();
        let required = schema["items"]["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(
            required,
            ["id", "question", "options", "correctAnswerIndex", "explanation"]
        );
        assert!(!required.contains(&"codeSnippet"));
    }
}
