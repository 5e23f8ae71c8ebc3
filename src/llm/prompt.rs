//! Prompt templates for the translation and grammar-check tasks.
//!
//! Both prompts ask the model for a bare JSON object; the reply still goes
//! through [`extract`](crate::llm::extract) because models frequently fence
//! it anyway.

// ---------------------------------------------------------------------------
// Instructions
// ---------------------------------------------------------------------------

/// English → Thai, with one few-shot example pair.
const TRANSLATE_INSTRUCTION: &str = r#"Translate the given sentence or paragraph into Thai.
Return the translation in JSON format with the following structure:
{
    "translation": "translated sentence or paragraph"
}
Only return the JSON format without any explanation.

Example:
Input: "The quick brown fox jumps over the lazy dog."
Output: {
    "translation": "สุนัขจิ้งจอกสีน้ำตาลที่รวดเร็วกระโดดข้ามสุนัขขี้เกียจ"
}"#;

const GRAMMAR_INSTRUCTION: &str = r#"Act as a Grammar checker.
You will be given a sentence or paragraph with error.
Identify and correct any grammatical errors.
Return the errors in JSON format with the following structure:
{
    "errors": [
        {
            "error": "the incorrect word or phrase",
            "correction": "the corrected word or phrase",
            "explanation": "why it is wrong"
        }
    ]
}
If the text has no grammatical errors, return {"errors": []}.
Only return the JSON format without any explanation."#;

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Prompt asking for a Thai translation of `text`.
pub fn translation_prompt(text: &str) -> String {
    format!("{TRANSLATE_INSTRUCTION}\n\nText to translate: {text}")
}

/// Prompt asking for the grammatical errors in `text`.
///
/// The user's text is appended after the instruction, the same way
/// [`translation_prompt`] does it.  Earlier versions of this tool sent only
/// the fixed instruction and never the text; appending it here is deliberate.
pub fn grammar_prompt(text: &str) -> String {
    format!("{GRAMMAR_INSTRUCTION}\n\nText to check: {text}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
