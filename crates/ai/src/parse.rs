//! Best-effort parsing of model answers.

use serde::de::DeserializeOwned;

/// Strip a markdown code fence (```json ... ``` or ``` ... ```) wrapping the
/// answer, if present. Models add these even when told not to.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the fence's info string ("json", "JSON", ...), then the closing fence.
    let body = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => return trimmed,
    };
    body.strip_suffix("```").map(str::trim).unwrap_or(trimmed)
}

/// Parse a typed JSON value out of a model answer. `None` on any mismatch;
/// callers supply their own fallback.
pub fn json_from_text<T: DeserializeOwned>(text: &str) -> Option<T> {
    serde_json::from_str(strip_code_fences(text)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_json_passes_through() {
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn fenced_json_is_unwrapped() {
        let answer = "```json\n{\"sentimiento\": \"positivo\"}\n```";
        assert_eq!(strip_code_fences(answer), "{\"sentimiento\": \"positivo\"}");
    }

    #[test]
    fn fence_without_info_string_is_unwrapped() {
        let answer = "```\n[1, 2, 3]\n```";
        assert_eq!(strip_code_fences(answer), "[1, 2, 3]");
    }

    #[test]
    fn typed_parse_tolerates_fences() {
        #[derive(serde::Deserialize, PartialEq, Debug)]
        struct Verdict {
            sentimiento: String,
        }

        let parsed: Option<Verdict> =
            json_from_text("```json\n{\"sentimiento\": \"negativo\"}\n```");
        assert_eq!(
            parsed,
            Some(Verdict {
                sentimiento: "negativo".to_string()
            })
        );
    }

    #[test]
    fn garbage_parses_to_none() {
        let parsed: Option<serde_json::Value> = json_from_text("lo siento, no puedo");
        assert!(parsed.is_none());
    }
}
