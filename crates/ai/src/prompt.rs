//! Prompt templates with session context woven in.

use serde::{Deserialize, Serialize};

use campana_auth::Role;

/// Session context interpolated into every prompt.
#[derive(Debug, Clone)]
pub struct PromptContext {
    pub display_name: String,
    pub role: Role,
    pub campaign_name: String,
}

impl PromptContext {
    fn preamble(&self) -> String {
        format!(
            "Eres el asistente de la campaña \"{}\". Hablas con {} (rol: {}). \
             Responde siempre en español, con tono cercano y propositivo.",
            self.campaign_name, self.display_name, self.role
        )
    }
}

/// Draft a campaign message on a topic for an audience.
pub fn campaign_message(ctx: &PromptContext, topic: &str, audience: &str) -> String {
    format!(
        "{}\n\nRedacta un mensaje de campaña breve (máximo 3 párrafos) sobre \
         \"{topic}\", dirigido a {audience}. Evita promesas que no se puedan \
         cumplir y cierra con una invitación concreta a participar.",
        ctx.preamble()
    )
}

/// Ask for a sentiment verdict over citizen feedback, as strict JSON.
pub fn sentiment_analysis(ctx: &PromptContext, feedback: &str) -> String {
    format!(
        "{}\n\nAnaliza el sentimiento del siguiente comentario ciudadano y \
         responde únicamente con JSON de la forma \
         {{\"sentimiento\": \"positivo|neutral|negativo\", \"confianza\": 0.0}}.\n\n\
         Comentario: \"{feedback}\"",
        ctx.preamble()
    )
}

/// Ask for strategic reading of a territory/engagement summary.
pub fn strategic_insights(ctx: &PromptContext, summary: &str) -> String {
    format!(
        "{}\n\nCon base en este resumen de la operación, señala tres \
         prioridades estratégicas para los próximos quince días, cada una con \
         una acción concreta:\n\n{summary}",
        ctx.preamble()
    )
}

/// Parsed sentiment answer. The default is the fallback when the model's
/// answer cannot be parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentVerdict {
    pub sentimiento: String,
    pub confianza: f32,
}

impl Default for SentimentVerdict {
    fn default() -> Self {
        Self {
            sentimiento: "neutral".to_string(),
            confianza: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> PromptContext {
        PromptContext {
            display_name: "Ana Rivera".to_string(),
            role: Role::Candidato,
            campaign_name: "MI CAMPAÑA 2025".to_string(),
        }
    }

    #[test]
    fn prompts_carry_the_session_context() {
        let prompt = campaign_message(&ctx(), "seguridad barrial", "madres cabeza de hogar");
        assert!(prompt.contains("MI CAMPAÑA 2025"));
        assert!(prompt.contains("Ana Rivera"));
        assert!(prompt.contains("candidato"));
        assert!(prompt.contains("seguridad barrial"));
    }

    #[test]
    fn sentiment_prompt_demands_json() {
        let prompt = sentiment_analysis(&ctx(), "no nos han cumplido con la vía");
        assert!(prompt.contains("\"sentimiento\""));
        assert!(prompt.contains("no nos han cumplido"));
    }

    #[test]
    fn fallback_verdict_is_neutral() {
        let fallback = SentimentVerdict::default();
        assert_eq!(fallback.sentimiento, "neutral");
        assert_eq!(fallback.confianza, 0.0);
    }
}
