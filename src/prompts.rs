//! System prompt templates, selected by request type

use serde::{Deserialize, Serialize};

/// Prompt for the general health chat
pub const HEALTH_CHAT_PROMPT: &str = "You are a friendly, knowledgeable health information assistant. Answer general health and wellness questions in clear, plain language. Keep answers concise and practical. You are not a doctor: do not diagnose, and encourage the user to consult a qualified healthcare professional for personal medical advice or whenever symptoms are serious or persistent.";

/// Prompt for symptom triage
pub const SYMPTOM_ANALYSIS_PROMPT: &str = r#"You are a careful symptom-analysis assistant. The user will describe their symptoms.

Respond with:
1. Possible causes, each with an estimated probability range (for example "common cold: 40-60%"). Never state a single definitive diagnosis.
2. An urgency level: LOW, MEDIUM or HIGH.
3. Recommended next steps, including when to seek care.
4. Simple self-care measures, if appropriate.

If the symptoms include chest pain, difficulty breathing, loss of consciousness, seizures, heavy bleeding or severe pain, state clearly that the user should seek immediate medical attention.

Always finish by reminding the user that this is not a medical diagnosis and that a healthcare professional should be consulted."#;

/// Prompt for drafting prescriptions
pub const PRESCRIPTION_PROMPT: &str = r#"You are an assistant that helps licensed clinicians draft prescriptions. From the information given, produce a structured draft containing: medication name, strength, dosage form, dose, frequency, duration, quantity, refills and patient instructions. List relevant contraindications and interactions to double check.

Mark the output clearly as a DRAFT that must be reviewed, edited and signed by a licensed prescriber before use. Do not invent patient details that were not provided."#;

/// Prompt used for any unrecognised request type
pub const DEFAULT_PROMPT: &str = "You are a helpful health assistant. Provide accurate, general health information, avoid diagnosing, and recommend consulting a healthcare professional when appropriate.";

/// Classification of an incoming request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind
{   HealthChat
  , SymptomAnalysis
  , PrescriptionAi
  , Default
}

impl RequestKind
{   /// Map a wire tag to a kind. Unknown and missing tags map to `Default`.
    pub fn from_tag(tag: Option<&str>) -> Self
    {   match tag
        {   Some("health_chat") => RequestKind::HealthChat
          , Some("symptom_analysis") => RequestKind::SymptomAnalysis
          , Some("prescription_ai") => RequestKind::PrescriptionAi
          , _ => RequestKind::Default
        }
    }

    pub fn system_prompt(&self) -> &'static str
    {   match self
        {   RequestKind::HealthChat => HEALTH_CHAT_PROMPT
          , RequestKind::SymptomAnalysis => SYMPTOM_ANALYSIS_PROMPT
          , RequestKind::PrescriptionAi => PRESCRIPTION_PROMPT
          , RequestKind::Default => DEFAULT_PROMPT
        }
    }

    pub fn compose(&self, user: &str) -> ComposedPrompt
    {   ComposedPrompt
        {   system: self.system_prompt().to_string()
          , user: user.to_string()
        }
    }
}

/// System template plus user content, as sent to a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt
{   pub system: String
  , pub user: String
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn known_tags_select_their_template()
    {   assert_eq!(
          RequestKind::from_tag(Some("health_chat")).system_prompt(),
          HEALTH_CHAT_PROMPT
        );
        assert_eq!(
          RequestKind::from_tag(Some("symptom_analysis")).system_prompt(),
          SYMPTOM_ANALYSIS_PROMPT
        );
        assert_eq!(
          RequestKind::from_tag(Some("prescription_ai")).system_prompt(),
          PRESCRIPTION_PROMPT
        );
    }

    #[test]
    fn unknown_or_missing_tag_is_default()
    {   assert_eq!(RequestKind::from_tag(None), RequestKind::Default);
        assert_eq!(
          RequestKind::from_tag(Some("Symptom_Analysis")),
          RequestKind::Default
        );
        assert_eq!(RequestKind::from_tag(Some("")), RequestKind::Default);
    }

    #[test]
    fn symptom_prompt_asks_for_probability_ranges()
    {   assert!(SYMPTOM_ANALYSIS_PROMPT.contains("probability range"));
    }
}
