//! Local canned-response generator
//!
//! Used when no upstream provider produced text. Pure string matching,
//! no I/O, always returns something.

use log::debug;
use crate::prompts::RequestKind;

pub const DISCLAIMER: &str = "This information is for general guidance only and is not a substitute for professional medical advice. Please consult a healthcare professional about your specific situation.";

/// A keyword group and the advice it selects
pub struct KeywordGroup
{   pub topic: &'static str
  , pub keywords: &'static [&'static str]
  , pub advice: &'static str
}

/// Ordered; the first matching group wins.
pub const KEYWORD_GROUPS: &[KeywordGroup] = &[
  KeywordGroup
  {   topic: "headache"
    , keywords: &["headache", "migraine"]
    , advice: "For headaches, rest in a quiet, dark room, stay well hydrated and consider an over-the-counter pain reliever such as paracetamol or ibuprofen if it is safe for you. Regular meals and sleep can help prevent them. See a doctor if the headache is sudden and severe, follows a head injury, or comes with fever, a stiff neck, confusion or changes in vision."
  }
, KeywordGroup
  {   topic: "fever"
    , keywords: &["fever", "temperature"]
    , advice: "For a fever, rest, drink plenty of fluids and dress in light clothing. Fever reducers such as paracetamol or ibuprofen can help with discomfort. Seek medical care if the fever is above 39.4°C (103°F), lasts more than three days, or comes with a rash, stiff neck, confusion or difficulty breathing."
  }
, KeywordGroup
  {   topic: "cough"
    , keywords: &["cough"]
    , advice: "For a cough, drink warm fluids, use honey (not for children under one year old), keep the air humid and avoid smoke. Most coughs from colds settle within two to three weeks. See a doctor if you cough up blood, have shortness of breath, or the cough lasts longer than three weeks."
  }
, KeywordGroup
  {   topic: "stomach"
    , keywords: &["stomach", "nausea", "vomit", "diarrhea", "diarrhoea"]
    , advice: "For stomach upset or nausea, sip clear fluids often, try small bland meals (such as toast, rice or bananas) and avoid fatty, spicy food, alcohol and caffeine. Seek care if you cannot keep fluids down, notice blood, have severe abdominal pain or show signs of dehydration."
  }
];

pub const GENERAL_ADVICE: &str = "Thank you for your question. General wellbeing is supported by a balanced diet, regular physical activity, enough sleep, good hydration and managing stress. If you have specific symptoms or concerns, a healthcare professional can give advice tailored to you.";

const HIGH_URGENCY_KEYWORDS: &[&str] = &[
  "chest pain"
, "difficulty breathing"
, "severe pain"
, "blood"
, "unconscious"
, "seizure"
];

const LOW_URGENCY_KEYWORDS: &[&str] = &["mild", "minor", "occasional"];

/// Urgency derived from the user's description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency
{   Low
  , Medium
  , High
}

impl Urgency
{   pub fn label(&self) -> &'static str
    {   match self
        {   Urgency::Low => "LOW"
          , Urgency::Medium => "MEDIUM"
          , Urgency::High => "HIGH"
        }
    }

    pub fn action(&self) -> &'static str
    {   match self
        {   Urgency::High => "Seek immediate attention: call emergency services or go to the nearest emergency department now."
          , Urgency::Medium => "Schedule an appointment with your doctor within the next few days, sooner if symptoms get worse."
          , Urgency::Low => "Monitor your symptoms and try self-care at home. Contact a doctor if they persist or worsen."
        }
    }
}

/// Derive urgency. High-urgency keywords take precedence over low ones.
pub fn classify_urgency(text: &str) -> Urgency
{   let lower = text.to_lowercase();
    if HIGH_URGENCY_KEYWORDS.iter().any(|k| lower.contains(k))
    {   Urgency::High
    } else if LOW_URGENCY_KEYWORDS.iter().any(|k| lower.contains(k))
    {   Urgency::Low
    } else
    {   Urgency::Medium
    }
}

/// First keyword group matching the text, case-insensitively
pub fn match_group(text: &str) -> Option<&'static KeywordGroup>
{   let lower = text.to_lowercase();
    KEYWORD_GROUPS.iter()
      .find(|g| g.keywords.iter().any(|k| lower.contains(k)))
}

/// Produce a response without any upstream provider
pub fn generate(kind: RequestKind, text: &str) -> String
{   let group = match_group(text);
    debug!(
      "Local fallback for {:?}, matched group: {:?}",
      kind,
      group.map(|g| g.topic)
    );
    let advice = group.map(|g| g.advice).unwrap_or(GENERAL_ADVICE);

    match kind
    {   RequestKind::SymptomAnalysis => {
          let urgency = classify_urgency(text);
          format!(
            "Symptom assessment (offline mode)\n\n\
             Urgency level: {}\n\
             Recommended action: {}\n\n\
             {}\n\n\
             {}",
            urgency.label(),
            urgency.action(),
            advice,
            DISCLAIMER
          )
        }
      , _ => format!("{}\n\n{}", advice, DISCLAIMER)
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn urgency_high_beats_low()
    {   assert_eq!(
          classify_urgency("mild chest pain since morning"),
          Urgency::High
        );
    }

    #[test]
    fn urgency_defaults_to_medium()
    {   assert_eq!(classify_urgency("my knee hurts"), Urgency::Medium);
    }

    #[test]
    fn matching_is_case_insensitive()
    {   assert_eq!(
          match_group("Terrible HEADACHE today").map(|g| g.topic),
          Some("headache")
        );
    }

    #[test]
    fn first_group_wins()
    {   // headache precedes fever in the table
        assert_eq!(
          match_group("fever and headache").map(|g| g.topic),
          Some("headache")
        );
    }

    #[test]
    fn unmatched_text_gets_general_advice()
    {   let out = generate(RequestKind::HealthChat, "how much water?");
        assert!(out.starts_with(GENERAL_ADVICE));
        assert!(out.ends_with(DISCLAIMER));
    }
}
