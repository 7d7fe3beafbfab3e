use serde::{Deserialize, Serialize};

use crate::model::{Role, Turn};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub history: Option<Vec<HistoryEntry>>,
    #[serde(default)]
    pub context: Option<String>,
}

// A prior turn as the browser client stores it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    #[serde(default)]
    pub parts: Option<Vec<HistoryPart>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryPart {
    #[serde(default)]
    pub text: Option<String>,
}

impl HistoryEntry {
    // The first part decides whether the entry is kept at all
    pub fn into_turn(self) -> Option<Turn> {
        let parts = self.parts?;
        let first = parts.first()?.text.as_deref()?;
        if first.is_empty() {
            return None;
        }

        let parts = parts
            .into_iter()
            .filter_map(|part| part.text)
            .filter(|text| !text.is_empty())
            .collect();
        Some(Turn {
            role: self.role,
            parts,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn history_keeps_order_and_drops_empty_turns() {
        let request: ChatRequest = serde_json::from_value(json!({
            "message": "E adesso?",
            "history": [
                {"role": "user", "parts": [{"text": "Ciao"}]},
                {"role": "model", "parts": [{"text": ""}]},
                {"role": "model", "parts": []},
                {"role": "user"},
                {"role": "model", "parts": [{}]},
                {"role": "model", "parts": [{"text": "Ciao! Come posso aiutarti?"}]}
            ]
        }))
        .unwrap();

        let turns: Vec<Turn> = request
            .history
            .unwrap_or_default()
            .into_iter()
            .filter_map(HistoryEntry::into_turn)
            .collect();

        assert_eq!(
            turns,
            vec![
                Turn::user("Ciao"),
                Turn::model("Ciao! Come posso aiutarti?")
            ]
        );
    }

    #[test]
    fn later_parts_follow_the_first() {
        let entry: HistoryEntry = serde_json::from_value(json!({
            "role": "user",
            "parts": [{"text": "prima "}, {}, {"text": ""}, {"text": "seconda"}]
        }))
        .unwrap();
        assert_eq!(
            entry.into_turn(),
            Some(Turn {
                role: Role::User,
                parts: vec!["prima ".to_string(), "seconda".to_string()],
            })
        );

        let entry: HistoryEntry = serde_json::from_value(json!({
            "role": "model",
            "parts": [{"text": ""}, {"text": "ignored"}]
        }))
        .unwrap();
        assert_eq!(entry.into_turn(), None);
    }

    #[test]
    fn everything_but_the_shape_is_optional() {
        let request: ChatRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.message.is_none());
        assert!(request.history.is_none());
        assert!(request.context.is_none());

        let request: ChatRequest =
            serde_json::from_value(json!({"message": "Ciao", "history": null})).unwrap();
        assert!(request.history.is_none());
    }

    #[test]
    fn unknown_role_is_rejected() {
        let parsed = serde_json::from_value::<ChatRequest>(json!({
            "message": "Ciao",
            "history": [{"role": "system", "parts": [{"text": "x"}]}]
        }));
        assert!(parsed.is_err());
    }
}
