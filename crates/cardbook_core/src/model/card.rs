//! Business card records and the fixed template catalogue.
//!
//! # Invariants
//! - `id` is unique within one account's card list.
//! - Once an account has cards, at most one of them has `is_active = true`.

use super::account::AccountId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Card identifier (decimal epoch-millisecond token).
pub type CardId = String;

/// Visual template applied to a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardTemplate {
    Modern,
    Professional,
    Creative,
    Minimal,
    Corporate,
    Tech,
}

impl CardTemplate {
    /// Every template in picker order.
    pub const ALL: [Self; 6] = [
        Self::Modern,
        Self::Professional,
        Self::Creative,
        Self::Minimal,
        Self::Corporate,
        Self::Tech,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Professional => "professional",
            Self::Creative => "creative",
            Self::Minimal => "minimal",
            Self::Corporate => "corporate",
            Self::Tech => "tech",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|template| template.as_str() == normalized)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Modern => "Modern",
            Self::Professional => "Professional",
            Self::Creative => "Creative",
            Self::Minimal => "Minimal",
            Self::Corporate => "Corporate",
            Self::Tech => "Tech",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Modern => "Clean and minimalist design with bold colors",
            Self::Professional => "Classic business card with elegant typography",
            Self::Creative => "Vibrant colors and unique layout for creative professionals",
            Self::Minimal => "Simple and clean design focusing on content",
            Self::Corporate => "Professional corporate design with structured layout",
            Self::Tech => "Modern tech-inspired design with geometric elements",
        }
    }
}

/// One card created by an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub id: CardId,
    /// Owner. Persisted as `userId`.
    #[serde(rename = "userId")]
    pub account_id: AccountId,
    pub template: CardTemplate,
    pub is_active: bool,
    /// Written as an ISO-8601 UTC string with millisecond precision.
    #[serde(with = "created_at_format")]
    pub created_at: DateTime<Utc>,
}

/// `createdAt` codec. Writes `2024-01-01T00:00:00.000Z`; reads that form,
/// any other RFC 3339 offset, or bare epoch milliseconds.
mod created_at_format {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Stored {
        Text(String),
        Millis(i64),
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Stored::deserialize(deserializer)? {
            Stored::Text(text) => DateTime::parse_from_rfc3339(&text)
                .map(|parsed| parsed.with_timezone(&Utc))
                .map_err(|err| D::Error::custom(format!("invalid createdAt `{text}`: {err}"))),
            Stored::Millis(millis) => DateTime::from_timestamp_millis(millis)
                .ok_or_else(|| D::Error::custom(format!("createdAt {millis} is out of range"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CardRecord, CardTemplate};
    use chrono::{DateTime, TimeZone, Utc};

    #[test]
    fn template_parse_is_case_insensitive() {
        assert_eq!(CardTemplate::parse(" Tech "), Some(CardTemplate::Tech));
        assert_eq!(CardTemplate::parse("baroque"), None);
    }

    #[test]
    fn every_template_round_trips_through_its_name() {
        for template in CardTemplate::ALL {
            assert_eq!(CardTemplate::parse(template.as_str()), Some(template));
        }
    }

    #[test]
    fn card_record_uses_store_field_names() {
        let card = CardRecord {
            id: "1700000000000".to_string(),
            account_id: "42".to_string(),
            template: CardTemplate::Corporate,
            is_active: true,
            created_at: DateTime::from_timestamp_millis(1_700_000_000_123).unwrap(),
        };
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["userId"], "42");
        assert_eq!(json["isActive"], true);
        assert_eq!(json["createdAt"], "2023-11-14T22:13:20.123Z");
        assert_eq!(json["template"], "corporate");
    }

    #[test]
    fn created_at_reads_iso_strings_and_epoch_millis() {
        let iso: CardRecord = serde_json::from_str(
            r#"{"id":"1","userId":"1","template":"modern","isActive":true,"createdAt":"2024-01-01T00:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(
            iso.created_at,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap()
        );

        let millis: CardRecord = serde_json::from_str(
            r#"{"id":"1","userId":"1","template":"modern","isActive":true,"createdAt":1704067200000}"#,
        )
        .unwrap();
        assert_eq!(millis.created_at, iso.created_at);

        let garbage = serde_json::from_str::<CardRecord>(
            r#"{"id":"1","userId":"1","template":"modern","isActive":true,"createdAt":"yesterday"}"#,
        );
        assert!(garbage.is_err());
    }
}
