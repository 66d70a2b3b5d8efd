use regex::Regex;
use std::sync::OnceLock;

/// Tables whose constraints we know how to name. Order matters only for
/// readability; prefixes are matched against the whole constraint name.
const KNOWN_TABLES: &[(&str, &str)] = &[("users", "user"), ("videos", "video"), ("notes", "note")];

/// Suffixes PostgreSQL appends to generated constraint names.
const CONSTRAINT_SUFFIXES: &[&str] = &["_pkey", "_fkey", "_key", "_check", "_idx"];

/// A constraint name broken into the entity it guards and the column it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintTarget {
    /// Singular entity name, e.g. `user`.
    pub entity: String,
    /// Column name, e.g. `email`.
    pub field: String,
}

/// Extracts structured details from PostgreSQL constraint violation messages.
pub struct ConstraintParser;

struct Patterns {
    key_value: Regex,
    column: Regex,
    relation: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        // DETAIL:  Key (email)=(a@b.c) already exists.
        key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").expect("key/value pattern"),
        column: Regex::new(r#"column "([^"]+)""#).expect("column pattern"),
        relation: Regex::new(r#"(?:relation|table) "([^"]+)""#).expect("relation pattern"),
    })
}

impl ConstraintParser {
    /// Resolves a constraint name such as `users_email_key` or
    /// `videos_user_id_fkey` into its entity and column.
    ///
    /// Primary keys resolve to the table's key column (`notes_pkey` -> `note.id`,
    /// `videos_pkey` -> `video.video_id`).
    pub fn parse_constraint_name(constraint_name: &str) -> Option<ConstraintTarget> {
        let (table, entity) = KNOWN_TABLES
            .iter()
            .find(|(table, _)| constraint_name.starts_with(&format!("{}_", table)))?;

        let rest = &constraint_name[table.len() + 1..];
        if rest == "pkey" {
            let field = if *table == "videos" { "video_id" } else { "id" };
            return Some(ConstraintTarget {
                entity: entity.to_string(),
                field: field.to_string(),
            });
        }

        let field = CONSTRAINT_SUFFIXES
            .iter()
            .find_map(|suffix| rest.strip_suffix(suffix.trim_start_matches('_')))
            .map(|f| f.trim_end_matches('_'))
            .filter(|f| !f.is_empty())?;

        Some(ConstraintTarget {
            entity: entity.to_string(),
            field: field.to_string(),
        })
    }

    /// Parses a unique violation into `(entity, field, value)`.
    ///
    /// Falls back to the `Key (..)=(..)` detail when the constraint name is
    /// unknown, and to the relation named in the message for the entity.
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let detail = Self::extract_key_value(message);

        if let Some(target) = constraint_name.and_then(Self::parse_constraint_name) {
            let value = detail
                .map(|(_, v)| v)
                .unwrap_or_else(|| "duplicate value".to_string());
            return Some((target.entity, target.field, value));
        }

        let (field, value) = detail?;
        let entity = Self::extract_relation(message)
            .map(|t| Self::singular(&t))
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Parses a foreign key violation into `(entity, field, referenced_value)`.
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let detail = Self::extract_key_value(message);
        let target = constraint_name.and_then(Self::parse_constraint_name);

        match (target, detail) {
            (Some(t), Some((_, value))) => Some((t.entity, t.field, value)),
            (Some(t), None) => Some((t.entity, t.field, "unknown".to_string())),
            (None, Some((field, value))) => {
                let entity = Self::extract_relation(message)
                    .map(|t| Self::singular(&t))
                    .unwrap_or_else(|| "resource".to_string());
                Some((entity, field, value))
            }
            (None, None) => None,
        }
    }

    /// Parses a not-null violation into `(entity, field)`.
    pub fn parse_not_null_violation(message: &str) -> Option<(String, String)> {
        let field = Self::extract_column(message)?;
        let entity = Self::extract_relation(message)
            .map(|t| Self::singular(&t))
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    pub fn extract_key_value(message: &str) -> Option<(String, String)> {
        patterns().key_value.captures(message).and_then(|caps| {
            Some((
                caps.get(1)?.as_str().to_string(),
                caps.get(2)?.as_str().to_string(),
            ))
        })
    }

    pub fn extract_column(message: &str) -> Option<String> {
        patterns()
            .column
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn extract_relation(message: &str) -> Option<String> {
        patterns()
            .relation
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    fn singular(table: &str) -> String {
        KNOWN_TABLES
            .iter()
            .find(|(t, _)| *t == table)
            .map(|(_, entity)| entity.to_string())
            .unwrap_or_else(|| table.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(entity: &str, field: &str) -> Option<ConstraintTarget> {
        Some(ConstraintTarget {
            entity: entity.to_string(),
            field: field.to_string(),
        })
    }

    #[test]
    fn test_parse_known_constraint_names() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("users_email_key"),
            target("user", "email")
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("users_username_key"),
            target("user", "username")
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("videos_user_id_fkey"),
            target("video", "user_id")
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("notes_video_id_fkey"),
            target("note", "video_id")
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("notes_pkey"),
            target("note", "id")
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("videos_pkey"),
            target("video", "video_id")
        );
    }

    #[test]
    fn test_unknown_constraint_name() {
        assert_eq!(ConstraintParser::parse_constraint_name("accounts_email_key"), None);
        assert_eq!(ConstraintParser::parse_constraint_name("users_"), None);
    }

    #[test]
    fn test_unique_violation_uses_detail_value() {
        let message = "duplicate key value violates unique constraint \"users_username_key\"\nDETAIL: Key (username)=(alice) already exists.";
        assert_eq!(
            ConstraintParser::parse_unique_violation(message, Some("users_username_key")),
            Some(("user".to_string(), "username".to_string(), "alice".to_string()))
        );
    }

    #[test]
    fn test_unique_violation_without_constraint_name() {
        let message = "duplicate key value violates unique constraint\nDETAIL: Key (email)=(a@b.io) already exists.";
        assert_eq!(
            ConstraintParser::parse_unique_violation(message, None),
            Some(("resource".to_string(), "email".to_string(), "a@b.io".to_string()))
        );
    }

    #[test]
    fn test_foreign_key_violation() {
        let message = "insert or update on table \"videos\" violates foreign key constraint \"videos_user_id_fkey\"\nDETAIL: Key (user_id)=(0c8e...) is not present in table \"users\".";
        assert_eq!(
            ConstraintParser::parse_foreign_key_violation(message, Some("videos_user_id_fkey")),
            Some(("video".to_string(), "user_id".to_string(), "0c8e...".to_string()))
        );
    }

    #[test]
    fn test_not_null_violation() {
        let message =
            "null value in column \"title\" of relation \"videos\" violates not-null constraint";
        assert_eq!(
            ConstraintParser::parse_not_null_violation(message),
            Some(("video".to_string(), "title".to_string()))
        );
    }
}
