use crate::error::{AppError, ConstraintParser};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Maps Diesel errors onto [`AppError`] variants.
///
/// Unique violations become `Duplicate`, foreign key and not-null violations
/// become `Validation`, and anything else is wrapped as `Database` with the
/// operation that failed.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::not_found("resource", "id", "unknown"),
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let constraint = info.constraint_name();

        // The DETAIL line carries the offending key; diesel keeps it separate.
        let full = match info.details() {
            Some(details) => format!("{}\n{}", message, details),
            None => message.to_string(),
        };

        let parsed = match kind {
            DatabaseErrorKind::UniqueViolation => {
                ConstraintParser::parse_unique_violation(&full, constraint)
                    .map(|(entity, field, value)| AppError::Duplicate {
                        entity,
                        field,
                        value,
                    })
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                ConstraintParser::parse_foreign_key_violation(&full, constraint).map(
                    |(entity, field, value)| AppError::Validation {
                        field,
                        reason: format!("{} references missing row '{}'", entity, value),
                    },
                )
            }
            DatabaseErrorKind::NotNullViolation => ConstraintParser::parse_not_null_violation(&full)
                .map(|(entity, field)| AppError::Validation {
                    field,
                    reason: format!("Field is required for {}", entity),
                }),
            _ => None,
        };

        parsed.unwrap_or_else(|| AppError::Database {
            operation: operation.to_string(),
            source: anyhow::anyhow!("{:?}: {}", kind, message),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeInfo {
        message: &'static str,
        details: Option<&'static str>,
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for FakeInfo {
        fn message(&self) -> &str {
            self.message
        }
        fn details(&self) -> Option<&str> {
            self.details
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn db_error(kind: DatabaseErrorKind, info: FakeInfo) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(info))
    }

    #[test]
    fn test_not_found_maps_to_not_found() {
        let err = DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find");
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[test]
    fn test_duplicate_email_reads_details_line() {
        let err = DatabaseErrorConverter::convert_diesel_error(
            db_error(
                DatabaseErrorKind::UniqueViolation,
                FakeInfo {
                    message: "duplicate key value violates unique constraint \"users_email_key\"",
                    details: Some("Key (email)=(dup@example.com) already exists."),
                    constraint: Some("users_email_key"),
                },
            ),
            "create user",
        );

        match err {
            AppError::Duplicate {
                entity,
                field,
                value,
            } => {
                assert_eq!(entity, "user");
                assert_eq!(field, "email");
                assert_eq!(value, "dup@example.com");
            }
            other => panic!("Expected Duplicate, got {:?}", other),
        }
    }

    #[test]
    fn test_foreign_key_maps_to_validation() {
        let err = DatabaseErrorConverter::convert_diesel_error(
            db_error(
                DatabaseErrorKind::ForeignKeyViolation,
                FakeInfo {
                    message: "insert or update on table \"videos\" violates foreign key constraint \"videos_user_id_fkey\"",
                    details: Some("Key (user_id)=(42) is not present in table \"users\"."),
                    constraint: Some("videos_user_id_fkey"),
                },
            ),
            "create video",
        );

        match err {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "user_id");
                assert!(reason.contains("42"));
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_error_keeps_operation() {
        let err = DatabaseErrorConverter::convert_diesel_error(
            db_error(
                DatabaseErrorKind::SerializationFailure,
                FakeInfo {
                    message: "could not serialize access",
                    details: None,
                    constraint: None,
                },
            ),
            "create video",
        );

        match err {
            AppError::Database { operation, .. } => assert_eq!(operation, "create video"),
            other => panic!("Expected Database, got {:?}", other),
        }
    }
}
