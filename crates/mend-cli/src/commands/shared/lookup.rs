use mend_db::error::DatabaseError;

/// Map the store's empty-result error onto a readable not-found message.
/// Handlers that read the store directly use this; engine-backed handlers
/// get the same shape from `EngineError::NotFound`.
pub fn or_not_found<T>(
    result: Result<T, DatabaseError>,
    entity: &str,
    id: &str,
) -> anyhow::Result<T> {
    result.map_err(|error| match error {
        DatabaseError::NoResult => anyhow::anyhow!("{entity} not found: {id}"),
        other => anyhow::Error::from(other),
    })
}

#[cfg(test)]
mod tests {
    use mend_db::error::DatabaseError;

    use super::or_not_found;

    #[test]
    fn maps_no_result_to_not_found() {
        let result: Result<(), DatabaseError> = Err(DatabaseError::NoResult);
        let err = or_not_found(result, "fix", "fix-404").expect_err("should fail");
        assert_eq!(err.to_string(), "fix not found: fix-404");
    }

    #[test]
    fn passes_other_errors_through() {
        let result: Result<(), DatabaseError> =
            Err(DatabaseError::Query(String::from("syntax error")));
        let err = or_not_found(result, "fix", "fix-1").expect_err("should fail");
        assert!(err.to_string().contains("syntax error"));
    }

    #[test]
    fn passes_values_through() {
        let result: Result<u32, DatabaseError> = Ok(7);
        assert_eq!(or_not_found(result, "fix", "fix-1").expect("ok"), 7);
    }
}
