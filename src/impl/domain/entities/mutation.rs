use crate::errors::LedgerError;

/// Result of a mutation that has been applied in memory. If writing the
/// snapshot failed, `persist_error` carries the `PersistenceFailure`; the
/// in-memory change stands regardless.
#[derive(Debug)]
pub struct Mutation<T> {
    pub value: T,
    pub persist_error: Option<LedgerError>,
}

impl<T> Mutation<T> {
    pub(crate) fn new(value: T, persist_error: Option<LedgerError>) -> Self {
        Self {
            value,
            persist_error,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.persist_error.is_none()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Mutation<U> {
        Mutation {
            value: f(self.value),
            persist_error: self.persist_error,
        }
    }

    /// Treats a persistence failure as an error, discarding the value.
    pub fn into_result(self) -> Result<T, LedgerError> {
        match self.persist_error {
            None => Ok(self.value),
            Some(e) => Err(e),
        }
    }
}
