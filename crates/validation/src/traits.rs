//! Core validation traits and the named validator pipeline

use crate::error::ValidationErrors;
use std::sync::Arc;

/// A record-level validator. Appends soft failures to `errors`; an `Err`
/// return means the record could not be inspected at all.
pub type RecordValidator<R, E> = Arc<dyn Fn(&R, &mut ValidationErrors) -> Result<(), E> + Send + Sync>;

/// Trait for records that carry their own validation pipeline
pub trait Validate {
    /// Error raised when a validator cannot read the record
    type Error: From<ValidationErrors>;

    /// Run every validator, appending messages to `errors`
    fn validate_into(&self, errors: &mut ValidationErrors) -> Result<(), Self::Error>;

    /// Collect the messages produced by every validator
    fn errors(&self) -> Result<ValidationErrors, Self::Error> {
        let mut errors = ValidationErrors::new();
        self.validate_into(&mut errors)?;
        Ok(errors)
    }

    /// Validate the record, failing with the collected messages if any
    fn validate(&self) -> Result<(), Self::Error> {
        let errors = self.errors()?;
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.into())
        }
    }

    /// Whether every validator passes
    fn is_valid(&self) -> Result<bool, Self::Error> {
        Ok(self.errors()?.is_empty())
    }
}

/// Ordered collection of validators registered by name
pub struct ValidatorSet<R, E> {
    validators: Vec<(String, RecordValidator<R, E>)>,
}

impl<R, E> std::fmt::Debug for ValidatorSet<R, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorSet")
            .field("validators", &self.names())
            .finish()
    }
}

impl<R, E> Clone for ValidatorSet<R, E> {
    fn clone(&self) -> Self {
        Self {
            validators: self.validators.clone(),
        }
    }
}

impl<R, E> ValidatorSet<R, E> {
    /// Create a new empty validator set
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Register a validator under `name`; validators run in registration order
    pub fn register<F>(&mut self, name: impl Into<String>, validator: F) -> &mut Self
    where
        F: Fn(&R, &mut ValidationErrors) -> Result<(), E> + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::trace!("Registering validator '{}'", name);
        self.validators.push((name, Arc::new(validator)));
        self
    }

    /// Names of the registered validators, in run order
    pub fn names(&self) -> Vec<&str> {
        self.validators.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Check whether a validator with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.validators.iter().any(|(registered, _)| registered == name)
    }

    /// Number of registered validators
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Check if no validators are registered
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Run every validator against `record`, appending to `errors`
    pub fn run(&self, record: &R, errors: &mut ValidationErrors) -> Result<(), E> {
        for (name, validator) in &self.validators {
            let before = errors.total_errors();
            validator(record, errors)?;
            tracing::trace!(
                "Validator '{}' added {} error(s)",
                name,
                errors.total_errors() - before
            );
        }
        Ok(())
    }

    /// Run every validator and return the collected messages
    pub fn collect(&self, record: &R) -> Result<ValidationErrors, E> {
        let mut errors = ValidationErrors::new();
        self.run(record, &mut errors)?;
        Ok(errors)
    }

    /// Run every validator, failing with the collected messages if any
    pub fn validate(&self, record: &R) -> Result<(), E>
    where
        E: From<ValidationErrors>,
    {
        let errors = self.collect(record)?;
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.into())
        }
    }
}

impl<R, E> Default for ValidatorSet<R, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BASE;

    #[derive(Debug)]
    struct Ticket {
        seats: u32,
    }

    fn ticket_validators() -> ValidatorSet<Ticket, ValidationErrors> {
        let mut validators = ValidatorSet::new();
        validators
            .register("has_seats", |ticket: &Ticket, errors: &mut ValidationErrors| {
                if ticket.seats == 0 {
                    errors.add_base_error("ticket must have seats");
                }
                Ok(())
            })
            .register("not_too_many_seats", |ticket: &Ticket, errors: &mut ValidationErrors| {
                if ticket.seats > 4 {
                    errors.add_error("seats", "too many seats");
                }
                Ok(())
            });
        validators
    }

    impl Validate for Ticket {
        type Error = ValidationErrors;

        fn validate_into(&self, errors: &mut ValidationErrors) -> Result<(), Self::Error> {
            ticket_validators().run(self, errors)
        }
    }

    #[test]
    fn test_validators_run_in_registration_order() {
        let validators = ticket_validators();
        assert_eq!(validators.names(), vec!["has_seats", "not_too_many_seats"]);
        assert!(validators.contains("has_seats"));
        assert!(!validators.contains("missing"));
        assert_eq!(validators.len(), 2);
    }

    #[test]
    fn test_collect_returns_messages() {
        let validators = ticket_validators();

        let errors = validators.collect(&Ticket { seats: 0 }).unwrap();
        assert_eq!(errors.messages(BASE), vec!["ticket must have seats"]);

        let errors = validators.collect(&Ticket { seats: 9 }).unwrap();
        assert!(errors.includes("seats", "too many seats"));
        assert!(!errors.has_field_errors(BASE));
    }

    #[test]
    fn test_validate_fails_with_collected_errors() {
        let validators = ticket_validators();
        assert!(validators.validate(&Ticket { seats: 2 }).is_ok());

        let err = validators.validate(&Ticket { seats: 0 }).unwrap_err();
        assert_eq!(err.total_errors(), 1);
    }

    #[test]
    fn test_validate_trait_defaults() {
        assert!(Ticket { seats: 1 }.is_valid().unwrap());
        assert!(!Ticket { seats: 5 }.is_valid().unwrap());
        assert!(Ticket { seats: 5 }.validate().is_err());
    }

    #[test]
    fn test_validator_error_aborts_run() {
        let mut validators: ValidatorSet<Ticket, String> = ValidatorSet::new();
        validators
            .register("explodes", |_: &Ticket, _: &mut ValidationErrors| Err("unreadable".to_string()))
            .register("never_runs", |_: &Ticket, errors: &mut ValidationErrors| {
                errors.add_base_error("unreachable");
                Ok(())
            });

        let mut errors = ValidationErrors::new();
        let result = validators.run(&Ticket { seats: 1 }, &mut errors);
        assert_eq!(result, Err("unreadable".to_string()));
        assert!(errors.is_empty());
    }
}
