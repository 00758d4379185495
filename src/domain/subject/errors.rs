//! Subject Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubjectError {
    #[error("Exercise must have at least one option")]
    EmptyOptions,

    #[error("Correct option '{0}' is not one of the exercise options")]
    CorrectOptionNotListed(String),
}
