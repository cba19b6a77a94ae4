use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondiError {
    #[error("Lambert W argument {x} is outside the domain of the requested branch")]
    LambertDomain { x: f64 },

    #[error("Invalid Bondi parameter: {what}")]
    InvalidParameter { what: &'static str },
}

pub type BondiResult<T> = Result<T, BondiError>;
