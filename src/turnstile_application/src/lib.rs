pub mod chain;
pub mod steps;
pub mod use_cases;

pub use chain::{ChainBuilder, ValidationChain};
pub use steps::{
    ChainOptions, EmailFormatStep, PasswordLengthStep, PasswordVerificationStep, RateLimitStep,
    RequiredFieldsStep, UserExistsStep, default_chain,
};
pub use use_cases::{
    login::{LoginError, LoginUseCase},
    logout::{LogoutError, LogoutUseCase},
};
