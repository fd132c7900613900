mod builder;
mod validation_chain;

pub use builder::ChainBuilder;
pub use validation_chain::ValidationChain;
