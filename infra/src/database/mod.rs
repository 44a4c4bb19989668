//! History store implementations.

pub mod dynamodb;

pub use dynamodb::DynamoDbHistoryStore;

#[cfg(test)]
mod tests;
