//! Framework-facing facade over the AlliedWallet connector: one async
//! method per transaction type, plus configuration loading and tracing
//! setup.

pub mod configs;
pub mod error;
pub mod gateway;
pub mod logger;
pub mod types;

pub use configs::GatewayConfig;
pub use gateway::{AlliedwalletGateway, GatewayCredentials};

/// Name of this crate, for log filtering directives.
#[macro_export]
macro_rules! service_name {
    () => {
        env!("CARGO_PKG_NAME")
    };
}
