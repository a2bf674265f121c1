//! One converter per tool format. Each adapter supplies a record rule and
//! a severity table; parsing, error recovery and builder handling live in
//! [`PatternParser`](super::PatternParser) and [`JsonParser`](super::JsonParser).

pub mod gcc4;
pub mod hadolint;
pub mod nagfor;
pub mod native;
pub mod revapi;
pub mod rflint;

pub use gcc4::Gcc4Adapter;
pub use hadolint::HadoLintAdapter;
pub use nagfor::NagFortranAdapter;
pub use native::NativeAdapter;
pub use revapi::RevApiAdapter;
pub use rflint::RfLintAdapter;
