/*
 * Responsibility
 * - Bearer token -> verified claims, as a value (Outcome), never a panic
 * - bearer: header parsing / verifier: decode + checks / settings: key + algorithm
 * - context: per-request memoized outcome handed to handlers
 */
pub mod bearer;
pub mod context;
pub mod outcome;
pub mod settings;
pub mod verifier;

pub use context::AuthContext;
pub use outcome::{Outcome, WrongVariant};
pub use settings::{ConfigOptions, Configuration, Settings, VerificationKey};
pub use verifier::{Claims, TokenVerifier};
