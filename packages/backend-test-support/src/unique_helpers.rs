//! Test helpers for generating unique test data
//!
//! ULID-based so parallel tests sharing one user directory never collide.

use ulid::Ulid;

/// Generate a unique email address in the format `{prefix}-{ulid}@example.test`.
///
/// The ULID is lowercased so the address survives email normalization
/// unchanged.
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let email = unique_email("student");
/// assert!(email.starts_with("student-"));
/// assert!(email.ends_with("@example.test"));
/// assert_eq!(email, email.to_lowercase());
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!(
        "{}-{}@example.test",
        prefix,
        Ulid::new().to_string().to_lowercase()
    )
}
