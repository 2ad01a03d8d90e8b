pub mod claims;
pub mod clock;
pub mod credential_header;
pub mod jwt;
pub mod password;
pub mod token_service;

pub use claims::Claims;
pub use clock::{Clock, ManualClock, SystemClock};
pub use credential_header::{read_credential, HeaderCredential};
pub use jwt::{mint_access_token, verify_access_token, CredentialError};
pub use token_service::TokenService;
