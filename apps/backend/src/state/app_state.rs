use std::sync::Arc;

use crate::auth::TokenService;
use crate::services::posts::PostBoard;
use crate::services::users::UserDirectory;

/// Application state shared by every worker.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Issues credentials at login and decodes them for `CurrentUser`
    pub tokens: TokenService,
    /// Registered accounts
    pub users: Arc<UserDirectory>,
    /// Posts and their comments, timestamped on the token clock
    pub posts: Arc<PostBoard>,
}

impl AppState {
    /// State with empty stores.
    pub fn new(tokens: TokenService) -> Self {
        let posts = Arc::new(PostBoard::new(tokens.clock()));
        Self {
            tokens,
            users: Arc::new(UserDirectory::new()),
            posts,
        }
    }
}
