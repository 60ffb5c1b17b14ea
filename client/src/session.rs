use tokio::sync::RwLock;

/// Bearer token of the signed-in operator.
///
/// Shared between the client and whatever drives sign-in; the client clears it
/// when the backend reports the token as expired.
#[derive(Debug, Default)]
pub struct Session {
    token: RwLock<Option<String>>,
}

impl Session {
    /// Signed-out session
    pub fn new() -> Self {
        Self::default()
    }

    /// Session that starts signed in
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    /// Replace the token after a successful sign-in
    pub async fn sign_in(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
        tracing::debug!("session token set");
    }

    /// Forget the token, whatever it is
    pub async fn clear(&self) {
        if self.token.write().await.take().is_some() {
            tracing::info!("session token cleared");
        }
    }

    /// Forget the token only if it is still `expected`.
    ///
    /// Returns `false` when the operator signed in again after `expected` was
    /// sent, leaving the newer token in place.
    pub async fn clear_if(&self, expected: &str) -> bool {
        let mut token = self.token.write().await;
        if token.as_deref() != Some(expected) {
            tracing::debug!("expired token already replaced, keeping session");
            return false;
        }
        *token = None;
        tracing::info!("session token cleared");
        true
    }

    /// Current bearer token, if signed in
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Whether a token is held
    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }
}
