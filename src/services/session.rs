use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::PatternError;

/// Last generated image, replaced wholesale on every generation.
#[derive(Debug, Clone)]
pub struct Session {
    pub image: Arc<Vec<u8>>,
    pub prompt: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(image: Vec<u8>, prompt: impl Into<String>) -> Self {
        Self {
            image: Arc::new(image),
            prompt: prompt.into(),
            created_at: Utc::now(),
        }
    }
}

/// Holder for the current [`Session`].
///
/// Readers get a snapshot; a new generation swaps in a new session and
/// never touches the old one.
#[derive(Debug, Clone, Default)]
pub struct SessionSlot {
    current: Arc<RwLock<Option<Arc<Session>>>>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn replace(&self, session: Session) -> Arc<Session> {
        let session = Arc::new(session);
        *self.current.write().await = Some(session.clone());
        tracing::debug!(prompt = %session.prompt, "Session image replaced");
        session
    }

    pub async fn current(&self) -> Option<Arc<Session>> {
        self.current.read().await.clone()
    }

    pub async fn clear(&self) {
        *self.current.write().await = None;
    }
}

/// Input image for a pattern run.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Image bytes sent with the request
    Upload(Vec<u8>),
    /// The session's last generated image
    Generated,
}

impl ImageSource {
    pub async fn resolve(self, slot: &SessionSlot) -> Result<Arc<Vec<u8>>, PatternError> {
        match self {
            ImageSource::Upload(bytes) => Ok(Arc::new(bytes)),
            ImageSource::Generated => slot
                .current()
                .await
                .map(|s| s.image.clone())
                .ok_or_else(|| {
                    PatternError::InvalidInput("no generated image in this session".to_string())
                }),
        }
    }
}
