use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{ArticleService, AuthService, SeaOrmArticleService, SeaOrmAuthService};

/// Everything a request handler may touch, built once at startup and passed
/// down explicitly.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub article_service: Arc<dyn ArticleService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::from_config(&config.general).await?;
        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let auth_service =
            Arc::new(SeaOrmAuthService::new(store.clone())) as Arc<dyn AuthService + 'static>;

        let article_service = Arc::new(SeaOrmArticleService::new(
            store.clone(),
            config.editor.clone(),
        )) as Arc<dyn ArticleService + 'static>;

        Self {
            config: Arc::new(config),
            store,
            auth_service,
            article_service,
        }
    }
}
