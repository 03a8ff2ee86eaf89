pub mod article_service;
pub use article_service::{ArticleError, ArticleService};

pub mod article_service_impl;
pub use article_service_impl::SeaOrmArticleService;

pub mod auth_service;
pub use auth_service::{AuthError, AuthService};

pub mod auth_service_impl;
pub use auth_service_impl::SeaOrmAuthService;
