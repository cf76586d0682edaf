mod content_query;
mod content_storage;
mod models;
mod postgres;

pub use self::{
    content_query::ContentQuery,
    content_storage::ContentStorage,
    models::{ChatMessage, DiyProject, FaqItem, NewsArticle, RobotCatalogEntry, UsefulLink},
    postgres::{DBPool, init_db_from_env, migrate},
};
