use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("No movie in the dataset features the actor '{0}'")]
    ActorNotFound(String),

    #[error("No movie titled '{0}' in the dataset")]
    TitleNotFound(String),
}
