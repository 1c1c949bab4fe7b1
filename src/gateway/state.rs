use std::sync::Arc;

use crate::config::Config;
use crate::exchange::RatingsRepository;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn RatingsRepository>,

    /// `id_field` of RRE exports.
    pub rre_id_field: String,

    /// RRE `index` for cases without one.
    pub default_index: String,
}

impl AppState {
    pub fn new(repository: Arc<dyn RatingsRepository>, config: &Config) -> Self {
        Self {
            repository,
            rre_id_field: config.rre_id_field.clone(),
            default_index: config.default_index.clone(),
        }
    }
}
