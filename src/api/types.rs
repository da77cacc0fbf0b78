use std::sync::Arc;

use crate::consult::ConsultationService;

/// Shared handler state.
#[derive(Clone)]
pub struct ApiContext {
    pub service: Arc<ConsultationService>,
}

impl ApiContext {
    pub fn new(service: Arc<ConsultationService>) -> Self {
        Self { service }
    }
}
