use std::sync::Arc;

use shared::services::game_service::GameService;
use shared::services::realtime_service::RealtimeService;

#[derive(Clone)]
pub struct AppState {
    pub game_service: Arc<GameService>,
    pub realtime_service: Arc<RealtimeService>,
}
