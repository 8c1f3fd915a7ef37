pub mod board_service;
pub mod errors;
pub mod game_service;
pub mod realtime_service;
