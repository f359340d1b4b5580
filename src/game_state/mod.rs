pub mod chess_rules;
pub mod chess_types;
pub mod game_state;
