pub mod board_flow_test;
pub mod card_flow_test;
pub mod note_flow_test;
