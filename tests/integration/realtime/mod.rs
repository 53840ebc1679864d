pub mod activity_feed_test;
pub mod room_test;
