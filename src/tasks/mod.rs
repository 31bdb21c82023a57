pub mod notification_loop;
pub mod ticker;
