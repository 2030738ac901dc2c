pub mod bank;
pub mod dispatch;
pub mod question;
pub mod response;
pub mod shared;
pub mod survey;
