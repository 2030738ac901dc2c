mod bank;
mod question;
mod response;
mod survey;

pub use bank::BankCommands;
pub use question::QuestionCommands;
pub use response::ResponseCommands;
pub use survey::SurveyCommands;
