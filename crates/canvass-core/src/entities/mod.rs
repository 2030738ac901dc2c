//! Entity structs for all canvass domain objects.
//!
//! Each entity maps to a table in the libSQL database. Persisted entities
//! derive `Serialize`, `Deserialize`, and `JsonSchema`; the `New*` structs are
//! the validated insert payloads handed to the repository traits.

mod answer;
mod bank;
mod catalog;
mod question_link;
mod survey;

pub use answer::{NewAnswer, ResponseAnswer};
pub use bank::{NewBankQuestion, QuestionBankEntry};
pub use catalog::{Classification, QuestionType};
pub use question_link::{NewLink, QuestionSource, SurveyQuestionLink};
pub use survey::{NewSurvey, Survey};
