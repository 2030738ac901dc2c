//! Shared test utilities for canvass-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use chrono::{TimeZone, Utc};

    use canvass_core::entities::{
        NewBankQuestion, NewLink, NewSurvey, QuestionBankEntry, QuestionSource,
    };
    use canvass_core::enums::{BankQuestionState, SurveyState};

    use crate::CanvassDb;

    /// Create an in-memory database with migrations applied.
    pub async fn test_db() -> CanvassDb {
        CanvassDb::open_local(":memory:").await.unwrap()
    }

    /// A January 2025 draft survey with a profile.
    pub fn new_survey(name: &str) -> NewSurvey {
        NewSurvey {
            name: name.into(),
            description: None,
            starts_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            ends_at: Utc.with_ymd_and_hms(2025, 1, 31, 0, 0, 0).unwrap(),
            audience_size: 100,
            profile_definition: Some(r#"{"age":"18-65"}"#.into()),
            state: SurveyState::Draft,
            created_at: Utc::now(),
            admin_id: "admin-1".into(),
        }
    }

    /// Insert an active rating question into the bank.
    pub async fn seed_bank_question(db: &CanvassDb, text: &str) -> QuestionBankEntry {
        db.insert_bank_question(&NewBankQuestion {
            text: text.into(),
            type_id: "qty-00000004".into(),
            classification_id: Some("cls-00000002".into()),
            state: BankQuestionState::Active,
            created_by: Some("admin-1".into()),
        })
        .await
        .unwrap()
    }

    pub fn bank_link(survey_id: &str, question_id: &str, position: u32) -> NewLink {
        NewLink {
            survey_id: survey_id.into(),
            source: QuestionSource::Bank {
                question_id: question_id.into(),
            },
            position,
            is_discard: false,
            discard_criterion: None,
        }
    }
}
