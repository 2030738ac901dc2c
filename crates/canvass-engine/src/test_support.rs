//! Shared fixtures for engine unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use canvass_core::entities::{QuestionBankEntry, Survey};
    use chrono::{DateTime, TimeZone, Utc};

    use canvass_db::CanvassDb;

    use crate::bank::{BankQuestionDraft, QuestionBank};
    use crate::lifecycle::SurveyDraft;

    pub async fn test_db() -> CanvassDb {
        CanvassDb::open_local(":memory:").await.unwrap()
    }

    pub fn jan(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap()
    }

    /// The "Q1 Feedback" draft: January 2025, audience 100, with a profile.
    pub fn q1_draft() -> SurveyDraft {
        SurveyDraft {
            name: "Q1 Feedback".into(),
            description: Some("Quarterly pulse".into()),
            starts_at: Some(jan(1)),
            ends_at: Some(jan(31)),
            audience_size: 100,
            profile_definition: Some(r#"{"age":"18-65"}"#.into()),
            admin_id: "admin-1".into(),
        }
    }

    /// Register `count` distinct rating questions.
    pub async fn seed_bank(db: &CanvassDb, count: usize) -> Vec<QuestionBankEntry> {
        let bank = QuestionBank::new(db);
        let mut entries = Vec::with_capacity(count);
        for i in 1..=count {
            entries.push(
                bank.register(BankQuestionDraft {
                    text: format!("Question {i}"),
                    type_id: "qty-00000004".into(),
                    classification_id: None,
                    created_by: Some("admin-1".into()),
                })
                .await
                .unwrap(),
            );
        }
        entries
    }

    /// Insert a survey straight through the repository.
    pub async fn insert_survey(db: &CanvassDb) -> Survey {
        crate::lifecycle::SurveyLifecycle::new(db, &canvass_config::SurveyRulesConfig::default())
            .create_survey(q1_draft())
            .await
            .unwrap()
    }
}
