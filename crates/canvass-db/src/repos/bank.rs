//! Question bank repository and the question type / classification catalogs.

use chrono::Utc;

use canvass_core::entities::{Classification, NewBankQuestion, QuestionBankEntry, QuestionType};
use canvass_core::ids::PREFIX_BANK_QUESTION;

use crate::CanvassDb;
use crate::error::DatabaseError;
use crate::helpers::{
    contains_pattern, get_opt_string, opt_value, parse_bank_state, parse_datetime,
};

const SELECT_COLS: &str =
    "id, text, type_id, classification_id, state, created_at, updated_at, created_by";

fn row_to_entry(row: &libsql::Row) -> Result<QuestionBankEntry, DatabaseError> {
    Ok(QuestionBankEntry {
        id: row.get(0)?,
        text: row.get(1)?,
        type_id: row.get(2)?,
        classification_id: get_opt_string(row, 3)?,
        state: parse_bank_state(&row.get::<String>(4)?)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
        created_by: get_opt_string(row, 7)?,
    })
}

fn row_to_question_type(row: &libsql::Row) -> Result<QuestionType, DatabaseError> {
    Ok(QuestionType {
        id: row.get(0)?,
        name: row.get(1)?,
        description: get_opt_string(row, 2)?,
    })
}

fn row_to_classification(row: &libsql::Row) -> Result<Classification, DatabaseError> {
    Ok(Classification {
        id: row.get(0)?,
        name: row.get(1)?,
        description: get_opt_string(row, 2)?,
    })
}

impl CanvassDb {
    pub async fn insert_bank_question(
        &self,
        question: &NewBankQuestion,
    ) -> Result<QuestionBankEntry, DatabaseError> {
        let now = Utc::now();
        let id = self.generate_id(PREFIX_BANK_QUESTION).await?;

        self.conn()
            .execute(
                &format!(
                    "INSERT INTO question_bank ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
                ),
                libsql::params![
                    id.as_str(),
                    question.text.as_str(),
                    question.type_id.as_str(),
                    question.classification_id.as_deref(),
                    question.state.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339(),
                    question.created_by.as_deref()
                ],
            )
            .await?;

        tracing::debug!(question_id = %id, "inserted bank question");
        Ok(QuestionBankEntry {
            id,
            text: question.text.clone(),
            type_id: question.type_id.clone(),
            classification_id: question.classification_id.clone(),
            state: question.state,
            created_at: now,
            updated_at: now,
            created_by: question.created_by.clone(),
        })
    }

    pub async fn get_bank_question(
        &self,
        id: &str,
    ) -> Result<Option<QuestionBankEntry>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM question_bank WHERE id = ?1"),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_entry(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn update_bank_question(
        &self,
        question: &QuestionBankEntry,
    ) -> Result<bool, DatabaseError> {
        let changed = self
            .conn()
            .execute(
                "UPDATE question_bank
                 SET text = ?1, type_id = ?2, classification_id = ?3, state = ?4, updated_at = ?5
                 WHERE id = ?6",
                libsql::params![
                    question.text.as_str(),
                    question.type_id.as_str(),
                    question.classification_id.as_deref(),
                    question.state.as_str(),
                    Utc::now().to_rfc3339(),
                    question.id.as_str()
                ],
            )
            .await?;
        Ok(changed > 0)
    }

    pub async fn list_bank_questions(&self) -> Result<Vec<QuestionBankEntry>, DatabaseError> {
        self.search_bank_questions(None, None).await
    }

    /// Case-insensitive substring match on text, optionally restricted to a
    /// question type. `None` filters match everything. Wildcards in `text`
    /// match literally.
    pub async fn search_bank_questions(
        &self,
        text: Option<&str>,
        type_id: Option<&str>,
    ) -> Result<Vec<QuestionBankEntry>, DatabaseError> {
        let pattern = text.map(contains_pattern);
        let params = vec![opt_value(pattern.as_deref()), opt_value(type_id)];
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM question_bank
                     WHERE (?1 IS NULL OR text LIKE ?1 ESCAPE '\\')
                       AND (?2 IS NULL OR type_id = ?2)
                     ORDER BY created_at, id"
                ),
                libsql::params_from_iter(params),
            )
            .await?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_entry(&row)?);
        }
        Ok(entries)
    }

    pub async fn find_question_type_by_name(
        &self,
        name: &str,
    ) -> Result<Option<QuestionType>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, name, description FROM question_types WHERE name = ?1",
                [name.trim()],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_question_type(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn get_question_type(&self, id: &str) -> Result<Option<QuestionType>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, name, description FROM question_types WHERE id = ?1",
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_question_type(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_question_types(&self) -> Result<Vec<QuestionType>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, name, description FROM question_types ORDER BY name",
                (),
            )
            .await?;
        let mut types = Vec::new();
        while let Some(row) = rows.next().await? {
            types.push(row_to_question_type(&row)?);
        }
        Ok(types)
    }

    pub async fn find_classification_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Classification>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, name, description FROM classifications WHERE name = ?1",
                [name.trim()],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_classification(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn get_classification(
        &self,
        id: &str,
    ) -> Result<Option<Classification>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, name, description FROM classifications WHERE id = ?1",
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_classification(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_classifications(&self) -> Result<Vec<Classification>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, name, description FROM classifications ORDER BY name",
                (),
            )
            .await?;
        let mut classifications = Vec::new();
        while let Some(row) = rows.next().await? {
            classifications.push(row_to_classification(&row)?);
        }
        Ok(classifications)
    }
}

#[cfg(test)]
mod tests {
    use canvass_core::enums::BankQuestionState;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::test_support::helpers::{seed_bank_question, test_db};

    #[tokio::test]
    async fn insert_and_get_roundtrip() {
        let db = test_db().await;
        let entry = seed_bank_question(&db, "How satisfied are you?").await;
        assert!(entry.id.starts_with("qbk-"));
        assert_eq!(db.get_bank_question(&entry.id).await.unwrap().unwrap(), entry);
    }

    #[tokio::test]
    async fn unknown_type_violates_foreign_key() {
        let db = test_db().await;
        let result = db
            .insert_bank_question(&NewBankQuestion {
                text: "Q".into(),
                type_id: "qty-ffffffff".into(),
                classification_id: None,
                state: BankQuestionState::Active,
                created_by: None,
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn update_bumps_updated_at() {
        let db = test_db().await;
        let mut entry = seed_bank_question(&db, "Old text").await;
        entry.text = "New text".into();
        entry.state = BankQuestionState::Inactive;
        assert!(db.update_bank_question(&entry).await.unwrap());

        let fetched = db.get_bank_question(&entry.id).await.unwrap().unwrap();
        assert_eq!(fetched.text, "New text");
        assert_eq!(fetched.state, BankQuestionState::Inactive);
        assert!(fetched.updated_at >= entry.updated_at);
        assert_eq!(fetched.created_at, entry.created_at);
    }

    #[tokio::test]
    async fn search_by_text_and_type() {
        let db = test_db().await;
        seed_bank_question(&db, "How old are you?").await;
        seed_bank_question(&db, "How satisfied are you?").await;
        db.insert_bank_question(&NewBankQuestion {
            text: "Would you recommend us?".into(),
            type_id: "qty-00000005".into(),
            classification_id: None,
            state: BankQuestionState::Active,
            created_by: None,
        })
        .await
        .unwrap();

        assert_eq!(db.list_bank_questions().await.unwrap().len(), 3);
        assert_eq!(
            db.search_bank_questions(Some("HOW"), None).await.unwrap().len(),
            2
        );
        let yes_no = db
            .search_bank_questions(None, Some("qty-00000005"))
            .await
            .unwrap();
        assert_eq!(yes_no.len(), 1);
        assert_eq!(yes_no[0].text, "Would you recommend us?");
        assert!(
            db.search_bank_questions(Some("old"), Some("qty-00000005"))
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn search_text_treats_wildcards_literally() {
        let db = test_db().await;
        seed_bank_question(&db, "Did 50% of the course help?").await;
        seed_bank_question(&db, "Rate 500 things").await;
        seed_bank_question(&db, "What is your first_name?").await;
        seed_bank_question(&db, "What is your firstXname?").await;

        let percent = db.search_bank_questions(Some("50%"), None).await.unwrap();
        assert_eq!(percent.len(), 1);
        assert_eq!(percent[0].text, "Did 50% of the course help?");

        let underscore = db
            .search_bank_questions(Some("first_name"), None)
            .await
            .unwrap();
        assert_eq!(underscore.len(), 1);
        assert_eq!(underscore[0].text, "What is your first_name?");
    }

    #[rstest]
    #[case("rating", Some("qty-00000004"))]
    #[case("  Rating ", Some("qty-00000004"))]
    #[case("YES_NO", Some("qty-00000005"))]
    #[case("essay", None)]
    #[tokio::test]
    async fn question_type_lookup_is_case_insensitive(
        #[case] name: &str,
        #[case] expected: Option<&str>,
    ) {
        let db = test_db().await;
        let found = db.find_question_type_by_name(name).await.unwrap();
        assert_eq!(found.map(|t| t.id).as_deref(), expected);
    }

    #[tokio::test]
    async fn catalog_listings_and_lookups() {
        let db = test_db().await;
        let types = db.list_question_types().await.unwrap();
        assert_eq!(types.len(), 6);
        assert!(db.get_question_type("qty-00000001").await.unwrap().is_some());

        let classifications = db.list_classifications().await.unwrap();
        let names: Vec<_> = classifications.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["behavior", "demographic", "general", "satisfaction"]);
        assert_eq!(
            db.find_classification_by_name("Satisfaction")
                .await
                .unwrap()
                .map(|c| c.id),
            Some("cls-00000002".to_string())
        );
        assert!(db.get_classification("cls-ffffffff").await.unwrap().is_none());
    }
}
