use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    catalog::Stream,
    database::models::education_profile,
    error::{AdmissionsError, AdmissionsResult},
};

/// Marks are percentages, so every subject is out of this.
const MAX_MARKS_PER_SUBJECT: f64 = 100.0;

const TWELFTH_REQUIRED: &str =
    "12th grade school, board and all six subject marks are required unless results are awaited";

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_twelfth_grade"))]
pub struct EducationProfileInput {
    #[validate(length(max = 255))]
    pub school_name_10th: Option<String>,
    #[validate(length(max = 100))]
    pub school_board_10th: Option<String>,
    #[validate(range(min = 0, max = 100))]
    pub subject1_marks_10th: Option<i16>,
    #[validate(range(min = 0, max = 100))]
    pub subject2_marks_10th: Option<i16>,
    #[validate(range(min = 0, max = 100))]
    pub subject3_marks_10th: Option<i16>,
    #[validate(range(min = 0, max = 100))]
    pub subject4_marks_10th: Option<i16>,
    #[validate(range(min = 0, max = 100))]
    pub subject5_marks_10th: Option<i16>,
    #[validate(range(min = 0, max = 100))]
    pub subject6_marks_10th: Option<i16>,
    /// Still waiting for 12th results; assumed when the field is left out.
    #[serde(default = "awaiting_results")]
    pub is_appearing: bool,
    #[validate(length(max = 255))]
    pub school_name_12th: Option<String>,
    #[validate(length(max = 100))]
    pub school_board_12th: Option<String>,
    pub subject_stream: Option<Stream>,
    #[validate(range(min = 0, max = 100))]
    pub subject1_marks_12th: Option<i16>,
    #[validate(range(min = 0, max = 100))]
    pub subject2_marks_12th: Option<i16>,
    #[validate(range(min = 0, max = 100))]
    pub subject3_marks_12th: Option<i16>,
    #[validate(range(min = 0, max = 100))]
    pub subject4_marks_12th: Option<i16>,
    #[validate(range(min = 0, max = 100))]
    pub subject5_marks_12th: Option<i16>,
    #[validate(range(min = 0, max = 100))]
    pub subject6_marks_12th: Option<i16>,
}

const fn awaiting_results() -> bool {
    true
}

impl EducationProfileInput {
    const fn marks_10th(&self) -> [Option<i16>; 6] {
        [
            self.subject1_marks_10th,
            self.subject2_marks_10th,
            self.subject3_marks_10th,
            self.subject4_marks_10th,
            self.subject5_marks_10th,
            self.subject6_marks_10th,
        ]
    }

    const fn marks_12th(&self) -> [Option<i16>; 6] {
        [
            self.subject1_marks_12th,
            self.subject2_marks_12th,
            self.subject3_marks_12th,
            self.subject4_marks_12th,
            self.subject5_marks_12th,
            self.subject6_marks_12th,
        ]
    }

    /// 12th percentage, only once results are out.
    fn percentage_12th(&self) -> Option<f64> {
        if self.is_appearing {
            None
        } else {
            percentage(&self.marks_12th())
        }
    }
}

/// With results out, the 12th school and all six marks are mandatory.
fn validate_twelfth_grade(input: &EducationProfileInput) -> Result<(), ValidationError> {
    if input.is_appearing {
        return Ok(());
    }

    let blank = |value: &Option<String>| value.as_deref().is_none_or(|v| v.trim().is_empty());
    if blank(&input.school_name_12th)
        || blank(&input.school_board_12th)
        || input.marks_12th().iter().any(Option::is_none)
    {
        return Err(
            ValidationError::new("twelfth_grade_required").with_message(TWELFTH_REQUIRED.into())
        );
    }

    Ok(())
}

/// Share of the maximum over the subjects present, rounded to two decimals.
#[must_use]
pub fn percentage(marks: &[Option<i16>]) -> Option<f64> {
    let present: Vec<f64> = marks.iter().flatten().map(|m| f64::from(*m)).collect();
    if present.is_empty() {
        return None;
    }

    let total: f64 = present.iter().sum();
    let max_possible = present.len() as f64 * MAX_MARKS_PER_SUBJECT;

    Some((total / max_possible * 10_000.0).round() / 100.0)
}

async fn find(
    db: &DatabaseConnection,
    account_id: Uuid,
) -> AdmissionsResult<education_profile::Model> {
    education_profile::Entity::find()
        .filter(education_profile::Column::AccountId.eq(account_id))
        .one(db)
        .await?
        .ok_or_else(|| AdmissionsError::NotFound("Education details not found".to_owned()))
}

pub async fn get(
    db: &DatabaseConnection,
    account_id: Uuid,
) -> AdmissionsResult<education_profile::Model> {
    find(db, account_id).await
}

/// Overwrites the record and recomputes both percentages.
pub async fn replace(
    db: &DatabaseConnection,
    account_id: Uuid,
    input: EducationProfileInput,
) -> AdmissionsResult<education_profile::Model> {
    let percentage_10th = percentage(&input.marks_10th());
    let percentage_12th = input.percentage_12th();
    let mut model = find(db, account_id).await?.into_active_model();

    model.school_name_10th = Set(input.school_name_10th);
    model.school_board_10th = Set(input.school_board_10th);
    model.subject1_marks_10th = Set(input.subject1_marks_10th);
    model.subject2_marks_10th = Set(input.subject2_marks_10th);
    model.subject3_marks_10th = Set(input.subject3_marks_10th);
    model.subject4_marks_10th = Set(input.subject4_marks_10th);
    model.subject5_marks_10th = Set(input.subject5_marks_10th);
    model.subject6_marks_10th = Set(input.subject6_marks_10th);
    model.percentage_10th = Set(percentage_10th);
    model.is_appearing = Set(input.is_appearing);
    model.school_name_12th = Set(input.school_name_12th);
    model.school_board_12th = Set(input.school_board_12th);
    model.subject_stream = Set(input.subject_stream);
    model.subject1_marks_12th = Set(input.subject1_marks_12th);
    model.subject2_marks_12th = Set(input.subject2_marks_12th);
    model.subject3_marks_12th = Set(input.subject3_marks_12th);
    model.subject4_marks_12th = Set(input.subject4_marks_12th);
    model.subject5_marks_12th = Set(input.subject5_marks_12th);
    model.subject6_marks_12th = Set(input.subject6_marks_12th);
    model.percentage_12th = Set(percentage_12th);

    Ok(model.update(db).await?)
}
