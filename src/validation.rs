use crate::error::ValidationError;
use crate::model::StudentRecord;

/// Checks the bounded fields of a record in a fixed order and stops at the
/// first violation.
///
/// Study hours and extracurricular are never range-checked. A NaN value
/// compares false against both bounds and therefore passes.
pub fn validate(record: &StudentRecord) -> Result<(), ValidationError> {
    let checks = [
        (record.attendance, 100.0, ValidationError::Attendance),
        (record.internal_assessment, 50.0, ValidationError::InternalAssessment),
        (record.class_test, 40.0, ValidationError::ClassTest),
        (record.assignment_marks, 50.0, ValidationError::AssignmentMarks),
        (record.aptitude_marks, 100.0, ValidationError::AptitudeMarks),
        (record.coding_marks, 100.0, ValidationError::CodingMarks),
    ];

    for (value, max, err) in checks {
        if value < 0.0 || value > max {
            return Err(err);
        }
    }

    Ok(())
}
