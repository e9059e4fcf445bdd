//! Student grade calculator: five marks out of 100 each.

use super::{Tool, ToolError};
use crate::session::Session;
use crate::types::{Command, Field, FieldSpec, Mode, Report, Values};

pub const SUBJECTS: usize = 5;

const FIELDS: FieldSpec = &[
    Field::decimal("subject1", "Subject 1 marks").range(0.0, 100.0),
    Field::decimal("subject2", "Subject 2 marks").range(0.0, 100.0),
    Field::decimal("subject3", "Subject 3 marks").range(0.0, 100.0),
    Field::decimal("subject4", "Subject 4 marks").range(0.0, 100.0),
    Field::decimal("subject5", "Subject 5 marks").range(0.0, 100.0),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeSummary {
    pub total: f64,
    pub average: f64,
    pub letter: &'static str,
}

/// Letter grade for an average percentage.
pub fn letter_for(average: f64) -> &'static str {
    const BANDS: [(f64, &str); 6] = [
        (90.0, "A+"),
        (80.0, "A"),
        (70.0, "B+"),
        (60.0, "B"),
        (50.0, "C"),
        (40.0, "D"),
    ];
    BANDS
        .iter()
        .find(|(floor, _)| average >= *floor)
        .map(|(_, letter)| *letter)
        .unwrap_or("F")
}

pub fn summarize(marks: &[f64; SUBJECTS]) -> GradeSummary {
    let total: f64 = marks.iter().sum();
    let average = total / SUBJECTS as f64;
    GradeSummary {
        total,
        average,
        letter: letter_for(average),
    }
}

pub struct GradeTool;

impl Tool for GradeTool {
    fn command(&self) -> Command {
        Command::Grade
    }

    fn description(&self) -> &str {
        "Total, average and letter grade for five subjects."
    }

    fn mode(&self) -> Mode {
        Mode::Modal
    }

    fn fields(&self) -> FieldSpec {
        FIELDS
    }

    fn execute(&self, values: &Values, _session: &mut Session) -> Result<Report, ToolError> {
        let mut marks = [0.0; SUBJECTS];
        for (mark, field) in marks.iter_mut().zip(FIELDS) {
            *mark = values.decimal(field.name)?;
        }
        let summary = summarize(&marks);

        Ok(Report::success(Command::Grade, "Grade Report")
            .line(format!(
                "Total Marks: {}/{}",
                summary.total,
                SUBJECTS * 100
            ))
            .line(format!("Average: {:.2}%", summary.average))
            .line(format!("Grade: {}", summary.letter))
            .value("total", summary.total)
            .value("average", summary.average)
            .value("grade", summary.letter))
    }
}
