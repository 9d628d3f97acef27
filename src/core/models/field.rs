//! Recognized survey columns and their positions in a header row

use crate::core::error::DatasetError;
use serde::Serialize;
use std::fmt;

/// Number of recognized columns.
pub const FIELD_COUNT: usize = 13;

/// A survey column the analytics know how to interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Field {
    /// Unique student identifier (`Student_ID`)
    StudentId,
    /// College name used for grouping (`College`)
    College,
    /// Year level (`Year_Level`)
    YearLevel,
    /// Final grade (`Final_Grade`)
    FinalGrade,
    /// Autonomous motivation score (`Motivation_Score`)
    MotivationScore,
    /// Peer/environment reliance score (`Environment_Score`)
    EnvironmentScore,
    /// Overall AI dependency index (`AI_Dependency_Index`)
    AiDependencyIndex,
    /// Reading domain dependency, 0-7 (`Reading_Dependency_Score`)
    ReadingDependencyScore,
    /// Writing domain dependency, 0-7 (`Writing_Dependency_Score`)
    WritingDependencyScore,
    /// Numeracy domain dependency, 0-7 (`Numeracy_Dependency_Score`)
    NumeracyDependencyScore,
    /// Binary high-risk flag (`High_Risk_Flag`)
    HighRiskFlag,
    /// Prior grade point average (`Prior_GPA`)
    PriorGpa,
    /// Weekly study hours (`Study_Hours_Per_Week`)
    StudyHoursPerWeek,
}

impl Field {
    /// Every recognized field, in canonical column order.
    pub const ALL: [Self; FIELD_COUNT] = [
        Self::StudentId,
        Self::College,
        Self::YearLevel,
        Self::FinalGrade,
        Self::MotivationScore,
        Self::EnvironmentScore,
        Self::AiDependencyIndex,
        Self::ReadingDependencyScore,
        Self::WritingDependencyScore,
        Self::NumeracyDependencyScore,
        Self::HighRiskFlag,
        Self::PriorGpa,
        Self::StudyHoursPerWeek,
    ];

    /// Header text for this field as it appears in the dataset.
    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::StudentId => "Student_ID",
            Self::College => "College",
            Self::YearLevel => "Year_Level",
            Self::FinalGrade => "Final_Grade",
            Self::MotivationScore => "Motivation_Score",
            Self::EnvironmentScore => "Environment_Score",
            Self::AiDependencyIndex => "AI_Dependency_Index",
            Self::ReadingDependencyScore => "Reading_Dependency_Score",
            Self::WritingDependencyScore => "Writing_Dependency_Score",
            Self::NumeracyDependencyScore => "Numeracy_Dependency_Score",
            Self::HighRiskFlag => "High_Risk_Flag",
            Self::PriorGpa => "Prior_GPA",
            Self::StudyHoursPerWeek => "Study_Hours_Per_Week",
        }
    }

    /// Look a field up by header text. Surrounding whitespace is ignored, case is not.
    #[must_use]
    pub fn from_column(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|f| f.column_name() == name)
    }

    /// Whether a dataset without this column is rejected at load time.
    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::StudentId | Self::College)
    }

    /// Whether values in this column are coerced to numbers.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        !matches!(self, Self::StudentId | Self::College | Self::YearLevel)
    }

    /// Fields the dashboard reads and warns about when absent from the header.
    #[must_use]
    pub const fn is_expected(self) -> bool {
        !matches!(self, Self::PriorGpa | Self::StudyHoursPerWeek)
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Column positions of every recognized field, resolved once from a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    positions: [Option<usize>; FIELD_COUNT],
}

impl Schema {
    /// Resolve field positions from header names.
    ///
    /// When a column name repeats, the first occurrence is used.
    ///
    /// # Errors
    /// Returns `DatasetError::MissingColumn` when `Student_ID` or `College` is absent.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Result<Self, DatasetError> {
        let mut positions = [None; FIELD_COUNT];
        for (idx, header) in headers.iter().enumerate() {
            if let Some(field) = Field::from_column(header.as_ref()) {
                positions[field.slot()].get_or_insert(idx);
            }
        }

        let schema = Self { positions };
        if let Some(missing) = Field::ALL
            .into_iter()
            .find(|f| f.is_required() && schema.position(*f).is_none())
        {
            return Err(DatasetError::MissingColumn(missing.column_name()));
        }
        Ok(schema)
    }

    /// Index of a field's column, if the header contains it.
    #[must_use]
    pub const fn position(&self, field: Field) -> Option<usize> {
        self.positions[field.slot()]
    }

    /// Expected fields that the header does not provide.
    #[must_use]
    pub fn missing_expected(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| f.is_expected() && self.position(*f).is_none())
            .collect()
    }
}
