//! Resource categories exposed by the student API

use reqwest::Method;
use std::fmt;
use std::str::FromStr;

use crate::error::ClientError;
use crate::params::{format_compact_date, RequestParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceCategory {
    Absences,
    Agenda,
    Didactics,
    Schoolbooks,
    Calendar,
    Card,
    Grades,
    LessonsToday,
    LessonsDay,
    Notes,
    Periods,
    Subjects,
    Noticeboard,
    Documents,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 14] = [
        ResourceCategory::Absences,
        ResourceCategory::Agenda,
        ResourceCategory::Didactics,
        ResourceCategory::Schoolbooks,
        ResourceCategory::Calendar,
        ResourceCategory::Card,
        ResourceCategory::Grades,
        ResourceCategory::LessonsToday,
        ResourceCategory::LessonsDay,
        ResourceCategory::Notes,
        ResourceCategory::Periods,
        ResourceCategory::Subjects,
        ResourceCategory::Noticeboard,
        ResourceCategory::Documents,
    ];

    /// Public route name, also used as the payload key in responses.
    pub fn name(self) -> &'static str {
        match self {
            ResourceCategory::Absences => "assenze",
            ResourceCategory::Agenda => "agenda",
            ResourceCategory::Didactics => "didattica",
            ResourceCategory::Schoolbooks => "libri",
            ResourceCategory::Calendar => "calendario",
            ResourceCategory::Card => "card",
            ResourceCategory::Grades => "voti",
            ResourceCategory::LessonsToday => "lezioni_oggi",
            ResourceCategory::LessonsDay => "lezioni_giorno",
            ResourceCategory::Notes => "note",
            ResourceCategory::Periods => "periods",
            ResourceCategory::Subjects => "materie",
            ResourceCategory::Noticeboard => "noticeboard",
            ResourceCategory::Documents => "documenti",
        }
    }

    pub fn method(self) -> Method {
        match self {
            ResourceCategory::Documents => Method::POST,
            _ => Method::GET,
        }
    }

    /// Path below the API base, e.g. `students/1234567/grades`.
    pub fn path(self, student_id: &str, params: &RequestParams) -> Result<String, ClientError> {
        let suffix = match self {
            ResourceCategory::Absences => "absences/details".to_string(),
            ResourceCategory::Agenda => match params {
                RequestParams::Agenda(range) => {
                    format!("agenda/all/{}/{}", range.start_compact(), range.end_compact())
                }
                _ => return Err(ClientError::MissingParams(self.name())),
            },
            ResourceCategory::Didactics => "didactics".to_string(),
            ResourceCategory::Schoolbooks => "schoolbooks".to_string(),
            ResourceCategory::Calendar => "calendar/all".to_string(),
            ResourceCategory::Card => "card".to_string(),
            ResourceCategory::Grades => "grades".to_string(),
            ResourceCategory::LessonsToday => "lessons/today".to_string(),
            ResourceCategory::LessonsDay => match params {
                RequestParams::Day(day) => format!("lessons/{}", format_compact_date(*day)),
                _ => return Err(ClientError::MissingParams(self.name())),
            },
            ResourceCategory::Notes => "notes/all".to_string(),
            ResourceCategory::Periods => "periods".to_string(),
            ResourceCategory::Subjects => "subjects".to_string(),
            ResourceCategory::Noticeboard => "noticeboard".to_string(),
            ResourceCategory::Documents => "documents".to_string(),
        };
        Ok(format!("students/{}/{}", student_id, suffix))
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown resource category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for ResourceCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceCategory::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
