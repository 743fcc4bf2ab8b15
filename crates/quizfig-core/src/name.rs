use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn component_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9-]+$").unwrap())
}

fn description_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap())
}

/// Identifies the quiz question a diagram illustrates, e.g. `C21_P279_Q3781` or
/// `C21_P281_Q10_Composicion`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "NameParts", into = "NameParts")]
pub struct DiagramName {
    course: String,
    quiz: String,
    question: String,
    description: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct NameParts {
    course: String,
    quiz: String,
    question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

fn check(component: &'static str, value: &str, re: &Regex) -> Result<()> {
    if re.is_match(value) {
        Ok(())
    } else {
        Err(Error::InvalidName {
            component,
            value: value.to_string(),
        })
    }
}

impl DiagramName {
    pub fn new(
        course: impl Into<String>,
        quiz: impl Into<String>,
        question: impl Into<String>,
    ) -> Result<Self> {
        let (course, quiz, question) = (course.into(), quiz.into(), question.into());
        check("course", &course, component_re())?;
        check("quiz", &quiz, component_re())?;
        check("question", &question, component_re())?;
        Ok(Self {
            course,
            quiz,
            question,
            description: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Result<Self> {
        let description = description.into();
        check("description", &description, description_re())?;
        self.description = Some(description);
        Ok(self)
    }

    /// Parses a file stem: the first three `_`-separated parts are course, quiz and question;
    /// anything after them is the description.
    pub fn parse(stem: &str) -> Result<Self> {
        let mut parts = stem.splitn(4, '_');
        let (Some(course), Some(quiz), Some(question)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::InvalidName {
                component: "stem",
                value: stem.to_string(),
            });
        };
        let name = Self::new(course, quiz, question)?;
        match parts.next() {
            Some(description) => name.with_description(description),
            None => Ok(name),
        }
    }

    pub fn course(&self) -> &str {
        &self.course
    }

    pub fn quiz(&self) -> &str {
        &self.quiz
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn file_name(&self, extension: &str) -> String {
        format!("{self}.{extension}")
    }
}

impl fmt::Display for DiagramName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.course, self.quiz, self.question)?;
        if let Some(d) = &self.description {
            write!(f, "_{d}")?;
        }
        Ok(())
    }
}

impl FromStr for DiagramName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<NameParts> for DiagramName {
    type Error = Error;

    fn try_from(parts: NameParts) -> Result<Self> {
        let name = Self::new(parts.course, parts.quiz, parts.question)?;
        match parts.description {
            Some(d) => name.with_description(d),
            None => Ok(name),
        }
    }
}

impl From<DiagramName> for NameParts {
    fn from(name: DiagramName) -> Self {
        Self {
            course: name.course,
            quiz: name.quiz,
            question: name.question,
            description: name.description,
        }
    }
}
