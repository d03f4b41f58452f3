use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The three questionnaires a student completes before recommendations are requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    Mbti,
    Riasec,
    Grit,
}

impl TestType {
    pub const ALL: [TestType; 3] = [TestType::Mbti, TestType::Riasec, TestType::Grit];

    pub fn as_str(self) -> &'static str {
        match self {
            TestType::Mbti => "mbti",
            TestType::Riasec => "riasec",
            TestType::Grit => "grit",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TestType::Mbti => "MBTI",
            TestType::Riasec => "RIASEC",
            TestType::Grit => "GRIT",
        }
    }

    pub fn question_count(self) -> u16 {
        match self {
            TestType::Mbti => 60,
            TestType::Riasec => 48,
            TestType::Grit => 12,
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown test type '{0}' (expected mbti, riasec or grit)")]
pub struct UnknownTestType(pub String);

impl FromStr for TestType {
    type Err = UnknownTestType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mbti" => Ok(TestType::Mbti),
            "riasec" => Ok(TestType::Riasec),
            "grit" => Ok(TestType::Grit),
            _ => Err(UnknownTestType(value.to_string())),
        }
    }
}

/// Lifecycle of a single test session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl TestStatus {
    pub fn label(self) -> &'static str {
        match self {
            TestStatus::NotStarted => "NOT_STARTED",
            TestStatus::InProgress => "IN_PROGRESS",
            TestStatus::Completed => "COMPLETED",
        }
    }
}

/// Identifier wrapper for students.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudentId(pub String);

/// Identifier wrapper for a student's session of one test type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Each student owns at most one session per test type, so the pair is the identity.
    pub fn for_student(test_type: TestType, student_id: &StudentId) -> Self {
        SessionId(format!("{}-{}", test_type.as_str(), student_id.0))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One pole of an MBTI dimension pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MbtiPole {
    E,
    I,
    S,
    N,
    T,
    F,
    J,
    P,
}

impl MbtiPole {
    pub const ALL: [MbtiPole; 8] = [
        MbtiPole::E,
        MbtiPole::I,
        MbtiPole::S,
        MbtiPole::N,
        MbtiPole::T,
        MbtiPole::F,
        MbtiPole::J,
        MbtiPole::P,
    ];

    pub fn pair(self) -> MbtiPair {
        match self {
            MbtiPole::E | MbtiPole::I => MbtiPair::EI,
            MbtiPole::S | MbtiPole::N => MbtiPair::SN,
            MbtiPole::T | MbtiPole::F => MbtiPair::TF,
            MbtiPole::J | MbtiPole::P => MbtiPair::JP,
        }
    }

    pub fn opposite(self) -> MbtiPole {
        let (first, second) = self.pair().poles();
        if self == first {
            second
        } else {
            first
        }
    }

    pub fn letter(self) -> char {
        match self {
            MbtiPole::E => 'E',
            MbtiPole::I => 'I',
            MbtiPole::S => 'S',
            MbtiPole::N => 'N',
            MbtiPole::T => 'T',
            MbtiPole::F => 'F',
            MbtiPole::J => 'J',
            MbtiPole::P => 'P',
        }
    }
}

/// The four bipolar MBTI dimensions, in type-code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MbtiPair {
    EI,
    SN,
    TF,
    JP,
}

impl MbtiPair {
    pub const ALL: [MbtiPair; 4] = [MbtiPair::EI, MbtiPair::SN, MbtiPair::TF, MbtiPair::JP];

    /// Returns `(first, second)`; the first-listed pole wins ties.
    pub fn poles(self) -> (MbtiPole, MbtiPole) {
        match self {
            MbtiPair::EI => (MbtiPole::E, MbtiPole::I),
            MbtiPair::SN => (MbtiPole::S, MbtiPole::N),
            MbtiPair::TF => (MbtiPole::T, MbtiPole::F),
            MbtiPair::JP => (MbtiPole::J, MbtiPole::P),
        }
    }
}

/// Holland interest categories. Declaration order doubles as the ranking tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiasecCategory {
    R,
    I,
    A,
    S,
    E,
    C,
}

impl RiasecCategory {
    pub const ALL: [RiasecCategory; 6] = [
        RiasecCategory::R,
        RiasecCategory::I,
        RiasecCategory::A,
        RiasecCategory::S,
        RiasecCategory::E,
        RiasecCategory::C,
    ];

    pub fn letter(self) -> char {
        match self {
            RiasecCategory::R => 'R',
            RiasecCategory::I => 'I',
            RiasecCategory::A => 'A',
            RiasecCategory::S => 'S',
            RiasecCategory::E => 'E',
            RiasecCategory::C => 'C',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'R' => Some(RiasecCategory::R),
            'I' => Some(RiasecCategory::I),
            'A' => Some(RiasecCategory::A),
            'S' => Some(RiasecCategory::S),
            'E' => Some(RiasecCategory::E),
            'C' => Some(RiasecCategory::C),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RiasecCategory::R => "Realistic",
            RiasecCategory::I => "Investigative",
            RiasecCategory::A => "Artistic",
            RiasecCategory::S => "Social",
            RiasecCategory::E => "Enterprising",
            RiasecCategory::C => "Conventional",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GritComponent {
    Passion,
    Perseverance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MbtiQuestion {
    pub id: u16,
    pub text: &'static str,
    pub dimension: MbtiPole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiasecQuestion {
    pub id: u16,
    pub text: &'static str,
    pub category: RiasecCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GritQuestion {
    pub id: u16,
    pub text: &'static str,
    pub component: GritComponent,
    pub reverse: bool,
}

/// Question as exposed through the progress view; serializes without a wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QuestionView {
    Mbti(MbtiQuestion),
    Riasec(RiasecQuestion),
    Grit(GritQuestion),
}

impl QuestionView {
    pub fn id(&self) -> u16 {
        match self {
            QuestionView::Mbti(question) => question.id,
            QuestionView::Riasec(question) => question.id,
            QuestionView::Grit(question) => question.id,
        }
    }
}
