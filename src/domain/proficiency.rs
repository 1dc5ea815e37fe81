use serde::{Deserialize, Serialize};

/// 熟練度固定三級，其他代碼一律視為未對應（空字串），不是錯誤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Proficiency {
    Beginner,
    Proficient,
    Expert,
}

impl Proficiency {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Proficiency::Beginner),
            2 => Some(Proficiency::Proficient),
            3 => Some(Proficiency::Expert),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Proficiency::Beginner => 1,
            Proficiency::Proficient => 2,
            Proficiency::Expert => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Proficiency::Beginner => "Beginner",
            Proficiency::Proficient => "Proficient",
            Proficiency::Expert => "Expert",
        }
    }
}

pub fn label(code: i64) -> &'static str {
    Proficiency::from_code(code).map_or("", Proficiency::label)
}
