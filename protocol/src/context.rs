use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Company configuration handed by reference to every agent call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyContext {
    pub name: String,
    pub industry: String,
    pub size: String,
    pub goals: Vec<String>,
    pub challenges: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial update for [`CompanyContext`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyContextUpdate {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub goals: Option<Vec<String>>,
    pub challenges: Option<Vec<String>>,
}

impl CompanyContext {
    /// Merges the present fields of `update` and stamps `updated_at`.
    pub fn apply(&mut self, update: CompanyContextUpdate) {
        let CompanyContextUpdate {
            name,
            industry,
            size,
            goals,
            challenges,
        } = update;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(industry) = industry {
            self.industry = industry;
        }
        if let Some(size) = size {
            self.size = size;
        }
        if let Some(goals) = goals {
            self.goals = goals;
        }
        if let Some(challenges) = challenges {
            self.challenges = challenges;
        }
        self.updated_at = Some(Utc::now());
    }
}
