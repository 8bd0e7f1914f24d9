//! Default project configuration written next to the installed templates
//!
//! The file is user-owned. It is only ever created when absent and is read by
//! the prompt content, not by flowkit.

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraConfig {
    pub project_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchPrefix {
    pub feature: String,
    pub bugfix: String,
    pub hotfix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitConfig {
    pub default_branch: String,
    pub branch_prefix: BranchPrefix,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrConfig {
    pub target_branch: String,
    pub template: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub jira: JiraConfig,
    pub git: GitConfig,
    pub pr: PrConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            jira: JiraConfig {
                project_key: "PROJECT".into(),
                base_url: "https://your-domain.atlassian.net".into(),
            },
            git: GitConfig {
                default_branch: "dev".into(),
                branch_prefix: BranchPrefix {
                    feature: "feature/".into(),
                    bugfix: "bugfix/".into(),
                    hotfix: "hotfix/".into(),
                },
            },
            pr: PrConfig {
                target_branch: "dev".into(),
                template: "default".into(),
            },
        }
    }
}

impl ProjectConfig {
    /// Pretty JSON with a trailing newline, as written to disk.
    pub fn to_json(&self) -> Result<String, DomainError> {
        let mut json =
            serde_json::to_string_pretty(self).map_err(|e| DomainError::InvalidProjectConfig {
                message: e.to_string(),
            })?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_config_when_serialized_then_uses_camel_case_schema() {
        let json = ProjectConfig::default().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["jira"]["projectKey"], "PROJECT");
        assert!(value["jira"]["baseUrl"].is_string());
        assert_eq!(value["git"]["defaultBranch"], "dev");
        assert_eq!(value["git"]["branchPrefix"]["feature"], "feature/");
        assert_eq!(value["git"]["branchPrefix"]["bugfix"], "bugfix/");
        assert_eq!(value["git"]["branchPrefix"]["hotfix"], "hotfix/");
        assert_eq!(value["pr"]["targetBranch"], "dev");
        assert!(value["pr"]["template"].is_string());
        assert!(json.ends_with('\n'));
    }
}
