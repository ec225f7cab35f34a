//! Prompt template parsing and rendering
//!
//! Supports variable syntax: `${var:variable-name:default-value}`
//! - `${var:name}` - Required variable, error if not provided
//! - `${var:name:default}` - Optional variable with default value

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

use crate::domain::DomainError;

/// Regex to match variable patterns: ${var:name} or ${var:name:default}
static VARIABLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{var:([a-zA-Z0-9][-a-zA-Z0-9]*)(?::([^}]*))?\}")
        .expect("variable pattern is valid")
});

/// Prefix of the question asked about a user document
pub const ANALYSIS_QUESTION_PREFIX: &str =
    "Analyze this privacy policy for potential GDPR compliance gaps: ";

/// Instructions given to the model for every analysis
pub const DEFAULT_COMPLIANCE_TEMPLATE: &str = "You are a GDPR compliance expert.

Use ONLY the provided GDPR context.
Do not hallucinate.

GDPR CONTEXT:
${var:context}

QUESTION:
${var:question}

Your task:
- Identify potential GDPR compliance gaps
- Reference relevant GDPR Articles where applicable
- Be concise and structured
";

/// Template processing errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TemplateError {
    #[error("Missing required variable: {name}")]
    MissingVariable { name: String },

    #[error("Template does not declare variable: {name}")]
    UndeclaredVariable { name: String },
}

impl From<TemplateError> for DomainError {
    fn from(err: TemplateError) -> Self {
        DomainError::validation(err.to_string())
    }
}

/// A parsed variable from a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptVariable {
    pub name: String,
    pub default: Option<String>,
}

impl PromptVariable {
    pub fn required(&self) -> bool {
        self.default.is_none()
    }
}

/// A parsed prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    content: String,
    variables: Vec<PromptVariable>,
}

impl PromptTemplate {
    /// Parse a template string and extract variables
    pub fn parse(content: impl Into<String>) -> Self {
        let content = content.into();
        let mut variables = Vec::new();
        let mut seen = HashSet::new();

        for cap in VARIABLE_PATTERN.captures_iter(&content) {
            let name = cap[1].to_string();

            if !seen.insert(name.clone()) {
                continue;
            }

            variables.push(PromptVariable {
                name,
                default: cap.get(2).map(|m| m.as_str().to_string()),
            });
        }

        Self { content, variables }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn variables(&self) -> &[PromptVariable] {
        &self.variables
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.iter().any(|v| v.name == name)
    }

    /// Render the template with provided values
    ///
    /// Substitution is a single pass, so placeholders appearing inside a
    /// supplied value are left untouched.
    pub fn render(&self, values: &HashMap<&str, &str>) -> Result<String, TemplateError> {
        if let Some(missing) = self
            .variables
            .iter()
            .find(|v| v.required() && !values.contains_key(v.name.as_str()))
        {
            return Err(TemplateError::MissingVariable {
                name: missing.name.clone(),
            });
        }

        let rendered = VARIABLE_PATTERN.replace_all(&self.content, |cap: &Captures| {
            values
                .get(&cap[1])
                .map(|v| v.to_string())
                .or_else(|| cap.get(2).map(|m| m.as_str().to_string()))
                .unwrap_or_default()
        });

        Ok(rendered.into_owned())
    }
}

/// The prompt sent to the model: retrieved context plus the question
#[derive(Debug, Clone)]
pub struct CompliancePrompt {
    template: PromptTemplate,
}

impl CompliancePrompt {
    pub const CONTEXT: &'static str = "context";
    pub const QUESTION: &'static str = "question";

    /// Use a custom template; it must declare `context` and `question`
    pub fn new(template: impl Into<String>) -> Result<Self, TemplateError> {
        let template = PromptTemplate::parse(template);

        for name in [Self::CONTEXT, Self::QUESTION] {
            if !template.has_variable(name) {
                return Err(TemplateError::UndeclaredVariable {
                    name: name.to_string(),
                });
            }
        }

        Ok(Self { template })
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    pub fn render(&self, context: &str, question: &str) -> Result<String, TemplateError> {
        let values = HashMap::from([(Self::CONTEXT, context), (Self::QUESTION, question)]);
        self.template.render(&values)
    }
}

impl Default for CompliancePrompt {
    fn default() -> Self {
        Self {
            template: PromptTemplate::parse(DEFAULT_COMPLIANCE_TEMPLATE),
        }
    }
}
