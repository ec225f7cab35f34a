//! Compliance analysis domain: the prompt sent to the model and the report
//! returned to the user

mod report;
mod template;

pub use report::ComplianceReport;
pub use template::{
    CompliancePrompt, PromptTemplate, PromptVariable, TemplateError, ANALYSIS_QUESTION_PREFIX,
    DEFAULT_COMPLIANCE_TEMPLATE,
};
