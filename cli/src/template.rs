//! Offline generator that answers from fixed templates.
//!
//! Lets the board run end to end without a model provider.

use async_trait::async_trait;
use boardroom_core::GenerateError;
use boardroom_core::Prompt;
use boardroom_core::PromptKind;
use boardroom_core::ResponseGenerator;

#[derive(Debug, Default)]
pub struct TemplateGenerator;

#[async_trait]
impl ResponseGenerator for TemplateGenerator {
    async fn generate(&self, prompt: &Prompt) -> Result<String, GenerateError> {
        let company = if prompt.company.name.is_empty() {
            "the company"
        } else {
            prompt.company.name.as_str()
        };

        let text = match &prompt.kind {
            PromptKind::Reply { from, subject, .. } => format!(
                "{} acknowledges \"{subject}\" from {from} and will follow up for {company}.",
                prompt.display_name
            ),
            PromptKind::Report => {
                let mut lines = vec![format!(
                    "{} sees no blockers for {company} this cycle.",
                    prompt.display_name
                )];
                lines.extend(
                    prompt
                        .company
                        .goals
                        .iter()
                        .map(|goal| format!("- On track: {goal}")),
                );
                lines.extend(
                    prompt
                        .company
                        .challenges
                        .iter()
                        .map(|challenge| format!("- Watching: {challenge}")),
                );
                lines.join("\n")
            }
        };
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardroom_protocol::CompanyContext;
    use boardroom_protocol::Role;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn report_leads_with_summary_line() {
        let prompt = Prompt {
            role: Role::Coo,
            display_name: Role::Coo.display_name().to_string(),
            company: CompanyContext {
                name: "Acme".to_string(),
                goals: vec!["Ship v2".to_string()],
                ..Default::default()
            },
            history: Vec::new(),
            kind: PromptKind::Report,
        };

        let text = TemplateGenerator
            .generate(&prompt)
            .await
            .unwrap_or_else(|err| panic!("{err}"));

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("sees no blockers for Acme this cycle."));
        assert_eq!(lines[1], "- On track: Ship v2");
    }
}
