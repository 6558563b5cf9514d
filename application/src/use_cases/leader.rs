//! Leader node protocol: a parse phase and a reply phase.

use super::invoke_node::NodeInvoker;
use crate::ports::llm_gateway::GatewayError;
use council_domain::{
    ConversationTurn, LeaderOutput, Model, NodeId, NodePromptTemplate, extract_json_object,
};
use tracing::{debug, warn};

/// The two leader invocations for one request
#[derive(Clone)]
pub struct LeaderProtocol {
    invoker: NodeInvoker,
}

impl LeaderProtocol {
    pub fn new(invoker: NodeInvoker) -> Self {
        Self { invoker }
    }

    /// Phase 1: turn the message into a structured record.
    ///
    /// Unparseable output falls back to a record whose summary is the raw
    /// completion.
    pub async fn parse(
        &self,
        active: NodeId,
        model: &Model,
        message: &str,
        history: &[ConversationTurn],
    ) -> Result<LeaderOutput, GatewayError> {
        let system = NodePromptTemplate::leader_parse_system(active);
        let prompt = NodePromptTemplate::leader_parse_prompt(message, history);
        let raw = self.invoker.invoke(&system, model, &prompt, None).await?;

        let Some(obj) = extract_json_object(&raw) else {
            warn!("Leader parse output was not JSON; using fallback record");
            return Ok(LeaderOutput::fallback(&raw));
        };
        let output = LeaderOutput::from_object(&obj);
        debug!(
            "Leader parsed {} candidate symptoms, engagement_ready={}",
            output.candidate_symptoms.len(),
            output.engagement_ready
        );
        Ok(output)
    }

    /// Phase 2: the conversational reply, conditioned on the phase 1 record.
    /// The reply is prose and is never parsed.
    pub async fn reply(
        &self,
        active: NodeId,
        model: &Model,
        message: &str,
        history: &[ConversationTurn],
        leader_output: &LeaderOutput,
    ) -> Result<String, GatewayError> {
        let system = NodePromptTemplate::leader_reply_system(active);
        let prompt = NodePromptTemplate::leader_reply_prompt(message, history, leader_output);
        self.invoker.invoke(&system, model, &prompt, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{LEADER_PARSE, LEADER_REPLY, ScriptedGateway, sent_prompts, text};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_parse_structured_output() {
        let gateway = Arc::new(ScriptedGateway::new().route(
            LEADER_PARSE,
            vec![text(
                r#"{"narrative_summary": "Cramping for ten days", "candidate_symptoms": ["cramping", "mood swings"]}"#,
            )],
        ));
        let leader = LeaderProtocol::new(NodeInvoker::new(gateway));

        let out = leader
            .parse(NodeId::Yapper, &Model::default(), "I've had cramping", &[])
            .await
            .unwrap();
        assert_eq!(out.candidate_symptoms, vec!["cramping", "mood swings"]);
    }

    #[tokio::test]
    async fn test_parse_fallback() {
        let gateway = Arc::new(
            ScriptedGateway::new().route(LEADER_PARSE, vec![text("Sorry, I can only chat.")]),
        );
        let leader = LeaderProtocol::new(NodeInvoker::new(gateway));

        let out = leader
            .parse(NodeId::Yapper, &Model::default(), "hi", &[])
            .await
            .unwrap();
        assert_eq!(out, LeaderOutput::fallback("Sorry, I can only chat."));
    }

    #[tokio::test]
    async fn test_reply_receives_record() {
        let gateway = Arc::new(
            ScriptedGateway::new().route(LEADER_REPLY, vec![text("That sounds hard.")]),
        );
        let leader = LeaderProtocol::new(NodeInvoker::new(gateway.clone()));
        let record = LeaderOutput {
            candidate_symptoms: vec!["insomnia".to_string()],
            ..LeaderOutput::default()
        };

        let reply = leader
            .reply(NodeId::Definer, &Model::default(), "can't sleep", &[], &record)
            .await
            .unwrap();

        assert_eq!(reply, "That sounds hard.");
        assert!(sent_prompts(&gateway)[0].contains("\"insomnia\""));
        assert!(gateway.system_prompts.lock().unwrap()[0].contains("The Definer"));
    }
}
