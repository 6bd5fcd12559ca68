use tracing::debug;

use crate::llm_client::{Content, GenerationConfig, GenerativeModel, LlmError};

/// One conversation with a model: its system instruction, sampling config and
/// history. A session lives for a single request lifecycle and is dropped
/// afterwards; nothing is shared between sessions.
pub struct ChatSession<'m> {
    model: &'m dyn GenerativeModel,
    label: &'static str,
    system_instruction: String,
    config: GenerationConfig,
    history: Vec<Content>,
}

impl<'m> ChatSession<'m> {
    pub fn start(
        model: &'m dyn GenerativeModel,
        label: &'static str,
        system_instruction: impl Into<String>,
        config: GenerationConfig,
    ) -> Self {
        Self {
            model,
            label,
            system_instruction: system_instruction.into(),
            config,
            history: Vec::new(),
        }
    }

    /// Sends a user turn and returns the model's reply.
    /// Both turns are appended to the history only when the call succeeds.
    pub async fn send_message(&mut self, text: impl Into<String>) -> Result<String, LlmError> {
        self.history.push(Content::user(text));
        debug!(
            session = self.label,
            turns = self.history.len(),
            "sending message"
        );

        match self
            .model
            .generate(&self.system_instruction, &self.history, &self.config)
            .await
        {
            Ok(reply) => {
                self.history.push(Content::model(reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                self.history.pop();
                Err(e)
            }
        }
    }

    #[cfg(test)]
    pub fn history(&self) -> &[Content] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::Role;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Echoes the number of turns it was sent, or fails when told to.
    struct CountingModel {
        fail: bool,
        seen: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl GenerativeModel for CountingModel {
        async fn generate(
            &self,
            _system_instruction: &str,
            contents: &[Content],
            _config: &GenerationConfig,
        ) -> Result<String, LlmError> {
            self.seen.lock().unwrap().push(contents.len());
            if self.fail {
                Err(LlmError::EmptyContent)
            } else {
                Ok(format!("turns={}", contents.len()))
            }
        }
    }

    #[tokio::test]
    async fn test_history_grows_with_each_exchange() {
        let model = CountingModel {
            fail: false,
            seen: Mutex::new(vec![]),
        };
        let mut session = ChatSession::start(&model, "test", "sys", GenerationConfig::reviewer());

        assert_eq!(session.send_message("one").await.unwrap(), "turns=1");
        assert_eq!(session.send_message("two").await.unwrap(), "turns=3");

        let roles: Vec<_> = session.history().iter().map(|c| c.role).collect();
        assert_eq!(
            roles,
            vec![
                Some(Role::User),
                Some(Role::Model),
                Some(Role::User),
                Some(Role::Model)
            ]
        );
        assert_eq!(*model.seen.lock().unwrap(), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_failed_call_leaves_history_untouched() {
        let model = CountingModel {
            fail: true,
            seen: Mutex::new(vec![]),
        };
        let mut session = ChatSession::start(&model, "test", "sys", GenerationConfig::reviewer());

        assert!(session.send_message("one").await.is_err());
        assert!(session.history().is_empty());
    }
}
