use async_trait::async_trait;
use cmdpal_common::{InputBoxOptions, PlatformError};
use cmdpal_platform::PromptProvider;
use tokio::sync::{mpsc, oneshot};

/// A prompt waiting for the event loop to answer it.
#[derive(Debug)]
pub struct PromptRequest {
    pub options: InputBoxOptions,
    reply: oneshot::Sender<Option<String>>,
}

impl PromptRequest {
    pub fn answer(self, text: impl Into<String>) {
        // The trigger may already be gone; nothing to do then.
        let _ = self.reply.send(Some(text.into()));
    }

    pub fn cancel(self) {
        let _ = self.reply.send(None);
    }
}

/// Prompt provider that forwards requests to the event loop.
pub struct ChannelPrompt {
    requests: mpsc::Sender<PromptRequest>,
}

impl ChannelPrompt {
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<PromptRequest>) {
        let (requests, rx) = mpsc::channel(buffer);
        (Self { requests }, rx)
    }
}

#[async_trait]
impl PromptProvider for ChannelPrompt {
    async fn show_input_box(
        &self,
        options: InputBoxOptions,
    ) -> Result<Option<String>, PlatformError> {
        let (reply, answer) = oneshot::channel();
        self.requests
            .send(PromptRequest { options, reply })
            .await
            .map_err(|_| PlatformError::PromptError("prompt host is gone".into()))?;
        answer
            .await
            .map_err(|_| PlatformError::PromptError("prompt dropped without an answer".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn answer_reaches_caller() {
        let (prompt, mut rx) = ChannelPrompt::channel(1);
        let ask = tokio::spawn(async move {
            prompt.show_input_box(InputBoxOptions::new("Keyword")).await
        });

        let request = rx.recv().await.unwrap();
        assert_eq!(request.options.description, "Keyword");
        request.answer("lofi");

        assert_eq!(ask.await.unwrap().unwrap(), Some("lofi".to_string()));
    }

    #[tokio::test]
    async fn cancel_yields_none() {
        let (prompt, mut rx) = ChannelPrompt::channel(1);
        let ask = tokio::spawn(async move {
            prompt.show_input_box(InputBoxOptions::new("Keyword")).await
        });

        rx.recv().await.unwrap().cancel();
        assert_eq!(ask.await.unwrap().unwrap(), None);
    }

    #[tokio::test]
    async fn closed_host_is_an_error() {
        let (prompt, rx) = ChannelPrompt::channel(1);
        drop(rx);
        let err = prompt
            .show_input_box(InputBoxOptions::new("Keyword"))
            .await
            .unwrap_err();
        assert!(matches!(err, PlatformError::PromptError(_)));
    }
}
