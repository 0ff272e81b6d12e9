//! Chat transcript for the assistant panel
//!
//! Append-only. There is no assistant behind it; the transcript starts with a
//! short sample exchange and the user's messages are added below.

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: u32,
    pub sender: Sender,
    pub text: String,
    pub timestamp: String,
}

/// Clock time as shown under a message, e.g. "02:31 PM".
pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format("%I:%M %p").to_string()
}

#[derive(Debug, Clone)]
pub struct ChatTranscript {
    messages: Vec<Message>,
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self::with_sample()
    }
}

impl ChatTranscript {
    pub fn empty() -> Self {
        Self { messages: Vec::new() }
    }

    pub fn with_sample() -> Self {
        let seed = [
            (Sender::User, "Can you explain the main concept of this lesson?", "2:30 PM"),
            (
                Sender::Bot,
                "Of course! The main concept revolves around understanding user needs through \
                 empathy and research. This forms the foundation of effective design thinking.",
                "2:31 PM",
            ),
            (Sender::User, "How do I apply this in real projects?", "2:32 PM"),
            (
                Sender::Bot,
                "Start by conducting user interviews, creating empathy maps, and documenting your \
                 findings. Then use these insights to define problem statements.",
                "2:32 PM",
            ),
        ];
        let mut transcript = Self::empty();
        for (sender, text, timestamp) in seed {
            transcript.push(sender, text.to_string(), timestamp.to_string());
        }
        transcript
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn push(&mut self, sender: Sender, text: String, timestamp: String) {
        let id = self.messages.len() as u32 + 1;
        self.messages.push(Message {
            id,
            sender,
            text,
            timestamp,
        });
    }

    /// Append a user message sent at `at`. Blank input is rejected.
    pub fn send_at(&mut self, input: &str, at: DateTime<Local>) -> Option<&Message> {
        if input.trim().is_empty() {
            return None;
        }
        self.push(Sender::User, input.to_string(), format_timestamp(at));
        self.messages.last()
    }

    pub fn send(&mut self, input: &str) -> Option<&Message> {
        self.send_at(input, Local::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sample_transcript() {
        let t = ChatTranscript::with_sample();
        assert_eq!(t.len(), 4);
        assert_eq!(t.messages()[1].sender, Sender::Bot);
        assert_eq!(t.messages()[3].id, 4);
    }

    #[test]
    fn test_send_appends_with_next_id() {
        let mut t = ChatTranscript::with_sample();
        let at = Local.with_ymd_and_hms(2024, 5, 1, 14, 7, 0).unwrap();
        let msg = t.send_at("what is a gutter?", at).unwrap().clone();
        assert_eq!(msg.id, 5);
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.timestamp, "02:07 PM");
        assert_eq!(t.len(), 5);
    }

    #[test]
    fn test_blank_input_rejected() {
        let mut t = ChatTranscript::empty();
        assert!(t.send("").is_none());
        assert!(t.send("   \n\t").is_none());
        assert!(t.is_empty());
    }

    #[test]
    fn test_text_kept_verbatim() {
        let mut t = ChatTranscript::empty();
        t.send("  spaced out  ");
        assert_eq!(t.messages()[0].text, "  spaced out  ");
    }
}
