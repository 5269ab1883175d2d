use serde::Serialize;

/// One part of a structured reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    Text { content: String },
    Image { url: String },
}

impl Segment {
    pub fn text(content: impl Into<String>) -> Self {
        Segment::Text {
            content: content.into(),
        }
    }

    pub fn image(url: impl Into<String>) -> Self {
        Segment::Image { url: url.into() }
    }
}

/// What the bot sends back for a handled message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    /// A single line of text.
    Text { content: String },
    /// A grouped multi-part message.
    Figure { segments: Vec<Segment> },
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Reply::Text {
            content: content.into(),
        }
    }

    /// Plain-text rendering for line-oriented hosts. Images become
    /// `[image: url]` lines.
    pub fn to_plain(&self) -> String {
        match self {
            Reply::Text { content } => content.clone(),
            Reply::Figure { segments } => segments
                .iter()
                .map(|s| match s {
                    Segment::Text { content } => content.clone(),
                    Segment::Image { url } => format!("[image: {url}]"),
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
