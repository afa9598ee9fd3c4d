pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    ChatClient, ConversationWidget, Notification, RelayChatUseCase, RelayClient, RoundTrip,
    RoundTripOutcome, ScrollState,
};

pub use cli::Commands;

pub use connector::{HuggingFaceClient, MockChatClient, RelayHttpClient};

pub use domain::{ChatMessage, DomainError, Message, MessageId, Role, Transcript};
