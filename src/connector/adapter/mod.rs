mod huggingface_client;
mod mock_chat_client;
mod relay_http_client;

pub use huggingface_client::*;
pub use mock_chat_client::*;
pub use relay_http_client::*;
