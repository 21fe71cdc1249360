pub mod article;
pub mod logging;
pub mod markup;
pub mod providers;
pub mod server;
pub mod settings;
pub mod translate;

pub use article::{Article, ContentExtractor, ReadableExtractor};
pub use providers::{CompletionParams, DeepSeek, Provider};
pub use settings::Settings;
pub use translate::{TranslationMode, Translator};
