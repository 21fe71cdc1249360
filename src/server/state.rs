use crate::article::ReadableExtractor;
use crate::settings::Settings;

pub(crate) struct ServerState {
    pub(crate) settings: Settings,
    pub(crate) http: reqwest::Client,
    pub(crate) extractor: ReadableExtractor,
}
