// Job side of the pipeline: feed fetch, keyword scoring, result shaping.
// Every search re-fetches the feed; nothing is cached between requests.

pub mod feed;
pub mod format;
pub mod handlers;
pub mod listing;
pub mod scoring;
pub mod search;
