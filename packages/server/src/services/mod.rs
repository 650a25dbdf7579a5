pub mod ingest;
pub mod post_tagger;
pub mod shoot_matcher;
pub mod tag_vocab;
