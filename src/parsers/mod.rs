//! Link extraction from rendered markup

pub mod html;


pub use html::{extract_artifact_links, extract_links};
