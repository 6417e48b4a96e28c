//! Metadata collection for machine-learning artifacts
//!
//! This module gathers the raw facts that the metric calculators consume. URLs are
//! classified by shape, then resolved against the appropriate upstream service
//! (the model hub for models and datasets, the code host for repositories) into a
//! single normalized [`MetadataRecord`].
//!
//! # Implementation Model
//!
//! The [`Resolver`] is the only entry point callers need. It classifies a URL,
//! fetches the primary metadata document, and normalizes it field by field with an
//! explicit fallback order per field. Ancillary data that only some metrics need
//! (the repository file tree and the commit author list) is fetched on demand via
//! [`Resolver::augment`] and merged into the same record, so each kind of fetch
//! happens at most once per invocation.
//!
//! Resolution never fails: upstream errors are logged and the affected fields stay
//! absent, leaving the metric calculators to apply their lowest defined scores.

mod artifact_url;
mod hosting;
mod hub;
mod record;
mod resolver;

pub use artifact_url::{Category, artifact_name, classify, code_host_links, hub_id, repo_path};
pub use hosting::HostClient;
pub use hub::HubClient;
pub use record::{CardData, FetchOptions, MetadataRecord, SiblingFile, StringOrSeq, TreeEntry};
pub use resolver::Resolver;
