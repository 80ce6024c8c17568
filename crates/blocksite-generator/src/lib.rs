//! blocksite Generator Library
//!
//! Rendering, aggregation and publishing engine for blocksite.
//!
//! # Modules
//!
//! - [`template`] - HTML templates with variable interpolation
//! - [`html`] - Pure rendering of blocks into detail pages, text mirrors and index entries
//! - [`routes`] - Output paths and canonical URLs
//! - [`artifact`] - Artifact descriptors and the build manifest
//! - [`sitemap`] - XML sitemap generation
//! - [`robots`] - robots.txt generation
//! - [`aggregate`] - Joins rendered blocks into the manifest
//! - [`publish`] - Writes the manifest to disk
//! - [`build`] - Build orchestration

pub mod aggregate;
pub mod artifact;
pub mod build;
pub mod html;
pub mod publish;
pub mod robots;
pub mod routes;
pub mod sitemap;
pub mod template;

pub use aggregate::Aggregator;
pub use artifact::{ArtifactDescriptor, ContentType, Manifest};
pub use build::{BuildError, BuildStats, Builder};
pub use html::{BlockRenderer, RenderedBlock};
pub use publish::{PublishError, PublishStats, Publisher};
pub use robots::RobotsGenerator;
pub use sitemap::SitemapGenerator;
pub use template::{Template, TemplateContext, TemplateRegistry};
