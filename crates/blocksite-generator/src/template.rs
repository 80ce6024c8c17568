//! HTML template system for page generation.
//!
//! Templates are plain strings with `{{ name }}` placeholders. Values are
//! inserted as-is, so callers escape them before putting them in a context.

use std::collections::HashMap;

use thiserror::Error;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("missing required variable: {0}")]
    MissingVariable(String),

    /// Template not found.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Invalid template syntax.
    #[error("invalid template syntax: {0}")]
    InvalidSyntax(String),
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Values available to `{{ name }}` placeholders while rendering one page.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    values: HashMap<String, String>,
}

impl TemplateContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key`, replacing any earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder form of [`TemplateContext::insert`].
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// A named page layout with `{{ name }}` placeholders.
///
/// `{{ name? }}` renders as empty when `name` is unbound; a bare `{{ name }}`
/// that is unbound is an error.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Registry key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fill every placeholder from `context`.
    ///
    /// Output is built in one left-to-right pass over the layout, so bound
    /// values are copied through verbatim even if they contain `{{`.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut out = String::with_capacity(self.content.len());
        let mut rest = self.content.as_str();

        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after_open = &rest[open + 2..];
            let close = after_open
                .find("}}")
                .ok_or_else(|| TemplateError::InvalidSyntax("unclosed {{ delimiter".to_string()))?;

            let key = after_open[..close].trim();
            let (key, optional) = key
                .strip_suffix('?')
                .map_or((key, false), |key| (key, true));

            match context.get(key) {
                Some(value) => out.push_str(value),
                None if optional => {}
                None => return Err(TemplateError::MissingVariable(key.to_string())),
            }

            rest = &after_open[close + 2..];
        }

        out.push_str(rest);
        Ok(out)
    }
}

/// Registry of templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a new registry with the built-in templates.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register(Template::new("block", BLOCK_TEMPLATE));
        registry.register(Template::new("index", INDEX_TEMPLATE));
        registry.register(Template::new("index_entry", INDEX_ENTRY_TEMPLATE));
        registry
    }

    /// Register a template, replacing any template with the same name.
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.name().to_string(), template);
    }

    /// Get a template by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        template.render(context)
    }
}

/// Detail page for one block.
pub const BLOCK_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{{ page_title }}</title>
  <meta name="description" content="{{ page_title }}" />
  <link rel="canonical" href="{{ canonical_url }}" />
  <meta property="og:type" content="article" />
  <meta property="og:title" content="{{ page_title }}" />
  <meta property="og:url" content="{{ canonical_url }}" />
  <style>
    :root { color-scheme: dark light; }
    body {
      margin: 0 auto;
      padding: 40px 18px 120px;
      max-width: 920px;
      font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace;
      line-height: 1.85;
    }
    .kicker { font-size: 12px; letter-spacing: .18em; text-transform: uppercase; opacity: .75; }
    h1 { font-size: 26px; line-height: 1.25; margin: 10px 0 18px; }
    .body { white-space: pre-wrap; font-size: 18px; }
    .nav { position: fixed; left: 0; right: 0; bottom: 0; padding: 14px 18px; }
    .nav a { color: inherit; margin-right: 12px; }
  </style>
</head>
<body>
  <div class="kicker">{{ kicker }}</div>
  <h1>{{ title }}</h1>
  <div class="body">{{ body }}</div>
  <nav class="nav">
    <a href="{{ index_url }}">Index</a>
    <a href="{{ prev_url }}" rel="prev">Prev</a>
    <a href="{{ next_url }}" rel="next">Next</a>
    <a href="{{ raw_url }}">Raw</a>
  </nav>
</body>
</html>
"#;

/// Crawlable index listing every block.
pub const INDEX_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{{ page_title }}</title>
  <meta name="description" content="{{ description }}" />
  <link rel="canonical" href="{{ canonical_url }}" />
  <style>
    :root { color-scheme: dark light; }
    body {
      margin: 0 auto;
      padding: 40px 18px 80px;
      max-width: 920px;
      font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace;
      line-height: 1.6;
    }
    h1 { font-size: 20px; letter-spacing: .18em; text-transform: uppercase; }
    .meta { opacity: .75; font-size: 13px; margin-bottom: 22px; }
    ul { list-style: none; padding: 0; display: grid; gap: 10px; }
    li { display: grid; grid-template-columns: auto 1fr auto; gap: 12px; align-items: baseline; }
    .t, .raw { opacity: .75; font-size: 13px; }
  </style>
</head>
<body>
  <h1>{{ site_title }}</h1>
  <div class="meta">{{ count }} blocks • canonical list for crawlers and agents</div>
  <ul>
{{ items }}
  </ul>
</body>
</html>
"#;

/// One `<li>` of the index.
pub const INDEX_ENTRY_TEMPLATE: &str = r#"<li>
  <a class="n" href="{{ block_url }}">Block {{ n }}</a>
  <span class="t">{{ title }}</span>
  <a class="raw" href="{{ raw_url }}">raw</a>
</li>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_simple_render() {
        let template = Template::new("test", "Hello, {{ name }}!");
        let ctx = TemplateContext::new().with_var("name", "World");

        assert_eq!(template.render(&ctx).unwrap(), "Hello, World!");
    }

    #[test]
    fn test_template_optional_variable() {
        let template = Template::new("test", "a{{ missing? }}b");
        assert_eq!(template.render(&TemplateContext::new()).unwrap(), "ab");
    }

    #[test]
    fn test_template_missing_required_variable() {
        let template = Template::new("test", "{{ required }}");
        let err = template.render(&TemplateContext::new()).unwrap_err();
        assert!(matches!(err, TemplateError::MissingVariable(ref v) if v == "required"));
    }

    #[test]
    fn test_template_unclosed_delimiter() {
        let template = Template::new("test", "{{ open");
        let err = template.render(&TemplateContext::new()).unwrap_err();
        assert!(matches!(err, TemplateError::InvalidSyntax(_)));
    }

    #[test]
    fn test_inserted_values_not_rescanned() {
        let template = Template::new("test", "{{ a }}|{{ b }}");
        let ctx = TemplateContext::new()
            .with_var("a", "{{ b }}")
            .with_var("b", "x");

        assert_eq!(template.render(&ctx).unwrap(), "{{ b }}|x");
    }

    #[test]
    fn test_registry_builtins() {
        let registry = TemplateRegistry::new();
        assert!(registry.get("block").is_some());
        assert!(registry.get("index").is_some());
        assert!(registry.get("index_entry").is_some());

        let err = registry.render("nope", &TemplateContext::new()).unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(_)));
    }

    #[test]
    fn test_registry_override() {
        let mut registry = TemplateRegistry::new();
        registry.register(Template::new("index_entry", "<li>{{ n }}</li>"));
        assert_eq!(registry.get("index_entry").unwrap().name(), "index_entry");

        let ctx = TemplateContext::new().with_var("n", "7");
        assert_eq!(registry.render("index_entry", &ctx).unwrap(), "<li>7</li>");
    }
}
