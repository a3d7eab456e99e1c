//! Reference form renderer producing static markup

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{FormRendererPort, RenderConfig, RenderedForm, SanitizeConfig};
use crate::error::{FormSelectError, FormSelectResult};
use crate::host::escape_html;

const BASE_TAGS: &[&str] = &[
    "a", "b", "br", "div", "em", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "i", "img", "label",
    "li", "ol", "p", "small", "span", "strong", "table", "tbody", "td", "th", "thead", "tr", "u",
    "ul",
];

const BASE_ATTRS: &[&str] = &["alt", "class", "href", "id", "src", "title"];

const URL_ATTRS: &[&str] = &["action", "formaction", "href", "src", "xlink:href"];

const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Tags whose content is dropped along with the tag
const DROP_CONTENT_TAGS: &[&str] = &["script", "style"];

/// Renders a definition's top-level components into plain markup.
///
/// Markup embedded in `htmlelement` and `content` components is sanitized
/// against a default allow-list extended by the render config.
#[derive(Debug, Clone, Default)]
pub struct StaticFormRenderer;

impl StaticFormRenderer {
    pub fn new() -> Self {
        Self
    }

    fn render_component(component: &Value, sanitize: &SanitizeConfig) -> (String, String) {
        let text = |field: &str| component.get(field).and_then(Value::as_str).unwrap_or("");
        let key = text("key");
        let component_type = text("type");

        let mut html = format!(
            "<div class=\"formio-component formio-component-{}\" data-key=\"{}\">",
            escape_html(component_type),
            escape_html(key)
        );

        match component_type {
            "htmlelement" | "content" => {
                let raw = component
                    .get("content")
                    .or_else(|| component.get("html"))
                    .and_then(Value::as_str)
                    .unwrap_or("");
                html.push_str(&sanitize_markup(raw, sanitize));
            }
            _ => {
                let label = text("label");
                if !label.is_empty() {
                    html.push_str(&format!("<label>{}</label>", escape_html(label)));
                }
            }
        }

        html.push_str("</div>");
        (key.to_string(), html)
    }
}

#[async_trait]
impl FormRendererPort for StaticFormRenderer {
    async fn create_form(
        &self,
        container: &str,
        definition: &Value,
        config: &RenderConfig,
    ) -> FormSelectResult<RenderedForm> {
        if !definition.is_object() {
            return Err(FormSelectError::RenderFailure(
                "form definition must be an object".to_string(),
            ));
        }
        let components = definition
            .get("components")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                FormSelectError::RenderFailure("form definition has no components array".to_string())
            })?;

        let title = definition
            .get("title")
            .and_then(Value::as_str)
            .map(str::to_string);

        let mut markup = format!(
            "<form class=\"formio-form\" data-container=\"{}\">",
            escape_html(container)
        );
        if let Some(title) = &title {
            markup.push_str(&format!("<h3>{}</h3>", escape_html(title)));
        }

        let mut component_keys = Vec::with_capacity(components.len());
        for component in components {
            let (key, html) = Self::render_component(component, &config.sanitize_config);
            component_keys.push(key);
            markup.push_str(&html);
        }
        markup.push_str("</form>");

        Ok(RenderedForm {
            markup,
            title,
            component_keys,
        })
    }
}

/// Strip tags and attributes outside the allow-list from embedded markup
pub fn sanitize_markup(raw: &str, config: &SanitizeConfig) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let after = &rest[start..];
        let Some(end) = after.find('>') else {
            out.push_str(&escape_html(after));
            return out;
        };

        let tag = &after[1..end];
        rest = &after[end + 1..];

        let name = tag_name(tag).to_ascii_lowercase();
        if !tag.starts_with('/') && DROP_CONTENT_TAGS.contains(&name.as_str()) {
            let closing = format!("</{}", name);
            rest = match rest.to_ascii_lowercase().find(&closing) {
                Some(pos) => rest[pos..].find('>').map_or("", |gt| &rest[pos + gt + 1..]),
                None => "",
            };
            continue;
        }

        if let Some(clean) = sanitize_tag(tag, config) {
            out.push_str(&clean);
        }
    }

    out.push_str(rest);
    out
}

fn tag_name(tag: &str) -> &str {
    let body = tag.trim_start_matches('/').trim_start();
    let end = body
        .find(|c: char| c.is_whitespace() || c == '/')
        .unwrap_or(body.len());
    &body[..end]
}

fn sanitize_tag(tag: &str, config: &SanitizeConfig) -> Option<String> {
    let name = tag_name(tag);
    if name.is_empty() || !tag_allowed(name, config) {
        return None;
    }
    if tag.starts_with('/') {
        return Some(format!("</{}>", name));
    }

    let self_closing = tag.trim_end().ends_with('/');
    let body = tag.trim_end().trim_end_matches('/');
    let attr_source = &body[body.find(name).map_or(body.len(), |p| p + name.len())..];

    let attrs: String = parse_attributes(attr_source)
        .into_iter()
        .filter(|(attr, value)| attr_allowed(attr, value.as_deref(), config))
        .map(|(attr, value)| match value {
            Some(value) => format!(" {}=\"{}\"", attr, escape_html(&value)),
            None => format!(" {}", attr),
        })
        .collect();

    Some(format!(
        "<{}{}{}>",
        name,
        attrs,
        if self_closing { " /" } else { "" }
    ))
}

fn tag_allowed(name: &str, config: &SanitizeConfig) -> bool {
    BASE_TAGS.iter().any(|t| t.eq_ignore_ascii_case(name)) || config.allows_tag(name)
}

fn attr_allowed(attr: &str, value: Option<&str>, config: &SanitizeConfig) -> bool {
    let allowed = BASE_ATTRS.iter().any(|a| a.eq_ignore_ascii_case(attr)) || config.allows_attr(attr);
    allowed && value.map_or(true, |v| value_allowed(attr, v))
}

/// Browsers drop whitespace and control characters inside a URL before
/// reading its scheme, so the scheme is checked on the stripped value.
fn value_allowed(attr: &str, value: &str) -> bool {
    let stripped: String = value
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    if URL_ATTRS.iter().any(|a| a.eq_ignore_ascii_case(attr)) {
        url_allowed(&stripped)
    } else {
        !stripped.starts_with("javascript:")
    }
}

/// Relative URLs and the safe schemes only
fn url_allowed(url: &str) -> bool {
    match url.find([':', '/', '?', '#']) {
        Some(pos) if url[pos..].starts_with(':') => SAFE_SCHEMES.contains(&&url[..pos]),
        _ => true,
    }
}

fn parse_attributes(source: &str) -> Vec<(String, Option<String>)> {
    let mut attrs = Vec::new();
    let mut chars = source.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        let mut name = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() || c == '=' {
                break;
            }
            name.push(c);
            chars.next();
        }
        if name.is_empty() {
            if chars.next().is_none() {
                break;
            }
            continue;
        }

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        if chars.peek() != Some(&'=') {
            attrs.push((name, None));
            continue;
        }
        chars.next();
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        let value = match chars.peek().copied() {
            Some(quote) if quote == '"' || quote == '\'' => {
                chars.next();
                chars.by_ref().take_while(|&c| c != quote).collect()
            }
            _ => {
                let mut value = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() {
                        break;
                    }
                    value.push(c);
                    chars.next();
                }
                value
            }
        };
        attrs.push((name, Some(value)));
    }

    attrs
}
